//! Liar's Dice rules engine.
//!
//! One [`GameEngine`] runs one match. It owns the shuffled turn order,
//! every player's hidden dice pool, and the outstanding bid, and it is the
//! only place game rules live. The engine is a pure, synchronous state
//! machine: no I/O, no async, no internal locking. Whoever owns it (a room
//! actor, a test, a bot harness) must apply actions one at a time.
//!
//! Randomness is injected: the engine rolls and shuffles with a seedable
//! [`rand_chacha::ChaCha8Rng`], so a seeded engine replays the exact same
//! match. See [`GameEngine::with_seed`].
//!
//! # Rules recap
//!
//! Players bid on how many dice, across *all* hands, show a face. Ones are
//! wild and count toward every face. A bid must outbid the previous one
//! (see [`Bid::allows_raise`] for the wild special cases). Instead of
//! bidding, a player may challenge: all dice are counted, and whoever was
//! wrong (the bidder if the bid was short, otherwise the challenger) loses
//! one die. Zero dice means elimination; last player holding dice wins.

mod bid;
mod dice;
mod engine;
mod error;
mod player;

pub use bid::{Bid, RaiseRule};
pub use dice::{DicePool, Face};
pub use engine::{
    BidAccepted, ChallengeOutcome, GameEngine, MAX_PLAYERS, MIN_PLAYERS,
    STARTING_DICE,
};
pub use error::EngineError;
pub use player::Player;
