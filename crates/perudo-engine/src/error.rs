//! Error types for the rules engine.
//!
//! All engine errors are local, synchronous, and non-retrying: the engine
//! never retries anything itself, recovery is always "reject the action
//! and let the actor try again" (or, for construction errors, let whoever
//! asked for the match hear that it could not start).

use perudo_protocol::PlayerId;

use crate::RaiseRule;

/// Errors produced by [`GameEngine`](crate::GameEngine) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The roster handed to the constructor cannot form a match: fewer
    /// than two players, or duplicate player ids. Fatal to match
    /// creation.
    #[error("invalid player set: {0}")]
    InvalidPlayerSet(String),

    /// The acting player is not the current player. Recoverable; the
    /// action is ignored and the actor notified.
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    /// The bid fails basic shape checks before any comparison with the
    /// current bid: face outside 1..=6 or quantity below 1.
    #[error("malformed bid: {quantity} x {face} (face must be 1-6, quantity at least 1)")]
    MalformedBid { quantity: u32, face: u8 },

    /// The bid is well formed but does not legally raise the current
    /// bid. Carries the violated rule.
    #[error("illegal bid: {0}")]
    IllegalBid(RaiseRule),

    /// A challenge arrived with no bid outstanding.
    #[error("there is no bid to challenge")]
    NoBidToChallenge,

    /// The acting player is not part of this match.
    #[error("player {0} is not in this match")]
    UnknownPlayer(PlayerId),

    /// Turn advancement found no player holding dice. Unreachable while
    /// game-over is checked correctly; an internal invariant violation,
    /// not a user-facing rejection.
    #[error("no player has any dice left")]
    NoEligiblePlayer,

    /// The match already has a winner; no further bids or challenges.
    #[error("the match is already over")]
    MatchOver,
}
