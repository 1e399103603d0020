//! Player actions and room events.
//!
//! Both enums are internally tagged (`#[serde(tag = "type")]`) so the JSON
//! is flat and easy to consume from a JavaScript client:
//! `{ "type": "Bid", "quantity": 3, "face": 4 }`.

use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// What a player can ask their room to do.
///
/// Everything the room needs to know beyond these fields (who is sending,
/// which room) is attached by the session layer, so a malicious client
/// cannot act on someone else's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientAction {
    /// Start the match with everyone currently in the lobby.
    StartGame,

    /// Claim that at least `quantity` dice across all hands show `face`
    /// (ones are wild and count toward every face).
    Bid { quantity: u32, face: u8 },

    /// Call the current bid a lie and force a reveal.
    Challenge,
}

/// What a room reports back to players.
///
/// Events carrying dice (`RoundStarted`, `DiceLost`) are only ever
/// addressed to the owner of those dice; everything else is broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// Someone joined the lobby. Carries the full roster so late joiners
    /// see everyone who arrived before them.
    PlayerJoined {
        player: PlayerId,
        name: String,
        roster: Vec<(PlayerId, String)>,
    },

    /// Someone left the lobby (or dropped mid-match).
    PlayerLeft { player: PlayerId },

    /// A round began; `dice` is the recipient's own freshly rolled hand.
    RoundStarted { dice: Vec<u8> },

    /// Sent to the one player whose turn it now is.
    YourTurn,

    /// Broadcast counterpart of [`ServerEvent::YourTurn`] so everyone can
    /// show whose move it is.
    TurnChanged { player: PlayerId },

    /// A bid was accepted and is now the bid to beat.
    BidAccepted {
        bidder: PlayerId,
        quantity: u32,
        face: u8,
    },

    /// The recipient's action was refused. Sent to the actor only; the
    /// turn does not move and they may try again.
    ActionRejected { reason: String },

    /// A challenge was resolved and all dice were revealed (as a count,
    /// not as individual hands).
    ChallengeResolved {
        challenger: PlayerId,
        bidder: PlayerId,
        loser: PlayerId,
        actual_count: u32,
        quantity: u32,
        face: u8,
        eliminated: bool,
    },

    /// The recipient lost a die; `remaining` is their updated pool size.
    DiceLost { remaining: usize },

    /// The match is over.
    GameOver { winner: PlayerId, name: String },
}
