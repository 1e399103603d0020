//! Identity types and event addressing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A unique identifier for a player.
///
/// Newtype over `u64` so a player id can never be confused with a room id
/// even though both are plain numbers underneath. `#[serde(transparent)]`
/// keeps the JSON shape a bare number: `PlayerId(42)` serializes as `42`.
///
/// Ids are assigned by the session layer when a player first shows up and
/// are opaque to everything below it; the engine only ever compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for a room (one match of Liar's Dice).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u64);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R-{}", self.0)
    }
}

/// Who should receive a server event.
///
/// Rooms produce `(Recipient, ServerEvent)` pairs and the dispatch code
/// delivers each event only to the players the recipient names. This is
/// the mechanism that keeps a player's dice private: events carrying dice
/// are always addressed `Player(owner)`, never `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    /// Every player in the room.
    All,

    /// One specific player.
    Player(PlayerId),

    /// Everyone except the specified player.
    AllExcept(PlayerId),
}
