//! Player identity as the engine sees it.

use perudo_protocol::PlayerId;

/// A participant in a match: an opaque id plus a display name.
///
/// Players are created by the session layer before the engine exists.
/// The engine only compares ids and reads names for reporting; it never
/// mutates identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
