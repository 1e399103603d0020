//! Room configuration and state machine.

use serde::{Deserialize, Serialize};

use perudo_engine::{MAX_PLAYERS, MIN_PLAYERS};

// ---------------------------------------------------------------------------
// RoomConfig
// ---------------------------------------------------------------------------

/// Configuration for a room instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Minimum players required before the match can be started.
    pub min_players: usize,

    /// Maximum players allowed in the room.
    pub max_players: usize,

    /// Fixed RNG seed for the match. `None` seeds from the operating
    /// system; set it for reproducible matches (tests, replays).
    pub seed: Option<u64>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            min_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
            seed: None,
        }
    }
}

// ---------------------------------------------------------------------------
// RoomState
// ---------------------------------------------------------------------------

/// The lifecycle state of a room.
///
/// The normal lifecycle runs:
///
/// ```text
/// Lobby → InProgress → Finished → Destroying
/// ```
///
/// `Destroying` is also reachable directly from any earlier state when
/// the room is torn down.
///
/// - **Lobby**: Room exists, accepting joins. The match has not been
///   started; any member may start it once enough players are present.
/// - **InProgress**: The match is running. Players bid and challenge,
///   no new joins.
/// - **Finished**: The match ended with a winner. Players can still see
///   the outcome but no further actions are accepted.
/// - **Destroying**: Room is being cleaned up. All players removed,
///   resources freed. After this the room is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomState {
    Lobby,
    InProgress,
    Finished,
    Destroying,
}

impl RoomState {
    /// Returns `true` if the room is accepting new players.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Lobby)
    }

    /// Returns `true` if a match is actively running.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InProgress)
    }
}

impl std::fmt::Display for RoomState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lobby => write!(f, "Lobby"),
            Self::InProgress => write!(f, "InProgress"),
            Self::Finished => write!(f, "Finished"),
            Self::Destroying => write!(f, "Destroying"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_state_is_joinable() {
        assert!(RoomState::Lobby.is_joinable());
        assert!(!RoomState::InProgress.is_joinable());
        assert!(!RoomState::Finished.is_joinable());
        assert!(!RoomState::Destroying.is_joinable());
    }

    #[test]
    fn test_room_state_is_active() {
        assert!(!RoomState::Lobby.is_active());
        assert!(RoomState::InProgress.is_active());
        assert!(!RoomState::Finished.is_active());
    }

    #[test]
    fn test_room_config_default() {
        let config = RoomConfig::default();
        assert_eq!(config.min_players, 2);
        assert_eq!(config.max_players, 10);
        assert!(config.seed.is_none());
    }
}
