//! Unified error type for the perudo service.

use perudo_engine::EngineError;
use perudo_room::RoomError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `perudo` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum PerudoError {
    /// A rules violation (illegal bid, out of turn, no bid to challenge).
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A room-level error (full, not found, invalid state).
    #[error(transparent)]
    Room(#[from] RoomError),
}
