//! # Perudo
//!
//! A server-authoritative Liar's Dice (Perudo) game service.
//!
//! The workspace is layered: `perudo-engine` holds the pure rules,
//! `perudo-room` runs one match per actor task, `perudo-protocol`
//! defines the boundary messages, and this meta-crate ties them into a
//! single [`GameService`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use perudo::prelude::*;
//!
//! # async fn run() -> Result<(), PerudoError> {
//! let service = GameService::new();
//! let room = service.create_room(RoomConfig::default()).await;
//!
//! let (alice, mut events) = service.join(room, "alice").await?;
//! let (_bob, _bob_events) = service.join(room, "bob").await?;
//!
//! service.perform(alice, ClientAction::StartGame).await?;
//! while let Some(event) = events.recv().await {
//!     // react to RoundStarted, YourTurn, ChallengeResolved, ...
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod service;

pub use error::PerudoError;
pub use service::GameService;

pub use perudo_engine::{Bid, EngineError, GameEngine, Player};
pub use perudo_protocol::{ClientAction, PlayerId, Recipient, RoomId, ServerEvent};
pub use perudo_room::{RoomConfig, RoomError, RoomInfo, RoomManager, RoomState};

/// The common imports for hosting or scripting matches.
pub mod prelude {
    pub use crate::{
        ClientAction, GameService, PerudoError, PlayerId, RoomConfig, RoomId,
        RoomState, ServerEvent,
    };
}
