//! Room lifecycle management for perudo matches.
//!
//! Each room runs as an isolated Tokio task (actor model) owning one
//! lobby and, once started, one [`perudo_engine::GameEngine`]. Commands
//! arrive over an mpsc channel and are applied strictly in order, so
//! concurrent players never race on match state.
//!
//! # Key types
//!
//! - [`RoomManager`] — creates/destroys rooms, routes players
//! - [`RoomHandle`] — send commands to a running room actor
//! - [`RoomState`] — lifecycle state machine
//! - [`RoomConfig`] — room settings (player limits, RNG seed)

mod config;
mod error;
mod manager;
mod room;

pub use config::{RoomConfig, RoomState};
pub use error::RoomError;
pub use manager::RoomManager;
pub use room::{PlayerSender, RoomHandle, RoomInfo};
