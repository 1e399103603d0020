//! Boundary message types for the perudo game service.
//!
//! This crate defines everything that crosses the line between a player
//! and the room hosting their match:
//!
//! - **Identity** ([`PlayerId`], [`RoomId`]) - newtype ids used by every
//!   other crate.
//! - **Actions** ([`ClientAction`]) - what a player may ask a room to do.
//! - **Events** ([`ServerEvent`]) - what a room reports back, each paired
//!   with a [`Recipient`] saying who is allowed to see it.
//!
//! There is no wire framing here. Transport is out of scope for this
//! service; the boundary is typed in-process messages. Everything is
//! still serde-serializable with a pinned JSON shape so a front end can
//! be bolted on without touching the rooms or the engine.

mod messages;
mod types;

pub use messages::{ClientAction, ServerEvent};
pub use types::{PlayerId, Recipient, RoomId};
