//! `GameService`: the single entry point for hosting matches.
//!
//! Ties the layers together: callers hold one service, identify
//! themselves by the [`PlayerId`] it hands out, and receive everything
//! else through their event channel. No other state crosses the
//! boundary; in particular, dice never leave a room except through a
//! player's own channel.

use std::sync::atomic::{AtomicU64, Ordering};

use perudo_protocol::{ClientAction, PlayerId, RoomId, ServerEvent};
use perudo_room::{RoomConfig, RoomInfo, RoomManager};
use tokio::sync::{Mutex, mpsc};

use crate::PerudoError;

/// A hosted game service: many rooms, one id authority.
///
/// The manager sits behind an async `Mutex`; every operation is a short
/// lock-route-unlock, with the real work happening inside the room
/// actors. Cheap to share behind an `Arc`.
pub struct GameService {
    rooms: Mutex<RoomManager>,
    /// Player ids are unique for the lifetime of the service, never
    /// reused across rooms or matches.
    next_player_id: AtomicU64,
}

impl GameService {
    /// Creates an empty service.
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(RoomManager::new()),
            next_player_id: AtomicU64::new(1),
        }
    }

    /// Creates a room and returns its ID for others to join.
    pub async fn create_room(&self, config: RoomConfig) -> RoomId {
        self.rooms.lock().await.create_room(config)
    }

    /// Joins a room under a display name.
    ///
    /// Allocates a fresh [`PlayerId`] and returns it with the receiving
    /// end of the player's event channel. Everything the player is
    /// allowed to see arrives there, starting with the join broadcast.
    pub async fn join(
        &self,
        room_id: RoomId,
        name: impl Into<String>,
    ) -> Result<(PlayerId, mpsc::UnboundedReceiver<ServerEvent>), PerudoError> {
        let player_id = PlayerId(self.next_player_id.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();

        self.rooms
            .lock()
            .await
            .join_room(player_id, name, room_id, tx)
            .await?;

        tracing::info!(%player_id, %room_id, "player joined via service");
        Ok((player_id, rx))
    }

    /// Removes a player from their current room.
    pub async fn leave(&self, player_id: PlayerId) -> Result<(), PerudoError> {
        self.rooms.lock().await.leave_room(player_id).await?;
        Ok(())
    }

    /// Performs a game action on behalf of a player.
    ///
    /// Delivery is fire-and-forget: `Ok` means the action reached the
    /// player's room, and the verdict (acceptance events or a private
    /// [`ServerEvent::ActionRejected`]) comes back on the event channel.
    pub async fn perform(
        &self,
        player_id: PlayerId,
        action: ClientAction,
    ) -> Result<(), PerudoError> {
        self.rooms
            .lock()
            .await
            .route_action(player_id, action)
            .await?;
        Ok(())
    }

    /// Metadata for one room.
    pub async fn room_info(&self, room_id: RoomId) -> Result<RoomInfo, PerudoError> {
        let info = self.rooms.lock().await.get_room_info(room_id).await?;
        Ok(info)
    }

    /// All rooms still accepting players.
    pub async fn list_rooms(&self) -> Vec<RoomInfo> {
        self.rooms.lock().await.list_rooms().await
    }

    /// Shuts a room down and evicts its players.
    pub async fn destroy_room(&self, room_id: RoomId) -> Result<(), PerudoError> {
        self.rooms.lock().await.destroy_room(room_id).await?;
        Ok(())
    }

    /// The room a player is currently in, if any.
    pub async fn player_room(&self, player_id: PlayerId) -> Option<RoomId> {
        self.rooms.lock().await.player_room(&player_id)
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new()
    }
}
