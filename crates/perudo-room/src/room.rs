//! Room actor: an isolated Tokio task that owns one match.
//!
//! Each room runs in its own task, communicating with the outside world
//! through an mpsc channel. The command loop applies actions one at a
//! time, which is what keeps the engine free of locks: two players
//! acting "simultaneously" are simply two commands in queue order, and
//! the second is judged against the state the first left behind.

use std::collections::HashMap;

use perudo_engine::{GameEngine, Player};
use perudo_protocol::{ClientAction, PlayerId, Recipient, RoomId, ServerEvent};
use tokio::sync::{mpsc, oneshot};

use crate::{RoomConfig, RoomError, RoomState};

/// Channel sender for delivering events to a player.
pub type PlayerSender = mpsc::UnboundedSender<ServerEvent>;

/// Commands sent to a room actor through its channel.
///
/// The `oneshot::Sender` in some variants is a reply channel: the
/// caller sends a command and waits for the response on it.
pub(crate) enum RoomCommand {
    /// Add a player to the room's lobby.
    Join {
        player_id: PlayerId,
        name: String,
        sender: PlayerSender,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Remove a player from the room.
    Leave {
        player_id: PlayerId,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },

    /// Deliver a game action from a player.
    Action {
        sender: PlayerId,
        action: ClientAction,
    },

    /// Request the current room state.
    GetInfo {
        reply: oneshot::Sender<RoomInfo>,
    },

    /// Shut down the room.
    Shutdown,
}

/// A snapshot of room metadata (not the match state itself).
#[derive(Debug, Clone)]
pub struct RoomInfo {
    /// The room's unique ID.
    pub room_id: RoomId,
    /// Current lifecycle state.
    pub state: RoomState,
    /// Number of players currently in the room.
    pub player_count: usize,
    /// Maximum players allowed.
    pub max_players: usize,
}

/// Handle to a running room actor. Used to send commands to it.
///
/// This is cheap to clone — it's just an `mpsc::Sender` wrapper.
/// The `RoomManager` holds one of these per room.
#[derive(Clone)]
pub struct RoomHandle {
    room_id: RoomId,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Returns the room's unique ID.
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Sends a join request to the room.
    pub async fn join(
        &self,
        player_id: PlayerId,
        name: impl Into<String>,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                player_id,
                name: name.into(),
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    /// Sends a leave request to the room.
    pub async fn leave(&self, player_id: PlayerId) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave {
                player_id,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?
    }

    /// Sends a game action to the room (fire-and-forget; the outcome,
    /// acceptance or rejection, comes back on the player's event
    /// channel).
    pub async fn send_action(
        &self,
        sender: PlayerId,
        action: ClientAction,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Action { sender, action })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    /// Requests the current room info.
    pub async fn get_info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::GetInfo { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }

    /// Tells the room to shut down.
    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| RoomError::Unavailable(self.room_id))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    room_id: RoomId,
    state: RoomState,
    config: RoomConfig,
    /// Lobby roster in join order; becomes the engine's input roster.
    roster: Vec<Player>,
    /// Per-player outbound channels.
    senders: HashMap<PlayerId, PlayerSender>,
    /// `None` until a member starts the match.
    engine: Option<GameEngine>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop, processing commands until shutdown.
    async fn run(mut self) {
        tracing::info!(room_id = %self.room_id, "room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Join {
                    player_id,
                    name,
                    sender,
                    reply,
                } => {
                    let result = self.handle_join(player_id, name, sender);
                    let _ = reply.send(result);
                }
                RoomCommand::Leave { player_id, reply } => {
                    let result = self.handle_leave(player_id);
                    let _ = reply.send(result);
                }
                RoomCommand::Action { sender, action } => {
                    self.handle_action(sender, action);
                }
                RoomCommand::GetInfo { reply } => {
                    let _ = reply.send(self.info());
                }
                RoomCommand::Shutdown => {
                    tracing::info!(room_id = %self.room_id, "room shutting down");
                    self.state = RoomState::Destroying;
                    break;
                }
            }
        }

        tracing::info!(room_id = %self.room_id, "room actor stopped");
    }

    fn handle_join(
        &mut self,
        player_id: PlayerId,
        name: String,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        if !self.state.is_joinable() {
            return Err(RoomError::InvalidState(format!(
                "cannot join room in state {}",
                self.state
            )));
        }
        if self.roster.iter().any(|p| p.id == player_id) {
            return Err(RoomError::AlreadyInRoom(player_id, self.room_id));
        }
        if self.roster.len() >= self.config.max_players {
            return Err(RoomError::RoomFull(self.room_id));
        }

        self.roster.push(Player::new(player_id, name.clone()));
        self.senders.insert(player_id, sender);
        tracing::info!(
            room_id = %self.room_id,
            %player_id,
            players = self.roster.len(),
            "player joined"
        );

        let roster = self
            .roster
            .iter()
            .map(|p| (p.id, p.name.clone()))
            .collect();
        self.dispatch(vec![(
            Recipient::All,
            ServerEvent::PlayerJoined {
                player: player_id,
                name,
                roster,
            },
        )]);

        Ok(())
    }

    fn handle_leave(&mut self, player_id: PlayerId) -> Result<(), RoomError> {
        let pos = self
            .roster
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(RoomError::NotInRoom(player_id, self.room_id))?;

        // In the lobby the player disappears entirely. Mid-match the
        // engine keeps them in the turn order: their dice stay on the
        // table and their turn still comes around until an elimination
        // empties their pool. Known limitation of the skip rule.
        if self.state.is_joinable() {
            self.roster.remove(pos);
        }
        self.senders.remove(&player_id);

        tracing::info!(
            room_id = %self.room_id,
            %player_id,
            players = self.roster.len(),
            "player left"
        );

        self.dispatch(vec![(
            Recipient::All,
            ServerEvent::PlayerLeft { player: player_id },
        )]);
        Ok(())
    }

    fn handle_action(&mut self, sender: PlayerId, action: ClientAction) {
        if !self.roster.iter().any(|p| p.id == sender) {
            tracing::warn!(
                room_id = %self.room_id,
                %sender,
                "action from non-member, ignoring"
            );
            return;
        }

        let events = match action {
            ClientAction::StartGame => self.handle_start(sender),
            ClientAction::Bid { quantity, face } => {
                self.handle_bid(sender, quantity, face)
            }
            ClientAction::Challenge => self.handle_challenge(sender),
        };
        self.dispatch(events);
    }

    fn handle_start(&mut self, sender: PlayerId) -> Vec<(Recipient, ServerEvent)> {
        if self.state != RoomState::Lobby {
            return reject(sender, format!("cannot start in state {}", self.state));
        }
        if self.roster.len() < self.config.min_players {
            return reject(
                sender,
                format!(
                    "need at least {} players to start, have {}",
                    self.config.min_players,
                    self.roster.len()
                ),
            );
        }

        let result = match self.config.seed {
            Some(seed) => GameEngine::with_seed(self.roster.clone(), seed),
            None => GameEngine::from_entropy(self.roster.clone()),
        };
        let engine = match result {
            Ok(engine) => engine,
            Err(err) => return reject(sender, err.to_string()),
        };

        self.state = RoomState::InProgress;
        tracing::info!(
            room_id = %self.room_id,
            players = self.roster.len(),
            "match started"
        );

        let events = round_start_events(&engine);
        self.engine = Some(engine);
        events
    }

    fn handle_bid(
        &mut self,
        sender: PlayerId,
        quantity: u32,
        face: u8,
    ) -> Vec<(Recipient, ServerEvent)> {
        let Some(engine) = &mut self.engine else {
            return reject(sender, "the match has not started");
        };

        match engine.submit_bid(sender, quantity, face) {
            Ok(accepted) => vec![
                (
                    Recipient::All,
                    ServerEvent::BidAccepted {
                        bidder: accepted.bid.bidder,
                        quantity: accepted.bid.quantity,
                        face: accepted.bid.face.value(),
                    },
                ),
                (
                    Recipient::All,
                    ServerEvent::TurnChanged {
                        player: accepted.next_player,
                    },
                ),
                (Recipient::Player(accepted.next_player), ServerEvent::YourTurn),
            ],
            Err(err) => {
                tracing::debug!(
                    room_id = %self.room_id,
                    %sender,
                    %err,
                    "bid rejected"
                );
                reject(sender, err.to_string())
            }
        }
    }

    fn handle_challenge(&mut self, sender: PlayerId) -> Vec<(Recipient, ServerEvent)> {
        let Some(engine) = &mut self.engine else {
            return reject(sender, "the match has not started");
        };

        let outcome = match engine.challenge(sender) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::debug!(
                    room_id = %self.room_id,
                    %sender,
                    %err,
                    "challenge rejected"
                );
                return reject(sender, err.to_string());
            }
        };

        let remaining = engine
            .dice_of(outcome.loser)
            .map_or(0, <[u8]>::len);
        let mut events = vec![
            (
                Recipient::All,
                ServerEvent::ChallengeResolved {
                    challenger: outcome.challenger,
                    bidder: outcome.bid.bidder,
                    loser: outcome.loser,
                    actual_count: outcome.actual_count,
                    quantity: outcome.bid.quantity,
                    face: outcome.bid.face.value(),
                    eliminated: outcome.eliminated,
                },
            ),
        ];
        // An already-empty loser (an eliminated player's failed
        // challenge) lost nothing, so there is no DiceLost to report.
        if remaining > 0 || outcome.eliminated {
            events.push((
                Recipient::Player(outcome.loser),
                ServerEvent::DiceLost { remaining },
            ));
        }

        if engine.is_game_over() {
            if let Some(winner) = engine.winner() {
                events.push((
                    Recipient::All,
                    ServerEvent::GameOver {
                        winner: winner.id,
                        name: winner.name.clone(),
                    },
                ));
            }
            self.state = RoomState::Finished;
            tracing::info!(room_id = %self.room_id, "match finished");
        } else {
            match engine.start_new_round().map(|opener| opener.id) {
                Ok(_) => events.extend(round_start_events(engine)),
                Err(err) => {
                    // NoEligiblePlayer here means the state invariants
                    // broke; freeze the room rather than spin.
                    tracing::error!(
                        room_id = %self.room_id,
                        %err,
                        "failed to start next round"
                    );
                    self.state = RoomState::Finished;
                }
            }
        }

        events
    }

    /// Dispatches events to the correct recipients.
    fn dispatch(&self, events: Vec<(Recipient, ServerEvent)>) {
        for (recipient, event) in events {
            match recipient {
                Recipient::All => {
                    for pid in self.senders.keys() {
                        self.send_to(*pid, event.clone());
                    }
                }
                Recipient::Player(pid) => {
                    self.send_to(pid, event);
                }
                Recipient::AllExcept(excluded) => {
                    for pid in self.senders.keys() {
                        if *pid != excluded {
                            self.send_to(*pid, event.clone());
                        }
                    }
                }
            }
        }
    }

    /// Sends an event to a single player. Silently drops if the receiver
    /// is gone (player disconnected).
    fn send_to(&self, player_id: PlayerId, event: ServerEvent) {
        if let Some(sender) = self.senders.get(&player_id) {
            let _ = sender.send(event);
        }
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            room_id: self.room_id,
            state: self.state,
            player_count: self.roster.len(),
            max_players: self.config.max_players,
        }
    }
}

/// The events opening a round: each surviving player privately learns
/// their own dice, everyone learns whose turn it is, and the player on
/// turn gets the explicit prompt. Dice never appear in a broadcast.
fn round_start_events(engine: &GameEngine) -> Vec<(Recipient, ServerEvent)> {
    let mut events = Vec::new();
    for player in engine.players() {
        if let Some(dice) = engine.dice_of(player.id) {
            if !dice.is_empty() {
                events.push((
                    Recipient::Player(player.id),
                    ServerEvent::RoundStarted {
                        dice: dice.to_vec(),
                    },
                ));
            }
        }
    }
    let current = engine.current_player().id;
    events.push((Recipient::All, ServerEvent::TurnChanged { player: current }));
    events.push((Recipient::Player(current), ServerEvent::YourTurn));
    events
}

fn reject(player: PlayerId, reason: impl Into<String>) -> Vec<(Recipient, ServerEvent)> {
    vec![(
        Recipient::Player(player),
        ServerEvent::ActionRejected {
            reason: reason.into(),
        },
    )]
}

/// Spawns a new room actor task and returns a handle to communicate with it.
///
/// `channel_size` controls backpressure — if the channel fills up,
/// senders will wait (bounded channel).
pub(crate) fn spawn_room(
    room_id: RoomId,
    config: RoomConfig,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        room_id,
        state: RoomState::Lobby,
        config,
        roster: Vec::new(),
        senders: HashMap::new(),
        engine: None,
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle {
        room_id,
        sender: tx,
    }
}
