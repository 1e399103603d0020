//! Three bots play a full match against each other.
//!
//! Run with an optional seed for a reproducible game:
//!
//! ```text
//! cargo run -p bot-match -- 42
//! ```
//!
//! Each bot lives in its own task and sees only what a real client
//! would: its private hand plus the public broadcasts. The decision
//! rule is deliberately simple. A bot estimates how many dice match the
//! current bid (its own hand counted exactly, a third of the hidden
//! dice assumed to match via the wild ones) and challenges when the bid
//! overshoots that estimate; otherwise it raises the quantity by one.

use std::sync::Arc;

use perudo::prelude::*;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const BOTS: [&str; 3] = ["alpha", "bravo", "charlie"];

struct Bot {
    id: PlayerId,
    name: &'static str,
    hand: Vec<u8>,
    current_bid: Option<(u32, u8)>,
    /// Dice still on the table across all players.
    total_dice: usize,
}

impl Bot {
    fn new(id: PlayerId, name: &'static str) -> Self {
        Self {
            id,
            name,
            hand: Vec::new(),
            current_bid: None,
            total_dice: BOTS.len() * 5,
        }
    }

    /// Dice in our hand matching `face`, ones wild.
    fn own_matching(&self, face: u8) -> u32 {
        self.hand
            .iter()
            .filter(|&&d| d == face || d == 1)
            .count() as u32
    }

    /// The face we hold most of, ignoring wilds unless that's all we have.
    fn favourite_face(&self) -> u8 {
        (2..=6u8)
            .max_by_key(|&f| self.own_matching(f))
            .unwrap_or(2)
    }

    fn decide(&self) -> ClientAction {
        match self.current_bid {
            None => ClientAction::Bid {
                quantity: 1,
                face: self.favourite_face(),
            },
            Some((quantity, face)) => {
                let hidden = self.total_dice.saturating_sub(self.hand.len());
                let estimate = f64::from(self.own_matching(face)) + hidden as f64 / 3.0;
                if f64::from(quantity) > estimate + 1.0 {
                    ClientAction::Challenge
                } else {
                    // Same face, one more: legal against any standing bid.
                    ClientAction::Bid {
                        quantity: quantity + 1,
                        face,
                    }
                }
            }
        }
    }

    async fn run(
        mut self,
        service: Arc<GameService>,
        mut events: mpsc::UnboundedReceiver<ServerEvent>,
    ) {
        while let Some(event) = events.recv().await {
            match event {
                ServerEvent::RoundStarted { dice } => {
                    tracing::debug!(bot = self.name, ?dice, "new hand");
                    self.hand = dice;
                }
                ServerEvent::BidAccepted {
                    bidder,
                    quantity,
                    face,
                } => {
                    tracing::info!(bot = self.name, %bidder, quantity, face, "bid stands");
                    self.current_bid = Some((quantity, face));
                }
                ServerEvent::ChallengeResolved {
                    challenger,
                    loser,
                    actual_count,
                    quantity,
                    face,
                    eliminated,
                    ..
                } => {
                    tracing::info!(
                        bot = self.name,
                        %challenger,
                        %loser,
                        actual_count,
                        quantity,
                        face,
                        eliminated,
                        "challenge resolved"
                    );
                    self.current_bid = None;
                    self.total_dice -= 1;
                }
                ServerEvent::YourTurn => {
                    let action = self.decide();
                    tracing::info!(bot = self.name, ?action, "acting");
                    if let Err(err) = service.perform(self.id, action).await {
                        tracing::error!(bot = self.name, %err, "action failed");
                        break;
                    }
                }
                ServerEvent::GameOver { winner, name } => {
                    if winner == self.id {
                        tracing::info!(bot = self.name, "I won!");
                    } else {
                        tracing::info!(bot = self.name, winner = %name, "game over");
                    }
                    break;
                }
                ServerEvent::ActionRejected { reason } => {
                    tracing::warn!(bot = self.name, %reason, "action rejected");
                }
                _ => {}
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let seed = std::env::args().nth(1).map(|s| s.parse()).transpose()?;

    let service = Arc::new(GameService::new());
    let room = service
        .create_room(RoomConfig {
            seed,
            ..RoomConfig::default()
        })
        .await;
    tracing::info!(%room, ?seed, "table opened");

    let mut tasks = Vec::new();
    let mut first = None;
    for name in BOTS {
        let (id, events) = service.join(room, name).await?;
        first.get_or_insert(id);
        let bot = Bot::new(id, name);
        tasks.push(tokio::spawn(bot.run(Arc::clone(&service), events)));
    }

    if let Some(starter) = first {
        service.perform(starter, ClientAction::StartGame).await?;
    }

    for task in tasks {
        task.await?;
    }

    service.destroy_room(room).await?;
    tracing::info!("table closed");
    Ok(())
}
