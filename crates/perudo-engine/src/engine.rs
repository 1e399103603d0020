//! The match state machine.

use std::collections::{HashMap, HashSet};

use perudo_protocol::PlayerId;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::{Bid, DicePool, EngineError, Face, Player};

/// A match needs at least two players: a lone player has nobody whose
/// bid they could challenge.
pub const MIN_PLAYERS: usize = 2;

/// Rosters beyond this size are truncated at construction.
pub const MAX_PLAYERS: usize = 10;

/// Dice dealt to each player at match start.
pub const STARTING_DICE: usize = 5;

/// A bid was accepted and the turn moved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidAccepted {
    /// The now-current bid.
    pub bid: Bid,
    /// Whose turn it is after the bid.
    pub next_player: PlayerId,
}

/// A challenge was resolved and all dice revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeOutcome {
    pub challenger: PlayerId,
    /// The bid that was challenged (names the bidder).
    pub bid: Bid,
    /// Who lost a die: the challenger if the bid held, else the bidder.
    pub loser: PlayerId,
    /// Dice across all pools showing the bid face or a wild 1.
    pub actual_count: u32,
    /// True if the loss emptied the loser's pool.
    pub eliminated: bool,
}

/// The rules engine for one match of Liar's Dice.
///
/// Owns the roster in turn order, the hidden dice pools, the outstanding
/// bid, and the match RNG. Mutated exclusively through [`submit_bid`],
/// [`challenge`] and [`start_new_round`]; callers must apply actions
/// sequentially (a room actor's command loop guarantees this in
/// production).
///
/// [`submit_bid`]: GameEngine::submit_bid
/// [`challenge`]: GameEngine::challenge
/// [`start_new_round`]: GameEngine::start_new_round
pub struct GameEngine {
    /// The fixed permutation of all starting players. Never re-shuffled,
    /// never shrinks: eliminated players stay in place and are skipped by
    /// the empty-pool test.
    turn_order: Vec<Player>,
    /// Index into `turn_order`.
    current: usize,
    pools: HashMap<PlayerId, DicePool>,
    current_bid: Option<Bid>,
    rng: ChaCha8Rng,
}

impl GameEngine {
    /// Creates a match from a finalized roster and an injected RNG.
    ///
    /// Shuffles the turn order uniformly, deals [`STARTING_DICE`] dice to
    /// every player, and leaves the first player in the shuffled order to
    /// open the bidding. Rosters larger than [`MAX_PLAYERS`] are
    /// truncated to the first ten joiners.
    ///
    /// # Errors
    /// [`EngineError::InvalidPlayerSet`] for fewer than two players or
    /// duplicate ids.
    pub fn new(players: Vec<Player>, mut rng: ChaCha8Rng) -> Result<Self, EngineError> {
        if players.len() < MIN_PLAYERS {
            return Err(EngineError::InvalidPlayerSet(format!(
                "need at least {MIN_PLAYERS} players, got {}",
                players.len()
            )));
        }
        let mut seen = HashSet::new();
        if players.iter().any(|p| !seen.insert(p.id)) {
            return Err(EngineError::InvalidPlayerSet(
                "duplicate player ids".into(),
            ));
        }

        let mut turn_order = players;
        turn_order.truncate(MAX_PLAYERS);
        turn_order.shuffle(&mut rng);

        let pools = turn_order
            .iter()
            .map(|p| (p.id, DicePool::roll(&mut rng, STARTING_DICE)))
            .collect();

        tracing::debug!(
            players = turn_order.len(),
            "match initialized, turn order shuffled"
        );

        Ok(Self {
            turn_order,
            current: 0,
            pools,
            current_bid: None,
            rng,
        })
    }

    /// Creates a match with a deterministic RNG. Same seed and roster
    /// order reproduce the same shuffle and every subsequent roll.
    pub fn with_seed(players: Vec<Player>, seed: u64) -> Result<Self, EngineError> {
        Self::new(players, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a match seeded from the operating system.
    pub fn from_entropy(players: Vec<Player>) -> Result<Self, EngineError> {
        Self::new(players, ChaCha8Rng::from_os_rng())
    }

    /// The roster in turn order, eliminated players included.
    pub fn players(&self) -> &[Player] {
        &self.turn_order
    }

    /// The player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.turn_order[self.current]
    }

    /// The outstanding bid, if any.
    pub fn current_bid(&self) -> Option<&Bid> {
        self.current_bid.as_ref()
    }

    /// One player's dice. Must only ever be shown to that player.
    pub fn dice_of(&self, player: PlayerId) -> Option<&[u8]> {
        self.pools.get(&player).map(DicePool::faces)
    }

    /// Total dice still in play across all pools.
    pub fn total_dice(&self) -> usize {
        self.pools.values().map(DicePool::len).sum()
    }

    /// Submits a bid for `player`.
    ///
    /// On success the bid becomes current and the turn advances to the
    /// next player holding dice. On any rejection the state is untouched
    /// and the turn stays where it was: the same player must re-bid or
    /// challenge.
    pub fn submit_bid(
        &mut self,
        player: PlayerId,
        quantity: u32,
        face: u8,
    ) -> Result<BidAccepted, EngineError> {
        if self.is_game_over() {
            return Err(EngineError::MatchOver);
        }
        if player != self.current_player().id {
            return Err(EngineError::NotYourTurn(player));
        }
        let face = Face::new(face)
            .filter(|_| quantity >= 1)
            .ok_or(EngineError::MalformedBid { quantity, face })?;

        if let Some(prev) = &self.current_bid {
            prev.allows_raise(quantity, face)
                .map_err(EngineError::IllegalBid)?;
        }

        let bid = Bid {
            bidder: player,
            quantity,
            face,
        };
        self.current_bid = Some(bid);
        self.advance_turn()?;

        tracing::debug!(%player, %bid, "bid accepted");
        Ok(BidAccepted {
            bid,
            next_player: self.current_player().id,
        })
    }

    /// Resolves a challenge against the current bid.
    ///
    /// Any roster member may challenge while a bid stands; the turn
    /// check applies to bids only. All dice are counted (ones wild, a 1
    /// under a face-1 bid counts once): if the count covers the bid the
    /// challenger loses one die, otherwise the bidder does. The bid is
    /// cleared and the turn parks on the loser, so the next round opens
    /// with the first eligible player after them.
    pub fn challenge(
        &mut self,
        challenger: PlayerId,
    ) -> Result<ChallengeOutcome, EngineError> {
        if self.is_game_over() {
            return Err(EngineError::MatchOver);
        }
        if !self.pools.contains_key(&challenger) {
            return Err(EngineError::UnknownPlayer(challenger));
        }
        let bid = self
            .current_bid
            .take()
            .ok_or(EngineError::NoBidToChallenge)?;

        let actual_count: u32 = self
            .pools
            .values()
            .map(|pool| pool.count_matching(bid.face))
            .sum();

        let loser = if actual_count >= bid.quantity {
            challenger
        } else {
            bid.bidder
        };

        let pool = self
            .pools
            .get_mut(&loser)
            .ok_or(EngineError::UnknownPlayer(loser))?;
        // An already-empty pool loses nothing; that elimination was
        // announced when it happened.
        let eliminated = pool.remove_one().is_some() && pool.is_empty();

        // Park the turn on the loser; start_new_round advances past them.
        self.current = self
            .turn_order
            .iter()
            .position(|p| p.id == loser)
            .ok_or(EngineError::UnknownPlayer(loser))?;

        tracing::debug!(
            %challenger, %bid, %loser, actual_count, eliminated,
            "challenge resolved"
        );
        Ok(ChallengeOutcome {
            challenger,
            bid,
            loser,
            actual_count,
            eliminated,
        })
    }

    /// Starts the next round after a challenge.
    ///
    /// Every surviving player's pool is re-rolled at its current
    /// (post-loss) size; sizes never change here, only faces. The turn
    /// then advances to the next eligible player after the loser.
    /// Returns the player who opens the new round.
    ///
    /// # Errors
    /// [`EngineError::MatchOver`] once a winner exists;
    /// [`EngineError::NoEligiblePlayer`] if no pool has dice (an
    /// invariant violation, not a normal outcome).
    pub fn start_new_round(&mut self) -> Result<&Player, EngineError> {
        if self.is_game_over() {
            return Err(EngineError::MatchOver);
        }
        for pool in self.pools.values_mut() {
            if !pool.is_empty() {
                pool.reroll(&mut self.rng);
            }
        }
        self.current_bid = None;
        self.advance_turn()?;

        tracing::debug!(opener = %self.current_player().id, "new round started");
        Ok(self.current_player())
    }

    /// True iff exactly one player still holds dice.
    pub fn is_game_over(&self) -> bool {
        self.survivors().count() == 1
    }

    /// The sole player with a non-empty pool, or `None` if the match is
    /// still running. Zero survivors also yields `None`: the engine
    /// never invents a winner.
    pub fn winner(&self) -> Option<&Player> {
        let mut survivors = self.survivors();
        let first = survivors.next()?;
        survivors.next().is_none().then_some(first)
    }

    fn survivors(&self) -> impl Iterator<Item = &Player> {
        self.turn_order
            .iter()
            .filter(|p| self.pools.get(&p.id).is_some_and(|pool| !pool.is_empty()))
    }

    /// Moves the turn to the next player holding dice, wrapping around
    /// and skipping empty pools. The loop terminates because at least
    /// one pool is non-empty; if none is, this fails instead of spinning.
    fn advance_turn(&mut self) -> Result<(), EngineError> {
        if self.pools.values().all(DicePool::is_empty) {
            return Err(EngineError::NoEligiblePlayer);
        }
        loop {
            self.current = (self.current + 1) % self.turn_order.len();
            let id = self.turn_order[self.current].id;
            if self.pools.get(&id).is_some_and(|pool| !pool.is_empty()) {
                return Ok(());
            }
        }
    }

    #[cfg(test)]
    fn set_dice(&mut self, player: PlayerId, faces: Vec<u8>) {
        self.pools
            .insert(player, DicePool::from_faces(faces));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: u64) -> PlayerId {
        PlayerId(id)
    }

    fn roster(n: u64) -> Vec<Player> {
        (1..=n)
            .map(|i| Player::new(pid(i), format!("player-{i}")))
            .collect()
    }

    fn engine(n: u64) -> GameEngine {
        GameEngine::with_seed(roster(n), 42).unwrap()
    }

    /// Puts `player` on turn without touching anything else.
    fn set_turn(engine: &mut GameEngine, player: PlayerId) {
        engine.current = engine
            .turn_order
            .iter()
            .position(|p| p.id == player)
            .unwrap();
    }

    // =====================================================================
    // Construction
    // =====================================================================

    #[test]
    fn test_new_rejects_single_player() {
        let result = GameEngine::with_seed(roster(1), 42);
        assert!(matches!(result, Err(EngineError::InvalidPlayerSet(_))));
    }

    #[test]
    fn test_new_rejects_empty_roster() {
        let result = GameEngine::with_seed(vec![], 42);
        assert!(matches!(result, Err(EngineError::InvalidPlayerSet(_))));
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let players = vec![
            Player::new(pid(1), "a"),
            Player::new(pid(1), "b"),
            Player::new(pid(2), "c"),
        ];
        let result = GameEngine::with_seed(players, 42);
        assert!(matches!(result, Err(EngineError::InvalidPlayerSet(_))));
    }

    #[test]
    fn test_new_truncates_to_ten_players() {
        let engine = GameEngine::with_seed(roster(12), 42).unwrap();
        assert_eq!(engine.players().len(), 10);
        assert_eq!(engine.total_dice(), 10 * STARTING_DICE);
    }

    #[test]
    fn test_new_deals_five_valid_dice_to_each_player() {
        let engine = engine(4);
        for player in engine.players() {
            let dice = engine.dice_of(player.id).unwrap();
            assert_eq!(dice.len(), STARTING_DICE);
            assert!(dice.iter().all(|&d| (1..=6).contains(&d)));
        }
        assert!(engine.current_bid().is_none());
    }

    #[test]
    fn test_turn_order_is_a_permutation_of_the_roster() {
        let engine = engine(5);
        let mut ids: Vec<u64> = engine.players().iter().map(|p| p.id.0).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_same_seed_reproduces_the_match() {
        let a = engine(4);
        let b = engine(4);
        let order_a: Vec<PlayerId> = a.players().iter().map(|p| p.id).collect();
        let order_b: Vec<PlayerId> = b.players().iter().map(|p| p.id).collect();
        assert_eq!(order_a, order_b);
        for player in a.players() {
            assert_eq!(a.dice_of(player.id), b.dice_of(player.id));
        }
    }

    // =====================================================================
    // Bidding
    // =====================================================================

    #[test]
    fn test_first_bid_is_accepted_and_advances_turn() {
        let mut engine = engine(3);
        let opener = engine.current_player().id;

        let accepted = engine.submit_bid(opener, 2, 5).unwrap();

        assert_eq!(accepted.bid.bidder, opener);
        assert_eq!(accepted.bid.quantity, 2);
        assert_ne!(accepted.next_player, opener);
        assert_eq!(engine.current_player().id, accepted.next_player);
        assert_eq!(engine.current_bid(), Some(&accepted.bid));
    }

    #[test]
    fn test_bid_out_of_turn_is_rejected() {
        let mut engine = engine(3);
        let not_current = engine
            .players()
            .iter()
            .find(|p| p.id != engine.current_player().id)
            .unwrap()
            .id;

        let result = engine.submit_bid(not_current, 2, 5);

        assert_eq!(result, Err(EngineError::NotYourTurn(not_current)));
        assert!(engine.current_bid().is_none());
    }

    #[test]
    fn test_malformed_bids_are_rejected() {
        let mut engine = engine(3);
        let opener = engine.current_player().id;

        for (quantity, face) in [(2, 0), (2, 7), (0, 4)] {
            let result = engine.submit_bid(opener, quantity, face);
            assert!(
                matches!(result, Err(EngineError::MalformedBid { .. })),
                "expected MalformedBid for {quantity} x {face}"
            );
        }
        // The opener keeps the turn after every rejection.
        assert_eq!(engine.current_player().id, opener);
    }

    #[test]
    fn test_illegal_raise_leaves_state_unchanged() {
        let mut engine = engine(3);
        let opener = engine.current_player().id;
        let accepted = engine.submit_bid(opener, 3, 4).unwrap();
        let second = accepted.next_player;

        // Equal bid: violates the same-kind ladder.
        let result = engine.submit_bid(second, 3, 4);

        assert!(matches!(result, Err(EngineError::IllegalBid(_))));
        assert_eq!(engine.current_bid(), Some(&accepted.bid));
        assert_eq!(engine.current_player().id, second);
    }

    #[test]
    fn test_raise_check_survives_a_quantity_ceiling_bid() {
        // A first bid has no upper bound on quantity, so the wild-exit
        // check must cope with u32::MAX without overflowing. The raise
        // is rejected, the engine keeps running.
        let mut engine = engine(3);
        let opener = engine.current_player().id;
        let second = engine.submit_bid(opener, u32::MAX, 1).unwrap().next_player;

        let result = engine.submit_bid(second, 3, 2);

        assert!(matches!(result, Err(EngineError::IllegalBid(_))));
        assert_eq!(engine.current_player().id, second);
    }

    #[test]
    fn test_wild_switch_example_from_five_fives() {
        // (5,5) -> (1,1) needs quantity >= floor(5/2) = 2, so it is
        // rejected; (2,1) is the minimal legal wild switch.
        let mut engine = engine(3);
        let opener = engine.current_player().id;
        let second = engine.submit_bid(opener, 5, 5).unwrap().next_player;

        let rejected = engine.submit_bid(second, 1, 1);
        assert!(matches!(rejected, Err(EngineError::IllegalBid(_))));

        engine.submit_bid(second, 2, 1).unwrap();
    }

    #[test]
    fn test_accepted_bids_strictly_increase() {
        // Every consecutive pair of accepted bids must satisfy the raise
        // predicate; replaying each accepted bid against its predecessor
        // re-checks the legality the engine enforced.
        let mut engine = engine(3);
        let mut bids = Vec::new();
        let mut player = engine.current_player().id;

        for (quantity, face) in [(2, 3), (2, 5), (3, 2), (1, 1), (4, 6), (5, 6)] {
            let accepted = engine.submit_bid(player, quantity, face).unwrap();
            bids.push(accepted.bid);
            player = accepted.next_player;
        }
        for pair in bids.windows(2) {
            assert!(
                pair[0].allows_raise(pair[1].quantity, pair[1].face).is_ok(),
                "{} then {} violates the raise rules",
                pair[0],
                pair[1]
            );
        }
    }

    // =====================================================================
    // Challenges
    // =====================================================================

    #[test]
    fn test_challenge_without_bid_is_rejected() {
        let mut engine = engine(3);
        let challenger = engine.players()[1].id;
        assert_eq!(
            engine.challenge(challenger),
            Err(EngineError::NoBidToChallenge)
        );
    }

    #[test]
    fn test_challenge_from_stranger_is_rejected() {
        let mut engine = engine(3);
        let opener = engine.current_player().id;
        engine.submit_bid(opener, 2, 4).unwrap();

        assert_eq!(
            engine.challenge(pid(99)),
            Err(EngineError::UnknownPlayer(pid(99)))
        );
        assert!(engine.current_bid().is_some());
    }

    #[test]
    fn test_false_bid_costs_the_bidder_a_die() {
        // Five players, bid 3 x 4, but only two dice show 4-or-1 across
        // all hands: the bid was a lie, the bidder pays.
        let mut engine = engine(5);
        let ids: Vec<PlayerId> = engine.players().iter().map(|p| p.id).collect();
        engine.set_dice(ids[0], vec![4, 2, 2, 3, 5]);
        engine.set_dice(ids[1], vec![1, 6, 6, 5, 3]);
        engine.set_dice(ids[2], vec![2, 2, 3, 3, 5]);
        engine.set_dice(ids[3], vec![6, 6, 5, 5, 2]);
        engine.set_dice(ids[4], vec![3, 2, 6, 5, 2]);

        let bidder = engine.current_player().id;
        let next = engine.submit_bid(bidder, 3, 4).unwrap().next_player;
        let outcome = engine.challenge(next).unwrap();

        assert_eq!(outcome.actual_count, 2);
        assert_eq!(outcome.loser, bidder);
        assert!(!outcome.eliminated);
        assert_eq!(engine.dice_of(bidder).unwrap().len(), 4);
        assert!(engine.current_bid().is_none());
    }

    #[test]
    fn test_truthful_bid_costs_the_challenger_a_die() {
        let mut engine = engine(3);
        let ids: Vec<PlayerId> = engine.players().iter().map(|p| p.id).collect();
        engine.set_dice(ids[0], vec![4, 4, 1, 2, 3]);
        engine.set_dice(ids[1], vec![6, 6, 5, 5, 3]);
        engine.set_dice(ids[2], vec![2, 2, 3, 5, 6]);

        let bidder = engine.current_player().id;
        let challenger = engine.submit_bid(bidder, 3, 4).unwrap().next_player;
        let outcome = engine.challenge(challenger).unwrap();

        // Two 4s plus one wild 1 cover the bid of three.
        assert_eq!(outcome.actual_count, 3);
        assert_eq!(outcome.loser, challenger);
        assert_eq!(engine.dice_of(challenger).unwrap().len(), 4);
        assert_eq!(engine.dice_of(bidder).unwrap().len(), 5);
    }

    #[test]
    fn test_face_one_bid_counts_each_wild_once() {
        let mut engine = engine(2);
        let ids: Vec<PlayerId> = engine.players().iter().map(|p| p.id).collect();
        engine.set_dice(ids[0], vec![1, 1, 3, 4, 5]);
        engine.set_dice(ids[1], vec![1, 2, 2, 6, 6]);

        let bidder = engine.current_player().id;
        let challenger = engine.submit_bid(bidder, 3, 1).unwrap().next_player;
        let outcome = engine.challenge(challenger).unwrap();

        // Three ones total; double-counting would have found six.
        assert_eq!(outcome.actual_count, 3);
        assert_eq!(outcome.loser, challenger);
    }

    #[test]
    fn test_challenge_removes_exactly_one_die_overall() {
        let mut engine = engine(4);
        let before: Vec<usize> = engine
            .players()
            .iter()
            .map(|p| engine.dice_of(p.id).unwrap().len())
            .collect();

        let bidder = engine.current_player().id;
        let challenger = engine.submit_bid(bidder, 2, 4).unwrap().next_player;
        let outcome = engine.challenge(challenger).unwrap();

        let after: Vec<usize> = engine
            .players()
            .iter()
            .map(|p| engine.dice_of(p.id).unwrap().len())
            .collect();
        let shrunk: Vec<usize> = (0..before.len())
            .filter(|&i| after[i] != before[i])
            .collect();
        assert_eq!(shrunk.len(), 1, "exactly one pool shrinks");
        assert_eq!(before[shrunk[0]] - after[shrunk[0]], 1);
        assert_eq!(engine.players()[shrunk[0]].id, outcome.loser);
    }

    // =====================================================================
    // Rounds, elimination, game over
    // =====================================================================

    #[test]
    fn test_new_round_preserves_post_loss_pool_sizes() {
        let mut engine = engine(3);
        let bidder = engine.current_player().id;
        let challenger = engine.submit_bid(bidder, 2, 4).unwrap().next_player;
        let outcome = engine.challenge(challenger).unwrap();

        let sizes_before: Vec<usize> = engine
            .players()
            .iter()
            .map(|p| engine.dice_of(p.id).unwrap().len())
            .collect();

        engine.start_new_round().unwrap();

        let sizes_after: Vec<usize> = engine
            .players()
            .iter()
            .map(|p| engine.dice_of(p.id).unwrap().len())
            .collect();
        assert_eq!(sizes_before, sizes_after);
        assert!(engine.current_bid().is_none());
        // The loser kept their dice, so 14 remain in play.
        assert_eq!(engine.total_dice(), 14);
        assert_ne!(engine.current_player().id, outcome.loser);
    }

    #[test]
    fn test_new_round_opens_after_the_loser() {
        let mut engine = engine(4);
        let bidder = engine.current_player().id;
        let challenger = engine.submit_bid(bidder, 2, 4).unwrap().next_player;
        let outcome = engine.challenge(challenger).unwrap();

        let opener = engine.start_new_round().unwrap().id;

        // The opener is the first player with dice after the loser in
        // turn order.
        let loser_pos = engine
            .players()
            .iter()
            .position(|p| p.id == outcome.loser)
            .unwrap();
        let expected = engine.players()[(loser_pos + 1) % 4].id;
        assert_eq!(opener, expected);
    }

    #[test]
    fn test_advance_turn_skips_eliminated_players() {
        // P1 has no dice, P2 has three, P3 has two; advancing from P1
        // lands on P2, never re-selecting P1.
        let mut engine = engine(3);
        let ids: Vec<PlayerId> = engine.players().iter().map(|p| p.id).collect();
        engine.set_dice(ids[0], vec![]);
        engine.set_dice(ids[1], vec![2, 3, 4]);
        engine.set_dice(ids[2], vec![5, 6]);
        set_turn(&mut engine, ids[0]);

        engine.advance_turn().unwrap();
        assert_eq!(engine.current_player().id, ids[1]);

        // Wrapping all the way around also skips P1.
        engine.advance_turn().unwrap();
        assert_eq!(engine.current_player().id, ids[2]);
        engine.advance_turn().unwrap();
        assert_eq!(engine.current_player().id, ids[1]);
    }

    #[test]
    fn test_eliminated_player_stays_in_turn_order() {
        let mut engine = engine(3);
        let ids: Vec<PlayerId> = engine.players().iter().map(|p| p.id).collect();
        engine.set_dice(ids[1], vec![6]);
        // A hopeless bid from P2, challenged truthfully by P3.
        set_turn(&mut engine, ids[1]);
        engine.submit_bid(ids[1], 11, 6).unwrap();
        let outcome = engine.challenge(ids[2]).unwrap();

        assert_eq!(outcome.loser, ids[1]);
        assert!(outcome.eliminated);
        assert_eq!(engine.players().len(), 3, "roster never shrinks");
        assert_eq!(engine.dice_of(ids[1]), Some(&[][..]));
    }

    #[test]
    fn test_losing_challenge_with_empty_pool_is_not_a_new_elimination() {
        // An eliminated player may still challenge. Losing costs them
        // nothing (no dice to take) and must not re-report elimination.
        let mut engine = engine(3);
        let ids: Vec<PlayerId> = engine.players().iter().map(|p| p.id).collect();
        engine.set_dice(ids[0], vec![]);
        engine.set_dice(ids[1], vec![4, 4, 1]);
        engine.set_dice(ids[2], vec![2, 3]);
        set_turn(&mut engine, ids[1]);
        engine.submit_bid(ids[1], 2, 4).unwrap();

        let outcome = engine.challenge(ids[0]).unwrap();

        // Two 4s and a wild cover the bid, so the challenger loses.
        assert_eq!(outcome.loser, ids[0]);
        assert!(!outcome.eliminated);
        assert_eq!(engine.dice_of(ids[0]), Some(&[][..]));
    }

    #[test]
    fn test_game_over_when_one_player_holds_dice() {
        let mut engine = engine(3);
        let ids: Vec<PlayerId> = engine.players().iter().map(|p| p.id).collect();
        engine.set_dice(ids[0], vec![]);
        engine.set_dice(ids[1], vec![4]);
        engine.set_dice(ids[2], vec![]);

        assert!(engine.is_game_over());
        assert_eq!(engine.winner().map(|p| p.id), Some(ids[1]));
    }

    #[test]
    fn test_no_winner_without_a_sole_survivor() {
        let mut engine = engine(2);
        let ids: Vec<PlayerId> = engine.players().iter().map(|p| p.id).collect();
        assert!(!engine.is_game_over());
        assert!(engine.winner().is_none());

        // Zero survivors: no winner is invented, and advancing fails
        // loudly instead of spinning.
        engine.set_dice(ids[0], vec![]);
        engine.set_dice(ids[1], vec![]);
        assert!(!engine.is_game_over());
        assert!(engine.winner().is_none());
        assert_eq!(
            engine.start_new_round(),
            Err(EngineError::NoEligiblePlayer)
        );
    }

    #[test]
    fn test_finished_match_rejects_further_actions() {
        let mut engine = engine(2);
        let ids: Vec<PlayerId> = engine.players().iter().map(|p| p.id).collect();
        engine.set_dice(ids[0], vec![]);
        engine.set_dice(ids[1], vec![4]);

        assert_eq!(engine.submit_bid(ids[1], 1, 4), Err(EngineError::MatchOver));
        assert_eq!(engine.challenge(ids[1]), Err(EngineError::MatchOver));
        assert_eq!(engine.start_new_round(), Err(EngineError::MatchOver));
    }

    #[test]
    fn test_full_match_runs_to_a_winner() {
        // Play seeded matches to completion with a trivial policy:
        // always bid one more of face 2, challenge once the quantity
        // outruns the table. Exercises every transition end to end.
        for seed in 0..5 {
            let mut engine = GameEngine::with_seed(roster(4), seed).unwrap();
            let mut rounds = 0;
            while !engine.is_game_over() {
                let player = engine.current_player().id;
                let raise_to = engine.current_bid().map_or(1, |b| b.quantity + 1);
                if raise_to as usize > engine.total_dice() {
                    engine.challenge(player).unwrap();
                    if engine.is_game_over() {
                        break;
                    }
                    engine.start_new_round().unwrap();
                    rounds += 1;
                    assert!(rounds < 200, "match failed to converge");
                } else {
                    engine.submit_bid(player, raise_to, 2).unwrap();
                }
            }
            assert!(engine.winner().is_some(), "seed {seed} ended without winner");
        }
    }
}
