//! Die faces and per-player dice pools.

use std::fmt;

use rand::Rng;

/// A validated die face, 1 through 6.
///
/// A face of 1 is wild: it counts toward every face value when dice are
/// revealed. Constructing a `Face` is the only place face values are
/// range-checked; everything downstream can rely on `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Face(u8);

impl Face {
    /// The wild face.
    pub const WILD: Face = Face(1);

    /// Validates a raw value. Returns `None` outside `1..=6`.
    pub fn new(value: u8) -> Option<Face> {
        (1..=6).contains(&value).then_some(Face(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_wild(self) -> bool {
        self == Face::WILD
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One player's dice for the current round.
///
/// The pool only ever shrinks between round resets: dice are removed one
/// at a time when the owner loses a challenge, and a round reset re-rolls
/// the pool at its current size, never growing it. An empty pool marks
/// the owner eliminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DicePool {
    dice: Vec<u8>,
}

impl DicePool {
    /// Rolls a fresh pool of `count` dice, uniform independent draws.
    pub fn roll(rng: &mut impl Rng, count: usize) -> Self {
        let dice = (0..count).map(|_| rng.random_range(1..=6)).collect();
        Self { dice }
    }

    /// Re-rolls every die in place. The pool size is preserved; only the
    /// face values change.
    pub fn reroll(&mut self, rng: &mut impl Rng) {
        for die in &mut self.dice {
            *die = rng.random_range(1..=6);
        }
    }

    /// Removes exactly one die (from the end; dice are interchangeable).
    /// Returns the removed face, or `None` if the pool was already empty.
    pub fn remove_one(&mut self) -> Option<u8> {
        self.dice.pop()
    }

    /// The dice faces, visible only to the pool's owner.
    pub fn faces(&self) -> &[u8] {
        &self.dice
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Counts dice matching `face`, with ones wild.
    ///
    /// A die counts if it shows `face` or shows 1. When `face` is itself
    /// 1 a die showing 1 satisfies both conditions but still contributes
    /// exactly one to the count.
    pub fn count_matching(&self, face: Face) -> u32 {
        self.dice
            .iter()
            .filter(|&&die| die == face.value() || die == 1)
            .count() as u32
    }

    #[cfg(test)]
    pub(crate) fn from_faces(dice: Vec<u8>) -> Self {
        Self { dice }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_face_new_accepts_one_through_six() {
        for v in 1..=6 {
            assert_eq!(Face::new(v).map(Face::value), Some(v));
        }
        assert!(Face::new(0).is_none());
        assert!(Face::new(7).is_none());
    }

    #[test]
    fn test_face_wild_is_one() {
        assert!(Face::WILD.is_wild());
        assert!(!Face::new(2).unwrap().is_wild());
    }

    #[test]
    fn test_roll_produces_valid_faces() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let pool = DicePool::roll(&mut rng, 100);
        assert_eq!(pool.len(), 100);
        assert!(pool.faces().iter().all(|&d| (1..=6).contains(&d)));
    }

    #[test]
    fn test_reroll_preserves_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut pool = DicePool::roll(&mut rng, 5);
        pool.remove_one();
        pool.reroll(&mut rng);
        assert_eq!(pool.len(), 4);
        assert!(pool.faces().iter().all(|&d| (1..=6).contains(&d)));
    }

    #[test]
    fn test_remove_one_shrinks_by_exactly_one() {
        let mut pool = DicePool::from_faces(vec![3, 5, 2]);
        assert_eq!(pool.remove_one(), Some(2));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_remove_one_on_empty_pool_returns_none() {
        let mut pool = DicePool::from_faces(vec![]);
        assert_eq!(pool.remove_one(), None);
    }

    #[test]
    fn test_count_matching_ones_are_wild() {
        let pool = DicePool::from_faces(vec![4, 1, 4, 2, 1]);
        assert_eq!(pool.count_matching(Face::new(4).unwrap()), 4);
        assert_eq!(pool.count_matching(Face::new(2).unwrap()), 3);
        assert_eq!(pool.count_matching(Face::new(6).unwrap()), 2);
    }

    #[test]
    fn test_count_matching_face_one_counts_wilds_once() {
        // A die showing 1 matches both "shows the bid face" and "is wild"
        // when the bid face is 1. It must count once, not twice.
        let pool = DicePool::from_faces(vec![1, 1, 3]);
        assert_eq!(pool.count_matching(Face::WILD), 2);
    }
}
