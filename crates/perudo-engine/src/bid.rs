//! Bids and the raise rules between them.

use std::fmt;

use perudo_protocol::PlayerId;

use crate::Face;

/// The outstanding claim: "at least `quantity` dice across all players
/// show `face` or show 1".
///
/// At most one bid is current per round. An accepted bid replaces the
/// previous one outright; bids are never amended in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bid {
    pub bidder: PlayerId,
    pub quantity: u32,
    pub face: Face,
}

impl Bid {
    /// Checks whether `(quantity, face)` is a legal raise over `self`.
    ///
    /// Three cases, depending on which side of the wild face the bids
    /// fall on:
    ///
    /// - switching **to** ones from a non-wild face: ones are twice as
    ///   likely to help the claim, so the required count halves (rounded
    ///   down): `quantity >= self.quantity / 2`;
    /// - switching **away** from ones: the reverse, the count must more
    ///   than double: `quantity >= self.quantity * 2 + 1`;
    /// - same kind (both wild or both non-wild): the classic ladder,
    ///   a higher quantity, or the same quantity on a higher face.
    ///
    /// On rejection the returned [`RaiseRule`] names the rule that was
    /// violated, so the bidder learns what a legal raise would have been.
    pub fn allows_raise(&self, quantity: u32, face: Face) -> Result<(), RaiseRule> {
        if face.is_wild() && !self.face.is_wild() {
            let min_quantity = self.quantity / 2;
            if quantity >= min_quantity {
                Ok(())
            } else {
                Err(RaiseRule::WildSwitch { min_quantity })
            }
        } else if self.face.is_wild() && !face.is_wild() {
            // Saturate: a standing bid near the quantity ceiling must not
            // wrap the doubled minimum.
            let min_quantity = self.quantity.saturating_mul(2).saturating_add(1);
            if quantity >= min_quantity {
                Ok(())
            } else {
                Err(RaiseRule::WildExit { min_quantity })
            }
        } else if quantity > self.quantity
            || (quantity == self.quantity && face > self.face)
        {
            Ok(())
        } else {
            Err(RaiseRule::SameKind {
                quantity: self.quantity,
                face: self.face,
            })
        }
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.quantity, self.face)
    }
}

/// The raise rule a rejected bid violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaiseRule {
    /// Switching to wild ones requires at least half the previous
    /// quantity, rounded down.
    WildSwitch { min_quantity: u32 },

    /// Switching away from wild ones requires more than double the
    /// previous quantity.
    WildExit { min_quantity: u32 },

    /// Same-kind raises must increase the quantity, or keep it and
    /// increase the face. Carries the bid to beat.
    SameKind { quantity: u32, face: Face },
}

impl fmt::Display for RaiseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WildSwitch { min_quantity } => write!(
                f,
                "switching to ones requires a quantity of at least {min_quantity}"
            ),
            Self::WildExit { min_quantity } => write!(
                f,
                "switching away from ones requires a quantity of at least {min_quantity}"
            ),
            Self::SameKind { quantity, face } => write!(
                f,
                "bid must exceed {quantity} x {face}: raise the quantity, or keep it and raise the face"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bid(quantity: u32, face: u8) -> Bid {
        Bid {
            bidder: PlayerId(1),
            quantity,
            face: Face::new(face).unwrap(),
        }
    }

    fn raise(prev: Bid, quantity: u32, face: u8) -> Result<(), RaiseRule> {
        prev.allows_raise(quantity, Face::new(face).unwrap())
    }

    #[test]
    fn test_same_face_higher_quantity_is_legal() {
        assert!(raise(bid(2, 4), 3, 4).is_ok());
    }

    #[test]
    fn test_same_quantity_higher_face_is_legal() {
        assert!(raise(bid(2, 4), 2, 5).is_ok());
    }

    #[test]
    fn test_same_quantity_lower_face_is_illegal() {
        assert!(matches!(
            raise(bid(2, 4), 2, 3),
            Err(RaiseRule::SameKind { quantity: 2, .. })
        ));
    }

    #[test]
    fn test_identical_bid_is_illegal() {
        assert!(raise(bid(3, 5), 3, 5).is_err());
    }

    #[test]
    fn test_lower_quantity_higher_face_is_illegal() {
        assert!(raise(bid(3, 2), 2, 6).is_err());
    }

    #[test]
    fn test_wild_switch_requires_half_rounded_down() {
        // floor(5 / 2) = 2
        assert!(raise(bid(5, 5), 2, 1).is_ok());
        assert!(matches!(
            raise(bid(5, 5), 1, 1),
            Err(RaiseRule::WildSwitch { min_quantity: 2 })
        ));
    }

    #[test]
    fn test_wild_switch_from_two_allows_one() {
        // floor(2 / 2) = 1, so (2,5) -> (1,1) is legal.
        assert!(raise(bid(2, 5), 1, 1).is_ok());
    }

    #[test]
    fn test_wild_exit_requires_double_plus_one() {
        assert!(raise(bid(2, 1), 5, 3).is_ok());
        assert!(matches!(
            raise(bid(2, 1), 4, 3),
            Err(RaiseRule::WildExit { min_quantity: 5 })
        ));
    }

    #[test]
    fn test_wild_exit_from_huge_bid_saturates() {
        // Doubling a quantity near u32::MAX must clamp, not wrap: the
        // raise is rejected with the saturated minimum.
        assert!(matches!(
            raise(bid(u32::MAX, 1), 3, 2),
            Err(RaiseRule::WildExit {
                min_quantity: u32::MAX
            })
        ));
    }

    #[test]
    fn test_wild_to_wild_is_same_kind() {
        // Both bids on ones: the halving rule does not apply, the
        // quantity must actually go up.
        assert!(raise(bid(2, 1), 3, 1).is_ok());
        assert!(matches!(
            raise(bid(2, 1), 2, 1),
            Err(RaiseRule::SameKind { .. })
        ));
        assert!(raise(bid(2, 1), 1, 1).is_err());
    }
}
