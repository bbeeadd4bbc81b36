use std::ops::{BitOr, BitOrAssign};

/// Bitmask of the movement keys currently held.
///
/// The bits are independent: an input collector sets a bit on key-down and
/// clears it on key-up, so `FORWARD` and `BACKWARD` can be asserted at the
/// same time (speed integration treats `FORWARD` as dominant).
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct DirectionMask(u8);

impl DirectionMask {
    pub const NONE: DirectionMask = DirectionMask(0);
    pub const FORWARD: DirectionMask = DirectionMask(1);
    pub const BACKWARD: DirectionMask = DirectionMask(2);
    pub const RIGHT: DirectionMask = DirectionMask(4);
    pub const LEFT: DirectionMask = DirectionMask(8);

    /// True if any bit of `other` is set in `self`.
    pub fn contains(self, other: DirectionMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Set the bits of `other` (key-down).
    pub fn set(&mut self, other: DirectionMask) {
        self.0 |= other.0;
    }

    /// Clear the bits of `other` (key-up).
    pub fn clear(&mut self, other: DirectionMask) {
        self.0 &= !other.0;
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn bits(self) -> u8 {
        self.0
    }
}

impl BitOr for DirectionMask {
    type Output = DirectionMask;

    fn bitor(self, rhs: DirectionMask) -> DirectionMask {
        DirectionMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for DirectionMask {
    fn bitor_assign(&mut self, rhs: DirectionMask) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::DirectionMask;

    #[test]
    fn set_and_clear_are_independent_per_bit() {
        let mut mask = DirectionMask::NONE;
        mask.set(DirectionMask::FORWARD);
        mask.set(DirectionMask::LEFT);
        assert!(mask.contains(DirectionMask::FORWARD));
        assert!(mask.contains(DirectionMask::LEFT));
        assert!(!mask.contains(DirectionMask::BACKWARD));

        mask.clear(DirectionMask::FORWARD);
        assert!(!mask.contains(DirectionMask::FORWARD));
        assert!(mask.contains(DirectionMask::LEFT));
    }

    #[test]
    fn forward_and_backward_can_be_held_together() {
        let mask = DirectionMask::FORWARD | DirectionMask::BACKWARD;
        assert!(mask.contains(DirectionMask::FORWARD));
        assert!(mask.contains(DirectionMask::BACKWARD));
        assert_eq!(mask.bits(), 3);
    }
}
