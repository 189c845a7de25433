//! Status Register Flags.
//!
//! Bit positions of the flags held in the status register. Comparisons write the
//! condition flags; the `Mode` flag selects physical (kernel) or translated (user)
//! addressing for every fetch and data access.

/// A flag bit in the status register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StatusFlag {
    /// Result of the last comparison was negative.
    Sign = 0,
    /// Result of the last comparison was zero.
    Zero = 1,
    /// Signed overflow (borrow) of the last comparison.
    CarryBorrow = 2,
    /// Unsigned borrow of the last comparison.
    CarryBorrowUnsigned = 3,
    /// Operands of the last comparison were equal.
    Equal = 4,
    /// First operand was less than the second (signed).
    Less = 5,
    /// First operand was less than the second (unsigned).
    LessUnsigned = 6,
    /// Addressing mode: 0 = kernel/physical, 1 = user/virtual.
    Mode = 7,
    /// Reserved extension bit.
    Extension = 31,
}

impl StatusFlag {
    /// Returns the single-bit mask of this flag.
    #[inline]
    pub const fn mask(self) -> u64 {
        1 << (self as u8)
    }
}

/// Mask of the seven condition flags written by comparisons.
pub const CONDITION_FLAGS_MASK: u64 = StatusFlag::Sign.mask()
    | StatusFlag::Zero.mask()
    | StatusFlag::CarryBorrow.mask()
    | StatusFlag::CarryBorrowUnsigned.mask()
    | StatusFlag::Equal.mask()
    | StatusFlag::Less.mask()
    | StatusFlag::LessUnsigned.mask();
