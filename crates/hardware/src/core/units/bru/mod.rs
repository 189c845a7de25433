//! Branch Resolution Unit (BRU).
//!
//! This module derives the condition flags written by `cmpr`/`cmpi` and evaluates
//! branch conditions against them. It performs the following:
//! 1. **Comparison:** Computes Sign, Zero, CarryBorrow, CarryBorrowUnsigned, Equal,
//!    Less and LessUnsigned from `a - b`.
//! 2. **Condition Evaluation:** Tests one flag or flag combination per branch mnemonic.

use crate::core::arch::StatusFlag;
use crate::core::arch::status::CONDITION_FLAGS_MASK;
use crate::isa::BranchCond;

/// Branch Resolution Unit.
#[derive(Debug)]
pub struct Bru;

const fn bit(flag: StatusFlag, on: bool) -> u64 {
    if on { flag.mask() } else { 0 }
}

const fn has(status: u64, flag: StatusFlag) -> bool {
    status & flag.mask() != 0
}

impl Bru {
    /// Computes the condition flags for comparing `a` with `b`.
    ///
    /// # Returns
    ///
    /// A status-register fragment holding only condition flags; merge it with
    /// [`Bru::merge_flags`].
    pub const fn compare(a: u64, b: u64) -> u64 {
        let (diff, overflow) = (a as i64).overflowing_sub(b as i64);
        bit(StatusFlag::Sign, diff < 0)
            | bit(StatusFlag::Zero, diff == 0)
            | bit(StatusFlag::CarryBorrow, overflow)
            | bit(StatusFlag::CarryBorrowUnsigned, a < b)
            | bit(StatusFlag::Equal, a == b)
            | bit(StatusFlag::Less, (a as i64) < (b as i64))
            | bit(StatusFlag::LessUnsigned, a < b)
    }

    /// Replaces the condition flags of `status` with `flags`, keeping Mode and
    /// Extension.
    pub const fn merge_flags(status: u64, flags: u64) -> u64 {
        (status & !CONDITION_FLAGS_MASK) | (flags & CONDITION_FLAGS_MASK)
    }

    /// Evaluates a branch condition against a status register value.
    pub const fn condition_met(cond: BranchCond, status: u64) -> bool {
        let eq = has(status, StatusFlag::Equal);
        let lt = has(status, StatusFlag::Less);
        let ltu = has(status, StatusFlag::LessUnsigned);
        match cond {
            BranchCond::Always => true,
            BranchCond::Equal => eq,
            BranchCond::Zero => has(status, StatusFlag::Zero),
            BranchCond::Less => lt,
            BranchCond::LessEqual => lt || eq,
            BranchCond::LessUnsigned => ltu,
            BranchCond::LessEqualUnsigned => ltu || eq,
            BranchCond::NotEqual => !eq,
            BranchCond::NotZero => !has(status, StatusFlag::Zero),
            BranchCond::GreaterEqual => !lt,
            BranchCond::Greater => !(lt || eq),
            BranchCond::GreaterEqualUnsigned => !ltu,
            BranchCond::GreaterUnsigned => !(ltu || eq),
        }
    }
}
