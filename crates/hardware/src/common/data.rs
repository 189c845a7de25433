//! Memory Access Permissions.
//!
//! This module defines the permission set checked by the page-table walker. It is used for:
//! 1. **Permission Validation:** Checking Read/Write/Execute bits of page-directory entries.
//! 2. **Access Classification:** Each virtual access names the single permission it needs.

use std::ops::{BitOr, BitOrAssign};

/// Set of memory permissions required by (or granted to) an access.
///
/// Bit values: read = 1, write = 2, execute = 4.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Permissions(u8);

impl Permissions {
    /// No permission required; translation only checks validity.
    pub const NONE: Self = Self(0);
    /// Data read permission.
    pub const READ: Self = Self(0b001);
    /// Data write permission.
    pub const WRITE: Self = Self(0b010);
    /// Instruction fetch permission.
    pub const EXECUTE: Self = Self(0b100);

    /// Returns the raw permission bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Builds a permission set from raw bits, ignoring unknown bits.
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & 0b111)
    }

    /// Returns true if every permission in `other` is also in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if no permission bit is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Permissions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Permissions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::fmt::Display for Permissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flag = |p: Self, c: char| if self.contains(p) { c } else { '-' };
        write!(
            f,
            "{}{}{}",
            flag(Self::READ, 'r'),
            flag(Self::WRITE, 'w'),
            flag(Self::EXECUTE, 'x')
        )
    }
}
