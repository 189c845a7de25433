//! Physical and Virtual Address types.
//!
//! This module defines strong types for physical and virtual addresses to prevent
//! accidental mixing of address spaces. It provides the following:
//! 1. **Type Safety:** Distinguishes between virtual and physical address spaces at compile time.
//! 2. **Index Extraction:** Splits a virtual address into its five page-table indices and page offset.
//! 3. **MMU Integration:** Acts as the primary interface for memory translation operations.

use super::constants::{PAGE_OFFSET_MASK, PAGE_TABLE_LEVELS};

/// Bit position and width of each page-table index, most-significant level first.
///
/// | level | bits  | width |
/// |-------|-------|-------|
/// | 1     | 58–63 | 6     |
/// | 2     | 47–57 | 11    |
/// | 3     | 36–46 | 11    |
/// | 4     | 25–35 | 11    |
/// | 5     | 14–24 | 11    |
pub const LEVEL_INDEX_FIELDS: [(u32, u32); PAGE_TABLE_LEVELS] =
    [(58, 6), (47, 11), (36, 11), (25, 11), (14, 11)];

/// A virtual address in the emulated address space.
///
/// Virtual addresses are used by user-mode code and must be translated to physical
/// addresses through the Memory Management Unit (MMU) before accessing memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtAddr(pub u64);

/// A physical address in the emulated address space.
///
/// Physical addresses are byte offsets into the MMU's physical buffer. Kernel-mode
/// code uses them directly; user-mode addresses become physical after translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u64);

impl VirtAddr {
    /// Creates a new virtual address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }

    /// Extracts the page-table index for a translation level.
    ///
    /// # Arguments
    ///
    /// * `level` - Zero-based level, where 0 is the top-level (level 1) table.
    ///
    /// # Returns
    ///
    /// The index into that level's table; 0 for levels past the last one.
    #[inline]
    pub fn level_index(&self, level: usize) -> u64 {
        LEVEL_INDEX_FIELDS
            .get(level)
            .map_or(0, |&(shift, width)| (self.0 >> shift) & ((1u64 << width) - 1))
    }

    /// Extracts the page offset (low 14 bits) from the virtual address.
    #[inline]
    pub const fn page_offset(&self) -> u64 {
        self.0 & PAGE_OFFSET_MASK
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v:{:#x}", self.0)
    }
}

impl std::fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p:{:#x}", self.0)
    }
}
