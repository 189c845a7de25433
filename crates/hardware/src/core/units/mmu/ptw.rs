//! Page Table Walker.
//!
//! Translates a virtual address by walking the five-level page-directory tree rooted
//! at the MMU's page-table base. Each level is checked as follows:
//! 1. **Fetch:** Read the 64-bit entry at `base + index * 8` from physical memory.
//! 2. **Validity:** An invalid entry fails with the level's "unmapped" error.
//! 3. **Override:** The first entry with the override bit becomes the authoritative
//!    permission source for the rest of the walk.
//! 4. **Permissions:** Required permissions are checked against the authoritative
//!    entry if there is one, otherwise against the current entry.
//!
//! After level 5 the frame base of the last entry plus the 14-bit page offset is the
//! physical address.

use crate::common::constants::{PAGE_TABLE_LEVELS, PDE_NEXT_MASK, PDE_SIZE};
use crate::common::{MemoryError, Permissions, PhysAddr, VirtAddr};
use crate::core::units::mmu::Mmu;

/// Entry valid bit (bit 0).
const PDE_VALID_BIT: u64 = 1;

/// Permission override bit (bit 1).
const PDE_OVERRIDE_BIT: u64 = 1 << 1;

/// Shift of the read/write/execute bits (bits 2–4).
const PDE_PERMISSION_SHIFT: u64 = 2;

/// Mask of the read/write/execute bits once shifted down.
const PDE_PERMISSION_MASK: u64 = 0b111;

/// A strongly-typed wrapper around a raw 64-bit page-directory entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageDirectoryEntry(pub u64);

impl PageDirectoryEntry {
    /// Builds an entry from its parts.
    ///
    /// # Arguments
    ///
    /// * `next` - Next-level table base or frame base; low 14 bits are discarded.
    /// * `permissions` - Permission bits carried by the entry.
    /// * `override_bit` - Whether the entry is authoritative for deeper levels.
    pub const fn new(next: u64, permissions: Permissions, override_bit: bool) -> Self {
        let mut raw = (next & PDE_NEXT_MASK)
            | PDE_VALID_BIT
            | ((permissions.bits() as u64) << PDE_PERMISSION_SHIFT);
        if override_bit {
            raw |= PDE_OVERRIDE_BIT;
        }
        Self(raw)
    }

    /// Returns the raw 64-bit value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns true if the valid bit is set.
    pub const fn is_valid(self) -> bool {
        self.0 & PDE_VALID_BIT != 0
    }

    /// Returns true if the override bit is set.
    pub const fn is_override(self) -> bool {
        self.0 & PDE_OVERRIDE_BIT != 0
    }

    /// Returns the permissions granted by this entry.
    pub const fn permissions(self) -> Permissions {
        Permissions::from_bits_truncate(
            ((self.0 >> PDE_PERMISSION_SHIFT) & PDE_PERMISSION_MASK) as u8,
        )
    }

    /// Returns the next-level table base, or the frame base at level 5.
    pub const fn next(self) -> u64 {
        self.0 & PDE_NEXT_MASK
    }
}

/// Walks the page tables for `vaddr`.
///
/// # Arguments
///
/// * `mmu` - The MMU whose physical memory and page-table base are used.
/// * `vaddr` - The virtual address to translate.
/// * `required` - Permissions the access needs.
///
/// # Returns
///
/// The translated physical address, or the first error encountered. Errors reading an
/// entry from physical memory are propagated unchanged.
pub fn walk(mmu: &Mmu, vaddr: VirtAddr, required: Permissions) -> Result<PhysAddr, MemoryError> {
    let mut base = mmu.page_table_base();
    let mut authoritative: Option<PageDirectoryEntry> = None;

    for level in 0..PAGE_TABLE_LEVELS {
        let entry_addr = base.wrapping_add(vaddr.level_index(level) * PDE_SIZE);
        let pde = PageDirectoryEntry(mmu.read_physical::<u64>(PhysAddr::new(entry_addr))?);

        if !pde.is_valid() {
            tracing::trace!(%vaddr, level = level + 1, "unmapped page-directory entry");
            return Err(MemoryError::unmapped(level));
        }
        if authoritative.is_none() && pde.is_override() {
            authoritative = Some(pde);
        }
        let granted = authoritative.unwrap_or(pde).permissions();
        if !granted.contains(required) {
            tracing::trace!(%vaddr, level = level + 1, %granted, %required, "access violation");
            return Err(MemoryError::AccessViolation);
        }
        base = pde.next();
    }

    Ok(PhysAddr::new(base + vaddr.page_offset()))
}
