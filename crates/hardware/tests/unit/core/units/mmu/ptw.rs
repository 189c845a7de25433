//! Page Table Walker (PTW) Unit Tests.
//!
//! Verifies five-level translation:
//! - Per-level unmapped errors
//! - Permission checks at every level
//! - Override propagation, where the earliest override entry decides
//! - Physical errors while reading page-directory entries

use crate::common::harness::PageMapper;
use hlsim_core::common::{MemoryError, Permissions, PhysAddr, VirtAddr};
use hlsim_core::core::units::mmu::Mmu;
use hlsim_core::core::units::mmu::ptw::PageDirectoryEntry;
use hlsim_core::soc::memory::{HeapAllocator, PhysicalMemory};
use rstest::rstest;
use std::sync::Arc;

// ══════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════

const MEM_SIZE: usize = 1 << 20;
const FRAME: u64 = 0x2_0000;
const R: Permissions = Permissions::READ;
const W: Permissions = Permissions::WRITE;
const X: Permissions = Permissions::EXECUTE;

fn rwx() -> Permissions {
    R | W | X
}

fn setup_mmu() -> Mmu {
    let memory = PhysicalMemory::new(MEM_SIZE, Arc::new(HeapAllocator)).expect("allocation");
    Mmu::new(memory, 0)
}

/// Table for level `i` lives at `i * 0x4000`; the leaf points at `FRAME`.
fn table_addr(level: usize) -> u64 {
    level as u64 * 0x4000
}

/// Builds the chain for virtual page 0 with per-level (permissions, override).
fn chain(mmu: &mut Mmu, levels: [(Permissions, bool); 5]) {
    for (level, (perms, ovr)) in levels.into_iter().enumerate() {
        let next = if level == 4 { FRAME } else { table_addr(level + 1) };
        let pde = PageDirectoryEntry::new(next, perms, ovr);
        mmu.write_physical_64(PhysAddr::new(table_addr(level)), pde.raw())
            .unwrap();
    }
}

fn plain(perms: Permissions) -> [(Permissions, bool); 5] {
    [(perms, false); 5]
}

fn v(addr: u64) -> VirtAddr {
    VirtAddr::new(addr)
}

// ══════════════════════════════════════════════════════════
// Entry layout
// ══════════════════════════════════════════════════════════

#[test]
fn entry_fields() {
    let pde = PageDirectoryEntry::new(0x1_C000 | 0x3FFF, W | X, true);
    assert!(pde.is_valid());
    assert!(pde.is_override());
    assert_eq!(pde.permissions(), W | X);
    assert_eq!(pde.next(), 0x1_C000);
}

#[test]
fn entry_bit_layout() {
    assert_eq!(PageDirectoryEntry::new(0, R, false).raw(), 0b101);
    assert_eq!(PageDirectoryEntry::new(0, W, false).raw(), 0b1001);
    assert_eq!(PageDirectoryEntry::new(0, X, false).raw(), 0b10001);
    assert_eq!(PageDirectoryEntry::new(0, Permissions::NONE, true).raw(), 0b11);
}

// ══════════════════════════════════════════════════════════
// Self-mapped page at physical 0
// ══════════════════════════════════════════════════════════

// One entry at address 0 serves all five levels for virtual page 0.
#[rstest]
#[case(0b1, false, false, false)]
#[case(0b101, true, false, false)]
#[case(0b1001, false, true, false)]
#[case(0b10001, false, false, true)]
fn self_mapped_permissions(
    #[case] pde: u64,
    #[case] read: bool,
    #[case] write: bool,
    #[case] execute: bool,
) {
    let mut mmu = setup_mmu();
    mmu.write_physical_64(PhysAddr::new(0), pde).unwrap();

    let r = mmu.read_virtual_64(v(0));
    assert_eq!(r.is_ok(), read);
    if read {
        assert_eq!(r, Ok(pde));
    } else {
        assert_eq!(r, Err(MemoryError::AccessViolation));
    }

    let w = mmu.write_virtual_32(v(8), 0xDEAD);
    assert_eq!(w.is_ok(), write);

    let x = mmu.read_virtual_instruction(v(4));
    assert_eq!(x.is_ok(), execute);
}

#[test]
fn invalid_root_is_unmapped_at_level_one() {
    let mmu = setup_mmu();
    assert_eq!(mmu.read_virtual_8(v(0)), Err(MemoryError::UnmappedLevel1));
}

// ══════════════════════════════════════════════════════════
// Full chains
// ══════════════════════════════════════════════════════════

#[test]
fn translation_adds_page_offset() {
    let mut mmu = setup_mmu();
    chain(&mut mmu, plain(rwx()));
    mmu.write_physical_64(PhysAddr::new(FRAME + 0x10), 0xFEED).unwrap();
    assert_eq!(mmu.translate(v(0x10), R), Ok(PhysAddr::new(FRAME + 0x10)));
    assert_eq!(mmu.read_virtual_64(v(0x10)), Ok(0xFEED));
}

#[rstest]
#[case(0, MemoryError::UnmappedLevel1)]
#[case(1, MemoryError::UnmappedLevel2)]
#[case(2, MemoryError::UnmappedLevel3)]
#[case(3, MemoryError::UnmappedLevel4)]
#[case(4, MemoryError::UnmappedLevel5)]
fn invalid_entry_reports_its_level(#[case] level: usize, #[case] expected: MemoryError) {
    let mut mmu = setup_mmu();
    chain(&mut mmu, plain(rwx()));
    mmu.write_physical_64(PhysAddr::new(table_addr(level)), 0).unwrap();
    assert_eq!(mmu.read_virtual_64(v(0)), Err(expected));
}

#[test]
fn every_level_is_checked_without_override() {
    let mut mmu = setup_mmu();
    let mut levels = plain(R | W);
    levels[3] = (R, false);
    chain(&mut mmu, levels);
    assert!(mmu.read_virtual_64(v(0)).is_ok());
    assert_eq!(mmu.write_virtual_64(v(0), 1), Err(MemoryError::AccessViolation));
}

#[test]
fn override_grants_for_deeper_levels() {
    let mut mmu = setup_mmu();
    let levels = [
        (rwx(), false),
        (R | W, true),
        (Permissions::NONE, false),
        (Permissions::NONE, false),
        (R, false),
    ];
    chain(&mut mmu, levels);
    assert_eq!(mmu.write_virtual_64(v(0x18), 9), Ok(()));
    assert_eq!(mmu.read_physical_64(PhysAddr::new(FRAME + 0x18)), Ok(9));
    assert_eq!(mmu.read_virtual_instruction(v(0)), Err(MemoryError::AccessViolation));
}

#[test]
fn override_denies_for_deeper_levels() {
    let mut mmu = setup_mmu();
    let levels = [
        (rwx(), false),
        (R, true),
        (rwx(), false),
        (rwx(), false),
        (rwx(), false),
    ];
    chain(&mut mmu, levels);
    assert!(mmu.read_virtual_64(v(0)).is_ok());
    assert_eq!(mmu.write_virtual_64(v(0), 1), Err(MemoryError::AccessViolation));
}

#[test]
fn earliest_override_stays_authoritative() {
    let mut mmu = setup_mmu();
    let levels = [
        (R, true),
        (rwx(), true),
        (rwx(), false),
        (rwx(), false),
        (rwx(), false),
    ];
    chain(&mut mmu, levels);
    assert!(mmu.read_virtual_64(v(0)).is_ok());
    assert_eq!(mmu.write_virtual_64(v(0), 1), Err(MemoryError::AccessViolation));
}

#[test]
fn permission_check_precedes_deeper_validity() {
    let mut mmu = setup_mmu();
    let mut levels = plain(rwx());
    levels[1] = (R, false);
    chain(&mut mmu, levels);
    mmu.write_physical_64(PhysAddr::new(table_addr(3)), 0).unwrap();
    assert_eq!(mmu.write_virtual_64(v(0), 1), Err(MemoryError::AccessViolation));
    assert_eq!(mmu.read_virtual_64(v(0)), Err(MemoryError::UnmappedLevel4));
}

#[test]
fn failed_virtual_write_leaves_frame_untouched() {
    let mut mmu = setup_mmu();
    chain(&mut mmu, plain(R));
    mmu.write_physical_64(PhysAddr::new(FRAME), 0x77).unwrap();
    assert!(mmu.write_virtual_64(v(0), 0).is_err());
    assert_eq!(mmu.read_physical_64(PhysAddr::new(FRAME)), Ok(0x77));
}

#[test]
fn unaligned_virtual_access_after_translation() {
    let mut mmu = setup_mmu();
    chain(&mut mmu, plain(rwx()));
    assert_eq!(mmu.read_virtual_32(v(2)), Err(MemoryError::Unaligned));
}

// ══════════════════════════════════════════════════════════
// Physical errors during the walk
// ══════════════════════════════════════════════════════════

#[test]
fn table_outside_memory_is_bus_error() {
    let mut mmu = setup_mmu();
    mmu.set_page_table_base(MEM_SIZE as u64);
    assert_eq!(mmu.read_virtual_64(v(0)), Err(MemoryError::Bus));
}

#[test]
fn frame_outside_memory_is_bus_error() {
    let mut mmu = setup_mmu();
    chain(&mut mmu, plain(rwx()));
    let leaf = PageDirectoryEntry::new(MEM_SIZE as u64, rwx(), false);
    mmu.write_physical_64(PhysAddr::new(table_addr(4)), leaf.raw()).unwrap();
    assert_eq!(mmu.read_virtual_64(v(0)), Err(MemoryError::Bus));
}

// ══════════════════════════════════════════════════════════
// Sparse mappings
// ══════════════════════════════════════════════════════════

#[test]
fn distinct_pages_map_independently() {
    let mut mmu = setup_mmu();
    mmu.set_page_table_base(0x4_0000);
    let mut mapper = PageMapper::new(0x4_4000);
    let high = 0xFC00_0000_0000_4000;
    let low = 0x0000_0000_0000_8000;
    mapper.map(&mut mmu, high, 0xC_0000, R | W);
    mapper.map(&mut mmu, low, 0xC_4000, R);

    mmu.write_virtual_64(v(high + 8), 0xAB).unwrap();
    assert_eq!(mmu.read_physical_64(PhysAddr::new(0xC_0008)), Ok(0xAB));
    assert_eq!(mmu.read_virtual_64(v(low + 8)), Ok(0));
    assert_eq!(mmu.write_virtual_64(v(low), 1), Err(MemoryError::AccessViolation));
    assert_eq!(mmu.read_virtual_64(v(high + 0x4000)), Err(MemoryError::UnmappedLevel5));
}
