//! Virtual Address Decomposition Tests.
//!
//! A virtual address splits into a 6-bit level 1 index, four 11-bit indices and
//! a 14-bit page offset.

use hlsim_core::common::VirtAddr;
use proptest::prelude::*;

fn compose(indices: [u64; 5], offset: u64) -> u64 {
    (indices[0] << 58)
        | (indices[1] << 47)
        | (indices[2] << 36)
        | (indices[3] << 25)
        | (indices[4] << 14)
        | offset
}

#[test]
fn zero_address_has_zero_indices() {
    let va = VirtAddr::new(0);
    for level in 0..5 {
        assert_eq!(va.level_index(level), 0);
    }
    assert_eq!(va.page_offset(), 0);
}

#[test]
fn all_ones_saturates_every_field() {
    let va = VirtAddr::new(u64::MAX);
    assert_eq!(va.level_index(0), 0x3F);
    for level in 1..5 {
        assert_eq!(va.level_index(level), 0x7FF);
    }
    assert_eq!(va.page_offset(), 0x3FFF);
}

#[test]
fn out_of_range_level_is_zero() {
    assert_eq!(VirtAddr::new(u64::MAX).level_index(5), 0);
}

#[test]
fn display_marks_address_space() {
    assert_eq!(VirtAddr::new(0x4000).to_string(), "v:0x4000");
    assert_eq!(hlsim_core::common::PhysAddr::new(0x10).to_string(), "p:0x10");
}

proptest! {
    #[test]
    fn fields_round_trip(
        l1 in 0u64..64,
        l2 in 0u64..2048,
        l3 in 0u64..2048,
        l4 in 0u64..2048,
        l5 in 0u64..2048,
        offset in 0u64..0x4000,
    ) {
        let va = VirtAddr::new(compose([l1, l2, l3, l4, l5], offset));
        prop_assert_eq!(va.level_index(0), l1);
        prop_assert_eq!(va.level_index(1), l2);
        prop_assert_eq!(va.level_index(2), l3);
        prop_assert_eq!(va.level_index(3), l4);
        prop_assert_eq!(va.level_index(4), l5);
        prop_assert_eq!(va.page_offset(), offset);
    }
}
