//! Physical Memory and Host Allocator Tests.
//!
//! Verifies the allocator capability:
//! - Blocks are zero-filled
//! - Resizing preserves contents and zeroes any new tail
//! - Refusals surface as `SystemError::Allocation` and leave the buffer intact
//! - Dropping the buffer returns the block to its allocator

use crate::common::mocks::allocator::{CountingAllocator, FailingAllocator};
use hlsim_core::common::SystemError;
use hlsim_core::soc::memory::{AllocatorKind, HeapAllocator, HostAllocator, MmapAllocator, PhysicalMemory};
use rstest::rstest;
use std::sync::Arc;

fn allocators() -> Vec<Arc<dyn HostAllocator>> {
    vec![Arc::new(HeapAllocator), Arc::new(MmapAllocator)]
}

#[test]
fn blocks_start_zeroed() {
    for alloc in allocators() {
        let mem = PhysicalMemory::new(4096, alloc).unwrap();
        assert_eq!(mem.len(), 4096);
        assert!(mem.as_slice().iter().all(|&b| b == 0));
    }
}

#[rstest]
#[case(64, 8192)]
#[case(8192, 64)]
fn resize_preserves_prefix(#[case] from: usize, #[case] to: usize) {
    for alloc in allocators() {
        let mut mem = PhysicalMemory::new(from, alloc).unwrap();
        mem.as_mut_slice().fill(0x5A);
        mem.resize(to).unwrap();
        assert_eq!(mem.len(), to);
        let kept = from.min(to);
        assert!(mem.as_slice()[..kept].iter().all(|&b| b == 0x5A));
        assert!(mem.as_slice()[kept..].iter().all(|&b| b == 0));
    }
}

#[test]
fn zero_sized_buffer_does_not_allocate() {
    let counting = Arc::new(CountingAllocator::default());
    let mut mem = PhysicalMemory::new(0, counting.clone()).unwrap();
    assert!(mem.is_empty());
    assert_eq!(counting.allocs(), 0);

    mem.resize(128).unwrap();
    assert_eq!(counting.allocs(), 1);
    mem.resize(0).unwrap();
    assert_eq!(counting.frees(), 1);
    assert_eq!(counting.live_bytes(), 0);
}

#[test]
fn refusal_is_allocation_error() {
    let err = PhysicalMemory::new(64, Arc::new(FailingAllocator)).unwrap_err();
    assert!(matches!(err, SystemError::Allocation { size: 64 }));
}

#[test]
fn failed_grow_leaves_buffer_intact() {
    let counting = Arc::new(CountingAllocator::with_limit(256));
    let mut mem = PhysicalMemory::new(128, counting.clone()).unwrap();
    mem.as_mut_slice()[0] = 7;
    let err = mem.resize(512).unwrap_err();
    assert!(matches!(err, SystemError::Allocation { size: 512 }));
    assert_eq!(mem.len(), 128);
    assert_eq!(mem.as_slice()[0], 7);
    assert_eq!(counting.live_bytes(), 128);
}

#[test]
fn drop_returns_block() {
    let counting = Arc::new(CountingAllocator::default());
    {
        let mut mem = PhysicalMemory::new(1024, counting.clone()).unwrap();
        mem.resize(2048).unwrap();
        assert_eq!(counting.reallocs(), 1);
        assert_eq!(counting.live_bytes(), 2048);
    }
    assert_eq!(counting.frees(), 1);
    assert_eq!(counting.live_bytes(), 0);
}

#[test]
fn allocator_kind_builds_strategy() {
    for kind in [AllocatorKind::Heap, AllocatorKind::Mmap] {
        let mem = PhysicalMemory::new(64, kind.build()).unwrap();
        assert_eq!(mem.len(), 64);
    }
}
