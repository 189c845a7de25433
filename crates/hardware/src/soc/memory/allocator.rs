//! Host Allocator Capability.
//!
//! The emulator never allocates its physical memory directly. The host supplies an
//! allocation strategy, and every block is released through the strategy that
//! produced it. This module provides:
//! 1. **Capability:** The three-operation `HostAllocator` trait.
//! 2. **Heap:** A strategy backed by the global Rust allocator.
//! 3. **Mmap:** A strategy backed by anonymous private mappings, whose pages the OS
//!    commits lazily on first touch.

use std::alloc::{self, Layout};
use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;

use serde::Deserialize;

/// Alignment of every block handed out by the built-in strategies.
pub const BLOCK_ALIGN: usize = 8;

/// Allocation capability supplied by the host.
///
/// Blocks are zero-filled. Sizes passed to `free` and `reallocate` must be the sizes
/// the block was obtained with. Zero-sized requests are never issued.
pub trait HostAllocator: Send + Sync + fmt::Debug {
    /// Allocates `size` zeroed bytes, returning `None` if the host refuses.
    fn allocate(&self, size: usize) -> Option<NonNull<u8>>;

    /// Releases a block.
    ///
    /// # Safety
    ///
    /// `block` must come from `allocate` or `reallocate` on this allocator with the
    /// given `size`, and must not be used afterwards.
    unsafe fn free(&self, block: NonNull<u8>, size: usize);

    /// Resizes a block, preserving its first `min(old_size, new_size)` bytes and
    /// zeroing any new tail.
    ///
    /// On `None` the original block is still valid and owned by the caller.
    ///
    /// # Safety
    ///
    /// Same contract as [`HostAllocator::free`] for `block` and `old_size`. On success
    /// the old pointer must not be used again.
    unsafe fn reallocate(
        &self,
        block: NonNull<u8>,
        old_size: usize,
        new_size: usize,
    ) -> Option<NonNull<u8>>;
}

/// Allocator backed by the global Rust heap.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeapAllocator;

impl HeapAllocator {
    fn layout(size: usize) -> Option<Layout> {
        Layout::from_size_align(size, BLOCK_ALIGN).ok()
    }
}

impl HostAllocator for HeapAllocator {
    fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        if size == 0 {
            return None;
        }
        let layout = Self::layout(size)?;
        // SAFETY: layout has a non-zero size.
        NonNull::new(unsafe { alloc::alloc_zeroed(layout) })
    }

    unsafe fn free(&self, block: NonNull<u8>, size: usize) {
        if let Some(layout) = Self::layout(size) {
            // SAFETY: the caller guarantees block was allocated here with this size.
            unsafe { alloc::dealloc(block.as_ptr(), layout) };
        }
    }

    unsafe fn reallocate(
        &self,
        block: NonNull<u8>,
        old_size: usize,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        if new_size == 0 {
            return None;
        }
        let old_layout = Self::layout(old_size)?;
        let _ = Self::layout(new_size)?;
        // SAFETY: the caller guarantees block/old_size; new_size is non-zero and
        // forms a valid layout with the same alignment.
        let ptr = NonNull::new(unsafe { alloc::realloc(block.as_ptr(), old_layout, new_size) })?;
        if new_size > old_size {
            // SAFETY: bytes old_size..new_size lie inside the new block.
            unsafe { ptr.as_ptr().add(old_size).write_bytes(0, new_size - old_size) };
        }
        Some(ptr)
    }
}

/// Allocator backed by anonymous private `mmap` regions.
///
/// Falls back to the heap on non-unix hosts.
#[derive(Clone, Copy, Debug, Default)]
pub struct MmapAllocator;

#[cfg(unix)]
impl HostAllocator for MmapAllocator {
    fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        if size == 0 {
            return None;
        }
        // SAFETY: anonymous mapping with no address hint; the kernel validates size.
        let ptr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                size,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        if ptr == libc::MAP_FAILED {
            tracing::warn!(size, "mmap of physical memory failed");
            return None;
        }
        NonNull::new(ptr.cast::<u8>())
    }

    unsafe fn free(&self, block: NonNull<u8>, size: usize) {
        // SAFETY: the caller guarantees block is a live mapping of this size.
        let _ = unsafe { libc::munmap(block.as_ptr().cast(), size) };
    }

    unsafe fn reallocate(
        &self,
        block: NonNull<u8>,
        old_size: usize,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        let fresh = self.allocate(new_size)?;
        // SAFETY: both regions are live, distinct and at least min(old, new) long.
        unsafe {
            std::ptr::copy_nonoverlapping(
                block.as_ptr(),
                fresh.as_ptr(),
                old_size.min(new_size),
            );
            self.free(block, old_size);
        }
        Some(fresh)
    }
}

#[cfg(not(unix))]
impl HostAllocator for MmapAllocator {
    fn allocate(&self, size: usize) -> Option<NonNull<u8>> {
        HeapAllocator.allocate(size)
    }

    unsafe fn free(&self, block: NonNull<u8>, size: usize) {
        // SAFETY: forwarded contract.
        unsafe { HeapAllocator.free(block, size) }
    }

    unsafe fn reallocate(
        &self,
        block: NonNull<u8>,
        old_size: usize,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        // SAFETY: forwarded contract.
        unsafe { HeapAllocator.reallocate(block, old_size, new_size) }
    }
}

/// Built-in allocation strategy selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocatorKind {
    /// [`HeapAllocator`].
    #[default]
    Heap,
    /// [`MmapAllocator`].
    Mmap,
}

impl AllocatorKind {
    /// Instantiates the strategy.
    pub fn build(self) -> Arc<dyn HostAllocator> {
        match self {
            Self::Heap => Arc::new(HeapAllocator),
            Self::Mmap => Arc::new(MmapAllocator),
        }
    }
}
