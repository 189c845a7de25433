//! Physical Memory Buffer.
//!
//! A flat, zero-initialized byte buffer whose storage is obtained from, and returned
//! to, a host-supplied [`HostAllocator`]. It performs the following:
//! 1. **Ownership:** Holds exactly one allocator block and releases it on drop.
//! 2. **Access:** Exposes the block as an ordinary byte slice; all bounds checks are
//!    slice checks.
//! 3. **Growth:** Resizes in place through the allocator's `reallocate`.

use std::fmt;
use std::ptr::NonNull;
use std::slice;
use std::sync::Arc;

use crate::common::SystemError;
use crate::soc::memory::allocator::HostAllocator;

/// Physical memory of one emulated machine.
pub struct PhysicalMemory {
    ptr: NonNull<u8>,
    size: usize,
    allocator: Arc<dyn HostAllocator>,
}

// SAFETY: the block is uniquely owned and only reachable through &self / &mut self.
unsafe impl Send for PhysicalMemory {}
// SAFETY: shared access is read-only.
unsafe impl Sync for PhysicalMemory {}

impl PhysicalMemory {
    /// Allocates `size` zeroed bytes from `allocator`.
    ///
    /// A zero-sized buffer is permitted and performs no allocation.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Allocation`] if the allocator refuses the request.
    pub fn new(size: usize, allocator: Arc<dyn HostAllocator>) -> Result<Self, SystemError> {
        let ptr = if size == 0 {
            NonNull::dangling()
        } else {
            allocator
                .allocate(size)
                .ok_or(SystemError::Allocation { size })?
        };
        Ok(Self {
            ptr,
            size,
            allocator,
        })
    }

    /// Returns the size of the buffer in bytes (the memory limit).
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the buffer holds no bytes.
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the contents as a byte slice.
    pub const fn as_slice(&self) -> &[u8] {
        // SAFETY: ptr is valid for size bytes (or dangling with size 0) for the
        // lifetime of self.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.size) }
    }

    /// Returns the contents as a mutable byte slice.
    pub const fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above; &mut self guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.size) }
    }

    /// Returns the allocator that owns the block.
    pub fn allocator(&self) -> &Arc<dyn HostAllocator> {
        &self.allocator
    }

    /// Resizes the buffer, preserving existing contents and zeroing any new tail.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Allocation`] if the allocator refuses; the buffer is
    /// then left unchanged.
    pub fn resize(&mut self, new_size: usize) -> Result<(), SystemError> {
        if new_size == self.size {
            return Ok(());
        }
        let ptr = match (self.size, new_size) {
            (0, _) => self
                .allocator
                .allocate(new_size)
                .ok_or(SystemError::Allocation { size: new_size })?,
            (old, 0) => {
                // SAFETY: ptr/old describe the block this allocator handed out.
                unsafe { self.allocator.free(self.ptr, old) };
                NonNull::dangling()
            }
            (old, new) => {
                // SAFETY: ptr/old describe the block this allocator handed out.
                unsafe { self.allocator.reallocate(self.ptr, old, new) }
                    .ok_or(SystemError::Allocation { size: new })?
            }
        };
        tracing::debug!(from = self.size, to = new_size, "physical memory resized");
        self.ptr = ptr;
        self.size = new_size;
        Ok(())
    }
}

impl Drop for PhysicalMemory {
    fn drop(&mut self) {
        if self.size != 0 {
            // SAFETY: ptr/size describe the live block this allocator handed out.
            unsafe { self.allocator.free(self.ptr, self.size) };
        }
    }
}

impl fmt::Debug for PhysicalMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicalMemory")
            .field("size", &self.size)
            .field("allocator", &self.allocator)
            .finish_non_exhaustive()
    }
}
