//! Physical System Memory.
//!
//! This module implements the machine's physical storage. It provides:
//! 1. **Allocator:** The host allocation capability and its built-in strategies.
//! 2. **Buffer:** `PhysicalMemory`, the allocator-owned flat byte array.

/// Host allocation capability and strategies.
pub mod allocator;

/// Allocator-owned physical byte buffer.
pub mod buffer;

pub use allocator::{AllocatorKind, HeapAllocator, HostAllocator, MmapAllocator};
pub use buffer::PhysicalMemory;
