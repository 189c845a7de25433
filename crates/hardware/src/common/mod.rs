//! Common utilities and types used throughout the emulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the emulator. It includes:
//! 1. **Address Types:** Strong types for virtual and physical addresses.
//! 2. **Constants:** Machine-wide constants for paging, instructions, and interrupts.
//! 3. **Memory Permissions:** The read/write/execute set checked during translation.
//! 4. **Error Handling:** Memory errors, result codes and host-level system errors.
//! 5. **Register Management:** The register file with status-register helpers.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Common constants used throughout the emulator.
pub mod constants;

/// Memory permission definitions.
pub mod data;

/// Error types and result codes.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use addr::{PhysAddr, VirtAddr};
pub use constants::{INSTRUCTION_SIZE, PAGE_SHIFT};
pub use data::Permissions;
pub use error::{MemoryError, MemoryResult, SystemError};
pub use reg::RegisterFile;
