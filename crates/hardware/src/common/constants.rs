//! Global System Constants.
//!
//! This module defines machine-wide constants used across the emulator. It includes:
//! 1. **Memory Constants:** Page size, page-table geometry and entry layout.
//! 2. **Instruction Constants:** Instruction width and branch displacement scale.
//! 3. **Interrupt Constants:** Queue capacity and the reserved host-exit codes.

/// Page size in bytes (16 KiB).
pub const PAGE_SIZE: u64 = 1 << PAGE_SHIFT;

/// Number of bits covered by the page offset.
pub const PAGE_SHIFT: u64 = 14;

/// Mask for extracting the page offset from an address.
pub const PAGE_OFFSET_MASK: u64 = PAGE_SIZE - 1;

/// Number of translation levels walked for every virtual address.
pub const PAGE_TABLE_LEVELS: usize = 5;

/// Size of a page-directory entry in bytes.
pub const PDE_SIZE: u64 = 8;

/// Mask selecting the next-level table base (or final frame base) of a PDE.
pub const PDE_NEXT_MASK: u64 = !PAGE_OFFSET_MASK;

/// Size of one instruction in bytes.
pub const INSTRUCTION_SIZE: u64 = 4;

/// Size of one stack slot in bytes.
pub const STACK_SLOT_SIZE: u64 = 8;

/// Size of one interrupt vector table entry in bytes.
pub const VECTOR_ENTRY_SIZE: u64 = 8;

/// Maximum number of pending interrupts held by the interrupt controller.
pub const INTERRUPT_QUEUE_CAPACITY: usize = 16;

/// `int` immediate that stops the machine with the success indicator.
pub const INT_EXIT_SUCCESS: u16 = 255;

/// `int` immediate that stops the machine with the failure indicator.
pub const INT_EXIT_FAILURE: u16 = 254;
