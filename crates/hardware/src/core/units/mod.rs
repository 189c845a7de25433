//! Execution units and functional components.
//!
//! This module contains the stateless execution units used by the CPU core and
//! the memory management unit that owns physical memory.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit: comparison flags and branch conditions.
pub mod bru;

/// Memory Management Unit with the five-level page table walker.
pub mod mmu;
