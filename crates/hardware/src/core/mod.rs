//! Core processor implementation.
//!
//! This module contains the CPU engine, its execution units and the
//! architectural definitions they share.

/// Architectural definitions (registers, flags, modes, interrupts).
pub mod arch;

/// CPU core implementation and execution orchestration.
pub mod cpu;

/// Execution units (ALU, branch unit, MMU).
pub mod units;

pub use self::cpu::Cpu;
