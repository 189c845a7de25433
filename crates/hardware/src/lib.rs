//! Halley machine emulator library.
//!
//! This crate implements an emulator for the Halley 64-bit register machine with the following:
//! 1. **Core:** Fetch/decode/execute engine, sixteen 64-bit registers, and the status register.
//! 2. **Memory:** Allocator-backed physical memory and an MMU with a five-level page table walk.
//! 3. **ISA:** Decoding, encoding and disassembly of the five instruction formats.
//! 4. **Interrupts:** A bounded pending queue, vector-table dispatch and double-fault detection.
//! 5. **Simulation:** Configuration, image loading, and statistics collection.

/// Common types and constants (addresses, registers, errors, permissions).
pub mod common;
/// Emulator configuration (defaults and JSON-backed config structures).
pub mod config;
/// CPU core (arch, execution, memory, trap) and execution units.
pub mod core;
/// Instruction set (opcodes, field layout, decode, encode, disassembly).
pub mod isa;
/// Image loading and the bounded simulator driver.
pub mod sim;
/// System components (builder, interrupt controller, physical memory).
pub mod soc;
/// Execution statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, MMU, interrupt controller and stats.
pub use crate::core::Cpu;
/// Why a machine stopped.
pub use crate::core::arch::ExitStatus;
/// Interrupt kinds.
pub use crate::core::arch::Interrupt;
/// Host allocation capability.
pub use crate::soc::memory::HostAllocator;
/// Top-level system; construct with `System::new`.
pub use crate::soc::System;
