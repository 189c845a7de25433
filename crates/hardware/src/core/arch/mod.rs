//! Architectural State Definitions.
//!
//! This module groups the architecturally visible pieces of the machine:
//! 1. **Registers:** The sixteen-entry register enumeration and its storage.
//! 2. **Status:** Flag bit positions of the status register.
//! 3. **Modes:** Kernel (physical) and user (translated) addressing.
//! 4. **Interrupts:** The kinds held by the interrupt controller and the exit status.

/// Register enumeration and storage.
pub mod gpr;

/// Addressing mode definitions.
pub mod mode;

/// Status register flag layout.
pub mod status;

/// Interrupt kinds.
pub mod trap;

pub use gpr::Register;
pub use mode::AddressingMode;
pub use status::StatusFlag;
pub use trap::{ExitStatus, Interrupt};
