//! Register File.
//!
//! This module provides the `RegisterFile` struct, the CPU-facing view of the
//! architectural registers. It provides:
//! 1. **Register Access:** Reads and writes by [`Register`], with `rz` hardwired to zero.
//! 2. **Status Helpers:** Flag and addressing-mode accessors over the status register.
//! 3. **Observability:** A dump of the register state for debugging.

use crate::core::arch::gpr::{Gpr, Register};
use crate::core::arch::mode::AddressingMode;
use crate::core::arch::status::StatusFlag;

/// Architectural register file with status-register helpers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    gpr: Gpr,
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self { gpr: Gpr::new() }
    }

    /// Reads a register. `rz` always returns 0.
    #[inline]
    pub const fn read(&self, reg: Register) -> u64 {
        self.gpr.read(reg)
    }

    /// Writes a register. Writes to `rz` are ignored.
    #[inline]
    pub const fn write(&mut self, reg: Register, val: u64) {
        self.gpr.write(reg, val);
    }

    /// Returns the instruction pointer.
    #[inline]
    pub const fn ip(&self) -> u64 {
        self.gpr.read(Register::Ip)
    }

    /// Sets the instruction pointer.
    #[inline]
    pub const fn set_ip(&mut self, ip: u64) {
        self.gpr.write(Register::Ip, ip);
    }

    /// Returns the raw status register.
    #[inline]
    pub const fn status(&self) -> u64 {
        self.gpr.read(Register::Status)
    }

    /// Replaces the raw status register.
    #[inline]
    pub const fn set_status(&mut self, status: u64) {
        self.gpr.write(Register::Status, status);
    }

    /// Tests a status flag.
    #[inline]
    pub const fn flag(&self, flag: StatusFlag) -> bool {
        self.status() & flag.mask() != 0
    }

    /// Sets or clears a status flag.
    pub const fn set_flag(&mut self, flag: StatusFlag, on: bool) {
        let status = if on {
            self.status() | flag.mask()
        } else {
            self.status() & !flag.mask()
        };
        self.set_status(status);
    }

    /// Returns the addressing mode selected by the `Mode` flag.
    #[inline]
    pub const fn mode(&self) -> AddressingMode {
        AddressingMode::from_bit(self.flag(StatusFlag::Mode))
    }

    /// Switches the addressing mode.
    pub const fn set_mode(&mut self, mode: AddressingMode) {
        self.set_flag(StatusFlag::Mode, mode.bit());
    }

    /// Dumps the contents of all registers to stdout, two per line.
    pub fn dump(&self) {
        for pair in Register::ALL.chunks(2) {
            if let [a, b] = pair {
                println!(
                    "{:<6}={:#018x} {:<6}={:#018x}",
                    a.name(),
                    self.read(*a),
                    b.name(),
                    self.read(*b)
                );
            }
        }
    }
}
