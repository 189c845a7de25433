//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the container for the processor
//! state. It coordinates the following:
//! 1. **State Management:** Maintains the register file and the addressing mode.
//! 2. **Memory:** Owns the MMU through which every fetch and data access goes.
//! 3. **Interrupts:** Owns the interrupt controller that collects faults and traps.
//! 4. **Observability:** Instruction tracing and execution statistics.

/// Fetch, decode and execute.
pub mod execution;

/// Mode-dependent loads, stores and stack operations.
pub mod memory;

/// Interrupt raising, dispatch and return.
pub mod trap;

use crate::common::RegisterFile;
use crate::common::constants::STACK_SLOT_SIZE;
use crate::core::arch::{AddressingMode, Register};
use crate::core::units::mmu::Mmu;
use crate::soc::interrupt_controller::InterruptController;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state and components.
#[derive(Debug)]
pub struct Cpu {
    /// Architectural registers.
    pub regs: RegisterFile,
    /// Memory Management Unit.
    pub mmu: Mmu,
    /// Pending interrupts and interrupt-return state.
    pub interrupts: InterruptController,
    /// Emit a `trace` event per executed instruction.
    pub trace: bool,
    /// Execution statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU with zeroed registers.
    ///
    /// # Arguments
    ///
    /// * `mmu` - The MMU owning physical memory.
    /// * `interrupts` - The interrupt controller.
    /// * `trace` - Enables per-instruction tracing.
    pub fn new(mmu: Mmu, interrupts: InterruptController, trace: bool) -> Self {
        Self {
            regs: RegisterFile::new(),
            mmu,
            interrupts,
            trace,
            stats: SimStats::default(),
        }
    }

    /// Places the CPU at its initial state.
    ///
    /// # Arguments
    ///
    /// * `ip` - Address of the first instruction.
    /// * `mode` - Initial addressing mode.
    /// * `stack_top` - Initial SP and FP; `None` selects the top of physical memory.
    pub fn reset(&mut self, ip: u64, mode: AddressingMode, stack_top: Option<u64>) {
        let top = stack_top
            .unwrap_or_else(|| self.mmu.memory_limit() & !(STACK_SLOT_SIZE - 1));
        self.regs = RegisterFile::new();
        self.regs.set_ip(ip);
        self.regs.write(Register::Sp, top);
        self.regs.write(Register::Fp, top);
        self.regs.set_mode(mode);
    }

    /// Returns the current addressing mode.
    pub const fn mode(&self) -> AddressingMode {
        self.regs.mode()
    }
}
