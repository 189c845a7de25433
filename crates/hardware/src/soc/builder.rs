//! System construction and the top-level `System` type.
//!
//! This module assembles a complete machine from configuration. It performs:
//! 1. **Memory setup:** Obtains physical memory from the host allocator and wraps it in the MMU.
//! 2. **Interrupts:** Creates the interrupt controller with the configured vector table.
//! 3. **CPU reset:** Places IP, SP, FP and the addressing mode at their initial values.
//! 4. **Lifecycle:** `new` creates, `exec` runs, and dropping the `System` releases all
//!    memory through the allocator that provided it.

use std::sync::Arc;

use crate::common::SystemError;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::arch::ExitStatus;
use crate::core::units::mmu::Mmu;
use crate::soc::interrupt_controller::InterruptController;
use crate::soc::memory::{HostAllocator, PhysicalMemory};

/// One emulated machine: CPU core, MMU and interrupt controller.
#[derive(Debug)]
pub struct System {
    /// The CPU core, which owns the MMU and the interrupt controller.
    pub cpu: Cpu,
    exit: Option<ExitStatus>,
}

impl System {
    /// Builds a new system.
    ///
    /// # Arguments
    ///
    /// * `config` - Machine configuration.
    /// * `allocator` - Host allocation strategy for physical memory.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Allocation`] if the allocator cannot provide
    /// `config.memory.size` bytes.
    pub fn new(config: &Config, allocator: Arc<dyn HostAllocator>) -> Result<Self, SystemError> {
        let memory = PhysicalMemory::new(config.memory.size, allocator)?;
        let mmu = Mmu::new(memory, config.memory.page_table_base);
        let interrupts = InterruptController::new(config.interrupts.vector_table_base);
        let mut cpu = Cpu::new(mmu, interrupts, config.general.trace_instructions);
        cpu.reset(
            config.general.start_ip,
            config.general.start_mode,
            config.general.initial_sp,
        );
        tracing::debug!(
            memory = config.memory.size,
            start_ip = config.general.start_ip,
            mode = %config.general.start_mode,
            "system created"
        );
        Ok(Self { cpu, exit: None })
    }

    /// Builds a new system using the allocator selected in `config`.
    ///
    /// # Errors
    ///
    /// As [`System::new`].
    pub fn from_config(config: &Config) -> Result<Self, SystemError> {
        Self::new(config, config.memory.allocator.build())
    }

    /// Runs one cycle, recording the exit status if the machine stops.
    pub fn step(&mut self) -> Option<ExitStatus> {
        if self.exit.is_some() {
            return self.exit;
        }
        let exit = self.cpu.step();
        if let Some(status) = exit {
            tracing::info!(%status, ip = self.cpu.regs.ip(), cycles = self.cpu.stats.cycles, "halted");
            self.exit = Some(status);
        }
        exit
    }

    /// Runs until the program stops.
    ///
    /// Only `int 255`, `int 254` or an undeliverable interrupt end execution.
    pub fn exec(&mut self) -> ExitStatus {
        loop {
            if let Some(status) = self.step() {
                return status;
            }
        }
    }

    /// Returns the exit status of the last run, if it has stopped.
    pub const fn exit_status(&self) -> Option<ExitStatus> {
        self.exit
    }

    /// Returns the host test code: 1 after `int 255`, 0 after any other stop.
    pub const fn test_code(&self) -> Option<i32> {
        match self.exit {
            Some(ExitStatus::Success) => Some(1),
            Some(_) => Some(0),
            None => None,
        }
    }

    /// Clears the recorded exit status so execution can resume.
    pub const fn clear_exit(&mut self) {
        self.exit = None;
    }

    /// Returns the MMU.
    pub const fn mmu(&self) -> &Mmu {
        &self.cpu.mmu
    }

    /// Returns the MMU mutably.
    pub const fn mmu_mut(&mut self) -> &mut Mmu {
        &mut self.cpu.mmu
    }

    /// Returns the interrupt controller.
    pub const fn interrupts(&self) -> &InterruptController {
        &self.cpu.interrupts
    }
}
