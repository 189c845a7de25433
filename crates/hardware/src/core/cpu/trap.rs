//! Interrupt Handling Logic.
//!
//! This module implements interrupt entry and return for the CPU. It performs the following:
//! 1. **Raising:** Hands interrupts to the controller, detecting double faults.
//! 2. **Dispatch:** Enters the handler of the next pending interrupt from the vector table.
//! 3. **Return Handling:** Implements `iret`, `ires` and `usr`.

use super::Cpu;
use crate::common::PhysAddr;
use crate::core::arch::{AddressingMode, ExitStatus, Interrupt};

impl Cpu {
    /// Raises an interrupt.
    ///
    /// A hardware fault raised while another interrupt is in service cannot be
    /// delivered and stops the machine.
    ///
    /// # Returns
    ///
    /// `Some(ExitStatus::DoubleFault)` if execution must stop, `None` otherwise.
    pub fn raise(&mut self, kind: Interrupt) -> Option<ExitStatus> {
        if kind.is_fault() {
            if let Some(active) = self.interrupts.in_service() {
                tracing::warn!(%kind, %active, ip = self.regs.ip(), "fault while servicing interrupt");
                return Some(ExitStatus::DoubleFault(kind));
            }
        }
        self.stats.interrupts_raised += 1;
        if !self.interrupts.enqueue(kind) {
            self.stats.interrupts_overflowed += 1;
        }
        None
    }

    /// Dispatches the next pending interrupt, if any and none is in service.
    ///
    /// Saves IP and status, switches to kernel mode and jumps to the 64-bit handler
    /// address stored at `vector_table_base + 8 * vector`.
    ///
    /// # Returns
    ///
    /// `Some(ExitStatus::DoubleFault)` if no vector table is installed or the vector
    /// entry cannot be read.
    pub fn dispatch_pending(&mut self) -> Option<ExitStatus> {
        if self.interrupts.in_service().is_some() || !self.interrupts.has_pending() {
            return None;
        }
        let kind = self.interrupts.take_next()?;
        let Some(entry) = self.interrupts.vector_address(kind) else {
            tracing::warn!(%kind, "no interrupt vector table installed");
            return Some(ExitStatus::DoubleFault(kind));
        };
        let handler = match self.mmu.read_physical::<u64>(PhysAddr::new(entry)) {
            Ok(h) => h,
            Err(err) => {
                tracing::warn!(%kind, entry, %err, "interrupt vector unreadable");
                return Some(ExitStatus::DoubleFault(kind));
            }
        };

        let ip = self.regs.ip();
        self.interrupts.begin_service(kind, ip, self.regs.status());
        self.regs.set_mode(AddressingMode::Kernel);
        self.regs.set_ip(handler);
        self.stats.interrupts_dispatched += 1;
        tracing::debug!(%kind, from = ip, handler, "interrupt dispatched");
        None
    }

    /// `iret`: restores the saved IP and status and ends service.
    pub fn interrupt_return(&mut self) {
        let (ip, status) = self.interrupts.return_state();
        self.regs.set_ip(ip);
        self.regs.set_status(status);
        self.interrupts.complete();
        tracing::debug!(ip, mode = %self.mode(), "iret");
    }

    /// `ires`: ends service without returning.
    pub fn interrupt_resolve(&mut self) {
        self.interrupts.complete();
        tracing::debug!(ip = self.regs.ip(), "ires");
    }

    /// `usr`: enters user mode at `target`.
    pub fn enter_user(&mut self, target: u64) {
        self.regs.set_mode(AddressingMode::User);
        self.regs.set_ip(target);
        tracing::debug!(ip = target, "entering user mode");
    }
}
