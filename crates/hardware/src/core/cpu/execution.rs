//! Main Execution Loop.
//!
//! This module implements one machine cycle of the CPU. It performs the following:
//! 1. **Interrupt Delivery:** Dispatches a pending interrupt before fetching.
//! 2. **Fetch:** Reads the instruction at IP and advances IP only on success.
//! 3. **Decode and Execute:** Dispatches exhaustively over the decoded instruction.
//! 4. **Observability:** Emits a `trace` event per instruction when tracing is enabled.
//!
//! Faults never abort the host; they become interrupts.

use super::Cpu;
use crate::common::constants::{INSTRUCTION_SIZE, INT_EXIT_FAILURE, INT_EXIT_SUCCESS};
use crate::core::arch::{AddressingMode, ExitStatus, Interrupt, Register};
use crate::core::units::alu::Alu;
use crate::core::units::bru::Bru;
use crate::isa::disasm::disassemble;
use crate::isa::{Instruction, LoadImmOp, Operand, decode};

/// Outcome of executing one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Continue with the next cycle.
    Continue,
    /// Stop with the given status.
    Exit(ExitStatus),
}

impl Cpu {
    /// Runs one cycle.
    ///
    /// # Returns
    ///
    /// `Some(status)` when the machine stops, `None` to keep running.
    pub fn step(&mut self) -> Option<ExitStatus> {
        self.stats.cycles += 1;
        match self.mode() {
            AddressingMode::Kernel => self.stats.cycles_kernel += 1,
            AddressingMode::User => self.stats.cycles_user += 1,
        }

        if let Some(exit) = self.dispatch_pending() {
            return Some(exit);
        }

        let ip = self.regs.ip();
        let raw = match self.fetch(ip) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(ip, %err, "instruction fetch fault");
                return self.raise(err.into());
            }
        };
        self.regs.set_ip(ip.wrapping_add(INSTRUCTION_SIZE));

        if self.trace {
            tracing::trace!(
                ip = format_args!("{ip:#x}"),
                raw = format_args!("{raw:#010x}"),
                mode = %self.mode(),
                "{}",
                disassemble(raw)
            );
        }

        let result = match decode(raw) {
            Some(inst) => self.execute(inst),
            None => Err(Interrupt::InvalidOperation),
        };
        match result {
            Ok(Flow::Continue) => {
                self.stats.instructions_retired += 1;
                None
            }
            Ok(Flow::Exit(status)) => {
                self.stats.instructions_retired += 1;
                Some(status)
            }
            Err(kind) => {
                tracing::debug!(ip, %kind, "instruction raised interrupt");
                self.raise(kind)
            }
        }
    }

    fn operand(&self, op: Operand) -> u64 {
        match op {
            Operand::Reg(r) => self.regs.read(r),
            Operand::Imm(v) => v,
        }
    }

    /// Fails with `InvalidOperation` unless running in kernel mode.
    const fn require_kernel(&self) -> Result<(), Interrupt> {
        match self.mode() {
            AddressingMode::Kernel => Ok(()),
            AddressingMode::User => Err(Interrupt::InvalidOperation),
        }
    }

    /// Fails with `InvalidOperation` if `reg` may not be written in the current mode.
    const fn check_writable(&self, reg: Register) -> Result<(), Interrupt> {
        if matches!(reg, Register::Status) {
            self.require_kernel()
        } else {
            Ok(())
        }
    }

    /// Writes a register from an instruction; STATUS is restricted in user mode.
    ///
    /// # Errors
    ///
    /// `InvalidOperation` for a restricted write.
    pub fn write_register(&mut self, reg: Register, value: u64) -> Result<(), Interrupt> {
        self.check_writable(reg)?;
        self.regs.write(reg, value);
        Ok(())
    }

    /// Executes a decoded instruction. IP already points past it.
    ///
    /// # Errors
    ///
    /// The interrupt raised by the instruction; state is left as it was before
    /// the faulting step.
    pub fn execute(&mut self, inst: Instruction) -> Result<Flow, Interrupt> {
        match inst {
            Instruction::Int { code } => match code {
                INT_EXIT_SUCCESS => return Ok(Flow::Exit(ExitStatus::Success)),
                INT_EXIT_FAILURE => return Ok(Flow::Exit(ExitStatus::Failure)),
                _ => {
                    if let Some(exit) = self.raise(Interrupt::Software(code)) {
                        return Ok(Flow::Exit(exit));
                    }
                }
            },
            Instruction::Iret => {
                self.require_kernel()?;
                self.interrupt_return();
            }
            Instruction::Ires => {
                self.require_kernel()?;
                self.interrupt_resolve();
            }
            Instruction::Usr { target } => {
                self.require_kernel()?;
                let target = self.regs.read(target);
                self.enter_user(target);
            }
            // No port bus is attached.
            Instruction::Out { .. } | Instruction::In { .. } => {
                return Err(Interrupt::InvalidOperation);
            }
            Instruction::Jal { base, offset } => {
                let target = Self::word_target(self.regs.read(base), offset);
                self.push(self.regs.ip())?;
                self.regs.set_ip(target);
            }
            Instruction::Jalr { link, base, offset } => {
                let target = Self::word_target(self.regs.read(base), offset);
                self.write_register(link, self.regs.ip())?;
                self.regs.set_ip(target);
            }
            Instruction::Ret => {
                let target = self.pop()?;
                self.regs.set_ip(target);
            }
            Instruction::Retr { target } => {
                self.regs.set_ip(self.regs.read(target));
            }
            Instruction::Branch { cond, offset } => {
                if Bru::condition_met(cond, self.regs.status()) {
                    self.regs.set_ip(Self::word_target(self.regs.ip(), offset));
                }
            }
            Instruction::Push { src } => {
                self.push(self.regs.read(src))?;
            }
            Instruction::Pop { dst } => {
                self.check_writable(dst)?;
                let value = self.pop()?;
                self.regs.write(dst, value);
            }
            Instruction::Enter => {
                self.push(self.regs.read(Register::Fp))?;
                self.regs.write(Register::Fp, self.regs.read(Register::Sp));
            }
            Instruction::Leave => {
                let saved_sp = self.regs.read(Register::Sp);
                self.regs.write(Register::Sp, self.regs.read(Register::Fp));
                match self.pop_unchecked() {
                    Ok(fp) => self.regs.write(Register::Fp, fp),
                    Err(kind) => {
                        self.regs.write(Register::Sp, saved_sp);
                        return Err(kind);
                    }
                }
            }
            Instruction::LoadImm { op, dst, imm } => {
                let value = Self::load_immediate(op, self.regs.read(dst), imm);
                self.write_register(dst, value)?;
            }
            Instruction::Load {
                width,
                signed,
                dst,
                base,
                index,
                shift,
                disp,
            } => {
                self.check_writable(dst)?;
                let addr = self.effective_address(width.bytes(), base, index, shift, disp);
                let value = self.load_sized(width, addr, signed)?;
                self.regs.write(dst, value);
            }
            Instruction::Store {
                width,
                src,
                base,
                index,
                shift,
                disp,
            } => {
                let addr = self.effective_address(width.bytes(), base, index, shift, disp);
                self.store_sized(width, addr, self.regs.read(src))?;
            }
            Instruction::Cmp { lhs, rhs } => {
                let flags = Bru::compare(self.operand(lhs), self.operand(rhs));
                self.regs.set_status(Bru::merge_flags(self.regs.status(), flags));
            }
            Instruction::Alu { op, dst, lhs, rhs } => {
                let value = Alu::execute(op, self.regs.read(lhs), self.operand(rhs))
                    .ok_or(Interrupt::DivideByZero)?;
                self.write_register(dst, value)?;
            }
        }
        Ok(Flow::Continue)
    }

    /// `base + scale * disp + (index << shift)`, all wrapping.
    fn effective_address(
        &self,
        scale: u64,
        base: Register,
        index: Register,
        shift: u32,
        disp: i64,
    ) -> u64 {
        self.regs
            .read(base)
            .wrapping_add((disp as u64).wrapping_mul(scale))
            .wrapping_add(self.regs.read(index) << shift)
    }

    /// Computes the result of an immediate load given the register's old value.
    pub const fn load_immediate(op: LoadImmOp, old: u64, imm: u16) -> u64 {
        let shift = op.shift();
        if op.is_signed() {
            ((imm as i16 as i64) << shift) as u64
        } else {
            (old & !(0xFFFF << shift)) | ((imm as u64) << shift)
        }
    }
}
