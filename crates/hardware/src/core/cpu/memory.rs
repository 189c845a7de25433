//! Memory Access Helpers.
//!
//! This module provides the interface between the CPU and the MMU. It performs the
//! following:
//! 1. **Mode Selection:** Kernel mode accesses physical addresses; user mode translates.
//! 2. **Width Handling:** Sized loads with zero or sign extension and truncating stores.
//! 3. **Stack Operations:** Eight-byte push and pop with the underflow check.
//!
//! Every MMU error is counted and converted into the interrupt that reports it.

use super::Cpu;
use crate::common::constants::{INSTRUCTION_SIZE, STACK_SLOT_SIZE};
use crate::common::{MemoryError, PhysAddr, VirtAddr};
use crate::core::arch::{AddressingMode, Interrupt, Register};
use crate::core::units::mmu::Width;
use crate::isa::AccessWidth;
use crate::isa::instruction::sign_extend;

impl Cpu {
    fn data_fault(&mut self, err: MemoryError) -> Interrupt {
        self.stats.data_faults += 1;
        tracing::debug!(%err, mode = %self.mode(), "data access fault");
        err.into()
    }

    /// Reads a value, translating the address in user mode.
    ///
    /// # Errors
    ///
    /// The interrupt corresponding to the MMU error.
    pub fn load<T: Width>(&mut self, addr: u64) -> Result<T, Interrupt> {
        let res = match self.mode() {
            AddressingMode::Kernel => self.mmu.read_physical(PhysAddr::new(addr)),
            AddressingMode::User => self.mmu.read_virtual(VirtAddr::new(addr)),
        };
        res.map_err(|e| self.data_fault(e))
    }

    /// Writes a value, translating the address in user mode.
    ///
    /// # Errors
    ///
    /// The interrupt corresponding to the MMU error; memory is unchanged.
    pub fn store<T: Width>(&mut self, addr: u64, val: T) -> Result<(), Interrupt> {
        let res = match self.mode() {
            AddressingMode::Kernel => self.mmu.write_physical(PhysAddr::new(addr), val),
            AddressingMode::User => self.mmu.write_virtual(VirtAddr::new(addr), val),
        };
        res.map_err(|e| self.data_fault(e))
    }

    /// Fetches the instruction word at `ip`.
    ///
    /// # Errors
    ///
    /// The MMU error; fetch faults are counted separately from data faults.
    pub fn fetch(&mut self, ip: u64) -> Result<u32, MemoryError> {
        let res = match self.mode() {
            AddressingMode::Kernel => self.mmu.read_physical_instruction(PhysAddr::new(ip)),
            AddressingMode::User => self.mmu.read_virtual_instruction(VirtAddr::new(ip)),
        };
        if res.is_err() {
            self.stats.fetch_faults += 1;
        }
        res
    }

    /// Loads `width` bytes and extends them to 64 bits.
    ///
    /// # Errors
    ///
    /// As [`Cpu::load`].
    pub fn load_sized(&mut self, width: AccessWidth, addr: u64, signed: bool) -> Result<u64, Interrupt> {
        let raw = match width {
            AccessWidth::Byte => u64::from(self.load::<u8>(addr)?),
            AccessWidth::Quarter => u64::from(self.load::<u16>(addr)?),
            AccessWidth::Half => u64::from(self.load::<u32>(addr)?),
            AccessWidth::Word => self.load::<u64>(addr)?,
        };
        Ok(if signed {
            sign_extend(raw, (width.bytes() * 8) as u32) as u64
        } else {
            raw
        })
    }

    /// Stores the low `width` bytes of `value`.
    ///
    /// # Errors
    ///
    /// As [`Cpu::store`].
    pub fn store_sized(&mut self, width: AccessWidth, addr: u64, value: u64) -> Result<(), Interrupt> {
        match width {
            AccessWidth::Byte => self.store(addr, value as u8),
            AccessWidth::Quarter => self.store(addr, value as u16),
            AccessWidth::Half => self.store(addr, value as u32),
            AccessWidth::Word => self.store(addr, value),
        }
    }

    /// Pushes a value: SP is decremented by 8, then the value is stored at SP.
    ///
    /// # Errors
    ///
    /// The store's interrupt; SP is unchanged on failure.
    pub fn push(&mut self, value: u64) -> Result<(), Interrupt> {
        let sp = self.regs.read(Register::Sp).wrapping_sub(STACK_SLOT_SIZE);
        self.store(sp, value)?;
        self.regs.write(Register::Sp, sp);
        Ok(())
    }

    /// Pops a value, raising `StackUnderflow` when SP has reached FP.
    ///
    /// # Errors
    ///
    /// `StackUnderflow` or the load's interrupt; SP is unchanged on failure.
    pub fn pop(&mut self) -> Result<u64, Interrupt> {
        let sp = self.regs.read(Register::Sp);
        if sp >= self.regs.read(Register::Fp) {
            return Err(Interrupt::StackUnderflow);
        }
        self.pop_unchecked()
    }

    /// Pops a value without comparing SP with FP.
    ///
    /// # Errors
    ///
    /// The load's interrupt; SP is unchanged on failure.
    pub fn pop_unchecked(&mut self) -> Result<u64, Interrupt> {
        let sp = self.regs.read(Register::Sp);
        let value = self.load::<u64>(sp)?;
        self.regs.write(Register::Sp, sp.wrapping_add(STACK_SLOT_SIZE));
        Ok(value)
    }

    /// Computes `base + 4 * offset`, the target of a word-relative transfer.
    pub const fn word_target(base: u64, offset: i64) -> u64 {
        base.wrapping_add((offset as u64).wrapping_mul(INSTRUCTION_SIZE))
    }
}
