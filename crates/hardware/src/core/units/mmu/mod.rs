//! Memory Management Unit (MMU).
//!
//! This module implements the MMU, which owns physical memory and mediates every
//! access to it. It provides:
//! 1. **Physical Access:** Bounds- and alignment-checked typed reads and writes.
//! 2. **Virtual Access:** Translation through the page table walker, then physical access.
//! 3. **Instruction Fetch:** 32-bit reads, requiring Execute permission when translated.
//!
//! Every operation returns `Result<T, MemoryError>`; a failed operation never touches
//! memory. Tooling that needs the legacy poison values can use [`value_or_poison`].

/// Five-level page table walker.
pub mod ptw;

use crate::common::{MemoryError, MemoryResult, Permissions, PhysAddr, VirtAddr};
use crate::soc::memory::PhysicalMemory;

mod sealed {
    pub trait Sealed {}
}

/// An integer width the MMU can read and write.
pub trait Width: Copy + sealed::Sealed {
    /// Size in bytes; also the required alignment.
    const BYTES: usize;

    /// Value returned by [`value_or_poison`] on failure: `0xAA` in every byte.
    const POISON: Self;

    /// Decodes a little-endian value from exactly `BYTES` bytes.
    fn from_le_slice(bytes: &[u8]) -> Self;

    /// Encodes the value little-endian into exactly `BYTES` bytes.
    fn write_le_slice(self, dest: &mut [u8]);
}

macro_rules! impl_width {
    ($($ty:ty => $poison:expr),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Width for $ty {
                const BYTES: usize = std::mem::size_of::<$ty>();
                const POISON: Self = $poison;

                #[inline]
                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut buf = [0u8; std::mem::size_of::<$ty>()];
                    buf.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(buf)
                }

                #[inline]
                fn write_le_slice(self, dest: &mut [u8]) {
                    dest.copy_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_width! {
    u8 => 0xAA,
    u16 => 0xAAAA,
    u32 => 0xAAAA_AAAA,
    u64 => 0xAAAA_AAAA_AAAA_AAAA,
}

/// Splits a memory result into a value and a result code.
///
/// On failure the value is [`Width::POISON`] and must not be trusted.
pub fn value_or_poison<T: Width>(result: Result<T, MemoryError>) -> (T, MemoryResult) {
    match result {
        Ok(v) => (v, MemoryResult::Ok),
        Err(e) => (T::POISON, e.into()),
    }
}

/// Memory Management Unit.
///
/// Owns the physical buffer and the physical base of the level 1 page table.
#[derive(Debug)]
pub struct Mmu {
    memory: PhysicalMemory,
    page_table_base: u64,
}

macro_rules! named_accessors {
    ($($ty:ty: $rp:ident, $wp:ident, $rv:ident, $wv:ident;)*) => {
        $(
            #[doc = concat!("Reads a `", stringify!($ty), "` from a physical address.")]
            #[inline]
            pub fn $rp(&self, addr: PhysAddr) -> Result<$ty, MemoryError> {
                self.read_physical(addr)
            }

            #[doc = concat!("Writes a `", stringify!($ty), "` to a physical address.")]
            #[inline]
            pub fn $wp(&mut self, addr: PhysAddr, val: $ty) -> Result<(), MemoryError> {
                self.write_physical(addr, val)
            }

            #[doc = concat!("Reads a `", stringify!($ty), "` from a virtual address (Read permission).")]
            #[inline]
            pub fn $rv(&self, addr: VirtAddr) -> Result<$ty, MemoryError> {
                self.read_virtual(addr)
            }

            #[doc = concat!("Writes a `", stringify!($ty), "` to a virtual address (Write permission).")]
            #[inline]
            pub fn $wv(&mut self, addr: VirtAddr, val: $ty) -> Result<(), MemoryError> {
                self.write_virtual(addr, val)
            }
        )*
    };
}

impl Mmu {
    /// Creates an MMU over `memory` with the given page-table base.
    pub const fn new(memory: PhysicalMemory, page_table_base: u64) -> Self {
        Self {
            memory,
            page_table_base,
        }
    }

    /// Returns the physical memory.
    pub const fn memory(&self) -> &PhysicalMemory {
        &self.memory
    }

    /// Returns the physical memory mutably (used by the loader).
    pub const fn memory_mut(&mut self) -> &mut PhysicalMemory {
        &mut self.memory
    }

    /// Returns the size of physical memory; every valid address is below it.
    pub const fn memory_limit(&self) -> u64 {
        self.memory.len() as u64
    }

    /// Returns the physical base of the level 1 page table.
    pub const fn page_table_base(&self) -> u64 {
        self.page_table_base
    }

    /// Sets the physical base of the level 1 page table.
    pub const fn set_page_table_base(&mut self, base: u64) {
        self.page_table_base = base;
    }

    /// Validates a physical access and returns its byte offset.
    ///
    /// Bounds are checked before alignment: an access is in bounds iff it starts
    /// below the limit and ends at or below it.
    #[inline]
    fn check(&self, addr: PhysAddr, bytes: usize) -> Result<usize, MemoryError> {
        let a = addr.val();
        let limit = self.memory_limit();
        if a >= limit || limit - a < bytes as u64 {
            return Err(MemoryError::Bus);
        }
        if a % bytes as u64 != 0 {
            return Err(MemoryError::Unaligned);
        }
        Ok(a as usize)
    }

    /// Reads a value from physical memory.
    ///
    /// # Errors
    ///
    /// [`MemoryError::Bus`] if out of bounds, else [`MemoryError::Unaligned`] if
    /// `addr` is not a multiple of the width.
    #[inline]
    pub fn read_physical<T: Width>(&self, addr: PhysAddr) -> Result<T, MemoryError> {
        let off = self.check(addr, T::BYTES)?;
        self.memory
            .as_slice()
            .get(off..off + T::BYTES)
            .map(T::from_le_slice)
            .ok_or(MemoryError::Bus)
    }

    /// Writes a value to physical memory.
    ///
    /// # Errors
    ///
    /// As [`Mmu::read_physical`]; memory is unmodified on error.
    #[inline]
    pub fn write_physical<T: Width>(&mut self, addr: PhysAddr, val: T) -> Result<(), MemoryError> {
        let off = self.check(addr, T::BYTES)?;
        let dest = self
            .memory
            .as_mut_slice()
            .get_mut(off..off + T::BYTES)
            .ok_or(MemoryError::Bus)?;
        val.write_le_slice(dest);
        Ok(())
    }

    /// Translates a virtual address, checking `required` permissions.
    ///
    /// # Errors
    ///
    /// The level-specific unmapped error, [`MemoryError::AccessViolation`], or any
    /// physical error raised while reading page-directory entries.
    pub fn translate(
        &self,
        vaddr: VirtAddr,
        required: Permissions,
    ) -> Result<PhysAddr, MemoryError> {
        ptw::walk(self, vaddr, required)
    }

    /// Reads a value through translation with Read permission.
    ///
    /// # Errors
    ///
    /// Translation errors unchanged, then physical errors at the translated address.
    #[inline]
    pub fn read_virtual<T: Width>(&self, addr: VirtAddr) -> Result<T, MemoryError> {
        let paddr = self.translate(addr, Permissions::READ)?;
        self.read_physical(paddr)
    }

    /// Writes a value through translation with Write permission.
    ///
    /// # Errors
    ///
    /// As [`Mmu::read_virtual`]; memory is unmodified on error.
    #[inline]
    pub fn write_virtual<T: Width>(&mut self, addr: VirtAddr, val: T) -> Result<(), MemoryError> {
        let paddr = self.translate(addr, Permissions::WRITE)?;
        self.write_physical(paddr, val)
    }

    /// Fetches an instruction word from a physical address.
    ///
    /// # Errors
    ///
    /// As [`Mmu::read_physical`].
    #[inline]
    pub fn read_physical_instruction(&self, addr: PhysAddr) -> Result<u32, MemoryError> {
        self.read_physical(addr)
    }

    /// Fetches an instruction word through translation with Execute permission.
    ///
    /// # Errors
    ///
    /// As [`Mmu::read_virtual`].
    #[inline]
    pub fn read_virtual_instruction(&self, addr: VirtAddr) -> Result<u32, MemoryError> {
        let paddr = self.translate(addr, Permissions::EXECUTE)?;
        self.read_physical(paddr)
    }

    named_accessors! {
        u8: read_physical_8, write_physical_8, read_virtual_8, write_virtual_8;
        u16: read_physical_16, write_physical_16, read_virtual_16, write_virtual_16;
        u32: read_physical_32, write_physical_32, read_virtual_32, write_virtual_32;
        u64: read_physical_64, write_physical_64, read_virtual_64, write_virtual_64;
    }
}
