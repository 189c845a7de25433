//! Register Enumeration and Storage.
//!
//! This module implements the architectural register file storage. It performs the following:
//! 1. **Naming:** A closed enumeration of the sixteen architectural registers.
//! 2. **Storage:** Holds the 64-bit value of every register.
//! 3. **Invariant Enforcement:** Ensures that `rz` is hardwired to zero.

/// Number of architectural registers; every 4-bit register field names one.
pub const NUM_REGISTERS: usize = 16;

/// Architectural register.
///
/// The discriminant is the 4-bit encoding used in instruction register fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Register {
    /// Hardwired zero register.
    Rz = 0,
    /// General purpose register A.
    Ra = 1,
    /// General purpose register B.
    Rb = 2,
    /// General purpose register C.
    Rc = 3,
    /// General purpose register D.
    Rd = 4,
    /// General purpose register E.
    Re = 5,
    /// General purpose register F.
    Rf = 6,
    /// General purpose register G.
    Rg = 7,
    /// General purpose register H.
    Rh = 8,
    /// General purpose register I.
    Ri = 9,
    /// General purpose register J.
    Rj = 10,
    /// General purpose register K.
    Rk = 11,
    /// Instruction pointer.
    Ip = 12,
    /// Stack pointer.
    Sp = 13,
    /// Frame pointer.
    Fp = 14,
    /// Status register (flags and addressing mode).
    Status = 15,
}

impl Register {
    /// All registers in encoding order.
    pub const ALL: [Self; NUM_REGISTERS] = [
        Self::Rz,
        Self::Ra,
        Self::Rb,
        Self::Rc,
        Self::Rd,
        Self::Re,
        Self::Rf,
        Self::Rg,
        Self::Rh,
        Self::Ri,
        Self::Rj,
        Self::Rk,
        Self::Ip,
        Self::Sp,
        Self::Fp,
        Self::Status,
    ];

    /// Decodes a register field; only the low four bits are significant.
    #[inline]
    pub const fn from_field(bits: u32) -> Self {
        Self::ALL[(bits & 0xF) as usize]
    }

    /// Returns the register index (its 4-bit encoding).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the assembly name of the register.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rz => "rz",
            Self::Ra => "ra",
            Self::Rb => "rb",
            Self::Rc => "rc",
            Self::Rd => "rd",
            Self::Re => "re",
            Self::Rf => "rf",
            Self::Rg => "rg",
            Self::Rh => "rh",
            Self::Ri => "ri",
            Self::Rj => "rj",
            Self::Rk => "rk",
            Self::Ip => "ip",
            Self::Sp => "sp",
            Self::Fp => "fp",
            Self::Status => "status",
        }
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Register storage.
///
/// Register `rz` always reads as zero; writes to it are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u64; NUM_REGISTERS],
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGISTERS],
        }
    }

    /// Reads a register value. `rz` always returns 0.
    #[inline]
    pub const fn read(&self, reg: Register) -> u64 {
        match reg {
            Register::Rz => 0,
            _ => self.regs[reg.index()],
        }
    }

    /// Writes a register value. Writes to `rz` are ignored.
    #[inline]
    pub const fn write(&mut self, reg: Register, val: u64) {
        if !matches!(reg, Register::Rz) {
            self.regs[reg.index()] = val;
        }
    }
}
