//! Instruction Field Extraction.
//!
//! Pure accessors over a raw 32-bit instruction word. The opcode always occupies
//! bits 0–7; the remaining fields depend on the format, so accessors are grouped
//! into one module per format and the caller selects the format explicitly.
//!
//! 1. **Formats:** `e`, `r`, `m`, `f` and `b` each expose the fields of that layout.
//! 2. **Sign Extension:** `sign_extend` widens an n-bit two's complement field to 64 bits.
//!
//! Accessors never fail. Rejecting malformed encodings is left to the CPU.

/// Bit mask for a 4-bit register or function field.
pub const NIBBLE_MASK: u32 = 0xF;
/// Bit mask for the opcode field (bits 0–7).
pub const OPCODE_MASK: u32 = 0xFF;

/// Extracts the opcode (bits 0–7).
#[inline(always)]
pub const fn opcode(raw: u32) -> u8 {
    (raw & OPCODE_MASK) as u8
}

#[inline(always)]
const fn field(raw: u32, lsb: u32, width: u32) -> u32 {
    (raw >> lsb) & ((1 << width) - 1)
}

/// Sign-extends the low `bits` bits of `value` to 64 bits.
///
/// # Arguments
///
/// * `value` - Field value; bits at and above `bits` are ignored.
/// * `bits` - Width of the field, 1 to 64.
#[inline(always)]
pub const fn sign_extend(value: u64, bits: u32) -> i64 {
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// Sign-extends a 20-bit field, as used by B-format branch offsets.
#[inline(always)]
pub const fn sign_extend20(value: u32) -> i64 {
    sign_extend(value as u64, 20)
}

/// E-format: `imm 8:8, func 16:4, rs2 20:4, rs1 24:4, rde 28:4`.
pub mod e {
    use super::{NIBBLE_MASK, field};

    /// 8-bit immediate (bits 8–15).
    #[inline(always)]
    pub const fn imm(raw: u32) -> u32 {
        field(raw, 8, 8)
    }

    /// Function field (bits 16–19).
    #[inline(always)]
    pub const fn func(raw: u32) -> u32 {
        (raw >> 16) & NIBBLE_MASK
    }

    /// Second source register (bits 20–23).
    #[inline(always)]
    pub const fn rs2(raw: u32) -> u32 {
        (raw >> 20) & NIBBLE_MASK
    }

    /// First source register (bits 24–27).
    #[inline(always)]
    pub const fn rs1(raw: u32) -> u32 {
        (raw >> 24) & NIBBLE_MASK
    }

    /// Destination register (bits 28–31).
    #[inline(always)]
    pub const fn rde(raw: u32) -> u32 {
        (raw >> 28) & NIBBLE_MASK
    }
}

/// R-format: `imm 8:12, rs2 20:4, rs1 24:4, rde 28:4`.
pub mod r {
    use super::{NIBBLE_MASK, field};

    /// 12-bit immediate (bits 8–19), unused by most instructions.
    #[inline(always)]
    pub const fn imm(raw: u32) -> u32 {
        field(raw, 8, 12)
    }

    /// Second source register (bits 20–23).
    #[inline(always)]
    pub const fn rs2(raw: u32) -> u32 {
        (raw >> 20) & NIBBLE_MASK
    }

    /// First source register (bits 24–27).
    #[inline(always)]
    pub const fn rs1(raw: u32) -> u32 {
        (raw >> 24) & NIBBLE_MASK
    }

    /// Destination register (bits 28–31).
    #[inline(always)]
    pub const fn rde(raw: u32) -> u32 {
        (raw >> 28) & NIBBLE_MASK
    }
}

/// M-format: `imm 8:16, rs1 24:4, rde 28:4`.
pub mod m {
    use super::{NIBBLE_MASK, field};

    /// 16-bit immediate (bits 8–23).
    #[inline(always)]
    pub const fn imm(raw: u32) -> u32 {
        field(raw, 8, 16)
    }

    /// Source register (bits 24–27).
    #[inline(always)]
    pub const fn rs1(raw: u32) -> u32 {
        (raw >> 24) & NIBBLE_MASK
    }

    /// Destination register (bits 28–31).
    #[inline(always)]
    pub const fn rde(raw: u32) -> u32 {
        (raw >> 28) & NIBBLE_MASK
    }
}

/// F-format: `imm 8:16, func 24:4, rde 28:4`.
pub mod f {
    use super::{NIBBLE_MASK, field};

    /// 16-bit immediate (bits 8–23).
    #[inline(always)]
    pub const fn imm(raw: u32) -> u32 {
        field(raw, 8, 16)
    }

    /// Function field (bits 24–27).
    #[inline(always)]
    pub const fn func(raw: u32) -> u32 {
        (raw >> 24) & NIBBLE_MASK
    }

    /// Destination register (bits 28–31).
    #[inline(always)]
    pub const fn rde(raw: u32) -> u32 {
        (raw >> 28) & NIBBLE_MASK
    }
}

/// B-format: `imm 8:20, func 28:4`.
pub mod b {
    use super::{NIBBLE_MASK, field};

    /// 20-bit immediate (bits 8–27).
    #[inline(always)]
    pub const fn imm(raw: u32) -> u32 {
        field(raw, 8, 20)
    }

    /// Function field (bits 28–31).
    #[inline(always)]
    pub const fn func(raw: u32) -> u32 {
        (raw >> 28) & NIBBLE_MASK
    }
}
