//! Opcode and Secondary Function Tables.
//!
//! Closed enumerations for the primary opcode space and for every instruction family
//! that carries a secondary function field. Numeric conversions return `None` for
//! unassigned encodings; rejecting them is the CPU's job, not the decoder's.

/// Instruction format selected by the opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// `imm 8:8, func 16:4, rs2 20:4, rs1 24:4, rde 28:4`
    E,
    /// `imm 8:12, rs2 20:4, rs1 24:4, rde 28:4`
    R,
    /// `imm 8:16, rs1 24:4, rde 28:4`
    M,
    /// `imm 8:16, func 24:4, rde 28:4`
    F,
    /// `imm 8:20, func 28:4`
    B,
}

/// Primary opcode (bits 0–7 of an instruction).
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    System = 0x01,
    Outr = 0x02,
    Outi = 0x03,
    Inr = 0x04,
    Ini = 0x05,
    Jal = 0x06,
    Jalr = 0x07,
    Ret = 0x08,
    Retr = 0x09,
    Branch = 0x0A,
    Push = 0x0B,
    Pop = 0x0C,
    Enter = 0x0D,
    Leave = 0x0E,
    LoadImm = 0x10,
    Lw = 0x11,
    Lh = 0x12,
    Lhs = 0x13,
    Lq = 0x14,
    Lqs = 0x15,
    Lb = 0x16,
    Lbs = 0x17,
    Sw = 0x18,
    Sh = 0x19,
    Sq = 0x1A,
    Sb = 0x1B,
    Cmpr = 0x1E,
    Cmpi = 0x1F,
    Addr = 0x20,
    Addi = 0x21,
    Subr = 0x22,
    Subi = 0x23,
    Imulr = 0x24,
    Imuli = 0x25,
    Idivr = 0x26,
    Idivi = 0x27,
    Umulr = 0x28,
    Umuli = 0x29,
    Udivr = 0x2A,
    Udivi = 0x2B,
    Remr = 0x2C,
    Remi = 0x2D,
    Modr = 0x2E,
    Modi = 0x2F,
    Andr = 0x30,
    Andi = 0x31,
    Orr = 0x32,
    Ori = 0x33,
    Norr = 0x34,
    Nori = 0x35,
    Xorr = 0x36,
    Xori = 0x37,
    Shlr = 0x38,
    Shli = 0x39,
    Asrr = 0x3A,
    Asri = 0x3B,
    Lsrr = 0x3C,
    Lsri = 0x3D,
    Bitr = 0x3E,
    Biti = 0x3F,
}

impl Opcode {
    /// Converts a raw opcode byte, returning `None` for unassigned opcodes.
    pub const fn from_u8(byte: u8) -> Option<Self> {
        Some(match byte {
            0x01 => Self::System,
            0x02 => Self::Outr,
            0x03 => Self::Outi,
            0x04 => Self::Inr,
            0x05 => Self::Ini,
            0x06 => Self::Jal,
            0x07 => Self::Jalr,
            0x08 => Self::Ret,
            0x09 => Self::Retr,
            0x0A => Self::Branch,
            0x0B => Self::Push,
            0x0C => Self::Pop,
            0x0D => Self::Enter,
            0x0E => Self::Leave,
            0x10 => Self::LoadImm,
            0x11 => Self::Lw,
            0x12 => Self::Lh,
            0x13 => Self::Lhs,
            0x14 => Self::Lq,
            0x15 => Self::Lqs,
            0x16 => Self::Lb,
            0x17 => Self::Lbs,
            0x18 => Self::Sw,
            0x19 => Self::Sh,
            0x1A => Self::Sq,
            0x1B => Self::Sb,
            0x1E => Self::Cmpr,
            0x1F => Self::Cmpi,
            0x20 => Self::Addr,
            0x21 => Self::Addi,
            0x22 => Self::Subr,
            0x23 => Self::Subi,
            0x24 => Self::Imulr,
            0x25 => Self::Imuli,
            0x26 => Self::Idivr,
            0x27 => Self::Idivi,
            0x28 => Self::Umulr,
            0x29 => Self::Umuli,
            0x2A => Self::Udivr,
            0x2B => Self::Udivi,
            0x2C => Self::Remr,
            0x2D => Self::Remi,
            0x2E => Self::Modr,
            0x2F => Self::Modi,
            0x30 => Self::Andr,
            0x31 => Self::Andi,
            0x32 => Self::Orr,
            0x33 => Self::Ori,
            0x34 => Self::Norr,
            0x35 => Self::Nori,
            0x36 => Self::Xorr,
            0x37 => Self::Xori,
            0x38 => Self::Shlr,
            0x39 => Self::Shli,
            0x3A => Self::Asrr,
            0x3B => Self::Asri,
            0x3C => Self::Lsrr,
            0x3D => Self::Lsri,
            0x3E => Self::Bitr,
            0x3F => Self::Biti,
            _ => return None,
        })
    }

    /// Returns the raw opcode byte.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Returns the format the opcode's remaining bits are laid out in.
    pub const fn format(self) -> Format {
        match self {
            Self::System | Self::LoadImm => Format::F,
            Self::Branch => Format::B,
            Self::Lw
            | Self::Lh
            | Self::Lhs
            | Self::Lq
            | Self::Lqs
            | Self::Lb
            | Self::Lbs
            | Self::Sw
            | Self::Sh
            | Self::Sq
            | Self::Sb => Format::E,
            // Register forms of the arithmetic and bitwise families sit on even opcodes.
            op if op.bits() >= 0x20 && op.bits() % 2 == 0 => Format::R,
            _ => Format::M,
        }
    }
}

/// Secondary function of the system control family (opcode 0x01, F-format).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SystemFunc {
    /// Trigger interrupt `imm`.
    Int = 0x0,
    /// Return from interrupt.
    Iret = 0x1,
    /// Resolve the interrupt in service.
    Ires = 0x2,
    /// Enter user mode at the address in `rde`.
    Usr = 0x3,
}

impl SystemFunc {
    /// Converts a func field, returning `None` for unassigned values.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            0x0 => Some(Self::Int),
            0x1 => Some(Self::Iret),
            0x2 => Some(Self::Ires),
            0x3 => Some(Self::Usr),
            _ => None,
        }
    }
}

/// Branch condition (opcode 0x0A, B-format func field).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BranchCond {
    /// Always.
    Always = 0x0,
    /// `Equal` set.
    Equal = 0x1,
    /// `Zero` set.
    Zero = 0x2,
    /// `Less` set.
    Less = 0x3,
    /// `Less` or `Equal` set.
    LessEqual = 0x4,
    /// `LessUnsigned` set.
    LessUnsigned = 0x5,
    /// `LessUnsigned` or `Equal` set.
    LessEqualUnsigned = 0x6,
    /// `Equal` clear.
    NotEqual = 0x9,
    /// `Zero` clear.
    NotZero = 0xA,
    /// `Less` clear.
    GreaterEqual = 0xB,
    /// `Less` and `Equal` both clear.
    Greater = 0xC,
    /// `LessUnsigned` clear.
    GreaterEqualUnsigned = 0xD,
    /// `LessUnsigned` and `Equal` both clear.
    GreaterUnsigned = 0xE,
}

impl BranchCond {
    /// Converts a func field, returning `None` for 0x7, 0x8 and 0xF.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        Some(match bits {
            0x0 => Self::Always,
            0x1 => Self::Equal,
            0x2 => Self::Zero,
            0x3 => Self::Less,
            0x4 => Self::LessEqual,
            0x5 => Self::LessUnsigned,
            0x6 => Self::LessEqualUnsigned,
            0x9 => Self::NotEqual,
            0xA => Self::NotZero,
            0xB => Self::GreaterEqual,
            0xC => Self::Greater,
            0xD => Self::GreaterEqualUnsigned,
            0xE => Self::GreaterUnsigned,
            _ => return None,
        })
    }

    /// Returns the assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Always => "bra",
            Self::Equal => "beq",
            Self::Zero => "bez",
            Self::Less => "blt",
            Self::LessEqual => "ble",
            Self::LessUnsigned => "bltu",
            Self::LessEqualUnsigned => "bleu",
            Self::NotEqual => "bne",
            Self::NotZero => "bnz",
            Self::GreaterEqual => "bge",
            Self::Greater => "bgt",
            Self::GreaterEqualUnsigned => "bgeu",
            Self::GreaterUnsigned => "bgtu",
        }
    }
}

/// Immediate-load variant (opcode 0x10, F-format func field).
///
/// Even funcs insert the raw 16 bits into one quarter of `rde`; odd funcs load the
/// sign-extended immediate shifted into that quarter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LoadImmOp {
    /// `lli`: bits 0–15.
    Lli = 0x0,
    /// `llis`: sign-extended imm.
    Llis = 0x1,
    /// `lui`: bits 16–31.
    Lui = 0x2,
    /// `luis`: sign-extended imm << 16.
    Luis = 0x3,
    /// `lti`: bits 32–47.
    Lti = 0x4,
    /// `ltis`: sign-extended imm << 32.
    Ltis = 0x5,
    /// `ltui`: bits 48–63.
    Ltui = 0x6,
    /// `ltuis`: sign-extended imm << 48.
    Ltuis = 0x7,
}

impl LoadImmOp {
    /// Converts a func field, returning `None` for 8–15.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        Some(match bits {
            0x0 => Self::Lli,
            0x1 => Self::Llis,
            0x2 => Self::Lui,
            0x3 => Self::Luis,
            0x4 => Self::Lti,
            0x5 => Self::Ltis,
            0x6 => Self::Ltui,
            0x7 => Self::Ltuis,
            _ => return None,
        })
    }

    /// Bit position of the 16-bit quarter this variant targets.
    pub const fn shift(self) -> u32 {
        ((self as u32) >> 1) * 16
    }

    /// Returns true for the sign-extending variants.
    pub const fn is_signed(self) -> bool {
        (self as u8) & 1 == 1
    }

    /// Returns the assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Lli => "lli",
            Self::Llis => "llis",
            Self::Lui => "lui",
            Self::Luis => "luis",
            Self::Lti => "lti",
            Self::Ltis => "ltis",
            Self::Ltui => "ltui",
            Self::Ltuis => "ltuis",
        }
    }
}

/// Operation of the arithmetic and bitwise families (opcodes 0x20–0x3F).
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    Add,
    Sub,
    Imul,
    Idiv,
    Umul,
    Udiv,
    Rem,
    Mod,
    And,
    Or,
    Nor,
    Xor,
    Shl,
    Asr,
    Lsr,
    Bit,
}

impl AluOp {
    /// Operations in opcode order; opcode `0x20 + 2 * i` (register) and
    /// `0x21 + 2 * i` (immediate) select entry `i`.
    pub const ALL: [Self; 16] = [
        Self::Add,
        Self::Sub,
        Self::Imul,
        Self::Idiv,
        Self::Umul,
        Self::Udiv,
        Self::Rem,
        Self::Mod,
        Self::And,
        Self::Or,
        Self::Nor,
        Self::Xor,
        Self::Shl,
        Self::Asr,
        Self::Lsr,
        Self::Bit,
    ];

    /// Maps an opcode in 0x20–0x3F to its operation.
    pub const fn from_opcode(opcode: Opcode) -> Option<Self> {
        let bits = opcode.bits();
        if !matches!(bits, 0x20..=0x3F) {
            return None;
        }
        Some(Self::ALL[((bits - 0x20) / 2) as usize])
    }

    /// Register-form opcode of this operation.
    pub const fn register_opcode(self) -> u8 {
        0x20 + 2 * (self as u8)
    }

    /// Immediate-form opcode of this operation.
    pub const fn immediate_opcode(self) -> u8 {
        self.register_opcode() + 1
    }

    /// Returns true if the immediate form sign-extends its 16-bit immediate.
    ///
    /// Arithmetic sign-extends; bitwise, shift and bit-test zero-extend.
    pub const fn sign_extends_immediate(self) -> bool {
        matches!(
            self,
            Self::Add
                | Self::Sub
                | Self::Imul
                | Self::Idiv
                | Self::Umul
                | Self::Udiv
                | Self::Rem
                | Self::Mod
        )
    }

    /// Returns the mnemonic stem (without the `r`/`i` suffix).
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Imul => "imul",
            Self::Idiv => "idiv",
            Self::Umul => "umul",
            Self::Udiv => "udiv",
            Self::Rem => "rem",
            Self::Mod => "mod",
            Self::And => "and",
            Self::Or => "or",
            Self::Nor => "nor",
            Self::Xor => "xor",
            Self::Shl => "shl",
            Self::Asr => "asr",
            Self::Lsr => "lsr",
            Self::Bit => "bit",
        }
    }
}

/// Width of a load or store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessWidth {
    /// 1 byte.
    Byte,
    /// 2 bytes (quarter-word).
    Quarter,
    /// 4 bytes (half-word).
    Half,
    /// 8 bytes (word).
    Word,
}

impl AccessWidth {
    /// Size of the access in bytes; also the displacement scale.
    pub const fn bytes(self) -> u64 {
        match self {
            Self::Byte => 1,
            Self::Quarter => 2,
            Self::Half => 4,
            Self::Word => 8,
        }
    }

    /// Mnemonic suffix letter.
    pub const fn suffix(self) -> char {
        match self {
            Self::Byte => 'b',
            Self::Quarter => 'q',
            Self::Half => 'h',
            Self::Word => 'w',
        }
    }
}
