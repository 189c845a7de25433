//! Halley Instruction Decoder.
//!
//! Turns a raw 32-bit word into a typed [`Instruction`]. The decoder performs the
//! following:
//! 1. **Opcode Selection:** Looks up the primary opcode and its format.
//! 2. **Field Extraction:** Pulls register and function fields through the format accessors.
//! 3. **Immediate Shaping:** Applies the per-instruction sign or zero extension so the
//!    executor only ever sees final operand values.
//!
//! Unassigned opcodes and function codes decode to `None`; the CPU turns that into an
//! invalid-operation interrupt.

use crate::core::arch::Register;
use crate::isa::instruction::{b, e, f, m, opcode, r, sign_extend, sign_extend20};
use crate::isa::opcodes::{AccessWidth, AluOp, BranchCond, Format, LoadImmOp, Opcode, SystemFunc};

/// Second operand of a compare or arithmetic instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Value of a register.
    Reg(Register),
    /// Already-extended immediate.
    Imm(u64),
}

/// Port selector of the port I/O family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Port {
    /// Port number held in a register.
    Reg(Register),
    /// Port number encoded as an immediate.
    Imm(u16),
}

/// Fully decoded instruction.
///
/// Offsets of `jal`, `jalr` and branches are in instruction words; displacements of
/// loads and stores are in units of the access width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `int imm`: raise interrupt `code`.
    Int {
        /// Interrupt vector.
        code: u16,
    },
    /// `iret`: return from the interrupt in service.
    Iret,
    /// `ires`: resolve the interrupt in service without returning.
    Ires,
    /// `usr rde`: enter user mode at the address in `target`.
    Usr {
        /// Register holding the entry address.
        target: Register,
    },
    /// `outr` / `outi`: write `src` to a port.
    Out {
        /// Destination port.
        port: Port,
        /// Register holding the value.
        src: Register,
    },
    /// `inr` / `ini`: read a port into `dst`.
    In {
        /// Source port.
        port: Port,
        /// Destination register.
        dst: Register,
    },
    /// `jal rs1, imm`: push IP and jump to `base + 4 * offset`.
    Jal {
        /// Base register.
        base: Register,
        /// Word offset.
        offset: i64,
    },
    /// `jalr rde, rs1, imm`: link into `link` and jump to `base + 4 * offset`.
    Jalr {
        /// Link register.
        link: Register,
        /// Base register.
        base: Register,
        /// Word offset.
        offset: i64,
    },
    /// `ret`: pop IP.
    Ret,
    /// `retr rs1`: jump to the address in `target`.
    Retr {
        /// Register holding the return address.
        target: Register,
    },
    /// Conditional or unconditional IP-relative branch.
    Branch {
        /// Condition over the status flags.
        cond: BranchCond,
        /// Word offset, relative to the address after the branch.
        offset: i64,
    },
    /// `push rs1`.
    Push {
        /// Register to push.
        src: Register,
    },
    /// `pop rde`.
    Pop {
        /// Register receiving the value.
        dst: Register,
    },
    /// `enter`: push FP and set FP = SP.
    Enter,
    /// `leave`: set SP = FP and pop FP.
    Leave,
    /// Immediate load into one quarter of `dst`.
    LoadImm {
        /// Variant.
        op: LoadImmOp,
        /// Destination register.
        dst: Register,
        /// Raw 16-bit immediate.
        imm: u16,
    },
    /// Memory load.
    Load {
        /// Access width.
        width: AccessWidth,
        /// Sign-extend the loaded value.
        signed: bool,
        /// Destination register.
        dst: Register,
        /// Base register.
        base: Register,
        /// Index register.
        index: Register,
        /// Left shift applied to the index.
        shift: u32,
        /// Displacement in units of `width`.
        disp: i64,
    },
    /// Memory store of `src`.
    Store {
        /// Access width.
        width: AccessWidth,
        /// Register holding the value.
        src: Register,
        /// Base register.
        base: Register,
        /// Index register.
        index: Register,
        /// Left shift applied to the index.
        shift: u32,
        /// Displacement in units of `width`.
        disp: i64,
    },
    /// `cmpr` / `cmpi`: set the condition flags from `lhs - rhs`.
    Cmp {
        /// Left operand.
        lhs: Operand,
        /// Right operand.
        rhs: Operand,
    },
    /// Arithmetic or bitwise operation.
    Alu {
        /// Operation.
        op: AluOp,
        /// Destination register.
        dst: Register,
        /// Left operand register.
        lhs: Register,
        /// Right operand.
        rhs: Operand,
    },
}

#[inline]
const fn reg(bits: u32) -> Register {
    Register::from_field(bits)
}

#[inline]
const fn sext16(imm: u32) -> i64 {
    sign_extend(imm as u64, 16)
}

/// Decodes a raw instruction word.
///
/// # Arguments
///
/// * `raw` - The 32-bit instruction as fetched from memory.
///
/// # Returns
///
/// The typed instruction, or `None` if the opcode or a function field is unassigned.
pub fn decode(raw: u32) -> Option<Instruction> {
    let op = Opcode::from_u8(opcode(raw))?;
    let inst = match op {
        Opcode::System => match SystemFunc::from_bits(f::func(raw))? {
            SystemFunc::Int => Instruction::Int {
                code: f::imm(raw) as u16,
            },
            SystemFunc::Iret => Instruction::Iret,
            SystemFunc::Ires => Instruction::Ires,
            SystemFunc::Usr => Instruction::Usr {
                target: reg(f::rde(raw)),
            },
        },
        Opcode::Outr => Instruction::Out {
            port: Port::Reg(reg(m::rde(raw))),
            src: reg(m::rs1(raw)),
        },
        Opcode::Outi => Instruction::Out {
            port: Port::Imm(m::imm(raw) as u16),
            src: reg(m::rs1(raw)),
        },
        Opcode::Inr => Instruction::In {
            port: Port::Reg(reg(m::rs1(raw))),
            dst: reg(m::rde(raw)),
        },
        Opcode::Ini => Instruction::In {
            port: Port::Imm(m::imm(raw) as u16),
            dst: reg(m::rde(raw)),
        },
        Opcode::Jal => Instruction::Jal {
            base: reg(m::rs1(raw)),
            offset: sext16(m::imm(raw)),
        },
        Opcode::Jalr => Instruction::Jalr {
            link: reg(m::rde(raw)),
            base: reg(m::rs1(raw)),
            offset: sext16(m::imm(raw)),
        },
        Opcode::Ret => Instruction::Ret,
        Opcode::Retr => Instruction::Retr {
            target: reg(m::rs1(raw)),
        },
        Opcode::Branch => Instruction::Branch {
            cond: BranchCond::from_bits(b::func(raw))?,
            offset: sign_extend20(b::imm(raw)),
        },
        Opcode::Push => Instruction::Push {
            src: reg(m::rs1(raw)),
        },
        Opcode::Pop => Instruction::Pop {
            dst: reg(m::rde(raw)),
        },
        Opcode::Enter => Instruction::Enter,
        Opcode::Leave => Instruction::Leave,
        Opcode::LoadImm => Instruction::LoadImm {
            op: LoadImmOp::from_bits(f::func(raw))?,
            dst: reg(f::rde(raw)),
            imm: f::imm(raw) as u16,
        },
        Opcode::Lw => load(raw, AccessWidth::Word, false),
        Opcode::Lh => load(raw, AccessWidth::Half, false),
        Opcode::Lhs => load(raw, AccessWidth::Half, true),
        Opcode::Lq => load(raw, AccessWidth::Quarter, false),
        Opcode::Lqs => load(raw, AccessWidth::Quarter, true),
        Opcode::Lb => load(raw, AccessWidth::Byte, false),
        Opcode::Lbs => load(raw, AccessWidth::Byte, true),
        Opcode::Sw => store(raw, AccessWidth::Word),
        Opcode::Sh => store(raw, AccessWidth::Half),
        Opcode::Sq => store(raw, AccessWidth::Quarter),
        Opcode::Sb => store(raw, AccessWidth::Byte),
        Opcode::Cmpr => Instruction::Cmp {
            lhs: Operand::Reg(reg(r::rs1(raw))),
            rhs: Operand::Reg(reg(r::rs2(raw))),
        },
        Opcode::Cmpi => {
            let rs1 = Operand::Reg(reg(m::rs1(raw)));
            let imm = Operand::Imm(sext16(m::imm(raw)) as u64);
            // The rde field selects the operand order.
            match m::rde(raw) {
                0 => Instruction::Cmp { lhs: rs1, rhs: imm },
                1 => Instruction::Cmp { lhs: imm, rhs: rs1 },
                _ => return None,
            }
        }
        _ => {
            let alu = AluOp::from_opcode(op)?;
            if op.format() == Format::R {
                Instruction::Alu {
                    op: alu,
                    dst: reg(r::rde(raw)),
                    lhs: reg(r::rs1(raw)),
                    rhs: Operand::Reg(reg(r::rs2(raw))),
                }
            } else {
                let imm = m::imm(raw);
                let value = if alu.sign_extends_immediate() {
                    sext16(imm) as u64
                } else {
                    u64::from(imm)
                };
                Instruction::Alu {
                    op: alu,
                    dst: reg(m::rde(raw)),
                    lhs: reg(m::rs1(raw)),
                    rhs: Operand::Imm(value),
                }
            }
        }
    };
    Some(inst)
}

fn load(raw: u32, width: AccessWidth, signed: bool) -> Instruction {
    Instruction::Load {
        width,
        signed,
        dst: reg(e::rde(raw)),
        base: reg(e::rs1(raw)),
        index: reg(e::rs2(raw)),
        shift: e::func(raw),
        disp: sign_extend(u64::from(e::imm(raw)), 8),
    }
}

fn store(raw: u32, width: AccessWidth) -> Instruction {
    Instruction::Store {
        width,
        src: reg(e::rde(raw)),
        base: reg(e::rs1(raw)),
        index: reg(e::rs2(raw)),
        shift: e::func(raw),
        disp: sign_extend(u64::from(e::imm(raw)), 8),
    }
}
