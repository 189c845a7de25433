//! Instruction Encoders.
//!
//! Builders that pack fields into raw instruction words. They mirror the field
//! accessors in [`crate::isa::instruction`] and are used to assemble programs in
//! tests and tooling. Out-of-range fields are truncated to their width.

use crate::core::arch::Register;
use crate::isa::opcodes::{AccessWidth, AluOp, BranchCond, LoadImmOp, Opcode, SystemFunc};

const fn nib(value: u32) -> u32 {
    value & 0xF
}

/// Packs an E-format word.
pub const fn format_e(opcode: u8, imm: u8, func: u32, rs2: u32, rs1: u32, rde: u32) -> u32 {
    opcode as u32 | (imm as u32) << 8 | nib(func) << 16 | nib(rs2) << 20 | nib(rs1) << 24 | nib(rde) << 28
}

/// Packs an R-format word.
pub const fn format_r(opcode: u8, imm: u32, rs2: u32, rs1: u32, rde: u32) -> u32 {
    opcode as u32 | (imm & 0xFFF) << 8 | nib(rs2) << 20 | nib(rs1) << 24 | nib(rde) << 28
}

/// Packs an M-format word.
pub const fn format_m(opcode: u8, imm: u16, rs1: u32, rde: u32) -> u32 {
    opcode as u32 | (imm as u32) << 8 | nib(rs1) << 24 | nib(rde) << 28
}

/// Packs an F-format word.
pub const fn format_f(opcode: u8, imm: u16, func: u32, rde: u32) -> u32 {
    opcode as u32 | (imm as u32) << 8 | nib(func) << 24 | nib(rde) << 28
}

/// Packs a B-format word.
pub const fn format_b(opcode: u8, imm: u32, func: u32) -> u32 {
    opcode as u32 | (imm & 0xF_FFFF) << 8 | nib(func) << 28
}

const fn r(reg: Register) -> u32 {
    reg as u32
}

/// `int code`.
pub const fn int(code: u16) -> u32 {
    format_f(Opcode::System.bits(), code, SystemFunc::Int as u32, 0)
}

/// `iret`.
pub const fn iret() -> u32 {
    format_f(Opcode::System.bits(), 0, SystemFunc::Iret as u32, 0)
}

/// `ires`.
pub const fn ires() -> u32 {
    format_f(Opcode::System.bits(), 0, SystemFunc::Ires as u32, 0)
}

/// `usr target`.
pub const fn usr(target: Register) -> u32 {
    format_f(Opcode::System.bits(), 0, SystemFunc::Usr as u32, r(target))
}

/// Branch with condition `cond` and a signed word offset.
pub const fn branch(cond: BranchCond, offset: i32) -> u32 {
    format_b(Opcode::Branch.bits(), offset as u32, cond as u32)
}

/// `bra offset`.
pub const fn bra(offset: i32) -> u32 {
    branch(BranchCond::Always, offset)
}

/// `jal base, offset`.
pub const fn jal(base: Register, offset: i16) -> u32 {
    format_m(Opcode::Jal.bits(), offset as u16, r(base), 0)
}

/// `jalr link, base, offset`.
pub const fn jalr(link: Register, base: Register, offset: i16) -> u32 {
    format_m(Opcode::Jalr.bits(), offset as u16, r(base), r(link))
}

/// `ret`.
pub const fn ret() -> u32 {
    format_m(Opcode::Ret.bits(), 0, 0, 0)
}

/// `retr target`.
pub const fn retr(target: Register) -> u32 {
    format_m(Opcode::Retr.bits(), 0, r(target), 0)
}

/// `push src`.
pub const fn push(src: Register) -> u32 {
    format_m(Opcode::Push.bits(), 0, r(src), 0)
}

/// `pop dst`.
pub const fn pop(dst: Register) -> u32 {
    format_m(Opcode::Pop.bits(), 0, 0, r(dst))
}

/// `enter`.
pub const fn enter() -> u32 {
    format_m(Opcode::Enter.bits(), 0, 0, 0)
}

/// `leave`.
pub const fn leave() -> u32 {
    format_m(Opcode::Leave.bits(), 0, 0, 0)
}

/// `outr port_reg, src`.
pub const fn outr(port: Register, src: Register) -> u32 {
    format_m(Opcode::Outr.bits(), 0, r(src), r(port))
}

/// `ini dst, port`.
pub const fn ini(dst: Register, port: u16) -> u32 {
    format_m(Opcode::Ini.bits(), port, 0, r(dst))
}

/// Immediate load of `imm` into `dst`.
pub const fn load_imm(op: LoadImmOp, dst: Register, imm: u16) -> u32 {
    format_f(Opcode::LoadImm.bits(), imm, op as u32, r(dst))
}

/// Memory load; `disp` is in units of the access width.
pub const fn load(
    width: AccessWidth,
    signed: bool,
    dst: Register,
    base: Register,
    index: Register,
    shift: u32,
    disp: i8,
) -> u32 {
    let opcode = match (width, signed) {
        (AccessWidth::Word, _) => Opcode::Lw,
        (AccessWidth::Half, false) => Opcode::Lh,
        (AccessWidth::Half, true) => Opcode::Lhs,
        (AccessWidth::Quarter, false) => Opcode::Lq,
        (AccessWidth::Quarter, true) => Opcode::Lqs,
        (AccessWidth::Byte, false) => Opcode::Lb,
        (AccessWidth::Byte, true) => Opcode::Lbs,
    };
    format_e(opcode.bits(), disp as u8, shift, r(index), r(base), r(dst))
}

/// Memory store of `src`; `disp` is in units of the access width.
pub const fn store(
    width: AccessWidth,
    src: Register,
    base: Register,
    index: Register,
    shift: u32,
    disp: i8,
) -> u32 {
    let opcode = match width {
        AccessWidth::Word => Opcode::Sw,
        AccessWidth::Half => Opcode::Sh,
        AccessWidth::Quarter => Opcode::Sq,
        AccessWidth::Byte => Opcode::Sb,
    };
    format_e(opcode.bits(), disp as u8, shift, r(index), r(base), r(src))
}

/// `cmpr lhs, rhs`.
pub const fn cmpr(lhs: Register, rhs: Register) -> u32 {
    format_r(Opcode::Cmpr.bits(), 0, r(rhs), r(lhs), 0)
}

/// `cmpi reg, imm`; with `swapped` the immediate is the left operand.
pub const fn cmpi(reg: Register, imm: i16, swapped: bool) -> u32 {
    format_m(Opcode::Cmpi.bits(), imm as u16, r(reg), swapped as u32)
}

/// Register form of an arithmetic or bitwise operation.
pub const fn alu_r(op: AluOp, dst: Register, lhs: Register, rhs: Register) -> u32 {
    format_r(op.register_opcode(), 0, r(rhs), r(lhs), r(dst))
}

/// Immediate form of an arithmetic or bitwise operation.
pub const fn alu_i(op: AluOp, dst: Register, lhs: Register, imm: u16) -> u32 {
    format_m(op.immediate_opcode(), imm, r(lhs), r(dst))
}
