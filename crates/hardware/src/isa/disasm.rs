//! Instruction Disassembler.
//!
//! Converts a 32-bit instruction word into assembly text for instruction tracing,
//! the CLI's `disasm` command and test diagnostics.
//!
//! # Usage
//!
//! ```
//! use hlsim_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x0000_030A), "bra 3");
//! ```

use std::fmt::Write;

use crate::isa::decode::{Instruction, Operand, Port, decode};

fn operand(op: Operand) -> String {
    match op {
        Operand::Reg(r) => r.name().to_owned(),
        Operand::Imm(v) => format!("{}", v as i64),
    }
}

fn port(p: Port) -> String {
    match p {
        Port::Reg(r) => r.name().to_owned(),
        Port::Imm(v) => format!("{v:#x}"),
    }
}

/// Disassembles a 32-bit instruction word.
///
/// Returns a string like `"addr ra, rb, rc"`, or `".word 0x...."` for words that do
/// not decode.
pub fn disassemble(raw: u32) -> String {
    let Some(inst) = decode(raw) else {
        return format!(".word {raw:#010x}");
    };
    match inst {
        Instruction::Int { code } => format!("int {code}"),
        Instruction::Iret => "iret".to_owned(),
        Instruction::Ires => "ires".to_owned(),
        Instruction::Usr { target } => format!("usr {target}"),
        Instruction::Out { port: p, src } => {
            let suffix = if matches!(p, Port::Reg(_)) { 'r' } else { 'i' };
            format!("out{suffix} {}, {src}", port(p))
        }
        Instruction::In { port: p, dst } => {
            let suffix = if matches!(p, Port::Reg(_)) { 'r' } else { 'i' };
            format!("in{suffix} {dst}, {}", port(p))
        }
        Instruction::Jal { base, offset } => format!("jal {base}, {offset}"),
        Instruction::Jalr { link, base, offset } => format!("jalr {link}, {base}, {offset}"),
        Instruction::Ret => "ret".to_owned(),
        Instruction::Retr { target } => format!("retr {target}"),
        Instruction::Branch { cond, offset } => format!("{} {offset}", cond.mnemonic()),
        Instruction::Push { src } => format!("push {src}"),
        Instruction::Pop { dst } => format!("pop {dst}"),
        Instruction::Enter => "enter".to_owned(),
        Instruction::Leave => "leave".to_owned(),
        Instruction::LoadImm { op, dst, imm } => format!("{} {dst}, {imm:#x}", op.mnemonic()),
        Instruction::Load {
            width,
            signed,
            dst,
            base,
            index,
            shift,
            disp,
        } => {
            let mut s = format!("l{}", width.suffix());
            if signed {
                s.push('s');
            }
            let _ = write!(s, " {dst}, [{base} + {disp} + {index} << {shift}]");
            s
        }
        Instruction::Store {
            width,
            src,
            base,
            index,
            shift,
            disp,
        } => format!(
            "s{} {src}, [{base} + {disp} + {index} << {shift}]",
            width.suffix()
        ),
        Instruction::Cmp { lhs, rhs } => {
            let mnemonic = if matches!((lhs, rhs), (Operand::Reg(_), Operand::Reg(_))) {
                "cmpr"
            } else {
                "cmpi"
            };
            format!("{mnemonic} {}, {}", operand(lhs), operand(rhs))
        }
        Instruction::Alu { op, dst, lhs, rhs } => {
            let suffix = if matches!(rhs, Operand::Reg(_)) { 'r' } else { 'i' };
            format!("{}{suffix} {dst}, {lhs}, {}", op.mnemonic(), operand(rhs))
        }
    }
}
