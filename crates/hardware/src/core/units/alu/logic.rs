//! ALU bitwise logical operations.

use crate::isa::AluOp;

/// Executes a bitwise operation; non-logical operations yield 0.
pub const fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    match op {
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Nor => !(a | b),
        AluOp::Xor => a ^ b,
        _ => 0,
    }
}
