//! ALU arithmetic operations.
//!
//! All operations wrap modulo 2^64. Signed division of `i64::MIN` by `-1` wraps to
//! `i64::MIN` and the matching remainder is 0.

use crate::isa::AluOp;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The operation (must be an arithmetic variant).
/// * `a`  - Dividend / left operand.
/// * `b`  - Divisor / right operand.
///
/// # Returns
///
/// The result, or `None` for a zero divisor. Non-arithmetic operations yield 0.
pub const fn execute(op: AluOp, a: u64, b: u64) -> Option<u64> {
    let divides = matches!(op, AluOp::Idiv | AluOp::Udiv | AluOp::Rem | AluOp::Mod);
    if divides && b == 0 {
        return None;
    }
    Some(match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        // The low 64 bits of a product do not depend on signedness.
        AluOp::Imul | AluOp::Umul => a.wrapping_mul(b),
        AluOp::Idiv => (a as i64).wrapping_div(b as i64) as u64,
        AluOp::Udiv => a / b,
        AluOp::Rem => (a as i64).wrapping_rem(b as i64) as u64,
        AluOp::Mod => a % b,
        _ => 0,
    })
}
