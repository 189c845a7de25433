//! ALU shift and bit-test operations.
//!
//! Shift amounts are not masked: shifting by 64 or more yields 0 for `shl`/`lsr`
//! and the sign fill for `asr`. `bit` yields bit `b` of `a`, or 0 for `b > 63`.

use crate::isa::AluOp;

/// Number of bits in a register.
const XLEN_BITS: u64 = 64;

/// Executes a shift or bit-test operation; other operations yield 0.
///
/// # Arguments
///
/// * `op` - The operation (must be a shift variant).
/// * `a`  - The value to shift or test.
/// * `b`  - Shift amount or bit index.
pub const fn execute(op: AluOp, a: u64, b: u64) -> u64 {
    let in_range = b < XLEN_BITS;
    match op {
        AluOp::Shl => {
            if in_range {
                a << b
            } else {
                0
            }
        }
        AluOp::Lsr => {
            if in_range {
                a >> b
            } else {
                0
            }
        }
        AluOp::Asr => {
            let shamt = if in_range { b } else { XLEN_BITS - 1 };
            ((a as i64) >> shamt) as u64
        }
        AluOp::Bit => {
            if in_range {
                (a >> b) & 1
            } else {
                0
            }
        }
        _ => 0,
    }
}
