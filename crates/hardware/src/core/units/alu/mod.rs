//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer semantics of the arithmetic and bitwise
//! instruction families. Operations are organized into submodules by category:
//! - [`arithmetic`]: add, sub, imul, idiv, umul, udiv, rem, mod
//! - [`logic`]:      and, or, nor, xor
//! - [`shifts`]:     shl, asr, lsr, bit
//!
//! The ALU is pure: it never touches the status register.

/// Integer arithmetic operations (add, subtract, multiply, divide, remainder).
pub mod arithmetic;

/// Bitwise logical operations (and, or, nor, xor).
pub mod logic;

/// Shift and bit-test operations (shl, asr, lsr, bit).
pub mod shifts;

use crate::isa::AluOp;

/// Arithmetic Logic Unit for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to perform.
    /// * `a`  - Left operand (the `rs1` value).
    /// * `b`  - Right operand (`rs2` value or extended immediate).
    ///
    /// # Returns
    ///
    /// The 64-bit result, or `None` when a division or remainder has a zero divisor.
    ///
    /// # Examples
    ///
    /// ```
    /// use hlsim_core::core::units::alu::Alu;
    /// use hlsim_core::isa::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8), Some(50));
    /// assert_eq!(Alu::execute(AluOp::Shl, 1, 4), Some(0x10));
    /// assert_eq!(Alu::execute(AluOp::Udiv, 100, 0), None);
    /// ```
    pub fn execute(op: AluOp, a: u64, b: u64) -> Option<u64> {
        match op {
            AluOp::Add
            | AluOp::Sub
            | AluOp::Imul
            | AluOp::Idiv
            | AluOp::Umul
            | AluOp::Udiv
            | AluOp::Rem
            | AluOp::Mod => arithmetic::execute(op, a, b),
            AluOp::And | AluOp::Or | AluOp::Nor | AluOp::Xor => Some(logic::execute(op, a, b)),
            AluOp::Shl | AluOp::Asr | AluOp::Lsr | AluOp::Bit => Some(shifts::execute(op, a, b)),
        }
    }
}
