//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the Halley encoding: opcode tables, per-format field extraction, the
//! typed decoder, encoders and the disassembler.
//!
//! # Formats
//!
//! * `E`: loads and stores (imm8, func, rs2, rs1, rde).
//! * `R`: register-register arithmetic and compare.
//! * `M`: immediate arithmetic, calls, stack and port I/O.
//! * `F`: system control and immediate loads.
//! * `B`: branches (imm20, condition).

/// Typed instruction decoding.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction word builders.
pub mod encode;

/// Field extraction utilities for every instruction format.
pub mod instruction;

/// Opcode and secondary function tables.
pub mod opcodes;

pub use decode::{Instruction, Operand, Port, decode};
pub use opcodes::{AccessWidth, AluOp, BranchCond, Format, LoadImmOp, Opcode, SystemFunc};
