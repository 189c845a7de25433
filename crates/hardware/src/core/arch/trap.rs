//! Interrupt Kinds.
//!
//! This module defines every interrupt the interrupt controller can hold. It performs
//! the following:
//! 1. **Classification:** Hardware faults raised by the CPU and software traps raised by `int`.
//! 2. **Vector Mapping:** Each kind selects one entry of the interrupt vector table.
//! 3. **Fault Conversion:** Maps MMU errors onto the interrupt that reports them.

use crate::common::error::MemoryError;

/// A pending or in-service interrupt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Interrupt {
    /// Second operand of a div, mod, or rem instruction was zero.
    DivideByZero,
    /// Reserved for debugger breakpoints.
    Breakpoint,
    /// Unrecognized opcode or secondary function, restricted instruction or
    /// restricted register write in user mode, or an unattached port.
    InvalidOperation,
    /// A pop or return would move the stack pointer past the frame pointer.
    StackUnderflow,
    /// Memory was accessed across type width boundaries.
    UnalignedAccess,
    /// Memory was accessed out of physical bounds, or (in user mode) through
    /// an unmapped page or without the required permission.
    AccessViolation,
    /// The pending-interrupt queue overflowed.
    Overflow,
    /// Software trap raised by `int` with the given immediate.
    Software(u16),
}

impl Interrupt {
    /// Returns the interrupt vector number.
    ///
    /// Hardware kinds use vectors 0–6; software traps use their immediate.
    pub const fn vector(self) -> u16 {
        match self {
            Self::DivideByZero => 0,
            Self::Breakpoint => 1,
            Self::InvalidOperation => 2,
            Self::StackUnderflow => 3,
            Self::UnalignedAccess => 4,
            Self::AccessViolation => 5,
            Self::Overflow => 6,
            Self::Software(code) => code,
        }
    }

    /// Returns true for faults raised by the CPU itself (everything except `int`).
    pub const fn is_fault(self) -> bool {
        !matches!(self, Self::Software(_))
    }
}

impl From<MemoryError> for Interrupt {
    fn from(err: MemoryError) -> Self {
        match err {
            MemoryError::Unaligned => Self::UnalignedAccess,
            MemoryError::UnmappedLevel1
            | MemoryError::UnmappedLevel2
            | MemoryError::UnmappedLevel3
            | MemoryError::UnmappedLevel4
            | MemoryError::UnmappedLevel5
            | MemoryError::AccessViolation
            | MemoryError::Bus => Self::AccessViolation,
        }
    }
}

impl std::fmt::Display for Interrupt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivideByZero => write!(f, "DivideByZero"),
            Self::Breakpoint => write!(f, "Breakpoint"),
            Self::InvalidOperation => write!(f, "InvalidOperation"),
            Self::StackUnderflow => write!(f, "StackUnderflow"),
            Self::UnalignedAccess => write!(f, "UnalignedAccess"),
            Self::AccessViolation => write!(f, "AccessViolation"),
            Self::Overflow => write!(f, "Overflow"),
            Self::Software(code) => write!(f, "Software({code})"),
        }
    }
}

/// Reason execution stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExitStatus {
    /// The program executed `int 255`.
    Success,
    /// The program executed `int 254`.
    Failure,
    /// An interrupt could not be delivered: no vector table is installed, the vector
    /// entry could not be read, or a hardware fault occurred while an interrupt was
    /// already in service.
    DoubleFault(Interrupt),
}

impl ExitStatus {
    /// Returns true for [`ExitStatus::Success`].
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::DoubleFault(int) => write!(f, "double fault ({int})"),
        }
    }
}
