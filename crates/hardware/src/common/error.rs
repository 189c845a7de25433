//! Memory and System Error definitions.
//!
//! This module defines the two error channels of the emulator:
//! 1. **Memory Errors:** Typed outcomes of physical access and address translation. These are
//!    recoverable by construction and end up as interrupts inside the emulated machine.
//! 2. **System Errors:** Host-level failures (allocation, image loading, configuration) that are
//!    surfaced to the host caller and never to emulated code.
//! 3. **Result Codes:** The numeric result-code domain used by tooling that works with codes.

use thiserror::Error;

/// Failure of an MMU operation.
///
/// Every physical or virtual access returns `Result<T, MemoryError>`; on error
/// memory is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum MemoryError {
    /// The level 1 page-directory entry is not valid.
    #[error("unmapped at page-table level 1")]
    UnmappedLevel1,
    /// The level 2 page-directory entry is not valid.
    #[error("unmapped at page-table level 2")]
    UnmappedLevel2,
    /// The level 3 page-directory entry is not valid.
    #[error("unmapped at page-table level 3")]
    UnmappedLevel3,
    /// The level 4 page-directory entry is not valid.
    #[error("unmapped at page-table level 4")]
    UnmappedLevel4,
    /// The level 5 page-directory entry is not valid.
    #[error("unmapped at page-table level 5")]
    UnmappedLevel5,
    /// The authoritative entry lacks a required permission.
    #[error("access violation")]
    AccessViolation,
    /// The physical address lies outside physical memory.
    #[error("bus error: physical address out of bounds")]
    Bus,
    /// The address is not a multiple of the access width.
    #[error("unaligned access")]
    Unaligned,
}

impl MemoryError {
    /// Returns the "unmapped" error for a zero-based translation level.
    ///
    /// Levels past the last one saturate to `UnmappedLevel5`.
    pub const fn unmapped(level: usize) -> Self {
        match level {
            0 => Self::UnmappedLevel1,
            1 => Self::UnmappedLevel2,
            2 => Self::UnmappedLevel3,
            3 => Self::UnmappedLevel4,
            _ => Self::UnmappedLevel5,
        }
    }

    /// Returns true for any of the five "unmapped" variants.
    pub const fn is_unmapped(self) -> bool {
        matches!(
            self,
            Self::UnmappedLevel1
                | Self::UnmappedLevel2
                | Self::UnmappedLevel3
                | Self::UnmappedLevel4
                | Self::UnmappedLevel5
        )
    }
}

/// Numeric result code of a memory operation.
///
/// The discriminants are stable and follow the order of the MMU error domain,
/// so tooling can exchange them as plain bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MemoryResult {
    /// The operation succeeded.
    Ok = 0,
    /// See [`MemoryError::UnmappedLevel1`].
    UnmappedLevel1 = 1,
    /// See [`MemoryError::UnmappedLevel2`].
    UnmappedLevel2 = 2,
    /// See [`MemoryError::UnmappedLevel3`].
    UnmappedLevel3 = 3,
    /// See [`MemoryError::UnmappedLevel4`].
    UnmappedLevel4 = 4,
    /// See [`MemoryError::UnmappedLevel5`].
    UnmappedLevel5 = 5,
    /// See [`MemoryError::AccessViolation`].
    AccessViolation = 6,
    /// See [`MemoryError::Bus`].
    Bus = 7,
    /// See [`MemoryError::Unaligned`].
    Unaligned = 8,
}

impl MemoryResult {
    /// Returns the numeric code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns true for [`MemoryResult::Ok`].
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl From<MemoryError> for MemoryResult {
    fn from(err: MemoryError) -> Self {
        match err {
            MemoryError::UnmappedLevel1 => Self::UnmappedLevel1,
            MemoryError::UnmappedLevel2 => Self::UnmappedLevel2,
            MemoryError::UnmappedLevel3 => Self::UnmappedLevel3,
            MemoryError::UnmappedLevel4 => Self::UnmappedLevel4,
            MemoryError::UnmappedLevel5 => Self::UnmappedLevel5,
            MemoryError::AccessViolation => Self::AccessViolation,
            MemoryError::Bus => Self::Bus,
            MemoryError::Unaligned => Self::Unaligned,
        }
    }
}

impl<T> From<&Result<T, MemoryError>> for MemoryResult {
    fn from(res: &Result<T, MemoryError>) -> Self {
        match res {
            Ok(_) => Self::Ok,
            Err(e) => Self::from(*e),
        }
    }
}

/// Host-level failure of the emulator.
///
/// These errors concern the host process (allocation, files, configuration),
/// never the emulated machine.
#[derive(Debug, Error)]
pub enum SystemError {
    /// The host allocator refused a request.
    #[error("host allocator failed to provide {size} bytes")]
    Allocation {
        /// Requested block size in bytes.
        size: usize,
    },

    /// A memory image does not fit the physical address space.
    #[error("image of {len} bytes at {base:#x} exceeds the physical address space")]
    ImageTooLarge {
        /// Load address.
        base: u64,
        /// Image length in bytes.
        len: usize,
    },

    /// Reading an image from disk failed.
    #[error("failed to read image '{path}'")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration could not be parsed.
    #[error("invalid configuration")]
    Config(#[from] serde_json::Error),
}
