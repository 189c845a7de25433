//! Program Image Loading.
//!
//! This module places program images into physical memory. It performs:
//! 1. **File loading:** Reads a raw little-endian image from disk.
//! 2. **Placement:** Copies an image to a physical base address, growing physical
//!    memory through the host allocator when the image extends past its end.
//! 3. **Word images:** Encodes instruction words so programs can be assembled in code.

use std::fs;
use std::path::Path;

use crate::common::SystemError;
use crate::soc::System;

/// Reads a raw image from disk.
///
/// # Arguments
///
/// * `path` - Path to the image file.
///
/// # Errors
///
/// Returns [`SystemError::Io`] if the file cannot be read.
pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>, SystemError> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| SystemError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Encodes instruction words as a little-endian byte image.
pub fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Copies `bytes` into physical memory at `base`.
///
/// Physical memory is grown to `base + bytes.len()` if it is currently smaller.
///
/// # Arguments
///
/// * `system` - Target system.
/// * `base` - Physical load address.
/// * `bytes` - Image contents.
///
/// # Errors
///
/// Returns [`SystemError::ImageTooLarge`] if the end address overflows, or
/// [`SystemError::Allocation`] if growing memory fails.
pub fn load_bytes(system: &mut System, base: u64, bytes: &[u8]) -> Result<(), SystemError> {
    let too_large = || SystemError::ImageTooLarge {
        base,
        len: bytes.len(),
    };
    let start = usize::try_from(base).map_err(|_| too_large())?;
    let end = start.checked_add(bytes.len()).ok_or_else(too_large)?;

    let memory = system.mmu_mut().memory_mut();
    if end > memory.len() {
        tracing::debug!(from = memory.len(), to = end, "growing physical memory for image");
        memory.resize(end)?;
    }
    memory.as_mut_slice()[start..end].copy_from_slice(bytes);
    tracing::debug!(base, len = bytes.len(), "image loaded");
    Ok(())
}

/// Encodes `words` and copies them into physical memory at `base`.
///
/// # Errors
///
/// As [`load_bytes`].
pub fn load_words(system: &mut System, base: u64, words: &[u32]) -> Result<(), SystemError> {
    load_bytes(system, base, &words_to_bytes(words))
}
