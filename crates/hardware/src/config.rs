//! Configuration system for the Halley emulator.
//!
//! This module defines the configuration structures used to build a `System`. It provides:
//! 1. **Defaults:** Baseline machine constants (memory size, start address, page-table base).
//! 2. **Structures:** Hierarchical config for general, memory and interrupt settings.
//! 3. **Parsing:** JSON deserialization with per-field defaults.
//!
//! Every field is optional in JSON; `Config::default()` describes a 1 MiB machine that starts
//! at physical address 0 in kernel mode with no interrupt vector table.

use serde::Deserialize;

use crate::common::SystemError;
use crate::core::arch::AddressingMode;
use crate::soc::memory::AllocatorKind;

/// Default configuration constants for the emulator.
mod defaults {
    /// Size of physical memory (1 MiB).
    pub const MEMORY_SIZE: usize = 1024 * 1024;

    /// Physical address of the first instruction.
    pub const START_IP: u64 = 0;

    /// Physical base of the level 1 page table.
    pub const PAGE_TABLE_BASE: u64 = 0;
}

/// Root configuration object.
///
/// # Examples
///
/// ```
/// use hlsim_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace_instructions": true, "start_ip": 4096 },
///     "memory": { "size": 65536, "allocator": "mmap" },
///     "interrupts": { "vector_table_base": 512 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert!(config.general.trace_instructions);
/// assert_eq!(config.general.start_ip, 4096);
/// assert_eq!(config.memory.size, 65536);
/// assert_eq!(config.interrupts.vector_table_base, Some(512));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General execution settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Physical memory and paging
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Interrupt delivery
    #[serde(default)]
    pub interrupts: InterruptConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::Config`] if the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self, SystemError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// General execution settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit a `trace` event for every executed instruction
    #[serde(default)]
    pub trace_instructions: bool,

    /// Initial instruction pointer
    #[serde(default = "GeneralConfig::default_start_ip")]
    pub start_ip: u64,

    /// Initial addressing mode
    #[serde(default)]
    pub start_mode: AddressingMode,

    /// Initial SP and FP; defaults to the top of physical memory, aligned down to 8
    #[serde(default)]
    pub initial_sp: Option<u64>,
}

impl GeneralConfig {
    /// Returns the default initial instruction pointer.
    const fn default_start_ip() -> u64 {
        defaults::START_IP
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_instructions: false,
            start_ip: defaults::START_IP,
            start_mode: AddressingMode::Kernel,
            initial_sp: None,
        }
    }
}

/// Physical memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Physical memory size in bytes
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,

    /// Physical base of the level 1 page table
    #[serde(default = "MemoryConfig::default_page_table_base")]
    pub page_table_base: u64,

    /// Host allocation strategy for physical memory
    #[serde(default)]
    pub allocator: AllocatorKind,
}

impl MemoryConfig {
    /// Returns the default physical memory size.
    const fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }

    /// Returns the default page-table base.
    const fn default_page_table_base() -> u64 {
        defaults::PAGE_TABLE_BASE
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_SIZE,
            page_table_base: defaults::PAGE_TABLE_BASE,
            allocator: AllocatorKind::Heap,
        }
    }
}

/// Interrupt delivery configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InterruptConfig {
    /// Physical base of the interrupt vector table; `None` installs no handlers
    #[serde(default)]
    pub vector_table_base: Option<u64>,
}
