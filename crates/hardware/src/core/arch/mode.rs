//! Addressing Modes.
//!
//! This module defines the two states of the CPU. It implements the following:
//! 1. **Mode Classification:** Kernel (physical addressing) and User (translated addressing).
//! 2. **Status Mapping:** Conversion to and from the `Mode` bit of the status register.
//! 3. **Configuration:** Deserialization so the start mode can be configured.

use serde::Deserialize;

/// CPU addressing mode, selected by the `Mode` status flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressingMode {
    /// Kernel mode: fetches and data accesses use physical addresses.
    #[default]
    Kernel,
    /// User mode: fetches and data accesses go through translation.
    User,
}

impl AddressingMode {
    /// Converts the `Mode` bit value to a mode.
    pub const fn from_bit(bit: bool) -> Self {
        if bit { Self::User } else { Self::Kernel }
    }

    /// Returns the value of the `Mode` status bit for this mode.
    pub const fn bit(self) -> bool {
        matches!(self, Self::User)
    }

    /// Returns the human-readable name of the mode.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Kernel => "Kernel",
            Self::User => "User",
        }
    }
}

impl std::fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
