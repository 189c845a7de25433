//! Simulation utilities and program loading.
//!
//! Provides utilities for loading images into physical memory and a bounded
//! driver around a `System`.

/// Image loading.
pub mod loader;

/// Bounded run driver.
pub mod simulator;

pub use simulator::{RunOutcome, Simulator};
