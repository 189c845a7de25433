//! # Simulation Layer


/// The bounded run driver.
pub mod simulator;
