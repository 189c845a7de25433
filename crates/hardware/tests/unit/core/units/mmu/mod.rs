//! # Memory Management Unit


/// Five-level translation and permissions.
pub mod ptw;
