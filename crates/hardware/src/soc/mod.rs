//! System Components.
//!
//! This module organizes the components that surround the CPU core: the interrupt
//! controller, the allocator-backed physical memory, and the builder that assembles
//! a `System`.

/// System builder and lifecycle.
pub mod builder;

/// Pending-interrupt queue and interrupt-return state.
pub mod interrupt_controller;

/// Host allocator capability and physical memory.
pub mod memory;

pub use builder::System;
pub use interrupt_controller::InterruptController;
