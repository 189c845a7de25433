//! # System Components
//!
//! This module organizes tests for physical memory and its allocators, the
//! interrupt controller, and the `System` lifecycle.

/// Pending queue, overflow latch and service state.
pub mod interrupt_controller;

/// Host allocators and the physical buffer.
pub mod memory;

/// System construction, execution and teardown.
pub mod system;
