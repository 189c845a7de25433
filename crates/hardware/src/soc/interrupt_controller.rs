//! Interrupt Controller.
//!
//! Holds interrupts until the CPU services them. It tracks the following:
//! 1. **Pending Queue:** A FIFO of at most 16 interrupts.
//! 2. **Overflow Latch:** Set when an interrupt arrives at a full queue; the
//!    `Overflow` interrupt is then delivered ahead of every queued entry.
//! 3. **Service State:** The interrupt in service and the IP/status saved on entry.
//! 4. **Vector Table:** Physical base of the table of 64-bit handler addresses.

use std::collections::VecDeque;

use crate::common::constants::{INTERRUPT_QUEUE_CAPACITY, VECTOR_ENTRY_SIZE};
use crate::core::arch::Interrupt;

/// Interrupt controller state.
#[derive(Clone, Debug, Default)]
pub struct InterruptController {
    vector_table_base: Option<u64>,
    queue: VecDeque<Interrupt>,
    overflow: bool,
    in_service: Option<Interrupt>,
    return_address: u64,
    return_status: u64,
}

impl InterruptController {
    /// Creates an empty controller.
    ///
    /// # Arguments
    ///
    /// * `vector_table_base` - Physical base of the vector table, or `None` if no
    ///   handlers are installed.
    pub fn new(vector_table_base: Option<u64>) -> Self {
        Self {
            vector_table_base,
            queue: VecDeque::with_capacity(INTERRUPT_QUEUE_CAPACITY),
            ..Self::default()
        }
    }

    /// Appends an interrupt to the pending queue.
    ///
    /// # Returns
    ///
    /// `false` if the queue was full; the interrupt is then dropped and the overflow
    /// latch is set instead.
    pub fn enqueue(&mut self, kind: Interrupt) -> bool {
        if self.queue.len() >= INTERRUPT_QUEUE_CAPACITY {
            tracing::warn!(%kind, "interrupt queue full, raising overflow");
            self.overflow = true;
            return false;
        }
        tracing::debug!(%kind, depth = self.queue.len() + 1, "interrupt enqueued");
        self.queue.push_back(kind);
        true
    }

    /// Returns true if an interrupt (or the overflow condition) is waiting.
    pub fn has_pending(&self) -> bool {
        self.overflow || !self.queue.is_empty()
    }

    /// Number of queued interrupts, not counting the overflow latch.
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if the overflow latch is set.
    pub const fn overflowed(&self) -> bool {
        self.overflow
    }

    /// Removes the next interrupt to deliver; `Overflow` comes first.
    pub fn take_next(&mut self) -> Option<Interrupt> {
        if self.overflow {
            self.overflow = false;
            return Some(Interrupt::Overflow);
        }
        self.queue.pop_front()
    }

    /// Marks `kind` as in service and saves the state to return to.
    pub const fn begin_service(&mut self, kind: Interrupt, return_address: u64, return_status: u64) {
        self.in_service = Some(kind);
        self.return_address = return_address;
        self.return_status = return_status;
    }

    /// Returns the interrupt currently being serviced.
    pub const fn in_service(&self) -> Option<Interrupt> {
        self.in_service
    }

    /// Ends service of the current interrupt.
    pub const fn complete(&mut self) {
        self.in_service = None;
    }

    /// Returns the saved `(ip, status)` pair.
    pub const fn return_state(&self) -> (u64, u64) {
        (self.return_address, self.return_status)
    }

    /// Returns the vector table base.
    pub const fn vector_table_base(&self) -> Option<u64> {
        self.vector_table_base
    }

    /// Installs or removes the vector table.
    pub const fn set_vector_table_base(&mut self, base: Option<u64>) {
        self.vector_table_base = base;
    }

    /// Physical address of the vector entry for `kind`, if a table is installed.
    pub fn vector_address(&self, kind: Interrupt) -> Option<u64> {
        self.vector_table_base
            .map(|base| base.wrapping_add(u64::from(kind.vector()) * VECTOR_ENTRY_SIZE))
    }
}
