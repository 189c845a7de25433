//! Interrupt Controller Tests.

use hlsim_core::core::arch::Interrupt;
use hlsim_core::soc::InterruptController;

#[test]
fn fifo_order() {
    let mut ic = InterruptController::new(None);
    assert!(ic.enqueue(Interrupt::Software(1)));
    assert!(ic.enqueue(Interrupt::DivideByZero));
    assert_eq!(ic.take_next(), Some(Interrupt::Software(1)));
    assert_eq!(ic.take_next(), Some(Interrupt::DivideByZero));
    assert_eq!(ic.take_next(), None);
    assert!(!ic.has_pending());
}

#[test]
fn full_queue_latches_overflow() {
    let mut ic = InterruptController::new(None);
    for code in 0..16 {
        assert!(ic.enqueue(Interrupt::Software(code)));
    }
    assert!(!ic.enqueue(Interrupt::Software(99)));
    assert!(!ic.enqueue(Interrupt::Software(100)));
    assert_eq!(ic.pending_len(), 16);
    assert!(ic.overflowed());

    assert_eq!(ic.take_next(), Some(Interrupt::Overflow));
    assert!(!ic.overflowed());
    assert_eq!(ic.take_next(), Some(Interrupt::Software(0)));
}

#[test]
fn queue_drains_after_overflow() {
    let mut ic = InterruptController::new(None);
    for _ in 0..17 {
        ic.enqueue(Interrupt::Breakpoint);
    }
    assert_eq!(ic.take_next(), Some(Interrupt::Overflow));
    let mut drained = 0;
    while let Some(kind) = ic.take_next() {
        assert_eq!(kind, Interrupt::Breakpoint);
        drained += 1;
    }
    assert_eq!(drained, 16);
    assert!(!ic.has_pending());
}

#[test]
fn service_state() {
    let mut ic = InterruptController::new(Some(0x800));
    ic.begin_service(Interrupt::StackUnderflow, 0x44, 0x80);
    assert_eq!(ic.in_service(), Some(Interrupt::StackUnderflow));
    assert_eq!(ic.return_state(), (0x44, 0x80));
    ic.complete();
    assert_eq!(ic.in_service(), None);
}

#[test]
fn vector_addresses() {
    let mut ic = InterruptController::new(None);
    assert_eq!(ic.vector_address(Interrupt::DivideByZero), None);
    ic.set_vector_table_base(Some(0x1000));
    assert_eq!(ic.vector_address(Interrupt::DivideByZero), Some(0x1000));
    assert_eq!(ic.vector_address(Interrupt::AccessViolation), Some(0x1028));
    assert_eq!(ic.vector_address(Interrupt::Software(32)), Some(0x1100));
}
