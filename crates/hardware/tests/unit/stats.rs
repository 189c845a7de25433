//! Statistics Accounting Tests.

use crate::common::builder::instruction::ProgramBuilder;
use crate::common::harness::TestContext;
use hlsim_core::core::arch::{ExitStatus, Interrupt};
use hlsim_core::isa::encode;
use hlsim_core::stats::SimStats;

#[test]
fn fresh_counters_are_zero() {
    let stats = SimStats::default();
    assert_eq!(stats.cycles, 0);
    assert_eq!(stats.instructions_retired, 0);
    assert_eq!(stats.interrupts_raised, 0);
}

#[test]
fn faulting_instructions_do_not_retire() {
    let program = ProgramBuilder::new().int(3).raw(0xAA).pass().build();
    let mut ctx = TestContext::new()
        .load_program(0, &program)
        .with_code(0x300, &[encode::iret()])
        .with_code(0x400, &[encode::iret()])
        .with_vector_table(
            0x800,
            &[(Interrupt::Software(3), 0x300), (Interrupt::InvalidOperation, 0x400)],
        );

    // The invalid word returns past itself, so `iret` lands on `int 255`.
    assert_eq!(ctx.run(16), Some(ExitStatus::Success));
    let stats = &ctx.cpu().stats;
    assert_eq!(stats.cycles, 5);
    assert_eq!(stats.instructions_retired, 4);
    assert_eq!(stats.interrupts_raised, 2);
    assert_eq!(stats.interrupts_dispatched, 2);
    assert_eq!(stats.interrupts_overflowed, 0);
}

#[test]
fn print_does_not_panic() {
    let mut ctx = TestContext::new().load_program(0, &ProgramBuilder::new().pass().build());
    assert_eq!(ctx.run(2), Some(ExitStatus::Success));
    ctx.cpu().stats.print();
}
