//! Bounded Simulator Tests.

use crate::common::builder::instruction::ProgramBuilder;
use crate::common::harness::init_tracing;
use hlsim_core::config::Config;
use hlsim_core::core::arch::ExitStatus;
use hlsim_core::sim::loader::words_to_bytes;
use hlsim_core::sim::{RunOutcome, Simulator};

#[test]
fn runs_to_exit() {
    init_tracing();
    let mut sim = Simulator::new(&Config::default(), Some(100)).unwrap();
    sim.load(0, &words_to_bytes(&ProgramBuilder::new().bra(1).fail().pass().build()))
        .unwrap();
    assert_eq!(sim.run(), RunOutcome::Exited(ExitStatus::Success));
}

#[test]
fn cycle_limit_stops_infinite_loop() {
    init_tracing();
    let mut sim = Simulator::new(&Config::default(), Some(50)).unwrap();
    sim.load(0, &words_to_bytes(&ProgramBuilder::new().bra(-1).build()))
        .unwrap();
    assert_eq!(sim.run(), RunOutcome::CycleLimit);
    assert_eq!(sim.system.cpu.stats.cycles, 50);
}
