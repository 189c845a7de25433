//! System Lifecycle Tests.

use crate::common::builder::instruction::ProgramBuilder;
use crate::common::mocks::allocator::{CountingAllocator, FailingAllocator};
use hlsim_core::common::SystemError;
use hlsim_core::config::Config;
use hlsim_core::core::arch::{AddressingMode, ExitStatus, Register};
use hlsim_core::sim::loader;
use hlsim_core::soc::System;
use std::sync::Arc;

#[test]
fn construction_applies_config() {
    let mut config = Config::default();
    config.memory.size = 0x8000;
    config.memory.page_table_base = 0x4000;
    config.general.start_ip = 0x100;
    config.general.start_mode = AddressingMode::User;
    config.general.initial_sp = Some(0x7000);
    config.interrupts.vector_table_base = Some(0x200);
    let system = System::from_config(&config).unwrap();

    assert_eq!(system.mmu().memory_limit(), 0x8000);
    assert_eq!(system.mmu().page_table_base(), 0x4000);
    assert_eq!(system.cpu.regs.ip(), 0x100);
    assert_eq!(system.cpu.mode(), AddressingMode::User);
    assert_eq!(system.cpu.regs.read(Register::Sp), 0x7000);
    assert_eq!(system.cpu.regs.read(Register::Fp), 0x7000);
    assert_eq!(system.interrupts().vector_table_base(), Some(0x200));
    assert_eq!(system.exit_status(), None);
    assert_eq!(system.test_code(), None);
}

#[test]
fn allocation_failure_is_reported() {
    let err = System::new(&Config::default(), Arc::new(FailingAllocator)).unwrap_err();
    assert!(matches!(err, SystemError::Allocation { .. }));
}

#[test]
fn drop_releases_memory() {
    let counting = Arc::new(CountingAllocator::default());
    let system = System::new(&Config::default(), counting.clone()).unwrap();
    assert_eq!(counting.live_bytes(), 1024 * 1024);
    drop(system);
    assert_eq!(counting.live_bytes(), 0);
    assert_eq!(counting.frees(), 1);
}

#[test]
fn clear_exit_resumes() {
    let program = ProgramBuilder::new().fail().pass().build();
    let mut system = System::from_config(&Config::default()).unwrap();
    loader::load_words(&mut system, 0, &program).unwrap();
    assert_eq!(system.exec(), ExitStatus::Failure);
    system.clear_exit();
    assert_eq!(system.exec(), ExitStatus::Success);
    assert_eq!(system.test_code(), Some(1));
}
