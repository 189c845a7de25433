//! CPU Memory Access Tests.
//!
//! Verifies sized loads and stores, effective-address computation, the stack,
//! and the switch from physical to translated addressing in user mode.

use crate::common::harness::{PageMapper, TestContext};
use hlsim_core::common::{Permissions, PhysAddr};
use hlsim_core::config::Config;
use hlsim_core::core::arch::{AddressingMode, Interrupt, Register};
use hlsim_core::isa::{AccessWidth, decode, encode};
use rstest::rstest;

fn exec(ctx: &mut TestContext, raw: u32) -> Result<(), Interrupt> {
    let inst = decode(raw).expect("valid encoding");
    ctx.cpu_mut().execute(inst).map(|_| ())
}

// ══════════════════════════════════════════════════════════
// Loads and stores
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(AccessWidth::Byte, false, 0x80)]
#[case(AccessWidth::Byte, true, 0xFFFF_FFFF_FFFF_FF80)]
#[case(AccessWidth::Quarter, false, 0x8180)]
#[case(AccessWidth::Quarter, true, 0xFFFF_FFFF_FFFF_8180)]
#[case(AccessWidth::Half, false, 0x8382_8180)]
#[case(AccessWidth::Half, true, 0xFFFF_FFFF_8382_8180)]
#[case(AccessWidth::Word, false, 0x8786_8584_8382_8180)]
fn load_extension(#[case] width: AccessWidth, #[case] signed: bool, #[case] expected: u64) {
    let mut ctx = TestContext::new();
    ctx.write_u64(0x200, 0x8786_8584_8382_8180);
    ctx.set_reg(Register::Rb, 0x200);
    let raw = encode::load(width, signed, Register::Ra, Register::Rb, Register::Rz, 0, 0);
    exec(&mut ctx, raw).unwrap();
    assert_eq!(ctx.get_reg(Register::Ra), expected);
}

#[test]
fn displacement_scales_with_width() {
    let mut ctx = TestContext::new();
    ctx.set_reg(Register::Rb, 0x100);
    ctx.set_reg(Register::Ra, 0xCAFE);
    exec(&mut ctx, encode::store(AccessWidth::Word, Register::Ra, Register::Rb, Register::Rz, 0, 3)).unwrap();
    assert_eq!(ctx.read_u64(0x118), 0xCAFE);
    exec(&mut ctx, encode::store(AccessWidth::Quarter, Register::Ra, Register::Rb, Register::Rz, 0, -2)).unwrap();
    assert_eq!(ctx.read_u64(0xF8) >> 32, 0xCAFE);
}

#[test]
fn index_register_is_shifted() {
    let mut ctx = TestContext::new();
    ctx.write_u64(0x340, 77);
    ctx.set_reg(Register::Rb, 0x300);
    ctx.set_reg(Register::Rc, 8);
    let raw = encode::load(AccessWidth::Word, false, Register::Ra, Register::Rb, Register::Rc, 3, 0);
    exec(&mut ctx, raw).unwrap();
    assert_eq!(ctx.get_reg(Register::Ra), 77);
}

#[test]
fn narrow_store_truncates() {
    let mut ctx = TestContext::new();
    ctx.set_reg(Register::Ra, 0x1234_5678_9ABC_DEF0);
    ctx.set_reg(Register::Rb, 0x80);
    exec(&mut ctx, encode::store(AccessWidth::Byte, Register::Ra, Register::Rb, Register::Rz, 0, 1)).unwrap();
    assert_eq!(ctx.read_u64(0x80), 0xF000);
}

#[test]
fn faulting_load_leaves_destination_and_counts() {
    let mut ctx = TestContext::with_memory_size(0x1000);
    ctx.set_reg(Register::Ra, 5);
    ctx.set_reg(Register::Rb, 0x1000);
    let out_of_bounds = encode::load(AccessWidth::Word, false, Register::Ra, Register::Rb, Register::Rz, 0, 0);
    assert_eq!(exec(&mut ctx, out_of_bounds), Err(Interrupt::AccessViolation));
    ctx.set_reg(Register::Rb, 0x4);
    let misaligned = encode::load(AccessWidth::Word, false, Register::Ra, Register::Rb, Register::Rz, 0, 0);
    assert_eq!(exec(&mut ctx, misaligned), Err(Interrupt::UnalignedAccess));
    assert_eq!(ctx.get_reg(Register::Ra), 5);
    assert_eq!(ctx.cpu().stats.data_faults, 2);
}

// ══════════════════════════════════════════════════════════
// Stack
// ══════════════════════════════════════════════════════════

#[test]
fn push_pop_is_lifo() {
    let mut ctx = TestContext::new();
    let top = ctx.get_reg(Register::Sp);
    ctx.set_reg(Register::Ra, 1);
    ctx.set_reg(Register::Rb, 2);
    exec(&mut ctx, encode::push(Register::Ra)).unwrap();
    exec(&mut ctx, encode::push(Register::Rb)).unwrap();
    assert_eq!(ctx.get_reg(Register::Sp), top - 16);
    exec(&mut ctx, encode::pop(Register::Rc)).unwrap();
    exec(&mut ctx, encode::pop(Register::Rd)).unwrap();
    assert_eq!((ctx.get_reg(Register::Rc), ctx.get_reg(Register::Rd)), (2, 1));
    assert_eq!(ctx.get_reg(Register::Sp), top);
}

#[test]
fn pop_at_frame_pointer_underflows() {
    let mut ctx = TestContext::new();
    ctx.set_reg(Register::Ra, 9);
    assert_eq!(exec(&mut ctx, encode::pop(Register::Ra)), Err(Interrupt::StackUnderflow));
    assert_eq!(ctx.get_reg(Register::Ra), 9);
}

#[test]
fn failed_push_keeps_stack_pointer() {
    let mut ctx = TestContext::new();
    ctx.set_reg(Register::Sp, 0);
    assert_eq!(exec(&mut ctx, encode::push(Register::Ra)), Err(Interrupt::AccessViolation));
    assert_eq!(ctx.get_reg(Register::Sp), 0);
}

#[test]
fn enter_and_leave_restore_frame() {
    let mut ctx = TestContext::new();
    let top = ctx.get_reg(Register::Sp);
    let old_fp = ctx.get_reg(Register::Fp);
    exec(&mut ctx, encode::enter()).unwrap();
    assert_eq!(ctx.get_reg(Register::Fp), top - 8);
    ctx.set_reg(Register::Ra, 3);
    exec(&mut ctx, encode::push(Register::Ra)).unwrap();
    exec(&mut ctx, encode::leave()).unwrap();
    assert_eq!(ctx.get_reg(Register::Fp), old_fp);
    assert_eq!(ctx.get_reg(Register::Sp), top);
}

#[test]
fn reset_places_stack_at_top_of_memory() {
    let ctx = TestContext::with_memory_size(0x1003);
    assert_eq!(ctx.get_reg(Register::Sp), 0x1000);
    assert_eq!(ctx.get_reg(Register::Fp), 0x1000);
}

// ══════════════════════════════════════════════════════════
// User mode
// ══════════════════════════════════════════════════════════

fn user_context() -> TestContext {
    let mut config = Config::default();
    config.memory.page_table_base = 0x1_0000;
    let mut ctx = TestContext::with_config(&config);
    let mut mapper = PageMapper::new(0x1_4000);
    mapper.map(ctx.mmu_mut(), 0x4000, 0x8_0000, Permissions::READ | Permissions::WRITE);
    mapper.map(ctx.mmu_mut(), 0x8000, 0x8_4000, Permissions::READ);
    ctx.set_mode(AddressingMode::User);
    ctx
}

#[test]
fn user_accesses_are_translated() {
    let mut ctx = user_context();
    ctx.set_reg(Register::Rb, 0x4000);
    ctx.set_reg(Register::Ra, 0x99);
    exec(&mut ctx, encode::store(AccessWidth::Word, Register::Ra, Register::Rb, Register::Rz, 0, 2)).unwrap();
    assert_eq!(ctx.read_u64(0x8_0010), 0x99);
    let raw = encode::load(AccessWidth::Word, false, Register::Rc, Register::Rb, Register::Rz, 0, 2);
    exec(&mut ctx, raw).unwrap();
    assert_eq!(ctx.get_reg(Register::Rc), 0x99);
}

#[test]
fn user_write_to_read_only_page_faults() {
    let mut ctx = user_context();
    ctx.set_reg(Register::Rb, 0x8000);
    let raw = encode::store(AccessWidth::Word, Register::Ra, Register::Rb, Register::Rz, 0, 0);
    assert_eq!(exec(&mut ctx, raw), Err(Interrupt::AccessViolation));
}

#[test]
fn user_fetch_needs_execute() {
    let mut ctx = user_context();
    let err = ctx.cpu_mut().fetch(0x4000).unwrap_err();
    assert_eq!(Interrupt::from(err), Interrupt::AccessViolation);
    assert_eq!(ctx.cpu().stats.fetch_faults, 1);
    assert!(ctx.cpu_mut().fetch(0).is_err());
    assert!(ctx.system.mmu().read_physical_32(PhysAddr::new(0)).is_ok());
}
