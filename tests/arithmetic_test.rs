//! Tests for the arithmetic instructions.
//!
//! Tests cover:
//! - ADD, ADC, SUB, SBB and their immediate forms
//! - INR, DCR (carry untouched)
//! - INX, DCX, DAD
//! - Flag derivation from the widened result

use lib8080::{Flags, Register, CPU};

/// Helper function to create a CPU with `program` loaded at index 0
fn setup_cpu(program: &[u8]) -> CPU {
    let mut cpu = CPU::new();
    cpu.set_code(program, Default::default()).unwrap();
    cpu
}

fn with_carry(cpu: &mut CPU, carry: bool) {
    cpu.set_flags(Flags {
        carry,
        ..cpu.flags()
    });
}

// ========== ADD / ADC ==========

#[test]
fn test_add_basic() {
    // ADD B
    let mut cpu = setup_cpu(&[0x80]);
    cpu.set_a(0x05);
    cpu.set_b(0x03);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x08);
    assert_eq!(cpu.flags(), Flags::default());
    assert_eq!(cpu.pc(), 1);
}

#[test]
fn test_add_carry_out() {
    // ADD B
    let mut cpu = setup_cpu(&[0x80]);
    cpu.set_a(0xFF);
    cpu.set_b(0x01);

    cpu.step().unwrap();

    let flags = cpu.flags();
    assert_eq!(cpu.a(), 0x00);
    assert!(flags.carry);
    assert!(flags.zero);
    assert!(flags.parity);
    assert!(!flags.sign);
    assert!(!flags.aux_carry);
}

#[test]
fn test_add_sign() {
    // ADD A
    let mut cpu = setup_cpu(&[0x87]);
    cpu.set_a(0x40);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flags().sign);
    assert!(!cpu.flags().carry);
}

#[test]
fn test_add_memory() {
    // ADD M
    let mut cpu = setup_cpu(&[0x86]);
    cpu.write_memory(0x0100, 0x20).unwrap();
    cpu.set_h(0x01);
    cpu.set_l(0x00);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x21);
}

#[test]
fn test_adc_with_carry_in() {
    // ADC C
    let mut cpu = setup_cpu(&[0x89]);
    cpu.set_a(0x10);
    cpu.set_c(0x05);
    with_carry(&mut cpu, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x16);
    assert!(!cpu.flags().carry);
}

#[test]
fn test_adi() {
    // ADI 10
    let mut cpu = setup_cpu(&[0xC6, 0x10]);
    cpu.set_a(0x20);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x30);
    assert_eq!(cpu.pc(), 2);
}

#[test]
fn test_aci_carry_chain() {
    // ACI FF
    let mut cpu = setup_cpu(&[0xCE, 0xFF]);
    cpu.set_a(0x00);
    with_carry(&mut cpu, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flags().carry);
    assert!(cpu.flags().zero);
}

// ========== SUB / SBB ==========

#[test]
fn test_sub_no_borrow() {
    // SUB B
    let mut cpu = setup_cpu(&[0x90]);
    cpu.set_a(0x05);
    cpu.set_b(0x03);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert!(!cpu.flags().carry);
}

#[test]
fn test_sub_borrow() {
    // SUB B
    let mut cpu = setup_cpu(&[0x90]);
    cpu.set_a(0x03);
    cpu.set_b(0x05);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xFE);
    assert!(cpu.flags().carry);
    assert!(cpu.flags().sign);
}

#[test]
fn test_sub_a_clears_accumulator() {
    // SUB A
    let mut cpu = setup_cpu(&[0x97]);
    cpu.set_a(0x3C);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flags().zero);
    assert!(cpu.flags().parity);
    assert!(!cpu.flags().carry);
}

#[test]
fn test_sbb_with_borrow_in() {
    // SBB B
    let mut cpu = setup_cpu(&[0x98]);
    cpu.set_a(0x05);
    cpu.set_b(0x03);
    with_carry(&mut cpu, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x01);
    assert!(!cpu.flags().carry);
}

#[test]
fn test_sui_borrow() {
    // SUI 01
    let mut cpu = setup_cpu(&[0xD6, 0x01]);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xFF);
    assert!(cpu.flags().carry);
}

// ========== INR / DCR ==========

#[test]
fn test_inr_wraps_and_keeps_carry() {
    // INR A
    let mut cpu = setup_cpu(&[0x3C]);
    cpu.set_a(0xFF);
    with_carry(&mut cpu, false);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flags().zero);
    assert!(!cpu.flags().carry);
}

#[test]
fn test_inr_preserves_set_carry() {
    // INR C
    let mut cpu = setup_cpu(&[0x0C]);
    with_carry(&mut cpu, true);

    cpu.step().unwrap();

    assert_eq!(cpu.c(), 0x01);
    assert!(cpu.flags().carry);
}

#[test]
fn test_dcr_to_zero() {
    // DCR B
    let mut cpu = setup_cpu(&[0x05]);
    cpu.set_b(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.b(), 0x00);
    assert!(cpu.flags().zero);
}

#[test]
fn test_dcr_wraps() {
    // DCR D
    let mut cpu = setup_cpu(&[0x15]);

    cpu.step().unwrap();

    assert_eq!(cpu.d(), 0xFF);
    assert!(cpu.flags().sign);
    assert!(!cpu.flags().carry);
}

#[test]
fn test_inr_memory() {
    // INR M
    let mut cpu = setup_cpu(&[0x34]);
    cpu.write_memory(0x0200, 0x41).unwrap();
    cpu.set_h(0x02);
    cpu.set_l(0x00);

    cpu.step().unwrap();

    assert_eq!(cpu.get(Register::M).unwrap(), 0x42);
}

// ========== 16-bit ==========

#[test]
fn test_inx_carries_into_high_byte() {
    // INX B
    let mut cpu = setup_cpu(&[0x03]);
    cpu.set_b(0x00);
    cpu.set_c(0xFF);

    cpu.step().unwrap();

    assert_eq!((cpu.b(), cpu.c()), (0x01, 0x00));
}

#[test]
fn test_inx_sp() {
    // INX SP
    let mut cpu = setup_cpu(&[0x33]);

    cpu.step().unwrap();

    assert_eq!(cpu.sp(), 928);
}

#[test]
fn test_dcx_wraps() {
    // DCX D
    let mut cpu = setup_cpu(&[0x1B]);

    cpu.step().unwrap();

    assert_eq!((cpu.d(), cpu.e()), (0xFF, 0xFF));
    assert_eq!(cpu.flags(), Flags::default());
}

#[test]
fn test_dad_b() {
    // DAD B
    let mut cpu = setup_cpu(&[0x09]);
    cpu.set_h(0x12);
    cpu.set_l(0x34);
    cpu.set_b(0x00);
    cpu.set_c(0x01);

    cpu.step().unwrap();

    assert_eq!((cpu.h(), cpu.l()), (0x12, 0x35));
}

#[test]
fn test_dad_always_clears_carry() {
    // DAD H with HL = 8000 overflows 16 bits
    let mut cpu = setup_cpu(&[0x29]);
    cpu.set_h(0x80);
    cpu.set_l(0x00);
    with_carry(&mut cpu, true);

    cpu.step().unwrap();

    assert_eq!((cpu.h(), cpu.l()), (0x00, 0x00));
    assert!(!cpu.flags().carry);
}

#[test]
fn test_dad_sp() {
    // DAD SP
    let mut cpu = setup_cpu(&[0x39]);
    cpu.set_l(0x01);

    cpu.step().unwrap();

    // 927 + 1
    assert_eq!((cpu.h(), cpu.l()), (0x03, 0xA0));
}
