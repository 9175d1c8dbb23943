//! Tests for the logical, compare, rotate and carry instructions.

use lib8080::{Flags, CPU};

/// Helper function to create a CPU with `program` loaded at index 0
fn setup_cpu(program: &[u8]) -> CPU {
    let mut cpu = CPU::new();
    cpu.set_code(program, Default::default()).unwrap();
    cpu
}

fn set_flags(cpu: &mut CPU, carry: bool, aux_carry: bool) {
    cpu.set_flags(Flags {
        carry,
        aux_carry,
        ..Flags::default()
    });
}

// ========== ANA / XRA / ORA ==========

#[test]
fn test_ana_clears_carry() {
    // ANA B
    let mut cpu = setup_cpu(&[0xA0]);
    cpu.set_a(0b1100);
    cpu.set_b(0b1010);
    set_flags(&mut cpu, true, true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0b1000);
    assert!(!cpu.flags().carry);
    assert!(!cpu.flags().aux_carry);
}

#[test]
fn test_xra_a_zeroes_accumulator() {
    // XRA A
    let mut cpu = setup_cpu(&[0xAF]);
    cpu.set_a(0x5A);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flags().zero);
    assert!(cpu.flags().parity);
}

#[test]
fn test_ora_sign_and_parity() {
    // ORA C
    let mut cpu = setup_cpu(&[0xB1]);
    cpu.set_a(0x80);
    cpu.set_c(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x81);
    assert!(cpu.flags().sign);
    assert!(cpu.flags().parity);
    assert!(!cpu.flags().zero);
}

#[test]
fn test_ani_masks() {
    // ANI 0F
    let mut cpu = setup_cpu(&[0xE6, 0x0F]);
    cpu.set_a(0xF5);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x05);
    assert_eq!(cpu.pc(), 2);
}

#[test]
fn test_xri_ori() {
    // XRI FF / ORI 01
    let mut cpu = setup_cpu(&[0xEE, 0xFF, 0xF6, 0x01]);
    cpu.set_a(0xF0);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x0F);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x0F);
}

// ========== CMP / CPI ==========

#[test]
fn test_cmp_equal() {
    // CMP B
    let mut cpu = setup_cpu(&[0xB8]);
    cpu.set_a(0x05);
    cpu.set_b(0x05);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x05);
    assert!(cpu.flags().zero);
    assert!(!cpu.flags().carry);
}

#[test]
fn test_cmp_less() {
    // CMP B
    let mut cpu = setup_cpu(&[0xB8]);
    cpu.set_a(0x03);
    cpu.set_b(0x05);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x03);
    assert!(!cpu.flags().zero);
    assert!(cpu.flags().carry);
}

#[test]
fn test_cmp_greater() {
    // CMP B
    let mut cpu = setup_cpu(&[0xB8]);
    cpu.set_a(0x05);
    cpu.set_b(0x03);

    cpu.step().unwrap();

    assert!(!cpu.flags().zero);
    assert!(!cpu.flags().carry);
}

#[test]
fn test_cmp_leaves_aux_carry() {
    // CMP A
    let mut cpu = setup_cpu(&[0xBF]);
    set_flags(&mut cpu, false, true);

    cpu.step().unwrap();

    assert!(cpu.flags().zero);
    assert!(cpu.flags().aux_carry);
}

#[test]
fn test_cpi() {
    // CPI 10
    let mut cpu = setup_cpu(&[0xFE, 0x10]);
    cpu.set_a(0x10);

    cpu.step().unwrap();

    assert!(cpu.flags().zero);
    assert_eq!(cpu.pc(), 2);
}

// ========== CMA / STC / CMC ==========

#[test]
fn test_cma_leaves_flags() {
    let mut cpu = setup_cpu(&[0x2F]);
    cpu.set_a(0x0F);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xF0);
    assert_eq!(cpu.flags(), Flags::default());
}

#[test]
fn test_stc_then_cmc() {
    let mut cpu = setup_cpu(&[0x37, 0x3F, 0x3F]);

    cpu.step().unwrap();
    assert!(cpu.flags().carry);

    cpu.step().unwrap();
    assert!(!cpu.flags().carry);

    cpu.step().unwrap();
    assert!(cpu.flags().carry);
}

// ========== Rotates ==========

#[test]
fn test_rlc() {
    let mut cpu = setup_cpu(&[0x07]);
    cpu.set_a(0x81);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x03);
    assert!(cpu.flags().carry);
}

#[test]
fn test_rrc() {
    let mut cpu = setup_cpu(&[0x0F]);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flags().carry);
}

#[test]
fn test_ral_through_carry() {
    let mut cpu = setup_cpu(&[0x17]);
    cpu.set_a(0x80);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flags().carry);
}

#[test]
fn test_rar_through_carry() {
    let mut cpu = setup_cpu(&[0x1F]);
    cpu.set_a(0x01);
    set_flags(&mut cpu, true, false);

    cpu.step().unwrap();

    // Old carry enters bit 7; carry ends up clear even though bit 0 was set
    assert_eq!(cpu.a(), 0x80);
    assert!(!cpu.flags().carry);
}

#[test]
fn test_rar_always_clears_carry() {
    for (a, carry_in, expected) in [(0xFF, false, 0x7F), (0xFF, true, 0xFF), (0x02, false, 0x01)] {
        let mut cpu = setup_cpu(&[0x1F]);
        cpu.set_a(a);
        set_flags(&mut cpu, carry_in, false);

        cpu.step().unwrap();

        assert_eq!(cpu.a(), expected, "a=0x{:02X}", a);
        assert!(!cpu.flags().carry, "a=0x{:02X}", a);
    }
}

#[test]
fn test_rotates_leave_other_flags() {
    let mut cpu = setup_cpu(&[0x07]);
    cpu.set_flags(Flags {
        zero: true,
        sign: true,
        ..Flags::default()
    });
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert!(cpu.flags().zero);
    assert!(cpu.flags().sign);
}
