//! Tests for the data transfer instructions.
//!
//! Tests cover:
//! - MOV between registers and through M
//! - MVI, LXI
//! - Direct and indirect loads and stores
//! - XCHG
//! - Writes into the protected program region

use lib8080::{ExecutionError, Register, CPU};

/// Helper function to create a CPU with `program` loaded at index 0
fn setup_cpu(program: &[u8]) -> CPU {
    let mut cpu = CPU::new();
    cpu.set_code(program, Default::default()).unwrap();
    cpu
}

// ========== MOV / MVI ==========

#[test]
fn test_mvi_register() {
    // MVI B,42
    let mut cpu = setup_cpu(&[0x06, 0x42]);

    cpu.step().unwrap();

    assert_eq!(cpu.b(), 0x42);
    assert_eq!(cpu.pc(), 2);
}

#[test]
fn test_mvi_memory() {
    // MVI M,55
    let mut cpu = setup_cpu(&[0x36, 0x55]);
    cpu.set_h(0x02);
    cpu.set_l(0x00);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0200).unwrap(), 0x55);
}

#[test]
fn test_mov_register_to_register() {
    // MOV A,B
    let mut cpu = setup_cpu(&[0x78]);
    cpu.set_b(0x37);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x37);
    assert_eq!(cpu.b(), 0x37);
    assert_eq!(cpu.pc(), 1);
}

#[test]
fn test_mov_to_memory() {
    // MOV M,A
    let mut cpu = setup_cpu(&[0x77]);
    cpu.set_h(0x01);
    cpu.set_l(0x00);
    cpu.set_a(0x99);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0100).unwrap(), 0x99);
    assert_eq!(cpu.get(Register::M).unwrap(), 0x99);
}

#[test]
fn test_mov_from_memory() {
    // MOV E,M
    let mut cpu = setup_cpu(&[0x5E]);
    cpu.write_memory(0x0100, 0xA5).unwrap();
    cpu.set_h(0x01);
    cpu.set_l(0x00);

    cpu.step().unwrap();

    assert_eq!(cpu.e(), 0xA5);
}

#[test]
fn test_mov_does_not_touch_flags() {
    // MOV C,A
    let mut cpu = setup_cpu(&[0x4F]);
    cpu.set_a(0x00);
    let flags = cpu.flags();

    cpu.step().unwrap();

    assert_eq!(cpu.flags(), flags);
}

// ========== LXI ==========

#[test]
fn test_lxi_h() {
    // LXI H,1234
    let mut cpu = setup_cpu(&[0x21, 0x34, 0x12]);

    cpu.step().unwrap();

    assert_eq!(cpu.h(), 0x12);
    assert_eq!(cpu.l(), 0x34);
    assert_eq!(cpu.pc(), 3);
}

#[test]
fn test_lxi_sp() {
    // LXI SP,0300
    let mut cpu = setup_cpu(&[0x31, 0x00, 0x03]);

    cpu.step().unwrap();

    assert_eq!(cpu.sp(), 0x0300);
}

// ========== Direct Addressing ==========

#[test]
fn test_sta() {
    // STA 0200
    let mut cpu = setup_cpu(&[0x32, 0x00, 0x02]);
    cpu.set_a(0x7F);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0200).unwrap(), 0x7F);
    assert_eq!(cpu.pc(), 3);
}

#[test]
fn test_lda() {
    // LDA 0210
    let mut cpu = setup_cpu(&[0x3A, 0x10, 0x02]);
    cpu.write_memory(0x0210, 0xAB).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xAB);
}

#[test]
fn test_shld_stores_low_byte_first() {
    // SHLD 0200
    let mut cpu = setup_cpu(&[0x22, 0x00, 0x02]);
    cpu.set_h(0x12);
    cpu.set_l(0x34);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0200).unwrap(), 0x34);
    assert_eq!(cpu.memory().read(0x0201).unwrap(), 0x12);
}

#[test]
fn test_lhld() {
    // LHLD 0200
    let mut cpu = setup_cpu(&[0x2A, 0x00, 0x02]);
    cpu.write_memory(0x0200, 0xCD).unwrap();
    cpu.write_memory(0x0201, 0xAB).unwrap();

    cpu.step().unwrap();

    assert_eq!(cpu.l(), 0xCD);
    assert_eq!(cpu.h(), 0xAB);
}

// ========== Indirect Addressing ==========

#[test]
fn test_stax_d() {
    // STAX D
    let mut cpu = setup_cpu(&[0x12]);
    cpu.set_d(0x02);
    cpu.set_e(0x00);
    cpu.set_a(0x05);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0200).unwrap(), 0x05);
}

#[test]
fn test_ldax_b() {
    // LDAX B
    let mut cpu = setup_cpu(&[0x0A]);
    cpu.write_memory(0x0123, 0x66).unwrap();
    cpu.set_b(0x01);
    cpu.set_c(0x23);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x66);
}

// ========== XCHG ==========

#[test]
fn test_xchg() {
    let mut cpu = setup_cpu(&[0xEB]);
    cpu.set_h(0x01);
    cpu.set_l(0x02);
    cpu.set_d(0x03);
    cpu.set_e(0x04);

    cpu.step().unwrap();

    assert_eq!((cpu.h(), cpu.l()), (0x03, 0x04));
    assert_eq!((cpu.d(), cpu.e()), (0x01, 0x02));
}

// ========== Protection ==========

#[test]
fn test_store_into_program_fails() {
    // STA 0001
    let mut cpu = setup_cpu(&[0x32, 0x01, 0x00]);

    let err = cpu.step().unwrap_err();

    assert_eq!(
        err,
        ExecutionError::ProtectedMemoryWrite {
            address: 0x0001,
            protected: 3
        }
    );
    assert_eq!(cpu.pc(), 0);
    assert_eq!(cpu.memory().read(0x0001).unwrap(), 0x01);
}

#[test]
fn test_store_outside_memory_fails() {
    // STA 2000
    let mut cpu = setup_cpu(&[0x32, 0x00, 0x20]);

    assert_eq!(
        cpu.step(),
        Err(ExecutionError::AddressOutOfRange(0x2000))
    );
}
