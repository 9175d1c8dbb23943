//! Tests for the fetch-decode-execute loop.
//!
//! Tests cover:
//! - Running programs to HLT
//! - Step counting and step budgets
//! - Halting on unrecognized opcodes and on running off the end of memory
//! - Change notifications queued by execution

use lib8080::{Event, ExecutionError, Flags, RunState, CPU};

/// Helper function to create a CPU with `program` loaded at index 0
fn setup_cpu(program: &[u8]) -> CPU {
    let mut cpu = CPU::new();
    cpu.set_code(program, Default::default()).unwrap();
    cpu
}

#[test]
fn test_add_program() {
    // MVI A,05 / MVI B,03 / ADD B / HLT
    let mut cpu = setup_cpu(&[0x3E, 0x05, 0x06, 0x03, 0x80, 0x76]);

    assert_eq!(cpu.run(100).unwrap(), 4);

    assert_eq!(cpu.a(), 0x08);
    assert_eq!(cpu.b(), 0x03);
    assert_eq!(cpu.flags(), Flags::default());
    assert_eq!(cpu.state(), RunState::Halted);
    assert_eq!(cpu.steps(), 4);
}

#[test]
fn test_hlt_does_not_advance_pc() {
    let mut cpu = setup_cpu(&[0x00, 0x76]);

    assert_eq!(cpu.step(), Ok(RunState::Running));
    assert_eq!(cpu.step(), Ok(RunState::Halted));

    assert_eq!(cpu.pc(), 1);
    assert_eq!(cpu.steps(), 2);
}

#[test]
fn test_halted_cpu_ignores_steps() {
    let mut cpu = setup_cpu(&[0x76]);
    cpu.step().unwrap();
    cpu.drain_events();

    assert_eq!(cpu.step(), Ok(RunState::Halted));
    assert_eq!(cpu.run(10).unwrap(), 0);

    assert_eq!(cpu.pc(), 0);
    assert_eq!(cpu.steps(), 1);
    assert!(cpu.drain_events().is_empty());
}

#[test]
fn test_countdown_loop() {
    // 0: MVI B,03
    // 2: DCR B
    // 3: JNZ 0002
    // 6: HLT
    let mut cpu = setup_cpu(&[0x06, 0x03, 0x05, 0xC2, 0x02, 0x00, 0x76]);

    assert_eq!(cpu.run(100).unwrap(), 8);

    assert_eq!(cpu.b(), 0x00);
    assert!(cpu.flags().zero);
    assert_eq!(cpu.pc(), 6);
}

#[test]
fn test_run_respects_budget() {
    // JMP 0000
    let mut cpu = setup_cpu(&[0xC3, 0x00, 0x00]);

    assert_eq!(cpu.run(50).unwrap(), 50);
    assert_eq!(cpu.state(), RunState::Running);
    assert_eq!(cpu.steps(), 50);

    cpu.reset_step_counter();
    assert_eq!(cpu.steps(), 0);
}

#[test]
fn test_unrecognized_opcode_halts() {
    // NOP / DAA
    let mut cpu = setup_cpu(&[0x00, 0x27]);

    assert_eq!(
        cpu.run(10),
        Err(ExecutionError::UnrecognizedOpcode {
            opcode: 0x27,
            pc: 1
        })
    );
    assert_eq!(cpu.state(), RunState::Halted);
    assert_eq!(cpu.steps(), 1);
    assert_eq!(cpu.pc(), 1);
}

#[test]
fn test_rst_is_unrecognized() {
    let mut cpu = setup_cpu(&[0xFF]);

    assert!(matches!(
        cpu.step(),
        Err(ExecutionError::UnrecognizedOpcode { opcode: 0xFF, .. })
    ));
}

#[test]
fn test_running_off_the_end_halts() {
    let mut cpu = CPU::new();

    assert_eq!(cpu.run(2000).unwrap(), 944);
    assert_eq!(cpu.state(), RunState::Halted);
    assert_eq!(cpu.pc(), 944);
}

#[test]
fn test_aux_carry_follows_low_byte_rule() {
    // MVI A,05 / ADI 05 / HLT
    let mut cpu = setup_cpu(&[0x3E, 0x05, 0xC6, 0x05, 0x76]);

    cpu.run(10).unwrap();

    assert_eq!(cpu.a(), 0x0A);
    assert!(cpu.flags().aux_carry);
}

#[test]
fn test_aux_carry_clear_below_ten() {
    // MVI A,04 / ADI 05 / HLT
    let mut cpu = setup_cpu(&[0x3E, 0x04, 0xC6, 0x05, 0x76]);

    cpu.run(10).unwrap();

    assert_eq!(cpu.a(), 0x09);
    assert!(!cpu.flags().aux_carry);
}

#[test]
fn test_step_events() {
    // MVI B,01 / STA 0200 / HLT
    let mut cpu = setup_cpu(&[0x06, 0x01, 0x32, 0x00, 0x02, 0x76]);
    cpu.set_a(0x42);

    cpu.step().unwrap();
    assert_eq!(cpu.drain_events(), vec![Event::ProgramCounterChanged(2)]);

    cpu.step().unwrap();
    assert_eq!(
        cpu.drain_events(),
        vec![
            Event::MemoryChanged {
                address: 0x0200,
                value: 0x42
            },
            Event::ProgramCounterChanged(5)
        ]
    );

    cpu.step().unwrap();
    assert!(cpu.drain_events().is_empty());
}

#[test]
fn test_soft_reset_restarts_program() {
    let mut cpu = setup_cpu(&[0x3E, 0x05, 0x76]);
    cpu.run(10).unwrap();

    cpu.soft_reset();

    assert_eq!(cpu.state(), RunState::Running);
    assert_eq!(cpu.a(), 0x00);
    assert_eq!(cpu.pc(), 0);

    cpu.run(10).unwrap();
    assert_eq!(cpu.a(), 0x05);
}
