//! Fuzz target for CPU step execution.
//!
//! This target creates arbitrary CPU states and program images,
//! then executes a few instructions to find edge cases and crashes.

#![no_main]

use arbitrary::Arbitrary;
use lib8080::{Flags, RunState, CPU};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    b: u8,
    c: u8,
    d: u8,
    e: u8,
    h: u8,
    l: u8,
    sp: u16,
    sign: bool,
    zero: bool,
    aux_carry: bool,
    parity: bool,
    carry: bool,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    /// Program image loaded at index 0
    program: Vec<u8>,
    /// Input port values
    inputs: [u8; 16],
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut cpu = CPU::new();

    if cpu.set_code(&input.program, Default::default()).is_err() {
        return;
    }

    for (port, &value) in input.inputs.iter().enumerate() {
        // the port window may overlap a large program
        let _ = cpu.set_in(port as i32, value);
    }

    let state = &input.cpu_state;
    cpu.set_a(state.a);
    cpu.set_b(state.b);
    cpu.set_c(state.c);
    cpu.set_d(state.d);
    cpu.set_e(state.e);
    cpu.set_h(state.h);
    cpu.set_l(state.l);
    cpu.set_sp(state.sp);
    cpu.set_flags(Flags {
        sign: state.sign,
        zero: state.zero,
        aux_carry: state.aux_carry,
        parity: state.parity,
        carry: state.carry,
    });

    let protected = cpu.memory().protected_length() as usize;
    let image: Vec<u8> = cpu.memory().as_slice()[..protected.min(input.program.len())].to_vec();

    // Errors are fine, panics are not
    let before = cpu.steps();
    let _ = cpu.run(input.steps as u64);

    // The program image can never be overwritten
    assert_eq!(&cpu.memory().as_slice()[..image.len()], &image[..]);
    assert!(cpu.steps() - before <= input.steps as u64);

    // A halted CPU stays halted
    if cpu.state() == RunState::Halted {
        let pc = cpu.pc();
        assert_eq!(cpu.step(), Ok(RunState::Halted));
        assert_eq!(cpu.pc(), pc);
    }
});
