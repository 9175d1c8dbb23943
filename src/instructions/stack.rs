//! # Stack Instructions
//!
//! This module implements stack operations:
//! - PUSH: Push B:C, D:E or H:L
//! - POP: Pop into B:C, D:E or H:L
//! - XTHL: Load H:L from the top of the stack
//! - SPHL: Load SP from H:L
//!
//! The stack grows downward. A push writes the high byte at SP and the low byte
//! at SP-1, then moves SP down by two; a pop reads SP+2 and SP+1 and moves SP
//! back up. Stack writes go through the protection check.
//!
//! No flags are affected.

use crate::registers::RegisterPair;
use crate::{ExecutionError, CPU};

/// Executes the PUSH instruction.
pub(crate) fn execute_push(
    cpu: &mut CPU,
    opcode: u8,
    pair: RegisterPair,
) -> Result<(), ExecutionError> {
    cpu.push_word(cpu.pair(pair))?;
    cpu.advance(opcode);
    Ok(())
}

/// Executes the POP instruction.
pub(crate) fn execute_pop(
    cpu: &mut CPU,
    opcode: u8,
    pair: RegisterPair,
) -> Result<(), ExecutionError> {
    let value = cpu.pop_word()?;
    cpu.set_pair(pair, value);
    cpu.advance(opcode);
    Ok(())
}

/// Executes the XTHL instruction.
///
/// L is loaded from the byte at SP+1 and H from the byte at SP+2, the two
/// slots a pop would read. Memory and SP are left untouched.
pub(crate) fn execute_xthl(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    let low = cpu.read_byte(cpu.sp.wrapping_add(1))?;
    let high = cpu.read_byte(cpu.sp.wrapping_add(2))?;

    cpu.registers.l = low;
    cpu.registers.h = high;

    cpu.advance(opcode);
    Ok(())
}

/// Executes the SPHL instruction.
pub(crate) fn execute_sphl(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    cpu.sp = cpu.registers.hl();
    cpu.advance(opcode);
    Ok(())
}
