//! # Increment and Decrement Instructions
//!
//! - INR / DCR: 8-bit increment / decrement of a register or `M`. S, Z, AC and
//!   P are updated, C is preserved.
//! - INX / DCX: 16-bit increment / decrement of a register pair or SP. No
//!   flags are affected.

use crate::registers::{Register, RegisterPair};
use crate::{ExecutionError, CPU};

/// Executes the INR (Increment Register) instruction.
pub(crate) fn execute_inr(
    cpu: &mut CPU,
    opcode: u8,
    register: Register,
) -> Result<(), ExecutionError> {
    let wide = cpu.get(register)? as u16 + 1;
    cpu.set(register, wide as u8)?;
    cpu.flags.check_arith(wide);
    cpu.advance(opcode);
    Ok(())
}

/// Executes the DCR (Decrement Register) instruction.
pub(crate) fn execute_dcr(
    cpu: &mut CPU,
    opcode: u8,
    register: Register,
) -> Result<(), ExecutionError> {
    let wide = (cpu.get(register)? as u16).wrapping_sub(1);
    cpu.set(register, wide as u8)?;
    cpu.flags.check_arith(wide);
    cpu.advance(opcode);
    Ok(())
}

/// Executes the INX (Increment register pair) instruction.
pub(crate) fn execute_inx(
    cpu: &mut CPU,
    opcode: u8,
    pair: RegisterPair,
) -> Result<(), ExecutionError> {
    let value = cpu.pair(pair).wrapping_add(1);
    cpu.set_pair(pair, value);
    cpu.advance(opcode);
    Ok(())
}

/// Executes the DCX (Decrement register pair) instruction.
pub(crate) fn execute_dcx(
    cpu: &mut CPU,
    opcode: u8,
    pair: RegisterPair,
) -> Result<(), ExecutionError> {
    let value = cpu.pair(pair).wrapping_sub(1);
    cpu.set_pair(pair, value);
    cpu.advance(opcode);
    Ok(())
}
