//! # Carry Flag Instructions
//!
//! - STC: Set Carry
//! - CMC: Complement Carry

use crate::{ExecutionError, CPU};

/// Executes the STC (Set Carry) instruction.
pub(crate) fn execute_stc(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    cpu.flags.carry = true;
    cpu.advance(opcode);
    Ok(())
}

/// Executes the CMC (Complement Carry) instruction.
pub(crate) fn execute_cmc(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    cpu.flags.carry = !cpu.flags.carry;
    cpu.advance(opcode);
    Ok(())
}
