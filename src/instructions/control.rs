//! # Control Instructions
//!
//! - NOP: No Operation
//! - HLT: Halt

use crate::{ExecutionError, CPU};

/// Executes the NOP (No Operation) instruction.
///
/// Only the program counter moves. No flags are affected.
pub(crate) fn execute_nop(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    cpu.advance(opcode);
    Ok(())
}

/// Executes the HLT (Halt) instruction.
///
/// The CPU enters the `Halted` state. PC stays on the HLT opcode.
pub(crate) fn execute_hlt(cpu: &mut CPU) -> Result<(), ExecutionError> {
    cpu.halt();
    Ok(())
}
