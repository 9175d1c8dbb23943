//! # Control Transfer Instructions
//!
//! This module implements jumps, calls and returns:
//! - JMP / Jcc: Jump, unconditionally or if a condition holds
//! - CALL / Ccc: Call subroutine, unconditionally or if a condition holds
//! - RET / Rcc: Return, unconditionally or if a condition holds
//! - PCHL: Jump to the address in H:L
//!
//! Targets are indices into the address space. A condition tests exactly one
//! flag; when it fails the instruction falls through to the next one (3 bytes
//! for jumps and calls, 1 byte for returns).
//!
//! CALL pushes PC+2, the index of the high byte of its own operand, so a
//! matching RET resumes on that byte. For targets below 0x100 the byte is 0x00
//! and executes as NOP before the instruction following the CALL.
//!
//! No flags are affected.

use crate::opcodes::Condition;
use crate::{ExecutionError, CPU};

/// Executes the JMP (Jump) instruction.
pub(crate) fn execute_jmp(cpu: &mut CPU) -> Result<(), ExecutionError> {
    let target = cpu.operand_word()?;
    cpu.set_pc(target);
    Ok(())
}

/// Executes a conditional jump (JNZ, JZ, JNC, JC, JPO, JPE, JP, JM).
pub(crate) fn execute_jcc(
    cpu: &mut CPU,
    opcode: u8,
    condition: Condition,
) -> Result<(), ExecutionError> {
    if condition.holds(&cpu.flags) {
        execute_jmp(cpu)
    } else {
        cpu.advance(opcode);
        Ok(())
    }
}

/// Executes the CALL instruction.
///
/// Pushes PC+2 and jumps to the operand.
pub(crate) fn execute_call(cpu: &mut CPU) -> Result<(), ExecutionError> {
    // operand is read before anything is pushed
    let target = cpu.operand_word()?;
    cpu.push_word(cpu.pc.wrapping_add(2))?;
    cpu.set_pc(target);
    Ok(())
}

/// Executes a conditional call (CNZ, CZ, CNC, CC, CPO, CPE, CP, CM).
pub(crate) fn execute_ccc(
    cpu: &mut CPU,
    opcode: u8,
    condition: Condition,
) -> Result<(), ExecutionError> {
    if condition.holds(&cpu.flags) {
        execute_call(cpu)
    } else {
        cpu.advance(opcode);
        Ok(())
    }
}

/// Executes the RET (Return) instruction.
pub(crate) fn execute_ret(cpu: &mut CPU) -> Result<(), ExecutionError> {
    let target = cpu.pop_word()?;
    cpu.set_pc(target);
    Ok(())
}

/// Executes a conditional return (RNZ, RZ, RNC, RC, RPO, RPE, RP, RM).
pub(crate) fn execute_rcc(
    cpu: &mut CPU,
    opcode: u8,
    condition: Condition,
) -> Result<(), ExecutionError> {
    if condition.holds(&cpu.flags) {
        execute_ret(cpu)
    } else {
        cpu.advance(opcode);
        Ok(())
    }
}

/// Executes the PCHL instruction.
///
/// Control lands one byte past the address in HL.
pub(crate) fn execute_pchl(cpu: &mut CPU) -> Result<(), ExecutionError> {
    let target = cpu.registers.hl().wrapping_add(1);
    cpu.set_pc(target);
    Ok(())
}
