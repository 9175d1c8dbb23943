//! # Rotate Instructions
//!
//! This module implements the accumulator rotates:
//! - RLC: Rotate left, bit 7 into carry and bit 0
//! - RRC: Rotate right, bit 0 into carry and bit 7
//! - RAL: Rotate left through carry
//! - RAR: Rotate right through carry
//!
//! Only the carry flag is affected.

use crate::{ExecutionError, CPU};

/// Executes the RLC (Rotate Left Circular) instruction.
pub(crate) fn execute_rlc(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    let a = cpu.registers.a;
    cpu.flags.carry = (a & 0x80) != 0;
    cpu.registers.a = a.rotate_left(1);
    cpu.advance(opcode);
    Ok(())
}

/// Executes the RRC (Rotate Right Circular) instruction.
pub(crate) fn execute_rrc(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    let a = cpu.registers.a;
    cpu.flags.carry = (a & 0x01) != 0;
    cpu.registers.a = a.rotate_right(1);
    cpu.advance(opcode);
    Ok(())
}

/// Executes the RAL (Rotate Accumulator Left through carry) instruction.
///
/// The old carry enters bit 0 and the old bit 7 becomes the new carry.
pub(crate) fn execute_ral(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    let a = cpu.registers.a;
    let carry_in = cpu.flags.carry as u8;
    cpu.flags.carry = (a & 0x80) != 0;
    cpu.registers.a = (a << 1) | carry_in;
    cpu.advance(opcode);
    Ok(())
}

/// Executes the RAR (Rotate Accumulator Right through carry) instruction.
///
/// The old carry enters bit 7. Carry is always cleared afterwards, whatever
/// bit rotated out.
pub(crate) fn execute_rar(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    let a = cpu.registers.a;
    let carry_in = cpu.flags.carry as u8;
    cpu.flags.carry = false;
    cpu.registers.a = (a >> 1) | (carry_in << 7);
    cpu.advance(opcode);
    Ok(())
}
