//! # Register Transfer Instructions
//!
//! - MOV: Move register to register
//! - MVI: Move immediate to register
//! - XCHG: Exchange D:E with H:L
//!
//! No flags are affected by any transfer instruction.

use crate::registers::Register;
use crate::{ExecutionError, CPU};

/// Executes the MOV (Move) instruction.
///
/// Copies `src` into `dst`. Either side may be `M`; a store into `M` goes
/// through the protection check.
pub(crate) fn execute_mov(
    cpu: &mut CPU,
    opcode: u8,
    dst: Register,
    src: Register,
) -> Result<(), ExecutionError> {
    let value = cpu.get(src)?;
    cpu.set(dst, value)?;
    cpu.advance(opcode);
    Ok(())
}

/// Executes the MVI (Move Immediate) instruction.
///
/// Loads the byte following the opcode into `dst`.
pub(crate) fn execute_mvi(
    cpu: &mut CPU,
    opcode: u8,
    dst: Register,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_byte()?;
    cpu.set(dst, value)?;
    cpu.advance(opcode);
    Ok(())
}

/// Executes the XCHG (Exchange) instruction.
///
/// Swaps H with D and L with E.
pub(crate) fn execute_xchg(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    let regs = &mut cpu.registers;
    std::mem::swap(&mut regs.h, &mut regs.d);
    std::mem::swap(&mut regs.l, &mut regs.e);
    cpu.advance(opcode);
    Ok(())
}
