//! # Load and Store Instructions
//!
//! This module implements the memory transfer operations:
//! - LXI: Load register pair immediate
//! - LDA / STA: Load / store accumulator direct
//! - LHLD / SHLD: Load / store H:L direct
//! - LDAX / STAX: Load / store accumulator indirect through B:C or D:E
//!
//! Direct addresses are indices into the address space, low byte first.
//! No flags are affected.

use crate::registers::RegisterPair;
use crate::{ExecutionError, CPU};

/// Executes the LXI (Load register pair Immediate) instruction.
///
/// The 16-bit operand is stored into B:C, D:E, H:L or SP.
pub(crate) fn execute_lxi(
    cpu: &mut CPU,
    opcode: u8,
    pair: RegisterPair,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_word()?;
    cpu.set_pair(pair, value);
    cpu.advance(opcode);
    Ok(())
}

/// Executes the STA (Store Accumulator direct) instruction.
pub(crate) fn execute_sta(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    let addr = cpu.operand_word()?;
    cpu.write_byte(addr, cpu.registers.a)?;
    cpu.advance(opcode);
    Ok(())
}

/// Executes the LDA (Load Accumulator direct) instruction.
pub(crate) fn execute_lda(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    let addr = cpu.operand_word()?;
    cpu.registers.a = cpu.read_byte(addr)?;
    cpu.advance(opcode);
    Ok(())
}

/// Executes the SHLD (Store H and L direct) instruction.
///
/// L is stored at the operand address and H at the next one.
pub(crate) fn execute_shld(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    let addr = cpu.operand_word()?;
    cpu.write_byte(addr, cpu.registers.l)?;
    cpu.write_byte(addr.wrapping_add(1), cpu.registers.h)?;
    cpu.advance(opcode);
    Ok(())
}

/// Executes the LHLD (Load H and L direct) instruction.
pub(crate) fn execute_lhld(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    let addr = cpu.operand_word()?;
    let low = cpu.read_byte(addr)?;
    let high = cpu.read_byte(addr.wrapping_add(1))?;
    cpu.registers.l = low;
    cpu.registers.h = high;
    cpu.advance(opcode);
    Ok(())
}

/// Executes the STAX (Store Accumulator indirect) instruction.
pub(crate) fn execute_stax(
    cpu: &mut CPU,
    opcode: u8,
    pair: RegisterPair,
) -> Result<(), ExecutionError> {
    let addr = cpu.pair(pair);
    cpu.write_byte(addr, cpu.registers.a)?;
    cpu.advance(opcode);
    Ok(())
}

/// Executes the LDAX (Load Accumulator indirect) instruction.
pub(crate) fn execute_ldax(
    cpu: &mut CPU,
    opcode: u8,
    pair: RegisterPair,
) -> Result<(), ExecutionError> {
    let addr = cpu.pair(pair);
    cpu.registers.a = cpu.read_byte(addr)?;
    cpu.advance(opcode);
    Ok(())
}
