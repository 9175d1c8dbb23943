//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements accumulator arithmetic and logic:
//! - ADD / ADC / SUB / SBB / ANA / XRA / ORA / CMP with a register or `M`
//! - ADI / ACI / SUI / SBI / ANI / XRI / ORI / CPI with an immediate byte
//! - DAD: 16-bit add of a register pair into H:L
//! - CMA: Complement accumulator
//!
//! Every 8-bit result is computed into a `u16` first so the flags see the carry
//! (or the wrapped borrow) before the value is narrowed into A.

use crate::opcodes::AluOp;
use crate::registers::{Register, RegisterPair};
use crate::{ExecutionError, CPU};

/// Executes a register-operand ALU instruction (opcodes 0x80-0xBF).
pub(crate) fn execute_alu(
    cpu: &mut CPU,
    opcode: u8,
    op: AluOp,
    operand: Register,
) -> Result<(), ExecutionError> {
    let value = cpu.get(operand)?;
    apply(cpu, op, value);
    cpu.advance(opcode);
    Ok(())
}

/// Executes an immediate-operand ALU instruction.
pub(crate) fn execute_alu_immediate(
    cpu: &mut CPU,
    opcode: u8,
    op: AluOp,
) -> Result<(), ExecutionError> {
    let value = cpu.operand_byte()?;
    apply(cpu, op, value);
    cpu.advance(opcode);
    Ok(())
}

fn apply(cpu: &mut CPU, op: AluOp, value: u8) {
    let a = cpu.registers.a as u16;
    let carry_in = cpu.flags.carry as u16;

    let wide = match op {
        AluOp::Add => a + value as u16,
        AluOp::AddWithCarry => a + value as u16 + carry_in,
        // a borrow wraps the intermediate above 0xFF, which sets carry
        AluOp::Subtract => a.wrapping_sub(value as u16),
        AluOp::SubtractWithBorrow => a.wrapping_sub(value as u16).wrapping_sub(carry_in),
        AluOp::And | AluOp::Xor | AluOp::Or => {
            let result = match op {
                AluOp::And => cpu.registers.a & value,
                AluOp::Xor => cpu.registers.a ^ value,
                _ => cpu.registers.a | value,
            };
            cpu.flags.check_logic(result);
            cpu.registers.a = result;
            return;
        }
        AluOp::Compare => {
            cpu.flags.check_compare(cpu.registers.a, value);
            return;
        }
    };

    cpu.flags.check(wide);
    cpu.registers.a = wide as u8;
}

/// Executes the DAD (Double Add) instruction.
///
/// Adds B:C, D:E, H:L or SP into H:L. The sum wraps at 16 bits and the carry
/// flag is always cleared, even when the addition overflows.
pub(crate) fn execute_dad(
    cpu: &mut CPU,
    opcode: u8,
    pair: RegisterPair,
) -> Result<(), ExecutionError> {
    let sum = cpu.registers.hl().wrapping_add(cpu.pair(pair));
    cpu.set_pair(RegisterPair::HL, sum);
    cpu.flags.carry = false;
    cpu.advance(opcode);
    Ok(())
}

/// Executes the CMA (Complement Accumulator) instruction.
///
/// No flags are affected.
pub(crate) fn execute_cma(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    cpu.registers.a = !cpu.registers.a;
    cpu.advance(opcode);
    Ok(())
}
