//! # 8080 Instruction Implementations
//!
//! This module contains the implementations of all recognized instructions, organized by
//! category. Each instruction is implemented as a standalone function that takes a mutable
//! reference to the CPU, the opcode byte and the operands decoded from it.
//!
//! ## Categories
//!
//! - **alu**: Accumulator arithmetic and logic (ADD..CMP, ADI..CPI, DAD, CMA)
//! - **branches**: Control transfer (JMP, Jcc, CALL, Ccc, RET, Rcc, PCHL)
//! - **shifts**: Accumulator rotates (RLC, RRC, RAL, RAR)
//! - **load_store**: Direct and indirect loads and stores (LXI, LDA, STA, LHLD, SHLD, LDAX, STAX)
//! - **inc_dec**: Increment and decrement (INR, DCR, INX, DCX)
//! - **control**: NOP and HLT
//! - **stack**: Stack operations (PUSH, POP, XTHL, SPHL)
//! - **flags**: Carry manipulation (STC, CMC)
//! - **transfer**: Register transfers (MOV, MVI, XCHG)
//! - **io**: Port access (IN, OUT)

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod io;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

use crate::opcodes::Instruction;
use crate::{ExecutionError, CPU};

/// Executes a decoded instruction.
pub(crate) fn execute(
    cpu: &mut CPU,
    opcode: u8,
    instruction: Instruction,
) -> Result<(), ExecutionError> {
    match instruction {
        Instruction::Nop => control::execute_nop(cpu, opcode),
        Instruction::Halt => control::execute_hlt(cpu),

        Instruction::Move { dst, src } => transfer::execute_mov(cpu, opcode, dst, src),
        Instruction::MoveImmediate(dst) => transfer::execute_mvi(cpu, opcode, dst),
        Instruction::Exchange => transfer::execute_xchg(cpu, opcode),

        Instruction::LoadPairImmediate(pair) => load_store::execute_lxi(cpu, opcode, pair),
        Instruction::StoreAccumulator => load_store::execute_sta(cpu, opcode),
        Instruction::LoadAccumulator => load_store::execute_lda(cpu, opcode),
        Instruction::StoreHl => load_store::execute_shld(cpu, opcode),
        Instruction::LoadHl => load_store::execute_lhld(cpu, opcode),
        Instruction::StoreAccumulatorIndirect(pair) => load_store::execute_stax(cpu, opcode, pair),
        Instruction::LoadAccumulatorIndirect(pair) => load_store::execute_ldax(cpu, opcode, pair),

        Instruction::Alu { op, operand } => alu::execute_alu(cpu, opcode, op, operand),
        Instruction::AluImmediate(op) => alu::execute_alu_immediate(cpu, opcode, op),
        Instruction::AddPair(pair) => alu::execute_dad(cpu, opcode, pair),
        Instruction::ComplementAccumulator => alu::execute_cma(cpu, opcode),

        Instruction::Increment(register) => inc_dec::execute_inr(cpu, opcode, register),
        Instruction::Decrement(register) => inc_dec::execute_dcr(cpu, opcode, register),
        Instruction::IncrementPair(pair) => inc_dec::execute_inx(cpu, opcode, pair),
        Instruction::DecrementPair(pair) => inc_dec::execute_dcx(cpu, opcode, pair),

        Instruction::RotateLeft => shifts::execute_rlc(cpu, opcode),
        Instruction::RotateRight => shifts::execute_rrc(cpu, opcode),
        Instruction::RotateLeftThroughCarry => shifts::execute_ral(cpu, opcode),
        Instruction::RotateRightThroughCarry => shifts::execute_rar(cpu, opcode),

        Instruction::SetCarry => flags::execute_stc(cpu, opcode),
        Instruction::ComplementCarry => flags::execute_cmc(cpu, opcode),

        Instruction::Jump => branches::execute_jmp(cpu),
        Instruction::JumpIf(condition) => branches::execute_jcc(cpu, opcode, condition),
        Instruction::Call => branches::execute_call(cpu),
        Instruction::CallIf(condition) => branches::execute_ccc(cpu, opcode, condition),
        Instruction::Return => branches::execute_ret(cpu),
        Instruction::ReturnIf(condition) => branches::execute_rcc(cpu, opcode, condition),
        Instruction::JumpHl => branches::execute_pchl(cpu),

        Instruction::Push(pair) => stack::execute_push(cpu, opcode, pair),
        Instruction::Pop(pair) => stack::execute_pop(cpu, opcode, pair),
        Instruction::ExchangeStack => stack::execute_xthl(cpu, opcode),
        Instruction::LoadSpFromHl => stack::execute_sphl(cpu, opcode),

        Instruction::Input => io::execute_in(cpu, opcode),
        Instruction::Output => io::execute_out(cpu, opcode),
    }
}
