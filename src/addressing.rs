//! # Addressing Modes
//!
//! This module defines how an 8080 instruction locates its operand. The mode
//! also fixes how many operand bytes follow the opcode.

/// 8080 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied, Register, RegisterIndirect
/// - **1 byte**: Immediate, Port
/// - **2 bytes**: ImmediateExtended, Direct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, or the operand is fixed by the instruction.
    ///
    /// Examples: NOP, RLC, XCHG, RET
    Implied,

    /// Operand is an 8-bit register selected by bits of the opcode. `M` makes
    /// this a memory access through H:L.
    ///
    /// Examples: MOV B,C, ADD M, INR A
    Register,

    /// Operand is the memory cell addressed by a register pair.
    ///
    /// Examples: LDAX B, STAX D, and PUSH/POP which address through SP
    RegisterIndirect,

    /// 8-bit constant following the opcode.
    ///
    /// Example: MVI A,05 (load 0x05 into the accumulator)
    Immediate,

    /// 16-bit constant following the opcode, low byte first.
    ///
    /// Example: LXI H,0123
    ImmediateExtended,

    /// 16-bit address following the opcode, low byte first.
    ///
    /// Examples: LDA 0900, JMP loop, CALL sub
    Direct,

    /// 8-bit port number following the opcode.
    ///
    /// Examples: IN 02, OUT 10
    Port,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Register | AddressingMode::RegisterIndirect => 0,
            AddressingMode::Immediate | AddressingMode::Port => 1,
            AddressingMode::ImmediateExtended | AddressingMode::Direct => 2,
        }
    }
}
