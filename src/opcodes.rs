//! # Instruction Decoding and Opcode Metadata
//!
//! Every fetched byte is decoded through two fixed tiers:
//!
//! - **Explicit opcodes**: instructions with one opcode each, or a handful of
//!   opcodes differing only in a register-pair field (`LXI`, `PUSH`, `DAD`, ...)
//! - **Patterned families**: `MOV` (0x40-0x7F), the register ALU block
//!   (0x80-0xBF), `INR`/`DCR`, where the low three bits (or bits 3-5) select an
//!   operand from B, C, D, E, H, L, M, A
//!
//! The explicit tier is consulted first, which is what makes 0x76 `HLT` rather
//! than `MOV M,M`. Bytes matched by neither tier decode to `None`.
//!
//! [`OPCODE_TABLE`] is generated from the decoder at compile time, so the
//! metadata and the executed semantics cannot drift apart.
//!
//! The table covers:
//! - **231 recognized opcodes**
//! - **25 unrecognized opcodes** (`DAA`, `RST n`, `EI`/`DI`, `PUSH`/`POP PSW`
//!   and the undocumented slots), marked with the "???" mnemonic

use crate::addressing::AddressingMode;
use crate::flags::Flags;
use crate::registers::{Register, RegisterPair};

/// Metadata for a single opcode.
///
/// # Examples
///
/// ```
/// use lib8080::{OPCODE_TABLE, AddressingMode};
///
/// // MVI A,d8
/// let mvi_a = &OPCODE_TABLE[0x3E];
/// assert_eq!(mvi_a.mnemonic, "MVI");
/// assert_eq!(mvi_a.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(mvi_a.size_bytes, 2);
/// assert!(mvi_a.implemented);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic (e.g., "MOV", "JNZ", "???" for unrecognized bytes).
    pub mnemonic: &'static str,

    /// How the instruction locates its operand.
    pub addressing_mode: AddressingMode,

    /// Total instruction size in bytes (opcode + operands).
    ///
    /// Always 1, 2 or 3. Unrecognized opcodes report 1.
    pub size_bytes: u8,

    /// Whether the decoder recognizes this opcode.
    pub implemented: bool,
}

impl OpcodeMetadata {
    const UNRECOGNIZED: OpcodeMetadata = OpcodeMetadata {
        mnemonic: "???",
        addressing_mode: AddressingMode::Implied,
        size_bytes: 1,
        implemented: false,
    };
}

/// Condition tested by `Jcc`, `Ccc` and `Rcc`, decoded from bits 3-5.
///
/// Each condition tests exactly one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Z clear
    NotZero,
    /// Z set
    Zero,
    /// C clear
    NoCarry,
    /// C set
    Carry,
    /// PO, taken when P is set
    ParityOdd,
    /// PE, taken when P is clear
    ParityEven,
    /// S clear
    Plus,
    /// S set
    Minus,
}

impl Condition {
    pub const fn from_opcode(opcode: u8) -> Condition {
        match (opcode >> 3) & 0x07 {
            0 => Condition::NotZero,
            1 => Condition::Zero,
            2 => Condition::NoCarry,
            3 => Condition::Carry,
            4 => Condition::ParityOdd,
            5 => Condition::ParityEven,
            6 => Condition::Plus,
            _ => Condition::Minus,
        }
    }

    /// Evaluates the condition against the current flags.
    ///
    /// The parity pair is inverted: `PE` holds when P is clear and `PO` when
    /// P is set.
    pub fn holds(self, flags: &Flags) -> bool {
        match self {
            Condition::NotZero => !flags.zero,
            Condition::Zero => flags.zero,
            Condition::NoCarry => !flags.carry,
            Condition::Carry => flags.carry,
            Condition::ParityOdd => flags.parity,
            Condition::ParityEven => !flags.parity,
            Condition::Plus => !flags.sign,
            Condition::Minus => flags.sign,
        }
    }

    /// Mnemonic suffix (`NZ`, `Z`, `NC`, ...).
    pub const fn suffix(self) -> &'static str {
        match self {
            Condition::NotZero => "NZ",
            Condition::Zero => "Z",
            Condition::NoCarry => "NC",
            Condition::Carry => "C",
            Condition::ParityOdd => "PO",
            Condition::ParityEven => "PE",
            Condition::Plus => "P",
            Condition::Minus => "M",
        }
    }
}

/// Accumulator operation, decoded from bits 3-5 of the ALU block and of the
/// immediate forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    AddWithCarry,
    Subtract,
    SubtractWithBorrow,
    And,
    Xor,
    Or,
    Compare,
}

impl AluOp {
    pub const fn from_opcode(opcode: u8) -> AluOp {
        match (opcode >> 3) & 0x07 {
            0 => AluOp::Add,
            1 => AluOp::AddWithCarry,
            2 => AluOp::Subtract,
            3 => AluOp::SubtractWithBorrow,
            4 => AluOp::And,
            5 => AluOp::Xor,
            6 => AluOp::Or,
            _ => AluOp::Compare,
        }
    }

    /// Register-operand mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::AddWithCarry => "ADC",
            AluOp::Subtract => "SUB",
            AluOp::SubtractWithBorrow => "SBB",
            AluOp::And => "ANA",
            AluOp::Xor => "XRA",
            AluOp::Or => "ORA",
            AluOp::Compare => "CMP",
        }
    }

    /// Immediate-operand mnemonic.
    pub const fn immediate_mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADI",
            AluOp::AddWithCarry => "ACI",
            AluOp::Subtract => "SUI",
            AluOp::SubtractWithBorrow => "SBI",
            AluOp::And => "ANI",
            AluOp::Xor => "XRI",
            AluOp::Or => "ORI",
            AluOp::Compare => "CPI",
        }
    }
}

/// A decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Nop,
    /// MOV dst,src
    Move { dst: Register, src: Register },
    /// MVI r,d8
    MoveImmediate(Register),
    /// LXI rp,d16
    LoadPairImmediate(RegisterPair),
    /// STA a16
    StoreAccumulator,
    /// LDA a16
    LoadAccumulator,
    /// SHLD a16
    StoreHl,
    /// LHLD a16
    LoadHl,
    /// STAX B|D
    StoreAccumulatorIndirect(RegisterPair),
    /// LDAX B|D
    LoadAccumulatorIndirect(RegisterPair),
    /// XCHG
    Exchange,
    /// ADD/ADC/SUB/SBB/ANA/XRA/ORA/CMP r
    Alu { op: AluOp, operand: Register },
    /// ADI/ACI/SUI/SBI/ANI/XRI/ORI/CPI d8
    AluImmediate(AluOp),
    /// INR r
    Increment(Register),
    /// DCR r
    Decrement(Register),
    /// INX rp
    IncrementPair(RegisterPair),
    /// DCX rp
    DecrementPair(RegisterPair),
    /// DAD rp
    AddPair(RegisterPair),
    RotateLeft,
    RotateRight,
    RotateLeftThroughCarry,
    RotateRightThroughCarry,
    ComplementAccumulator,
    ComplementCarry,
    SetCarry,
    Jump,
    JumpIf(Condition),
    Call,
    CallIf(Condition),
    Return,
    ReturnIf(Condition),
    /// PUSH B|D|H
    Push(RegisterPair),
    /// POP B|D|H
    Pop(RegisterPair),
    /// XTHL
    ExchangeStack,
    /// PCHL
    JumpHl,
    /// SPHL
    LoadSpFromHl,
    /// IN port
    Input,
    /// OUT port
    Output,
    Halt,
}

impl Instruction {
    /// Decodes an opcode byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8080::{Instruction, Register};
    ///
    /// assert_eq!(Instruction::decode(0x76), Some(Instruction::Halt));
    /// assert_eq!(
    ///     Instruction::decode(0x78),
    ///     Some(Instruction::Move { dst: Register::A, src: Register::B })
    /// );
    /// assert_eq!(Instruction::decode(0x27), None); // DAA
    /// ```
    pub const fn decode(opcode: u8) -> Option<Instruction> {
        match Self::decode_explicit(opcode) {
            Some(instruction) => Some(instruction),
            None => Self::decode_patterned(opcode),
        }
    }

    const fn decode_explicit(opcode: u8) -> Option<Instruction> {
        let pair = RegisterPair::from_opcode(opcode);
        let instruction = match opcode {
            0x00 => Instruction::Nop,
            0x76 => Instruction::Halt,

            0x01 | 0x11 | 0x21 | 0x31 => Instruction::LoadPairImmediate(pair),
            0x02 | 0x12 => Instruction::StoreAccumulatorIndirect(pair),
            0x0A | 0x1A => Instruction::LoadAccumulatorIndirect(pair),
            0x22 => Instruction::StoreHl,
            0x2A => Instruction::LoadHl,
            0x32 => Instruction::StoreAccumulator,
            0x3A => Instruction::LoadAccumulator,

            0x03 | 0x13 | 0x23 | 0x33 => Instruction::IncrementPair(pair),
            0x0B | 0x1B | 0x2B | 0x3B => Instruction::DecrementPair(pair),
            0x09 | 0x19 | 0x29 | 0x39 => Instruction::AddPair(pair),

            0x07 => Instruction::RotateLeft,
            0x0F => Instruction::RotateRight,
            0x17 => Instruction::RotateLeftThroughCarry,
            0x1F => Instruction::RotateRightThroughCarry,
            0x2F => Instruction::ComplementAccumulator,
            0x37 => Instruction::SetCarry,
            0x3F => Instruction::ComplementCarry,

            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
                Instruction::AluImmediate(AluOp::from_opcode(opcode))
            }

            0xC3 => Instruction::Jump,
            0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA => {
                Instruction::JumpIf(Condition::from_opcode(opcode))
            }
            0xCD => Instruction::Call,
            0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC => {
                Instruction::CallIf(Condition::from_opcode(opcode))
            }
            0xC9 => Instruction::Return,
            0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => {
                Instruction::ReturnIf(Condition::from_opcode(opcode))
            }

            0xC5 | 0xD5 | 0xE5 => Instruction::Push(pair),
            0xC1 | 0xD1 | 0xE1 => Instruction::Pop(pair),
            0xE3 => Instruction::ExchangeStack,
            0xE9 => Instruction::JumpHl,
            0xF9 => Instruction::LoadSpFromHl,
            0xEB => Instruction::Exchange,

            0xD3 => Instruction::Output,
            0xDB => Instruction::Input,

            _ => return None,
        };
        Some(instruction)
    }

    const fn decode_patterned(opcode: u8) -> Option<Instruction> {
        let field = Register::from_code(opcode >> 3);
        let low = Register::from_code(opcode);
        let instruction = match opcode {
            0x40..=0x7F => Instruction::Move {
                dst: field,
                src: low,
            },
            0x80..=0xBF => Instruction::Alu {
                op: AluOp::from_opcode(opcode),
                operand: low,
            },
            _ if opcode & 0xC7 == 0x04 => Instruction::Increment(field),
            _ if opcode & 0xC7 == 0x05 => Instruction::Decrement(field),
            _ if opcode & 0xC7 == 0x06 => Instruction::MoveImmediate(field),
            _ => return None,
        };
        Some(instruction)
    }

    /// Instruction mnemonic without operands.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Instruction::Nop => "NOP",
            Instruction::Move { .. } => "MOV",
            Instruction::MoveImmediate(_) => "MVI",
            Instruction::LoadPairImmediate(_) => "LXI",
            Instruction::StoreAccumulator => "STA",
            Instruction::LoadAccumulator => "LDA",
            Instruction::StoreHl => "SHLD",
            Instruction::LoadHl => "LHLD",
            Instruction::StoreAccumulatorIndirect(_) => "STAX",
            Instruction::LoadAccumulatorIndirect(_) => "LDAX",
            Instruction::Exchange => "XCHG",
            Instruction::Alu { op, .. } => op.mnemonic(),
            Instruction::AluImmediate(op) => op.immediate_mnemonic(),
            Instruction::Increment(_) => "INR",
            Instruction::Decrement(_) => "DCR",
            Instruction::IncrementPair(_) => "INX",
            Instruction::DecrementPair(_) => "DCX",
            Instruction::AddPair(_) => "DAD",
            Instruction::RotateLeft => "RLC",
            Instruction::RotateRight => "RRC",
            Instruction::RotateLeftThroughCarry => "RAL",
            Instruction::RotateRightThroughCarry => "RAR",
            Instruction::ComplementAccumulator => "CMA",
            Instruction::ComplementCarry => "CMC",
            Instruction::SetCarry => "STC",
            Instruction::Jump => "JMP",
            Instruction::JumpIf(condition) => match condition {
                Condition::NotZero => "JNZ",
                Condition::Zero => "JZ",
                Condition::NoCarry => "JNC",
                Condition::Carry => "JC",
                Condition::ParityOdd => "JPO",
                Condition::ParityEven => "JPE",
                Condition::Plus => "JP",
                Condition::Minus => "JM",
            },
            Instruction::Call => "CALL",
            Instruction::CallIf(condition) => match condition {
                Condition::NotZero => "CNZ",
                Condition::Zero => "CZ",
                Condition::NoCarry => "CNC",
                Condition::Carry => "CC",
                Condition::ParityOdd => "CPO",
                Condition::ParityEven => "CPE",
                Condition::Plus => "CP",
                Condition::Minus => "CM",
            },
            Instruction::Return => "RET",
            Instruction::ReturnIf(condition) => match condition {
                Condition::NotZero => "RNZ",
                Condition::Zero => "RZ",
                Condition::NoCarry => "RNC",
                Condition::Carry => "RC",
                Condition::ParityOdd => "RPO",
                Condition::ParityEven => "RPE",
                Condition::Plus => "RP",
                Condition::Minus => "RM",
            },
            Instruction::Push(_) => "PUSH",
            Instruction::Pop(_) => "POP",
            Instruction::ExchangeStack => "XTHL",
            Instruction::JumpHl => "PCHL",
            Instruction::LoadSpFromHl => "SPHL",
            Instruction::Input => "IN",
            Instruction::Output => "OUT",
            Instruction::Halt => "HLT",
        }
    }

    /// How the instruction locates its operand.
    pub const fn addressing_mode(self) -> AddressingMode {
        match self {
            Instruction::Move { .. }
            | Instruction::Alu { .. }
            | Instruction::Increment(_)
            | Instruction::Decrement(_) => AddressingMode::Register,

            Instruction::StoreAccumulatorIndirect(_)
            | Instruction::LoadAccumulatorIndirect(_)
            | Instruction::Push(_)
            | Instruction::Pop(_)
            | Instruction::ExchangeStack => AddressingMode::RegisterIndirect,

            Instruction::MoveImmediate(_) | Instruction::AluImmediate(_) => {
                AddressingMode::Immediate
            }

            Instruction::LoadPairImmediate(_) => AddressingMode::ImmediateExtended,

            Instruction::StoreAccumulator
            | Instruction::LoadAccumulator
            | Instruction::StoreHl
            | Instruction::LoadHl
            | Instruction::Jump
            | Instruction::JumpIf(_)
            | Instruction::Call
            | Instruction::CallIf(_) => AddressingMode::Direct,

            Instruction::Input | Instruction::Output => AddressingMode::Port,

            _ => AddressingMode::Implied,
        }
    }

    /// Total instruction size in bytes.
    pub const fn size(self) -> u8 {
        1 + self.addressing_mode().operand_bytes()
    }
}

/// Complete 256-entry opcode metadata table.
///
/// Index into the array using the opcode byte to retrieve its metadata.
///
/// # Examples
///
/// ```
/// use lib8080::OPCODE_TABLE;
///
/// let call = &OPCODE_TABLE[0xCD];
/// assert_eq!(call.mnemonic, "CALL");
/// assert_eq!(call.size_bytes, 3);
///
/// // DAA is not part of this processor
/// let daa = &OPCODE_TABLE[0x27];
/// assert_eq!(daa.mnemonic, "???");
/// assert!(!daa.implemented);
/// ```
pub static OPCODE_TABLE: [OpcodeMetadata; 256] = build_table();

const fn build_table() -> [OpcodeMetadata; 256] {
    let mut table = [OpcodeMetadata::UNRECOGNIZED; 256];
    let mut opcode = 0;
    while opcode < 256 {
        if let Some(instruction) = Instruction::decode(opcode as u8) {
            table[opcode] = OpcodeMetadata {
                mnemonic: instruction.mnemonic(),
                addressing_mode: instruction.addressing_mode(),
                size_bytes: instruction.size(),
                implemented: true,
            };
        }
        opcode += 1;
    }
    table
}
