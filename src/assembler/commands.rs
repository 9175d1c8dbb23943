//! Command table for the assembler
//!
//! One entry per mnemonic: the kinds of arguments it takes and how the opcode
//! is built from them. The operand bytes that follow the opcode are implied by
//! the argument kinds.

/// What an argument must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// `a`, `b`, `c`, `d`, `e`, `h`, `l` or `m`
    Register,
    /// `b`, `d`, `h` or `sp` (LXI, INX, DCX, DAD)
    RegisterPair,
    /// `b` or `d` (LDAX, STAX)
    IndirectPair,
    /// `b`, `d` or `h` (PUSH, POP)
    StackPair,
    /// 8-bit number (also port numbers)
    Immediate8,
    /// 16-bit number
    Immediate16,
    /// Logical address inside the memory window
    Address,
    /// Label, or a logical address inside the memory window
    Label,
}

impl ArgumentKind {
    /// Bytes this argument adds after the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            ArgumentKind::Register
            | ArgumentKind::RegisterPair
            | ArgumentKind::IndirectPair
            | ArgumentKind::StackPair => 0,
            ArgumentKind::Immediate8 => 1,
            ArgumentKind::Immediate16 | ArgumentKind::Address | ArgumentKind::Label => 2,
        }
    }
}

/// How the opcode byte is formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Single opcode
    Fixed(u8),
    /// `base | register << shift`, register from the first argument
    Register { base: u8, shift: u8 },
    /// `0x40 | dst << 3 | src`
    Move,
    /// `base | pair << 4`, pair from the first argument
    Pair { base: u8 },
}

/// Static description of one mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    /// Lower-case mnemonic
    pub name: &'static str,
    pub arguments: &'static [ArgumentKind],
    pub encoding: Encoding,
}

impl CommandInfo {
    /// Total instruction size in bytes.
    pub fn size(&self) -> u8 {
        1 + self
            .arguments
            .iter()
            .map(|kind| kind.operand_bytes())
            .sum::<u8>()
    }
}

use ArgumentKind::*;
use Encoding::{Fixed, Move, Pair};

const fn cmd(
    name: &'static str,
    arguments: &'static [ArgumentKind],
    encoding: Encoding,
) -> CommandInfo {
    CommandInfo {
        name,
        arguments,
        encoding,
    }
}

/// Every mnemonic the assembler accepts.
pub static COMMAND_TABLE: &[CommandInfo] = &[
    // Data transfer
    cmd("mov", &[Register, Register], Move),
    cmd("mvi", &[Register, Immediate8], Encoding::Register { base: 0x06, shift: 3 }),
    cmd("lxi", &[RegisterPair, Immediate16], Pair { base: 0x01 }),
    cmd("lda", &[Address], Fixed(0x3A)),
    cmd("sta", &[Address], Fixed(0x32)),
    cmd("lhld", &[Address], Fixed(0x2A)),
    cmd("shld", &[Address], Fixed(0x22)),
    cmd("ldax", &[IndirectPair], Pair { base: 0x0A }),
    cmd("stax", &[IndirectPair], Pair { base: 0x02 }),
    cmd("xchg", &[], Fixed(0xEB)),
    // Arithmetic and logic
    cmd("add", &[Register], Encoding::Register { base: 0x80, shift: 0 }),
    cmd("adc", &[Register], Encoding::Register { base: 0x88, shift: 0 }),
    cmd("sub", &[Register], Encoding::Register { base: 0x90, shift: 0 }),
    cmd("sbb", &[Register], Encoding::Register { base: 0x98, shift: 0 }),
    cmd("ana", &[Register], Encoding::Register { base: 0xA0, shift: 0 }),
    cmd("xra", &[Register], Encoding::Register { base: 0xA8, shift: 0 }),
    cmd("ora", &[Register], Encoding::Register { base: 0xB0, shift: 0 }),
    cmd("cmp", &[Register], Encoding::Register { base: 0xB8, shift: 0 }),
    cmd("adi", &[Immediate8], Fixed(0xC6)),
    cmd("aci", &[Immediate8], Fixed(0xCE)),
    cmd("sui", &[Immediate8], Fixed(0xD6)),
    cmd("sbi", &[Immediate8], Fixed(0xDE)),
    cmd("ani", &[Immediate8], Fixed(0xE6)),
    cmd("xri", &[Immediate8], Fixed(0xEE)),
    cmd("ori", &[Immediate8], Fixed(0xF6)),
    cmd("cpi", &[Immediate8], Fixed(0xFE)),
    cmd("inr", &[Register], Encoding::Register { base: 0x04, shift: 3 }),
    cmd("dcr", &[Register], Encoding::Register { base: 0x05, shift: 3 }),
    cmd("inx", &[RegisterPair], Pair { base: 0x03 }),
    cmd("dcx", &[RegisterPair], Pair { base: 0x0B }),
    cmd("dad", &[RegisterPair], Pair { base: 0x09 }),
    cmd("rlc", &[], Fixed(0x07)),
    cmd("rrc", &[], Fixed(0x0F)),
    cmd("ral", &[], Fixed(0x17)),
    cmd("rar", &[], Fixed(0x1F)),
    cmd("cma", &[], Fixed(0x2F)),
    cmd("stc", &[], Fixed(0x37)),
    cmd("cmc", &[], Fixed(0x3F)),
    // Branching
    cmd("jmp", &[Label], Fixed(0xC3)),
    cmd("jnz", &[Label], Fixed(0xC2)),
    cmd("jz", &[Label], Fixed(0xCA)),
    cmd("jnc", &[Label], Fixed(0xD2)),
    cmd("jc", &[Label], Fixed(0xDA)),
    cmd("jpo", &[Label], Fixed(0xE2)),
    cmd("jpe", &[Label], Fixed(0xEA)),
    cmd("jp", &[Label], Fixed(0xF2)),
    cmd("jm", &[Label], Fixed(0xFA)),
    cmd("call", &[Label], Fixed(0xCD)),
    cmd("cnz", &[Label], Fixed(0xC4)),
    cmd("cz", &[Label], Fixed(0xCC)),
    cmd("cnc", &[Label], Fixed(0xD4)),
    cmd("cc", &[Label], Fixed(0xDC)),
    cmd("cpo", &[Label], Fixed(0xE4)),
    cmd("cpe", &[Label], Fixed(0xEC)),
    cmd("cp", &[Label], Fixed(0xF4)),
    cmd("cm", &[Label], Fixed(0xFC)),
    cmd("ret", &[], Fixed(0xC9)),
    cmd("rnz", &[], Fixed(0xC0)),
    cmd("rz", &[], Fixed(0xC8)),
    cmd("rnc", &[], Fixed(0xD0)),
    cmd("rc", &[], Fixed(0xD8)),
    cmd("rpo", &[], Fixed(0xE0)),
    cmd("rpe", &[], Fixed(0xE8)),
    cmd("rp", &[], Fixed(0xF0)),
    cmd("rm", &[], Fixed(0xF8)),
    cmd("pchl", &[], Fixed(0xE9)),
    // Stack
    cmd("push", &[StackPair], Pair { base: 0xC5 }),
    cmd("pop", &[StackPair], Pair { base: 0xC1 }),
    cmd("xthl", &[], Fixed(0xE3)),
    cmd("sphl", &[], Fixed(0xF9)),
    // I/O and machine control
    cmd("in", &[Immediate8], Fixed(0xDB)),
    cmd("out", &[Immediate8], Fixed(0xD3)),
    cmd("nop", &[], Fixed(0x00)),
    cmd("hlt", &[], Fixed(0x76)),
];

/// Looks up a mnemonic, ignoring case.
pub fn lookup(mnemonic: &str) -> Option<&'static CommandInfo> {
    COMMAND_TABLE
        .iter()
        .find(|info| info.name.eq_ignore_ascii_case(mnemonic))
}
