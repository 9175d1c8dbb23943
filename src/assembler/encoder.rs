//! Instruction encoder for the 8080 assembler
//!
//! Resolves the operand words of a parsed line against the argument kinds of
//! its command, builds the opcode from the command's [`Encoding`] and decodes
//! the result back through the CPU decoder, so every emitted opcode is one the
//! CPU executes.

use crate::assembler::commands::{ArgumentKind, CommandInfo, Encoding};
use crate::assembler::parser::{parse_number, AssemblyLine, Spanned};
use crate::assembler::symbol_table::SymbolTable;
use crate::assembler::{AssemblerError, ErrorKind, Operand, Operation};
use crate::config::MemoryLayout;
use crate::opcodes::Instruction;
use crate::registers::{Register, RegisterPair};

/// Second-pass encoder. Needs the complete symbol table.
pub struct Encoder<'a> {
    symbols: &'a SymbolTable,
    layout: &'a MemoryLayout,
}

impl<'a> Encoder<'a> {
    pub fn new(symbols: &'a SymbolTable, layout: &'a MemoryLayout) -> Self {
        Encoder { symbols, layout }
    }

    /// Encode one line whose argument count already matches its command
    pub fn encode(
        &self,
        info: &CommandInfo,
        line: &AssemblyLine,
        address: u16,
    ) -> Result<Operation, AssemblerError> {
        let mut registers = Vec::with_capacity(2);
        let mut pair = None;
        let mut operand = Operand::None;

        for (kind, arg) in info.arguments.iter().zip(&line.operands) {
            match kind {
                ArgumentKind::Register => registers.push(parse_register(arg)?),
                ArgumentKind::RegisterPair
                | ArgumentKind::IndirectPair
                | ArgumentKind::StackPair => pair = Some(parse_pair(*kind, info, arg)?),
                ArgumentKind::Immediate8 => operand = Operand::Byte(parse_byte(arg)?),
                ArgumentKind::Immediate16 => operand = Operand::Word(parse_word(arg)?),
                ArgumentKind::Address => operand = Operand::Word(self.parse_address(arg)?),
                ArgumentKind::Label => operand = Operand::Word(self.resolve_target(arg)?),
            }
        }

        let column = line.mnemonic.as_ref().map_or(0, |m| m.column);
        let missing = || {
            AssemblerError::new(
                ErrorKind::ArgumentCount,
                column,
                format!("{} is missing an argument", info.name),
            )
        };

        let opcode = match info.encoding {
            Encoding::Fixed(opcode) => opcode,
            Encoding::Register { base, shift } => {
                let register = registers.first().ok_or_else(missing)?;
                base | (register.code() << shift)
            }
            Encoding::Move => {
                let (dst, src) = match registers[..] {
                    [dst, src] => (dst, src),
                    _ => return Err(missing()),
                };
                if dst == Register::M && src == Register::M {
                    return Err(AssemblerError::new(
                        ErrorKind::InvalidRegister,
                        column,
                        "mov m, m is not an instruction",
                    ));
                }
                0x40 | (dst.code() << 3) | src.code()
            }
            Encoding::Pair { base } => base | (pair.ok_or_else(missing)?.code() << 4),
        };

        let instruction = Instruction::decode(opcode).ok_or_else(|| {
            AssemblerError::new(
                ErrorKind::UnknownMnemonic,
                column,
                format!("{} does not encode to a processor instruction", info.name),
            )
        })?;

        Ok(Operation {
            line: line.line_number,
            address,
            opcode,
            instruction,
            operand,
        })
    }

    /// Logical address inside the memory window, converted to an index
    fn parse_address(&self, arg: &Spanned) -> Result<u16, AssemblerError> {
        let value = parse_number(&arg.text)
            .map_err(|msg| AssemblerError::new(ErrorKind::InvalidNumber, arg.column, msg))?;
        self.layout.to_index(value).ok_or_else(|| {
            AssemblerError::new(
                ErrorKind::AddressOutOfRange,
                arg.column,
                format!(
                    "address {:X} must be in {:X} to {:X} range",
                    value,
                    self.layout.display_base,
                    self.layout.display_end() - 1
                ),
            )
        })
    }

    /// Label, or a literal address when no label by that name exists.
    ///
    /// A literal must start with a digit or a `$`/`%` prefix, so a word like
    /// `bad` is an undefined label rather than hex `BAD`.
    fn resolve_target(&self, arg: &Spanned) -> Result<u16, AssemblerError> {
        if let Some(symbol) = self.symbols.lookup_symbol(&arg.text) {
            return Ok(symbol.address);
        }
        let literal = arg
            .text
            .starts_with(|ch: char| ch.is_ascii_digit() || ch == '$' || ch == '%');
        if literal && parse_number(&arg.text).is_ok() {
            return self.parse_address(arg);
        }
        Err(AssemblerError::new(
            ErrorKind::UndefinedLabel,
            arg.column,
            format!("label '{}' is not defined", arg.text),
        ))
    }
}

fn parse_register(arg: &Spanned) -> Result<Register, AssemblerError> {
    arg.text
        .parse()
        .map_err(|e: crate::ExecutionError| {
            AssemblerError::new(ErrorKind::InvalidRegister, arg.column, e.to_string())
        })
}

fn parse_pair(
    kind: ArgumentKind,
    info: &CommandInfo,
    arg: &Spanned,
) -> Result<RegisterPair, AssemblerError> {
    let allowed: &[RegisterPair] = match kind {
        ArgumentKind::IndirectPair => &[RegisterPair::BC, RegisterPair::DE],
        ArgumentKind::StackPair => &[RegisterPair::BC, RegisterPair::DE, RegisterPair::HL],
        _ => &[
            RegisterPair::BC,
            RegisterPair::DE,
            RegisterPair::HL,
            RegisterPair::SP,
        ],
    };

    match RegisterPair::parse(&arg.text) {
        Some(pair) if allowed.contains(&pair) => Ok(pair),
        _ => {
            let names: Vec<&str> = allowed.iter().map(|pair| pair.name()).collect();
            Err(AssemblerError::new(
                ErrorKind::InvalidRegister,
                arg.column,
                format!(
                    "'{}' is not a register pair for {}; expected {}",
                    arg.text,
                    info.name,
                    names.join(", ")
                ),
            ))
        }
    }
}

fn parse_byte(arg: &Spanned) -> Result<u8, AssemblerError> {
    let value = parse_word(arg)?;
    u8::try_from(value).map_err(|_| {
        AssemblerError::new(
            ErrorKind::InvalidNumber,
            arg.column,
            format!("'{}' does not fit in 8 bits", arg.text),
        )
    })
}

fn parse_word(arg: &Spanned) -> Result<u16, AssemblerError> {
    parse_number(&arg.text).map_err(|msg| AssemblerError::new(ErrorKind::InvalidNumber, arg.column, msg))
}
