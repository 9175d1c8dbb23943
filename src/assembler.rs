//! 8080 Assembler Module
//!
//! Converts assembly language source code into the byte stream and label table
//! the CPU loads with [`CPU::set_code`].
//!
//! # Source Format
//!
//! ```text
//! ; comments run to the end of the line
//! start:  mvi a, 05       ; numbers are hexadecimal
//!         mvi b, 0x03     ; 0x.., $.., ..h and %binary are accepted too
//! loop:   add b
//!         dcr b
//!         jnz loop        ; jumps and calls take a label
//!         sta 0900        ; addresses are logical (0800..0BAF)
//!         hlt
//! ```
//!
//! Mnemonics and register names are case-insensitive. Labels are
//! case-sensitive.
//!
//! # Passes
//!
//! 1. Every line is tokenized and parsed; labels get the index of the next
//!    instruction, and each instruction reserves its size
//! 2. Instructions are encoded with the complete symbol table
//!
//! Errors never stop assembly: every bad line is reported, keyed by its line
//! index. A line keeps only its first error. An [`Assembly`] with errors
//! refuses to load.

pub mod commands;
pub mod encoder;
pub mod lexer;
pub mod parser;
pub mod source_map;
pub mod symbol_table;

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::config::MemoryLayout;
use crate::opcodes::Instruction;
use crate::{ExecutionError, CPU};

use self::encoder::Encoder;
use self::lexer::{tokenize_line, LexerError};
use self::parser::{parse_line, AssemblyLine, Spanned};
use self::source_map::{AddressRange, SourceLocation, SourceMap};
use self::symbol_table::SymbolTable;

/// Complete output from assembling source code
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Encoded instructions in program order
    pub operations: Vec<Operation>,

    /// Assembled program image, starting at index 0
    pub bytes: Vec<u8>,

    /// Label to index map
    pub labels: HashMap<String, u16>,

    /// First error of every failing line, keyed by line index (0-indexed)
    pub errors: BTreeMap<usize, AssemblerError>,

    /// Source map for debugging
    pub source_map: SourceMap,
}

impl Assembly {
    /// True if no line failed.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Loads the program image and labels into a CPU.
    ///
    /// # Errors
    ///
    /// Refuses with [`LoadError::HasErrors`] if any line failed; the CPU is
    /// not touched in that case.
    pub fn load_into(&self, cpu: &mut CPU) -> Result<(), LoadError> {
        if !self.is_success() {
            return Err(LoadError::HasErrors(self.errors.len()));
        }
        cpu.set_code(&self.bytes, self.labels.clone())?;
        Ok(())
    }
}

/// Operand bytes following an opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    Byte(u8),
    /// Stored low byte first
    Word(u16),
}

/// One encoded instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Source line index
    pub line: usize,

    /// Index of the opcode byte
    pub address: u16,

    pub opcode: u8,

    /// The instruction the CPU will decode from `opcode`
    pub instruction: Instruction,

    pub operand: Operand,
}

impl Operation {
    /// Total size in bytes.
    pub fn size(&self) -> u8 {
        self.instruction.size()
    }

    /// Appends the opcode and operand bytes.
    pub fn write_bytes(&self, out: &mut Vec<u8>) {
        out.push(self.opcode);
        match self.operand {
            Operand::None => {}
            Operand::Byte(value) => out.push(value),
            Operand::Word(value) => out.extend_from_slice(&value.to_le_bytes()),
        }
    }
}

/// A symbol table entry mapping a label to an index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Label name (case-sensitive)
    pub name: String,

    /// Index of the instruction following the label
    pub address: u16,

    /// Source line where label was defined
    pub defined_at: usize,
}

/// An error encountered during assembly
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssemblerError {
    /// Error type classification
    pub kind: ErrorKind,

    /// Column number where error starts (0-indexed)
    pub column: usize,

    /// Human-readable error message
    pub message: String,
}

impl AssemblerError {
    pub fn new(kind: ErrorKind, column: usize, message: impl Into<String>) -> Self {
        AssemblerError {
            kind,
            column,
            message: message.into(),
        }
    }
}

impl From<LexerError> for AssemblerError {
    fn from(err: LexerError) -> Self {
        AssemblerError::new(ErrorKind::Syntax, err.column(), err.to_string())
    }
}

/// Classification of assembly errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Not a recognized instruction
    UnknownMnemonic,

    /// Wrong number of arguments for the mnemonic
    ArgumentCount,

    /// Register or register pair not allowed here
    InvalidRegister,

    /// Malformed number, or a value too wide for its operand
    InvalidNumber,

    /// Address outside the memory window, or a program that does not fit
    AddressOutOfRange,

    /// Label name that breaks the naming rules
    InvalidLabel,

    /// Label defined twice
    DuplicateLabel,

    /// Jump or call to a label that is never defined
    UndefinedLabel,

    /// Invalid format or unexpected character
    Syntax,
}

/// Why an [`Assembly`] could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("program has {0} assembly errors and was not loaded")]
    HasErrors(usize),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

/// Assemble source code for the reference memory layout
///
/// # Examples
///
/// ```
/// use lib8080::assemble;
///
/// let program = assemble("mvi a, 05\nhlt");
/// assert!(program.is_success());
/// assert_eq!(program.bytes, vec![0x3E, 0x05, 0x76]);
///
/// let broken = assemble("xyz r1");
/// assert!(!broken.is_success());
/// assert!(broken.errors.contains_key(&0));
/// ```
pub fn assemble(source: &str) -> Assembly {
    assemble_with(source, &MemoryLayout::default())
}

/// Assemble source code for a custom memory layout
///
/// The layout decides the accepted range of address operands and the
/// maximum program size.
pub fn assemble_with(source: &str, layout: &MemoryLayout) -> Assembly {
    let mut errors = BTreeMap::new();
    let mut symbols = SymbolTable::new();
    let mut pending: Vec<(AssemblyLine, &'static commands::CommandInfo, u16)> = Vec::new();
    let mut address: usize = 0;

    // Pass 1: parse, collect labels, reserve space
    for (line_number, text) in source.lines().enumerate() {
        let line = match tokenize_line(text, line_number)
            .map_err(AssemblerError::from)
            .and_then(|tokens| parse_line(tokens, line_number))
        {
            Ok(line) => line,
            Err(err) => {
                errors.insert(line_number, err);
                continue;
            }
        };

        let index = u16::try_from(address).unwrap_or(u16::MAX);

        if let Some(label) = &line.label {
            if let Err(err) = define_label(&mut symbols, label, index, line_number) {
                errors.insert(line_number, err);
            }
        }

        let Some(mnemonic) = &line.mnemonic else {
            continue;
        };

        let Some(info) = commands::lookup(&mnemonic.text) else {
            errors.entry(line_number).or_insert_with(|| {
                AssemblerError::new(
                    ErrorKind::UnknownMnemonic,
                    mnemonic.column,
                    format!("unknown operation encountered: {}", mnemonic.text),
                )
            });
            continue;
        };

        if line.operands.len() != info.arguments.len() {
            errors.entry(line_number).or_insert_with(|| {
                AssemblerError::new(
                    ErrorKind::ArgumentCount,
                    mnemonic.column,
                    format!(
                        "{} expects {} arguments, found {}",
                        info.name,
                        info.arguments.len(),
                        line.operands.len()
                    ),
                )
            });
            continue;
        }

        let size = info.size() as usize;
        if address + size > layout.size {
            errors.entry(line_number).or_insert_with(|| {
                AssemblerError::new(
                    ErrorKind::AddressOutOfRange,
                    mnemonic.column,
                    format!("program does not fit in {} bytes of memory", layout.size),
                )
            });
            address += size;
            continue;
        }

        pending.push((line, info, index));
        address += size;
    }

    // Pass 2: encode
    let encoder = Encoder::new(&symbols, layout);
    let mut operations = Vec::with_capacity(pending.len());
    let mut bytes = Vec::with_capacity(address.min(layout.size));
    let mut source_map = SourceMap::new();

    for (line, info, index) in &pending {
        let operation = match encoder.encode(info, line, *index) {
            Ok(operation) => operation,
            Err(err) => {
                errors.entry(line.line_number).or_insert(err);
                continue;
            }
        };

        // keep every operation at its reserved index
        bytes.resize(*index as usize, 0);
        operation.write_bytes(&mut bytes);

        if let Some((start, end)) = line.instruction_span() {
            source_map.add_mapping(
                AddressRange {
                    start: *index,
                    end: index.saturating_add(operation.size() as u16),
                },
                SourceLocation {
                    line: line.line_number,
                    column: start,
                    length: end - start,
                },
            );
        }
        operations.push(operation);
    }
    source_map.finalize();

    log::debug!(
        "assembled {} operations into {} bytes, {} labels, {} errors",
        operations.len(),
        bytes.len(),
        symbols.symbols().len(),
        errors.len()
    );

    Assembly {
        operations,
        bytes,
        labels: symbols.to_jump_table(),
        errors,
        source_map,
    }
}

fn define_label(
    symbols: &mut SymbolTable,
    label: &Spanned,
    address: u16,
    line_number: usize,
) -> Result<(), AssemblerError> {
    validate_label(&label.text)
        .map_err(|msg| AssemblerError::new(ErrorKind::InvalidLabel, label.column, msg))?;

    symbols
        .add_symbol(label.text.clone(), address, line_number)
        .map_err(|existing| {
            AssemblerError::new(
                ErrorKind::DuplicateLabel,
                label.column,
                format!(
                    "label '{}' is already defined on line {}",
                    existing.name, existing.defined_at
                ),
            )
        })
}

/// Validate a label name
///
/// Labels must:
/// - Start with a letter [a-zA-Z]
/// - Contain only alphanumeric characters and underscores
/// - Not exceed 32 characters in length
fn validate_label(name: &str) -> Result<(), String> {
    let mut chars = name.chars();

    let Some(first) = chars.next() else {
        return Err("label name cannot be empty".to_string());
    };

    if name.len() > 32 {
        return Err(format!("label name too long (max 32 characters): {}", name));
    }

    if !first.is_ascii_alphabetic() {
        return Err(format!("label must start with a letter, not '{}'", first));
    }

    for ch in chars {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(format!(
                "label contains invalid character '{}' (only letters, digits, and underscores allowed)",
                ch
            ));
        }
    }

    Ok(())
}
