//! # 8080 CPU Emulator Core
//!
//! An emulator for an Intel 8080 style 8-bit processor, designed for
//! clarity and for driving from an editor front end one instruction at a time.
//!
//! This crate provides the processor state (registers, flags, program counter,
//! stack pointer), a bounded address space with a write-protected program
//! region, memory-mapped input/output ports, a table-driven decoder and an
//! assembler that produces the byte stream and label table the CPU loads.
//!
//! ## Quick Start
//!
//! ```rust
//! use lib8080::{assemble, RunState, CPU};
//!
//! let program = assemble(
//!     "mvi a, 05
//!      mvi b, 03
//!      add b
//!      hlt",
//! );
//! assert!(program.is_success());
//!
//! let mut cpu = CPU::new();
//! program.load_into(&mut cpu).unwrap();
//!
//! cpu.run(100).unwrap();
//! assert_eq!(cpu.state(), RunState::Halted);
//! assert_eq!(cpu.a(), 0x08);
//! ```
//!
//! ## Architecture
//!
//! - **Owned state**: one `CPU` value owns registers, flags, memory and ports;
//!   there is no global processor state
//! - **Single stepping**: `step()` executes exactly one instruction, so a driver
//!   can stop between any two instructions
//! - **Notifications as data**: state changes are queued as [`Event`]s and
//!   drained by the driver after each step
//! - **Table-driven decode**: opcode metadata is derived from the decoder at
//!   compile time
//!
//! ## Modules
//!
//! - `cpu` - CPU state and the fetch-decode-execute loop
//! - `memory` - The protected address space
//! - `registers` / `flags` - Register file and condition flags
//! - `ports` - Input/output port arrays
//! - `events` - Change notifications
//! - `opcodes` - Instruction decoding and opcode metadata
//! - `addressing` - Addressing modes
//! - `config` - Memory layout configuration
//! - `assembler` - Source text to machine code

pub mod addressing;
pub mod assembler;
pub mod config;
pub mod cpu;
pub mod events;
pub mod flags;
pub mod memory;
pub mod opcodes;
pub mod ports;
pub mod registers;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use assembler::{assemble, assemble_with, AssemblerError, Assembly, ErrorKind, LoadError};
pub use config::{LayoutError, MemoryLayout};
pub use cpu::{RunState, CPU};
pub use events::Event;
pub use flags::{parity, Flags};
pub use memory::AddressSpace;
pub use opcodes::{AluOp, Condition, Instruction, OpcodeMetadata, OPCODE_TABLE};
pub use ports::{Ports, CONTROL_PORT, PORT_COUNT};
pub use registers::{Register, RegisterFile, RegisterPair};

use thiserror::Error;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// A register name that is not part of the processor.
    #[error("register '{0}' is not part of the processor")]
    InvalidRegister(String),

    /// A write at or below the protected program boundary.
    #[error("attempted to write at 0x{address:04X}, but 0x0000 to 0x{protected:04X} is reserved memory")]
    ProtectedMemoryWrite {
        /// Index that was written
        address: u16,
        /// Current protected length (inclusive upper bound)
        protected: u16,
    },

    /// An access outside the address space.
    #[error("address 0x{0:04X} is outside of memory")]
    AddressOutOfRange(u16),

    /// No decode tier matched the fetched byte. The processor is halted.
    #[error("processor encountered unrecognized opcode 0x{opcode:02X} at 0x{pc:04X}")]
    UnrecognizedOpcode {
        /// Fetched opcode byte
        opcode: u8,
        /// Address it was fetched from
        pc: u16,
    },

    /// A named jump to a label missing from the jump table.
    #[error("label '{0}' is not in the jump table")]
    UnknownLabel(String),

    /// A program image that does not fit in the address space.
    #[error("program of {len} bytes does not fit in {capacity} bytes of memory")]
    ProgramTooLarge {
        /// Program length in bytes
        len: usize,
        /// Address space size in bytes
        capacity: usize,
    },
}
