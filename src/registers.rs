//! # Register File
//!
//! Seven 8-bit registers (A, B, C, D, E, H, L) plus the pseudo-register M,
//! which is not stored anywhere: it names the memory cell addressed by the
//! H:L pair. Reads and writes of M are routed through the address space by
//! the CPU, so they are subject to the same protection check as any other
//! store.

use crate::ExecutionError;
use std::fmt;
use std::str::FromStr;

/// An 8-bit register operand.
///
/// The discriminants are the 3-bit operand codes used by every patterned
/// opcode family (`MOV`, `ADD`, `INR`, ...), in the fixed order
/// B, C, D, E, H, L, M, A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    B = 0,
    C = 1,
    D = 2,
    E = 3,
    H = 4,
    L = 5,
    /// Memory cell at `(H << 8) | L`
    M = 6,
    /// Accumulator
    A = 7,
}

impl Register {
    /// All operands in decode order.
    pub const ALL: [Register; 8] = [
        Register::B,
        Register::C,
        Register::D,
        Register::E,
        Register::H,
        Register::L,
        Register::M,
        Register::A,
    ];

    /// Decodes the low three bits of `code`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8080::Register;
    ///
    /// assert_eq!(Register::from_code(0), Register::B);
    /// assert_eq!(Register::from_code(6), Register::M);
    /// assert_eq!(Register::from_code(0x0F), Register::A);
    /// ```
    pub const fn from_code(code: u8) -> Register {
        Self::ALL[(code & 0x07) as usize]
    }

    /// The 3-bit operand code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Lower-case assembler name.
    pub const fn name(self) -> &'static str {
        match self {
            Register::B => "b",
            Register::C => "c",
            Register::D => "d",
            Register::E => "e",
            Register::H => "h",
            Register::L => "l",
            Register::M => "m",
            Register::A => "a",
        }
    }
}

impl FromStr for Register {
    type Err = ExecutionError;

    /// Parses a register name, ignoring case.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "a" => Ok(Register::A),
            "b" => Ok(Register::B),
            "c" => Ok(Register::C),
            "d" => Ok(Register::D),
            "e" => Ok(Register::E),
            "h" => Ok(Register::H),
            "l" => Ok(Register::L),
            "m" => Ok(Register::M),
            _ => Err(ExecutionError::InvalidRegister(name.to_string())),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 16-bit register pair operand.
///
/// Discriminants are the 2-bit codes in bits 4-5 of `LXI`, `INX`, `DCX`,
/// `DAD`, `PUSH` and `POP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterPair {
    /// B:C, named `b`
    BC = 0,
    /// D:E, named `d`
    DE = 1,
    /// H:L, named `h`
    HL = 2,
    /// Stack pointer, named `sp`
    SP = 3,
}

impl RegisterPair {
    /// Decodes bits 4-5 of an opcode.
    pub const fn from_opcode(opcode: u8) -> RegisterPair {
        match (opcode >> 4) & 0x03 {
            0 => RegisterPair::BC,
            1 => RegisterPair::DE,
            2 => RegisterPair::HL,
            _ => RegisterPair::SP,
        }
    }

    /// The 2-bit pair code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Assembler name (`b`, `d`, `h` or `sp`).
    pub const fn name(self) -> &'static str {
        match self {
            RegisterPair::BC => "b",
            RegisterPair::DE => "d",
            RegisterPair::HL => "h",
            RegisterPair::SP => "sp",
        }
    }

    /// Parses an assembler pair name, ignoring case.
    pub fn parse(name: &str) -> Option<RegisterPair> {
        match name.to_ascii_lowercase().as_str() {
            "b" | "bc" => Some(RegisterPair::BC),
            "d" | "de" => Some(RegisterPair::DE),
            "h" | "hl" => Some(RegisterPair::HL),
            "sp" => Some(RegisterPair::SP),
            _ => None,
        }
    }
}

impl fmt::Display for RegisterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stored 8-bit registers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegisterFile {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
}

impl RegisterFile {
    /// Returns a stored register, or `None` for M.
    pub fn get(&self, register: Register) -> Option<u8> {
        match register {
            Register::A => Some(self.a),
            Register::B => Some(self.b),
            Register::C => Some(self.c),
            Register::D => Some(self.d),
            Register::E => Some(self.e),
            Register::H => Some(self.h),
            Register::L => Some(self.l),
            Register::M => None,
        }
    }

    /// Stores into a register. Returns `false` for M, which has no storage.
    pub fn set(&mut self, register: Register, value: u8) -> bool {
        match register {
            Register::A => self.a = value,
            Register::B => self.b = value,
            Register::C => self.c = value,
            Register::D => self.d = value,
            Register::E => self.e = value,
            Register::H => self.h = value,
            Register::L => self.l = value,
            Register::M => return false,
        }
        true
    }

    /// Address formed by the H:L pair.
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    /// Value of B:C, D:E or H:L. `SP` is not part of the register file and
    /// yields `None`.
    pub fn pair(&self, pair: RegisterPair) -> Option<u16> {
        match pair {
            RegisterPair::BC => Some(u16::from_be_bytes([self.b, self.c])),
            RegisterPair::DE => Some(u16::from_be_bytes([self.d, self.e])),
            RegisterPair::HL => Some(self.hl()),
            RegisterPair::SP => None,
        }
    }

    /// Stores a 16-bit value into B:C, D:E or H:L (high byte first register).
    /// Returns `false` for `SP`.
    pub fn set_pair(&mut self, pair: RegisterPair, value: u16) -> bool {
        let [high, low] = value.to_be_bytes();
        match pair {
            RegisterPair::BC => {
                self.b = high;
                self.c = low;
            }
            RegisterPair::DE => {
                self.d = high;
                self.e = low;
            }
            RegisterPair::HL => {
                self.h = high;
                self.l = low;
            }
            RegisterPair::SP => return false,
        }
        true
    }
}
