//! Change notifications.
//!
//! The CPU does not call back into the host. Every observable state change is
//! appended to a queue as an [`Event`], and the driver drains the queue after
//! each step (see [`CPU::drain_events`](crate::CPU::drain_events)).

use std::fmt;

/// A state change the host may want to mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The program counter moved to a new index.
    ProgramCounterChanged(u16),

    /// An output port received a value.
    OutputPortChanged { port: u8, value: u8 },

    /// The program read an input port.
    InputPortRead(u8),

    /// The program asked the host to reset its input devices.
    InputResetRequested,

    /// A byte of the address space was written.
    MemoryChanged { address: u16, value: u8 },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ProgramCounterChanged(pc) => write!(f, "pc {:04X}", pc),
            Event::OutputPortChanged { port, value } => write!(f, "out {:X} {:02X}", port, value),
            Event::InputPortRead(port) => write!(f, "in {:X}", port),
            Event::InputResetRequested => f.write_str("reset inputs"),
            Event::MemoryChanged { address, value } => write!(f, "mem {:04X} {:02X}", address, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Event::ProgramCounterChanged(0x12).to_string(), "pc 0012");
        assert_eq!(
            Event::OutputPortChanged { port: 3, value: 0x41 }.to_string(),
            "out 3 41"
        );
        assert_eq!(Event::InputResetRequested.to_string(), "reset inputs");
    }
}
