//! # Port Instructions
//!
//! - IN: Read an input port into A
//! - OUT: Write A to an output port
//!
//! Output port 0x10 is the control port. Writing a value with bit 0 set asks
//! the host to reset its input devices instead of storing anything.

use crate::events::Event;
use crate::ports::CONTROL_PORT;
use crate::{ExecutionError, CPU};

/// Executes the IN instruction.
///
/// Ports outside the input array read as 0.
pub(crate) fn execute_in(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    let port = cpu.operand_byte()?;
    cpu.registers.a = cpu.ports.input(port as usize).unwrap_or(0);
    cpu.emit(Event::InputPortRead(port));
    cpu.advance(opcode);
    Ok(())
}

/// Executes the OUT instruction.
pub(crate) fn execute_out(cpu: &mut CPU, opcode: u8) -> Result<(), ExecutionError> {
    let port = cpu.operand_byte()?;
    let a = cpu.registers.a;

    if port == CONTROL_PORT && a & 0x01 != 0 {
        cpu.emit(Event::InputResetRequested);
    } else {
        cpu.set_out(port as i32, a);
    }

    cpu.advance(opcode);
    Ok(())
}
