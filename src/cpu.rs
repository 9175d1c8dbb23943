//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 8080 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A) and B, C, D, E, H, L
//! - **Program counter** (PC): 16-bit index of the next instruction
//! - **Stack pointer** (SP): 16-bit index into the address space, grows downward
//! - **Status flags**: S, Z, AC, P, C (individual bool fields)
//! - **Address space**: protected program region plus the input port mirror
//! - **Ports**: 16 input and 16 output slots
//! - **Step counter**: number of instructions executed since the last reset
//!
//! ## Execution Model
//!
//! The CPU executes instructions via:
//! - `step()`: Execute one instruction
//! - `run()`: Execute until halted or the step budget is exhausted
//!
//! Every step is atomic from the driver's point of view: it either completes or
//! fails with an [`ExecutionError`] before returning. State changes are queued
//! as [`Event`]s.

use std::collections::HashMap;

use crate::config::{LayoutError, MemoryLayout};
use crate::events::Event;
use crate::flags::Flags;
use crate::instructions;
use crate::memory::AddressSpace;
use crate::opcodes::{Instruction, OPCODE_TABLE};
use crate::ports::Ports;
use crate::registers::{Register, RegisterFile, RegisterPair};
use crate::ExecutionError;

/// Whether the processor accepts further steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    /// Terminal until `reset` or `soft_reset`.
    Halted,
}

/// 8080 CPU state and execution context.
///
/// The CPU owns all processor state: registers, flags, program counter, stack
/// pointer, address space, port arrays, the jump table of the loaded program
/// and the queue of pending change notifications.
///
/// # Examples
///
/// ```
/// use lib8080::{CPU, Event, RunState};
///
/// let mut cpu = CPU::new();
///
/// // MVI A,05 / MVI B,03 / ADD B / HLT
/// cpu.set_code(&[0x3E, 0x05, 0x06, 0x03, 0x80, 0x76], Default::default())
///     .unwrap();
///
/// assert_eq!(cpu.run(10).unwrap(), 4);
/// assert_eq!(cpu.a(), 0x08);
/// assert_eq!(cpu.state(), RunState::Halted);
///
/// let events = cpu.drain_events();
/// assert!(events.contains(&Event::ProgramCounterChanged(2)));
/// ```
#[derive(Debug, Clone)]
pub struct CPU {
    /// A, B, C, D, E, H, L
    pub(crate) registers: RegisterFile,

    /// Condition flags
    pub(crate) flags: Flags,

    /// Program counter (index of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (index of the next free high byte)
    pub(crate) sp: u16,

    /// Protected address space
    pub(crate) memory: AddressSpace,

    /// Input and output ports
    pub(crate) ports: Ports,

    /// Shape of the address space
    layout: MemoryLayout,

    /// Label to index map of the loaded program
    jump_table: HashMap<String, u16>,

    state: RunState,

    /// Instructions executed since the last reset
    steps: u64,

    /// Pending notifications, oldest first
    events: Vec<Event>,
}

impl CPU {
    /// Creates a CPU over the reference memory layout.
    ///
    /// The CPU is initialized to the reset state:
    /// - All registers and flags cleared
    /// - PC = 0, SP = stack top of the layout (927)
    /// - Address space zeroed with only index 0 protected
    /// - State `Running`
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8080::{CPU, RunState};
    ///
    /// let cpu = CPU::new();
    /// assert_eq!(cpu.pc(), 0);
    /// assert_eq!(cpu.sp(), 927);
    /// assert_eq!(cpu.memory().len(), 944);
    /// assert_eq!(cpu.state(), RunState::Running);
    /// ```
    pub fn new() -> Self {
        Self::from_layout(MemoryLayout::default())
    }

    /// Creates a CPU over a custom memory layout.
    ///
    /// # Errors
    ///
    /// Returns the [`LayoutError`] reported by [`MemoryLayout::validate`].
    pub fn with_layout(layout: MemoryLayout) -> Result<Self, LayoutError> {
        layout.validate()?;
        Ok(Self::from_layout(layout))
    }

    fn from_layout(layout: MemoryLayout) -> Self {
        Self {
            registers: RegisterFile::default(),
            flags: Flags::default(),
            pc: 0,
            sp: layout.stack_top,
            memory: AddressSpace::new(&layout),
            ports: Ports::default(),
            layout,
            jump_table: HashMap::new(),
            state: RunState::Running,
            steps: 0,
            events: Vec::new(),
        }
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Fetch opcode byte at current PC
    /// 2. Decode it (explicit opcodes first, then the patterned families)
    /// 3. Execute the instruction, which moves PC past itself or to a target
    /// 4. Increment the step counter
    /// 5. Halt if PC ran off the end of the address space
    ///
    /// A halted CPU is left untouched and reports `Halted`.
    ///
    /// # Errors
    ///
    /// - `UnrecognizedOpcode` if neither decode tier matches; the CPU halts
    /// - `ProtectedMemoryWrite` / `AddressOutOfRange` from memory accesses;
    ///   the step is abandoned and the CPU keeps running
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8080::{CPU, ExecutionError, RunState};
    ///
    /// let mut cpu = CPU::new();
    /// cpu.set_code(&[0x00, 0x27], Default::default()).unwrap(); // NOP, DAA
    ///
    /// assert_eq!(cpu.step(), Ok(RunState::Running));
    /// assert_eq!(
    ///     cpu.step(),
    ///     Err(ExecutionError::UnrecognizedOpcode { opcode: 0x27, pc: 1 })
    /// );
    /// assert_eq!(cpu.state(), RunState::Halted);
    /// ```
    pub fn step(&mut self) -> Result<RunState, ExecutionError> {
        if self.state == RunState::Halted {
            return Ok(RunState::Halted);
        }

        let pc = self.pc;
        let opcode = self.memory.read(pc)?;

        let Some(instruction) = Instruction::decode(opcode) else {
            log::warn!("unrecognized opcode 0x{:02X} at 0x{:04X}, halting", opcode, pc);
            self.state = RunState::Halted;
            return Err(ExecutionError::UnrecognizedOpcode { opcode, pc });
        };

        log::trace!("0x{:04X}: {:02X} {}", pc, opcode, instruction.mnemonic());
        instructions::execute(self, opcode, instruction)?;

        self.steps += 1;
        if self.pc as usize >= self.memory.len() {
            log::info!(
                "program counter 0x{:04X} ran outside of memory after {} steps",
                self.pc,
                self.steps
            );
            self.state = RunState::Halted;
        }
        Ok(self.state)
    }

    /// Runs until the CPU halts or `max_steps` instructions have executed.
    ///
    /// Returns the number of instructions executed by this call.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    pub fn run(&mut self, max_steps: u64) -> Result<u64, ExecutionError> {
        let start_steps = self.steps;

        while self.state == RunState::Running && self.steps - start_steps < max_steps {
            self.step()?;
        }

        Ok(self.steps - start_steps)
    }

    /// Fully resets the processor.
    ///
    /// Registers, flags, PC, SP, run state and the step counter return to their
    /// initial values, memory is zeroed and the protected region is dropped.
    /// Ports and the jump table are kept.
    pub fn reset(&mut self) {
        log::debug!("full processor reset");
        self.reset_counters();
        self.memory.clear();
        self.memory.unprotect();
    }

    /// Resets the processor but keeps memory contents and protection.
    pub fn soft_reset(&mut self) {
        log::debug!("soft processor reset");
        self.reset_counters();
    }

    fn reset_counters(&mut self) {
        self.registers = RegisterFile::default();
        self.flags = Flags::default();
        self.set_pc(0);
        self.sp = self.layout.stack_top;
        self.state = RunState::Running;
        self.steps = 0;
    }

    // ========== Program Loading ==========

    /// Loads a program image at index 0 and replaces the jump table.
    ///
    /// Registers, flags and PC are left alone; call [`CPU::soft_reset`] to
    /// start the program from the top.
    ///
    /// # Errors
    ///
    /// Returns `ProgramTooLarge` if the image does not fit in memory. Nothing
    /// is changed in that case.
    pub fn set_code(
        &mut self,
        bytes: &[u8],
        jump_table: HashMap<String, u16>,
    ) -> Result<(), ExecutionError> {
        self.memory.load_program(bytes)?;
        log::debug!(
            "loaded {} bytes and {} labels, protected up to 0x{:04X}",
            bytes.len(),
            jump_table.len(),
            self.memory.protected_length()
        );
        self.jump_table = jump_table;
        Ok(())
    }

    /// Moves PC to a label of the loaded program.
    ///
    /// # Errors
    ///
    /// Returns `UnknownLabel` if the label is not in the jump table.
    pub fn jump_to(&mut self, label: &str) -> Result<(), ExecutionError> {
        let target = *self
            .jump_table
            .get(label)
            .ok_or_else(|| ExecutionError::UnknownLabel(label.to_string()))?;
        self.set_pc(target);
        Ok(())
    }

    /// Label to index map of the loaded program.
    pub fn jump_table(&self) -> &HashMap<String, u16> {
        &self.jump_table
    }

    // ========== Ports ==========

    /// Writes an output port and queues `OutputPortChanged`.
    ///
    /// Ports outside `0..16` are ignored.
    pub fn set_out(&mut self, port: i32, value: u8) {
        let Some(index) = Ports::index(port) else {
            return;
        };
        self.ports.set_output(index, value);
        self.events.push(Event::OutputPortChanged {
            port: index as u8,
            value,
        });
    }

    /// Writes an input port and its mirror byte in memory.
    ///
    /// Ports outside `0..16` are ignored.
    ///
    /// # Errors
    ///
    /// Fails if the mirror byte lies in the protected region. The port slot is
    /// not updated in that case.
    pub fn set_in(&mut self, port: i32, value: u8) -> Result<(), ExecutionError> {
        let Some(index) = Ports::index(port) else {
            return Ok(());
        };
        self.write_byte(self.layout.input_ports_base + index as u16, value)?;
        self.ports.set_input(index, value);
        Ok(())
    }

    /// Both port arrays.
    pub fn ports(&self) -> &Ports {
        &self.ports
    }

    // ========== Register Access ==========

    /// Reads a register. `M` reads memory at H:L.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib8080::{CPU, Register};
    ///
    /// let mut cpu = CPU::new();
    /// cpu.set(Register::H, 0x01).unwrap();
    /// cpu.set(Register::L, 0x00).unwrap();
    /// cpu.set(Register::M, 0x42).unwrap();
    ///
    /// assert_eq!(cpu.get(Register::M).unwrap(), 0x42);
    /// assert_eq!(cpu.memory().read(0x0100).unwrap(), 0x42);
    /// ```
    pub fn get(&self, register: Register) -> Result<u8, ExecutionError> {
        match self.registers.get(register) {
            Some(value) => Ok(value),
            None => self.memory.read(self.registers.hl()),
        }
    }

    /// Writes a register. `M` writes memory at H:L through the protection
    /// check.
    pub fn set(&mut self, register: Register, value: u8) -> Result<(), ExecutionError> {
        if !self.registers.set(register, value) {
            self.write_byte(self.registers.hl(), value)?;
        }
        Ok(())
    }

    /// Reads a register by name (`a`..`l` or `m`, any case).
    ///
    /// # Errors
    ///
    /// Returns `InvalidRegister` for any other name.
    pub fn get_by_name(&self, name: &str) -> Result<u8, ExecutionError> {
        self.get(name.parse()?)
    }

    /// Writes a register by name (`a`..`l` or `m`, any case).
    pub fn set_by_name(&mut self, name: &str, value: u8) -> Result<(), ExecutionError> {
        self.set(name.parse()?, value)
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.registers.a
    }

    pub fn b(&self) -> u8 {
        self.registers.b
    }

    pub fn c(&self) -> u8 {
        self.registers.c
    }

    pub fn d(&self) -> u8 {
        self.registers.d
    }

    pub fn e(&self) -> u8 {
        self.registers.e
    }

    pub fn h(&self) -> u8 {
        self.registers.h
    }

    pub fn l(&self) -> u8 {
        self.registers.l
    }

    /// The whole register file.
    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The stack grows downward. A push writes at SP and SP-1.
    pub fn sp(&self) -> u16 {
        self.sp
    }

    /// Returns the condition flags.
    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Returns the number of instructions executed since the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn reset_step_counter(&mut self) {
        self.steps = 0;
    }

    /// Returns the address space.
    pub fn memory(&self) -> &AddressSpace {
        &self.memory
    }

    pub fn layout(&self) -> &MemoryLayout {
        &self.layout
    }

    // ========== Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.registers.a = value;
    }

    pub fn set_b(&mut self, value: u8) {
        self.registers.b = value;
    }

    pub fn set_c(&mut self, value: u8) {
        self.registers.c = value;
    }

    pub fn set_d(&mut self, value: u8) {
        self.registers.d = value;
    }

    pub fn set_e(&mut self, value: u8) {
        self.registers.e = value;
    }

    pub fn set_h(&mut self, value: u8) {
        self.registers.h = value;
    }

    pub fn set_l(&mut self, value: u8) {
        self.registers.l = value;
    }

    pub fn set_sp(&mut self, value: u16) {
        self.sp = value;
    }

    pub fn set_flags(&mut self, flags: Flags) {
        self.flags = flags;
    }

    /// Sets the program counter, queueing `ProgramCounterChanged` if it moves.
    pub fn set_pc(&mut self, value: u16) {
        if value != self.pc {
            self.events.push(Event::ProgramCounterChanged(value));
        }
        self.pc = value;
    }

    /// Writes a byte through the protection check and queues `MemoryChanged`.
    pub fn write_memory(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
        self.write_byte(addr, value)
    }

    // ========== Notifications ==========

    /// Removes and returns every pending notification, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    // ========== Execution Helpers ==========

    pub(crate) fn halt(&mut self) {
        log::info!("processor halted at 0x{:04X}", self.pc);
        self.state = RunState::Halted;
    }

    pub(crate) fn read_byte(&self, addr: u16) -> Result<u8, ExecutionError> {
        self.memory.read(addr)
    }

    pub(crate) fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
        self.memory.write(addr, value)?;
        self.events.push(Event::MemoryChanged {
            address: addr,
            value,
        });
        Ok(())
    }

    /// Byte following the opcode.
    pub(crate) fn operand_byte(&self) -> Result<u8, ExecutionError> {
        self.read_byte(self.pc.wrapping_add(1))
    }

    /// Little-endian word following the opcode.
    pub(crate) fn operand_word(&self) -> Result<u16, ExecutionError> {
        let low = self.read_byte(self.pc.wrapping_add(1))?;
        let high = self.read_byte(self.pc.wrapping_add(2))?;
        Ok(u16::from_le_bytes([low, high]))
    }

    /// Moves PC past the instruction.
    ///
    /// Stepping past the top of the 16-bit range pins PC at `0xFFFF`, which is
    /// never a valid index, so the end-of-memory check halts.
    pub(crate) fn advance(&mut self, opcode: u8) {
        let size = OPCODE_TABLE[opcode as usize].size_bytes as u16;
        self.set_pc(self.pc.checked_add(size).unwrap_or(u16::MAX));
    }

    /// Value of a register pair, with `SP` read from the stack pointer.
    pub(crate) fn pair(&self, pair: RegisterPair) -> u16 {
        self.registers.pair(pair).unwrap_or(self.sp)
    }

    pub(crate) fn set_pair(&mut self, pair: RegisterPair, value: u16) {
        if !self.registers.set_pair(pair, value) {
            self.sp = value;
        }
    }

    /// Pushes a word: high byte at SP, low byte at SP-1, then SP -= 2.
    pub(crate) fn push_word(&mut self, value: u16) -> Result<(), ExecutionError> {
        let [high, low] = value.to_be_bytes();
        self.write_byte(self.sp, high)?;
        self.write_byte(self.sp.wrapping_sub(1), low)?;
        self.sp = self.sp.wrapping_sub(2);
        Ok(())
    }

    /// Pops a word: high byte from SP+2, low byte from SP+1, then SP += 2.
    pub(crate) fn pop_word(&mut self) -> Result<u16, ExecutionError> {
        let high = self.read_byte(self.sp.wrapping_add(2))?;
        let low = self.read_byte(self.sp.wrapping_add(1))?;
        self.sp = self.sp.wrapping_add(2);
        Ok(u16::from_be_bytes([high, low]))
    }
}

impl Default for CPU {
    fn default() -> Self {
        Self::new()
    }
}
