//! WASM API for the 8080 emulator.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection,
//! port access and assembly.

use crate::{assemble, Assembly, Register, RunState, CPU};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

fn js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

/// Result of assembly operation
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct AssemblyResult {
    success: bool,
    machine_code: Vec<u8>,
    error_lines: Vec<u32>,
    error_messages: Vec<String>,
}

impl From<&Assembly> for AssemblyResult {
    fn from(assembly: &Assembly) -> Self {
        AssemblyResult {
            success: assembly.is_success(),
            machine_code: assembly.bytes.clone(),
            error_lines: assembly.errors.keys().map(|&line| line as u32).collect(),
            error_messages: assembly.errors.values().map(|e| e.message.clone()).collect(),
        }
    }
}

#[wasm_bindgen]
impl AssemblyResult {
    #[wasm_bindgen(getter)]
    pub fn success(&self) -> bool {
        self.success
    }

    #[wasm_bindgen(getter)]
    pub fn machine_code(&self) -> Vec<u8> {
        self.machine_code.clone()
    }

    /// Failing line indices, in ascending order
    #[wasm_bindgen(getter)]
    pub fn error_lines(&self) -> Vec<u32> {
        self.error_lines.clone()
    }

    /// Error message for each entry of `error_lines`
    #[wasm_bindgen(getter)]
    pub fn error_messages(&self) -> Vec<JsValue> {
        self.error_messages
            .iter()
            .map(|m| JsValue::from_str(m))
            .collect()
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator8080 {
    cpu: CPU,
    on_event: js_sys::Function,
}

impl Emulator8080 {
    /// Forward queued state changes to the JavaScript callback
    fn flush_events(&mut self) {
        for event in self.cpu.drain_events() {
            let _ = self
                .on_event
                .call1(&JsValue::NULL, &JsValue::from_str(&event.to_string()));
        }
    }
}

#[wasm_bindgen]
impl Emulator8080 {
    /// Create an emulator with the reference memory layout.
    ///
    /// `on_event` is called with one string argument per state change after
    /// every call that can change state.
    #[wasm_bindgen(constructor)]
    pub fn new(on_event: js_sys::Function) -> Self {
        Emulator8080 {
            cpu: CPU::new(),
            on_event,
        }
    }

    /// Execute a single instruction. Returns false once the CPU is halted.
    pub fn step(&mut self) -> Result<bool, JsError> {
        let result = self.cpu.step();
        self.flush_events();
        result
            .map(|state| state == RunState::Running)
            .map_err(js_error)
    }

    /// Execute up to `max_steps` instructions and return how many ran
    pub fn run(&mut self, max_steps: u32) -> Result<u32, JsError> {
        let result = self.cpu.run(max_steps as u64);
        self.flush_events();
        result.map(|n| n as u32).map_err(js_error)
    }

    /// Zero memory, drop protection and reset the registers
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.flush_events();
    }

    /// Reset the registers but keep the loaded program
    pub fn soft_reset(&mut self) {
        self.cpu.soft_reset();
        self.flush_events();
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn b(&self) -> u8 {
        self.cpu.b()
    }

    #[wasm_bindgen(getter)]
    pub fn c(&self) -> u8 {
        self.cpu.c()
    }

    #[wasm_bindgen(getter)]
    pub fn d(&self) -> u8 {
        self.cpu.d()
    }

    #[wasm_bindgen(getter)]
    pub fn e(&self) -> u8 {
        self.cpu.e()
    }

    #[wasm_bindgen(getter)]
    pub fn h(&self) -> u8 {
        self.cpu.h()
    }

    #[wasm_bindgen(getter)]
    pub fn l(&self) -> u8 {
        self.cpu.l()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u16 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn steps(&self) -> f64 {
        self.cpu.steps() as f64 // Convert u64 to f64 for JavaScript
    }

    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.cpu.state() == RunState::Halted
    }

    // Flag getters
    #[wasm_bindgen(getter)]
    pub fn flag_s(&self) -> bool {
        self.cpu.flags().sign
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.cpu.flags().zero
    }

    #[wasm_bindgen(getter)]
    pub fn flag_ac(&self) -> bool {
        self.cpu.flags().aux_carry
    }

    #[wasm_bindgen(getter)]
    pub fn flag_p(&self) -> bool {
        self.cpu.flags().parity
    }

    #[wasm_bindgen(getter)]
    pub fn flag_cy(&self) -> bool {
        self.cpu.flags().carry
    }

    // Register setters

    /// Set a register by name (`a`..`l`, or `m` for memory at H:L)
    pub fn set_register(&mut self, name: &str, value: u8) -> Result<(), JsError> {
        let result = self.cpu.set_by_name(name, value);
        self.flush_events();
        result.map_err(js_error)
    }

    /// Read a register by name
    pub fn get_register(&self, name: &str) -> Result<u8, JsError> {
        let register: Register = name.parse().map_err(js_error)?;
        self.cpu.get(register).map_err(js_error)
    }

    /// Set the program counter
    pub fn set_pc(&mut self, index: u16) {
        self.cpu.set_pc(index);
        self.flush_events();
    }

    /// Move the program counter to a label of the loaded program
    pub fn jump_to(&mut self, label: &str) -> Result<(), JsError> {
        let result = self.cpu.jump_to(label);
        self.flush_events();
        result.map_err(js_error)
    }

    // Port methods

    /// Feed a value into an input port. Out of range ports are ignored.
    pub fn set_in(&mut self, port: i32, value: u8) -> Result<(), JsError> {
        let result = self.cpu.set_in(port, value);
        self.flush_events();
        result.map_err(js_error)
    }

    /// Write an output port from the host. Out of range ports are ignored.
    pub fn set_out(&mut self, port: i32, value: u8) {
        self.cpu.set_out(port, value);
        self.flush_events();
    }

    pub fn input_ports(&self) -> Vec<u8> {
        self.cpu.ports().inputs().to_vec()
    }

    pub fn output_ports(&self) -> Vec<u8> {
        self.cpu.ports().outputs().to_vec()
    }

    // Memory access methods

    /// Read a single byte by index
    pub fn read_memory(&self, index: u16) -> Result<u8, JsError> {
        self.cpu.memory().read(index).map_err(js_error)
    }

    /// Write a single byte by index, honouring write protection
    pub fn write_memory(&mut self, index: u16, value: u8) -> Result<(), JsError> {
        let result = self.cpu.write_memory(index, value);
        self.flush_events();
        result.map_err(js_error)
    }

    /// The whole address space (for efficient display)
    pub fn memory(&self) -> Vec<u8> {
        self.cpu.memory().as_slice().to_vec()
    }

    /// Logical address of index 0
    #[wasm_bindgen(getter)]
    pub fn display_base(&self) -> u16 {
        self.cpu.layout().display_base
    }

    /// Assemble 8080 assembly source code
    pub fn assemble(&self, source: String) -> AssemblyResult {
        AssemblyResult::from(&assemble(&source))
    }

    /// Assemble, load and restart the program in one step.
    ///
    /// Nothing is loaded if any line failed.
    pub fn assemble_and_load(&mut self, source: String) -> Result<AssemblyResult, JsError> {
        let assembly = assemble(&source);
        if assembly.is_success() {
            assembly.load_into(&mut self.cpu).map_err(js_error)?;
            self.cpu.soft_reset();
            self.flush_events();
        }
        Ok(AssemblyResult::from(&assembly))
    }
}
