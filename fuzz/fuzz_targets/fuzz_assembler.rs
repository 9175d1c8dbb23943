//! Fuzz target for the assembler.
//!
//! This target feeds arbitrary strings to the assembler to find
//! edge cases, panics, and crashes in parsing and encoding.

#![no_main]

use lib8080::{assemble, CPU};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);
    let program = assemble(&source);

    // Every successful assembly must load and stay inside memory
    if program.is_success() {
        let mut cpu = CPU::new();
        assert!(program.load_into(&mut cpu).is_ok());
        assert!(program.bytes.len() <= cpu.memory().len());
        for operation in &program.operations {
            assert_eq!(program.bytes[operation.address as usize], operation.opcode);
        }
    }
});
