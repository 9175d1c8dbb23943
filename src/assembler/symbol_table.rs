//! Symbol table management for labels

use std::collections::HashMap;

use crate::assembler::Symbol;

/// Symbol table for managing label definitions
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    /// Create a new empty symbol table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol to the table
    ///
    /// Returns Ok(()) on success, Err with the existing symbol if the name is
    /// already defined. Names are case-sensitive.
    pub fn add_symbol(
        &mut self,
        name: String,
        address: u16,
        defined_at: usize,
    ) -> Result<(), Symbol> {
        if let Some(existing) = self.lookup_symbol(&name) {
            return Err(existing.clone());
        }

        self.symbols.push(Symbol {
            name,
            address,
            defined_at,
        });

        Ok(())
    }

    /// Look up a symbol by name
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    /// Get all symbols in definition order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Label to index map in the shape [`CPU::set_code`](crate::CPU::set_code)
    /// expects.
    pub fn to_jump_table(&self) -> HashMap<String, u16> {
        self.symbols
            .iter()
            .map(|symbol| (symbol.name.clone(), symbol.address))
            .collect()
    }
}
