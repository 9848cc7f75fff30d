//! Symbol table for the Hack assembler.
//!
//! Names map to addresses and never change once inserted: the first writer
//! wins. Predefined symbols are seeded at construction, labels arrive during
//! the first pass, variables during the second.

use phf::phf_map;
use std::collections::HashMap;

use crate::error::{AsmError, Result};

/// Predefined symbols (compile-time perfect hash map)
pub static PREDEFINED: phf::Map<&'static str, u32> = phf_map! {
    "R0" => 0, "R1" => 1, "R2" => 2, "R3" => 3,
    "R4" => 4, "R5" => 5, "R6" => 6, "R7" => 7,
    "R8" => 8, "R9" => 9, "R10" => 10, "R11" => 11,
    "R12" => 12, "R13" => 13, "R14" => 14, "R15" => 15,
    "SP" => 0, "LCL" => 1, "ARG" => 2, "THIS" => 3, "THAT" => 4,
    "SCREEN" => 16384, "KBD" => 24576,
};

/// First RAM address handed out to variables.
pub const VARIABLE_BASE: u32 = 16;

/// How a symbol entered the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SymbolKind {
    Predefined,
    /// Jump target, value is a ROM address
    Label,
    /// Allocated RAM slot
    Variable,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    address: u32,
    kind: SymbolKind,
}

/// Symbol table plus the variable allocator.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: HashMap<String, Entry>,
    next_variable: u32,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Create a table holding exactly the predefined symbols.
    pub fn new() -> Self {
        let mut symbols = HashMap::with_capacity(64);
        for (&name, &address) in PREDEFINED.entries() {
            symbols.insert(
                name.to_string(),
                Entry {
                    address,
                    kind: SymbolKind::Predefined,
                },
            );
        }
        Self {
            symbols,
            next_variable: VARIABLE_BASE,
        }
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Result<u32> {
        self.symbols
            .get(name)
            .map(|entry| entry.address)
            .ok_or_else(|| AsmError::UnknownSymbol {
                name: name.to_string(),
            })
    }

    pub fn kind(&self, name: &str) -> Option<SymbolKind> {
        self.symbols.get(name).map(|entry| entry.kind)
    }

    /// Record a label unless the name is already taken.
    ///
    /// Returns `false` (and leaves the table untouched) for an existing name.
    pub fn put_if_absent(&mut self, name: &str, address: u32) -> bool {
        if self.contains(name) {
            return false;
        }
        self.symbols.insert(
            name.to_string(),
            Entry {
                address,
                kind: SymbolKind::Label,
            },
        );
        true
    }

    /// Bind a new variable to the next free RAM slot.
    pub fn allocate_variable(&mut self, name: &str) -> Result<u32> {
        if self.contains(name) {
            return Err(AsmError::SymbolExists {
                name: name.to_string(),
            });
        }
        let address = self.next_variable;
        self.next_variable += 1;
        self.symbols.insert(
            name.to_string(),
            Entry {
                address,
                kind: SymbolKind::Variable,
            },
        );
        Ok(address)
    }

    /// Address the next variable would receive.
    pub fn next_variable_address(&self) -> u32 {
        self.next_variable
    }

    /// Labels and variables, labels first, each group ordered by address.
    pub fn user_symbols(&self) -> Vec<(&str, u32, SymbolKind)> {
        let mut entries: Vec<_> = self
            .symbols
            .iter()
            .filter(|(_, entry)| entry.kind != SymbolKind::Predefined)
            .map(|(name, entry)| (name.as_str(), entry.address, entry.kind))
            .collect();
        entries.sort_by(|a, b| (a.2, a.1, a.0).cmp(&(b.2, b.1, b.0)));
        entries
    }
}
