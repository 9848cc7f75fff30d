//! Hack Assembler - two-pass translator from Hack assembly to machine code.
//!
//! Pass 1 walks the source recording the ROM address of every `(LABEL)`.
//! Pass 2 walks it again, resolving symbols (allocating RAM for variables on
//! first use) and encoding each instruction as a 16-bit word.
//!
//! # Usage
//!
//! ```
//! let hack = hackasm::assemble("@2\nD=A\n").unwrap();
//! assert_eq!(hack, "0000000000000010\n1110110000010000\n");
//! ```

pub mod code;
pub mod codegen;
pub mod error;
pub mod parser;
pub mod symbols;

use std::fs;
use std::path::{Path, PathBuf};

use crate::code::EncodedWord;
use crate::codegen::HackCodeGen;
pub use crate::error::{AsmError, Result};
use crate::parser::{Classification, SourceLine, classify, source_lines};
use crate::symbols::SymbolTable;

/// What to do when a label name is declared again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the first address, ignore the redeclaration.
    #[default]
    FirstWins,
    /// Fail with [`AsmError::DuplicateSymbol`].
    Reject,
}

/// Assembly options.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssemblerOptions {
    pub duplicates: DuplicatePolicy,
}

/// Output of a complete run.
#[derive(Debug)]
pub struct Assembly {
    /// One word per real instruction, in source order.
    pub words: Vec<EncodedWord>,
    /// The final symbol table.
    pub symbols: SymbolTable,
}

impl Assembly {
    /// Render as `.hack` text.
    pub fn to_hack(&self) -> String {
        HackCodeGen::hack().render(&self.words)
    }
}

/// Two-pass driver. Owns the symbol table for the length of one run.
#[derive(Debug)]
pub struct Assembler {
    symbols: SymbolTable,
    options: AssemblerOptions,
}

impl Assembler {
    pub fn new(options: AssemblerOptions) -> Self {
        Self {
            symbols: SymbolTable::new(),
            options,
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Pass 1: bind every label to the address of the instruction after it.
    ///
    /// Returns the number of real instructions seen.
    pub fn first_pass<'a>(
        &mut self,
        lines: impl IntoIterator<Item = SourceLine<'a>>,
    ) -> Result<u32> {
        let mut rom_address = 0u32;

        for line in lines {
            match classify(line)? {
                instr if instr.is_instruction() => rom_address += 1,
                Classification::LabelDef { label } => {
                    let inserted = self.symbols.put_if_absent(&label, rom_address);
                    if !inserted && self.options.duplicates == DuplicatePolicy::Reject {
                        return Err(AsmError::DuplicateSymbol {
                            line: line.number,
                            name: label,
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(rom_address)
    }

    /// Pass 2: resolve symbols and encode. Must follow a complete pass 1.
    pub fn second_pass<'a>(
        &mut self,
        lines: impl IntoIterator<Item = SourceLine<'a>>,
    ) -> Result<Vec<EncodedWord>> {
        let mut words = Vec::new();

        for line in lines {
            match classify(line)? {
                Classification::AddressInstr { symbol_text } => {
                    words.push(self.resolve_address(&symbol_text, line.number)?);
                }
                Classification::ComputeInstr { dest, comp, jump } => {
                    words.push(EncodedWord::compute(&dest, &comp, &jump)?);
                }
                Classification::LabelDef { .. } | Classification::Skip => {}
            }
        }

        Ok(words)
    }

    fn resolve_address(&mut self, symbol_text: &str, line: usize) -> Result<EncodedWord> {
        let address = if symbol_text.bytes().all(|b| b.is_ascii_digit()) {
            // decimal literal; never enters the symbol table
            symbol_text
                .parse::<u32>()
                .map_err(|_| AsmError::OutOfRangeAddress {
                    line,
                    value: symbol_text.to_string(),
                })?
        } else if self.symbols.contains(symbol_text) {
            self.symbols.get(symbol_text)?
        } else {
            self.symbols.allocate_variable(symbol_text)?
        };

        EncodedWord::address(address).ok_or_else(|| AsmError::OutOfRangeAddress {
            line,
            value: address.to_string(),
        })
    }

    /// Run both passes over `source`.
    pub fn run(mut self, source: &str) -> Result<Assembly> {
        let lines = source_lines(source);
        self.first_pass(lines.clone())?;
        let words = self.second_pass(lines)?;
        Ok(Assembly {
            words,
            symbols: self.symbols,
        })
    }
}

/// Assemble source into words plus the final symbol table.
pub fn assemble_program(source: &str, options: AssemblerOptions) -> Result<Assembly> {
    Assembler::new(options).run(source)
}

/// Assemble Hack assembly source to `.hack` text.
pub fn assemble(source: &str) -> Result<String> {
    assemble_with_options(source, AssemblerOptions::default())
}

pub fn assemble_with_options(source: &str, options: AssemblerOptions) -> Result<String> {
    assemble_program(source, options).map(|assembly| assembly.to_hack())
}

/// Read and assemble an `.asm` file.
pub fn assemble_file(path: &Path, options: AssemblerOptions) -> Result<Assembly> {
    if path.extension().is_none_or(|ext| ext != "asm") {
        return Err(AsmError::InvalidPath {
            path: path.display().to_string(),
        });
    }

    let source = fs::read_to_string(path).map_err(|e| AsmError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;

    assemble_program(&source, options)
}

/// Default output path: the input with a `.hack` extension.
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension("hack")
}

pub fn write_output(path: &Path, hack: &str) -> Result<()> {
    fs::write(path, hack).map_err(|e| AsmError::FileWrite {
        path: path.display().to_string(),
        source: e,
    })
}
