//! Error types for Hack assembly.
//!
//! Every error aborts the whole translation; there is no partial output.

use thiserror::Error;

/// Assembly error with line context where one is known.
#[derive(Error, Debug)]
pub enum AsmError {
    #[error("line {line}: syntax error: {text}")]
    Parse { line: usize, text: String },

    #[error("unknown symbol: {name}")]
    UnknownSymbol { name: String },

    #[error("line {line}: address out of range (max 32767): {value}")]
    OutOfRangeAddress { line: usize, value: String },

    #[error("unencodable {field} field: {fragment}")]
    UnencodableFragment {
        field: &'static str,
        fragment: String,
    },

    #[error("line {line}: duplicate symbol: {name}")]
    DuplicateSymbol { line: usize, name: String },

    #[error("symbol already defined: {name}")]
    SymbolExists { name: String },

    // I/O errors
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("not an .asm file: {path}")]
    InvalidPath { path: String },
}

impl AsmError {
    /// Grammar violation on a source line.
    pub fn parse(line: usize, text: impl Into<String>) -> Self {
        AsmError::Parse {
            line,
            text: text.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AsmError>;
