//! Line classifier for Hack assembly.
//!
//! Classification is a pure function of the line text, so both assembler
//! passes can call it on the same line and get the same answer.

use crate::code::{COMP, JUMP, dest_bits};
use crate::error::{AsmError, Result};

/// One line of source with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Number the lines of a source. The iterator is `Clone`, so it can be
/// walked once per pass.
pub fn source_lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> + Clone {
    source
        .lines()
        .enumerate()
        .map(|(i, text)| SourceLine { number: i + 1, text })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Blank or comment-only line
    Skip,
    /// `@value` or `@symbol`
    AddressInstr { symbol_text: String },
    /// `dest=comp;jump`, absent fields are empty
    ComputeInstr {
        dest: String,
        comp: String,
        jump: String,
    },
    /// `(LABEL)` pseudo-instruction
    LabelDef { label: String },
}

impl Classification {
    /// True for lines that occupy a ROM address.
    #[inline]
    pub fn is_instruction(&self) -> bool {
        matches!(
            self,
            Classification::AddressInstr { .. } | Classification::ComputeInstr { .. }
        )
    }
}

/// Remove all whitespace, then any trailing comment.
fn clean_line(line: &str) -> String {
    let mut clean: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(pos) = clean.find("//") {
        clean.truncate(pos);
    }
    clean
}

/// Letters, digits, `_`, `.`, `$`, `:`; not starting with a digit.
pub fn is_symbol(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if !first.is_ascii_digit() && is_symbol_char(first) => {
            chars.all(is_symbol_char)
        }
        _ => false,
    }
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | ':')
}

fn parse_address(token: &str) -> Option<Classification> {
    let valid = if token.starts_with(|c: char| c.is_ascii_digit()) {
        token.bytes().all(|b| b.is_ascii_digit())
    } else {
        is_symbol(token)
    };
    valid.then(|| Classification::AddressInstr {
        symbol_text: token.to_string(),
    })
}

fn parse_label(clean: &str) -> Option<Classification> {
    let label = clean.strip_prefix('(')?.strip_suffix(')')?;
    is_symbol(label).then(|| Classification::LabelDef {
        label: label.to_string(),
    })
}

fn parse_compute(clean: &str) -> Option<Classification> {
    let (dest, rest) = match clean.split_once('=') {
        Some((dest, rest)) if !dest.is_empty() => (dest, rest),
        Some(_) => return None,
        None => ("", clean),
    };
    let (comp, jump) = match rest.split_once(';') {
        Some((comp, jump)) if !jump.is_empty() => (comp, jump),
        Some(_) => return None,
        None => (rest, ""),
    };

    if dest_bits(dest).is_err() || !COMP.contains_key(comp) || !JUMP.contains_key(jump) {
        return None;
    }

    Some(Classification::ComputeInstr {
        dest: dest.to_string(),
        comp: comp.to_string(),
        jump: jump.to_string(),
    })
}

/// Classify a single source line.
pub fn classify(line: SourceLine<'_>) -> Result<Classification> {
    let clean = clean_line(line.text);

    if clean.is_empty() {
        return Ok(Classification::Skip);
    }

    let parsed = if let Some(token) = clean.strip_prefix('@') {
        parse_address(token)
    } else if clean.starts_with('(') {
        parse_label(&clean)
    } else {
        parse_compute(&clean)
    };

    parsed.ok_or_else(|| AsmError::parse(line.number, line.text.trim()))
}
