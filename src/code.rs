//! Hack instruction encoding tables.
//!
//! The comp table is the single whitelist of legal ALU expressions: the
//! classifier consults it so that nothing reaches encoding that the table
//! cannot represent.

use std::fmt;

use phf::phf_map;

use crate::error::{AsmError, Result};

/// Largest value an A-instruction can carry (15 bits).
pub const MAX_ADDRESS: u16 = 0x7FFF;

/// comp field (7 bits: a + c1..c6), keyed by literal expression text
pub static COMP: phf::Map<&'static str, u16> = phf_map! {
    // constants
    "0" => 0b0101010,
    "1" => 0b0111111,
    "-1" => 0b0111010,

    // single register
    "D" => 0b0001100,
    "A" => 0b0110000,
    "M" => 0b1110000,
    "!D" => 0b0001101,
    "!A" => 0b0110001,
    "!M" => 0b1110001,
    "-D" => 0b0001111,
    "-A" => 0b0110011,
    "-M" => 0b1110011,
    "D+1" => 0b0011111,
    "A+1" => 0b0110111,
    "M+1" => 0b1110111,
    "D-1" => 0b0001110,
    "A-1" => 0b0110010,
    "M-1" => 0b1110010,

    // D against A (a=0) or M (a=1)
    "D+A" => 0b0000010,
    "D+M" => 0b1000010,
    "D-A" => 0b0010011,
    "D-M" => 0b1010011,
    "A-D" => 0b0000111,
    "M-D" => 0b1000111,
    "D&A" => 0b0000000,
    "D&M" => 0b1000000,
    "D|A" => 0b0010101,
    "D|M" => 0b1010101,
};

/// jump field (3 bits)
pub static JUMP: phf::Map<&'static str, u16> = phf_map! {
    "" => 0b000,
    "JGT" => 0b001,
    "JEQ" => 0b010,
    "JGE" => 0b011,
    "JLT" => 0b100,
    "JNE" => 0b101,
    "JLE" => 0b110,
    "JMP" => 0b111,
};

fn unencodable(field: &'static str, fragment: &str) -> AsmError {
    AsmError::UnencodableFragment {
        field,
        fragment: fragment.to_string(),
    }
}

/// dest field (3 bits: A D M). Any order is accepted, repeats are not.
pub fn dest_bits(dest: &str) -> Result<u16> {
    let mut bits = 0u16;
    for c in dest.chars() {
        let bit = match c {
            'A' => 0b100,
            'D' => 0b010,
            'M' => 0b001,
            _ => return Err(unencodable("dest", dest)),
        };
        if bits & bit != 0 {
            return Err(unencodable("dest", dest));
        }
        bits |= bit;
    }
    Ok(bits)
}

pub fn comp_bits(comp: &str) -> Result<u16> {
    COMP.get(comp).copied().ok_or_else(|| unencodable("comp", comp))
}

pub fn jump_bits(jump: &str) -> Result<u16> {
    JUMP.get(jump).copied().ok_or_else(|| unencodable("jump", jump))
}

/// One 16-bit Hack machine word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedWord(u16);

impl EncodedWord {
    /// A-instruction word; `None` if the value needs more than 15 bits.
    pub fn address(value: u32) -> Option<Self> {
        u16::try_from(value)
            .ok()
            .filter(|&v| v <= MAX_ADDRESS)
            .map(EncodedWord)
    }

    /// C-instruction word: `111` + comp + dest + jump.
    pub fn compute(dest: &str, comp: &str, jump: &str) -> Result<Self> {
        let word = 0b1110_0000_0000_0000
            | (comp_bits(comp)? << 6)
            | (dest_bits(dest)? << 3)
            | jump_bits(jump)?;
        Ok(EncodedWord(word))
    }

    #[inline]
    pub fn bits(self) -> u16 {
        self.0
    }
}

impl fmt::Display for EncodedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}
