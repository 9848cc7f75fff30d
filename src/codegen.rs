use std::fmt::Write;

use crate::code::EncodedWord;

/// Output format for encoded words.
pub trait Backend {
    fn write_word(&self, word: EncodedWord, buf: &mut String);
}

/// `.hack` text: one 16-character `0`/`1` line per word
pub struct HackBinary;

impl Backend for HackBinary {
    fn write_word(&self, word: EncodedWord, buf: &mut String) {
        // writing into a String cannot fail
        let _ = writeln!(buf, "{word}");
    }
}

/// Renders a finished program through a backend.
pub struct CodeGen<B: Backend> {
    backend: B,
}

impl<B: Backend> CodeGen<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn render(&self, words: &[EncodedWord]) -> String {
        let mut output = String::with_capacity(words.len() * 17);
        for &word in words {
            self.backend.write_word(word, &mut output);
        }
        output
    }
}

pub type HackCodeGen = CodeGen<HackBinary>;

impl HackCodeGen {
    pub fn hack() -> Self {
        Self::new(HackBinary)
    }
}
