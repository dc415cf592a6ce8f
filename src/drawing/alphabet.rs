// ============================================================
// Layer 5 — Symbol Alphabet
// ============================================================
// The handwriting model only knows 73 symbols. Index 0 is the
// null symbol and doubles as the code for every character that
// is not in the table, so rare punctuation, `Q`, `X` and `Z`
// all collapse onto it.

use crate::domain::traits::SymbolEncoder;

/// The vocabulary, in index order.
pub const ALPHABET: [char; 73] = [
    '\0', ' ', '!', '"', '#', '\'', '(', ')', ',', '-', '.',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', ':', ';',
    '?', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K',
    'L', 'M', 'N', 'O', 'P', 'R', 'S', 'T', 'U', 'V', 'W', 'Y',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l',
    'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x',
    'y', 'z',
];

/// Look up the symbol index for one character, 0 if unknown.
pub fn symbol_of(c: char) -> u8 {
    ALPHABET
        .iter()
        .position(|&a| a == c)
        .map(|i| i as u8)
        .unwrap_or(0)
}

/// Encodes text with the fixed handwriting alphabet.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiAlphabet;

impl SymbolEncoder for AsciiAlphabet {
    /// One symbol per character; the output is never longer than the input.
    fn encode(&self, text: &str) -> Vec<u8> {
        text.chars().map(symbol_of).collect()
    }
}
