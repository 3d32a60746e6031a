//! The code table shared by the encoder and decoder.
//!
//! Codes are read most significant bit first. The class of a code is the
//! number of leading one bits before the first zero:
//!
//! | code           | payload                          | symbol      |
//! |----------------|----------------------------------|-------------|
//! | `0`            | 4-bit index                      | primary     |
//! | `10`           | 5-bit index                      | secondary   |
//! | `110`          | 5-bit index                      | digraph     |
//! | `1110`         | 8-bit byte                       | literal     |
//! | `11110`        | 10-bit distance-1, 5-bit length-4 | repeat     |
//! | `111110`       |                                  | terminate   |
//! | `111111`       |                                  | reserved    |
//!
//! The stream is zero-padded to a byte boundary after the terminator.

/// Most frequent characters in HTML and JavaScript, 4-bit index.
pub const PRIMARY: [u8; 16] = *b" etaoinsrldc<>=\"";

/// Next most frequent characters, 5-bit index.
pub const SECONDARY: [u8; 32] = *b"uhpmfgbywvkxjqz/.,;:(){}'-_#01\n+";

/// Common character pairs, 5-bit index.
pub const DIGRAPHS: [[u8; 2]; 32] = [
    *b"</", *b"th", *b"he", *b"in", *b"er", *b"on", *b"an", *b"re",
    *b"at", *b"en", *b"nd", *b"ti", *b"es", *b"st", *b"or", *b"te",
    *b"()", *b"=\"", *b"\">", *b"ed", *b"ar", *b"al", *b"le", *b"de",
    *b"nt", *b"it", *b"ou", *b"ct", *b"io", *b"ne", *b"to", *b"ng",
];

pub const PRIMARY_BITS: u32 = 4;
pub const SECONDARY_BITS: u32 = 5;
pub const DIGRAPH_BITS: u32 = 5;
pub const LITERAL_BITS: u32 = 8;
pub const DISTANCE_BITS: u32 = 10;
pub const LENGTH_BITS: u32 = 5;

pub const MIN_REPEAT: usize = 4;
pub const MAX_REPEAT: usize = MIN_REPEAT + (1 << LENGTH_BITS) - 1;
pub const MAX_DISTANCE: usize = 1 << DISTANCE_BITS;
/// Size of a repeat code in bits.
pub const REPEAT_CODE_BITS: usize = 5 + DISTANCE_BITS as usize + LENGTH_BITS as usize;
/// Upper bound on decoded bytes per encoded byte, reached by back-to-back
/// maximal repeats.
pub const MAX_EXPANSION: usize = (MAX_REPEAT * 8).div_ceil(REPEAT_CODE_BITS);

/// Leading-one counts that select each class.
pub const CLASS_PRIMARY: u32 = 0;
pub const CLASS_SECONDARY: u32 = 1;
pub const CLASS_DIGRAPH: u32 = 2;
pub const CLASS_LITERAL: u32 = 3;
pub const CLASS_REPEAT: u32 = 4;
/// Five ones followed by a zero terminates, followed by a one is reserved.
pub const CLASS_CONTROL: u32 = 5;

/// One decoded code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Char(u8),
    Digraph([u8; 2]),
    Literal(u8),
    Repeat { distance: usize, length: usize },
    Terminate,
}

pub fn primary_index(c: u8) -> Option<usize> {
    PRIMARY.iter().position(|&p| p == c)
}

pub fn secondary_index(c: u8) -> Option<usize> {
    SECONDARY.iter().position(|&s| s == c)
}

pub fn digraph_index(pair: [u8; 2]) -> Option<usize> {
    DIGRAPHS.iter().position(|&d| d == pair)
}
