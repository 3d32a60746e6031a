//! Greedy encoder producing streams the [`crate::decoder`] accepts.

use bitcursor::{BitWrite, BitWriter};
use log::debug;

use crate::table::{self, Symbol};

#[derive(Debug, Clone)]
pub struct Compressor {
    repeats: bool,
}

impl Default for Compressor {
    fn default() -> Self {
        Compressor { repeats: true }
    }
}

impl Compressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle back-references. Without them encoding is a single linear pass.
    pub fn with_repeats(mut self, repeats: bool) -> Self {
        self.repeats = repeats;
        self
    }

    pub fn compress(&self, text: &str) -> Vec<u8> {
        let input = text.as_bytes();
        let mut writer = BitWriter::with_capacity(input.len() / 2 + 1);
        let mut i = 0usize;

        while i < input.len() {
            let symbol = self.next_symbol(input, i);
            i += match symbol {
                Symbol::Digraph(_) => 2,
                Symbol::Repeat { length, .. } => length,
                _ => 1,
            };
            write_symbol(&mut writer, symbol);
        }
        write_symbol(&mut writer, Symbol::Terminate);

        debug!(
            "Compressed {} bytes into {} bits",
            input.len(),
            writer.bit_len()
        );
        writer.into_bytes()
    }

    fn next_symbol(&self, input: &[u8], i: usize) -> Symbol {
        if self.repeats {
            if let Some((distance, length)) = longest_match(input, i) {
                return Symbol::Repeat { distance, length };
            }
        }

        if i + 1 < input.len() {
            let pair = [input[i], input[i + 1]];
            if table::digraph_index(pair).is_some() {
                return Symbol::Digraph(pair);
            }
        }

        let c = input[i];
        if table::primary_index(c).is_some() || table::secondary_index(c).is_some() {
            Symbol::Char(c)
        } else {
            Symbol::Literal(c)
        }
    }
}

/// Longest earlier match starting at `i`, nearest first on ties.
fn longest_match(input: &[u8], i: usize) -> Option<(usize, usize)> {
    let max_length = table::MAX_REPEAT.min(input.len() - i);
    if max_length < table::MIN_REPEAT {
        return None;
    }

    let mut best: Option<(usize, usize)> = None;
    for distance in 1..=table::MAX_DISTANCE.min(i) {
        let start = i - distance;
        // Reading past `i` is fine: the decoder will have produced those bytes by then.
        let length = (0..max_length)
            .take_while(|&k| input[start + k] == input[i + k])
            .count();
        if length >= table::MIN_REPEAT && best.is_none_or(|(_, l)| length > l) {
            best = Some((distance, length));
            if length == max_length {
                break;
            }
        }
    }
    best
}

fn write_symbol(writer: &mut BitWriter, symbol: Symbol) {
    match symbol {
        Symbol::Char(c) => {
            if let Some(index) = table::primary_index(c) {
                writer.write_bit(false);
                writer.write_bits(index as u32, table::PRIMARY_BITS);
            } else if let Some(index) = table::secondary_index(c) {
                writer.write_bits(0b10, 2);
                writer.write_bits(index as u32, table::SECONDARY_BITS);
            } else {
                write_symbol(writer, Symbol::Literal(c));
            }
        }
        Symbol::Digraph(pair) => match table::digraph_index(pair) {
            Some(index) => {
                writer.write_bits(0b110, 3);
                writer.write_bits(index as u32, table::DIGRAPH_BITS);
            }
            None => {
                write_symbol(writer, Symbol::Char(pair[0]));
                write_symbol(writer, Symbol::Char(pair[1]));
            }
        },
        Symbol::Literal(c) => {
            writer.write_bits(0b1110, 4);
            writer.write_u8(c);
        }
        Symbol::Repeat { distance, length } => {
            writer.write_bits(0b11110, 5);
            writer.write_bits((distance - 1) as u32, table::DISTANCE_BITS);
            writer.write_bits((length - table::MIN_REPEAT) as u32, table::LENGTH_BITS);
        }
        Symbol::Terminate => writer.write_bits(0b111110, 6),
    }
}

/// Encodes with a default [`Compressor`].
pub fn compress(text: &str) -> Vec<u8> {
    Compressor::new().compress(text)
}
