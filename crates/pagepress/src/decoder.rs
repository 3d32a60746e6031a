//! Decoder for the prefix-coded page format described in [`crate::table`].

use bitcursor::{BitRead, BitReader};
use log::{debug, trace};

use crate::error::{CorruptReason, DecodeError, Result};
use crate::table::{self, Symbol};

/// Turns encoded blobs back into text.
///
/// Holds no per-call state, so a single instance can be shared between
/// threads and reused for any number of blobs.
#[derive(Debug, Clone, Default)]
pub struct Decompressor {
    size_hint: usize,
    max_output: Option<usize>,
}

impl Decompressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial capacity of the output buffer. Only a hint, the stream
    /// decides the real length.
    pub fn with_size_hint(mut self, size_hint: usize) -> Self {
        self.size_hint = size_hint;
        self
    }

    /// Refuse to produce more than `limit` bytes of text.
    pub fn with_max_output(mut self, limit: usize) -> Self {
        self.max_output = Some(limit);
        self
    }

    /// Decodes the first `encoded_length` bytes of `encoded`.
    ///
    /// # Errors
    /// - [`DecodeError::EmptyInput`] if `encoded_length` is zero.
    /// - [`DecodeError::CorruptStream`] if the stream is truncated, uses the
    ///   reserved code, repeats from before the start of the output, carries
    ///   data after the terminator, or does not decode to UTF-8.
    /// - [`DecodeError::OutputTooLarge`] if a limit is set and exceeded.
    pub fn decompress(&self, encoded: &[u8], encoded_length: usize) -> Result<String> {
        if encoded_length == 0 {
            return Err(DecodeError::EmptyInput);
        }
        let mut reader = BitReader::new(encoded, encoded_length).map_err(|_| {
            DecodeError::corrupt(
                0,
                CorruptReason::LengthOutOfBounds {
                    declared: encoded_length,
                    available: encoded.len(),
                },
            )
        })?;

        debug!("Decompressing {encoded_length} bytes (size hint {})", self.size_hint);

        let mut output = Vec::with_capacity(self.capacity(encoded_length));
        loop {
            let offset = reader.position();
            match read_symbol(&mut reader)? {
                Symbol::Char(c) | Symbol::Literal(c) => {
                    self.reserve(&output, 1)?;
                    output.push(c);
                }
                Symbol::Digraph(pair) => {
                    self.reserve(&output, 2)?;
                    output.extend_from_slice(&pair);
                }
                Symbol::Repeat { distance, length } => {
                    if distance > output.len() {
                        return Err(DecodeError::corrupt(
                            offset,
                            CorruptReason::RepeatOutOfRange {
                                distance,
                                available: output.len(),
                            },
                        ));
                    }
                    self.reserve(&output, length)?;
                    trace!("Repeat {length} bytes from {distance} back");

                    // Byte at a time: the source may overlap what is being written.
                    let mut src = output.len() - distance;
                    for _ in 0..length {
                        let b = output[src];
                        output.push(b);
                        src += 1;
                    }
                }
                Symbol::Terminate => break,
            }
        }

        check_padding(&mut reader)?;

        let end = reader.position();
        let text = String::from_utf8(output)
            .map_err(|_| DecodeError::corrupt(end, CorruptReason::InvalidUtf8))?;
        debug!("Decompressed {encoded_length} bytes into {} bytes", text.len());
        Ok(text)
    }

    /// The size hint, clamped to what the stream and the limit allow.
    fn capacity(&self, encoded_length: usize) -> usize {
        self.size_hint
            .min(self.max_output.unwrap_or(usize::MAX))
            .min(encoded_length.saturating_mul(table::MAX_EXPANSION))
    }

    fn reserve(&self, output: &[u8], extra: usize) -> Result<()> {
        match self.max_output {
            Some(limit) if output.len() + extra > limit => {
                Err(DecodeError::OutputTooLarge { limit })
            }
            _ => Ok(()),
        }
    }
}

/// Reads one code at the cursor.
pub(crate) fn read_symbol(reader: &mut BitReader<'_>) -> Result<Symbol> {
    let start = reader.position();
    let truncated = |_: std::io::Error| DecodeError::corrupt(start, CorruptReason::Truncated);

    let mut class = 0;
    while class < table::CLASS_CONTROL && reader.read_bit().map_err(truncated)? {
        class += 1;
    }

    let symbol = match class {
        table::CLASS_PRIMARY => {
            let index = reader.read_bits(table::PRIMARY_BITS).map_err(truncated)?;
            Symbol::Char(table::PRIMARY[index as usize])
        }
        table::CLASS_SECONDARY => {
            let index = reader.read_bits(table::SECONDARY_BITS).map_err(truncated)?;
            Symbol::Char(table::SECONDARY[index as usize])
        }
        table::CLASS_DIGRAPH => {
            let index = reader.read_bits(table::DIGRAPH_BITS).map_err(truncated)?;
            Symbol::Digraph(table::DIGRAPHS[index as usize])
        }
        table::CLASS_LITERAL => Symbol::Literal(reader.read_u8().map_err(truncated)?),
        table::CLASS_REPEAT => {
            let distance = reader.read_bits(table::DISTANCE_BITS).map_err(truncated)?;
            let length = reader.read_bits(table::LENGTH_BITS).map_err(truncated)?;
            Symbol::Repeat {
                distance: distance as usize + 1,
                length: length as usize + table::MIN_REPEAT,
            }
        }
        _ => {
            if reader.read_bit().map_err(truncated)? {
                return Err(DecodeError::corrupt(start, CorruptReason::ReservedCode));
            }
            Symbol::Terminate
        }
    };

    Ok(symbol)
}

/// Only zero bits up to the next byte boundary may follow the terminator.
fn check_padding(reader: &mut BitReader<'_>) -> Result<()> {
    let start = reader.position();
    if reader.remaining() >= 8 {
        return Err(DecodeError::corrupt(start, CorruptReason::TrailingData));
    }
    while !reader.is_exhausted() {
        if reader
            .read_bit()
            .map_err(|_| DecodeError::corrupt(start, CorruptReason::Truncated))?
        {
            return Err(DecodeError::corrupt(start, CorruptReason::TrailingData));
        }
    }
    Ok(())
}

/// Decodes with a default [`Decompressor`].
pub fn decompress(encoded: &[u8], encoded_length: usize) -> Result<String> {
    Decompressor::new().decompress(encoded, encoded_length)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &[u8] = &[0x64, 0x11, 0x43, 0x4B, 0x70, 0x3C, 0x03, 0x07, 0xE0];

    #[test]
    fn test_decompress_known_page() {
        assert_eq!(decompress(HTML, HTML.len()).unwrap(), "<html></html>");
    }

    #[test]
    fn test_bare_terminator_is_empty_text() {
        assert_eq!(decompress(&[0xF8], 1).unwrap(), "");
    }

    #[test]
    fn test_zero_length_is_empty_input() {
        assert_eq!(decompress(&[], 0), Err(DecodeError::EmptyInput));
        assert_eq!(decompress(HTML, 0), Err(DecodeError::EmptyInput));
    }

    #[test]
    fn test_garbage_byte_is_corrupt() {
        let err = decompress(&[0xFF], 1).unwrap_err();
        assert_eq!(
            err,
            DecodeError::CorruptStream {
                bit_offset: 0,
                reason: CorruptReason::ReservedCode
            }
        );
    }

    #[test]
    fn test_truncated_stream_is_corrupt() {
        let err = decompress(&[0x00], 1).unwrap_err();
        assert_eq!(
            err,
            DecodeError::CorruptStream {
                bit_offset: 5,
                reason: CorruptReason::Truncated
            }
        );
    }

    #[test]
    fn test_declared_length_past_buffer() {
        let err = decompress(&[0xF8], 2).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::CorruptStream {
                reason: CorruptReason::LengthOutOfBounds {
                    declared: 2,
                    available: 1
                },
                ..
            }
        ));
    }

    #[test]
    fn test_declared_length_shorter_than_buffer() {
        // Only the terminator byte is in bounds; the rest is ignored.
        assert_eq!(decompress(&[0xF8, 0xFF, 0xFF], 1).unwrap(), "");
    }

    #[test]
    fn test_repeat_before_start_is_corrupt() {
        // 11110 0000000000 00000 111110 + padding: repeat with nothing decoded.
        let err = decompress(&[0xF0, 0x00, 0x0F, 0x80], 4).unwrap_err();
        assert_eq!(
            err,
            DecodeError::CorruptStream {
                bit_offset: 0,
                reason: CorruptReason::RepeatOutOfRange {
                    distance: 1,
                    available: 0
                }
            }
        );
    }

    #[test]
    fn test_overlapping_repeat() {
        // 'a', then repeat 7 bytes from distance 1.
        let blob = [0x1F, 0x80, 0x01, 0xFC];
        assert_eq!(decompress(&blob, blob.len()).unwrap(), "aaaaaaaa");
    }

    #[test]
    fn test_nonzero_padding_is_corrupt() {
        let err = decompress(&[0xF9], 1).unwrap_err();
        assert_eq!(
            err,
            DecodeError::CorruptStream {
                bit_offset: 6,
                reason: CorruptReason::TrailingData
            }
        );
    }

    #[test]
    fn test_trailing_byte_is_corrupt() {
        let err = decompress(&[0xF8, 0x00], 2).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::CorruptStream {
                reason: CorruptReason::TrailingData,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_utf8_is_corrupt() {
        // Literal 0xFF then terminator: 1110 11111111 111110 + padding.
        let err = decompress(&[0xEF, 0xFF, 0x80], 3).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::CorruptStream {
                reason: CorruptReason::InvalidUtf8,
                ..
            }
        ));
    }

    #[test]
    fn test_output_limit() {
        let limited = Decompressor::new().with_max_output(4);
        assert_eq!(
            limited.decompress(HTML, HTML.len()),
            Err(DecodeError::OutputTooLarge { limit: 4 })
        );

        let exact = Decompressor::new().with_max_output(13).with_size_hint(13);
        assert_eq!(exact.decompress(HTML, HTML.len()).unwrap(), "<html></html>");
    }

    #[test]
    fn test_oversized_size_hint_is_clamped() {
        let huge = Decompressor::new().with_size_hint(usize::MAX);
        assert_eq!(huge.decompress(&[0xF8], 1).unwrap(), "");
        assert_eq!(huge.decompress(HTML, HTML.len()).unwrap(), "<html></html>");
        assert_eq!(huge.capacity(HTML.len()), HTML.len() * table::MAX_EXPANSION);

        let limited = huge.with_max_output(16);
        assert_eq!(limited.capacity(HTML.len()), 16);
        assert_eq!(limited.decompress(HTML, HTML.len()).unwrap(), "<html></html>");
    }

    #[test]
    fn test_input_is_untouched_and_output_is_stable() {
        let blob = HTML.to_vec();
        let first = decompress(&blob, blob.len()).unwrap();
        let second = decompress(&blob, blob.len()).unwrap();

        assert_eq!(first, second);
        assert_eq!(blob, HTML);
    }
}
