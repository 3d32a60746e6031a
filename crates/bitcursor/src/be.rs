//! Big-endian bit order: the most significant bit of each byte comes first.

use std::io::{Error, ErrorKind, Result};

use crate::{BitRead, BitWrite};

/// Reads bits from the first `length` bytes of a borrowed buffer.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    limit: usize,
    position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8], length: usize) -> Result<Self> {
        if length > data.len() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Declared length exceeds buffer",
            ));
        }

        Ok(BitReader {
            data,
            limit: length * 8,
            position: 0,
        })
    }

    /// Current cursor, in bits from the start of the buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position == self.limit
    }

    fn bit_at(&self, position: usize) -> bool {
        let byte = self.data[position / 8];
        (byte >> (7 - position % 8)) & 1 == 1
    }
}

impl BitRead for BitReader<'_> {
    fn read_bit(&mut self) -> Result<bool> {
        if self.position >= self.limit {
            return Err(Error::from(ErrorKind::UnexpectedEof));
        }
        let bit = self.bit_at(self.position);
        self.position += 1;
        Ok(bit)
    }

    // Checked up front so a short read leaves the cursor where it was.
    fn read_bits(&mut self, count: u32) -> Result<u32> {
        debug_assert!(count <= 32);
        if count as usize > self.remaining() {
            return Err(Error::from(ErrorKind::UnexpectedEof));
        }
        let mut value = 0u32;
        for offset in 0..count as usize {
            value = (value << 1) | self.bit_at(self.position + offset) as u32;
        }
        self.position += count as usize;
        Ok(value)
    }
}

/// Accumulates bits and hands back whole bytes, zero-padding the last one.
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bytes: usize) -> Self {
        BitWriter {
            bytes: Vec::with_capacity(bytes),
            bit_len: 0,
        }
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl BitWrite for BitWriter {
    fn write_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> (self.bit_len % 8);
        }
        self.bit_len += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_msb_first() {
        let data = [0b1010_0000, 0xFF];
        let mut reader = BitReader::new(&data, 2).expect("Failed to create reader");

        assert!(reader.read_bit().unwrap());
        assert!(!reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(3).unwrap(), 0b100);
        assert_eq!(reader.position(), 5);
        assert_eq!(reader.read_bits(7).unwrap(), 0b000_1111);
        assert_eq!(reader.remaining(), 4);
    }

    #[test]
    fn test_length_bounds_reader() {
        let data = [0x12, 0x34, 0x56];
        let mut reader = BitReader::new(&data, 1).unwrap();

        assert_eq!(reader.read_u8().unwrap(), 0x12);
        assert!(reader.is_exhausted());
        let err = reader.read_bit().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_length_past_buffer_is_rejected() {
        let err = BitReader::new(&[0u8; 2], 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_short_read_keeps_cursor() {
        let data = [0xAB];
        let mut reader = BitReader::new(&data, 1).unwrap();
        reader.read_bits(5).unwrap();

        assert!(reader.read_bits(4).is_err());
        assert_eq!(reader.position(), 5);
        assert_eq!(reader.read_bits(3).unwrap(), 0b011);
    }

    #[test]
    fn test_writer_pads_last_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3);
        writer.write_u8(0xFF);

        assert_eq!(writer.bit_len(), 11);
        assert_eq!(writer.into_bytes(), vec![0b1011_1111, 0b1110_0000]);
    }

    #[test]
    fn test_writer_output_reads_back() {
        let mut writer = BitWriter::with_capacity(4);
        writer.write_bits(0x3FF, 10);
        writer.write_bit(false);
        writer.write_bits(0x15, 5);
        let bytes = writer.into_bytes();

        let mut reader = BitReader::new(&bytes, bytes.len()).unwrap();
        assert_eq!(reader.read_bits(10).unwrap(), 0x3FF);
        assert!(!reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(5).unwrap(), 0x15);
        assert!(reader.is_exhausted());
    }
}
