use std::io::Result;

pub mod be;

pub use be::{BitReader, BitWriter};

/// Bit-granular reads. Implementors only supply `read_bit`.
pub trait BitRead {
    fn read_bit(&mut self) -> Result<bool>;

    /// Reads `count` bits (at most 32), first bit read ends up most significant.
    fn read_bits(&mut self, count: u32) -> Result<u32> {
        debug_assert!(count <= 32);
        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u32;
        }
        Ok(value)
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }
}

/// Bit-granular writes into a growable buffer. Writing never fails.
pub trait BitWrite {
    fn write_bit(&mut self, bit: bool);

    /// Writes the low `count` bits of `value` (at most 32), most significant first.
    fn write_bits(&mut self, value: u32, count: u32) {
        debug_assert!(count <= 32);
        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
    }

    fn write_u8(&mut self, value: u8) {
        self.write_bits(value as u32, 8)
    }
}
