//! Bit streams for run-length coded payloads.
//!
//! Bits are stored most significant bit first within each byte.

use crate::BLOCK_SIZE;

#[derive(Clone, Debug, Default)]
pub(crate) struct BitWriter {
    bytes: Vec<u8>,
    len: usize,
}

impl BitWriter {
    pub(crate) fn push(&mut self, bit: bool) {
        let idx = self.len / 8;
        if idx == self.bytes.len() {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[idx] |= 0x80 >> (self.len % 8);
        }
        self.len += 1;
    }

    /// Write `value` with [Elias gamma coding][gamma].
    ///
    /// `floor(log2(value))` zero bits followed by `value` in binary, starting
    /// with its leading one.
    ///
    /// [gamma]: https://en.wikipedia.org/wiki/Elias_gamma_coding
    pub(crate) fn write_elias_gamma(&mut self, value: u32) {
        assert_ne!(value, 0, "elias gamma cannot encode zero");
        let magnitude = u32::BITS - 1 - value.leading_zeros();
        for _ in 0..magnitude {
            self.push(false);
        }
        for shift in (0..=magnitude).rev() {
            self.push((value >> shift) & 1 == 1);
        }
    }

    /// The number of bits written so far.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Zero-pad to a whole number of blocks and return the bytes.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        let padded = self.bytes.len().div_ceil(BLOCK_SIZE) * BLOCK_SIZE;
        self.bytes.resize(padded, 0);
        self.bytes
    }
}

#[derive(Clone, Debug)]
pub(crate) struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        BitReader { bytes, pos: 0 }
    }

    pub(crate) fn read_bit(&mut self) -> Option<bool> {
        let byte = self.bytes.get(self.pos / 8)?;
        let bit = byte & (0x80 >> (self.pos % 8)) != 0;
        self.pos += 1;
        Some(bit)
    }

    /// Read one Elias gamma coded value, or `None` if the stream runs out.
    pub(crate) fn read_elias_gamma(&mut self) -> Option<u32> {
        let mut magnitude = 0;
        while !self.read_bit()? {
            magnitude += 1;
            if magnitude >= u32::BITS {
                return None;
            }
        }
        let mut value = 1u32;
        for _ in 0..magnitude {
            value = (value << 1) | self.read_bit()? as u32;
        }
        Some(value)
    }
}
