/// Append-only MSB-first bit stream
#[derive(Debug, Clone, Default)]
pub struct BitBuffer {
    buffer: Vec<u8>,
    length: usize,
}

impl BitBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `bit_len` bits of `value`, most significant first
    pub fn put(&mut self, value: u32, bit_len: usize) {
        for i in (0..bit_len).rev() {
            self.put_bit((value >> i) & 1 == 1);
        }
    }

    /// Append one bit
    pub fn put_bit(&mut self, bit: bool) {
        let byte_index = self.length / 8;
        if self.buffer.len() <= byte_index {
            self.buffer.push(0);
        }
        if bit {
            self.buffer[byte_index] |= 0x80 >> (self.length % 8);
        }
        self.length += 1;
    }

    /// Bytes written so far; bits past `bit_len()` are zero
    pub fn bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Bits written so far
    pub fn bit_len(&self) -> usize {
        self.length
    }

    /// Consume the buffer, returning its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_msb_first() {
        let mut buf = BitBuffer::new();
        buf.put(0b0001, 4);
        buf.put(8, 10);
        assert_eq!(buf.bit_len(), 14);
        assert_eq!(buf.bytes(), &[0b0001_0000, 0b0010_0000]);
    }

    #[test]
    fn test_put_masks_high_bits() {
        let mut buf = BitBuffer::new();
        buf.put(0xFFFF_FF0A, 4);
        assert_eq!(buf.bytes(), &[0b1010_0000]);
    }

    #[test]
    fn test_put_bit_and_zero_length() {
        let mut buf = BitBuffer::new();
        buf.put(0xAB, 0);
        assert_eq!(buf.bit_len(), 0);
        assert!(buf.bytes().is_empty());

        for bit in [true, false, true, true, false, false, true, false, true] {
            buf.put_bit(bit);
        }
        assert_eq!(buf.bit_len(), 9);
        assert_eq!(buf.into_bytes(), vec![0b1011_0010, 0b1000_0000]);
    }
}
