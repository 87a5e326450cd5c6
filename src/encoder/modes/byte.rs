/// Byte mode encoder (Mode 0100) for 8-bit data
use crate::encoder::bit_buffer::BitBuffer;

/// Encode raw bytes, 8 bits each
pub struct ByteEncoder;

impl ByteEncoder {
    /// Encoded size of `byte_count` bytes
    pub fn bit_length(byte_count: usize) -> usize {
        8 * byte_count
    }

    /// Write every byte MSB first
    pub fn write(bytes: &[u8], buffer: &mut BitBuffer) {
        for &byte in bytes {
            buffer.put(u32::from(byte), 8);
        }
    }
}
