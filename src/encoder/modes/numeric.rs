/// Numeric mode encoder (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use crate::encoder::bit_buffer::BitBuffer;
use crate::encoder::segment::Mode;
use crate::error::{QrError, Result};

/// Encode numeric data
pub struct NumericEncoder;

impl NumericEncoder {
    /// Reject anything that is not an ASCII digit
    pub fn validate(source: &str) -> Result<()> {
        match source.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
            Some((position, character)) => Err(QrError::InvalidCharacter {
                mode: Mode::Numeric,
                character,
                position,
            }),
            None => Ok(()),
        }
    }

    /// Encoded size of `digit_count` digits
    pub fn bit_length(digit_count: usize) -> usize {
        let tail = match digit_count % 3 {
            0 => 0,
            1 => 4,
            _ => 7,
        };
        10 * (digit_count / 3) + tail
    }

    /// Write digits into the buffer; nothing is written if any character
    /// is not a digit
    pub fn write(digits: &str, buffer: &mut BitBuffer) -> Result<()> {
        Self::validate(digits)?;
        for group in digits.as_bytes().chunks(3) {
            let value = group
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
            let bits = match group.len() {
                3 => 10,
                2 => 7,
                _ => 4,
            };
            buffer.put(value, bits);
        }
        Ok(())
    }
}
