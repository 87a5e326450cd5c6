/// Alphanumeric mode encoder (Mode 0010)
/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
use crate::encoder::bit_buffer::BitBuffer;
use crate::encoder::segment::Mode;
use crate::error::{QrError, Result};

const ALPHANUMERIC_TABLE: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

/// Index of `c` in the alphanumeric table
pub fn char_index(c: char) -> Option<u32> {
    ALPHANUMERIC_TABLE
        .iter()
        .position(|&t| t == c)
        .map(|i| i as u32)
}

/// Encode alphanumeric data
/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    /// Reject characters outside the 45-symbol set
    pub fn validate(source: &str) -> Result<()> {
        match source.chars().enumerate().find(|(_, c)| char_index(*c).is_none()) {
            Some((position, character)) => Err(QrError::InvalidCharacter {
                mode: Mode::AlphaNumeric,
                character,
                position,
            }),
            None => Ok(()),
        }
    }

    /// Encoded size of `char_count` characters
    pub fn bit_length(char_count: usize) -> usize {
        11 * (char_count / 2) + 6 * (char_count % 2)
    }

    /// Write validated characters into the buffer
    pub fn write(source: &str, buffer: &mut BitBuffer) -> Result<()> {
        let indices = source
            .chars()
            .enumerate()
            .map(|(position, character)| {
                char_index(character).ok_or(QrError::InvalidCharacter {
                    mode: Mode::AlphaNumeric,
                    character,
                    position,
                })
            })
            .collect::<Result<Vec<u32>>>()?;

        for pair in indices.chunks(2) {
            match pair {
                &[first, second] => buffer.put(first * 45 + second, 11),
                &[single] => buffer.put(single, 6),
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphanumeric_encode() {
        // "A1" = (10 * 45 + 1) = 451 = 0b00111000011 (11 bits)
        let mut buffer = BitBuffer::new();
        AlphanumericEncoder::write("A1", &mut buffer).unwrap();
        assert_eq!(buffer.bit_len(), 11);
        assert_eq!(buffer.bytes(), &[0b0011_1000, 0b0110_0000]);
    }

    #[test]
    fn test_trailing_single_character() {
        let mut buffer = BitBuffer::new();
        AlphanumericEncoder::write("HELLO WORLD", &mut buffer).unwrap();
        assert_eq!(buffer.bit_len(), 61);
        assert_eq!(AlphanumericEncoder::bit_length(11), 61);
        // Leading pair "HE" = 17 * 45 + 14 = 779
        assert_eq!(buffer.bytes()[0], 0b0110_0001);
    }

    #[test]
    fn test_table_covers_45_symbols() {
        assert_eq!(char_index('0'), Some(0));
        assert_eq!(char_index('Z'), Some(35));
        assert_eq!(char_index(' '), Some(36));
        assert_eq!(char_index(':'), Some(44));
        assert_eq!(char_index('a'), None);
    }

    #[test]
    fn test_rejects_lowercase() {
        assert_eq!(
            AlphanumericEncoder::validate("ABc"),
            Err(QrError::InvalidCharacter {
                mode: Mode::AlphaNumeric,
                character: 'c',
                position: 2,
            })
        );
        let mut buffer = BitBuffer::new();
        assert!(AlphanumericEncoder::write("a", &mut buffer).is_err());
    }
}
