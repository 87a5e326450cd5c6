//! Data segments: one payload chunk in a single encoding mode
//!
//! A symbol's bit stream is a sequence of segments, each introduced by a
//! 4-bit mode indicator and a character-count field whose width depends on
//! the version band (1-9, 10-26, 27-40). The orchestrator writes those
//! headers; a segment only knows its own data bits.

use crate::encoder::bit_buffer::BitBuffer;
use crate::encoder::modes::alphanumeric::{AlphanumericEncoder, char_index};
use crate::encoder::modes::byte::ByteEncoder;
use crate::encoder::modes::numeric::NumericEncoder;
use crate::error::Result;
use crate::models::Version;

/// Data encoding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Digits 0-9
    Numeric,
    /// `0-9A-Z $%*+-./:`
    AlphaNumeric,
    /// Arbitrary 8-bit bytes
    Byte8,
}

impl Mode {
    /// 4-bit mode indicator
    pub fn indicator(&self) -> u32 {
        match self {
            Mode::Numeric => 0b0001,
            Mode::AlphaNumeric => 0b0010,
            Mode::Byte8 => 0b0100,
        }
    }

    /// Width of the character-count field at `version`
    pub fn length_bits(&self, version: Version) -> usize {
        let band = match version.number() {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        let widths = match self {
            Mode::Numeric => [10, 12, 14],
            Mode::AlphaNumeric => [9, 11, 13],
            Mode::Byte8 => [8, 16, 16],
        };
        widths[band]
    }

    /// Most compact mode able to hold `text`
    pub fn detect(text: &str) -> Self {
        if text.chars().all(|c| c.is_ascii_digit()) {
            Mode::Numeric
        } else if text.chars().all(|c| char_index(c).is_some()) {
            Mode::AlphaNumeric
        } else {
            Mode::Byte8
        }
    }
}

/// One validated payload chunk.
///
/// Only the constructors below can build a segment, so numeric and
/// alphanumeric payloads are always checked before they reach the encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSegment(Payload);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Payload {
    Numeric(String),
    AlphaNumeric(String),
    Byte8(Vec<u8>),
}

impl DataSegment {
    /// Numeric segment; fails on any non-digit
    pub fn numeric(digits: &str) -> Result<Self> {
        NumericEncoder::validate(digits)?;
        Ok(Self(Payload::Numeric(digits.to_owned())))
    }

    /// Alphanumeric segment; fails on characters outside the 45-symbol set
    pub fn alphanumeric(text: &str) -> Result<Self> {
        AlphanumericEncoder::validate(text)?;
        Ok(Self(Payload::AlphaNumeric(text.to_owned())))
    }

    /// Byte segment from raw bytes
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Self(Payload::Byte8(data.into()))
    }

    /// Byte segment holding the UTF-8 encoding of `text`
    pub fn text(text: &str) -> Self {
        Self::bytes(text.as_bytes())
    }

    /// Segment in the most compact mode for `text`
    pub fn auto(text: &str) -> Self {
        match Mode::detect(text) {
            Mode::Numeric => Self(Payload::Numeric(text.to_owned())),
            Mode::AlphaNumeric => Self(Payload::AlphaNumeric(text.to_owned())),
            Mode::Byte8 => Self::text(text),
        }
    }

    /// Encoding mode of the payload
    pub fn mode(&self) -> Mode {
        match &self.0 {
            Payload::Numeric(_) => Mode::Numeric,
            Payload::AlphaNumeric(_) => Mode::AlphaNumeric,
            Payload::Byte8(_) => Mode::Byte8,
        }
    }

    /// Value stored in the character-count field
    pub fn char_count(&self) -> usize {
        match &self.0 {
            // Both string modes are validated ASCII, so bytes == chars.
            Payload::Numeric(s) | Payload::AlphaNumeric(s) => s.len(),
            Payload::Byte8(b) => b.len(),
        }
    }

    /// Bits produced by `write_into` (headers excluded)
    pub fn data_bits(&self) -> usize {
        let count = self.char_count();
        match &self.0 {
            Payload::Numeric(_) => NumericEncoder::bit_length(count),
            Payload::AlphaNumeric(_) => AlphanumericEncoder::bit_length(count),
            Payload::Byte8(_) => ByteEncoder::bit_length(count),
        }
    }

    /// Bits including mode indicator and character-count field at `version`,
    /// whether or not the count fits the field
    pub fn header_and_data_bits(&self, version: Version) -> usize {
        4 + self.mode().length_bits(version) + self.data_bits()
    }

    /// Bits including mode indicator and character-count field, or `None`
    /// when the count does not fit the field at `version`
    pub fn encoded_bits(&self, version: Version) -> Option<usize> {
        let length_bits = self.mode().length_bits(version);
        if self.char_count() >> length_bits != 0 {
            return None;
        }
        Some(self.header_and_data_bits(version))
    }

    /// Write the segment's data bits
    pub fn write_into(&self, buffer: &mut BitBuffer) -> Result<()> {
        match &self.0 {
            Payload::Numeric(s) => NumericEncoder::write(s, buffer),
            Payload::AlphaNumeric(s) => AlphanumericEncoder::write(s, buffer),
            Payload::Byte8(b) => {
                ByteEncoder::write(b, buffer);
                Ok(())
            }
        }
    }
}
