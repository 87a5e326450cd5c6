//! Error types returned by the encoder

use thiserror::Error;

use crate::encoder::segment::Mode;
use crate::models::ECLevel;

/// Errors produced while building a QR symbol.
///
/// All of them are raised before any module layout happens, so a failed
/// encode never yields a partial matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// The payload contains a character its mode cannot represent
    #[error("invalid character {character:?} at position {position} for {mode:?} mode")]
    InvalidCharacter {
        /// Mode the segment was declared (or detected) as
        mode: Mode,
        /// Offending character
        character: char,
        /// Character index within the segment source
        position: usize,
    },

    /// No admissible version has room for the payload
    #[error(
        "data too long: {required_bits} bits needed, {capacity_bits} available (version {version}, level {ec_level:?})"
    )]
    DataTooLong {
        /// Bits required by headers, data and terminator
        required_bits: usize,
        /// Data capacity in bits of the largest version tried
        capacity_bits: usize,
        /// Requested error correction level
        ec_level: ECLevel,
        /// Largest version tried
        version: u8,
    },

    /// Malformed internal parameter (log of zero, unsupported version, ...)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QrError>;
