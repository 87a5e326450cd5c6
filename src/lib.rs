//! RustQR encoder - QR Code (Model 2) symbol generation
//!
//! Turns text or bytes into a finished QR module matrix: mode segmentation,
//! Reed-Solomon error correction over GF(256), BCH-coded format/version
//! info, automatic version and mask selection, and module layout.
//!
//! ```
//! use rust_qr_encoder::{encode, ECLevel};
//!
//! let code = encode("HELLO WORLD", ECLevel::Q).unwrap();
//! assert_eq!(code.size(), 21);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR code encoding modules (segments, error correction, layout, masking)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (QRCode, BitMatrix, ModuleGrid, etc.)
pub mod models;

pub use encoder::config::EncodeOptions;
pub use encoder::qr_encoder::QrEncoder;
pub use encoder::segment::{DataSegment, Mode};
pub use error::{QrError, Result};
pub use models::{BitMatrix, CellData, ECLevel, MaskPattern, QRCode, Version};

/// Encode `text` at `ec_level` in the most compact mode, picking the
/// smallest version and the lowest-penalty mask.
pub fn encode(text: &str, ec_level: ECLevel) -> Result<QRCode> {
    let mut encoder = QrEncoder::new(0, ec_level);
    encoder.add_auto(text);
    encoder.encode()
}

/// Encode raw bytes at `ec_level` in byte mode.
pub fn encode_bytes(data: &[u8], ec_level: ECLevel) -> Result<QRCode> {
    let mut encoder = QrEncoder::new(0, ec_level);
    encoder.add_bytes(data);
    encoder.encode()
}

/// Encode with explicit options (fixed version and/or mask).
pub fn encode_with_options(text: &str, options: EncodeOptions) -> Result<QRCode> {
    let mut encoder = QrEncoder::with_options(options);
    encoder.add_auto(text);
    encoder.encode()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_numeric() {
        let code = encode("01234567", ECLevel::M).unwrap();
        assert_eq!(code.version.number(), 1);
        assert_eq!(code.size(), 21);
    }

    #[test]
    fn test_encode_bytes_grows_version() {
        let code = encode_bytes(&[0x42; 100], ECLevel::H).unwrap();
        assert!(code.version.number() > 1);
        assert_eq!(code.size(), code.version.size());
    }

    #[test]
    fn test_encode_with_options() {
        let options = EncodeOptions {
            version: 3,
            ec_level: ECLevel::L,
            mask: Some(MaskPattern::Pattern6),
        };
        let code = encode_with_options("OPTIONS", options).unwrap();
        assert_eq!(code.version.number(), 3);
        assert_eq!(code.mask_pattern, MaskPattern::Pattern6);
    }
}
