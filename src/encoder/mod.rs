//! QR code encoding modules
//!
//! Everything between a caller's payload and the finished module matrix:
//! - Data segments and the numeric/alphanumeric/byte mode writers
//! - GF(256) arithmetic, polynomials and Reed-Solomon EC generation
//! - BCH-coded format and version information
//! - Function pattern layout, codeword placement and masking

/// BCH codes for format and version info
pub mod bch;
/// MSB-first bit stream
pub mod bit_buffer;
/// Encode options and environment tuning knobs
pub mod config;
/// Finder/alignment/timing layout and metadata writing
pub mod function_patterns;
/// GF(256) log/antilog arithmetic
pub mod gf256;
/// Mask patterns and penalty scoring
pub mod mask;
/// Data mode encoders (numeric, alphanumeric, byte)
pub mod modes;
/// Zigzag codeword placement
pub mod placement;
/// Polynomials over GF(256)
pub mod polynomial;
/// Main QR encoder that orchestrates the encoding pipeline
pub mod qr_encoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Data segments and mode selection
pub mod segment;
/// QR specification tables (ECC codewords/blocks, alignment positions)
pub mod tables;
