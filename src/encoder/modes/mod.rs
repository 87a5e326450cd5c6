//! QR code data mode encoders
//!
//! This module contains encoders for the supported data modes:
//! - Numeric: Efficient encoding for digits (0-9)
//! - Alphanumeric: Upper-case letters, digits, and a few symbols
//! - Byte: 8-bit data (UTF-8, binary, etc.)

/// Alphanumeric mode (45-symbol set)
pub mod alphanumeric;
/// Byte mode
pub mod byte;
/// Numeric mode
pub mod numeric;
