/// BCH codes for QR format info (15,5) and version info (18,6)
use crate::error::{QrError, Result};
use crate::models::{ECLevel, MaskPattern, Version};

/// x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const G15: u32 = 0b101_0011_0111;
/// x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const G18: u32 = 0b1_1111_0010_0101;
/// Keeps the format word nonzero for every level/mask pair
const G15_MASK: u32 = 0b101_0100_0001_0010;

/// Number of significant bits
fn bch_digit(data: u32) -> u32 {
    u32::BITS - data.leading_zeros()
}

/// Remainder of `data` modulo `generator` over GF(2)
fn bch_remainder(data: u32, generator: u32) -> u32 {
    let mut value = data;
    while bch_digit(value) >= bch_digit(generator) {
        value ^= generator << (bch_digit(value) - bch_digit(generator));
    }
    value
}

/// 15-bit format information for an error correction level and mask
pub fn format_info_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = (u32::from(ec_level.format_bits()) << 3) | u32::from(mask.bits());
    let shifted = data << 10;
    ((shifted | bch_remainder(shifted, G15)) ^ G15_MASK) as u16
}

/// 18-bit version information (versions 7 and up)
pub fn version_info_bits(version: Version) -> Result<u32> {
    if !version.has_version_info() {
        return Err(QrError::InvalidArgument(format!(
            "version {version} has no version information"
        )));
    }
    let shifted = u32::from(version.number()) << 12;
    Ok(shifted | bch_remainder(shifted, G18))
}

/// Check a 15-bit format word and return its level and mask
pub fn decode_format(format: u16) -> Option<(ECLevel, MaskPattern)> {
    let unmasked = u32::from(format) ^ G15_MASK;
    if unmasked >> 15 != 0 || bch_remainder(unmasked, G15) != 0 {
        return None;
    }
    let data = (unmasked >> 10) as u8;
    Some((
        ECLevel::from_format_bits(data >> 3)?,
        MaskPattern::from_bits(data & 0x07)?,
    ))
}

/// Check an 18-bit version word and return its version
pub fn decode_version(bits: u32) -> Option<Version> {
    if bits >> 18 != 0 || bch_remainder(bits, G18) != 0 {
        return None;
    }
    Version::new((bits >> 12) as u8)
        .ok()
        .filter(|v| v.has_version_info())
}
