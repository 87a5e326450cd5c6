use std::fmt;
use std::str::FromStr;

use super::BitMatrix;
use crate::error::{QrError, Result};

/// QR Code version (type number 1-40, Model 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest version
    pub const MIN: Version = Version(1);
    /// Largest version
    pub const MAX: Version = Version(40);

    /// Create a version, rejecting numbers outside 1-40
    pub fn new(number: u8) -> Result<Self> {
        if (1..=40).contains(&number) {
            Ok(Self(number))
        } else {
            Err(QrError::InvalidArgument(format!(
                "version {number} is outside 1..=40"
            )))
        }
    }

    /// Get the version number (1-40)
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * (self.0 as usize) + 17
    }

    /// Versions 7 and up carry an 18-bit version info block
    pub fn has_version_info(&self) -> bool {
        self.0 >= 7
    }

    /// Iterate every version in ascending order
    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level
///
/// Discriminants are the 2-bit codes stored in the format information,
/// which are not in recovery-capacity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L = 1,
    /// Medium (~15% recovery capacity)
    M = 0,
    /// Quartile (~25% recovery capacity)
    Q = 3,
    /// High (~30% recovery capacity)
    H = 2,
}

impl ECLevel {
    /// All levels from lowest to highest recovery capacity
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Format information code (L=01, M=00, Q=11, H=10)
    pub fn format_bits(&self) -> u8 {
        *self as u8
    }

    /// Get error correction level from its format information code
    pub fn from_format_bits(bits: u8) -> Option<Self> {
        match bits & 0x03 {
            0 => Some(ECLevel::M),
            1 => Some(ECLevel::L),
            2 => Some(ECLevel::H),
            3 => Some(ECLevel::Q),
            _ => None,
        }
    }

    /// Row index into the per-level capacity tables (L, M, Q, H order)
    pub(crate) fn table_index(&self) -> usize {
        match self {
            ECLevel::L => 0,
            ECLevel::M => 1,
            ECLevel::Q => 2,
            ECLevel::H => 3,
        }
    }
}

impl FromStr for ECLevel {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "L" | "l" => Ok(ECLevel::L),
            "M" | "m" => Ok(ECLevel::M),
            "Q" | "q" => Ok(ECLevel::Q),
            "H" | "h" => Ok(ECLevel::H),
            other => Err(QrError::InvalidArgument(format!(
                "unknown error correction level {other:?}"
            ))),
        }
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// Every pattern in index order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from bits
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.get((bits & 0x07) as usize).copied()
    }

    /// Pattern reference as stored in the format information
    pub fn bits(&self) -> u8 {
        *self as u8
    }

    /// Check if module at row `i`, column `j` is flipped by this mask
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

impl TryFrom<u8> for MaskPattern {
    type Error = QrError;

    fn try_from(value: u8) -> Result<Self> {
        if value > 7 {
            return Err(QrError::InvalidArgument(format!(
                "mask pattern {value} is outside 0..=7"
            )));
        }
        Self::from_bits(value)
            .ok_or_else(|| QrError::InvalidArgument(format!("mask pattern {value}")))
    }
}

/// Row-major boolean cells handed to renderers (`true` = dark)
pub type CellData = Vec<Vec<bool>>;

/// Encoded QR code symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QRCode {
    /// Version actually used
    pub version: Version,
    /// Error correction level
    pub error_correction: ECLevel,
    /// Mask pattern applied
    pub mask_pattern: MaskPattern,
    /// Module matrix (true = dark, false = light), no quiet zone
    pub modules: BitMatrix,
}

impl QRCode {
    /// Wrap a finished module matrix
    pub fn new(
        version: Version,
        error_correction: ECLevel,
        mask_pattern: MaskPattern,
        modules: BitMatrix,
    ) -> Self {
        Self {
            version,
            error_correction,
            mask_pattern,
            modules,
        }
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.modules.width()
    }

    /// Whether the module at column `x`, row `y` is dark
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    /// Copy the grid out as rows of booleans
    pub fn to_cell_data(&self) -> CellData {
        let size = self.size();
        (0..size)
            .map(|y| (0..size).map(|x| self.modules.get(x, y)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_size() {
        assert_eq!(Version::new(1).unwrap().size(), 21);
        assert_eq!(Version::new(2).unwrap().size(), 25);
        assert_eq!(Version::MAX.size(), 177);
        assert!(Version::new(0).is_err());
        assert!(Version::new(41).is_err());
        assert_eq!(Version::all().count(), 40);
    }

    #[test]
    fn test_ec_level_format_codes() {
        assert_eq!(ECLevel::L.format_bits(), 0b01);
        assert_eq!(ECLevel::M.format_bits(), 0b00);
        assert_eq!(ECLevel::Q.format_bits(), 0b11);
        assert_eq!(ECLevel::H.format_bits(), 0b10);
        for level in ECLevel::ALL {
            assert_eq!(ECLevel::from_format_bits(level.format_bits()), Some(level));
        }
    }

    #[test]
    fn test_ec_level_parse() {
        assert_eq!("Q".parse::<ECLevel>().unwrap(), ECLevel::Q);
        assert_eq!("h".parse::<ECLevel>().unwrap(), ECLevel::H);
        assert!("X".parse::<ECLevel>().is_err());
    }

    #[test]
    fn test_mask_pattern() {
        let mask = MaskPattern::Pattern0;
        assert!(mask.is_masked(0, 0));
        assert!(!mask.is_masked(0, 1));
        assert!(mask.is_masked(1, 1));

        assert_eq!(MaskPattern::try_from(5).unwrap(), MaskPattern::Pattern5);
        assert!(matches!(
            MaskPattern::try_from(8),
            Err(QrError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_cell_data_rows() {
        let mut modules = BitMatrix::new(21, 21);
        modules.set(3, 1, true);
        let qr = QRCode::new(
            Version::MIN,
            ECLevel::M,
            MaskPattern::Pattern0,
            modules,
        );
        let cells = qr.to_cell_data();
        assert_eq!(cells.len(), 21);
        assert!(cells[1][3]);
        assert!(!cells[3][1]);
    }
}
