//! QR specification tables and the Reed-Solomon block planner

use crate::error::{QrError, Result};
use crate::models::{ECLevel, Version};

// Tables from the QR Code specification (Model 2) via Nayuki QR Code generator.
// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// Alignment pattern centre coordinates per version (index = version - 1)
const ALIGNMENT_PATTERN_POSITIONS: [&[usize]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

/// One Reed-Solomon block: `total_count` codewords, the first `data_count`
/// of which are data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsBlock {
    /// Data + EC codewords
    pub total_count: usize,
    /// Data codewords
    pub data_count: usize,
}

impl RsBlock {
    /// EC codewords
    pub fn ec_count(&self) -> usize {
        self.total_count - self.data_count
    }
}

/// A run of identical blocks: `count` blocks of (`total_count`, `data_count`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsBlockGroup {
    /// Number of blocks in the group
    pub count: usize,
    /// Data + EC codewords per block
    pub total_count: usize,
    /// Data codewords per block
    pub data_count: usize,
}

/// Alignment pattern centres for a version (empty for version 1)
pub fn alignment_pattern_positions(version: Version) -> &'static [usize] {
    ALIGNMENT_PATTERN_POSITIONS[version.number() as usize - 1]
}

/// Modules left for data + EC codewords once every function pattern and
/// metadata area is removed (may include up to 7 remainder bits)
pub fn raw_data_modules(version: Version) -> usize {
    let v = version.number() as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Total codewords (data + EC) in a symbol
pub fn total_codewords(version: Version) -> usize {
    raw_data_modules(version) / 8
}

/// Block groups for a version and level: shorter blocks first, then the
/// blocks carrying one extra data codeword (if any)
pub fn rs_block_groups(version: Version, ec_level: ECLevel) -> Result<Vec<RsBlockGroup>> {
    let idx = ec_level.table_index();
    let v = version.number() as usize;
    let ecc = ECC_CODEWORDS_PER_BLOCK[idx][v];
    let blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][v];
    if ecc <= 0 || blocks <= 0 {
        return Err(QrError::InvalidArgument(format!(
            "no RS block entry for version {version} level {ec_level:?}"
        )));
    }
    let (ecc, blocks) = (ecc as usize, blocks as usize);

    let total = total_codewords(version);
    let short_len = total / blocks;
    let long_blocks = total % blocks;
    if short_len <= ecc {
        return Err(QrError::InvalidArgument(format!(
            "RS table leaves no data codewords for version {version} level {ec_level:?}"
        )));
    }

    let mut groups = vec![RsBlockGroup {
        count: blocks - long_blocks,
        total_count: short_len,
        data_count: short_len - ecc,
    }];
    if long_blocks > 0 {
        groups.push(RsBlockGroup {
            count: long_blocks,
            total_count: short_len + 1,
            data_count: short_len + 1 - ecc,
        });
    }
    Ok(groups)
}

/// Flat ordered block list for one encode pass
pub fn rs_blocks(version: Version, ec_level: ECLevel) -> Result<Vec<RsBlock>> {
    Ok(rs_block_groups(version, ec_level)?
        .into_iter()
        .flat_map(|g| {
            std::iter::repeat_n(
                RsBlock {
                    total_count: g.total_count,
                    data_count: g.data_count,
                },
                g.count,
            )
        })
        .collect())
}

/// Data codeword capacity, i.e. the sum of `data_count` over all blocks
pub fn data_codewords(version: Version, ec_level: ECLevel) -> Result<usize> {
    Ok(rs_blocks(version, ec_level)?
        .iter()
        .map(|b| b.data_count)
        .sum())
}
