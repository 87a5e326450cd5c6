use tracing::trace;

use crate::encoder::bit_buffer::BitBuffer;
use crate::encoder::reed_solomon::ReedSolomonEncoder;
use crate::encoder::segment::DataSegment;
use crate::encoder::tables::rs_blocks;
use crate::error::{QrError, Result};
use crate::models::{ECLevel, Version};

const PAD_BYTES: [u8; 2] = [0xEC, 0x11];
const TERMINATOR_BITS: usize = 4;

/// Bits needed by `segments` at `version` including the terminator, or
/// `None` when a character count overflows its length field
pub(super) fn required_bits(segments: &[DataSegment], version: Version) -> Option<usize> {
    segments
        .iter()
        .map(|s| s.encoded_bits(version))
        .sum::<Option<usize>>()
        .map(|bits| bits + TERMINATOR_BITS)
}

/// Bits needed by `segments` at `version` including the terminator, even
/// when a character count overflows its length field
pub(super) fn uncapped_bits(segments: &[DataSegment], version: Version) -> usize {
    segments
        .iter()
        .map(|s| s.header_and_data_bits(version))
        .sum::<usize>()
        + TERMINATOR_BITS
}

/// Headers + data + terminator, byte-aligned and filled with the
/// alternating pad bytes up to `capacity` codewords
pub(super) fn assemble_data(
    segments: &[DataSegment],
    version: Version,
    capacity: usize,
) -> Result<Vec<u8>> {
    let mut buffer = BitBuffer::new();
    for segment in segments {
        let mode = segment.mode();
        buffer.put(mode.indicator(), 4);
        buffer.put(segment.char_count() as u32, mode.length_bits(version));
        segment.write_into(&mut buffer)?;
    }

    let capacity_bits = capacity * 8;
    if buffer.bit_len() > capacity_bits {
        return Err(QrError::InvalidArgument(format!(
            "assembled {} bits exceed {capacity_bits} bit capacity",
            buffer.bit_len()
        )));
    }

    let terminator = TERMINATOR_BITS.min(capacity_bits - buffer.bit_len());
    buffer.put(0, terminator);
    while buffer.bit_len() % 8 != 0 {
        buffer.put_bit(false);
    }

    let mut bytes = buffer.into_bytes();
    let mut pad = PAD_BYTES.iter().cycle();
    while bytes.len() < capacity {
        bytes.extend(pad.next());
    }
    trace!(
        data_codewords = bytes.len(),
        "assembled data codewords"
    );
    Ok(bytes)
}

/// Split data codewords into RS blocks, compute each block's EC codewords,
/// and interleave: data column by column, then EC column by column.
pub(super) fn interleave(data: &[u8], version: Version, ec_level: ECLevel) -> Result<Vec<u8>> {
    let blocks = rs_blocks(version, ec_level)?;

    let mut data_blocks: Vec<&[u8]> = Vec::with_capacity(blocks.len());
    let mut ec_blocks: Vec<Vec<u8>> = Vec::with_capacity(blocks.len());
    let mut offset = 0;
    // Every block in a symbol carries the same number of EC codewords
    let ec_count = blocks.first().map(|b| b.ec_count()).unwrap_or(0);
    let rs = ReedSolomonEncoder::new(ec_count);

    for block in &blocks {
        let end = offset + block.data_count;
        let chunk = data.get(offset..end).ok_or_else(|| {
            QrError::InvalidArgument(format!(
                "{} data codewords do not fill the RS blocks",
                data.len()
            ))
        })?;
        offset = end;

        if block.ec_count() != ec_count {
            return Err(QrError::InvalidArgument(format!(
                "mixed EC lengths for version {version} level {ec_level:?}"
            )));
        }
        ec_blocks.push(rs.encode(chunk)?);
        data_blocks.push(chunk);
    }

    let max_data = blocks.iter().map(|b| b.data_count).max().unwrap_or(0);
    let max_ec = blocks.iter().map(|b| b.ec_count()).max().unwrap_or(0);
    let total: usize = blocks.iter().map(|b| b.total_count).sum();

    let mut out = Vec::with_capacity(total);
    for i in 0..max_data {
        out.extend(data_blocks.iter().filter_map(|b| b.get(i)));
    }
    for i in 0..max_ec {
        out.extend(ec_blocks.iter().filter_map(|b| b.get(i)));
    }
    Ok(out)
}
