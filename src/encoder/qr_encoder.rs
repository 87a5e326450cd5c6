/// Main QR encoder - wires segments, RS codewords, layout and masking together
use tracing::{debug, instrument};

use crate::encoder::config::EncodeOptions;
use crate::encoder::function_patterns::{build_function_grid, write_metadata};
use crate::encoder::mask::{apply_mask, choose_mask, penalty_score};
use crate::encoder::placement::place_codewords;
use crate::encoder::segment::DataSegment;
use crate::encoder::tables::data_codewords;
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, ECLevel, MaskPattern, ModuleGrid, QRCode, Version};

mod codewords;


/// Accumulates data segments and builds a symbol from them
#[derive(Debug, Clone)]
pub struct QrEncoder {
    options: EncodeOptions,
    segments: Vec<DataSegment>,
}

impl QrEncoder {
    /// Encoder for a fixed `type_number` (1-40), or 0 to pick the smallest
    /// version that fits.
    pub fn new(type_number: u8, ec_level: ECLevel) -> Self {
        Self::with_options(EncodeOptions {
            version: type_number,
            ec_level,
            ..EncodeOptions::default()
        })
    }

    /// Encoder driven by a full option set
    pub fn with_options(options: EncodeOptions) -> Self {
        Self {
            options,
            segments: Vec::new(),
        }
    }

    /// Use `mask` instead of searching for the lowest-penalty pattern
    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.options.mask = Some(mask);
        self
    }

    /// Options the encoder was built with
    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Segments added so far, in stream order
    pub fn segments(&self) -> &[DataSegment] {
        &self.segments
    }

    /// Append `text` as its UTF-8 bytes
    pub fn add_text(&mut self, text: &str) -> &mut Self {
        self.add_segment(DataSegment::text(text))
    }

    /// Append `text` in the most compact mode that can hold all of it
    pub fn add_auto(&mut self, text: &str) -> &mut Self {
        self.add_segment(DataSegment::auto(text))
    }

    /// Append a numeric segment
    pub fn add_number(&mut self, digits: &str) -> Result<&mut Self> {
        Ok(self.add_segment(DataSegment::numeric(digits)?))
    }

    /// Append an alphanumeric segment
    pub fn add_alphanumeric(&mut self, text: &str) -> Result<&mut Self> {
        Ok(self.add_segment(DataSegment::alphanumeric(text)?))
    }

    /// Append a byte segment
    pub fn add_bytes(&mut self, data: &[u8]) -> &mut Self {
        self.add_segment(DataSegment::bytes(data))
    }

    /// Append an already validated segment
    pub fn add_segment(&mut self, segment: DataSegment) -> &mut Self {
        self.segments.push(segment);
        self
    }

    /// Version that will be used for the current segments
    pub fn resolve_version(&self) -> Result<Version> {
        let ec_level = self.options.ec_level;
        let fits = |version: Version| -> Result<(bool, usize, usize)> {
            let capacity_bits = data_codewords(version, ec_level)? * 8;
            Ok(match codewords::required_bits(&self.segments, version) {
                Some(bits) => (bits <= capacity_bits, bits, capacity_bits),
                // Count overflows the length field: cannot fit at this version
                None => (
                    false,
                    codewords::uncapped_bits(&self.segments, version),
                    capacity_bits,
                ),
            })
        };

        if self.options.version != 0 {
            let version = Version::new(self.options.version)?;
            let (ok, required_bits, capacity_bits) = fits(version)?;
            if !ok {
                return Err(QrError::DataTooLong {
                    required_bits,
                    capacity_bits,
                    ec_level,
                    version: version.number(),
                });
            }
            return Ok(version);
        }

        let mut last = (0, 0);
        for version in Version::all() {
            let (ok, required_bits, capacity_bits) = fits(version)?;
            if ok {
                return Ok(version);
            }
            last = (required_bits, capacity_bits);
        }
        Err(QrError::DataTooLong {
            required_bits: last.0,
            capacity_bits: last.1,
            ec_level,
            version: Version::MAX.number(),
        })
    }

    /// Build the symbol: pick a version, assemble and protect the
    /// codewords, lay out the matrix, then mask and write metadata.
    #[instrument(level = "debug", skip(self), fields(segments = self.segments.len()))]
    pub fn encode(&self) -> Result<QRCode> {
        let ec_level = self.options.ec_level;
        let version = self.resolve_version()?;
        let capacity = data_codewords(version, ec_level)?;

        let data = codewords::assemble_data(&self.segments, version, capacity)?;
        let stream = codewords::interleave(&data, version, ec_level)?;
        debug!(
            version = version.number(),
            ec_level = ?ec_level,
            data_codewords = data.len(),
            total_codewords = stream.len(),
            "codewords ready"
        );

        let mut grid = build_function_grid(version);
        place_codewords(&mut grid, &stream);

        let finish = |mask: MaskPattern| -> Result<BitMatrix> {
            finish_symbol(&grid, version, ec_level, mask)
        };

        let (mask, modules) = match self.options.mask {
            Some(mask) => (mask, finish(mask)?),
            None => {
                let choice = choose_mask(version, finish)?;
                (choice.mask, choice.matrix)
            }
        };
        debug!(
            mask = mask.bits(),
            penalty = penalty_score(&modules),
            "symbol finished"
        );

        Ok(QRCode::new(version, ec_level, mask, modules))
    }
}

fn finish_symbol(
    grid: &ModuleGrid,
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
) -> Result<BitMatrix> {
    let mut masked = grid.clone();
    apply_mask(&mut masked, mask);
    let mut matrix = masked.to_bit_matrix();
    write_metadata(&mut matrix, version, ec_level, mask)?;
    Ok(matrix)
}
