/// Codeword placement into the module grid following the zigzag pattern
use crate::models::ModuleGrid;

/// Write `codewords` MSB first into every non-function cell: column pairs
/// from the right edge leftwards, skipping the vertical timing column,
/// alternating upward and downward sweeps. Cells left over once the stream
/// is exhausted (remainder bits) are written light.
///
/// Returns the number of codeword bits placed.
pub fn place_codewords(grid: &mut ModuleGrid, codewords: &[u8]) -> usize {
    let dimension = grid.size();
    let total_bits = codewords.len() * 8;
    let mut bit_index = 0usize;

    let mut upward = true;
    let mut col = dimension as i32 - 1;

    while col > 0 {
        if col == 6 {
            col -= 1;
            continue;
        }

        for step in 0..dimension {
            let row = if upward { dimension - 1 - step } else { step };
            for c in [col as usize, col as usize - 1] {
                if grid.is_function(c, row) {
                    continue;
                }
                let dark = bit_index < total_bits
                    && (codewords[bit_index / 8] >> (7 - bit_index % 8)) & 1 == 1;
                grid.set(c, row, dark);
                bit_index += 1;
            }
        }

        upward = !upward;
        col -= 2;
    }

    bit_index.min(total_bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::function_patterns::build_function_grid;
    use crate::models::{Module, Version};

    #[test]
    fn test_first_codeword_fills_bottom_right() {
        let mut grid = build_function_grid(Version::MIN);
        let placed = place_codewords(&mut grid, &[0b1010_0000; 26]);
        assert_eq!(placed, 208);

        // Upward sweep of columns 20/19 starting at row 20
        assert_eq!(grid.get(20, 20), Module::Dark);
        assert_eq!(grid.get(19, 20), Module::Light);
        assert_eq!(grid.get(20, 19), Module::Dark);
        assert_eq!(grid.get(19, 19), Module::Light);
    }

    #[test]
    fn test_every_data_cell_written() {
        for n in [1u8, 2, 7, 14] {
            let version = Version::new(n).unwrap();
            let mut grid = build_function_grid(version);
            let unset_before = grid.unset_count();
            place_codewords(&mut grid, &[0xFF; 4]);
            let size = grid.size();
            for y in 0..size {
                for x in 0..size {
                    if !grid.is_function(x, y) {
                        assert_ne!(grid.get(x, y), Module::Unset);
                    }
                }
            }
            assert!(grid.unset_count() < unset_before);
        }
    }

    #[test]
    fn test_short_stream_pads_light() {
        let mut grid = build_function_grid(Version::MIN);
        let placed = place_codewords(&mut grid, &[0xFF]);
        assert_eq!(placed, 8);
        // Ninth data cell in the sweep is at (20, 16)
        assert_eq!(grid.get(19, 17), Module::Dark);
        assert_eq!(grid.get(20, 16), Module::Light);
    }
}
