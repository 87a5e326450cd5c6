//! Function pattern layout: finders, separators, alignment, timing, and the
//! reserved format/version areas.

use crate::encoder::bch::{format_info_bits, version_info_bits};
use crate::encoder::tables::alignment_pattern_positions;
use crate::error::Result;
use crate::models::{BitMatrix, ECLevel, MaskPattern, ModuleGrid, Version};

/// Allocate a grid for `version` with every function module placed and the
/// metadata cells reserved (left unset).
pub fn build_function_grid(version: Version) -> ModuleGrid {
    let size = version.size();
    let mut grid = ModuleGrid::new(size);

    // Finder patterns + separators (9x9 areas clipped to bounds)
    place_finder(&mut grid, 0, 0);
    place_finder(&mut grid, size - 7, 0);
    place_finder(&mut grid, 0, size - 7);

    place_alignment_patterns(&mut grid, version);

    // Timing patterns (row 6 and column 6)
    for i in 8..size - 8 {
        if !grid.is_function(6, i) {
            grid.set_function(6, i, i % 2 == 0);
        }
        if !grid.is_function(i, 6) {
            grid.set_function(i, 6, i % 2 == 0);
        }
    }

    reserve_format_area(&mut grid);
    if version.has_version_info() {
        reserve_version_area(&mut grid);
    }
    grid
}

fn place_finder(grid: &mut ModuleGrid, x: usize, y: usize) {
    let size = grid.size() as isize;
    for dy in -1..=7isize {
        for dx in -1..=7isize {
            let (xx, yy) = (x as isize + dx, y as isize + dy);
            if xx < 0 || yy < 0 || xx >= size || yy >= size {
                continue;
            }
            let ring = (0..=6).contains(&dy) && (dx == 0 || dx == 6)
                || (0..=6).contains(&dx) && (dy == 0 || dy == 6);
            let core = (2..=4).contains(&dx) && (2..=4).contains(&dy);
            grid.set_function(xx as usize, yy as usize, ring || core);
        }
    }
}

fn place_alignment_patterns(grid: &mut ModuleGrid, version: Version) {
    let positions = alignment_pattern_positions(version);
    for &cy in positions {
        for &cx in positions {
            // Centres that land on a finder are skipped
            if grid.is_function(cx, cy) {
                continue;
            }
            for dy in -2..=2isize {
                for dx in -2..=2isize {
                    let dark = dx.abs() == 2 || dy.abs() == 2 || (dx == 0 && dy == 0);
                    let x = (cx as isize + dx) as usize;
                    let y = (cy as isize + dy) as usize;
                    grid.set_function(x, y, dark);
                }
            }
        }
    }
}

fn reserve_format_area(grid: &mut ModuleGrid) {
    let size = grid.size();
    for i in 0..9 {
        grid.reserve(8, i);
        grid.reserve(i, 8);
    }
    for i in 0..8 {
        grid.reserve(size - 1 - i, 8);
        grid.reserve(8, size - 1 - i);
    }
}

fn reserve_version_area(grid: &mut ModuleGrid) {
    let size = grid.size();
    for i in 0..18 {
        grid.reserve(size - 11 + i % 3, i / 3);
        grid.reserve(i / 3, size - 11 + i % 3);
    }
}

/// Cells holding format bit `i` (bit 0 = least significant): the copy
/// around the top-left finder, then the split copy along the other two.
pub fn format_bit_positions(size: usize, i: usize) -> [(usize, usize); 2] {
    let vertical = match i {
        0..=5 => (8, i),
        6..=7 => (8, i + 1),
        _ => (8, size - 15 + i),
    };
    let horizontal = match i {
        0..=7 => (size - 1 - i, 8),
        8 => (15 - i, 8),
        _ => (14 - i, 8),
    };
    [vertical, horizontal]
}

/// Cells holding version bit `i` (bit 0 = least significant)
pub fn version_bit_positions(size: usize, i: usize) -> [(usize, usize); 2] {
    [(size - 11 + i % 3, i / 3), (i / 3, size - 11 + i % 3)]
}

/// Write format (and version) information plus the dark module into a
/// finished, masked matrix.
pub fn write_metadata(
    matrix: &mut BitMatrix,
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
) -> Result<()> {
    let size = version.size();
    let format = format_info_bits(ec_level, mask);
    for i in 0..15 {
        let dark = (format >> i) & 1 == 1;
        for (x, y) in format_bit_positions(size, i) {
            matrix.set(x, y, dark);
        }
    }
    matrix.set(8, size - 8, true);

    if version.has_version_info() {
        let bits = version_info_bits(version)?;
        for i in 0..18 {
            let dark = (bits >> i) & 1 == 1;
            for (x, y) in version_bit_positions(size, i) {
                matrix.set(x, y, dark);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::tables::raw_data_modules;
    use crate::models::Module;

    fn data_module_count(grid: &ModuleGrid) -> usize {
        let size = grid.size();
        (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .filter(|&(x, y)| !grid.is_function(x, y))
            .count()
    }

    #[test]
    fn test_data_modules_match_capacity() {
        for version in Version::all() {
            let grid = build_function_grid(version);
            assert_eq!(
                data_module_count(&grid),
                raw_data_modules(version),
                "version {version}"
            );
        }
    }

    #[test]
    fn test_finder_and_timing() {
        let grid = build_function_grid(Version::MIN);
        assert_eq!(grid.get(0, 0), Module::Dark);
        assert_eq!(grid.get(1, 1), Module::Light);
        assert_eq!(grid.get(3, 3), Module::Dark);
        assert_eq!(grid.get(7, 0), Module::Light); // separator
        assert_eq!(grid.get(20, 0), Module::Dark);
        assert_eq!(grid.get(0, 20), Module::Dark);
        assert_eq!(grid.get(8, 6), Module::Dark);
        assert_eq!(grid.get(9, 6), Module::Light);
        assert_eq!(grid.get(6, 12), Module::Dark);
    }

    #[test]
    fn test_metadata_cells_start_unset() {
        let grid = build_function_grid(Version::new(7).unwrap());
        let size = grid.size();
        assert_eq!(grid.get(8, 0), Module::Unset);
        assert_eq!(grid.get(size - 1, 8), Module::Unset);
        assert_eq!(grid.get(size - 11, 0), Module::Unset);
        assert!(grid.is_function(0, size - 9));
    }

    #[test]
    fn test_alignment_pattern_version_2() {
        let grid = build_function_grid(Version::new(2).unwrap());
        // Centre (18, 18)
        assert_eq!(grid.get(18, 18), Module::Dark);
        assert_eq!(grid.get(17, 18), Module::Light);
        assert_eq!(grid.get(16, 18), Module::Dark);
        assert!(grid.is_function(20, 20));
    }

    #[test]
    fn test_format_positions_are_distinct() {
        let size = 21;
        let mut seen = std::collections::HashSet::new();
        for i in 0..15 {
            for pos in format_bit_positions(size, i) {
                assert!(seen.insert(pos), "bit {i} reuses {pos:?}");
            }
        }
        assert!(!seen.contains(&(8, size - 8)));
        assert!(!seen.contains(&(6, 8)));
    }
}
