//! Mask application and penalty scoring
//!
//! Each candidate mask is applied to a copy of the placed symbol, the
//! metadata for that mask is written, and the finished matrix is scored
//! with the four penalty rules. The lowest score wins; ties go to the
//! lowest pattern index.

use rayon::prelude::*;
use tracing::trace;

use crate::encoder::config::{parallel_mask_search, parallel_min_version};
use crate::error::{QrError, Result};
use crate::models::{BitMatrix, MaskPattern, ModuleGrid, Version};

const RUN_BASE: u32 = 3;
const BLOCK_PENALTY: u32 = 3;
const FINDER_PENALTY: u32 = 40;
const BALANCE_PENALTY: u32 = 10;

/// XOR the mask into every data module (function modules are untouched)
pub fn apply_mask(grid: &mut ModuleGrid, mask: MaskPattern) {
    let size = grid.size();
    for y in 0..size {
        for x in 0..size {
            if !grid.is_function(x, y) && mask.is_masked(y, x) {
                grid.toggle(x, y);
            }
        }
    }
}

fn rows_and_columns(matrix: &BitMatrix) -> impl Iterator<Item = Vec<bool>> + '_ {
    let size = matrix.width();
    let rows = (0..size).map(move |y| (0..size).map(|x| matrix.get(x, y)).collect::<Vec<_>>());
    let cols = (0..size).map(move |x| (0..size).map(|y| matrix.get(x, y)).collect::<Vec<_>>());
    rows.chain(cols)
}

/// Rule 1: every run of five or more same-colour modules in a row or
/// column scores 3 + (length - 5)
pub fn run_penalty(matrix: &BitMatrix) -> u32 {
    rows_and_columns(matrix)
        .map(|line| {
            let mut penalty = 0;
            let mut run = 1u32;
            for i in 1..=line.len() {
                if i < line.len() && line[i] == line[i - 1] {
                    run += 1;
                    continue;
                }
                if run >= 5 {
                    penalty += RUN_BASE + (run - 5);
                }
                run = 1;
            }
            penalty
        })
        .sum()
}

/// Rule 2: every 2x2 block of one colour scores 3
pub fn block_penalty(matrix: &BitMatrix) -> u32 {
    let size = matrix.width();
    let mut penalty = 0;
    for y in 0..size.saturating_sub(1) {
        for x in 0..size.saturating_sub(1) {
            let c = matrix.get(x, y);
            if matrix.get(x + 1, y) == c && matrix.get(x, y + 1) == c && matrix.get(x + 1, y + 1) == c
            {
                penalty += BLOCK_PENALTY;
            }
        }
    }
    penalty
}

/// Recent run lengths along one line, newest first
struct RunHistory {
    runs: [usize; 7],
    border: usize,
}

impl RunHistory {
    fn new(line_len: usize) -> Self {
        Self {
            runs: [0; 7],
            border: line_len,
        }
    }

    fn push(&mut self, mut run: usize) {
        // The first run is light and extends into the quiet zone
        if self.runs[0] == 0 {
            run += self.border;
        }
        self.runs.copy_within(0..6, 1);
        self.runs[0] = run;
    }

    /// Finder-like patterns ending at the light run just pushed: a
    /// dark-light-dark-light-dark core in exact n:n:3n:n:n proportion, with
    /// at least 4n light on one side and n on the other.
    fn count_patterns(&self) -> u32 {
        let r = &self.runs;
        let n = r[1];
        let core = n > 0 && r[2] == n && r[3] == 3 * n && r[4] == n && r[5] == n;
        if !core {
            return 0;
        }
        u32::from(r[0] >= 4 * n && r[6] >= n) + u32::from(r[6] >= 4 * n && r[0] >= n)
    }
}

fn finder_patterns_in_line(line: &[bool]) -> u32 {
    let mut history = RunHistory::new(line.len());
    let mut dark = false;
    let mut run = 0;
    let mut found = 0;

    for &module in line {
        if module == dark {
            run += 1;
            continue;
        }
        history.push(run);
        if !dark {
            found += history.count_patterns();
        }
        dark = module;
        run = 1;
    }

    if dark {
        history.push(run);
        run = 0;
    }
    history.push(run + line.len());
    found + history.count_patterns()
}

/// Rule 3: every 1:1:3:1:1 finder-like run with four light modules on
/// either side scores 40. Modules outside the symbol count as light.
pub fn finder_penalty(matrix: &BitMatrix) -> u32 {
    rows_and_columns(matrix)
        .map(|line| FINDER_PENALTY * finder_patterns_in_line(&line))
        .sum()
}

/// Rule 4: 10 points per full 5% step the dark ratio is away from 50%
pub fn balance_penalty(matrix: &BitMatrix) -> u32 {
    let total = matrix.width() * matrix.height();
    if total == 0 {
        return 0;
    }
    let deviation = (matrix.count_ones() * 100).abs_diff(50 * total);
    BALANCE_PENALTY * (deviation / (5 * total)) as u32
}

/// Total penalty score of a finished symbol
pub fn penalty_score(matrix: &BitMatrix) -> u32 {
    run_penalty(matrix) + block_penalty(matrix) + finder_penalty(matrix) + balance_penalty(matrix)
}

/// A finished candidate symbol and its score
#[derive(Debug, Clone)]
pub struct MaskChoice {
    /// Pattern applied
    pub mask: MaskPattern,
    /// Total penalty score
    pub penalty: u32,
    /// Masked matrix with metadata written
    pub matrix: BitMatrix,
}

/// Build and score all eight candidates; `finish` produces the masked,
/// metadata-annotated matrix for one pattern.
pub fn choose_mask<F>(version: Version, finish: F) -> Result<MaskChoice>
where
    F: Fn(MaskPattern) -> Result<BitMatrix> + Sync,
{
    let score = |mask: MaskPattern| -> Result<MaskChoice> {
        let matrix = finish(mask)?;
        let penalty = penalty_score(&matrix);
        trace!(mask = mask.bits(), penalty, "scored mask candidate");
        Ok(MaskChoice {
            mask,
            penalty,
            matrix,
        })
    };

    let candidates: Vec<MaskChoice> =
        if parallel_mask_search() && version.number() >= parallel_min_version() {
            MaskPattern::ALL.par_iter().map(|&m| score(m)).collect::<Result<_>>()?
        } else {
            MaskPattern::ALL.iter().map(|&m| score(m)).collect::<Result<_>>()?
        };

    candidates
        .into_iter()
        .min_by_key(|c| (c.penalty, c.mask))
        .ok_or_else(|| QrError::InvalidArgument("no mask candidates".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_rows(rows: &[&str]) -> BitMatrix {
        let size = rows.len();
        let mut matrix = BitMatrix::new(size, size);
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                matrix.set(x, y, c == '#');
            }
        }
        matrix
    }

    #[test]
    fn test_run_penalty() {
        // Each 5-row has one run of 5 in its row; each column alternates
        let matrix = from_rows(&["#####", ".....", "#####", ".....", "#####"]);
        assert_eq!(run_penalty(&matrix), 5 * 3);

        let long = BitMatrix::new(7, 7);
        // 7 rows + 7 columns, each a run of 7
        assert_eq!(run_penalty(&long), 14 * (3 + 2));
    }

    #[test]
    fn test_block_penalty() {
        let matrix = BitMatrix::new(3, 3);
        assert_eq!(block_penalty(&matrix), 4 * 3);

        let checker = from_rows(&["#.#", ".#.", "#.#"]);
        assert_eq!(block_penalty(&checker), 0);
    }

    #[test]
    fn test_finder_penalty_uses_light_border() {
        // A lone finder-like row touching both edges: light padding on
        // either side makes both orientations match
        let mut matrix = BitMatrix::new(7, 7);
        for (x, dark) in [true, false, true, true, true, false, true].iter().enumerate() {
            matrix.set(x, 3, *dark);
        }
        // Row 3 matches twice; columns 0 and 6 are single dark modules
        assert_eq!(finder_penalty(&matrix), 2 * 40);
    }

    fn line(pattern: &str) -> Vec<bool> {
        pattern.chars().map(|c| c == '#').collect()
    }

    #[test]
    fn test_finder_runs_need_exact_proportions() {
        // 1:1:3:1:2 is not finder-like even with light space before it
        assert_eq!(finder_patterns_in_line(&line("....#.###.##...")), 0);
        // Light space on both sides of a 1:1:3:1:1 core counts both ways
        assert_eq!(finder_patterns_in_line(&line("....#.###.#....")), 2);
        // Only one side has four light modules
        assert_eq!(finder_patterns_in_line(&line("#.#.###.#....#.#")), 1);
        // Scaled 2:2:6:2:2 core against the border
        assert_eq!(finder_patterns_in_line(&line("##..######..##")), 2);
        assert_eq!(finder_patterns_in_line(&line("")), 0);
    }

    #[test]
    fn test_balance_penalty_is_symmetric() {
        let mut matrix = BitMatrix::new(20, 10);
        let fill = |matrix: &mut BitMatrix, dark: usize| {
            for i in 0..200 {
                matrix.set(i % 20, i / 20, i < dark);
            }
        };
        // 45.5% and 54.5% are both within one step
        fill(&mut matrix, 91);
        assert_eq!(balance_penalty(&matrix), 0);
        fill(&mut matrix, 109);
        assert_eq!(balance_penalty(&matrix), 0);
        // Exactly 45% and 55% are one full step away
        fill(&mut matrix, 90);
        assert_eq!(balance_penalty(&matrix), 10);
        fill(&mut matrix, 110);
        assert_eq!(balance_penalty(&matrix), 10);
        // 39.5% is two full steps away, not three
        fill(&mut matrix, 79);
        assert_eq!(balance_penalty(&matrix), 20);
    }

    #[test]
    fn test_balance_penalty() {
        let mut matrix = BitMatrix::new(10, 10);
        assert_eq!(balance_penalty(&matrix), 100);
        for i in 0..50 {
            matrix.set(i % 10, i / 10, true);
        }
        assert_eq!(balance_penalty(&matrix), 0);
        matrix.set(0, 5, true); // 51%
        assert_eq!(balance_penalty(&matrix), 0);
        for i in 51..55 {
            matrix.set(i % 10, i / 10, true);
        }
        // 55% -> one full step
        assert_eq!(balance_penalty(&matrix), 10);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let matrix = from_rows(&["##.#.", "#..##", ".###.", "#.#.#", "##..#"]);
        assert_eq!(penalty_score(&matrix), penalty_score(&matrix.clone()));
    }

    #[test]
    fn test_choose_mask_prefers_lowest_index_on_tie() {
        let version = Version::MIN;
        let choice = choose_mask(version, |_| Ok(BitMatrix::new(21, 21))).unwrap();
        assert_eq!(choice.mask, MaskPattern::Pattern0);

        let choice = choose_mask(version, |mask| {
            let mut matrix = BitMatrix::new(21, 21);
            if mask.bits() >= 4 {
                // Checkerboard lowers the score for patterns 4-7 equally
                for y in 0..21 {
                    for x in 0..21 {
                        matrix.set(x, y, (x + y) % 2 == 0);
                    }
                }
            }
            Ok(matrix)
        })
        .unwrap();
        assert_eq!(choice.mask, MaskPattern::Pattern4);
        assert_eq!(choice.penalty, penalty_score(&choice.matrix));
    }
}
