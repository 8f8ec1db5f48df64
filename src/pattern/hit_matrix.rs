//! Binary seed pattern: which voice sounds at which step of the bar

use crate::io::error::{Result, VariationError, invalid_seed};
use ndarray::Array2;
use std::fmt;

/// Canonical seed pattern, one row per drum voice and one column per step
///
/// Never changes once built. Every variation is sampled against it, so a
/// step that is silent here stays silent in every generated bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitMatrix {
    cells: Array2<bool>,
}

impl HitMatrix {
    /// Build from explicit rows
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, the rows are empty, or their
    /// lengths differ.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| invalid_seed(&"pattern has no voices"))?;
        let bar_len = first.len();
        if bar_len == 0 {
            return Err(invalid_seed(&"pattern has no steps"));
        }

        for (row, values) in rows.iter().enumerate() {
            if values.len() != bar_len {
                return Err(VariationError::NonRectangularSeed {
                    row,
                    expected: bar_len,
                    found: values.len(),
                });
            }
        }

        let flat: Vec<bool> = rows.iter().flatten().copied().collect();
        let cells = Array2::from_shape_vec((rows.len(), bar_len), flat)
            .map_err(|e| invalid_seed(&format!("cannot shape pattern: {e}")))?;
        Ok(Self { cells })
    }

    /// Parse the text seed format
    ///
    /// Each line is one voice. Only `0` and `1` characters are kept, so any
    /// other character can be used as a separator. Lines left without a
    /// single digit are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if no voice line is found or the voices differ in length.
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<Vec<bool>> = text
            .lines()
            .map(|line| {
                line.chars()
                    .filter_map(|c| match c {
                        '0' => Some(false),
                        '1' => Some(true),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect();

        Self::from_rows(&rows)
    }

    /// Wrap an existing boolean grid
    ///
    /// # Errors
    ///
    /// Returns an error if the grid has no rows or no columns.
    pub fn from_array(cells: Array2<bool>) -> Result<Self> {
        if cells.nrows() == 0 || cells.ncols() == 0 {
            return Err(invalid_seed(&"pattern must have at least one voice and one step"));
        }
        Ok(Self { cells })
    }

    /// Number of drum voices
    pub fn voices(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of steps in one bar
    pub fn bar_len(&self) -> usize {
        self.cells.ncols()
    }

    /// Whether `voice` hits at `step`; out-of-range cells never hit
    pub fn hits(&self, voice: usize, step: usize) -> bool {
        self.cells.get([voice, step]).copied().unwrap_or(false)
    }

    /// Total number of hits in the pattern
    pub fn hit_count(&self) -> usize {
        self.cells.iter().filter(|&&hit| hit).count()
    }

    /// Borrow the underlying grid
    pub const fn cells(&self) -> &Array2<bool> {
        &self.cells
    }
}

impl fmt::Display for HitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            let line: String = row.iter().map(|&hit| if hit { '1' } else { '0' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
