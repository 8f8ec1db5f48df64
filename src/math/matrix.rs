//! Elementwise matrix arithmetic and probability derivation from hit grids

use crate::io::error::{Result, VariationError, invalid_parameter};
use ndarray::{Array2, Zip};
use num_traits::Num;

/// Linear map `(hits * multiplier + adder) / divisor` applied to folded hit counts
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbabilityScale {
    /// Weight of each hit repeated across the bar
    pub multiplier: f64,
    /// Floor given to every beat position, hit or not
    pub adder: f64,
    /// Normaliser into the probability range
    pub divisor: f64,
}

impl ProbabilityScale {
    /// Create a scale from its three terms
    pub const fn new(multiplier: f64, adder: f64, divisor: f64) -> Self {
        Self {
            multiplier,
            adder,
            divisor,
        }
    }

    /// Same scale with the divisor multiplied by `factor`
    #[must_use]
    pub fn with_divisor_factor(self, factor: f64) -> Self {
        Self {
            divisor: self.divisor * factor,
            ..self
        }
    }

    /// Apply the scale to a folded hit count
    pub fn apply(self, hits: f64) -> f64 {
        hits.mul_add(self.multiplier, self.adder) / self.divisor
    }

    /// Largest value the scale yields when every one of `repetitions` sub-cycles hits
    pub fn max_probability(self, repetitions: usize) -> f64 {
        self.apply(repetitions as f64)
    }
}

/// Elementwise sum of two equally shaped matrices
///
/// # Errors
///
/// Returns [`VariationError::ShapeMismatch`] if the shapes differ.
pub fn add_matrices<T>(m1: &Array2<T>, m2: &Array2<T>) -> Result<Array2<T>>
where
    T: Num + Copy,
{
    if m1.dim() != m2.dim() {
        return Err(VariationError::ShapeMismatch {
            left: m1.dim(),
            right: m2.dim(),
        });
    }

    Ok(Zip::from(m1).and(m2).map_collect(|&a, &b| a + b))
}

/// Fold a hit grid onto its beat positions and scale the counts into probabilities
///
/// Column `p` of the result sums hit columns `p, p + beats_per_bar, ...` of the
/// same row, so a hit repeated in every sub-cycle of the bar weighs more than
/// a one-off.
///
/// # Errors
///
/// Returns an error if `beats_per_bar` is zero or does not divide the column count.
pub fn derive_probability(
    hits: &Array2<bool>,
    beats_per_bar: usize,
    scale: ProbabilityScale,
) -> Result<Array2<f64>> {
    let (voices, bar_len) = hits.dim();
    if beats_per_bar == 0 || bar_len % beats_per_bar != 0 {
        return Err(invalid_parameter(
            "beats_per_bar",
            &beats_per_bar,
            &format!("must be non-zero and divide the bar length {bar_len}"),
        ));
    }

    let mut counts = Array2::<f64>::zeros((voices, beats_per_bar));
    for ((voice, step), &hit) in hits.indexed_iter() {
        if hit {
            if let Some(count) = counts.get_mut([voice, step % beats_per_bar]) {
                *count += 1.0;
            }
        }
    }

    Ok(counts.mapv(|count| scale.apply(count)))
}

/// Exchange the first and second half of every row
///
/// Column `k` of the result is column `(k + cols / 2) % cols` of the input,
/// which for an even column count moves the back half of each row to the
/// front.
pub fn swap_halves(matrix: &Array2<f64>) -> Array2<f64> {
    let (rows, cols) = matrix.dim();
    let half = cols / 2;
    Array2::from_shape_fn((rows, cols), |(row, col)| {
        matrix
            .get([row, (col + half) % cols])
            .copied()
            .unwrap_or_default()
    })
}
