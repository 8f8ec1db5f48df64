//! Periodic break policy
//!
//! Every `period` bars the last bar becomes a break: its probabilities are
//! damped and the two halves of each beat row are exchanged, so the voices
//! rest where they usually play and play where they usually rest. The bar
//! after a break resumes from the state saved before it, and the bar just
//! before mid-cycle replays the state saved at the start of the cycle for a
//! smaller, secondary break.

use crate::io::error::{Result, invalid_parameter};
use crate::math::matrix::{ProbabilityScale, add_matrices, derive_probability, swap_halves};
use crate::pattern::{CarriedState, HitMatrix};
use ndarray::Array2;
use std::fmt;

/// Divisor factor for ordinary bars
const REGULAR_DIVISOR_FACTOR: f64 = 2.0;
/// Divisor factor for break bars, damping their probabilities
const BREAK_DIVISOR_FACTOR: f64 = 4.0;

/// Which break-policy case applies to a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarRegime {
    /// Last bar of the cycle: damped, half-swapped probabilities
    Break,
    /// First bar of the cycle: resumes from the pre-break state
    CycleStart,
    /// Bar before mid-cycle: replays the state saved at cycle start
    HalfCycle,
    /// Any other bar: continues from the previous bar
    Regular,
}

impl BarRegime {
    /// Classify `bar` for a cycle of `period` bars
    ///
    /// Break takes precedence over cycle start, which takes precedence over
    /// half cycle. A zero period is treated as one.
    pub const fn for_bar(bar: usize, period: usize) -> Self {
        let period = if period == 0 { 1 } else { period };
        let phase = bar % period;
        if phase == period - 1 {
            Self::Break
        } else if phase == 0 {
            Self::CycleStart
        } else if phase + 1 == period / 2 {
            Self::HalfCycle
        } else {
            Self::Regular
        }
    }

    /// Factor applied to the configured divisor for this regime
    pub const fn divisor_factor(self) -> f64 {
        match self {
            Self::Break => BREAK_DIVISOR_FACTOR,
            Self::CycleStart | Self::HalfCycle | Self::Regular => REGULAR_DIVISOR_FACTOR,
        }
    }
}

impl fmt::Display for BarRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Break => "break",
            Self::CycleStart => "cycle-start",
            Self::HalfCycle => "half-cycle",
            Self::Regular => "regular",
        };
        f.write_str(name)
    }
}

/// Regime and sampling probabilities prepared for one bar
#[derive(Debug, Clone)]
pub struct BarPlan {
    /// Zero-based bar index
    pub bar: usize,
    /// Break-policy case applied
    pub regime: BarRegime,
    /// One row per voice, one column per beat position
    pub probabilities: Array2<f64>,
}

impl BarPlan {
    /// Probability that `voice` sounds at `step` of the bar
    pub fn probability_at(&self, voice: usize, step: usize) -> f64 {
        let beats = self.probabilities.ncols();
        if beats == 0 {
            return 0.0;
        }
        self.probabilities
            .get([voice, step % beats])
            .copied()
            .unwrap_or(0.0)
    }
}

/// Decides per bar how probabilities are derived and which state they start from
#[derive(Debug, Clone)]
pub struct BreakEngine {
    period: usize,
    beats_per_bar: usize,
    scale: ProbabilityScale,
    /// Seed probabilities with the regular divisor
    seed_regular: Array2<f64>,
    /// Seed probabilities with the break divisor
    seed_break: Array2<f64>,
}

impl BreakEngine {
    /// Create an engine for `seed` with a cycle of `period` bars
    ///
    /// # Errors
    ///
    /// Returns an error if `period` is below two or `beats_per_bar` does not
    /// divide the seed's bar length.
    pub fn new(
        seed: &HitMatrix,
        period: usize,
        beats_per_bar: usize,
        scale: ProbabilityScale,
    ) -> Result<Self> {
        if period < 2 {
            return Err(invalid_parameter(
                "break_every",
                &period,
                &"a cycle needs at least two bars",
            ));
        }

        let seed_regular = derive_probability(
            seed.cells(),
            beats_per_bar,
            scale.with_divisor_factor(REGULAR_DIVISOR_FACTOR),
        )?;
        let seed_break = derive_probability(
            seed.cells(),
            beats_per_bar,
            scale.with_divisor_factor(BREAK_DIVISOR_FACTOR),
        )?;

        Ok(Self {
            period,
            beats_per_bar,
            scale,
            seed_regular,
            seed_break,
        })
    }

    /// Bars per cycle
    pub const fn period(&self) -> usize {
        self.period
    }

    /// Regime applied to `bar`
    pub const fn regime(&self, bar: usize) -> BarRegime {
        BarRegime::for_bar(bar, self.period)
    }

    /// Blend of `current` and the seed probabilities before any half swap
    ///
    /// # Errors
    ///
    /// Returns an error if `current` does not have the seed's shape.
    pub fn unswapped_probabilities(
        &self,
        current: &Array2<bool>,
        regime: BarRegime,
    ) -> Result<Array2<f64>> {
        let factor = regime.divisor_factor();
        let carried = derive_probability(
            current,
            self.beats_per_bar,
            self.scale.with_divisor_factor(factor),
        )?;
        let seed = if regime == BarRegime::Break {
            &self.seed_break
        } else {
            &self.seed_regular
        };
        add_matrices(&carried, seed)
    }

    /// Apply the regime's state side effects and derive the bar's probabilities
    ///
    /// # Errors
    ///
    /// Returns an error if the carried state no longer matches the seed's shape.
    pub fn prepare_bar(&self, bar: usize, state: &mut CarriedState) -> Result<BarPlan> {
        let regime = self.regime(bar);

        match regime {
            BarRegime::Break => state.snapshot_pre_break(),
            BarRegime::CycleStart => state.begin_cycle(),
            BarRegime::HalfCycle => state.restore_bar_before_break(),
            BarRegime::Regular => {}
        }

        let blended = self.unswapped_probabilities(state.current(), regime)?;
        let probabilities = if regime == BarRegime::Break {
            swap_halves(&blended)
        } else {
            blended
        };

        Ok(BarPlan {
            bar,
            regime,
            probabilities,
        })
    }
}
