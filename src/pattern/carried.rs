//! Rolling record of the last generated bar plus the two break snapshots

use crate::pattern::hit_matrix::HitMatrix;
use ndarray::Array2;

/// What sounded in the most recent bar, and the states saved around breaks
///
/// All three grids share the seed's shape and are independent copies: taking
/// a snapshot never aliases `current`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarriedState {
    current: Array2<bool>,
    pre_break_snapshot: Array2<bool>,
    bar_before_break_snapshot: Array2<bool>,
}

impl CarriedState {
    /// Start every slot as a copy of the seed
    pub fn from_seed(seed: &HitMatrix) -> Self {
        Self {
            current: seed.cells().clone(),
            pre_break_snapshot: seed.cells().clone(),
            bar_before_break_snapshot: seed.cells().clone(),
        }
    }

    /// State fed into the next probability derivation
    pub const fn current(&self) -> &Array2<bool> {
        &self.current
    }

    /// State saved when the last break bar started
    pub const fn pre_break_snapshot(&self) -> &Array2<bool> {
        &self.pre_break_snapshot
    }

    /// State saved when the last cycle started, right after its break
    pub const fn bar_before_break_snapshot(&self) -> &Array2<bool> {
        &self.bar_before_break_snapshot
    }

    /// Record whether a cell sounded in the bar being generated
    pub fn record(&mut self, voice: usize, step: usize, sounded: bool) {
        if let Some(cell) = self.current.get_mut([voice, step]) {
            *cell = sounded;
        }
    }

    /// Save `current` so the bar after the break can resume from it
    pub fn snapshot_pre_break(&mut self) {
        self.pre_break_snapshot.assign(&self.current);
    }

    /// Save `current` for the mid-cycle break and rewind to the pre-break state
    pub fn begin_cycle(&mut self) {
        self.bar_before_break_snapshot.assign(&self.current);
        self.current.assign(&self.pre_break_snapshot);
    }

    /// Rewind `current` to the state saved at the start of the cycle
    pub fn restore_bar_before_break(&mut self) {
        self.current.assign(&self.bar_before_break_snapshot);
    }
}
