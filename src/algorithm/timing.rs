/// Where a note lands in time, in beats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotePlacement {
    /// Absolute start time
    pub start: f64,
    /// Length of the note
    pub duration: f64,
}

/// Long-short swing placement of bar steps
///
/// Even steps start on the grid and are lengthened by `swing`; odd steps
/// start `swing` late and are shortened by the same amount, so consecutive
/// notes meet without overlapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingTiming {
    /// Steps in one bar
    pub bar_len: usize,
    /// Beats in one bar
    pub beats_per_bar: usize,
    /// Steps per beat unit
    pub bar_division: usize,
    /// Offset applied to odd steps
    pub swing: f64,
    /// Nominal note length before division
    pub note_duration: f64,
}

impl SwingTiming {
    /// Start of `bar`, in beats
    pub fn bar_start(&self, bar: usize) -> f64 {
        if self.beats_per_bar == 0 {
            return 0.0;
        }
        (bar * self.bar_len / self.beats_per_bar) as f64
    }

    /// Placement of `step` within `bar`
    pub fn place(&self, bar: usize, step: usize) -> NotePlacement {
        let division = self.bar_division.max(1) as f64;
        let on_grid = self.bar_start(bar) + step as f64 / division;
        let nominal = self.note_duration / division;

        if step % 2 == 0 {
            NotePlacement {
                start: on_grid,
                duration: nominal + self.swing,
            }
        } else {
            NotePlacement {
                start: on_grid + self.swing,
                duration: nominal - self.swing,
            }
        }
    }
}
