//! Tests for swing placement of steps

#[cfg(test)]
mod tests {
    use drumvary::algorithm::timing::{NotePlacement, SwingTiming};

    const TIMING: SwingTiming = SwingTiming {
        bar_len: 16,
        beats_per_bar: 4,
        bar_division: 4,
        swing: 0.0625,
        note_duration: 1.0,
    };

    // Odd steps start late and end on the next grid point
    #[test]
    fn test_odd_step_example() {
        let placement = TIMING.place(0, 1);

        assert!((placement.start - 0.3125).abs() < 1e-12);
        assert!((placement.duration - 0.1875).abs() < 1e-12);
    }

    // Even steps start on the grid and are lengthened by the swing
    #[test]
    fn test_even_step_is_lengthened() {
        let placement = TIMING.place(0, 2);

        assert_eq!(
            placement,
            NotePlacement {
                start: 0.5,
                duration: 0.3125
            }
        );
    }

    // Bars start bar_len / beats_per_bar beats apart
    #[test]
    fn test_bar_offsets() {
        assert!(TIMING.bar_start(0).abs() < f64::EPSILON);
        assert!((TIMING.bar_start(3) - 12.0).abs() < f64::EPSILON);

        let placement = TIMING.place(2, 0);
        assert!((placement.start - 8.0).abs() < f64::EPSILON);
    }

    // A long-short pair fills exactly two steps without overlap
    #[test]
    fn test_swing_pairs_meet_without_overlap() {
        for step in (0..16).step_by(2) {
            let long = TIMING.place(5, step);
            let short = TIMING.place(5, step + 1);

            assert!((long.start + long.duration - short.start).abs() < 1e-12);
            assert!((short.start + short.duration - TIMING.place(5, step + 2).start).abs() < 1e-12);
        }
    }

    // Without swing every step has the same length
    #[test]
    fn test_zero_swing_is_straight() {
        let straight = SwingTiming {
            swing: 0.0,
            ..TIMING
        };

        for step in 0..16 {
            let placement = straight.place(1, step);
            assert!((placement.duration - 0.25).abs() < 1e-12);
            assert!((placement.start - (4.0 + step as f64 * 0.25)).abs() < 1e-12);
        }
    }
}
