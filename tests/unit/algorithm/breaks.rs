//! Tests for regime classification and break-bar probability preparation

#[cfg(test)]
mod tests {
    use drumvary::algorithm::breaks::{BarRegime, BreakEngine};
    use drumvary::math::matrix::{ProbabilityScale, add_matrices, derive_probability};
    use drumvary::{CarriedState, HitMatrix};
    use ndarray::Array2;

    const SCALE: ProbabilityScale = ProbabilityScale::new(2.0, 11.0, 20.0);

    fn seed() -> HitMatrix {
        HitMatrix::parse("1000 0010 1010 0000\n0000 1000 0000 1000\n1010 1010 1010 1010")
            .unwrap_or_else(|_| unreachable!("valid pattern"))
    }

    fn engine(seed: &HitMatrix, period: usize) -> BreakEngine {
        BreakEngine::new(seed, period, 4, SCALE).unwrap_or_else(|_| unreachable!("valid engine"))
    }

    // Regimes over two cycles of eight bars
    #[test]
    fn test_regime_sequence_for_period_eight() {
        let regimes: Vec<BarRegime> = (0..16).map(|bar| BarRegime::for_bar(bar, 8)).collect();

        let mut expected = vec![BarRegime::Regular; 16];
        for cycle in [0, 8] {
            expected[cycle] = BarRegime::CycleStart;
            expected[cycle + 3] = BarRegime::HalfCycle;
            expected[cycle + 7] = BarRegime::Break;
        }
        assert_eq!(regimes, expected);
    }

    // With a two-bar cycle the half-cycle bar coincides with the cycle start
    #[test]
    fn test_regime_precedence_for_short_period() {
        assert_eq!(BarRegime::for_bar(0, 2), BarRegime::CycleStart);
        assert_eq!(BarRegime::for_bar(1, 2), BarRegime::Break);
        assert_eq!(BarRegime::for_bar(2, 2), BarRegime::CycleStart);

        // Period four: half cycle lands on phase one
        assert_eq!(BarRegime::for_bar(5, 4), BarRegime::HalfCycle);
        assert_eq!(BarRegime::for_bar(6, 4), BarRegime::Regular);
    }

    // Break bars use twice the divisor of other bars
    #[test]
    fn test_divisor_factors() {
        assert!((BarRegime::Break.divisor_factor() - 4.0).abs() < f64::EPSILON);
        for regime in [BarRegime::CycleStart, BarRegime::HalfCycle, BarRegime::Regular] {
            assert!((regime.divisor_factor() - 2.0).abs() < f64::EPSILON);
        }
    }

    // Periods below two cannot hold a break and a cycle start
    #[test]
    fn test_new_rejects_short_period() {
        let seed = seed();
        assert!(BreakEngine::new(&seed, 0, 4, SCALE).is_err());
        assert!(BreakEngine::new(&seed, 1, 4, SCALE).is_err());
        assert!(BreakEngine::new(&seed, 2, 4, SCALE).is_ok());
        assert!(BreakEngine::new(&seed, 8, 3, SCALE).is_err());
    }

    // Regular bars blend carried and seed probabilities at twice the divisor
    #[test]
    fn test_regular_bar_probabilities() {
        let seed = seed();
        let engine = engine(&seed, 8);
        let mut state = CarriedState::from_seed(&seed);

        let plan = engine
            .prepare_bar(1, &mut state)
            .unwrap_or_else(|_| unreachable!("shapes match"));

        let doubled = SCALE.with_divisor_factor(2.0);
        let carried = derive_probability(state.current(), 4, doubled).unwrap_or_default();
        let from_seed = derive_probability(seed.cells(), 4, doubled).unwrap_or_default();
        let expected = add_matrices(&carried, &from_seed).unwrap_or_default();

        assert_eq!(plan.regime, BarRegime::Regular);
        assert_eq!(plan.probabilities, expected);
        assert_eq!(plan.probabilities.dim(), (3, 4));
        assert!(plan.probabilities.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    // Break probabilities are the damped blend with row halves exchanged
    #[test]
    fn test_break_bar_swaps_halves() {
        let seed = seed();
        let engine = engine(&seed, 8);
        let mut state = CarriedState::from_seed(&seed);
        state.record(2, 0, false);
        state.record(0, 2, true);

        let pre_swap = engine
            .unswapped_probabilities(state.current(), BarRegime::Break)
            .unwrap_or_default();
        let plan = engine
            .prepare_bar(7, &mut state)
            .unwrap_or_else(|_| unreachable!("shapes match"));

        assert_eq!(plan.regime, BarRegime::Break);
        let beats = 4;
        let half = beats / 2;
        for voice in 0..3 {
            for k in 0..beats {
                let source = if k < half { k + half } else { k - half };
                assert_eq!(
                    plan.probabilities.get([voice, k]),
                    pre_swap.get([voice, source]),
                    "voice {voice} beat {k}"
                );
            }
        }

        let quadrupled = SCALE.with_divisor_factor(4.0);
        let carried = derive_probability(state.current(), 4, quadrupled).unwrap_or_default();
        let from_seed = derive_probability(seed.cells(), 4, quadrupled).unwrap_or_default();
        assert_eq!(pre_swap, add_matrices(&carried, &from_seed).unwrap_or_default());
    }

    // The break saves the state the next cycle resumes from, bit for bit
    #[test]
    fn test_cycle_start_restores_pre_break_state() {
        let seed = seed();
        let engine = engine(&seed, 4);
        let mut state = CarriedState::from_seed(&seed);

        state.record(0, 0, false);
        state.record(1, 4, false);
        let at_break = state.current().clone();
        let _ = engine.prepare_bar(3, &mut state);
        assert_eq!(state.pre_break_snapshot(), &at_break);

        // What the break bar produced
        for voice in 0..3 {
            for step in 0..16 {
                state.record(voice, step, step % 3 == 0);
            }
        }
        let break_output = state.current().clone();

        let _ = engine.prepare_bar(4, &mut state);

        assert_eq!(state.current(), &at_break);
        assert_eq!(state.bar_before_break_snapshot(), &break_output);
    }

    // Mid-cycle bar replays the state saved at cycle start
    #[test]
    fn test_half_cycle_restores_bar_before_break() {
        let seed = seed();
        let engine = engine(&seed, 8);
        let mut state = CarriedState::from_seed(&seed);

        let silent = Array2::from_elem((3, 16), false);
        for voice in 0..3 {
            for step in 0..16 {
                state.record(voice, step, false);
            }
        }
        let plan = engine
            .prepare_bar(8, &mut state)
            .unwrap_or_else(|_| unreachable!("shapes match"));
        assert_eq!(plan.regime, BarRegime::CycleStart);
        assert_eq!(state.bar_before_break_snapshot(), &silent);

        state.record(0, 0, true);
        let plan = engine
            .prepare_bar(11, &mut state)
            .unwrap_or_else(|_| unreachable!("shapes match"));

        assert_eq!(plan.regime, BarRegime::HalfCycle);
        assert_eq!(state.current(), &silent);
    }

    // Beat lookups wrap every beats-per-bar steps
    #[test]
    fn test_probability_at_wraps_steps() {
        let seed = seed();
        let engine = engine(&seed, 8);
        let mut state = CarriedState::from_seed(&seed);
        let plan = engine
            .prepare_bar(2, &mut state)
            .unwrap_or_else(|_| unreachable!("shapes match"));

        for step in 0..16 {
            assert_eq!(
                Some(plan.probability_at(2, step)),
                plan.probabilities.get([2, step % 4]).copied()
            );
        }
        assert!(plan.probability_at(9, 0).abs() < f64::EPSILON);
    }
}
