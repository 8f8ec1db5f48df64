//! Tests for the carried state and its break snapshots

#[cfg(test)]
mod tests {
    use drumvary::{CarriedState, HitMatrix};

    fn seed() -> HitMatrix {
        HitMatrix::parse("1111\n1010").unwrap_or_else(|_| unreachable!("valid pattern"))
    }

    fn silence(state: &mut CarriedState) {
        for voice in 0..2 {
            for step in 0..4 {
                state.record(voice, step, false);
            }
        }
    }

    // All slots start as copies of the seed
    #[test]
    fn test_from_seed_initialises_every_slot() {
        let seed = seed();
        let state = CarriedState::from_seed(&seed);

        assert_eq!(state.current(), seed.cells());
        assert_eq!(state.pre_break_snapshot(), seed.cells());
        assert_eq!(state.bar_before_break_snapshot(), seed.cells());
    }

    // Snapshots are deep copies unaffected by later recording
    #[test]
    fn test_snapshot_is_independent_of_current() {
        let seed = seed();
        let mut state = CarriedState::from_seed(&seed);

        state.record(0, 1, false);
        let saved = state.current().clone();
        state.snapshot_pre_break();
        silence(&mut state);

        assert_eq!(state.pre_break_snapshot(), &saved);
        assert!(state.current().iter().all(|&hit| !hit));
    }

    // Starting a cycle saves the break bar and rewinds to the pre-break state
    #[test]
    fn test_begin_cycle_swaps_in_pre_break_state() {
        let seed = seed();
        let mut state = CarriedState::from_seed(&seed);

        state.record(1, 0, false);
        let before_break = state.current().clone();
        state.snapshot_pre_break();

        silence(&mut state);
        state.record(0, 3, true);
        let break_bar = state.current().clone();

        state.begin_cycle();

        assert_eq!(state.current(), &before_break);
        assert_eq!(state.bar_before_break_snapshot(), &break_bar);
        assert_eq!(state.pre_break_snapshot(), &before_break);
    }

    // Mid-cycle restore replays the state saved at cycle start
    #[test]
    fn test_restore_bar_before_break() {
        let seed = seed();
        let mut state = CarriedState::from_seed(&seed);

        silence(&mut state);
        let saved = state.current().clone();
        state.begin_cycle();
        assert_eq!(state.current(), seed.cells());

        state.record(0, 0, false);
        state.restore_bar_before_break();

        assert_eq!(state.current(), &saved);
    }

    // Recording outside the grid is ignored
    #[test]
    fn test_record_out_of_range() {
        let seed = seed();
        let mut state = CarriedState::from_seed(&seed);

        state.record(5, 0, false);
        state.record(0, 9, false);

        assert_eq!(state.current(), seed.cells());
    }
}
