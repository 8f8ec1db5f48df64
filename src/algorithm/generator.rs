use crate::{
    algorithm::breaks::{BarPlan, BarRegime, BreakEngine},
    algorithm::timing::SwingTiming,
    io::configuration::{
        DEFAULT_BAR_DIVISION, DEFAULT_BASE_PITCH, DEFAULT_BEATS_PER_BAR, DEFAULT_BREAK_EVERY,
        DEFAULT_CHANNEL, DEFAULT_NOTE_DURATION, DEFAULT_PROB_ADDER, DEFAULT_PROB_DIVISOR,
        DEFAULT_PROB_MULTIPLIER, DEFAULT_SWING, DEFAULT_TEMPO_BPM, DEFAULT_TRACK_NAME,
        DEFAULT_VARIATIONS, DEFAULT_VELOCITY, MAX_MIDI_CHANNEL, MAX_MIDI_VALUE, MIN_TEMPO_BPM,
    },
    io::error::{Result, invalid_parameter},
    io::sink::{EventSink, NoteEvent, TrackMetadata},
    math::matrix::ProbabilityScale,
    math::pitch::midi_note,
    pattern::{CarriedState, HitMatrix},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Parameters controlling how variations are derived, timed and voiced
#[derive(Clone, Debug, PartialEq)]
pub struct VariationConfig {
    /// Number of bars to generate
    pub variations: usize,
    /// Beats in one bar; probabilities have one column per beat
    pub beats_per_bar: usize,
    /// Steps per beat unit used for timing
    pub bar_division: usize,
    /// Bars per break cycle
    pub break_every: usize,
    /// Multiplier, adder and divisor of the probability derivation
    pub scale: ProbabilityScale,
    /// Swing offset in beats
    pub swing: f64,
    /// Nominal note length before division
    pub note_duration: f64,
    /// Note name of voice 0
    pub base_pitch: String,
    /// Tempo written with the track
    pub tempo_bpm: u32,
    /// Note-on velocity
    pub velocity: u8,
    /// MIDI channel
    pub channel: u8,
    /// Track name
    pub track_name: String,
}

impl Default for VariationConfig {
    fn default() -> Self {
        Self {
            variations: DEFAULT_VARIATIONS,
            beats_per_bar: DEFAULT_BEATS_PER_BAR,
            bar_division: DEFAULT_BAR_DIVISION,
            break_every: DEFAULT_BREAK_EVERY,
            scale: ProbabilityScale::new(
                DEFAULT_PROB_MULTIPLIER,
                DEFAULT_PROB_ADDER,
                DEFAULT_PROB_DIVISOR,
            ),
            swing: DEFAULT_SWING,
            note_duration: DEFAULT_NOTE_DURATION,
            base_pitch: DEFAULT_BASE_PITCH.to_string(),
            tempo_bpm: DEFAULT_TEMPO_BPM,
            velocity: DEFAULT_VELOCITY,
            channel: DEFAULT_CHANNEL,
            track_name: DEFAULT_TRACK_NAME.to_string(),
        }
    }
}

impl VariationConfig {
    /// Check the parameters against each other and against `seed`
    ///
    /// Returns the MIDI key of voice 0 on success.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `beats_per_bar` or `break_every` is odd or too small
    /// - `beats_per_bar` does not divide the seed's bar length
    /// - the probability terms can produce values outside [0, 1]
    /// - the swing leaves odd steps with no duration
    /// - the base pitch is invalid or the highest voice leaves the MIDI range
    /// - tempo, velocity or channel are out of range
    pub fn validate(&self, seed: &HitMatrix) -> Result<u8> {
        if self.beats_per_bar < 2 || self.beats_per_bar % 2 != 0 {
            return Err(invalid_parameter(
                "beats_per_bar",
                &self.beats_per_bar,
                &"must be an even number of at least 2 so a bar splits into two halves",
            ));
        }
        if seed.bar_len() % self.beats_per_bar != 0 {
            return Err(invalid_parameter(
                "beats_per_bar",
                &self.beats_per_bar,
                &format!("must divide the seed bar length {}", seed.bar_len()),
            ));
        }
        // Odd cycles would need a rounding rule for the half-cycle bar
        if self.break_every < 2 || self.break_every % 2 != 0 {
            return Err(invalid_parameter(
                "break_every",
                &self.break_every,
                &"must be an even number of at least 2",
            ));
        }
        if self.bar_division == 0 {
            return Err(invalid_parameter(
                "bar_division",
                &self.bar_division,
                &"must be positive",
            ));
        }

        self.validate_scale(seed)?;
        self.validate_articulation()?;

        let base = midi_note(&self.base_pitch)?;
        let highest = usize::from(base) + seed.voices() - 1;
        if highest > usize::from(MAX_MIDI_VALUE) {
            return Err(invalid_parameter(
                "base_pitch",
                &self.base_pitch,
                &format!(
                    "{} voices from key {base} exceed the MIDI key range",
                    seed.voices()
                ),
            ));
        }

        Ok(base)
    }

    fn validate_scale(&self, seed: &HitMatrix) -> Result<()> {
        let ProbabilityScale {
            multiplier,
            adder,
            divisor,
        } = self.scale;

        if !(multiplier.is_finite() && multiplier >= 0.0) {
            return Err(invalid_parameter(
                "prob_multiplier",
                &multiplier,
                &"must be finite and non-negative",
            ));
        }
        if !(adder.is_finite() && adder >= 0.0) {
            return Err(invalid_parameter(
                "prob_adder",
                &adder,
                &"must be finite and non-negative",
            ));
        }
        if !(divisor.is_finite() && divisor > 0.0) {
            return Err(invalid_parameter(
                "prob_divisor",
                &divisor,
                &"must be finite and positive",
            ));
        }

        // Carried and seed terms each use twice the divisor, so their sum peaks here
        let repetitions = seed.bar_len() / self.beats_per_bar;
        let ceiling = self.scale.max_probability(repetitions);
        if ceiling > 1.0 {
            return Err(invalid_parameter(
                "prob_divisor",
                &divisor,
                &format!(
                    "{repetitions} * {multiplier} + {adder} exceeds the divisor, \
                     probabilities would reach {ceiling:.3}"
                ),
            ));
        }

        Ok(())
    }

    fn validate_articulation(&self) -> Result<()> {
        if !(self.note_duration.is_finite() && self.note_duration > 0.0) {
            return Err(invalid_parameter(
                "note_duration",
                &self.note_duration,
                &"must be finite and positive",
            ));
        }
        let step_length = self.note_duration / self.bar_division as f64;
        if !(self.swing.is_finite() && self.swing >= 0.0 && self.swing < step_length) {
            return Err(invalid_parameter(
                "swing",
                &self.swing,
                &format!("must be non-negative and below the step length {step_length}"),
            ));
        }
        if self.tempo_bpm < MIN_TEMPO_BPM {
            return Err(invalid_parameter(
                "tempo",
                &self.tempo_bpm,
                &format!("must be at least {MIN_TEMPO_BPM} BPM"),
            ));
        }
        if self.velocity > MAX_MIDI_VALUE {
            return Err(invalid_parameter(
                "velocity",
                &self.velocity,
                &format!("must be at most {MAX_MIDI_VALUE}"),
            ));
        }
        if self.channel > MAX_MIDI_CHANNEL {
            return Err(invalid_parameter(
                "channel",
                &self.channel,
                &format!("must be at most {MAX_MIDI_CHANNEL}"),
            ));
        }
        Ok(())
    }

    /// Track name and tempo for the sink
    pub fn track_metadata(&self) -> TrackMetadata {
        TrackMetadata {
            name: self.track_name.clone(),
            tempo_bpm: self.tempo_bpm,
        }
    }
}

/// Summary of one generated bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarReport {
    /// Zero-based bar index
    pub bar: usize,
    /// Break-policy case applied
    pub regime: BarRegime,
    /// Notes emitted in the bar
    pub notes: usize,
}

/// Bar-by-bar variation generator
///
/// Each bar samples every seed hit against probabilities derived from the
/// previous bar and the seed itself, then records what sounded as the state
/// for the next bar.
pub struct VariationGenerator<R = StdRng> {
    seed: HitMatrix,
    config: VariationConfig,
    breaks: BreakEngine,
    state: CarriedState,
    timing: SwingTiming,
    base_pitch: u8,
    rng: R,
    bar: usize,
}

impl VariationGenerator<StdRng> {
    /// Create a generator driven by a `StdRng` seeded with `random_seed`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid for `seed`.
    pub fn new(seed: HitMatrix, config: VariationConfig, random_seed: u64) -> Result<Self> {
        Self::with_rng(seed, config, StdRng::seed_from_u64(random_seed))
    }
}

impl<R: Rng> VariationGenerator<R> {
    /// Create a generator drawing from `rng`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid for `seed`.
    pub fn with_rng(seed: HitMatrix, config: VariationConfig, rng: R) -> Result<Self> {
        let base_pitch = config.validate(&seed)?;
        let breaks = BreakEngine::new(&seed, config.break_every, config.beats_per_bar, config.scale)?;
        let state = CarriedState::from_seed(&seed);
        let timing = SwingTiming {
            bar_len: seed.bar_len(),
            beats_per_bar: config.beats_per_bar,
            bar_division: config.bar_division,
            swing: config.swing,
            note_duration: config.note_duration,
        };

        Ok(Self {
            seed,
            config,
            breaks,
            state,
            timing,
            base_pitch,
            rng,
            bar: 0,
        })
    }

    /// Index of the next bar to generate
    pub const fn bar(&self) -> usize {
        self.bar
    }

    /// Whether every configured bar has been generated
    pub const fn is_finished(&self) -> bool {
        self.bar >= self.config.variations
    }

    /// Current carried state and break snapshots
    pub const fn carried_state(&self) -> &CarriedState {
        &self.state
    }

    /// Seed pattern being varied
    pub const fn seed(&self) -> &HitMatrix {
        &self.seed
    }

    /// Active configuration
    pub const fn config(&self) -> &VariationConfig {
        &self.config
    }

    /// MIDI key of voice 0
    pub const fn base_pitch(&self) -> u8 {
        self.base_pitch
    }

    /// Generate the next bar into `sink`
    ///
    /// Returns `None` once all bars have been generated.
    ///
    /// # Errors
    ///
    /// Returns an error if the break engine cannot derive probabilities.
    pub fn execute_bar(&mut self, sink: &mut impl EventSink) -> Result<Option<BarReport>> {
        if self.is_finished() {
            return Ok(None);
        }

        let plan = self.breaks.prepare_bar(self.bar, &mut self.state)?;
        let notes = self.sample_bar(&plan, sink);

        log::debug!(
            "bar {} ({}): {notes} of {} hits sounded",
            plan.bar,
            plan.regime,
            self.seed.hit_count()
        );

        self.bar += 1;
        Ok(Some(BarReport {
            bar: plan.bar,
            regime: plan.regime,
            notes,
        }))
    }

    /// Generate all remaining bars into `sink`, returning the number of notes
    ///
    /// # Errors
    ///
    /// Returns an error if any bar fails to generate.
    pub fn run(&mut self, sink: &mut impl EventSink) -> Result<usize> {
        let mut total = 0;
        while let Some(report) = self.execute_bar(sink)? {
            total += report.notes;
        }
        Ok(total)
    }

    fn sample_bar(&mut self, plan: &BarPlan, sink: &mut impl EventSink) -> usize {
        let mut notes = 0;

        for voice in 0..self.seed.voices() {
            for step in 0..self.seed.bar_len() {
                // Silent seed cells never draw, so the seed fixes the skeleton
                let sounded = self.seed.hits(voice, step)
                    && self.rng.random::<f64>() < plan.probability_at(voice, step);

                if sounded {
                    let placement = self.timing.place(plan.bar, step);
                    sink.add_note(NoteEvent {
                        track: 0,
                        channel: self.config.channel,
                        pitch: self.base_pitch + voice as u8,
                        start: placement.start,
                        duration: placement.duration,
                        velocity: self.config.velocity,
                        bar: plan.bar,
                        voice,
                        step,
                    });
                    notes += 1;
                }
                self.state.record(voice, step, sounded);
            }
        }

        notes
    }
}

/// Set the track metadata on `sink` and generate every bar of `seed` into it
///
/// Returns the number of notes emitted.
///
/// # Errors
///
/// Returns an error if the configuration is invalid for `seed`.
pub fn generate_variations(
    seed: HitMatrix,
    config: VariationConfig,
    random_seed: u64,
    sink: &mut impl EventSink,
) -> Result<usize> {
    let mut generator = VariationGenerator::new(seed, config, random_seed)?;
    sink.set_track_metadata(&generator.config().track_metadata());
    generator.run(sink)
}
