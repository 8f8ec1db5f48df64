//! Command-line interface for batch generation of drum variations

use crate::algorithm::generator::{VariationConfig, VariationGenerator};
use crate::io::configuration::{
    DEFAULT_BAR_DIVISION, DEFAULT_BASE_PITCH, DEFAULT_BEATS_PER_BAR, DEFAULT_BREAK_EVERY,
    DEFAULT_CHANNEL, DEFAULT_NOTE_DURATION, DEFAULT_PROB_ADDER, DEFAULT_PROB_DIVISOR,
    DEFAULT_PROB_MULTIPLIER, DEFAULT_SEED, DEFAULT_SEED_PATTERN, DEFAULT_SWING, DEFAULT_TEMPO_BPM,
    DEFAULT_TRACK_NAME, DEFAULT_VARIATIONS, DEFAULT_VELOCITY, OUTPUT_EXTENSION, OUTPUT_SUFFIX,
    SEED_EXTENSION,
};
use crate::io::error::{Result, WithContext, invalid_parameter};
use crate::io::midi::MidiSink;
use crate::io::progress::ProgressManager;
use crate::io::seed::load_seed;
use crate::io::sink::EventSink;
use crate::math::matrix::ProbabilityScale;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "drumvary")]
#[command(
    author,
    version,
    about = "Generate drum loop variations with periodic breaks from a seed pattern"
)]
/// Command-line arguments for the variation generator
pub struct Cli {
    /// Seed pattern text file or directory of them
    #[arg(value_name = "TARGET", default_value = DEFAULT_SEED_PATTERN)]
    pub target: PathBuf,

    /// Output MIDI file (single target file only)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of bars to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_VARIATIONS)]
    pub variations: usize,

    /// Beats in one bar
    #[arg(long, default_value_t = DEFAULT_BEATS_PER_BAR)]
    pub beats_per_bar: usize,

    /// Note value that gets one beat
    #[arg(long, default_value_t = DEFAULT_BAR_DIVISION)]
    pub bar_division: usize,

    /// Bars per break cycle
    #[arg(short, long, default_value_t = DEFAULT_BREAK_EVERY)]
    pub break_every: usize,

    /// Weight of repeated hits in the probability derivation
    #[arg(long, default_value_t = DEFAULT_PROB_MULTIPLIER)]
    pub prob_multiplier: f64,

    /// Floor probability term for every beat position
    #[arg(long, default_value_t = DEFAULT_PROB_ADDER)]
    pub prob_adder: f64,

    /// Divisor scaling folded hits into probabilities
    #[arg(long, default_value_t = DEFAULT_PROB_DIVISOR)]
    pub prob_divisor: f64,

    /// Swing offset in beats
    #[arg(long, default_value_t = DEFAULT_SWING)]
    pub swing: f64,

    /// Nominal note length before division
    #[arg(long, default_value_t = DEFAULT_NOTE_DURATION)]
    pub note_duration: f64,

    /// Note name of the first voice, e.g. C1 (lowercase letters are sharps)
    #[arg(short = 'p', long, default_value = DEFAULT_BASE_PITCH)]
    pub base_pitch: String,

    /// Tempo in beats per minute
    #[arg(short, long, default_value_t = DEFAULT_TEMPO_BPM)]
    pub tempo: u32,

    /// Note-on velocity
    #[arg(long, default_value_t = DEFAULT_VELOCITY)]
    pub velocity: u8,

    /// MIDI channel
    #[arg(long, default_value_t = DEFAULT_CHANNEL)]
    pub channel: u8,

    /// Name of the generated track
    #[arg(long, default_value = DEFAULT_TRACK_NAME)]
    pub track_name: String,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Generation parameters described by the arguments
    pub fn variation_config(&self) -> VariationConfig {
        VariationConfig {
            variations: self.variations,
            beats_per_bar: self.beats_per_bar,
            bar_division: self.bar_division,
            break_every: self.break_every,
            scale: ProbabilityScale::new(self.prob_multiplier, self.prob_adder, self.prob_divisor),
            swing: self.swing,
            note_duration: self.note_duration,
            base_pitch: self.base_pitch.clone(),
            tempo_bpm: self.tempo,
            velocity: self.velocity,
            channel: self.channel,
            track_name: self.track_name.clone(),
        }
    }
}

/// Orchestrates batch generation over seed files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    config: VariationConfig,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        let config = cli.variation_config();

        Self {
            cli,
            config,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments, returning the outputs written
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, seed loading, configuration
    /// validation or MIDI export fails.
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut written = Vec::with_capacity(files.len());
        for file in &files {
            written.push(self.process_file(file)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(written)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        if target.is_file() {
            if self.should_process_file(target) {
                Ok(vec![target.clone()])
            } else {
                Ok(vec![])
            }
        } else if target.is_dir() {
            if self.cli.output.is_some() {
                return Err(invalid_parameter(
                    "output",
                    &target.display(),
                    &"an explicit output path needs a single seed file as target",
                ));
            }

            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target)? {
                let path = entry.with_path(target)?.path();
                if path.extension().and_then(|s| s.to_str()) == Some(SEED_EXTENSION)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a seed pattern file or a directory of them",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(input_path);
        if output_path.exists() {
            log::warn!(
                "skipping {} (output {} exists)",
                input_path.display(),
                output_path.display()
            );
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path) -> Result<PathBuf> {
        let start_time = Instant::now();
        let output_path = self.output_path(input_path);

        let seed = load_seed(input_path)?;
        let mut generator = VariationGenerator::new(seed, self.config.clone(), self.cli.seed)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path, self.config.variations);
        }

        let mut sink = MidiSink::new();
        sink.set_track_metadata(&self.config.track_metadata());

        let mut notes = 0;
        while let Some(report) = generator.execute_bar(&mut sink)? {
            notes += report.notes;
            if let Some(ref pm) = self.progress_manager {
                pm.update_bar(report.bar + 1);
            }
        }

        sink.write_to(&output_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file();
        }

        log::info!(
            "wrote {} bars ({notes} notes) to {} in {:.2?}",
            generator.bar(),
            output_path.display(),
            start_time.elapsed()
        );

        Ok(output_path)
    }

    fn output_path(&self, input_path: &Path) -> PathBuf {
        if let Some(ref output) = self.cli.output {
            return output.clone();
        }

        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!(
            "{}{OUTPUT_SUFFIX}.{OUTPUT_EXTENSION}",
            stem.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
