//! Generation constants and runtime configuration defaults

// Rhythmic grid
/// Beats in one bar (top of the time signature)
pub const DEFAULT_BEATS_PER_BAR: usize = 4;
/// Note value that gets one beat (bottom of the time signature)
pub const DEFAULT_BAR_DIVISION: usize = 4;
/// Bars per break cycle; the last bar of each cycle is the break
pub const DEFAULT_BREAK_EVERY: usize = 8;

// Probability shaping, chosen so that 4 * multiplier + adder <= divisor
/// Weight of each repeated hit when folding a bar onto its beats
pub const DEFAULT_PROB_MULTIPLIER: f64 = 2.0;
/// Floor added to every beat position so silent positions can still grow hits
pub const DEFAULT_PROB_ADDER: f64 = 11.0;
/// Normaliser bringing folded counts into [0, 1]
pub const DEFAULT_PROB_DIVISOR: f64 = 20.0;

// Articulation
/// Swing offset in beats; values above 1/8 lose the long-short feel
pub const DEFAULT_SWING: f64 = 0.0625;
/// Nominal note length before division by the bar division
pub const DEFAULT_NOTE_DURATION: f64 = 1.0;
/// Note name of the first voice; voice `i` sounds at this pitch plus `i`
pub const DEFAULT_BASE_PITCH: &str = "C1";
/// Note-on velocity
pub const DEFAULT_VELOCITY: u8 = 127;
/// MIDI channel for every note
pub const DEFAULT_CHANNEL: u8 = 0;

// Run settings
/// Number of bars generated per seed pattern
pub const DEFAULT_VARIATIONS: usize = 64;
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;
/// Tempo written to the output file
pub const DEFAULT_TEMPO_BPM: u32 = 110;
/// Name of the generated track
pub const DEFAULT_TRACK_NAME: &str = "Algorithmic Drums";
/// Seed pattern read when no target is given
pub const DEFAULT_SEED_PATTERN: &str = "drumPattern.txt";

// MIDI limits
/// Ticks per quarter note in written files
pub const TICKS_PER_BEAT: u16 = 960;
/// Highest valid MIDI key, velocity or program value
pub const MAX_MIDI_VALUE: u8 = 127;
/// Highest valid MIDI channel
pub const MAX_MIDI_CHANNEL: u8 = 15;
/// Slowest tempo whose microseconds-per-beat still fits the 24-bit tempo field
pub const MIN_TEMPO_BPM: u32 = 4;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_variations";
/// Extension of seed pattern files picked up from a directory
pub const SEED_EXTENSION: &str = "txt";
/// Extension of generated files
pub const OUTPUT_EXTENSION: &str = "mid";
