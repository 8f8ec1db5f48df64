/// Command-line parsing and batch file processing
pub mod cli;
/// Default parameters and limits
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Standard MIDI File writer
pub mod midi;
/// Progress display
pub mod progress;
/// Seed pattern loading
pub mod seed;
/// Note event stream destination
pub mod sink;
