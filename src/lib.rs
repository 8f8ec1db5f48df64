//! Stochastic drum loop variation generator
//!
//! A binary seed pattern is varied bar by bar: each seed hit is kept or
//! dropped by sampling against probabilities derived from what sounded in the
//! previous bar and from the seed itself. Every few bars a break swaps the
//! halves of each beat's probabilities, and the state around the break is
//! saved and restored so the break does not bleed into the next cycle.

#![forbid(unsafe_code)]

/// Break policy, swing timing and the bar-by-bar generator
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Matrix operations and note name mapping
pub mod math;
/// Seed pattern and carried state
pub mod pattern;

pub use algorithm::generator::{VariationConfig, VariationGenerator, generate_variations};
pub use io::error::{Result, VariationError};
pub use pattern::{CarriedState, HitMatrix};
