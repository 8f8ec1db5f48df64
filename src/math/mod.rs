//! Mathematical utilities for the generator

/// Matrix addition, probability derivation and half swapping
pub mod matrix;
/// Note name to pitch number mapping
pub mod pitch;
