//! Seed pattern and the state carried from bar to bar

/// Mutable bar-to-bar state with break snapshots
pub mod carried;
/// Immutable binary seed pattern
pub mod hit_matrix;

pub use carried::CarriedState;
pub use hit_matrix::HitMatrix;
