/// Periodic break policy and per-bar probability preparation
pub mod breaks;
/// Bar-by-bar variation generator and its configuration
pub mod generator;
/// Swing placement of steps in time
pub mod timing;
