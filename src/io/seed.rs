//! Loading seed patterns from text files

use crate::io::error::{Result, VariationError};
use crate::pattern::HitMatrix;
use std::path::Path;

/// Read and parse a seed pattern file
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a valid pattern.
pub fn load_seed(path: &Path) -> Result<HitMatrix> {
    let text = std::fs::read_to_string(path).map_err(|e| VariationError::SeedLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    let seed = HitMatrix::parse(&text)?;
    log::info!(
        "loaded seed '{}': {} voices x {} steps, {} hits",
        path.display(),
        seed.voices(),
        seed.bar_len(),
        seed.hit_count()
    );
    Ok(seed)
}
