//! Error types and context management for variation generation

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum VariationError {
    /// Failed to read a seed pattern from the filesystem
    SeedLoad {
        /// Path to the seed file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Seed pattern text does not describe a usable hit matrix
    InvalidSeed {
        /// Description of what's wrong with the seed
        reason: String,
    },

    /// Seed rows have differing lengths
    NonRectangularSeed {
        /// Zero-based index of the first offending row
        row: usize,
        /// Length of the first row
        expected: usize,
        /// Length of the offending row
        found: usize,
    },

    /// Note name token could not be mapped to a pitch
    InvalidPitchName {
        /// The token as given
        token: String,
        /// Why it was rejected
        reason: String,
    },

    /// Generation parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Two matrices combined elementwise have different shapes
    ShapeMismatch {
        /// Dimensions of the left operand (rows, cols)
        left: (usize, usize),
        /// Dimensions of the right operand (rows, cols)
        right: (usize, usize),
    },

    /// Failed to write the generated MIDI file
    MidiExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Broad classes of failure, used to decide how an error is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Parameters or seed shape that would make generation ill-defined
    Configuration,
    /// Seed text or note names that cannot be parsed
    InputFormat,
    /// Reading or writing files
    Io,
    /// Internal precondition violated by a caller
    Contract,
}

impl VariationError {
    /// Classify the error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidParameter { .. } | Self::NonRectangularSeed { .. } => {
                ErrorCategory::Configuration
            }
            Self::InvalidSeed { .. } | Self::InvalidPitchName { .. } => ErrorCategory::InputFormat,
            Self::SeedLoad { .. } | Self::MidiExport { .. } | Self::FileSystem { .. } => {
                ErrorCategory::Io
            }
            Self::ShapeMismatch { .. } => ErrorCategory::Contract,
        }
    }
}

impl fmt::Display for VariationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SeedLoad { path, source } => {
                write!(f, "Failed to load seed pattern '{}': {source}", path.display())
            }
            Self::InvalidSeed { reason } => {
                write!(f, "Invalid seed pattern: {reason}")
            }
            Self::NonRectangularSeed {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Seed pattern is not rectangular: row {row} has {found} steps, expected {expected}"
                )
            }
            Self::InvalidPitchName { token, reason } => {
                write!(f, "Invalid note name '{token}': {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ShapeMismatch { left, right } => {
                write!(
                    f,
                    "Matrix shapes differ: {}x{} vs {}x{}",
                    left.0, left.1, right.0, right.1
                )
            }
            Self::MidiExport { path, source } => {
                write!(f, "Failed to export MIDI to '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for VariationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SeedLoad { source, .. }
            | Self::MidiExport { source, .. }
            | Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, VariationError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File being processed
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with the file and operation involved
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the path context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path context applied
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<VariationError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only I/O failures carry a path worth replacing
            match &mut error {
                VariationError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(context_path) = &context.path {
                        path.clone_from(context_path);
                    }
                    if let Some(context_operation) = context.operation {
                        *operation = context_operation;
                    }
                }
                VariationError::SeedLoad { path, .. } | VariationError::MidiExport { path, .. } => {
                    if let Some(context_path) = &context.path {
                        path.clone_from(context_path);
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.into()),
            ..Default::default()
        })
    }
}

impl From<std::io::Error> for VariationError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> VariationError {
    VariationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid seed error
pub fn invalid_seed(reason: &impl ToString) -> VariationError {
    VariationError::InvalidSeed {
        reason: reason.to_string(),
    }
}
