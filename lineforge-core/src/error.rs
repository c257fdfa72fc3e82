//! Error types for lineforge

use thiserror::Error;

/// Main error type for lineforge operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed geometry: {0}")]
    MalformedGeometry(String),

    #[error("Insufficient memory: {0}")]
    ResourceExhausted(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Image error: {0}")]
    Image(String),
}

impl Error {
    /// True when the failure was caused by running out of memory.
    ///
    /// Callers use this to tell "retry on a bigger machine" apart from every
    /// other failure.
    pub fn is_resource_exhausted(&self) -> bool {
        matches!(self, Error::ResourceExhausted(_))
    }
}

impl From<std::collections::TryReserveError> for Error {
    fn from(e: std::collections::TryReserveError) -> Self {
        Error::ResourceExhausted(e.to_string())
    }
}

/// Result type alias for lineforge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Largest amount of geometry, in bytes, one generator or refiner may
/// produce before it reports [`Error::ResourceExhausted`].
pub const GEOMETRY_BUDGET: usize = 1 << 30;

/// Fail with [`Error::ResourceExhausted`] when an estimated footprint is
/// larger than `budget`. `None` stands for a footprint that overflowed.
pub fn check_budget(bytes: Option<usize>, budget: usize, what: impl std::fmt::Display) -> Result<()> {
    match bytes {
        Some(bytes) if bytes <= budget => Ok(()),
        Some(bytes) => Err(Error::ResourceExhausted(format!(
            "{} needs about {} bytes, over the {} byte budget",
            what, bytes, budget
        ))),
        None => Err(Error::ResourceExhausted(format!("{} does not fit in memory", what))),
    }
}

/// Reserve room for `additional` more elements, reporting allocation failure
/// as [`Error::ResourceExhausted`] instead of aborting.
pub fn try_reserve<T>(vec: &mut Vec<T>, additional: usize) -> Result<()> {
    vec.try_reserve(additional)?;
    Ok(())
}
