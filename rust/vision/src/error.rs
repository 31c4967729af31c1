use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running the extraction pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error("Vector parsing error: {0}")]
    CoreError(#[from] roomplan_core::Error),
}
