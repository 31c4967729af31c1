use thiserror::Error;

/// Result type for parsing and geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading a vector floor-plan description
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid vector document: {0}")]
    InvalidDocument(#[from] roxmltree::Error),

    #[error("Odd coordinate token count: {0} values cannot form (x, y) pairs")]
    OddCoordinateCount(usize),

    #[error("Invalid coordinate token '{0}'")]
    InvalidCoordinate(String),

    #[error("Invalid canvas {attribute} value '{value}'")]
    InvalidCanvasDimension { attribute: &'static str, value: String },
}
