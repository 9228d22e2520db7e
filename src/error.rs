use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Dimensions not compatible: expected {expected}, got {found}")]
    DimensionMismatch { expected: String, found: String },

    #[error("Matrix is not square ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },

    /// A linear system needs at least its augmented column.
    #[error("System has no columns")]
    EmptySystem,

    #[error("Invalid fraction literal {0:?}")]
    InvalidFraction(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn shape(expected: impl ToString, found: impl ToString) -> Self {
        Error::DimensionMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}
