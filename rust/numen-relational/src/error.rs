use numen_core::{Shape, ValueKind};
use thiserror::Error;

/// Failure of a relational operator call. Nothing is retried and no partial
/// result accompanies an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompareError {
    #[error("{function}: wrong number of arguments (expected {expected}, got {got})")]
    Arity {
        function: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("{function}: cannot compare {left} with {right}")]
    TypeMismatch {
        function: &'static str,
        left: ValueKind,
        right: ValueKind,
    },
    #[error("{function}: units {left} and {right} do not have the same dimension")]
    UnitMismatch {
        function: &'static str,
        left: String,
        right: String,
    },
    #[error("{function}: dimension mismatch, shapes {left} and {right} differ")]
    ShapeMismatch {
        function: &'static str,
        left: Shape,
        right: Shape,
    },
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
}

/// Coarse classification of [`CompareError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Arity,
    TypeMismatch,
    /// Incompatible physical dimensions or collection shapes.
    DimensionMismatch,
    UnknownFunction,
}

impl CompareError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompareError::Arity { .. } => ErrorKind::Arity,
            CompareError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            CompareError::UnitMismatch { .. } | CompareError::ShapeMismatch { .. } => {
                ErrorKind::DimensionMismatch
            }
            CompareError::UnknownFunction(_) => ErrorKind::UnknownFunction,
        }
    }
}
