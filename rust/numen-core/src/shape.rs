use serde::{Deserialize, Serialize};
use std::fmt;

/// Error type for shape-related operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Sibling rows of a nested collection have different shapes.
    Ragged {
        expected: Vec<usize>,
        got: Vec<usize>,
    },
    /// A flat buffer contained a collection where only scalars are allowed.
    NestedLeaf,
    /// Flat storage length does not match the shape's element count.
    ElementCountMismatch { expected: usize, got: usize },
    /// Index out of bounds.
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },
    /// Wrong number of dimensions for indexing.
    DimensionMismatch { expected: usize, got: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::Ragged { expected, got } => {
                write!(
                    f,
                    "ragged collection: expected rows of shape {:?} but found {:?}",
                    expected, got
                )
            }
            ShapeError::NestedLeaf => {
                write!(f, "flat collection storage cannot hold nested collections")
            }
            ShapeError::ElementCountMismatch { expected, got } => {
                write!(
                    f,
                    "shape holds {} elements but {} were supplied",
                    expected, got
                )
            }
            ShapeError::IndexOutOfBounds { index, shape } => {
                write!(
                    f,
                    "index {:?} is out of bounds for shape {:?}",
                    index, shape
                )
            }
            ShapeError::DimensionMismatch { expected, got } => {
                write!(f, "expected {} dimensions but got {}", expected, got)
            }
        }
    }
}

impl std::error::Error for ShapeError {}

/// Dimension sizes of a collection, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Shape { dims }
    }

    /// Shape of a one-dimensional collection of `len` elements.
    pub fn vector(len: usize) -> Self {
        Shape { dims: vec![len] }
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements. Zero whenever any dimension is zero.
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn is_vector(&self) -> bool {
        self.dims.len() == 1
    }

    pub fn is_matrix(&self) -> bool {
        self.dims.len() >= 2
    }

    pub fn is_empty(&self) -> bool {
        self.numel() == 0
    }

    /// Compute C-contiguous (row-major) strides.
    pub fn strides(&self) -> Vec<usize> {
        if self.dims.is_empty() {
            return vec![];
        }
        let mut strides = vec![1usize; self.dims.len()];
        for i in (0..self.dims.len() - 1).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }

    /// Shape with `outer` prepended, used when stacking equally shaped rows.
    pub fn stacked(&self, outer: usize) -> Shape {
        let mut dims = Vec::with_capacity(self.dims.len() + 1);
        dims.push(outer);
        dims.extend_from_slice(&self.dims);
        Shape { dims }
    }

    /// Shape of one row: every dimension except the outermost.
    pub fn inner(&self) -> Shape {
        Shape {
            dims: self.dims.iter().skip(1).copied().collect(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, ")")
    }
}
