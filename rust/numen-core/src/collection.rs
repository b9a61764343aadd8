use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shape::{Shape, ShapeError};
use crate::values::Value;

/// Whether a collection was built as a plain nested array or as a matrix.
///
/// Both behave identically under comparison; the distinction only decides the
/// kind of collection a broadcast produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    Array,
    Matrix,
}

/// A rectangular, possibly multi-dimensional sequence of scalar values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Flat storage in row-major (C-contiguous) order. Never holds collections.
    items: Vec<Value>,
    shape: Shape,
    kind: CollectionKind,
}

impl Collection {
    // ── Constructors ────────────────────────────────────────────────────

    /// Build an array from nested values. Every row must have the same shape.
    pub fn array(values: Vec<Value>) -> Result<Self, ShapeError> {
        Self::nested(values, CollectionKind::Array)
    }

    /// Build a matrix from nested values. Every row must have the same shape.
    pub fn matrix(values: Vec<Value>) -> Result<Self, ShapeError> {
        Self::nested(values, CollectionKind::Matrix)
    }

    /// Create a collection from flat row-major storage and a shape.
    ///
    /// Returns `Err` if the storage length doesn't match the shape's element
    /// count or if any item is itself a collection.
    pub fn from_flat(
        items: Vec<Value>,
        shape: Shape,
        kind: CollectionKind,
    ) -> Result<Self, ShapeError> {
        if items.len() != shape.numel() {
            return Err(ShapeError::ElementCountMismatch {
                expected: shape.numel(),
                got: items.len(),
            });
        }
        if items.iter().any(|v| matches!(v, Value::Collection(_))) {
            return Err(ShapeError::NestedLeaf);
        }
        Ok(Collection { items, shape, kind })
    }

    fn nested(values: Vec<Value>, kind: CollectionKind) -> Result<Self, ShapeError> {
        let len = values.len();
        // Decided by the first row: `None` means rows are scalars.
        let mut row_shape: Option<Option<Shape>> = None;
        let mut items = Vec::with_capacity(len);

        for value in values {
            let this_row = match &value {
                Value::Collection(c) => Some(c.shape.clone()),
                _ => None,
            };
            if let Some(expected) = &row_shape {
                if *expected != this_row {
                    return Err(ShapeError::Ragged {
                        expected: dims_of(expected),
                        got: dims_of(&this_row),
                    });
                }
            } else {
                row_shape = Some(this_row);
            }
            match value {
                Value::Collection(c) => items.extend(c.items),
                scalar => items.push(scalar),
            }
        }

        let shape = match row_shape.flatten() {
            Some(inner) => inner.stacked(len),
            None => Shape::vector(len),
        };
        Ok(Collection { items, shape, kind })
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Returns the flat row-major items.
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Total number of scalar elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_matrix(&self) -> bool {
        self.kind == CollectionKind::Matrix
    }

    // ── Indexing ────────────────────────────────────────────────────────

    fn flat_index(&self, indices: &[usize]) -> Result<usize, ShapeError> {
        let dims = self.shape.dims();
        if indices.len() != dims.len() {
            return Err(ShapeError::DimensionMismatch {
                expected: dims.len(),
                got: indices.len(),
            });
        }
        if indices.iter().zip(dims.iter()).any(|(&idx, &dim)| idx >= dim) {
            return Err(ShapeError::IndexOutOfBounds {
                index: indices.to_vec(),
                shape: dims.to_vec(),
            });
        }
        Ok(indices
            .iter()
            .zip(self.shape.strides().iter())
            .map(|(&i, &s)| i * s)
            .sum())
    }

    /// Get the element at the given multi-dimensional index.
    pub fn get(&self, indices: &[usize]) -> Result<&Value, ShapeError> {
        let offset = self.flat_index(indices)?;
        Ok(&self.items[offset])
    }

    /// Split back into rows: scalars for a vector, sub-collections otherwise.
    pub fn to_nested(&self) -> Vec<Value> {
        if self.shape.ndim() <= 1 {
            return self.items.clone();
        }
        let inner = self.shape.inner();
        let stride = inner.numel();
        (0..self.shape.dims()[0])
            .map(|row| {
                Value::Collection(Collection {
                    items: self.items[row * stride..(row + 1) * stride].to_vec(),
                    shape: inner.clone(),
                    kind: self.kind,
                })
            })
            .collect()
    }

    // ── Element pipelines ───────────────────────────────────────────────

    /// Apply `op` to every element, keeping shape and kind. Stops at the
    /// first error; no partially filled collection is returned.
    pub fn try_map<E>(&self, mut op: impl FnMut(&Value) -> Result<Value, E>) -> Result<Self, E> {
        let items = self.items.iter().map(&mut op).collect::<Result<Vec<_>, E>>()?;
        Ok(Collection {
            items,
            shape: self.shape.clone(),
            kind: self.kind,
        })
    }

    /// Pair the elements of two collections of identical shape.
    ///
    /// Shapes are checked before `op` runs on any element; on inequality the
    /// error comes from `on_mismatch`. The result is a matrix if either
    /// operand is one.
    pub fn try_zip<E>(
        &self,
        other: &Collection,
        mut op: impl FnMut(&Value, &Value) -> Result<Value, E>,
        on_mismatch: impl FnOnce(&Shape, &Shape) -> E,
    ) -> Result<Self, E> {
        if self.shape != other.shape {
            return Err(on_mismatch(&self.shape, &other.shape));
        }
        let items = self
            .items
            .iter()
            .zip(other.items.iter())
            .map(|(a, b)| op(a, b))
            .collect::<Result<Vec<_>, E>>()?;
        let kind = if self.is_matrix() || other.is_matrix() {
            CollectionKind::Matrix
        } else {
            CollectionKind::Array
        };
        Ok(Collection {
            items,
            shape: self.shape.clone(),
            kind,
        })
    }
}

fn dims_of(row: &Option<Shape>) -> Vec<usize> {
    row.as_ref().map(|s| s.dims().to_vec()).unwrap_or_default()
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.to_nested().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match row {
                Value::Text(s) => write!(f, "\"{}\"", s)?,
                other => write!(f, "{}", other)?,
            }
        }
        write!(f, "]")
    }
}
