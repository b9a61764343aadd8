//! Lifts a scalar comparison elementwise over collections.

use numen_core::Value;
use tracing::trace;

use crate::error::CompareError;

/// Apply `leaf` to `left` and `right`, elementwise when either is a
/// collection.
///
/// * scalar and scalar: `leaf` once;
/// * scalar and collection (either order): `leaf` against every element,
///   keeping the collection's shape;
/// * collection and collection: shapes must be identical, checked before any
///   element is compared.
///
/// The first failing element aborts the whole call.
pub fn broadcast<F>(
    function: &'static str,
    left: &Value,
    right: &Value,
    mut leaf: F,
) -> Result<Value, CompareError>
where
    F: FnMut(&Value, &Value) -> Result<Value, CompareError>,
{
    match (left, right) {
        (Value::Collection(a), Value::Collection(b)) => {
            trace!(function, left = %a.shape(), right = %b.shape(), "broadcasting pairwise");
            a.try_zip(b, leaf, |l, r| CompareError::ShapeMismatch {
                function,
                left: l.clone(),
                right: r.clone(),
            })
            .map(Value::Collection)
        }
        (Value::Collection(a), scalar) => {
            trace!(function, shape = %a.shape(), "broadcasting scalar on the right");
            a.try_map(|x| leaf(x, scalar)).map(Value::Collection)
        }
        (scalar, Value::Collection(b)) => {
            trace!(function, shape = %b.shape(), "broadcasting scalar on the left");
            b.try_map(|y| leaf(scalar, y)).map(Value::Collection)
        }
        _ => leaf(left, right),
    }
}
