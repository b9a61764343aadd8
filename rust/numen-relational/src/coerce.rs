//! Type coercion resolver: decides how two scalar values are compared.
//!
//! The pairing table is an exhaustive match over both kinds with no wildcard
//! arm, so adding a [`ValueKind`] fails to compile until every pairing with
//! it has been decided.

use numen_core::{Complex, Value, ValueKind};
use tracing::trace;

use crate::error::CompareError;
use crate::relation::Semantics;
use crate::tolerance::{Outcome, Real, Tolerance};
use crate::units::compare_quantities;

/// How a pair of kinds is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pairing {
    /// Both on the real line: booleans become 0/1, null becomes 0, floats
    /// are promoted to decimals when the other side is exact.
    Numeric,
    /// Code-point lexicographic order.
    Lexical,
    /// Both quantities: unit comparator.
    Dimensional,
    /// A complex value against a complex, float or decimal value. Equality
    /// only; booleans and null never reach the complex plane.
    Complex,
    /// A collection is involved; handled by the broadcast engine.
    Elementwise,
    Reject,
}

pub fn pairing(left: ValueKind, right: ValueKind) -> Pairing {
    use ValueKind as K;
    match (left, right) {
        (K::Number | K::Precise | K::Boolean | K::Null, K::Number | K::Precise | K::Boolean | K::Null) => {
            Pairing::Numeric
        }
        (K::Text, K::Text) => Pairing::Lexical,
        (K::Quantity, K::Quantity) => Pairing::Dimensional,
        (K::Complex, K::Complex | K::Number | K::Precise)
        | (K::Number | K::Precise, K::Complex) => Pairing::Complex,
        (
            K::Collection,
            K::Number
            | K::Precise
            | K::Boolean
            | K::Null
            | K::Text
            | K::Quantity
            | K::Complex
            | K::Collection,
        )
        | (
            K::Number | K::Precise | K::Boolean | K::Null | K::Text | K::Quantity | K::Complex,
            K::Collection,
        ) => Pairing::Elementwise,
        (K::Text, K::Number | K::Precise | K::Boolean | K::Null | K::Quantity | K::Complex)
        | (K::Number | K::Precise | K::Boolean | K::Null | K::Quantity | K::Complex, K::Text)
        | (K::Quantity, K::Number | K::Precise | K::Boolean | K::Null | K::Complex)
        | (K::Number | K::Precise | K::Boolean | K::Null | K::Complex, K::Quantity)
        | (K::Complex, K::Boolean | K::Null)
        | (K::Boolean | K::Null, K::Complex) => Pairing::Reject,
    }
}

/// Position of a real-family value on the real line.
fn real(value: &Value) -> Option<Real> {
    match value {
        Value::Number(n) => Some(Real::Float(*n)),
        Value::Precise(d) => Some(Real::Exact(*d)),
        Value::Boolean(b) => Some(Real::Float(if *b { 1.0 } else { 0.0 })),
        Value::Null => Some(Real::Float(0.0)),
        Value::Complex(_) | Value::Quantity(_) | Value::Text(_) | Value::Collection(_) => None,
    }
}

/// Compare two scalar values.
pub fn resolve(
    function: &'static str,
    semantics: Semantics,
    left: &Value,
    right: &Value,
    tolerance: &Tolerance,
) -> Result<Outcome, CompareError> {
    let (lk, rk) = (left.kind(), right.kind());
    let mismatch = || CompareError::TypeMismatch {
        function,
        left: lk,
        right: rk,
    };
    let pairing = pairing(lk, rk);
    trace!(function, left = %lk, right = %rk, ?pairing, "resolving scalar comparison");

    match pairing {
        Pairing::Numeric => match (real(left), real(right)) {
            (Some(a), Some(b)) => Ok(tolerance.compare_reals(a, b)),
            _ => Err(mismatch()),
        },
        Pairing::Lexical => match (left, right) {
            // UTF-8 byte order is code-point order.
            (Value::Text(a), Value::Text(b)) => Ok(Outcome::from_ordering(a.as_str().cmp(b))),
            _ => Err(mismatch()),
        },
        Pairing::Dimensional => match (left, right) {
            (Value::Quantity(a), Value::Quantity(b)) => {
                compare_quantities(function, a, b, tolerance)
            }
            _ => Err(mismatch()),
        },
        Pairing::Complex if semantics == Semantics::Equality => {
            match (as_complex(left), as_complex(right)) {
                (Some(a), Some(b)) => Ok(complex_equality(a, b, tolerance)),
                _ => Err(mismatch()),
            }
        }
        Pairing::Complex | Pairing::Elementwise | Pairing::Reject => Err(mismatch()),
    }
}

/// Complex view of a complex, float or decimal value. Exact decimals are
/// read as floats here: complex parts are binary floats anyway.
fn as_complex(value: &Value) -> Option<Complex> {
    use num_traits::ToPrimitive;
    match value {
        Value::Complex(c) => Some(*c),
        Value::Number(re) => Some(Complex::new(*re, 0.0)),
        Value::Precise(d) => d.to_f64().map(|re| Complex::new(re, 0.0)),
        Value::Null
        | Value::Boolean(_)
        | Value::Quantity(_)
        | Value::Text(_)
        | Value::Collection(_) => None,
    }
}

fn complex_equality(a: Complex, b: Complex, tolerance: &Tolerance) -> Outcome {
    let re = tolerance.compare_floats(a.re, b.re);
    let im = tolerance.compare_floats(a.im, b.im);
    if re == Outcome::Equal && im == Outcome::Equal {
        Outcome::Equal
    } else {
        Outcome::Incomparable
    }
}
