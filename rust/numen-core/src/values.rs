//! Tagged value representation shared by the comparison engine and its
//! callers.

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::collection::Collection;
use crate::kind::ValueKind;
use crate::shape::ShapeError;
use crate::unit::{Quantity, UnitError};

/// Values the relational operators accept. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    Precise(Decimal),
    Complex(Complex),
    Quantity(Quantity),
    Text(String),
    Collection(Collection),
}

/// A complex number. Deliberately not `PartialOrd`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Complex { re, im }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < 0.0 {
            write!(f, "{} - {}i", self.re, -self.im)
        } else {
            write!(f, "{} + {}i", self.re, self.im)
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::Precise(_) => ValueKind::Precise,
            Value::Complex(_) => ValueKind::Complex,
            Value::Quantity(_) => ValueKind::Quantity,
            Value::Text(_) => ValueKind::Text,
            Value::Collection(_) => ValueKind::Collection,
        }
    }

    // ── Constructors ────────────────────────────────────────────────────

    /// Exact decimal nearest to `n`; `None` for NaN, infinities and values
    /// outside the decimal range.
    pub fn precise_from_f64(n: f64) -> Option<Self> {
        Decimal::from_f64(n).map(Value::Precise)
    }

    pub fn precise_from_str(s: &str) -> Result<Self, rust_decimal::Error> {
        Decimal::from_str(s.trim()).map(Value::Precise)
    }

    pub fn complex(re: f64, im: f64) -> Self {
        Value::Complex(Complex::new(re, im))
    }

    /// Parse a quantity literal such as `"100cm"`.
    pub fn quantity(literal: &str) -> Result<Self, UnitError> {
        Quantity::parse(literal).map(Value::Quantity)
    }

    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Nested array; rows must share one shape.
    pub fn array(values: Vec<Value>) -> Result<Self, ShapeError> {
        Collection::array(values).map(Value::Collection)
    }

    /// Nested matrix; rows must share one shape.
    pub fn matrix(values: Vec<Value>) -> Result<Self, ShapeError> {
        Collection::matrix(values).map(Value::Collection)
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Value::Collection(c) => Some(c),
            _ => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Value::Collection(_))
    }

    /// Flat booleans of a boolean scalar or collection, row-major.
    pub fn to_bools(&self) -> Option<Vec<bool>> {
        match self {
            Value::Boolean(b) => Some(vec![*b]),
            Value::Collection(c) => c.items().iter().map(Value::as_bool).collect(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Precise(d) => write!(f, "{}", d),
            Value::Complex(c) => write!(f, "{}", c),
            Value::Quantity(q) => write!(f, "{}", q),
            Value::Text(s) => write!(f, "{}", s),
            Value::Collection(c) => write!(f, "{}", c),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Precise(d)
    }
}

impl From<Complex> for Value {
    fn from(c: Complex) -> Self {
        Value::Complex(c)
    }
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        Value::Quantity(q)
    }
}

impl From<Collection> for Value {
    fn from(c: Collection) -> Self {
        Value::Collection(c)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
