//! Epsilon-aware ordering of real magnitudes.
//!
//! Two finite magnitudes are equal when `|a - b| <= epsilon * max(|a|, |b|, 1)`:
//! relative for large values, absolute near zero. Infinities are ordered by
//! IEEE rules with no tolerance. Floats meeting exact decimals are promoted to
//! decimal, never the other way round.

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use std::cmp::Ordering;

use crate::config::Config;

/// Result of a three-way comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Less,
    Equal,
    Greater,
    /// NaN was involved, or two complex values differ.
    Incomparable,
}

impl Outcome {
    pub fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Outcome::Less,
            Ordering::Equal => Outcome::Equal,
            Ordering::Greater => Outcome::Greater,
        }
    }

    /// Outcome with the operands swapped.
    pub fn reverse(self) -> Self {
        match self {
            Outcome::Less => Outcome::Greater,
            Outcome::Greater => Outcome::Less,
            other => other,
        }
    }

    /// -1, 0 or 1; NaN when incomparable.
    pub fn signum(self) -> f64 {
        match self {
            Outcome::Less => -1.0,
            Outcome::Equal => 0.0,
            Outcome::Greater => 1.0,
            Outcome::Incomparable => f64::NAN,
        }
    }
}

/// A magnitude on the real line in one of the two numeric representations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Real {
    Float(f64),
    Exact(Decimal),
}

/// Tolerance comparator bound to one epsilon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    epsilon: f64,
}

impl Tolerance {
    pub fn new(epsilon: f64) -> Self {
        Tolerance { epsilon }
    }

    pub fn from_config(config: &Config) -> Self {
        Tolerance::new(config.epsilon)
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn compare_floats(&self, a: f64, b: f64) -> Outcome {
        if a.is_nan() || b.is_nan() {
            return Outcome::Incomparable;
        }
        if !a.is_finite() || !b.is_finite() {
            return a.partial_cmp(&b).map_or(Outcome::Incomparable, Outcome::from_ordering);
        }
        let diff = a - b;
        let scale = a.abs().max(b.abs()).max(1.0);
        if diff.abs() <= self.epsilon * scale {
            Outcome::Equal
        } else if diff < 0.0 {
            Outcome::Less
        } else {
            Outcome::Greater
        }
    }

    pub fn compare_exact(&self, a: Decimal, b: Decimal) -> Outcome {
        let exact = Outcome::from_ordering(a.cmp(&b));
        let epsilon = match Decimal::from_f64(self.epsilon) {
            Some(epsilon) => epsilon,
            // Above the decimal range the bound exceeds any representable
            // difference.
            None if self.epsilon >= 1.0 => return Outcome::Equal,
            // Below the decimal resolution: exact compare.
            None => return exact,
        };
        let scale = a.abs().max(b.abs()).max(Decimal::ONE);
        // Subtraction only overflows when the operands have opposite signs;
        // then compare both sides halved.
        let (diff, scale) = match a.checked_sub(b) {
            Some(diff) => (diff.abs(), scale),
            None => ((a / Decimal::TWO - b / Decimal::TWO).abs(), scale / Decimal::TWO),
        };
        let within = match epsilon.checked_mul(scale) {
            Some(bound) => diff <= bound,
            None => true,
        };
        if within {
            Outcome::Equal
        } else {
            exact
        }
    }

    /// Compare a float against an exact decimal, promoting the float.
    pub fn compare_mixed(&self, a: f64, b: Decimal) -> Outcome {
        if a.is_nan() {
            return Outcome::Incomparable;
        }
        let promoted = if a.is_finite() {
            Decimal::from_f64(a).or_else(|| (a.abs() < 1.0).then_some(Decimal::ZERO))
        } else {
            None
        };
        match promoted {
            Some(a) => self.compare_exact(a, b),
            // Infinite or beyond the decimal range: only the sign matters.
            None if a > 0.0 => Outcome::Greater,
            None => Outcome::Less,
        }
    }

    pub fn compare_reals(&self, a: Real, b: Real) -> Outcome {
        match (a, b) {
            (Real::Float(a), Real::Float(b)) => self.compare_floats(a, b),
            (Real::Float(a), Real::Exact(b)) => self.compare_mixed(a, b),
            (Real::Exact(a), Real::Float(b)) => self.compare_mixed(b, a).reverse(),
            (Real::Exact(a), Real::Exact(b)) => self.compare_exact(a, b),
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::from_config(&Config::default())
    }
}
