use numen_core::Quantity;
use tracing::trace;

use crate::error::CompareError;
use crate::tolerance::{Outcome, Tolerance};

/// Compare two quantities by their magnitudes in the canonical base unit.
///
/// Quantities of different dimension have no ordering; `5 km` against
/// `100 g` is an error, not `false`.
pub fn compare_quantities(
    function: &'static str,
    left: &Quantity,
    right: &Quantity,
    tolerance: &Tolerance,
) -> Result<Outcome, CompareError> {
    if !left.same_dimension_as(right) {
        return Err(CompareError::UnitMismatch {
            function,
            left: left.unit().to_string(),
            right: right.unit().to_string(),
        });
    }
    let (a, b) = (left.canonical_magnitude(), right.canonical_magnitude());
    trace!(
        left = %left,
        right = %right,
        a,
        b,
        epsilon = tolerance.epsilon(),
        "comparing canonical magnitudes"
    );
    Ok(tolerance.compare_floats(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn q(s: &str) -> Quantity {
        Quantity::parse(s).unwrap()
    }

    fn cmp(a: &str, b: &str) -> Result<Outcome, CompareError> {
        compare_quantities("smaller", &q(a), &q(b), &Tolerance::default())
    }

    #[test]
    fn test_same_dimension_different_units() {
        assert_eq!(cmp("100cm", "10inch").unwrap(), Outcome::Greater);
        assert_eq!(cmp("99cm", "1m").unwrap(), Outcome::Less);
        assert_eq!(cmp("101cm", "1m").unwrap(), Outcome::Greater);
        assert_eq!(cmp("100cm", "1m").unwrap(), Outcome::Equal);
    }

    #[test]
    fn test_compound_and_derived_units_agree() {
        assert_eq!(cmp("1 N", "1000 g*m/s^2").unwrap(), Outcome::Equal);
        assert_eq!(cmp("1 h", "59 min").unwrap(), Outcome::Greater);
    }

    #[test]
    fn test_temperature_offsets_respected() {
        assert_eq!(cmp("0 degC", "273.15 K").unwrap(), Outcome::Equal);
        assert_eq!(cmp("100 degF", "100 degC").unwrap(), Outcome::Less);
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = cmp("5 km", "100 gram").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
        assert_eq!(
            err.to_string(),
            "smaller: units km and gram do not have the same dimension"
        );
    }
}
