//! Physical quantities: dimension vectors, a unit catalog with SI prefixes,
//! and parsing of unit and quantity literals such as `"km"`, `"m/s^2"` or
//! `"100cm"`.
//!
//! Every unit reduces to a canonical base per dimension (m, kg, s, A, K, cd,
//! mol, rad) through `scale` and, for affine temperature scales, `offset`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("unknown unit '{0}'")]
    UnknownUnit(String),
    #[error("invalid quantity literal '{0}'")]
    InvalidQuantity(String),
    /// An offset unit (`degC`, `degF`) used inside a compound or with an
    /// exponent. Offset units take no SI prefix, so `kdegC` is an unknown
    /// unit rather than this error.
    #[error("unit '{0}' has an offset and cannot be combined with other units")]
    AffineInCompound(String),
    /// Unparseable exponent, or one whose combined value leaves the i8 range.
    #[error("invalid exponent in unit '{0}'")]
    InvalidExponent(String),
}

// ── Dimensions ──────────────────────────────────────────────────────────

/// Exponents of the base physical dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: i8,
    pub mass: i8,
    pub time: i8,
    pub current: i8,
    pub temperature: i8,
    pub luminous_intensity: i8,
    pub amount: i8,
    pub angle: i8,
}

impl Dimensions {
    pub const DIMENSIONLESS: Self = Self::new([0, 0, 0, 0, 0, 0, 0, 0]);
    pub const LENGTH: Self = Self::new([1, 0, 0, 0, 0, 0, 0, 0]);
    pub const MASS: Self = Self::new([0, 1, 0, 0, 0, 0, 0, 0]);
    pub const TIME: Self = Self::new([0, 0, 1, 0, 0, 0, 0, 0]);
    pub const CURRENT: Self = Self::new([0, 0, 0, 1, 0, 0, 0, 0]);
    pub const TEMPERATURE: Self = Self::new([0, 0, 0, 0, 1, 0, 0, 0]);
    pub const LUMINOUS_INTENSITY: Self = Self::new([0, 0, 0, 0, 0, 1, 0, 0]);
    pub const AMOUNT: Self = Self::new([0, 0, 0, 0, 0, 0, 1, 0]);
    pub const ANGLE: Self = Self::new([0, 0, 0, 0, 0, 0, 0, 1]);

    /// Build from exponents in the order length, mass, time, current,
    /// temperature, luminous intensity, amount, angle.
    pub const fn new(e: [i8; 8]) -> Self {
        Dimensions {
            length: e[0],
            mass: e[1],
            time: e[2],
            current: e[3],
            temperature: e[4],
            luminous_intensity: e[5],
            amount: e[6],
            angle: e[7],
        }
    }

    pub fn exponents(&self) -> [i8; 8] {
        [
            self.length,
            self.mass,
            self.time,
            self.current,
            self.temperature,
            self.luminous_intensity,
            self.amount,
            self.angle,
        ]
    }

    pub fn is_dimensionless(&self) -> bool {
        *self == Self::DIMENSIONLESS
    }

    /// Raise every exponent to the `n`th power. `None` on i8 overflow.
    pub fn checked_powi(self, n: i8) -> Option<Self> {
        let mut e = self.exponents();
        for x in e.iter_mut() {
            *x = x.checked_mul(n)?;
        }
        Some(Self::new(e))
    }

    /// Product of two dimensions (exponents added). `None` on i8 overflow.
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let (a, b) = (self.exponents(), rhs.exponents());
        let mut e = [0i8; 8];
        for (i, x) in e.iter_mut().enumerate() {
            *x = a[i].checked_add(b[i])?;
        }
        Some(Self::new(e))
    }
}

const BASE_SYMBOLS: [&str; 8] = ["m", "kg", "s", "A", "K", "cd", "mol", "rad"];

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "1");
        }
        let mut first = true;
        for (sym, exp) in BASE_SYMBOLS.iter().zip(self.exponents()) {
            if exp == 0 {
                continue;
            }
            if !first {
                write!(f, "·")?;
            }
            first = false;
            if exp == 1 {
                write!(f, "{}", sym)?;
            } else {
                write!(f, "{}^{}", sym, exp)?;
            }
        }
        Ok(())
    }
}

// ── Catalog ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefixes {
    None,
    Short,
    Long,
}

struct UnitDef {
    name: &'static str,
    dimensions: Dimensions,
    scale: f64,
    offset: f64,
    prefixes: Prefixes,
}

const fn def(
    name: &'static str,
    dimensions: Dimensions,
    scale: f64,
    prefixes: Prefixes,
) -> UnitDef {
    UnitDef {
        name,
        dimensions,
        scale,
        offset: 0.0,
        prefixes,
    }
}

const FORCE: Dimensions = Dimensions::new([1, 1, -2, 0, 0, 0, 0, 0]);
const ENERGY: Dimensions = Dimensions::new([2, 1, -2, 0, 0, 0, 0, 0]);
const POWER: Dimensions = Dimensions::new([2, 1, -3, 0, 0, 0, 0, 0]);
const PRESSURE: Dimensions = Dimensions::new([-1, 1, -2, 0, 0, 0, 0, 0]);
const VOLTAGE: Dimensions = Dimensions::new([2, 1, -3, -1, 0, 0, 0, 0]);
const FREQUENCY: Dimensions = Dimensions::new([0, 0, -1, 0, 0, 0, 0, 0]);
const VOLUME: Dimensions = Dimensions::new([3, 0, 0, 0, 0, 0, 0, 0]);

use Prefixes::{Long, Short};

static CATALOG: &[UnitDef] = &[
    // length
    def("m", Dimensions::LENGTH, 1.0, Short),
    def("meter", Dimensions::LENGTH, 1.0, Long),
    def("metre", Dimensions::LENGTH, 1.0, Long),
    def("in", Dimensions::LENGTH, 0.0254, Prefixes::None),
    def("inch", Dimensions::LENGTH, 0.0254, Prefixes::None),
    def("ft", Dimensions::LENGTH, 0.3048, Prefixes::None),
    def("foot", Dimensions::LENGTH, 0.3048, Prefixes::None),
    def("yd", Dimensions::LENGTH, 0.9144, Prefixes::None),
    def("yard", Dimensions::LENGTH, 0.9144, Prefixes::None),
    def("mi", Dimensions::LENGTH, 1609.344, Prefixes::None),
    def("mile", Dimensions::LENGTH, 1609.344, Prefixes::None),
    def("angstrom", Dimensions::LENGTH, 1e-10, Prefixes::None),
    // mass
    def("g", Dimensions::MASS, 1e-3, Short),
    def("gram", Dimensions::MASS, 1e-3, Long),
    def("t", Dimensions::MASS, 1e3, Prefixes::None),
    def("tonne", Dimensions::MASS, 1e3, Prefixes::None),
    def("lb", Dimensions::MASS, 0.45359237, Prefixes::None),
    def("lbs", Dimensions::MASS, 0.45359237, Prefixes::None),
    def("pound", Dimensions::MASS, 0.45359237, Prefixes::None),
    def("oz", Dimensions::MASS, 0.028349523125, Prefixes::None),
    def("ounce", Dimensions::MASS, 0.028349523125, Prefixes::None),
    // time
    def("s", Dimensions::TIME, 1.0, Short),
    def("second", Dimensions::TIME, 1.0, Long),
    def("min", Dimensions::TIME, 60.0, Prefixes::None),
    def("minute", Dimensions::TIME, 60.0, Prefixes::None),
    def("h", Dimensions::TIME, 3600.0, Prefixes::None),
    def("hour", Dimensions::TIME, 3600.0, Prefixes::None),
    def("day", Dimensions::TIME, 86400.0, Prefixes::None),
    def("week", Dimensions::TIME, 604800.0, Prefixes::None),
    // electric current
    def("A", Dimensions::CURRENT, 1.0, Short),
    def("ampere", Dimensions::CURRENT, 1.0, Long),
    // temperature
    def("K", Dimensions::TEMPERATURE, 1.0, Short),
    def("kelvin", Dimensions::TEMPERATURE, 1.0, Long),
    UnitDef {
        name: "degC",
        dimensions: Dimensions::TEMPERATURE,
        scale: 1.0,
        offset: 273.15,
        prefixes: Prefixes::None,
    },
    UnitDef {
        name: "celsius",
        dimensions: Dimensions::TEMPERATURE,
        scale: 1.0,
        offset: 273.15,
        prefixes: Prefixes::None,
    },
    UnitDef {
        name: "degF",
        dimensions: Dimensions::TEMPERATURE,
        scale: 5.0 / 9.0,
        offset: 459.67,
        prefixes: Prefixes::None,
    },
    UnitDef {
        name: "fahrenheit",
        dimensions: Dimensions::TEMPERATURE,
        scale: 5.0 / 9.0,
        offset: 459.67,
        prefixes: Prefixes::None,
    },
    // luminous intensity, amount, angle
    def("cd", Dimensions::LUMINOUS_INTENSITY, 1.0, Short),
    def("candela", Dimensions::LUMINOUS_INTENSITY, 1.0, Long),
    def("mol", Dimensions::AMOUNT, 1.0, Short),
    def("mole", Dimensions::AMOUNT, 1.0, Long),
    def("rad", Dimensions::ANGLE, 1.0, Short),
    def("radian", Dimensions::ANGLE, 1.0, Long),
    def("deg", Dimensions::ANGLE, std::f64::consts::PI / 180.0, Prefixes::None),
    def("degree", Dimensions::ANGLE, std::f64::consts::PI / 180.0, Prefixes::None),
    // derived
    def("Hz", FREQUENCY, 1.0, Short),
    def("hertz", FREQUENCY, 1.0, Long),
    def("N", FORCE, 1.0, Short),
    def("newton", FORCE, 1.0, Long),
    def("J", ENERGY, 1.0, Short),
    def("joule", ENERGY, 1.0, Long),
    def("W", POWER, 1.0, Short),
    def("watt", POWER, 1.0, Long),
    def("Pa", PRESSURE, 1.0, Short),
    def("pascal", PRESSURE, 1.0, Long),
    def("V", VOLTAGE, 1.0, Short),
    def("volt", VOLTAGE, 1.0, Long),
    def("L", VOLUME, 1e-3, Short),
    def("l", VOLUME, 1e-3, Short),
    def("liter", VOLUME, 1e-3, Long),
    def("litre", VOLUME, 1e-3, Long),
];

static SHORT_PREFIXES: &[(&str, f64)] = &[
    ("da", 1e1),
    ("Y", 1e24),
    ("Z", 1e21),
    ("E", 1e18),
    ("P", 1e15),
    ("T", 1e12),
    ("G", 1e9),
    ("M", 1e6),
    ("k", 1e3),
    ("h", 1e2),
    ("d", 1e-1),
    ("c", 1e-2),
    ("m", 1e-3),
    ("u", 1e-6),
    ("µ", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
    ("a", 1e-18),
];

static LONG_PREFIXES: &[(&str, f64)] = &[
    ("yotta", 1e24),
    ("zetta", 1e21),
    ("exa", 1e18),
    ("peta", 1e15),
    ("tera", 1e12),
    ("giga", 1e9),
    ("mega", 1e6),
    ("kilo", 1e3),
    ("hecto", 1e2),
    ("deca", 1e1),
    ("deci", 1e-1),
    ("centi", 1e-2),
    ("milli", 1e-3),
    ("micro", 1e-6),
    ("nano", 1e-9),
    ("pico", 1e-12),
    ("femto", 1e-15),
    ("atto", 1e-18),
];

fn lookup(name: &str) -> Option<&'static UnitDef> {
    CATALOG.iter().find(|d| d.name == name)
}

/// Resolve a single unit symbol, possibly prefixed, to (def, prefix factor).
/// Exact catalog matches win over prefixed readings, so `min` is minutes.
fn resolve_atom(symbol: &str) -> Option<(&'static UnitDef, f64)> {
    if let Some(d) = lookup(symbol) {
        return Some((d, 1.0));
    }
    for (table, style) in [(SHORT_PREFIXES, Short), (LONG_PREFIXES, Long)] {
        for &(prefix, factor) in table.iter() {
            let Some(rest) = symbol.strip_prefix(prefix) else {
                continue;
            };
            if let Some(d) = lookup(rest).filter(|d| d.prefixes == style) {
                return Some((d, factor));
            }
        }
    }
    None
}

// ── Unit ────────────────────────────────────────────────────────────────

/// A resolved unit: its written symbol plus the data needed to reduce a
/// magnitude to the canonical base of its dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    symbol: String,
    dimensions: Dimensions,
    scale: f64,
    offset: f64,
}

impl Unit {
    /// Parse a unit expression: a catalog symbol or name with an optional SI
    /// prefix, or a compound such as `kg*m^2/s^2` or `m s^-1`.
    pub fn parse(text: &str) -> Result<Self, UnitError> {
        let symbol = text.trim();
        if symbol.is_empty() {
            return Err(UnitError::UnknownUnit(text.to_string()));
        }

        let mut parts = symbol.split('/');
        let numerator = parts.next().unwrap_or_default();
        let mut factors: Vec<(&str, i8)> = Vec::new();
        collect_factors(numerator, 1, symbol, &mut factors)?;
        for denominator in parts {
            collect_factors(denominator, -1, symbol, &mut factors)?;
        }

        let simple = factors.len() == 1 && factors[0].1 == 1;
        let mut dimensions = Dimensions::DIMENSIONLESS;
        let mut scale = 1.0;
        let mut offset = 0.0;
        for (atom, exp) in factors {
            let (def, prefix) =
                resolve_atom(atom).ok_or_else(|| UnitError::UnknownUnit(atom.to_string()))?;
            if def.offset != 0.0 {
                if !simple {
                    return Err(UnitError::AffineInCompound(atom.to_string()));
                }
                offset = def.offset;
            }
            dimensions = def
                .dimensions
                .checked_powi(exp)
                .and_then(|d| dimensions.checked_mul(d))
                .ok_or_else(|| UnitError::InvalidExponent(symbol.to_string()))?;
            scale *= (def.scale * prefix).powi(i32::from(exp));
        }

        Ok(Unit {
            symbol: symbol.to_string(),
            dimensions,
            scale,
            offset,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Factor that converts a magnitude in this unit to the canonical base.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Additive offset applied before scaling (non-zero only for degC/degF).
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn same_dimension_as(&self, other: &Unit) -> bool {
        self.dimensions == other.dimensions
    }

    /// Convert a magnitude expressed in this unit to the canonical base.
    pub fn to_canonical(&self, magnitude: f64) -> f64 {
        (magnitude + self.offset) * self.scale
    }
}

/// Split one side of a compound unit into `(atom, exponent)` pairs.
fn collect_factors<'a>(
    side: &'a str,
    sign: i8,
    whole: &str,
    out: &mut Vec<(&'a str, i8)>,
) -> Result<(), UnitError> {
    let mut any = false;
    for token in side.split(|c: char| c == '*' || c.is_whitespace()) {
        if token.is_empty() {
            continue;
        }
        any = true;
        let (atom, exp) = match token.split_once('^') {
            Some((atom, exp)) => {
                let exp: i8 = exp
                    .parse()
                    .map_err(|_| UnitError::InvalidExponent(whole.to_string()))?;
                (atom, exp)
            }
            None => (token, 1),
        };
        // `1/s` style numerators carry no unit.
        if atom == "1" && sign == 1 {
            continue;
        }
        let exp = exp
            .checked_mul(sign)
            .ok_or_else(|| UnitError::InvalidExponent(whole.to_string()))?;
        out.push((atom, exp));
    }
    if any {
        Ok(())
    } else {
        Err(UnitError::UnknownUnit(whole.to_string()))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

// ── Quantity ────────────────────────────────────────────────────────────

/// A magnitude tagged with a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: &str) -> Result<Self, UnitError> {
        Ok(Quantity {
            value,
            unit: Unit::parse(unit)?,
        })
    }

    pub fn from_unit(value: f64, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Parse a literal such as `"100cm"`, `"5 km"` or `"9.81 m/s^2"`.
    pub fn parse(literal: &str) -> Result<Self, UnitError> {
        let text = literal.trim();
        let numeric_len = text
            .chars()
            .take_while(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
            .count();

        let mut unit_error = None;
        // Longest number first; `2e` in `2em` is not an exponent.
        for end in (1..=numeric_len).rev() {
            let Ok(value) = text[..end].parse::<f64>() else {
                continue;
            };
            match Unit::parse(&text[end..]) {
                Ok(unit) => return Ok(Quantity::from_unit(value, unit)),
                Err(e) => {
                    unit_error.get_or_insert(e);
                }
            }
        }
        Err(unit_error.unwrap_or_else(|| UnitError::InvalidQuantity(literal.to_string())))
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    pub fn dimensions(&self) -> Dimensions {
        self.unit.dimensions
    }

    /// Magnitude expressed in the canonical base unit of its dimension.
    pub fn canonical_magnitude(&self) -> f64 {
        self.unit.to_canonical(self.value)
    }

    pub fn same_dimension_as(&self, other: &Quantity) -> bool {
        self.unit.same_dimension_as(&other.unit)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_prefixed_length() {
        let cm = Unit::parse("cm").unwrap();
        assert_eq!(cm.dimensions(), Dimensions::LENGTH);
        assert!(approx(cm.scale(), 0.01));

        let km = Unit::parse("kilometer").unwrap();
        assert!(approx(km.scale(), 1000.0));
    }

    #[test]
    fn test_exact_match_beats_prefix() {
        // `min` is minutes, not milli-inches; `mm` is millimetres.
        assert_eq!(Unit::parse("min").unwrap().dimensions(), Dimensions::TIME);
        assert!(approx(Unit::parse("mm").unwrap().scale(), 1e-3));
        assert!(approx(Unit::parse("cd").unwrap().scale(), 1.0));
    }

    #[test]
    fn test_prefix_style_must_match() {
        assert!(Unit::parse("kmeter").is_err());
        assert!(Unit::parse("kiloinch").is_err());
        assert!(Unit::parse("kinch").is_err());
    }

    #[test]
    fn test_compound_units() {
        let accel = Unit::parse("m/s^2").unwrap();
        assert_eq!(accel.dimensions(), Dimensions::new([1, 0, -2, 0, 0, 0, 0, 0]));

        let newton = Unit::parse("N").unwrap();
        let expanded = Unit::parse("kg*m/s^2").unwrap();
        assert!(newton.same_dimension_as(&expanded));
        assert!(approx(expanded.scale(), 1.0));

        let per_second = Unit::parse("1/s").unwrap();
        assert_eq!(per_second.dimensions(), Unit::parse("Hz").unwrap().dimensions());
    }

    #[test]
    fn test_compound_rejects_affine() {
        assert!(matches!(
            Unit::parse("degC/s"),
            Err(UnitError::AffineInCompound(_))
        ));
    }

    #[test]
    fn test_bad_exponent() {
        assert!(matches!(
            Unit::parse("m^x"),
            Err(UnitError::InvalidExponent(_))
        ));
    }

    #[test]
    fn test_exponent_overflow_is_an_error() {
        assert!(matches!(
            Quantity::parse("1 m^100*m^100"),
            Err(UnitError::InvalidExponent(_))
        ));
        assert!(matches!(
            Quantity::parse("1 m/s^-128"),
            Err(UnitError::InvalidExponent(_))
        ));
        assert!(matches!(
            Unit::parse("m^64^2"),
            Err(UnitError::InvalidExponent(_))
        ));
        assert!(matches!(
            Unit::parse("m^127*m"),
            Err(UnitError::InvalidExponent(_))
        ));
        let deep = Unit::parse("m^100/m^100").unwrap();
        assert!(deep.dimensions().is_dimensionless());
    }

    #[test]
    fn test_dimension_arithmetic() {
        let speed = Dimensions::LENGTH
            .checked_mul(Dimensions::TIME.checked_powi(-1).unwrap())
            .unwrap();
        assert_eq!(speed, Dimensions::new([1, 0, -1, 0, 0, 0, 0, 0]));
        assert_eq!(
            Dimensions::LENGTH.checked_powi(127),
            Some(Dimensions::new([127, 0, 0, 0, 0, 0, 0, 0]))
        );
        assert_eq!(Dimensions::LENGTH.checked_powi(-128).unwrap().length, -128);
        assert!(Dimensions::new([-128, 0, 0, 0, 0, 0, 0, 0]).checked_powi(-1).is_none());
    }

    #[test]
    fn test_quantity_literals() {
        let q = Quantity::parse("100cm").unwrap();
        assert_eq!(q.value(), 100.0);
        assert_eq!(q.unit().symbol(), "cm");
        assert!(approx(q.canonical_magnitude(), 1.0));

        let q = Quantity::parse("10inch").unwrap();
        assert!(approx(q.canonical_magnitude(), 0.254));

        let q = Quantity::parse("1.5e3 m").unwrap();
        assert!(approx(q.canonical_magnitude(), 1500.0));

        let q = Quantity::parse("-2 km").unwrap();
        assert!(approx(q.canonical_magnitude(), -2000.0));
    }

    #[test]
    fn test_quantity_literal_errors() {
        assert!(matches!(
            Quantity::parse("cm"),
            Err(UnitError::InvalidQuantity(_))
        ));
        assert!(matches!(
            Quantity::parse("12 furlongs"),
            Err(UnitError::UnknownUnit(_))
        ));
        assert!(Quantity::parse("12").is_err());
    }

    #[test]
    fn test_temperature_offsets() {
        let freezing = Quantity::new(0.0, "degC").unwrap();
        assert_eq!(freezing.unit().offset(), 273.15);
        assert_eq!(Unit::parse("K").unwrap().offset(), 0.0);
        assert!(approx(freezing.canonical_magnitude(), 273.15));
        let f = Quantity::new(32.0, "degF").unwrap();
        assert!(approx(f.canonical_magnitude(), 273.15));
    }

    #[test]
    fn test_dimensions_display() {
        assert_eq!(Dimensions::DIMENSIONLESS.to_string(), "1");
        assert_eq!(FORCE.to_string(), "m·kg·s^-2");
    }
}
