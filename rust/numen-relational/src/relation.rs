//! The relational operator family and its display notation.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::tolerance::Outcome;

/// Whether an operator needs an ordering or only equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semantics {
    Ordering,
    Equality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum Relation {
    #[strum(serialize = "smaller")]
    Smaller,
    #[strum(serialize = "smallerEq")]
    SmallerEq,
    #[strum(serialize = "larger")]
    Larger,
    #[strum(serialize = "largerEq")]
    LargerEq,
    #[strum(serialize = "equal")]
    Equal,
    #[strum(serialize = "unequal")]
    Unequal,
}

impl Relation {
    /// Function name as seen by the expression parser.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn semantics(self) -> Semantics {
        match self {
            Relation::Equal | Relation::Unequal => Semantics::Equality,
            _ => Semantics::Ordering,
        }
    }

    /// Does the relation hold for a comparison that produced `outcome`?
    pub fn holds(self, outcome: Outcome) -> bool {
        match self {
            Relation::Smaller => outcome == Outcome::Less,
            Relation::SmallerEq => matches!(outcome, Outcome::Less | Outcome::Equal),
            Relation::Larger => outcome == Outcome::Greater,
            Relation::LargerEq => matches!(outcome, Outcome::Greater | Outcome::Equal),
            Relation::Equal => outcome == Outcome::Equal,
            Relation::Unequal => outcome != Outcome::Equal,
        }
    }

    /// Plain-text infix operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Relation::Smaller => "<",
            Relation::SmallerEq => "<=",
            Relation::Larger => ">",
            Relation::LargerEq => ">=",
            Relation::Equal => "==",
            Relation::Unequal => "!=",
        }
    }

    pub fn tex_symbol(self) -> &'static str {
        match self {
            Relation::Smaller => "<",
            Relation::SmallerEq => "\\leq",
            Relation::Larger => ">",
            Relation::LargerEq => "\\geq",
            Relation::Equal => "=",
            Relation::Unequal => "\\neq",
        }
    }

    /// Render `name(x, y)` as `(x < y)`. Display only.
    pub fn render_infix(self, x: &str, y: &str) -> String {
        format!("({} {} {})", x, self.symbol(), y)
    }

    /// Render `name(x, y)` as `\left(x<y\right)`. Display only.
    pub fn render_tex(self, x: &str, y: &str) -> String {
        format!("\\left({}{}{}\\right)", x, self.tex_symbol(), y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_names_round_trip() {
        for relation in Relation::iter() {
            assert_eq!(Relation::from_str(relation.name()).unwrap(), relation);
            assert_eq!(relation.to_string(), relation.name());
        }
        assert!(Relation::from_str("smallerEQ").is_err());
    }

    #[test]
    fn test_tex_rendering() {
        assert_eq!(Relation::Smaller.render_tex("1", "2"), "\\left(1<2\\right)");
        assert_eq!(Relation::LargerEq.render_tex("x", "y"), "\\left(x\\geqy\\right)");
    }

    #[test]
    fn test_infix_rendering() {
        assert_eq!(Relation::Smaller.render_infix("x", "y"), "(x < y)");
        assert_eq!(Relation::Unequal.render_infix("a", "b"), "(a != b)");
    }

    #[test]
    fn test_holds_table() {
        use Outcome::*;
        let cases = [
            (Relation::Smaller, [true, false, false, false]),
            (Relation::SmallerEq, [true, true, false, false]),
            (Relation::Larger, [false, false, true, false]),
            (Relation::LargerEq, [false, true, true, false]),
            (Relation::Equal, [false, true, false, false]),
            (Relation::Unequal, [true, false, true, true]),
        ];
        for (relation, expected) in cases {
            let got = [Less, Equal, Greater, Incomparable].map(|o| relation.holds(o));
            assert_eq!(got, expected, "{}", relation);
        }
    }

    #[test]
    fn test_semantics() {
        assert_eq!(Relation::Smaller.semantics(), Semantics::Ordering);
        assert_eq!(Relation::Unequal.semantics(), Semantics::Equality);
    }
}
