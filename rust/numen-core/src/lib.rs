//! Numen Core
//!
//! Value model shared by the relational operators: tagged values, exact
//! decimals, complex numbers, physical quantities and rectangular collections.

pub mod collection;
pub mod kind;
pub mod shape;
pub mod unit;
pub mod values;

pub use collection::{Collection, CollectionKind};
pub use kind::ValueKind;
pub use rust_decimal::Decimal;
pub use shape::{Shape, ShapeError};
pub use unit::{Dimensions, Quantity, Unit, UnitError};
pub use values::{Complex, Value};
