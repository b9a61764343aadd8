//! Numen Relational
//!
//! Tolerance-aware relational operators (`smaller`, `smallerEq`, `larger`,
//! `largerEq`, `equal`, `unequal`, `compare`) over the heterogeneous values of
//! [`numen_core`]. A call flows through four layers:
//!
//! 1. [`engine`]: arity check and configuration snapshot;
//! 2. [`broadcast`]: elementwise lifting over collections;
//! 3. [`coerce`]: the scalar pairing table;
//! 4. [`tolerance`] and [`units`]: the actual magnitude comparison.

pub mod broadcast;
pub mod coerce;
pub mod config;
pub mod engine;
pub mod error;
pub mod relation;
pub mod tolerance;
pub mod units;

pub use config::{Config, ConfigError, DEFAULT_EPSILON};
pub use engine::{evaluate, evaluate_compare, Engine};
pub use error::{CompareError, ErrorKind};
pub use numen_core;
pub use relation::{Relation, Semantics};
pub use tolerance::{Outcome, Tolerance};
