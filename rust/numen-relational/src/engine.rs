//! Operator facade: the externally callable relational functions.

use numen_core::Value;
use parking_lot::RwLock;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::broadcast::broadcast;
use crate::coerce::resolve;
use crate::config::{Config, ConfigError};
use crate::error::CompareError;
use crate::relation::{Relation, Semantics};
use crate::tolerance::Tolerance;

const ARITY: usize = 2;

/// Evaluate `relation` on two values under an explicit configuration.
pub fn evaluate(
    relation: Relation,
    left: &Value,
    right: &Value,
    config: &Config,
) -> Result<Value, CompareError> {
    let tolerance = Tolerance::from_config(config);
    let function = relation.name();
    broadcast(function, left, right, |a, b| {
        resolve(function, relation.semantics(), a, b, &tolerance)
            .map(|outcome| Value::Boolean(relation.holds(outcome)))
    })
}

/// Three-way comparison: `-1`, `0` or `1` per element, NaN when incomparable.
pub fn evaluate_compare(left: &Value, right: &Value, config: &Config) -> Result<Value, CompareError> {
    let tolerance = Tolerance::from_config(config);
    broadcast("compare", left, right, |a, b| {
        resolve("compare", Semantics::Ordering, a, b, &tolerance)
            .map(|outcome| Value::Number(outcome.signum()))
    })
}

fn check_arity(function: &'static str, args: &[Value]) -> Result<(), CompareError> {
    if args.len() == ARITY {
        Ok(())
    } else {
        Err(CompareError::Arity {
            function,
            expected: ARITY,
            got: args.len(),
        })
    }
}

/// Relational operators bound to a configuration snapshot.
///
/// The snapshot is replaced whole by [`Engine::configure`]; every call reads
/// it once, so a concurrent update never changes the epsilon mid-comparison.
#[derive(Debug, Default)]
pub struct Engine {
    config: RwLock<Arc<Config>>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Engine {
            config: RwLock::new(Arc::new(config)),
        })
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<Config> {
        Arc::clone(&self.config.read())
    }

    /// Replace the configuration for all subsequent calls.
    pub fn configure(&self, config: Config) -> Result<(), ConfigError> {
        config.validate()?;
        let previous = std::mem::replace(&mut *self.config.write(), Arc::new(config));
        debug!(
            old_epsilon = previous.epsilon,
            new_epsilon = config.epsilon,
            "comparison config updated"
        );
        Ok(())
    }

    pub fn set_epsilon(&self, epsilon: f64) -> Result<(), ConfigError> {
        self.configure(Config { epsilon })
    }

    /// Apply `relation` to exactly two arguments.
    pub fn apply(&self, relation: Relation, args: &[Value]) -> Result<Value, CompareError> {
        check_arity(relation.name(), args)?;
        evaluate(relation, &args[0], &args[1], &self.config())
    }

    /// Dispatch by function name, as the expression parser does.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, CompareError> {
        if name == "compare" {
            return self.compare(args);
        }
        let relation =
            Relation::from_str(name).map_err(|_| CompareError::UnknownFunction(name.to_string()))?;
        self.apply(relation, args)
    }

    pub fn smaller(&self, args: &[Value]) -> Result<Value, CompareError> {
        self.apply(Relation::Smaller, args)
    }

    pub fn smaller_eq(&self, args: &[Value]) -> Result<Value, CompareError> {
        self.apply(Relation::SmallerEq, args)
    }

    pub fn larger(&self, args: &[Value]) -> Result<Value, CompareError> {
        self.apply(Relation::Larger, args)
    }

    pub fn larger_eq(&self, args: &[Value]) -> Result<Value, CompareError> {
        self.apply(Relation::LargerEq, args)
    }

    pub fn equal(&self, args: &[Value]) -> Result<Value, CompareError> {
        self.apply(Relation::Equal, args)
    }

    pub fn unequal(&self, args: &[Value]) -> Result<Value, CompareError> {
        self.apply(Relation::Unequal, args)
    }

    pub fn compare(&self, args: &[Value]) -> Result<Value, CompareError> {
        check_arity("compare", args)?;
        evaluate_compare(&args[0], &args[1], &self.config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_arity() {
        let engine = Engine::new();
        for n in [0, 1, 3] {
            let args = vec![Value::Number(1.0); n];
            let err = engine.smaller(&args).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Arity);
        }
        assert_eq!(
            engine.compare(&[Value::Null]).unwrap_err().to_string(),
            "compare: wrong number of arguments (expected 2, got 1)"
        );
    }

    #[test]
    fn test_configure_swaps_snapshot() {
        let engine = Engine::new();
        let before = engine.config();
        engine.set_epsilon(1e-2).unwrap();
        assert_eq!(before.epsilon, crate::config::DEFAULT_EPSILON);
        assert_eq!(engine.config().epsilon, 1e-2);
        assert!(engine.set_epsilon(-1.0).is_err());
        assert_eq!(engine.config().epsilon, 1e-2);
    }

    #[test]
    fn test_call_by_name() {
        let engine = Engine::new();
        let args = [Value::Number(1.0), Value::Number(2.0)];
        assert_eq!(engine.call("smallerEq", &args).unwrap(), Value::Boolean(true));
        assert_eq!(engine.call("compare", &args).unwrap(), Value::Number(-1.0));
        assert_eq!(
            engine.call("smallest", &args).unwrap_err(),
            CompareError::UnknownFunction("smallest".into())
        );
    }

    #[test]
    fn test_with_config_validates() {
        assert!(Engine::with_config(Config { epsilon: 0.0 }).is_err());
        let engine = Engine::with_config(Config { epsilon: 1e-3 }).unwrap();
        assert_eq!(engine.config().epsilon, 1e-3);
    }
}
