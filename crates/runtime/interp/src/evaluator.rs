//! Fragment evaluation.

use crate::{CompiledUnit, EvalError, Fragment, MAX_NESTING, Value};
use tracing::trace;

/// Executes compiled fragments.
///
/// Arguments are evaluated left to right before the call that receives them.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    /// Run a fragment to its value.
    pub fn evaluate(&self, fragment: &Fragment) -> Result<Value, EvalError> {
        self.evaluate_at(fragment, 0)
    }

    /// Run a unit. Deferred code becomes a [`Value::Deferred`] without
    /// being compiled.
    pub fn evaluate_unit(&self, unit: &CompiledUnit) -> Result<Value, EvalError> {
        self.evaluate_unit_at(unit, 0)
    }

    fn evaluate_at(&self, fragment: &Fragment, depth: usize) -> Result<Value, EvalError> {
        match fragment {
            Fragment::Literal(value) => Ok(value.clone()),
            Fragment::List(units) => self.evaluate_all(units, descend(depth)?).map(Value::List),
            Fragment::Call(call) => {
                let args = self.evaluate_all(&call.args, descend(depth)?)?;
                trace!(library = %call.library, function = %call.function, args = args.len(), "call");
                call.invoke(&args)
            }
        }
    }

    fn evaluate_unit_at(&self, unit: &CompiledUnit, depth: usize) -> Result<Value, EvalError> {
        match unit {
            CompiledUnit::Program(fragment) => self.evaluate_at(fragment, depth),
            CompiledUnit::Deferred(code) => Ok(Value::Deferred(code.clone())),
        }
    }

    fn evaluate_all(&self, units: &[CompiledUnit], depth: usize) -> Result<Vec<Value>, EvalError> {
        units
            .iter()
            .map(|unit| self.evaluate_unit_at(unit, depth))
            .collect()
    }
}

fn descend(depth: usize) -> Result<usize, EvalError> {
    if depth >= MAX_NESTING {
        return Err(EvalError::NestingTooDeep { limit: MAX_NESTING });
    }
    Ok(depth + 1)
}
