//! Arithmetic library for Tendril.
//!
//! Every function takes numbers. There is no `sub`; write `(add a (neg b))`.
//!
//! Linked statically this is registered as `math`. Built as a `cdylib` it
//! exports `tendril_math_library` and can be loaded as a plug-in under the
//! name `math`.

use rhizome_tendril_runtime_interp::{
    CompiledUnit, EvalError, Fragment, Library, NativeFn, NotImplemented, Value, declare_library,
};

const FUNCTIONS: &[&str] = &["add", "mul", "neg", "abs", "div", "mod", "min", "max", "pow"];

/// The `math` library.
#[derive(Debug, Default, Clone, Copy)]
pub struct MathLibrary;

impl Library for MathLibrary {
    fn name(&self) -> &str {
        "math"
    }

    fn functions(&self) -> Vec<&str> {
        FUNCTIONS.to_vec()
    }

    fn resolve(
        &self,
        function: &str,
        args: Vec<CompiledUnit>,
    ) -> Result<Fragment, NotImplemented> {
        let func: NativeFn = match function {
            "add" => add,
            "mul" => mul,
            "neg" => neg,
            "abs" => abs,
            "div" => div,
            "mod" => modulo,
            "min" => min,
            "max" => max,
            "pow" => pow,
            _ => return Err(NotImplemented),
        };
        Ok(Fragment::call(self.name(), function, func, args))
    }
}

declare_library!(tendril_math_library, MathLibrary);

fn numbers(function: &str, args: &[Value]) -> Result<Vec<f64>, EvalError> {
    args.iter()
        .enumerate()
        .map(|(position, arg)| {
            arg.as_number().ok_or_else(|| {
                EvalError::type_mismatch(function, position, "number", arg.type_name())
            })
        })
        .collect()
}

fn unary(function: &str, args: &[Value]) -> Result<f64, EvalError> {
    match numbers(function, args)?.as_slice() {
        [x] => Ok(*x),
        _ => Err(EvalError::arity(function, 1, args.len())),
    }
}

fn binary(function: &str, args: &[Value]) -> Result<(f64, f64), EvalError> {
    match numbers(function, args)?.as_slice() {
        [a, b] => Ok((*a, *b)),
        _ => Err(EvalError::arity(function, 2, args.len())),
    }
}

fn add(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(numbers("add", args)?.into_iter().sum()))
}

fn mul(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Number(numbers("mul", args)?.into_iter().product()))
}

fn neg(args: &[Value]) -> Result<Value, EvalError> {
    unary("neg", args).map(|x| Value::Number(-x))
}

fn abs(args: &[Value]) -> Result<Value, EvalError> {
    unary("abs", args).map(|x| Value::Number(x.abs()))
}

fn div(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = binary("div", args)?;
    if b == 0.0 {
        return Err(EvalError::function("div", "division by zero"));
    }
    Ok(Value::Number(a / b))
}

/// Remainder with the sign of the dividend.
fn modulo(args: &[Value]) -> Result<Value, EvalError> {
    let (a, b) = binary("mod", args)?;
    if b == 0.0 {
        return Err(EvalError::function("mod", "division by zero"));
    }
    Ok(Value::Number(a % b))
}

fn extremum(
    function: &str,
    args: &[Value],
    pick: fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    numbers(function, args)?
        .into_iter()
        .reduce(pick)
        .map(Value::Number)
        .ok_or_else(|| EvalError::function(function, "expected at least one argument"))
}

fn min(args: &[Value]) -> Result<Value, EvalError> {
    extremum("min", args, f64::min)
}

fn max(args: &[Value]) -> Result<Value, EvalError> {
    extremum("max", args, f64::max)
}

fn pow(args: &[Value]) -> Result<Value, EvalError> {
    let (base, exponent) = binary("pow", args)?;
    Ok(Value::Number(base.powf(exponent)))
}

#[cfg(test)]
mod tests;
