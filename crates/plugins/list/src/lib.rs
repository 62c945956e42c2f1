//! List library for Tendril.
//!
//! Lists are immutable; every function returns a new value.

use rhizome_tendril_runtime_interp::{
    CompiledUnit, EvalError, Fragment, Library, NativeFn, NotImplemented, Value, declare_library,
};

const FUNCTIONS: &[&str] = &[
    "list", "first", "rest", "nth", "len", "cons", "concat", "reverse", "empty?",
];

/// The `list` library.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListLibrary;

impl Library for ListLibrary {
    fn name(&self) -> &str {
        "list"
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
            "list" => list,
            "first" => first,
            "rest" => rest,
            "nth" => nth,
            "len" => len,
            "cons" => cons,
            "concat" => concat,
            "reverse" => reverse,
            "empty?" => is_empty,
            _ => return Err(NotImplemented),
        };
        Ok(Fragment::call(self.name(), function, func, args))
    }
}

declare_library!(tendril_list_library, ListLibrary);

fn items<'a>(function: &str, position: usize, value: &'a Value) -> Result<&'a [Value], EvalError> {
    value
        .as_list()
        .ok_or_else(|| EvalError::type_mismatch(function, position, "list", value.type_name()))
}

fn single<'a>(function: &str, args: &'a [Value]) -> Result<&'a [Value], EvalError> {
    match args {
        [value] => items(function, 0, value),
        _ => Err(EvalError::arity(function, 1, args.len())),
    }
}

fn list(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::List(args.to_vec()))
}

fn first(args: &[Value]) -> Result<Value, EvalError> {
    single("first", args)?
        .first()
        .cloned()
        .ok_or_else(|| EvalError::function("first", "empty list"))
}

fn rest(args: &[Value]) -> Result<Value, EvalError> {
    let list = single("rest", args)?;
    Ok(Value::List(list.iter().skip(1).cloned().collect()))
}

fn nth(args: &[Value]) -> Result<Value, EvalError> {
    let [list, index] = args else {
        return Err(EvalError::arity("nth", 2, args.len()));
    };
    let list = items("nth", 0, list)?;
    let index = match index.as_number() {
        Some(n) if n >= 0.0 && n.fract() == 0.0 => n as usize,
        Some(n) => return Err(EvalError::function("nth", format!("invalid index {}", n))),
        None => return Err(EvalError::type_mismatch("nth", 1, "number", index.type_name())),
    };
    list.get(index).cloned().ok_or_else(|| {
        EvalError::function(
            "nth",
            format!("index {} out of range for list of length {}", index, list.len()),
        )
    })
}

/// Length of a list, or the character count of a string.
fn len(args: &[Value]) -> Result<Value, EvalError> {
    match args {
        [Value::List(list)] => Ok(Value::Number(list.len() as f64)),
        [Value::String(s)] => Ok(Value::Number(s.chars().count() as f64)),
        [other] => Err(EvalError::type_mismatch("len", 0, "list", other.type_name())),
        _ => Err(EvalError::arity("len", 1, args.len())),
    }
}

fn cons(args: &[Value]) -> Result<Value, EvalError> {
    let [head, tail] = args else {
        return Err(EvalError::arity("cons", 2, args.len()));
    };
    let tail = items("cons", 1, tail)?;
    let mut list = Vec::with_capacity(tail.len() + 1);
    list.push(head.clone());
    list.extend_from_slice(tail);
    Ok(Value::List(list))
}

fn concat(args: &[Value]) -> Result<Value, EvalError> {
    let mut joined = Vec::new();
    for (position, arg) in args.iter().enumerate() {
        joined.extend_from_slice(items("concat", position, arg)?);
    }
    Ok(Value::List(joined))
}

fn reverse(args: &[Value]) -> Result<Value, EvalError> {
    let list = single("reverse", args)?;
    Ok(Value::List(list.iter().rev().cloned().collect()))
}

fn is_empty(args: &[Value]) -> Result<Value, EvalError> {
    single("empty?", args).map(|list| Value::Bool(list.is_empty()))
}
