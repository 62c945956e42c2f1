//! Compiled representation.

use crate::{EvalError, Value};
use rhizome_tendril_ir::Node;
use std::fmt;

/// Signature of a library function.
///
/// The evaluated arguments of a call arrive as one slice.
pub type NativeFn = fn(&[Value]) -> Result<Value, EvalError>;

/// The result of compiling a node.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledUnit {
    /// Executable code.
    Program(Fragment),
    /// Raw nodes captured by `proc`; never compiled until `eval` asks.
    Deferred(Vec<Node>),
}

impl CompiledUnit {
    /// Wraps a value as a unit. Deferred values stay deferred.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Deferred(code) => CompiledUnit::Deferred(code),
            other => CompiledUnit::Program(Fragment::Literal(other)),
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, CompiledUnit::Deferred(_))
    }

    pub fn as_fragment(&self) -> Option<&Fragment> {
        match self {
            CompiledUnit::Program(fragment) => Some(fragment),
            CompiledUnit::Deferred(_) => None,
        }
    }
}

/// An executable node of the evaluator's IR.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// A constant.
    Literal(Value),
    /// A list literal whose elements are evaluated in order.
    List(Vec<CompiledUnit>),
    /// A resolved library call.
    Call(Call),
}

impl Fragment {
    /// Builds a call fragment. Libraries use this from `resolve`.
    pub fn call(
        library: impl Into<String>,
        function: impl Into<String>,
        func: NativeFn,
        args: Vec<CompiledUnit>,
    ) -> Self {
        Fragment::Call(Call {
            library: library.into(),
            function: function.into(),
            args,
            func,
        })
    }
}

/// A library function bound to its compiled arguments.
#[derive(Clone)]
pub struct Call {
    pub library: String,
    pub function: String,
    pub args: Vec<CompiledUnit>,
    func: NativeFn,
}

impl Call {
    /// Invokes the bound function with already evaluated arguments.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, EvalError> {
        (self.func)(args)
    }
}

// Calls are identified by library, function and arguments; the pointer is
// not part of the identity.
impl PartialEq for Call {
    fn eq(&self, other: &Self) -> bool {
        self.library == other.library && self.function == other.function && self.args == other.args
    }
}

impl fmt::Debug for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("library", &self.library)
            .field("function", &self.function)
            .field("args", &self.args)
            .finish()
    }
}
