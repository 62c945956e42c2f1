//! Compile and evaluation errors.

use rhizome_tendril_ir::NodeKind;
use thiserror::Error;

/// Errors that can occur during compilation.
///
/// All of these are deterministic functions of the input; the first error
/// met while compiling a sub-node aborts the whole compilation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error(
        "unresolved call: {kind} '{name}' on line {line} with {arg_count} argument(s) {arg_repr}"
    )]
    UnresolvedCall {
        kind: NodeKind,
        name: String,
        line: usize,
        arg_count: usize,
        arg_repr: String,
    },

    #[error("library not found: {name}")]
    LibraryNotFound { name: String },

    #[error("library '{name}' does not implement the library contract")]
    LibraryContractViolation { name: String },

    #[error("eval on line {line} expects code captured by proc, found {found}")]
    EvalTargetNotDeferred { line: usize, found: &'static str },

    #[error("empty form")]
    EmptyForm,

    #[error("nesting deeper than {limit} levels near line {line}")]
    NestingTooDeep { line: usize, limit: usize },

    #[error("evaluation failed during eval: {0}")]
    Evaluation(#[from] EvalError),
}

/// Errors raised by library functions while a fragment runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("{function}: {message}")]
    Function { function: String, message: String },

    #[error("{function}: expected {expected} argument(s), got {got}")]
    Arity {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error("{function}: argument {position} must be a {expected}, found {found}")]
    Type {
        function: String,
        position: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("fragment nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl EvalError {
    pub fn function(function: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::Function {
            function: function.into(),
            message: message.into(),
        }
    }

    pub fn arity(function: impl Into<String>, expected: usize, got: usize) -> Self {
        EvalError::Arity {
            function: function.into(),
            expected,
            got,
        }
    }

    pub fn type_mismatch(
        function: impl Into<String>,
        position: usize,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        EvalError::Type {
            function: function.into(),
            position,
            expected,
            found,
        }
    }
}
