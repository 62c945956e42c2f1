//! Compiler and evaluator for Tendril.
//!
//! Compiles parse trees against a pluggable [`Library`] into an owned
//! intermediate representation ([`Fragment`]) and executes it with the
//! [`Evaluator`]. Quoting (`proc`) and staged evaluation (`eval`) are handled
//! structurally by the [`Compiler`] and never reach a library.

mod compiler;
mod error;
mod evaluator;
mod fragment;
mod library;
mod registry;
mod value;

pub use compiler::Compiler;
pub use error::{CompileError, EvalError};
pub use evaluator::Evaluator;
pub use fragment::{Call, CompiledUnit, Fragment, NativeFn};
pub use library::{Library, LibraryChain, LibraryConstructor, NotImplemented, entry_point};
pub use registry::{LibraryRegistry, LibraryUnit};
pub use value::Value;

use rhizome_tendril_ir::Node;
use thiserror::Error;

/// Deepest nesting of forms and lists the compiler and evaluator accept.
///
/// Both recurse once per level; deeper trees fail with a `NestingTooDeep`
/// error instead of exhausting the stack.
pub const MAX_NESTING: usize = 128;

/// Errors that can occur during execution.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("compilation error: {0}")]
    Compile(#[from] CompileError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

/// Compile a node against `library` and evaluate it.
///
/// Captured code (`proc` at the top level) is returned as
/// [`Value::Deferred`] without being run.
pub fn execute(
    node: &Node,
    registry: &LibraryRegistry,
    library: &str,
) -> Result<Value, ExecutionError> {
    let unit = Compiler::new(registry).compile(node, library)?;
    let value = Evaluator::new().evaluate_unit(&unit)?;
    Ok(value)
}
