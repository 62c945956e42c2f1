//! Node tree to fragment compilation.
//!
//! Dispatch on the head of a form, in priority order:
//!
//! 1. `(eval (proc code...))` compiles `code` directly (static unwrap).
//! 2. `(eval expr)` compiles and runs `expr`, which must produce code
//!    captured by `proc`, then compiles and runs that code.
//! 3. `(proc code...)` captures `code` uncompiled.
//! 4. Anything else is resolved against the named library.

use crate::{
    CompileError, CompiledUnit, Evaluator, Fragment, LibraryRegistry, MAX_NESTING, NotImplemented,
    Value,
};
use rhizome_tendril_ir::{EVAL, Node, PROC, render_params};
use tracing::{debug, trace};

/// Compiles nodes against libraries from a registry.
pub struct Compiler<'r> {
    registry: &'r LibraryRegistry,
    evaluator: Evaluator,
}

impl<'r> Compiler<'r> {
    pub fn new(registry: &'r LibraryRegistry) -> Self {
        Self {
            registry,
            evaluator: Evaluator::new(),
        }
    }

    /// Compile a node against the library registered as `library`.
    ///
    /// Literal nodes compile to constants without consulting the library.
    pub fn compile(&self, node: &Node, library: &str) -> Result<CompiledUnit, CompileError> {
        self.compile_at(node, library, 0)
    }

    /// Compile code captured by `proc`.
    ///
    /// A sequence with a symbol head is a form. A lone non-symbol node is
    /// compiled as itself, so `(proc (add 1 2))` and `(proc 42)` both run
    /// through `eval`.
    pub fn compile_code(&self, code: &[Node], library: &str) -> Result<CompiledUnit, CompileError> {
        self.compile_code_at(code, library, 0)
    }

    /// Compile a call parameter to a value-producing unit.
    ///
    /// Symbols and list literals are data and are never resolved as calls;
    /// nested forms are compiled so they run before the enclosing call.
    pub fn value_of(&self, node: &Node, library: &str) -> Result<CompiledUnit, CompileError> {
        self.value_of_at(node, library, 0)
    }

    fn compile_at(
        &self,
        node: &Node,
        library: &str,
        depth: usize,
    ) -> Result<CompiledUnit, CompileError> {
        match node {
            Node::Form(items) => self.compile_form(items, library, depth),
            other => self.value_of_at(other, library, depth),
        }
    }

    fn compile_code_at(
        &self,
        code: &[Node],
        library: &str,
        depth: usize,
    ) -> Result<CompiledUnit, CompileError> {
        match code {
            [] => Err(CompileError::EmptyForm),
            [single] if single.as_symbol().is_none() => self.compile_at(single, library, depth),
            _ => self.compile_form(code, library, depth),
        }
    }

    fn value_of_at(
        &self,
        node: &Node,
        library: &str,
        depth: usize,
    ) -> Result<CompiledUnit, CompileError> {
        trace!(kind = %node.kind(), depth, "value_of");
        let unit = match node {
            Node::Number { value, .. } => literal(Value::Number(*value)),
            Node::Symbol { name, .. } => literal(Value::Symbol(name.clone())),
            Node::String { value, .. } => literal(Value::String(value.clone())),
            Node::List(elements) => {
                let depth = descend(elements, depth)?;
                let units = elements
                    .iter()
                    .map(|element| self.value_of_at(element, library, depth))
                    .collect::<Result<Vec<_>, _>>()?;
                CompiledUnit::Program(Fragment::List(units))
            }
            Node::Form(items) => self.compile_form(items, library, depth)?,
        };
        Ok(unit)
    }

    fn compile_form(
        &self,
        items: &[Node],
        library: &str,
        depth: usize,
    ) -> Result<CompiledUnit, CompileError> {
        let Some((head, params)) = items.split_first() else {
            return Err(CompileError::EmptyForm);
        };
        let depth = descend(items, depth)?;

        match (head.as_symbol(), params) {
            (Some(EVAL), [target]) => self.compile_eval(target, library, depth),
            (Some(PROC), _) => Ok(CompiledUnit::Deferred(params.to_vec())),
            _ => self.compile_call(head, params, library, depth),
        }
    }

    fn compile_eval(
        &self,
        target: &Node,
        library: &str,
        depth: usize,
    ) -> Result<CompiledUnit, CompileError> {
        if target.is_headed_by(PROC) {
            debug!(line = ?target.line(), "unwrapping literal proc under eval");
            return self.compile_code_at(target.params().unwrap_or_default(), library, depth);
        }

        let staged = self.value_of_at(target, library, depth)?;
        let value = self.evaluator.evaluate_unit(&staged)?;
        let code = match value {
            Value::Deferred(code) => code,
            other => {
                return Err(CompileError::EvalTargetNotDeferred {
                    line: target.line().unwrap_or_default(),
                    found: other.type_name(),
                });
            }
        };

        debug!(nodes = code.len(), "running staged code");
        match self.compile_code_at(&code, library, depth)? {
            CompiledUnit::Program(fragment) => {
                let result = self.evaluator.evaluate(&fragment)?;
                Ok(CompiledUnit::from_value(result))
            }
            deferred => Ok(deferred),
        }
    }

    fn compile_call(
        &self,
        head: &Node,
        params: &[Node],
        library: &str,
        depth: usize,
    ) -> Result<CompiledUnit, CompileError> {
        let resolved = self.registry.resolve(library)?;

        let args = params
            .iter()
            .map(|param| self.value_of_at(param, library, depth))
            .collect::<Result<Vec<_>, _>>()?;

        let name = head.to_string();
        match resolved.resolve(&name, args) {
            Ok(fragment) => {
                debug!(function = %name, library, "resolved call");
                Ok(CompiledUnit::Program(fragment))
            }
            Err(NotImplemented) => Err(CompileError::UnresolvedCall {
                kind: head.kind(),
                name,
                line: head.line().unwrap_or_default(),
                arg_count: params.len(),
                arg_repr: render_params(params),
            }),
        }
    }
}

/// Depth for the children of a list or form, or an error past [`MAX_NESTING`].
fn descend(items: &[Node], depth: usize) -> Result<usize, CompileError> {
    if depth >= MAX_NESTING {
        return Err(CompileError::NestingTooDeep {
            line: items.iter().find_map(Node::line).unwrap_or_default(),
            limit: MAX_NESTING,
        });
    }
    Ok(depth + 1)
}

fn literal(value: Value) -> CompiledUnit {
    CompiledUnit::Program(Fragment::Literal(value))
}
