//! The driver: parse, compile, evaluate.

use crate::config::{ConfigError, RuntimeConfig};
use crate::plugin_loader::load_plugin;
use crate::trace::{Artifact, COMPILE, PARSE, TraceHalt, TraceHook};
use rhizome_tendril_ir::{Node, ValidationError, validate};
use rhizome_tendril_plugin_list::ListLibrary;
use rhizome_tendril_plugin_math::MathLibrary;
use rhizome_tendril_runtime_interp::{
    CompileError, CompiledUnit, Compiler, EvalError, Evaluator, LibraryChain, LibraryRegistry,
    Value,
};
use rhizome_tendril_syntax_sexpr::{ParseError, parse};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Name of the library that chains `math` and `list`.
pub const CORE: &str = "core";

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid tree: {0}")]
    Validation(#[from] ValidationError),

    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),

    #[error("halted after {stage}: {reason}")]
    Halted { stage: String, reason: TraceHalt },

    #[error("program is empty")]
    EmptyProgram,
}

/// A registry holding `math`, `list` and `core`.
pub fn default_registry() -> LibraryRegistry {
    let mut registry = LibraryRegistry::new();
    registry.register(MathLibrary);
    registry.register(ListLibrary);
    registry.register_as(
        CORE,
        Arc::new(LibraryChain::new(
            CORE,
            vec![Arc::new(MathLibrary), Arc::new(ListLibrary)],
        )),
    );
    registry
}

/// Runs programs against a library registry.
pub struct Runtime {
    registry: LibraryRegistry,
    default_library: String,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// A runtime over [`default_registry`] that defaults to `core`.
    pub fn new() -> Self {
        Self::with_registry(default_registry(), CORE)
    }

    pub fn with_registry(registry: LibraryRegistry, default_library: impl Into<String>) -> Self {
        Self {
            registry,
            default_library: default_library.into(),
        }
    }

    /// Build the default registry, then load every configured plug-in.
    pub fn from_config(config: &RuntimeConfig) -> Result<Self, ConfigError> {
        let mut registry = default_registry();
        for plugin in &config.plugins {
            load_plugin(&mut registry, &plugin.name, &plugin.path)?;
        }
        Ok(Self::with_registry(registry, config.default_library.clone()))
    }

    pub fn registry(&self) -> &LibraryRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut LibraryRegistry {
        &mut self.registry
    }

    pub fn default_library(&self) -> &str {
        &self.default_library
    }

    /// Parse and run `source` against `library`, returning the value of the
    /// last top-level expression.
    ///
    /// `hook` is called once after parsing and once after each compile.
    pub fn run(
        &self,
        source: &str,
        library: &str,
        hook: &mut dyn TraceHook,
    ) -> Result<Value, RunError> {
        let nodes = parse(source)?;
        observe(hook, PARSE, &Artifact::Parsed(&nodes))?;
        self.run_nodes(&nodes, library, hook)
    }

    /// Run already parsed nodes in order.
    ///
    /// Every node is validated before anything is compiled. Top-level `proc`
    /// yields its captured code as a [`Value::Deferred`].
    pub fn run_nodes(
        &self,
        nodes: &[Node],
        library: &str,
        hook: &mut dyn TraceHook,
    ) -> Result<Value, RunError> {
        for node in nodes {
            validate(node)?;
        }

        let compiler = Compiler::new(&self.registry);
        let evaluator = Evaluator::new();
        let mut last = None;
        for node in nodes {
            let unit = compiler.compile(node, library)?;
            observe(hook, COMPILE, &Artifact::Compiled(&unit))?;
            last = Some(evaluator.evaluate_unit(&unit)?);
        }
        last.ok_or(RunError::EmptyProgram)
    }

    /// Parse and compile `source` without evaluating the result.
    ///
    /// `eval` forms still run their staged code, since that happens at
    /// compile time.
    pub fn compile(&self, source: &str, library: &str) -> Result<Vec<CompiledUnit>, RunError> {
        self.compile_nodes(&parse(source)?, library)
    }

    /// Validate and compile already parsed nodes.
    pub fn compile_nodes(
        &self,
        nodes: &[Node],
        library: &str,
    ) -> Result<Vec<CompiledUnit>, RunError> {
        for node in nodes {
            validate(node)?;
        }
        let compiler = Compiler::new(&self.registry);
        let units = nodes
            .iter()
            .map(|node| compiler.compile(node, library))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(units = units.len(), library, "compiled source");
        Ok(units)
    }
}

fn observe(hook: &mut dyn TraceHook, label: &str, artifact: &Artifact<'_>) -> Result<(), RunError> {
    hook.observe(label, artifact).map_err(|reason| {
        warn!(stage = label, %reason, "run halted by trace hook");
        RunError::Halted {
            stage: label.to_string(),
            reason,
        }
    })
}
