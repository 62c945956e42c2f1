//! Stage observation.

use rhizome_tendril_ir::Node;
use rhizome_tendril_runtime_interp::CompiledUnit;
use thiserror::Error;
use tracing::info;

/// Label passed after the source has been read.
pub const PARSE: &str = "parse";
/// Label passed after each top-level expression has been compiled.
pub const COMPILE: &str = "compile";

/// What a stage produced.
#[derive(Debug, Clone, Copy)]
pub enum Artifact<'a> {
    Parsed(&'a [Node]),
    Compiled(&'a CompiledUnit),
}

/// Returned by a hook to stop the run.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct TraceHalt(pub String);

impl TraceHalt {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Observer called between stages.
///
/// Hooks see artifacts but cannot change them. Returning an error halts the
/// run.
pub trait TraceHook {
    fn observe(&mut self, label: &str, artifact: &Artifact<'_>) -> Result<(), TraceHalt>;
}

impl<F> TraceHook for F
where
    F: FnMut(&str, &Artifact<'_>) -> Result<(), TraceHalt>,
{
    fn observe(&mut self, label: &str, artifact: &Artifact<'_>) -> Result<(), TraceHalt> {
        self(label, artifact)
    }
}

/// The default hook. Does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl TraceHook for NoTrace {
    fn observe(&mut self, _label: &str, _artifact: &Artifact<'_>) -> Result<(), TraceHalt> {
        Ok(())
    }
}

/// Logs every artifact through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl TraceHook for LogTracer {
    fn observe(&mut self, label: &str, artifact: &Artifact<'_>) -> Result<(), TraceHalt> {
        match artifact {
            Artifact::Parsed(nodes) => {
                for node in nodes.iter() {
                    info!(stage = label, node = %node, "parsed");
                }
            }
            Artifact::Compiled(unit) => info!(stage = label, unit = ?unit, "compiled"),
        }
        Ok(())
    }
}
