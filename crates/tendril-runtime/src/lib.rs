//! Runtime for Tendril.
//!
//! Ties the reader, the compiler and the evaluator together behind
//! [`Runtime`], builds the default library registry and loads plug-in
//! libraries from shared objects.
//!
//! ```
//! use rhizome_tendril_runtime::{NoTrace, Runtime};
//! use rhizome_tendril_runtime_interp::Value;
//!
//! let runtime = Runtime::new();
//! let value = runtime.run("(add 1 (first [2 3]))", "core", &mut NoTrace).unwrap();
//! assert_eq!(value, Value::Number(3.0));
//! ```

pub mod config;
pub mod plugin_loader;
mod runtime;
mod trace;

pub use config::{ConfigError, PluginConfig, RuntimeConfig};
pub use plugin_loader::{PluginError, load_plugin};
pub use runtime::{CORE, RunError, Runtime, default_registry};
pub use trace::{Artifact, COMPILE, LogTracer, NoTrace, PARSE, TraceHalt, TraceHook};
