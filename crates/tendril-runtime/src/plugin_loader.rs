//! Dynamic library loading.
//!
//! A plug-in is a shared object exporting a
//! [`LibraryConstructor`](rhizome_tendril_runtime_interp::LibraryConstructor)
//! under the symbol `tendril_{name}_library` (see
//! [`declare_library!`](rhizome_tendril_runtime_interp::declare_library)).
//! The object is opened once at load time; the symbol is looked up on every
//! compile, so an object without it registers fine and fails with
//! `LibraryContractViolation` when first used.

use rhizome_tendril_runtime_interp::{
    Library, LibraryConstructor, LibraryRegistry, LibraryUnit, entry_point,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("failed to load plugin '{name}' from {path}: {source}")]
    Load {
        name: String,
        path: String,
        #[source]
        source: libloading::Error,
    },
}

/// A shared object registered as a library.
///
/// Fragments compiled against a plug-in point into its code, so the unit
/// must stay registered until they are dropped.
pub struct PluginUnit {
    library: libloading::Library,
    symbol: String,
    path: PathBuf,
}

impl PluginUnit {
    /// Open the shared object at `path` for the library `name`.
    ///
    /// # Safety
    ///
    /// Opening runs the object's initialisers. The object must be a Tendril
    /// plug-in built with the same compiler as the host, or export no
    /// `tendril_{name}_library` symbol at all.
    pub unsafe fn open(name: &str, path: impl AsRef<Path>) -> Result<Self, PluginError> {
        let path = path.as_ref();
        let library = unsafe { libloading::Library::new(path) }.map_err(|source| {
            PluginError::Load {
                name: name.to_string(),
                path: path.display().to_string(),
                source,
            }
        })?;
        Ok(Self {
            library,
            symbol: entry_point(name),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LibraryUnit for PluginUnit {
    fn probe(&self) -> Option<Arc<dyn Library>> {
        let constructor =
            match unsafe { self.library.get::<LibraryConstructor>(self.symbol.as_bytes()) } {
                Ok(constructor) => constructor,
                Err(err) => {
                    debug!(symbol = %self.symbol, path = %self.path.display(), %err, "entry point missing");
                    return None;
                }
            };
        Some(Arc::from(constructor()))
    }
}

/// Load the shared object at `path` and register it as `name`.
pub fn load_plugin(
    registry: &mut LibraryRegistry,
    name: &str,
    path: impl AsRef<Path>,
) -> Result<(), PluginError> {
    // SAFETY: configured plug-ins are trusted in the same way as the host binary.
    let unit = unsafe { PluginUnit::open(name, path)? };
    info!(plugin = name, path = %unit.path().display(), "loaded plugin");
    registry.register_unit(name, Box::new(unit));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhizome_tendril_ir::{Node, NodeKind};
    use rhizome_tendril_runtime_interp::{CompileError, Compiler, Value, execute};
    use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};

    #[test]
    fn test_missing_file() {
        let mut registry = LibraryRegistry::new();
        let result = load_plugin(&mut registry, "ghost", "/nonexistent/libghost.so");
        assert!(matches!(result, Err(PluginError::Load { ref name, .. }) if name == "ghost"));
        assert!(!registry.contains("ghost"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_object_without_entry_point_violates_contract() {
        let mut registry = LibraryRegistry::new();
        load_plugin(&mut registry, "libc", "libc.so.6").unwrap();
        assert!(registry.contains("libc"));

        let expr = Node::call(1, "add", vec![Node::number(1, 1)]);
        assert_eq!(
            Compiler::new(&registry).compile(&expr, "libc"),
            Err(CompileError::LibraryContractViolation {
                name: "libc".into()
            })
        );
    }

    #[test]
    fn test_plugin_loading() {
        // Build the math plugin as a shared object first
        let status = std::process::Command::new(env!("CARGO"))
            .args(["build", "--package", "rhizome-tendril-plugin-math"])
            .status()
            .expect("Failed to build math plugin");
        assert!(status.success());

        let mut plugin_path = match std::env::var_os("CARGO_TARGET_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => {
                let mut root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
                root.pop();
                root.pop();
                root.join("target")
            }
        };
        plugin_path.push("debug");
        plugin_path.push(format!(
            "{}rhizome_tendril_plugin_math{}",
            DLL_PREFIX, DLL_SUFFIX
        ));

        let mut registry = LibraryRegistry::new();
        load_plugin(&mut registry, "math", &plugin_path).unwrap();

        let add = Node::call(1, "add", vec![Node::number(1, 1), Node::number(1, 2)]);
        assert_eq!(execute(&add, &registry, "math").unwrap(), Value::Number(3.0));

        let sub = Node::call(1, "sub", vec![Node::number(1, 1), Node::number(1, 2)]);
        assert_eq!(
            Compiler::new(&registry).compile(&sub, "math"),
            Err(CompileError::UnresolvedCall {
                kind: NodeKind::Symbol,
                name: "sub".into(),
                line: 1,
                arg_count: 2,
                arg_repr: "(1 2)".into(),
            })
        );

        let functions = registry.resolve("math").unwrap().functions().len();
        assert_eq!(functions, 9);
    }
}
