//! Library registry.
//!
//! Maps library names to units that can be probed for the library contract.
//! Nothing is cached: every [`LibraryRegistry::resolve`] performs the
//! existence check and the contract probe again, so a library removed or
//! replaced between compilations is always noticed.

use crate::{CompileError, Library};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// A registry entry.
///
/// Native libraries always conform. Dynamically loaded units may exist
/// without exporting the contract; their probe returns `None`.
pub trait LibraryUnit: Send + Sync {
    /// Probe the unit for the library contract.
    fn probe(&self) -> Option<Arc<dyn Library>>;
}

struct NativeUnit(Arc<dyn Library>);

impl LibraryUnit for NativeUnit {
    fn probe(&self) -> Option<Arc<dyn Library>> {
        Some(self.0.clone())
    }
}

/// Named libraries available to the compiler.
#[derive(Default)]
pub struct LibraryRegistry {
    units: BTreeMap<String, Box<dyn LibraryUnit>>,
}

impl LibraryRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a library under its own name, replacing any previous entry.
    pub fn register(&mut self, library: impl Library + 'static) {
        let name = library.name().to_string();
        self.register_as(name, Arc::new(library));
    }

    /// Register a shared library under `name`.
    pub fn register_as(&mut self, name: impl Into<String>, library: Arc<dyn Library>) {
        self.register_unit(name, Box::new(NativeUnit(library)));
    }

    /// Register an arbitrary unit under `name`.
    pub fn register_unit(&mut self, name: impl Into<String>, unit: Box<dyn LibraryUnit>) {
        let name = name.into();
        debug!(library = %name, "registering library");
        self.units.insert(name, unit);
    }

    /// Remove a library. Returns true if it was registered.
    pub fn unregister(&mut self, name: &str) -> bool {
        self.units.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.units.keys().map(String::as_str).collect()
    }

    /// Look up `name` and probe it for the contract.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Library>, CompileError> {
        let unit = self
            .units
            .get(name)
            .ok_or_else(|| CompileError::LibraryNotFound {
                name: name.to_string(),
            })?;
        unit.probe()
            .ok_or_else(|| CompileError::LibraryContractViolation {
                name: name.to_string(),
            })
    }
}
