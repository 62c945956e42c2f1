//! The library contract.
//!
//! A library owns a fixed set of function names. The compiler hands it a
//! name plus the compiled arguments and gets back either an executable
//! [`Fragment`] or [`NotImplemented`]. Resolution builds code; it never runs
//! it.

use crate::{CompiledUnit, Fragment};
use std::sync::Arc;
use thiserror::Error;

/// Signal returned by [`Library::resolve`] for names outside the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("not implemented")]
pub struct NotImplemented;

/// A pluggable function library.
pub trait Library: Send + Sync {
    /// The name the library is registered under by default.
    fn name(&self) -> &str;

    /// Every function name this library resolves.
    ///
    /// Used for listings and [`Library::implements`]. Resolution itself
    /// always goes through [`Library::resolve`].
    fn functions(&self) -> Vec<&str>;

    /// Returns true if `function` is one of [`Library::functions`].
    fn implements(&self, function: &str) -> bool {
        self.functions().contains(&function)
    }

    /// Bind `function` to `args`.
    ///
    /// Must return [`NotImplemented`] for unknown names and must not run
    /// anything.
    fn resolve(&self, function: &str, args: Vec<CompiledUnit>)
    -> Result<Fragment, NotImplemented>;
}

/// Constructor exported by dynamically loaded libraries.
///
/// Plug-in crates export one with [`declare_library!`](crate::declare_library)
/// under the symbol returned by [`entry_point`].
pub type LibraryConstructor = fn() -> Box<dyn Library>;

/// Symbol name of the constructor for the library registered as `name`.
///
/// ```
/// assert_eq!(rhizome_tendril_runtime_interp::entry_point("math"), "tendril_math_library");
/// ```
pub fn entry_point(name: &str) -> String {
    format!("tendril_{}_library", name)
}

/// Export a [`LibraryConstructor`] from a plug-in crate.
///
/// The symbol must follow [`entry_point`]: a library loaded as `math` exports
/// `tendril_math_library`.
///
/// ```ignore
/// rhizome_tendril_runtime_interp::declare_library!(tendril_math_library, MathLibrary);
/// ```
#[macro_export]
macro_rules! declare_library {
    ($symbol:ident, $library:expr) => {
        #[unsafe(no_mangle)]
        pub fn $symbol() -> ::std::boxed::Box<dyn $crate::Library> {
            ::std::boxed::Box::new($library)
        }
    };
}

/// Several libraries tried in order; the first one whose `resolve` accepts a
/// name wins.
pub struct LibraryChain {
    name: String,
    libraries: Vec<Arc<dyn Library>>,
}

impl LibraryChain {
    pub fn new(name: impl Into<String>, libraries: Vec<Arc<dyn Library>>) -> Self {
        Self {
            name: name.into(),
            libraries,
        }
    }
}

impl Library for LibraryChain {
    fn name(&self) -> &str {
        &self.name
    }

    fn functions(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for library in &self.libraries {
            for function in library.functions() {
                if !names.contains(&function) {
                    names.push(function);
                }
            }
        }
        names
    }

    fn implements(&self, function: &str) -> bool {
        self.libraries.iter().any(|library| library.implements(function))
    }

    fn resolve(
        &self,
        function: &str,
        args: Vec<CompiledUnit>,
    ) -> Result<Fragment, NotImplemented> {
        let Some((last, rest)) = self.libraries.split_last() else {
            return Err(NotImplemented);
        };
        for library in rest {
            if let Ok(fragment) = library.resolve(function, args.clone()) {
                return Ok(fragment);
            }
        }
        last.resolve(function, args)
    }
}
