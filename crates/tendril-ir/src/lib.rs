//! Parse-tree types for Tendril.
//!
//! This crate defines the node tree shared by the reader, the compiler and
//! the evaluator. It carries no behaviour beyond construction, inspection,
//! rendering and structural validation.
//!
//! # Node format
//!
//! A node is either:
//! - A literal leaf (number, symbol, string), tagged with its source line
//! - A list literal: `[1 2 3]`, a value and never a call
//! - A form: `(head arg ...)`, a call whose head is resolved at compile time
//!
//! Example:
//! ```
//! use rhizome_tendril_ir::Node;
//!
//! let form = Node::call(1, "add", vec![Node::number(1, 1), Node::number(1, 2)]);
//! assert_eq!(form.to_string(), "(add 1 2)");
//! ```

mod node;
mod render;
mod validation;

pub use node::{Node, NodeKind};
pub use render::render_params;
pub use validation::{ValidationError, validate};

/// Head symbol that captures its parameters as code.
pub const PROC: &str = "proc";

/// Head symbol that compiles and runs captured code.
pub const EVAL: &str = "eval";
