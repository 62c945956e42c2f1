//! Source-like rendering of nodes.
//!
//! The rendering is part of the diagnostic contract: unresolved-call errors
//! quote their parameters with [`render_params`], so the output must stay
//! stable across runs. Numbers print in their shortest `f64` form, not as
//! they were written: `1.0` renders as `1` and `2.50` as `2.5`.

use crate::Node;
use std::fmt;

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number { value, .. } => write!(f, "{}", value),
            Node::Symbol { name, .. } => f.write_str(name),
            Node::String { value, .. } => f.write_str(value),
            Node::List(items) => write_seq(f, "[", items, "]"),
            Node::Form(items) => write_seq(f, "(", items, ")"),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Node], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(close)
}

/// Render uncompiled parameter nodes as `(p1 p2 ...)`.
///
/// ```
/// use rhizome_tendril_ir::{Node, render_params};
///
/// let params = vec![
///     Node::call(1, "add", vec![Node::number(1, 1), Node::number(1, 2)]),
///     Node::number(1, 1),
/// ];
/// assert_eq!(render_params(&params), "((add 1 2) 1)");
/// ```
pub fn render_params(params: &[Node]) -> String {
    let rendered: Vec<String> = params.iter().map(ToString::to_string).collect();
    format!("({})", rendered.join(" "))
}
