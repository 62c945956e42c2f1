//! Node types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The syntactic category of a node.
///
/// Used in diagnostics: an unresolved call reports the kind of its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Number,
    Symbol,
    String,
    List,
    Form,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Number => "number",
            NodeKind::Symbol => "symbol",
            NodeKind::String => "string",
            NodeKind::List => "list",
            NodeKind::Form => "form",
        };
        f.write_str(name)
    }
}

/// A parse-tree node.
///
/// Nodes are produced once by a reader (or deserialised from JSON) and are
/// read-only afterwards. Leaves remember the 1-based source line they came
/// from; lists and forms derive their line from their first leaf.
///
/// ```
/// use rhizome_tendril_ir::{Node, NodeKind};
///
/// let n = Node::number(3, 42);
/// assert_eq!(n.kind(), NodeKind::Number);
/// assert_eq!(n.line(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    /// Numeric literal.
    Number { line: usize, value: f64 },
    /// Identifier, either a call head or literal data.
    Symbol { line: usize, name: String },
    /// String literal.
    String { line: usize, value: String },
    /// List literal. Never compiled as a call.
    List(Vec<Node>),
    /// Call form: the first element is the head, the rest are parameters.
    Form(Vec<Node>),
}

impl Node {
    /// Creates a number leaf.
    pub fn number(line: usize, value: impl Into<f64>) -> Self {
        Node::Number {
            line,
            value: value.into(),
        }
    }

    /// Creates a symbol leaf.
    pub fn symbol(line: usize, name: impl Into<String>) -> Self {
        Node::Symbol {
            line,
            name: name.into(),
        }
    }

    /// Creates a string leaf.
    pub fn string(line: usize, value: impl Into<String>) -> Self {
        Node::String {
            line,
            value: value.into(),
        }
    }

    /// Creates a list literal.
    pub fn list(elements: Vec<Node>) -> Self {
        Node::List(elements)
    }

    /// Creates a form from raw items.
    pub fn form(items: Vec<Node>) -> Self {
        Node::Form(items)
    }

    /// Creates a call form with a symbol head on `line`.
    pub fn call(line: usize, head: impl Into<String>, args: Vec<Node>) -> Self {
        let mut items = Vec::with_capacity(args.len() + 1);
        items.push(Node::symbol(line, head));
        items.extend(args);
        Node::Form(items)
    }

    /// Returns the syntactic kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Number { .. } => NodeKind::Number,
            Node::Symbol { .. } => NodeKind::Symbol,
            Node::String { .. } => NodeKind::String,
            Node::List(_) => NodeKind::List,
            Node::Form(_) => NodeKind::Form,
        }
    }

    /// Returns the source line of this node.
    ///
    /// Lists and forms report the line of their first leaf; an empty list or
    /// form has no line.
    pub fn line(&self) -> Option<usize> {
        match self {
            Node::Number { line, .. } | Node::Symbol { line, .. } | Node::String { line, .. } => {
                Some(*line)
            }
            Node::List(items) | Node::Form(items) => items.iter().find_map(Node::line),
        }
    }

    /// Returns the symbol name if this is a symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Node::Symbol { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Returns the items if this is a form.
    pub fn as_form(&self) -> Option<&[Node]> {
        match self {
            Node::Form(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the elements if this is a list literal.
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns true if this is a form.
    pub fn is_form(&self) -> bool {
        matches!(self, Node::Form(_))
    }

    /// Returns the head symbol if this is a form with a symbol head.
    pub fn head_symbol(&self) -> Option<&str> {
        self.as_form()?.first()?.as_symbol()
    }

    /// Returns the parameters (everything after the head) if this is a
    /// non-empty form.
    pub fn params(&self) -> Option<&[Node]> {
        match self.as_form()? {
            [] => None,
            [_, rest @ ..] => Some(rest),
        }
    }

    /// Returns true if this is a form whose head is the symbol `name`.
    pub fn is_headed_by(&self, name: &str) -> bool {
        self.head_symbol() == Some(name)
    }
}
