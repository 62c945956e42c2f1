//! S-expression reader.
//!
//! Turns source text into [`Node`](rhizome_tendril_ir::Node) trees: `(head args...)` is a form,
//! `[a b]` a list literal, and everything else a leaf that remembers its
//! 1-based source line.
//!
//! ```
//! let nodes = rhizome_tendril_syntax_sexpr::parse("(first [1 2]) ; comment").unwrap();
//! assert_eq!(nodes.len(), 1);
//! assert_eq!(nodes[0].to_string(), "(first [1 2])");
//! ```

mod lexer;
mod parser;

pub use parser::{parse, parse_one};

use thiserror::Error;

/// Errors produced while reading source text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line}: unexpected end of input, unclosed delimiter")]
    UnexpectedEof { line: usize },

    #[error("line {line}: unexpected '{found}'")]
    UnexpectedClose { line: usize, found: char },

    #[error("line {line}: expected '{expected}', found '{found}'")]
    MismatchedClose {
        line: usize,
        expected: char,
        found: char,
    },

    #[error("line {line}: unterminated string")]
    UnterminatedString { line: usize },

    #[error("line {line}: invalid escape '\\{found}'")]
    InvalidEscape { line: usize, found: char },

    #[error("expected exactly one expression, found {count}")]
    ExpectedSingle { count: usize },
}

#[cfg(test)]
mod tests;
