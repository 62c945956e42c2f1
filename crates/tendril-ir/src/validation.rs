//! Structural validation for node trees.

use crate::Node;
use thiserror::Error;

/// Errors that can occur during validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("empty form near line {}", describe_line(.line))]
    EmptyForm { line: Option<usize> },

    #[error("non-finite number on line {line}")]
    NonFiniteNumber { line: usize },

    #[error("line numbers must start at 1, found 0")]
    ZeroLine,
}

/// Validate a node tree for structural correctness.
///
/// This performs basic validation:
/// - Forms must not be empty
/// - Numbers must be finite
/// - Leaf lines are 1-based
///
/// Note: This does NOT check that call heads resolve. That requires a
/// library and is done by the compiler.
pub fn validate(node: &Node) -> Result<(), ValidationError> {
    validate_at(node, None)
}

fn validate_at(node: &Node, enclosing_line: Option<usize>) -> Result<(), ValidationError> {
    match node {
        Node::Number { line, value } => {
            check_line(*line)?;
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteNumber { line: *line });
            }
            Ok(())
        }
        Node::Symbol { line, .. } | Node::String { line, .. } => check_line(*line),
        Node::List(items) => {
            let line = node.line().or(enclosing_line);
            items.iter().try_for_each(|item| validate_at(item, line))
        }
        Node::Form(items) => {
            if items.is_empty() {
                return Err(ValidationError::EmptyForm {
                    line: enclosing_line,
                });
            }
            let line = node.line().or(enclosing_line);
            items.iter().try_for_each(|item| validate_at(item, line))
        }
    }
}

fn describe_line(line: &Option<usize>) -> String {
    line.map_or_else(|| "?".to_string(), |l| l.to_string())
}

fn check_line(line: usize) -> Result<(), ValidationError> {
    if line == 0 {
        Err(ValidationError::ZeroLine)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_literals() {
        assert!(validate(&Node::number(1, 42)).is_ok());
        assert!(validate(&Node::symbol(1, "x")).is_ok());
        assert!(validate(&Node::string(1, "hello")).is_ok());
        assert!(validate(&Node::list(vec![])).is_ok());
    }

    #[test]
    fn test_validate_nested_call() {
        let expr = Node::call(
            1,
            "sub",
            vec![
                Node::call(1, "add", vec![Node::number(1, 1), Node::number(1, 2)]),
                Node::number(2, 1),
            ],
        );
        assert!(validate(&expr).is_ok());
    }

    #[test]
    fn test_validate_empty_form_reports_enclosing_line() {
        let expr = Node::call(4, "first", vec![Node::form(vec![])]);
        assert_eq!(
            validate(&expr),
            Err(ValidationError::EmptyForm { line: Some(4) })
        );
        assert_eq!(
            validate(&Node::form(vec![])),
            Err(ValidationError::EmptyForm { line: None })
        );
    }

    #[test]
    fn test_validate_rejects_non_finite_numbers() {
        let expr = Node::list(vec![Node::number(2, f64::NAN)]);
        assert_eq!(
            validate(&expr),
            Err(ValidationError::NonFiniteNumber { line: 2 })
        );
    }

    #[test]
    fn test_validate_rejects_zero_line() {
        assert_eq!(
            validate(&Node::symbol(0, "x")),
            Err(ValidationError::ZeroLine)
        );
    }
}
