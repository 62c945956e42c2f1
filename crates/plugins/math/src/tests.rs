use super::*;
use rhizome_tendril_ir::{Node, NodeKind};
use rhizome_tendril_runtime_interp::{
    CompileError, ExecutionError, LibraryRegistry, entry_point, execute,
};

fn registry() -> LibraryRegistry {
    let mut registry = LibraryRegistry::new();
    registry.register(MathLibrary);
    registry
}

fn n(value: f64) -> Node {
    Node::number(1, value)
}

fn eval(head: &str, args: Vec<Node>) -> Result<Value, ExecutionError> {
    execute(&Node::call(1, head, args), &registry(), "math")
}

fn number(head: &str, args: Vec<Node>) -> f64 {
    match eval(head, args) {
        Ok(Value::Number(x)) => x,
        other => panic!("expected a number, got {:?}", other),
    }
}

fn eval_error(head: &str, args: Vec<Node>) -> EvalError {
    match eval(head, args) {
        Err(ExecutionError::Eval(err)) => err,
        other => panic!("expected an evaluation error, got {:?}", other),
    }
}

#[test]
fn test_add() {
    assert_eq!(number("add", vec![n(1.0), n(2.0)]), 3.0);
    assert_eq!(number("add", vec![n(1.5), n(2.5), n(-1.0)]), 3.0);
    assert_eq!(number("add", vec![]), 0.0);
}

#[test]
fn test_mul() {
    assert_eq!(number("mul", vec![n(2.0), n(3.0), n(4.0)]), 24.0);
    assert_eq!(number("mul", vec![]), 1.0);
}

#[test]
fn test_neg_and_abs() {
    assert_eq!(number("neg", vec![n(3.0)]), -3.0);
    assert_eq!(number("abs", vec![n(-3.5)]), 3.5);
}

#[test]
fn test_subtraction_through_neg() {
    let expr = vec![n(10.0), Node::call(1, "neg", vec![n(4.0)])];
    assert_eq!(number("add", expr), 6.0);
}

#[test]
fn test_div_and_mod() {
    assert_eq!(number("div", vec![n(7.0), n(2.0)]), 3.5);
    assert_eq!(number("mod", vec![n(7.0), n(3.0)]), 1.0);
    assert_eq!(number("mod", vec![n(-7.0), n(3.0)]), -1.0);
}

#[test]
fn test_division_by_zero() {
    assert_eq!(
        eval_error("div", vec![n(1.0), n(0.0)]),
        EvalError::function("div", "division by zero")
    );
    assert_eq!(
        eval_error("mod", vec![n(1.0), n(0.0)]),
        EvalError::function("mod", "division by zero")
    );
}

#[test]
fn test_min_max_pow() {
    assert_eq!(number("min", vec![n(3.0), n(-1.0), n(2.0)]), -1.0);
    assert_eq!(number("max", vec![n(3.0), n(-1.0), n(2.0)]), 3.0);
    assert_eq!(number("pow", vec![n(2.0), n(10.0)]), 1024.0);
}

#[test]
fn test_min_requires_an_argument() {
    assert_eq!(
        eval_error("min", vec![]),
        EvalError::function("min", "expected at least one argument")
    );
}

#[test]
fn test_arity_errors() {
    assert_eq!(eval_error("neg", vec![]), EvalError::arity("neg", 1, 0));
    assert_eq!(
        eval_error("pow", vec![n(1.0)]),
        EvalError::arity("pow", 2, 1)
    );
}

#[test]
fn test_type_errors() {
    assert_eq!(
        eval_error("add", vec![n(1.0), Node::string(1, "two")]),
        EvalError::type_mismatch("add", 1, "number", "string")
    );
}

#[test]
fn test_sub_is_unresolved() {
    match eval("sub", vec![n(1.0), n(2.0)]) {
        Err(ExecutionError::Compile(err)) => assert_eq!(
            err,
            CompileError::UnresolvedCall {
                kind: NodeKind::Symbol,
                name: "sub".into(),
                line: 1,
                arg_count: 2,
                arg_repr: "(1 2)".into(),
            }
        ),
        other => panic!("expected an unresolved call, got {:?}", other),
    }
}

#[test]
fn test_every_listed_function_resolves() {
    for function in MathLibrary.functions() {
        assert!(MathLibrary.resolve(function, vec![]).is_ok(), "{}", function);
    }
    assert_eq!(MathLibrary.resolve("sqrt", vec![]), Err(NotImplemented));
}

#[test]
fn test_exported_constructor() {
    assert_eq!(entry_point("math"), "tendril_math_library");
    assert_eq!(tendril_math_library().name(), "math");
}
