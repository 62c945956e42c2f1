//! Edge cases for the driver.

use rhizome_tendril_ir::{Node, ValidationError};
use rhizome_tendril_runtime::{NoTrace, RunError, Runtime};
use rhizome_tendril_runtime_interp::{CompileError, CompiledUnit, Fragment, Value};

#[test]
fn test_empty_program() {
    let runtime = Runtime::new();
    assert!(matches!(
        runtime.run("", "core", &mut NoTrace),
        Err(RunError::EmptyProgram)
    ));
    assert!(matches!(
        runtime.run("  ; only a comment\n", "core", &mut NoTrace),
        Err(RunError::EmptyProgram)
    ));
    assert!(matches!(
        runtime.run_nodes(&[], "core", &mut NoTrace),
        Err(RunError::EmptyProgram)
    ));
}

#[test]
fn test_empty_form_is_rejected_before_compiling() {
    let result = Runtime::new().run("(add 1 ())", "core", &mut NoTrace);
    assert!(matches!(
        result,
        Err(RunError::Validation(ValidationError::EmptyForm { .. }))
    ));
}

#[test]
fn test_overflowing_literal_is_rejected() {
    let result = Runtime::new().run("(add 1e999 1)", "core", &mut NoTrace);
    assert!(matches!(
        result,
        Err(RunError::Validation(ValidationError::NonFiniteNumber { line: 1 }))
    ));
}

#[test]
fn test_hand_built_tree_with_line_zero() {
    let node = Node::call(0, "add", vec![]);
    assert!(matches!(
        Runtime::new().run_nodes(&[node], "core", &mut NoTrace),
        Err(RunError::Validation(ValidationError::ZeroLine))
    ));
}

#[test]
fn test_registry_changes_are_seen_by_the_next_run() {
    let mut runtime = Runtime::new();
    assert!(runtime.run("(add 1 2)", "math", &mut NoTrace).is_ok());

    assert!(runtime.registry_mut().unregister("math"));
    match runtime.run("(add 1 2)", "math", &mut NoTrace) {
        Err(RunError::Compile(CompileError::LibraryNotFound { name })) => {
            assert_eq!(name, "math")
        }
        other => panic!("expected a missing library, got {:?}", other),
    }

    // literals and proc never look the library up
    assert_eq!(
        runtime.run("7", "math", &mut NoTrace).unwrap(),
        Value::Number(7.0)
    );
    assert!(runtime.run("(proc add 1)", "math", &mut NoTrace).is_ok());
}

#[test]
fn test_non_symbol_head() {
    let result = Runtime::new().run("(\"add\" 1)", "core", &mut NoTrace);
    match result {
        Err(RunError::Compile(err)) => assert_eq!(
            err.to_string(),
            "unresolved call: string 'add' on line 1 with 1 argument(s) (1)"
        ),
        other => panic!("expected a compile error, got {:?}", other),
    }
}

#[test]
fn test_compile_without_running() {
    let units = Runtime::new()
        .compile("(eval (proc 5)) (proc add)", "core")
        .unwrap();
    assert_eq!(
        units,
        vec![
            CompiledUnit::Program(Fragment::Literal(Value::Number(5.0))),
            CompiledUnit::Deferred(vec![Node::symbol(1, "add")]),
        ]
    );
}

#[test]
fn test_eval_of_empty_proc() {
    assert!(matches!(
        Runtime::new().run("(eval (proc))", "core", &mut NoTrace),
        Err(RunError::Compile(CompileError::EmptyForm))
    ));
}

#[test]
fn test_deferred_values_inside_lists() {
    let value = Runtime::new()
        .run("(list (proc a) 1)", "core", &mut NoTrace)
        .unwrap();
    assert_eq!(
        value,
        Value::List(vec![
            Value::Deferred(vec![Node::symbol(1, "a")]),
            Value::Number(1.0),
        ])
    );
}

#[test]
fn test_deeply_nested_source_is_an_error() {
    let depth = 400;
    let source = format!("{}1{}", "(add ".repeat(depth), ")".repeat(depth));
    match Runtime::new().run(&source, "core", &mut NoTrace) {
        Err(RunError::Compile(CompileError::NestingTooDeep { line, limit })) => {
            assert_eq!(line, 1);
            assert_eq!(limit, rhizome_tendril_runtime_interp::MAX_NESTING);
        }
        other => panic!("expected a nesting error, got {:?}", other),
    }
}

#[test]
fn test_unresolved_call_renders_numbers_canonically() {
    match Runtime::new().run("(sub 1.0 2.50 1e3)", "math", &mut NoTrace) {
        Err(RunError::Compile(CompileError::UnresolvedCall { arg_repr, .. })) => {
            assert_eq!(arg_repr, "(1 2.5 1000)")
        }
        other => panic!("expected an unresolved call, got {:?}", other),
    }
}
