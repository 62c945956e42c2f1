use crate::{ParseError, parse, parse_one};
use rhizome_tendril_ir::Node;

#[test]
fn test_parse_atoms() {
    let nodes = parse(r#"42 -1.5 add "hi there""#).unwrap();
    assert_eq!(
        nodes,
        vec![
            Node::number(1, 42),
            Node::number(1, -1.5),
            Node::symbol(1, "add"),
            Node::string(1, "hi there"),
        ]
    );
}

#[test]
fn test_parse_form_and_list() {
    let node = parse_one("(first [1 2])").unwrap();
    assert_eq!(
        node,
        Node::call(
            1,
            "first",
            vec![Node::list(vec![Node::number(1, 1), Node::number(1, 2)])]
        )
    );
}

#[test]
fn test_nested_forms() {
    let node = parse_one("(eval (proc (add 1 2)))").unwrap();
    assert_eq!(node.to_string(), "(eval (proc (add 1 2)))");
    assert!(node.is_headed_by("eval"));
}

#[test]
fn test_symbols_that_look_like_numbers() {
    let nodes = parse("+ - inf nan .x 1abc empty? -.5").unwrap();
    let kinds: Vec<String> = nodes.iter().map(|n| n.kind().to_string()).collect();
    assert_eq!(
        kinds,
        vec![
            "symbol", "symbol", "symbol", "symbol", "symbol", "symbol", "symbol", "number"
        ]
    );
    assert_eq!(nodes[7], Node::number(1, -0.5));
}

#[test]
fn test_lines_are_tracked() {
    let source = "; header\n(add 1\n  2)\n\n\"x\"";
    let nodes = parse(source).unwrap();
    assert_eq!(
        nodes,
        vec![
            Node::form(vec![
                Node::symbol(2, "add"),
                Node::number(2, 1),
                Node::number(3, 2),
            ]),
            Node::string(5, "x"),
        ]
    );
}

#[test]
fn test_multiline_string_keeps_start_line() {
    let nodes = parse("\"a\nb\" c").unwrap();
    assert_eq!(nodes, vec![Node::string(1, "a\nb"), Node::symbol(2, "c")]);
}

#[test]
fn test_string_escapes() {
    let node = parse_one(r#""tab\there \"q\" back\\slash\n""#).unwrap();
    assert_eq!(node, Node::string(1, "tab\there \"q\" back\\slash\n"));
}

#[test]
fn test_comments_and_empty_input() {
    assert_eq!(parse("").unwrap(), vec![]);
    assert_eq!(parse("  ; nothing here\n ; or here").unwrap(), vec![]);
    assert_eq!(parse("1;comment\n2").unwrap().len(), 2);
}

#[test]
fn test_empty_form_parses() {
    assert_eq!(parse_one("()").unwrap(), Node::form(vec![]));
}

#[test]
fn test_unexpected_eof() {
    assert_eq!(
        parse("(add 1\n[2"),
        Err(ParseError::UnexpectedEof { line: 2 })
    );
}

#[test]
fn test_unexpected_close() {
    assert_eq!(
        parse("1\n)"),
        Err(ParseError::UnexpectedClose {
            line: 2,
            found: ')'
        })
    );
}

#[test]
fn test_mismatched_close() {
    assert_eq!(
        parse("(first [1 2)"),
        Err(ParseError::MismatchedClose {
            line: 1,
            expected: ']',
            found: ')'
        })
    );
}

#[test]
fn test_unterminated_string() {
    assert_eq!(
        parse("(print\n\"abc"),
        Err(ParseError::UnterminatedString { line: 2 })
    );
}

#[test]
fn test_invalid_escape() {
    assert_eq!(
        parse(r#""a\qb""#),
        Err(ParseError::InvalidEscape {
            line: 1,
            found: 'q'
        })
    );
}

#[test]
fn test_parse_one_requires_single_expression() {
    assert_eq!(parse_one("1 2"), Err(ParseError::ExpectedSingle { count: 2 }));
    assert_eq!(parse_one(""), Err(ParseError::ExpectedSingle { count: 0 }));
}

#[test]
fn test_error_messages() {
    let err = parse("(a]").unwrap_err();
    assert_eq!(err.to_string(), "line 1: expected ')', found ']'");
}
