//! Token stream to node trees.

use crate::ParseError;
use crate::lexer::{Delimiter, Lexer, Token, TokenKind};
use rhizome_tendril_ir::Node;
use std::iter::Peekable;
use std::vec::IntoIter;

/// Parse every top-level expression in `source`.
pub fn parse(source: &str) -> Result<Vec<Node>, ParseError> {
    let lexer = Lexer::new(source);
    let last_line = source.lines().count().max(1);
    let mut parser = Parser {
        tokens: lexer.tokenize()?.into_iter().peekable(),
        last_line,
    };

    let mut nodes = Vec::new();
    while let Some(token) = parser.tokens.next() {
        nodes.push(parser.expression(token)?);
    }
    Ok(nodes)
}

/// Parse a source that holds exactly one expression.
pub fn parse_one(source: &str) -> Result<Node, ParseError> {
    let mut nodes = parse(source)?;
    match nodes.len() {
        1 => Ok(nodes.remove(0)),
        count => Err(ParseError::ExpectedSingle { count }),
    }
}

struct Parser {
    tokens: Peekable<IntoIter<Token>>,
    last_line: usize,
}

impl Parser {
    fn expression(&mut self, token: Token) -> Result<Node, ParseError> {
        let Token { kind, line } = token;
        match kind {
            TokenKind::Number(value) => Ok(Node::Number { line, value }),
            TokenKind::Symbol(name) => Ok(Node::Symbol { line, name }),
            TokenKind::String(value) => Ok(Node::String { line, value }),
            TokenKind::Open(delimiter) => {
                let items = self.sequence(delimiter)?;
                Ok(match delimiter {
                    Delimiter::Paren => Node::Form(items),
                    Delimiter::Bracket => Node::List(items),
                })
            }
            TokenKind::Close(delimiter) => Err(ParseError::UnexpectedClose {
                line,
                found: delimiter.close(),
            }),
        }
    }

    fn sequence(&mut self, open: Delimiter) -> Result<Vec<Node>, ParseError> {
        let mut items = Vec::new();
        loop {
            let Some(token) = self.tokens.next() else {
                return Err(ParseError::UnexpectedEof {
                    line: self.last_line,
                });
            };
            match token.kind {
                TokenKind::Close(close) if close == open => return Ok(items),
                TokenKind::Close(close) => {
                    return Err(ParseError::MismatchedClose {
                        line: token.line,
                        expected: open.close(),
                        found: close.close(),
                    });
                }
                _ => items.push(self.expression(token)?),
            }
        }
    }
}
