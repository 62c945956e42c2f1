//! Tokenizer.

use crate::ParseError;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
    Paren,
    Bracket,
}

impl Delimiter {
    pub(crate) fn close(self) -> char {
        match self {
            Delimiter::Paren => ')',
            Delimiter::Bracket => ']',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Open(Delimiter),
    Close(Delimiter),
    Number(f64),
    Symbol(String),
    String(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

pub(crate) struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
        }
    }

    /// Tokenize the whole input.
    pub(crate) fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn skip_trivia(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == ';' {
                while self.chars.peek().is_some_and(|&c| c != '\n') {
                    self.bump();
                }
            } else if ch.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.skip_trivia();
        let line = self.line;
        let Some(ch) = self.bump() else {
            return Ok(None);
        };

        let kind = match ch {
            '(' => TokenKind::Open(Delimiter::Paren),
            '[' => TokenKind::Open(Delimiter::Bracket),
            ')' => TokenKind::Close(Delimiter::Paren),
            ']' => TokenKind::Close(Delimiter::Bracket),
            '"' => TokenKind::String(self.string(line)?),
            first => self.atom(first),
        };
        Ok(Some(Token { kind, line }))
    }

    fn string(&mut self, line: usize) -> Result<String, ParseError> {
        let mut text = String::new();
        loop {
            match self.bump() {
                None => return Err(ParseError::UnterminatedString { line }),
                Some('"') => return Ok(text),
                Some('\\') => {
                    let escape_line = self.line;
                    let escaped = match self.bump() {
                        None => return Err(ParseError::UnterminatedString { line }),
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('"') => '"',
                        Some('\\') => '\\',
                        Some(found) => {
                            return Err(ParseError::InvalidEscape {
                                line: escape_line,
                                found,
                            });
                        }
                    };
                    text.push(escaped);
                }
                Some(ch) => text.push(ch),
            }
        }
    }

    fn atom(&mut self, first: char) -> TokenKind {
        let mut text = String::from(first);
        while let Some(&ch) = self.chars.peek() {
            if is_delimiter(ch) {
                break;
            }
            text.push(ch);
            self.chars.next();
        }

        if looks_numeric(&text) {
            if let Ok(value) = text.parse::<f64>() {
                return TokenKind::Number(value);
            }
        }
        TokenKind::Symbol(text)
    }
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | ')' | '[' | ']' | '"' | ';')
}

/// A digit, optionally after a sign and/or a leading decimal point.
///
/// Keeps `inf`, `nan`, `+` and `-` as symbols.
fn looks_numeric(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let digits = unsigned.strip_prefix('.').unwrap_or(unsigned);
    digits.starts_with(|c: char| c.is_ascii_digit())
}
