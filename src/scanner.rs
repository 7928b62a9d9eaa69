use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::Reporter;
use crate::literal::Literal;
use crate::token::{Token, Type};

const KEYWORDS: &[(&str, Type)] = &[
    ("and", Type::And),
    ("class", Type::Class),
    ("else", Type::Else),
    ("false", Type::False),
    ("for", Type::For),
    ("fun", Type::Fun),
    ("if", Type::If),
    ("nil", Type::Nil),
    ("or", Type::Or),
    ("print", Type::Print),
    ("return", Type::Return),
    ("super", Type::Super),
    ("this", Type::This),
    ("true", Type::True),
    ("var", Type::Var),
    ("while", Type::While),
];

/// Converts source text into an ordered token stream, terminated by an
/// end-of-input sentinel (spec §4.1). Walks the source once, left to right,
/// using `peekmore` for the one-character lookahead two-char operators and
/// numeric literals need.
pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    lexeme: String,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            lexeme: String::new(),
            line: 1,
        }
    }

    pub fn scan_tokens(&mut self, reporter: &mut dyn Reporter) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(token) = self.scan_token(reporter) {
            tokens.push(token);
        }

        tokens.push(Token::new(Type::EOF, String::new(), None, self.line));
        tokens
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.source.next();
        if let Some(c) = c {
            self.lexeme.push(c);
        }
        c
    }

    fn peek(&mut self) -> char {
        self.source.peek().copied().unwrap_or('\0')
    }

    fn peek_next(&mut self) -> char {
        self.source.peek_next().copied().unwrap_or('\0')
    }

    fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn token(&mut self, r#type: Type, literal: Option<Literal>) -> Token {
        let lexeme = std::mem::take(&mut self.lexeme);
        Token::new(r#type, lexeme, literal, self.line)
    }

    /// Scans and returns the next token, or `None` at end of input. Errors
    /// (unterminated string, unterminated number, unexpected character) are
    /// reported and scanning continues with the following token.
    fn scan_token(&mut self, reporter: &mut dyn Reporter) -> Option<Token> {
        loop {
            self.lexeme.clear();
            let c = self.advance()?;

            let token = match c {
                '(' => Some(self.token(Type::LeftParen, None)),
                ')' => Some(self.token(Type::RightParen, None)),
                '{' => Some(self.token(Type::LeftBrace, None)),
                '}' => Some(self.token(Type::RightBrace, None)),
                ',' => Some(self.token(Type::Comma, None)),
                '.' => Some(self.token(Type::Dot, None)),
                '-' => Some(self.token(Type::Minus, None)),
                '+' => Some(self.token(Type::Plus, None)),
                ';' => Some(self.token(Type::Semicolon, None)),
                '*' => Some(self.token(Type::Star, None)),
                '?' => Some(self.token(Type::Question, None)),
                ':' => Some(self.token(Type::Colon, None)),
                '!' => {
                    let t = if self.advance_if('=') { Type::BangEqual } else { Type::Bang };
                    Some(self.token(t, None))
                },
                '=' => {
                    let t = if self.advance_if('=') { Type::EqualEqual } else { Type::Equal };
                    Some(self.token(t, None))
                },
                '<' => {
                    let t = if self.advance_if('=') { Type::LessEqual } else { Type::Less };
                    Some(self.token(t, None))
                },
                '>' => {
                    let t = if self.advance_if('=') { Type::GreaterEqual } else { Type::Greater };
                    Some(self.token(t, None))
                },
                '/' => {
                    if self.advance_if('/') {
                        while self.peek() != '\n' && self.peek() != '\0' {
                            self.advance();
                        }
                        continue;
                    }
                    Some(self.token(Type::Slash, None))
                },
                ' ' | '\r' | '\t' => continue,
                '\n' => {
                    self.line += 1;
                    continue;
                },
                '"' => self.string(reporter),
                c if c.is_ascii_digit() => Some(self.number()),
                c if c.is_alphabetic() || c == '_' => Some(self.identifier()),
                c => {
                    reporter.scan_error(self.line, &format!("Unexpected character '{c}'"));
                    continue;
                },
            };

            return token;
        }
    }

    /// String literals may span multiple lines (spec §4.1).
    fn string(&mut self, reporter: &mut dyn Reporter) -> Option<Token> {
        let start_line = self.line;
        let mut value = String::new();

        loop {
            match self.peek() {
                '"' => break,
                '\0' => {
                    reporter.scan_error(start_line, "Unterminated string");
                    return None;
                },
                '\n' => {
                    self.line += 1;
                    value.push(self.advance().unwrap());
                },
                _ => value.push(self.advance().unwrap()),
            }
        }

        self.advance(); // closing quote
        Some(self.token(Type::String, Some(Literal::String(value))))
    }

    /// Leading/trailing dots are never part of the number: the `.` is only
    /// consumed when followed by a digit (spec §4.1). A dot that is not
    /// followed by a digit is left for the next token (e.g. `.` as a
    /// separate token), not an error.
    fn number(&mut self) -> Token {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance(); // the dot
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let value: f64 = self.lexeme.parse().unwrap_or(0.0);
        self.token(Type::Number, Some(Literal::Number(value)))
    }

    fn identifier(&mut self) -> Token {
        while matches!(self.peek(), c if c.is_alphanumeric() || c == '_') {
            self.advance();
        }

        let r#type = KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == self.lexeme)
            .map(|(_, t)| *t)
            .unwrap_or(Type::Identifier);

        self.token(r#type, None)
    }
}
