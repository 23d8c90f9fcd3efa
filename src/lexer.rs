//! Hand-rolled lexer for the embedded expression/statement/declaration
//! grammar (component D).
//!
//! Structured as a `source`/`remaining`/`position`/`line`/`column`
//! cursor with one `next_token` entry point, retargeted at this
//! crate's token set, which is fixed and much smaller than a
//! general-purpose language lexer.

use crate::error::LexError;
use crate::span::Span;

/// One lexical token kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// An identifier, stored as its full dotted path if qualified.
    Ident(String),
    /// An integer literal. `base` is `Some(radix)` for a `radix#digits#`
    /// literal, `None` for a plain decimal literal.
    Integer { value: i128, base: Option<u32> },
    /// A double-quoted string literal, stored without escape processing.
    StringLit(String),

    /// `'`
    Tick,
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `:=`
    Assign,
    /// `=>`
    Arrow,
    /// `:`
    Colon,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `=`
    Equal,
    /// `/=`
    NotEqual,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `**`
    StarStar,
    /// `/`
    Slash,

    /// `and`
    KwAnd,
    /// `or`
    KwOr,
    /// `not`
    KwNot,
    /// `in`
    KwIn,
    /// `mod`
    KwMod,
    /// `where`
    KwWhere,
    /// `for`
    KwFor,
    /// `all`
    KwAll,
    /// `some`
    KwSome,
    /// `when`
    KwWhen,
    /// `renames`
    KwRenames,
    /// `is`
    KwIs,
    /// `private`
    KwPrivate,
    /// `return`
    KwReturn,
    /// `null`
    KwNull,
    /// `message`
    KwMessage,
    /// `True`
    KwTrue,
    /// `False`
    KwFalse,

    /// End of input.
    Eof,
}

/// A token with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

/// Tokenizes an embedded string into its complete token stream
/// (including a trailing `Eof`), or the first [`LexError`] encountered.
pub struct Lexer<'a> {
    source: &'a str,
    remaining: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            remaining: source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenizes the entire input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining.chars().next()
    }

    fn peek_char_at(&self, n: usize) -> Option<char> {
        self.remaining.chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        let len = ch.len_utf8();
        self.remaining = &self.remaining[len..];
        self.position += len;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek_char(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn make_span(&self, start: usize, start_line: usize, start_column: usize) -> Span {
        Span::new(start, self.position, start_line, start_column)
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let Some(ch) = self.peek_char() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                lexeme: String::new(),
                span: self.make_span(start, start_line, start_column),
            });
        };

        if ch.is_ascii_digit() {
            return self.lex_number(start, start_line, start_column);
        }
        if ch == '"' {
            return self.lex_string(start, start_line, start_column);
        }
        if ch.is_alphabetic() || ch == '_' {
            return Ok(self.lex_ident_or_keyword(start, start_line, start_column));
        }

        self.lex_punctuation(ch, start, start_line, start_column)
    }

    fn lex_number(&mut self, start: usize, start_line: usize, start_column: usize) -> Result<Token, LexError> {
        let mut digits = String::new();
        while matches!(self.peek_char(), Some(c) if c.is_ascii_digit() || c == '_') {
            let c = self.advance().unwrap();
            if c != '_' {
                digits.push(c);
            }
        }

        if self.peek_char() == Some('#') {
            self.advance();
            let radix: u32 = digits.parse().unwrap_or(10);
            let mut body = String::new();
            while matches!(self.peek_char(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
                let c = self.advance().unwrap();
                if c != '_' {
                    body.push(c);
                }
            }
            if self.peek_char() == Some('#') {
                self.advance();
            }
            let span = self.make_span(start, start_line, start_column);
            let value = i128::from_str_radix(&body, radix).unwrap_or(0);
            let lexeme = self.source[start..self.position].to_string();
            return Ok(Token {
                kind: TokenKind::Integer {
                    value,
                    base: Some(radix),
                },
                lexeme,
                span,
            });
        }

        let span = self.make_span(start, start_line, start_column);
        let value = digits.parse().unwrap_or(0);
        let lexeme = self.source[start..self.position].to_string();
        Ok(Token {
            kind: TokenKind::Integer { value, base: None },
            lexeme,
            span,
        })
    }

    fn lex_string(&mut self, start: usize, start_line: usize, start_column: usize) -> Result<Token, LexError> {
        self.advance();
        let mut content = String::new();
        loop {
            match self.peek_char() {
                Some('"') => {
                    self.advance();
                    let span = self.make_span(start, start_line, start_column);
                    let lexeme = self.source[start..self.position].to_string();
                    return Ok(Token {
                        kind: TokenKind::StringLit(content),
                        lexeme,
                        span,
                    });
                }
                Some(c) => {
                    content.push(c);
                    self.advance();
                }
                None => {
                    return Err(LexError::UnterminatedString {
                        span: self.make_span(start, start_line, start_column),
                    })
                }
            }
        }
    }

    fn lex_ident_or_keyword(&mut self, start: usize, start_line: usize, start_column: usize) -> Token {
        let mut text = String::new();
        while matches!(self.peek_char(), Some(c) if c.is_alphanumeric() || c == '_') {
            text.push(self.advance().unwrap());
        }
        // Qualified identifiers are dot-separated unqualified identifiers;
        // greedily consume `.segment` pairs unless followed by a digit
        // (field selection on a non-identifier path is handled by the
        // parser, not the lexer).
        while self.peek_char() == Some('.')
            && matches!(self.peek_char_at(1), Some(c) if c.is_alphabetic() || c == '_')
        {
            text.push(self.advance().unwrap());
            while matches!(self.peek_char(), Some(c) if c.is_alphanumeric() || c == '_') {
                text.push(self.advance().unwrap());
            }
        }

        let span = self.make_span(start, start_line, start_column);
        let kind = match text.as_str() {
            "and" => TokenKind::KwAnd,
            "or" => TokenKind::KwOr,
            "not" => TokenKind::KwNot,
            "in" => TokenKind::KwIn,
            "mod" => TokenKind::KwMod,
            "where" => TokenKind::KwWhere,
            "for" => TokenKind::KwFor,
            "all" => TokenKind::KwAll,
            "some" => TokenKind::KwSome,
            "when" => TokenKind::KwWhen,
            "renames" => TokenKind::KwRenames,
            "is" => TokenKind::KwIs,
            "private" => TokenKind::KwPrivate,
            "return" => TokenKind::KwReturn,
            "null" => TokenKind::KwNull,
            "message" => TokenKind::KwMessage,
            "True" => TokenKind::KwTrue,
            "False" => TokenKind::KwFalse,
            _ => TokenKind::Ident(text.clone()),
        };
        Token {
            kind,
            lexeme: text,
            span,
        }
    }

    fn lex_punctuation(
        &mut self,
        ch: char,
        start: usize,
        start_line: usize,
        start_column: usize,
    ) -> Result<Token, LexError> {
        let kind = match ch {
            '\'' => {
                self.advance();
                TokenKind::Tick
            }
            '.' => {
                self.advance();
                TokenKind::Dot
            }
            ',' => {
                self.advance();
                TokenKind::Comma
            }
            ';' => {
                self.advance();
                TokenKind::Semicolon
            }
            '(' => {
                self.advance();
                TokenKind::LParen
            }
            ')' => {
                self.advance();
                TokenKind::RParen
            }
            '[' => {
                self.advance();
                TokenKind::LBracket
            }
            ']' => {
                self.advance();
                TokenKind::RBracket
            }
            '+' => {
                self.advance();
                TokenKind::Plus
            }
            '-' => {
                self.advance();
                TokenKind::Minus
            }
            '*' => {
                self.advance();
                if self.peek_char() == Some('*') {
                    self.advance();
                    TokenKind::StarStar
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    TokenKind::NotEqual
                } else {
                    TokenKind::Slash
                }
            }
            '=' => {
                self.advance();
                if self.peek_char() == Some('>') {
                    self.advance();
                    TokenKind::Arrow
                } else {
                    TokenKind::Equal
                }
            }
            '<' => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            ':' => {
                self.advance();
                if self.peek_char() == Some('=') {
                    self.advance();
                    TokenKind::Assign
                } else {
                    TokenKind::Colon
                }
            }
            other => {
                let span = self.make_span(start, start_line, start_column);
                self.advance();
                return Err(LexError::UnexpectedChar { ch: other, span });
            }
        };
        let span = self.make_span(start, start_line, start_column);
        let lexeme = self.source[start..self.position].to_string();
        Ok(Token { kind, lexeme, span })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn tokenizes_identifiers_and_keywords() {
        assert_eq!(
            kinds("Foo and Bar"),
            vec![
                TokenKind::Ident("Foo".to_string()),
                TokenKind::KwAnd,
                TokenKind::Ident("Bar".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tokenizes_qualified_identifier() {
        assert_eq!(
            kinds("Channel.Message"),
            vec![TokenKind::Ident("Channel.Message".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn tokenizes_not_in() {
        assert_eq!(
            kinds("Foo not in Bar"),
            vec![
                TokenKind::Ident("Foo".to_string()),
                TokenKind::KwNot,
                TokenKind::KwIn,
                TokenKind::Ident("Bar".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tokenizes_based_integer() {
        assert_eq!(
            kinds("16#FF#"),
            vec![
                TokenKind::Integer {
                    value: 255,
                    base: Some(16)
                },
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn tokenizes_string_without_escapes() {
        assert_eq!(
            kinds("\"a\\b\""),
            vec![TokenKind::StringLit("a\\b".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_string_errors() {
        let err = Lexer::new("\"abc").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
    }

    #[test]
    fn unexpected_char_errors() {
        let err = Lexer::new("Foo @ Bar").tokenize().unwrap_err();
        assert!(matches!(err, LexError::UnexpectedChar { ch: '@', .. }));
    }
}
