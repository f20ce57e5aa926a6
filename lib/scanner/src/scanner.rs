use cursor::{Cursor, Span};
use log::trace;

pub mod token;
pub use token::{Keyword, Token, TokenKind};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanErrorType {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct ScanError {
    pub error: ScanErrorType,
    pub span: Span,
}

impl ScanError {
    fn new(error: ScanErrorType, span: Span) -> Self {
        Self { error, span }
    }
}

/// Pull-based scanner: every call to [`Scanner::next_token`] produces one token.
///
/// Once the source is exhausted it keeps returning end-of-file tokens.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source) }
    }

    pub fn next_token(&mut self) -> Result<Token<'a>, ScanError> {
        self.cursor.consume_while(char::is_whitespace);

        let start = self.cursor.pos();
        let Some(c) = self.cursor.next() else {
            return Ok(Token::eof(start));
        };

        let kind = match c {
            '(' | ')' | '{' | '}' | ';' | ',' => TokenKind::Punctuation,
            '+' | '-' | '*' | '/' => TokenKind::SimpleOperator,
            '=' | '!' | '<' | '>' => {
                if self.cursor.consume_if('=') {
                    TokenKind::CompoundOperator
                } else {
                    TokenKind::SimpleOperator
                }
            }
            '"' => return self.string(start),
            d if d.is_ascii_digit() => self.number(),
            c if is_identifier_start(c) => self.identifier(start),
            character => {
                // The cursor already moved past `character`, so a retry makes progress
                return Err(ScanError::new(
                    ScanErrorType::UnexpectedCharacter { character, position: start },
                    self.cursor.span_from(start),
                ));
            }
        };

        let token = Token::new(kind, self.cursor.slice_from(start), self.cursor.span_from(start));
        trace!("Scanned {token}");
        Ok(token)
    }

    fn string(&mut self, start: usize) -> Result<Token<'a>, ScanError> {
        loop {
            match self.cursor.next() {
                Some('"') => break,
                // A backslash keeps the next char from closing the literal, the
                // lexeme itself stays raw
                Some('\\') => {
                    self.cursor.next();
                }
                Some(_) => (),
                None => {
                    return Err(ScanError::new(
                        ScanErrorType::UnterminatedString,
                        self.cursor.span_from(start),
                    ))
                }
            }
        }

        let span = self.cursor.span_from(start);
        // Strip the delimiting quotes, both are one byte wide
        let lexeme = &self.cursor.source()[span.start + 1..span.end - 1];
        let token = Token::new(TokenKind::StringLiteral, lexeme, span);
        trace!("Scanned {token}");
        Ok(token)
    }

    fn number(&mut self) -> TokenKind {
        self.cursor.consume_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.') && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.next(); // '.'
            self.cursor.consume_while(|c| c.is_ascii_digit());
        }

        TokenKind::NumberLiteral
    }

    fn identifier(&mut self, start: usize) -> TokenKind {
        self.cursor.consume_while(is_identifier_continue);

        if self.cursor.slice_from(start).parse::<Keyword>().is_ok() {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Iterator over the tokens of a source, ending right after the end-of-file token.
///
/// Lexical errors are yielded in place; scanning resumes after them.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    scanner: Scanner<'a>,
    finished: bool,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { scanner: Scanner::new(source), finished: false }
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Result<Token<'a>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.scanner.next_token();
        if matches!(token, Ok(Token { kind: TokenKind::Eof, .. })) {
            self.finished = true;
        }
        Some(token)
    }
}

/// Scans the whole source, stopping at the first lexical error.
pub fn scan(source: &str) -> Result<Vec<Token>, ScanError> {
    TokenStream::new(source).collect()
}
