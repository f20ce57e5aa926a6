use std::fmt::Display;

use cursor::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Matched text. String literals exclude their quotes, the span does not.
    /// End-of-file tokens carry `EOF` over an empty span.
    pub lexeme: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, lexeme: &'a str, span: Span) -> Token<'a> {
        Self { kind, lexeme, span }
    }

    pub fn eof(pos: usize) -> Token<'a> {
        Self::new(TokenKind::Eof, "EOF", Span::empty_at(pos))
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword => self.lexeme.parse().ok(),
            _ => None,
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme == keyword.as_ref()
    }

    pub fn is_punctuation(&self, punctuation: char) -> bool {
        self.kind == TokenKind::Punctuation && self.lexeme.starts_with(punctuation)
    }

    /// Matches both simple (`<`) and compound (`<=`) operators.
    pub fn is_operator(&self, operator: &str) -> bool {
        matches!(self.kind, TokenKind::SimpleOperator | TokenKind::CompoundOperator)
            && self.lexeme == operator
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token{{ kind: {}, lexeme: {}, span: [{}..{}) }}",
            self.kind, self.lexeme, self.span.start, self.span.end
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum TokenKind {
    StringLiteral,
    NumberLiteral,
    Identifier,
    Keyword,

    // ( ) { } ; ,
    Punctuation,
    // = ! < > + - * /
    SimpleOperator,
    // == != <= >=
    CompoundOperator,

    #[strum(serialize = "end-of-file")]
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::AsRefStr, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,
}
