use scanner::{Keyword, Token, TokenKind};

use crate::{Expr, Parser, Result};

#[repr(u8)]
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    num_enum::IntoPrimitive,
    num_enum::TryFromPrimitive,
)]
pub enum Precedence {
    None,
    Assignment,
    Or,
    And,
    Equality,
    Comparison,
    Term,
    Factor,
    Unary,
    Call,
    Primary,
}

impl Precedence {
    pub fn next_higher_precedence(self) -> Self {
        let prim: u8 = self.into();
        Self::try_from(prim + 1).unwrap_or(Self::Primary)
    }
}

pub(crate) type PrefixFn<'a> = fn(&mut Parser<'a>, Token<'a>) -> Result<Expr<'a>>;
pub(crate) type InfixFn<'a> = fn(&mut Parser<'a>, Expr<'a>, Token<'a>) -> Result<Expr<'a>>;

/// What a token can do inside an expression. The token is passed to the
/// handlers after it has been consumed.
pub(crate) struct ParseRule<'a> {
    pub prefix: Option<PrefixFn<'a>>,
    pub infix: Option<InfixFn<'a>>,
    pub precedence: Precedence,
}

impl<'a> ParseRule<'a> {
    const NONE: Self = Self { prefix: None, infix: None, precedence: Precedence::None };

    fn prefix(prefix: PrefixFn<'a>) -> Self {
        Self { prefix: Some(prefix), ..Self::NONE }
    }

    fn infix(infix: InfixFn<'a>, precedence: Precedence) -> Self {
        Self { infix: Some(infix), precedence, ..Self::NONE }
    }

    pub fn for_token(token: &Token<'a>) -> Self {
        match token.kind {
            TokenKind::NumberLiteral | TokenKind::StringLiteral => Self::prefix(Parser::literal),
            TokenKind::Identifier => Self::prefix(Parser::variable),
            TokenKind::Keyword => match token.keyword() {
                Some(Keyword::True | Keyword::False | Keyword::Nil) => {
                    Self::prefix(Parser::literal)
                }
                Some(Keyword::And) => Self::infix(Parser::logical, Precedence::And),
                Some(Keyword::Or) => Self::infix(Parser::logical, Precedence::Or),
                _ => Self::NONE,
            },
            TokenKind::Punctuation => match token.lexeme {
                "(" => Self {
                    prefix: Some(Parser::grouping),
                    infix: Some(Parser::call),
                    precedence: Precedence::Call,
                },
                _ => Self::NONE,
            },
            TokenKind::SimpleOperator => match token.lexeme {
                "-" => Self {
                    prefix: Some(Parser::unary),
                    infix: Some(Parser::binary),
                    precedence: Precedence::Term,
                },
                "!" => Self::prefix(Parser::unary),
                "+" => Self::infix(Parser::binary, Precedence::Term),
                "*" | "/" => Self::infix(Parser::binary, Precedence::Factor),
                "<" | ">" => Self::infix(Parser::binary, Precedence::Comparison),
                "=" => Self::infix(Parser::assignment, Precedence::Assignment),
                _ => Self::NONE,
            },
            TokenKind::CompoundOperator => match token.lexeme {
                "==" | "!=" => Self::infix(Parser::binary, Precedence::Equality),
                "<=" | ">=" => Self::infix(Parser::binary, Precedence::Comparison),
                _ => Self::NONE,
            },
            TokenKind::Eof => Self::NONE,
        }
    }
}
