use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use scanner::Token;

#[derive(Debug, PartialEq)]
pub enum Expr<'a> {
    Binary { left: Box<Expr<'a>>, operator: Token<'a>, right: Box<Expr<'a>> },
    Unary { operator: Token<'a>, operand: Box<Expr<'a>> },
    Grouping(Box<Expr<'a>>),
    /// Number or string literal, or one of the `true`/`false`/`nil` keywords.
    Literal(Token<'a>),
    Variable(Token<'a>),
    Assign { name: Token<'a>, value: Box<Expr<'a>> },
    Logical { left: Box<Expr<'a>>, operator: Token<'a>, right: Box<Expr<'a>> },
    Call { callee: Box<Expr<'a>>, closing_paren: Token<'a>, arguments: Vec<Expr<'a>> },
}

impl Display for Expr<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary { left, operator, right } => {
                write!(f, "binary-expr{{ left: {left}, right: {right}, op: {operator} }}")
            }
            Expr::Unary { operator, operand } => {
                write!(f, "unary-expr{{ op: {operator}, operand: {operand} }}")
            }
            Expr::Grouping(expression) => {
                write!(f, "grouping-expr{{ expr: {expression} }}")
            }
            Expr::Literal(value) => {
                write!(f, "literal-expr{{ value: {value} }}")
            }
            Expr::Variable(name) => {
                write!(f, "variable-expr{{ name: {name} }}")
            }
            Expr::Assign { name, value } => {
                write!(f, "assignment-expr{{ name: {name}, value: {value} }}")
            }
            Expr::Logical { left, operator, right } => {
                write!(f, "logical-expr{{ left: {left}, op: {operator}, right: {right} }}")
            }
            Expr::Call { callee, arguments, .. } => {
                write!(f, "call-expr{{ callee: {callee}, args: [{}] }}", arguments.iter().join(", "))
            }
        }
    }
}
