use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use scanner::Token;

use crate::Expr;

#[derive(Debug, PartialEq)]
pub enum Stmt<'a> {
    Expression(Expr<'a>),
    Print(Expr<'a>),
    Var { name: Token<'a>, initializer: Option<Expr<'a>> },
    Block(Vec<Stmt<'a>>),
    If { condition: Expr<'a>, then_branch: Box<Stmt<'a>>, else_branch: Option<Box<Stmt<'a>>> },
    While { condition: Expr<'a>, body: Box<Stmt<'a>> },
    // Kept as written, a later stage may lower it to `while`
    For {
        initializer: Option<Box<Stmt<'a>>>,
        condition: Option<Expr<'a>>,
        increment: Option<Expr<'a>>,
        body: Box<Stmt<'a>>,
    },
    Return { keyword: Token<'a>, value: Option<Expr<'a>> },
    Function { name: Token<'a>, params: Vec<Token<'a>>, body: Vec<Stmt<'a>> },
}

struct OrNull<'o, T>(Option<&'o T>);

impl<T: Display> Display for OrNull<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("null"),
        }
    }
}

impl Display for Stmt<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Expression(expr) => write!(f, "expr-stmt{{ expr: {expr} }}"),
            Stmt::Print(expr) => write!(f, "print-stmt{{ expr: {expr} }}"),
            Stmt::Var { name, initializer } => {
                write!(f, "var-stmt{{ name: {name}, initializer: {} }}", OrNull(initializer.as_ref()))
            }
            Stmt::Block(stmts) => {
                write!(f, "block-stmt{{ statements: [{}] }}", stmts.iter().join(", "))
            }
            Stmt::If { condition, then_branch, else_branch } => write!(
                f,
                "if-stmt{{ condition: {condition}, then: {then_branch}, else: {} }}",
                OrNull(else_branch.as_deref())
            ),
            Stmt::While { condition, body } => {
                write!(f, "while-stmt{{ condition: {condition}, body: {body} }}")
            }
            Stmt::For { initializer, condition, increment, body } => write!(
                f,
                "for-stmt{{ init: {}, condition: {}, increment: {}, body: {body} }}",
                OrNull(initializer.as_deref()),
                OrNull(condition.as_ref()),
                OrNull(increment.as_ref()),
            ),
            Stmt::Return { value, .. } => {
                write!(f, "return-stmt{{ value: {} }}", OrNull(value.as_ref()))
            }
            Stmt::Function { name, params, body } => write!(
                f,
                "fun-decl-stmt{{ name: {name}, params: [{}], body: [{}] }}",
                params.iter().map(|param| param.lexeme).join(", "),
                body.iter().join(", ")
            ),
        }
    }
}
