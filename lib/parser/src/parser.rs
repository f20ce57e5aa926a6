mod expr;
mod rules;
mod stmt;

use cursor::Span;
use log::{debug, info, trace, warn};
use scanner::{Keyword, ScanError, Token, TokenKind};

pub use expr::Expr;
pub use rules::Precedence;
pub use stmt::Stmt;

use rules::ParseRule;

/// Bound on how deeply statements and expressions may nest, keeps hostile
/// input like `((((...` from exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 128;

pub type Result<T> = std::result::Result<T, ParserError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("Parse error: {error} at token '{at}'")]
pub struct ParserError {
    pub error: ParserErrorType,
    /// The rendered offending token.
    pub at: String,
    pub span: Span,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParserErrorType {
    #[error("expected {0}")]
    Expected(&'static str),
    #[error("unexpected token in expression")]
    UnexpectedToken,
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,
    #[error("unterminated block")]
    UnterminatedBlock,
    #[error("unterminated function body")]
    UnterminatedFunctionBody,
    #[error("nesting too deep")]
    TooDeeplyNested,
}

impl ParserErrorType {
    fn at(self, token: &Token) -> ParserError {
        ParserError { error: self, at: token.to_string(), span: token.span }
    }
}

/// Either kind of failure on the way from source text to a syntax tree.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Parse(#[from] ParserError),
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Scan(e) => e.span,
            SyntaxError::Parse(e) => e.span,
        }
    }
}

/// Scans and parses `source` in one go.
pub fn parse_source(source: &str) -> std::result::Result<Vec<Stmt<'_>>, SyntaxError> {
    let tokens = scanner::scan(source)?;
    Ok(Parser::new(tokens).parse()?)
}

#[derive(Debug, Clone, Copy)]
enum Expected {
    Identifier,
    Keyword(Keyword),
    Punctuation(char),
    Operator(&'static str),
}

impl Expected {
    fn matches(self, token: &Token) -> bool {
        match self {
            Expected::Identifier => token.kind == TokenKind::Identifier,
            Expected::Keyword(keyword) => token.is_keyword(keyword),
            Expected::Punctuation(punctuation) => token.is_punctuation(punctuation),
            Expected::Operator(operator) => token.is_operator(operator),
        }
    }
}

use Expected::{Identifier, Operator, Punctuation};

#[derive(Debug)]
pub struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    current: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(mut tokens: Vec<Token<'a>>) -> Self {
        // The cursor never moves past the last token, so make sure that one is an Eof
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = tokens.last().map_or(0, |token| token.span.end);
            tokens.push(Token::eof(end));
        }
        Self { tokens, current: 0, depth: 0 }
    }

    /// Parses the whole token sequence, stopping at the first error.
    pub fn parse(mut self) -> Result<Vec<Stmt<'a>>> {
        info!("Parsing {} tokens", self.tokens.len());
        let mut stmts = Vec::new();

        while !self.is_at_end() {
            match self.declaration() {
                Ok(stmt) => {
                    debug!("Parsed statement #{}: {stmt}", stmts.len());
                    stmts.push(stmt);
                }
                Err(e) => {
                    warn!("Hit error: {e}, syncing...");
                    self.synchronize();
                    return Err(e);
                }
            }
        }

        info!("Parsed {} statements", stmts.len());
        Ok(stmts)
    }

    fn declaration(&mut self) -> Result<Stmt<'a>> {
        if self.consume(Expected::Keyword(Keyword::Var)).is_ok() {
            self.var_declaration()
        } else if self.consume(Expected::Keyword(Keyword::Fun)).is_ok() {
            self.nested(Self::fun_declaration)
        } else {
            self.statement()
        }
    }

    fn var_declaration(&mut self) -> Result<Stmt<'a>> {
        let name = self.consume_or_error(Identifier, "variable name")?;

        let initializer = match self.consume(Operator("=")) {
            Ok(_) => Some(self.expression()?),
            Err(_) => None,
        };

        self.consume_or_error(Punctuation(';'), "';' after variable declaration")?;

        Ok(Stmt::Var { name, initializer })
    }

    fn fun_declaration(&mut self) -> Result<Stmt<'a>> {
        let name = self.consume_or_error(Identifier, "function name")?;
        self.consume_or_error(Punctuation('('), "'(' after function name")?;

        let mut params = Vec::new();
        if !self.check(Punctuation(')')) {
            loop {
                params.push(self.consume_or_error(Identifier, "parameter name")?);

                if self.consume(Punctuation(',')).is_err() {
                    break;
                }
            }
        }

        self.consume_or_error(Punctuation(')'), "')' after parameters")?;
        self.consume_or_error(Punctuation('{'), "'{' before function body")?;

        let body = self.block(ParserErrorType::UnterminatedFunctionBody)?;

        Ok(Stmt::Function { name, params, body })
    }

    fn statement(&mut self) -> Result<Stmt<'a>> {
        self.nested(|parser| {
            if parser.consume(Expected::Keyword(Keyword::Print)).is_ok() {
                parser.print_statement()
            } else if parser.consume(Expected::Keyword(Keyword::If)).is_ok() {
                parser.if_statement()
            } else if parser.consume(Expected::Keyword(Keyword::While)).is_ok() {
                parser.while_statement()
            } else if parser.consume(Expected::Keyword(Keyword::For)).is_ok() {
                parser.for_statement()
            } else if let Ok(keyword) = parser.consume(Expected::Keyword(Keyword::Return)) {
                parser.return_statement(keyword)
            } else if parser.consume(Punctuation('{')).is_ok() {
                Ok(Stmt::Block(parser.block(ParserErrorType::UnterminatedBlock)?))
            } else {
                parser.expression_statement()
            }
        })
    }

    fn print_statement(&mut self) -> Result<Stmt<'a>> {
        let value = self.expression()?;
        self.consume_or_error(Punctuation(';'), "';' after print statement")?;
        Ok(Stmt::Print(value))
    }

    fn if_statement(&mut self) -> Result<Stmt<'a>> {
        self.consume_or_error(Punctuation('('), "'(' after 'if'")?;
        let condition = self.expression()?;
        self.consume_or_error(Punctuation(')'), "')' after if condition")?;

        let then_branch = Box::new(self.statement()?);

        // Greedy: a dangling `else` belongs to the innermost `if`
        let else_branch = match self.consume(Expected::Keyword(Keyword::Else)) {
            Ok(_) => Some(Box::new(self.statement()?)),
            Err(_) => None,
        };

        Ok(Stmt::If { condition, then_branch, else_branch })
    }

    fn while_statement(&mut self) -> Result<Stmt<'a>> {
        self.consume_or_error(Punctuation('('), "'(' after 'while'")?;
        let condition = self.expression()?;
        self.consume_or_error(Punctuation(')'), "')' after while condition")?;

        let body = Box::new(self.statement()?);

        Ok(Stmt::While { condition, body })
    }

    fn for_statement(&mut self) -> Result<Stmt<'a>> {
        self.consume_or_error(Punctuation('('), "'(' after 'for'")?;

        let initializer = if self.consume(Punctuation(';')).is_ok() {
            None
        } else if self.consume(Expected::Keyword(Keyword::Var)).is_ok() {
            Some(Box::new(self.var_declaration()?))
        } else {
            Some(Box::new(self.expression_statement()?))
        };

        let condition =
            if self.check(Punctuation(';')) { None } else { Some(self.expression()?) };
        self.consume_or_error(Punctuation(';'), "';' after loop condition")?;

        let increment =
            if self.check(Punctuation(')')) { None } else { Some(self.expression()?) };
        self.consume_or_error(Punctuation(')'), "')' after for clauses")?;

        let body = Box::new(self.statement()?);

        Ok(Stmt::For { initializer, condition, increment, body })
    }

    fn return_statement(&mut self, keyword: Token<'a>) -> Result<Stmt<'a>> {
        let value = if self.check(Punctuation(';')) { None } else { Some(self.expression()?) };
        self.consume_or_error(Punctuation(';'), "';' after return value")?;
        Ok(Stmt::Return { keyword, value })
    }

    /// Declarations up to and including the closing `}`; the `{` is already consumed.
    fn block(&mut self, unterminated: ParserErrorType) -> Result<Vec<Stmt<'a>>> {
        let mut stmts = Vec::new();

        while !self.check(Punctuation('}')) {
            if self.is_at_end() {
                return Err(unterminated.at(self.peek()));
            }
            stmts.push(self.declaration()?);
        }

        self.consume_or_error(Punctuation('}'), "'}' after block")?;
        Ok(stmts)
    }

    fn expression_statement(&mut self) -> Result<Stmt<'a>> {
        let expr = self.expression()?;
        self.consume_or_error(Punctuation(';'), "';' after expression")?;
        Ok(Stmt::Expression(expr))
    }

    fn expression(&mut self) -> Result<Expr<'a>> {
        self.parse_precedence(Precedence::Assignment)
    }

    fn parse_precedence(&mut self, precedence: Precedence) -> Result<Expr<'a>> {
        self.nested(|parser| {
            let depth = parser.depth;
            let result = parser.prefix_then_infixes(precedence);
            parser.depth = depth;
            result
        })
    }

    fn prefix_then_infixes(&mut self, precedence: Precedence) -> Result<Expr<'a>> {
        let prefix_token = *self.peek();
        trace!("Parsing precedence {precedence:?} at {prefix_token}");

        let Some(prefix) = ParseRule::for_token(&prefix_token).prefix else {
            return Err(ParserErrorType::UnexpectedToken.at(&prefix_token));
        };
        self.advance();
        let mut expr = prefix(self, prefix_token)?;

        loop {
            let infix_token = *self.peek();
            let rule = ParseRule::for_token(&infix_token);
            let Some(infix) = rule.infix else {
                break;
            };
            if rule.precedence < precedence {
                break;
            }

            // Every infix step wraps `expr` one level deeper, so chains like
            // `a + b + c` count towards the nesting bound as well
            if self.depth >= MAX_NESTING_DEPTH {
                return Err(ParserErrorType::TooDeeplyNested.at(&infix_token));
            }
            self.depth += 1;

            trace!("Advancing with infix rule for {infix_token}");
            self.advance();
            expr = infix(self, expr, infix_token)?;
        }

        Ok(expr)
    }

    pub(crate) fn literal(&mut self, token: Token<'a>) -> Result<Expr<'a>> {
        Ok(Expr::Literal(token))
    }

    pub(crate) fn variable(&mut self, token: Token<'a>) -> Result<Expr<'a>> {
        Ok(Expr::Variable(token))
    }

    pub(crate) fn grouping(&mut self, _: Token<'a>) -> Result<Expr<'a>> {
        let expr = self.expression()?;
        self.consume_or_error(Punctuation(')'), "')' after expression")?;
        Ok(Expr::Grouping(Box::new(expr)))
    }

    pub(crate) fn unary(&mut self, operator: Token<'a>) -> Result<Expr<'a>> {
        let operand = Box::new(self.parse_precedence(Precedence::Unary)?);
        Ok(Expr::Unary { operator, operand })
    }

    pub(crate) fn binary(&mut self, left: Expr<'a>, operator: Token<'a>) -> Result<Expr<'a>> {
        let next_higher_prec = ParseRule::for_token(&operator).precedence.next_higher_precedence();
        let right = Box::new(self.parse_precedence(next_higher_prec)?);
        Ok(Expr::Binary { left: Box::new(left), operator, right })
    }

    pub(crate) fn logical(&mut self, left: Expr<'a>, operator: Token<'a>) -> Result<Expr<'a>> {
        let next_higher_prec = ParseRule::for_token(&operator).precedence.next_higher_precedence();
        let right = Box::new(self.parse_precedence(next_higher_prec)?);
        Ok(Expr::Logical { left: Box::new(left), operator, right })
    }

    pub(crate) fn assignment(&mut self, target: Expr<'a>, equal: Token<'a>) -> Result<Expr<'a>> {
        // Same precedence again, which makes `a = b = c` group to the right
        let value = Box::new(self.parse_precedence(Precedence::Assignment)?);

        match target {
            Expr::Variable(name) => Ok(Expr::Assign { name, value }),
            _ => Err(ParserErrorType::InvalidAssignmentTarget.at(&equal)),
        }
    }

    pub(crate) fn call(&mut self, callee: Expr<'a>, _: Token<'a>) -> Result<Expr<'a>> {
        let mut arguments = Vec::new();

        if !self.check(Punctuation(')')) {
            loop {
                arguments.push(self.expression()?);

                if self.consume(Punctuation(',')).is_err() {
                    break;
                }
            }
        }

        let closing_paren = self.consume_or_error(Punctuation(')'), "')' after arguments")?;

        Ok(Expr::Call { callee: Box::new(callee), closing_paren, arguments })
    }

    /// Skips to the next likely statement boundary.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().is_some_and(|t| t.is_punctuation(';')) {
                debug!("Synchronized after ';'");
                return;
            }

            if let Some(
                Keyword::Class
                | Keyword::Fun
                | Keyword::Var
                | Keyword::For
                | Keyword::If
                | Keyword::While
                | Keyword::Print
                | Keyword::Return,
            ) = self.peek().keyword()
            {
                debug!("Synchronized at {}", self.peek());
                return;
            }

            self.advance();
        }

        warn!("Reached end of input while synchronizing");
    }
}

// Helpers
impl<'a> Parser<'a> {
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParserErrorType::TooDeeplyNested.at(self.peek()));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn peek(&self) -> &Token<'a> {
        &self.tokens[self.current]
    }

    fn previous(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.current.checked_sub(1)?)
    }

    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    fn advance(&mut self) -> Token<'a> {
        let token = *self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn check(&self, expected: Expected) -> bool {
        expected.matches(self.peek())
    }

    /// `Ok` with the consumed token if it matched, `Err` with the unconsumed one otherwise.
    fn consume(&mut self, expected: Expected) -> std::result::Result<Token<'a>, Token<'a>> {
        if self.check(expected) {
            Ok(self.advance())
        } else {
            Err(*self.peek())
        }
    }

    fn consume_or_error(&mut self, expected: Expected, what: &'static str) -> Result<Token<'a>> {
        self.consume(expected).map_err(|token| ParserErrorType::Expected(what).at(&token))
    }
}
