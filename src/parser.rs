use crate::ast::{BinaryOp, Expr, Program, Property, Stmt};
use crate::error::{ParseError, ScriptoError, Span};
use crate::lexer::{Token, TokenType};

/// Recursive-descent parser with one token of lookahead and no backtracking.
///
/// Precedence, lowest first: assignment, object literal, additive,
/// multiplicative, exponential, call, member, primary.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    /// `tokens` must end with an `Eof` token, as produced by `Lexer::scan_tokens`.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    pub fn parse(&mut self) -> Result<Program, ScriptoError> {
        let mut body = Vec::new();

        while !self.is_at_end() {
            body.push(self.statement()?);
        }

        tracing::debug!(statements = body.len(), "parsed program");
        Ok(Program { body })
    }

    fn statement(&mut self) -> Result<Stmt, ScriptoError> {
        if self.match_types(&[TokenType::Let, TokenType::Const]) {
            self.variable_declaration()
        } else {
            self.expression_statement()
        }
    }

    fn variable_declaration(&mut self) -> Result<Stmt, ScriptoError> {
        let keyword = self.previous().clone();
        let constant = keyword.token_type == TokenType::Const;
        let context = format!("after '{}'", keyword.lexeme);
        let name = self.consume(TokenType::Identifier, &context)?.lexeme.clone();

        let initializer = if self.match_types(&[TokenType::Equals]) {
            Some(self.expression()?)
        } else if constant {
            return Err(ScriptoError::parse_error(
                Span::new(keyword.span.start, self.previous().span.end),
                ParseError::IllegalConstDeclaration(name.clone()),
            )
            .with_help(format!(
                "Give the constant a value: const {} = ...; or declare it with 'let'.",
                name
            )));
        } else {
            None
        };

        let end = self
            .consume_with_help(
                TokenType::Semicolon,
                "after variable declaration",
                "Variable declarations end with ';'. Example: let x = 5;",
            )?
            .span
            .end;

        Ok(Stmt::VariableDeclaration {
            name,
            constant,
            initializer,
            span: Span::new(keyword.span.start, end),
        })
    }

    fn expression_statement(&mut self) -> Result<Stmt, ScriptoError> {
        let expr = self.expression()?;
        let start = expr.span().start;

        // Semicolons after expressions are optional
        if self.check(&TokenType::Semicolon) {
            self.advance();
        }

        let end = self.previous().span.end;

        Ok(Stmt::Expression {
            expr,
            span: Span::new(start, end),
        })
    }

    fn expression(&mut self) -> Result<Expr, ScriptoError> {
        self.assignment()
    }

    /// Any target parses; the evaluator rejects everything but identifiers.
    fn assignment(&mut self) -> Result<Expr, ScriptoError> {
        let target = self.object_literal()?;

        if self.match_types(&[TokenType::Equals]) {
            let value = self.assignment()?;
            let span = target.span().to(value.span());
            return Ok(Expr::Assignment {
                target: Box::new(target),
                value: Box::new(value),
                span,
            });
        }

        Ok(target)
    }

    fn object_literal(&mut self) -> Result<Expr, ScriptoError> {
        if !self.check(&TokenType::LeftBrace) {
            return self.additive();
        }

        let start = self.advance().span.start;
        let mut properties = Vec::new();

        while !self.check(&TokenType::RightBrace) && !self.is_at_end() {
            let key = self
                .consume_with_help(
                    TokenType::Identifier,
                    "as object key",
                    "Object entries are either 'key' or 'key := value'. Example: { a, b := 2 }",
                )?
                .clone();

            let value = if self.match_types(&[TokenType::PropAssign]) {
                Some(self.expression()?)
            } else {
                None
            };

            let end = value.as_ref().map_or(key.span.end, |v| v.span().end);
            properties.push(Property {
                key: key.lexeme,
                value,
                span: Span::new(key.span.start, end),
            });

            self.match_types(&[TokenType::Comma]);
        }

        let end = self
            .consume_with_help(
                TokenType::RightBrace,
                "to close object literal",
                "Object literals must be closed with '}' after the opening '{'.",
            )?
            .span
            .end;

        Ok(Expr::ObjectLiteral {
            properties,
            span: Span::new(start, end),
        })
    }

    fn additive(&mut self) -> Result<Expr, ScriptoError> {
        let mut expr = self.multiplicative()?;

        while let Some(operator) = self.match_operator(&["+", "-"]) {
            let right = self.multiplicative()?;
            expr = Self::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn multiplicative(&mut self) -> Result<Expr, ScriptoError> {
        let mut expr = self.exponential()?;

        while let Some(operator) = self.match_operator(&["*", "/", "%"]) {
            let right = self.exponential()?;
            expr = Self::binary(expr, operator, right);
        }

        Ok(expr)
    }

    /// `^` folds left like the other binary levels: `2 ^ 3 ^ 2` is `(2 ^ 3) ^ 2`.
    fn exponential(&mut self) -> Result<Expr, ScriptoError> {
        let mut expr = self.call()?;

        while let Some(operator) = self.match_operator(&["^"]) {
            let right = self.call()?;
            expr = Self::binary(expr, operator, right);
        }

        Ok(expr)
    }

    fn binary(left: Expr, operator: BinaryOp, right: Expr) -> Expr {
        let span = left.span().to(right.span());
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span,
        }
    }

    fn call(&mut self) -> Result<Expr, ScriptoError> {
        let mut expr = self.member()?;

        while self.match_types(&[TokenType::LeftParen]) {
            expr = self.finish_call(expr)?;
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr, ScriptoError> {
        let mut arguments = Vec::new();

        if !self.check(&TokenType::RightParen) {
            loop {
                arguments.push(self.expression()?);
                if !self.match_types(&[TokenType::Comma]) {
                    break;
                }
            }
        }

        let end = self
            .consume_with_help(
                TokenType::RightParen,
                "after arguments",
                "Function calls must be closed with ')' after the arguments. Example: print(a, b)",
            )?
            .span
            .end;

        Ok(Expr::Call {
            span: Span::new(callee.span().start, end),
            callee: Box::new(callee),
            arguments,
        })
    }

    fn member(&mut self) -> Result<Expr, ScriptoError> {
        let mut expr = self.primary()?;

        loop {
            let (property, computed) = if self.match_types(&[TokenType::Dot]) {
                let token = self.consume(TokenType::Identifier, "after '.'")?.clone();
                let property = Expr::Identifier {
                    name: token.lexeme,
                    span: token.span,
                };
                (property, false)
            } else if self.match_types(&[TokenType::LeftBracket]) {
                let property = self.expression()?;
                self.consume(TokenType::RightBracket, "after computed property")?;
                (property, true)
            } else {
                break;
            };

            let span = Span::new(expr.span().start, self.previous().span.end);
            expr = Expr::Member {
                object: Box::new(expr),
                property: Box::new(property),
                computed,
                span,
            };
        }

        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, ScriptoError> {
        let token = self.peek().clone();

        match token.token_type {
            TokenType::Identifier => {
                self.advance();
                Ok(Expr::Identifier {
                    name: token.lexeme,
                    span: token.span,
                })
            }
            TokenType::Number => {
                self.advance();
                let value = token.lexeme.parse::<f64>().map_err(|_| {
                    Self::unexpected(&token, "number", "in numeric literal")
                })?;
                Ok(Expr::NumericLiteral {
                    value,
                    span: token.span,
                })
            }
            TokenType::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume_with_help(
                    TokenType::RightParen,
                    "after parenthesised expression",
                    "Every opening parenthesis '(' must have a matching closing parenthesis ')'.",
                )?;
                Ok(expr)
            }
            _ => {
                let help = match token.token_type {
                    TokenType::RightParen => "Found ')' without matching '('. Check for unbalanced parentheses.",
                    TokenType::RightBrace => "Found '}' without matching '{'. Check for unbalanced braces.",
                    TokenType::RightBracket => "Found ']' without matching '['. Check for unbalanced brackets.",
                    TokenType::Eof => "Reached end of input while expecting an expression.",
                    _ => "Expected a number, a variable, or a parenthesised expression here.",
                };
                Err(Self::unexpected(&token, "expression", "").with_help(help))
            }
        }
    }

    fn match_types(&mut self, types: &[TokenType]) -> bool {
        for token_type in types {
            if self.check(token_type) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn match_operator(&mut self, operators: &[&str]) -> Option<BinaryOp> {
        if !self.check(&TokenType::BinaryOperator) {
            return None;
        }
        let lexeme = self.peek().lexeme.as_str();
        if !operators.contains(&lexeme) {
            return None;
        }
        let operator = BinaryOp::from_lexeme(lexeme)?;
        self.advance();
        Some(operator)
    }

    fn check(&self, token_type: &TokenType) -> bool {
        if self.is_at_end() {
            false
        } else {
            &self.peek().token_type == token_type
        }
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn unexpected(token: &Token, expected: &str, context: &str) -> ScriptoError {
        ScriptoError::parse_error(
            token.span.clone(),
            ParseError::UnexpectedToken {
                found: token.lexeme.clone(),
                expected: expected.to_string(),
                context: context.to_string(),
            },
        )
    }

    fn consume(&mut self, token_type: TokenType, context: &str) -> Result<&Token, ScriptoError> {
        if self.check(&token_type) {
            return Ok(self.advance());
        }

        let mut error = Self::unexpected(self.peek(), &token_type.to_string(), context);
        if self.is_at_end() && self.current > 0 {
            // Point just past the last real token rather than at EOF.
            error.span = Span::single(self.previous().span.end);
        }
        Err(error)
    }

    fn consume_with_help(
        &mut self,
        token_type: TokenType,
        context: &str,
        help: &str,
    ) -> Result<&Token, ScriptoError> {
        self.consume(token_type, context)
            .map_err(|error| error.with_help(help))
    }
}
