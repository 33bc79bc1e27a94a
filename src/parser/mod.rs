mod error;

use crate::{
    expression::{
        AssignmentOperator, BinaryOperator, ConditionalOperator, Expression, ExpressionNode,
        ExpressionNodeRef, IncompleteExpression, UnaryOperator,
    },
    lexer::{Literal, Token, TokenKind},
    statement::{Program, Statement},
    value::LoxValue,
};
pub use error::{ParserError, ParserErrorKind};

/// Builds expression and statement trees from a scanned token sequence.
pub struct Parser<'tok> {
    tokens: &'tok [Token],
    current: usize,
    eof: Token,
}

impl<'tok> Parser<'tok> {
    pub fn new(tokens: &'tok [Token]) -> Self {
        let eof = match tokens.last() {
            Some(last) => Token::eof(last.line, last.span.end.to_usize()),
            None => Token::eof(1, 0),
        };
        Self {
            tokens,
            current: 0,
            eof,
        }
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }

    fn next_token(&mut self) -> Token {
        let token = self.peek().clone();
        if !matches!(token.kind, TokenKind::Eof) {
            self.current += 1;
        }
        token
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParserError> {
        let next_token = self.next_token();
        if next_token.kind != expected {
            Err(ParserError {
                line: next_token.line,
                kind: ParserErrorKind::UnexpectedToken {
                    actual: next_token.kind,
                    expected,
                },
            })
        } else {
            Ok(next_token)
        }
    }

    fn eat_if(&mut self, next: TokenKind) -> Option<Token> {
        if self.peek().kind != next {
            None
        } else {
            Some(self.next_token())
        }
    }

    /// Requires that every token has been consumed.
    pub fn finish(&mut self) -> Result<(), ParserError> {
        self.expect(TokenKind::Eof).map(|_| ())
    }
}

// Pratt parser for expressions
impl<'tok> Parser<'tok> {
    pub fn parse_expression(&mut self) -> Result<Expression, ParserError> {
        let mut tree = IncompleteExpression::new();
        let root = self.parse_expression_pratt(0, &mut tree)?;

        Ok(Expression::new(tree, root)
            .expect("Root was obtained from the tree itself so it must be valid."))
    }

    fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Add),
            TokenKind::Minus => Some(BinaryOperator::Subtract),
            TokenKind::Star => Some(BinaryOperator::Multiply),
            TokenKind::Slash => Some(BinaryOperator::Divide),
            TokenKind::LessThan => Some(BinaryOperator::LessThan),
            TokenKind::LessThanEqual => Some(BinaryOperator::LessThanEqual),
            TokenKind::GreaterThan => Some(BinaryOperator::GreaterThan),
            TokenKind::GreaterThanEqual => Some(BinaryOperator::GreaterThanEqual),
            TokenKind::EqualEqual => Some(BinaryOperator::EqualEqual),
            TokenKind::BangEqual => Some(BinaryOperator::BangEqual),
            _ => None,
        }
    }

    fn expect_left_expression(
        &mut self,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let token = self.next_token();

        let node = match token.kind {
            TokenKind::Eof => {
                return Err(ParserError {
                    kind: ParserErrorKind::UnexpectedEof,
                    line: token.line,
                })
            }
            TokenKind::NumericLiteral | TokenKind::StringLiteral => {
                let value = match token.literal {
                    Some(Literal::Number(v)) => LoxValue::Number(v),
                    Some(Literal::String(ref v)) => LoxValue::String(v.clone()),
                    None => LoxValue::Nil,
                };
                tree.push(ExpressionNode::Literal(value))
            }
            TokenKind::KeywordNil => tree.push(ExpressionNode::Literal(LoxValue::Nil)),
            TokenKind::KeywordTrue => tree.push(ExpressionNode::Literal(LoxValue::Bool(true))),
            TokenKind::KeywordFalse => tree.push(ExpressionNode::Literal(LoxValue::Bool(false))),
            TokenKind::Ident => tree.push(ExpressionNode::Variable { name: token }),
            // Unary operators
            TokenKind::Minus | TokenKind::Bang => {
                let operator = if token.kind == TokenKind::Minus {
                    UnaryOperator::Minus
                } else {
                    UnaryOperator::Bang
                };
                let rbp = operator.get_binding_power();
                let rhs = self.parse_expression_pratt(rbp, tree)?;
                tree.push(ExpressionNode::Unary {
                    operator,
                    token,
                    rhs,
                })
            }
            // Bracketed expression
            TokenKind::LeftParenthesis => {
                let inner = self.parse_expression_pratt(0, tree)?;
                self.expect(TokenKind::RightParenthesis)?;
                tree.push(ExpressionNode::Group { inner })
            }
            kind => {
                return Err(ParserError {
                    kind: ParserErrorKind::NonExpression(kind),
                    line: token.line,
                })
            }
        };
        Ok(node)
    }

    fn parse_expression_pratt(
        &mut self,
        min_bp: u8,
        tree: &mut IncompleteExpression,
    ) -> Result<ExpressionNodeRef, ParserError> {
        let mut lhs = self.expect_left_expression(tree)?;

        loop {
            let kind = self.peek().kind;
            if let Some(operator) = Self::binary_operator(kind) {
                let (lbp, rbp) = operator.get_binding_power();
                if lbp < min_bp {
                    break;
                }
                let token = self.next_token();
                let rhs = self.parse_expression_pratt(rbp, tree)?;
                lhs = tree.push(ExpressionNode::Binary {
                    operator,
                    token,
                    lhs,
                    rhs,
                });
                continue;
            }

            match kind {
                TokenKind::Question => {
                    let (lbp, rbp) = ConditionalOperator.get_binding_power();
                    if lbp < min_bp {
                        break;
                    }
                    let _ = self.next_token();
                    let then_branch = self.parse_expression_pratt(0, tree)?;
                    self.expect(TokenKind::Colon)?;
                    let else_branch = self.parse_expression_pratt(rbp, tree)?;
                    lhs = tree.push(ExpressionNode::Conditional {
                        condition: lhs,
                        then_branch,
                        else_branch,
                    });
                }
                TokenKind::Equal => {
                    let (lbp, rbp) = AssignmentOperator.get_binding_power();
                    if lbp < min_bp {
                        break;
                    }
                    let equal = self.next_token();
                    let name = match tree.get_node(&lhs) {
                        Some(ExpressionNode::Variable { name }) => name.clone(),
                        _ => {
                            return Err(ParserError {
                                kind: ParserErrorKind::InvalidAssignmentTarget,
                                line: equal.line,
                            })
                        }
                    };
                    let value = self.parse_expression_pratt(rbp, tree)?;
                    lhs = tree.push(ExpressionNode::Assignment { name, value });
                }
                _ => break,
            }
        }
        Ok(lhs)
    }
}

// Parse program/statements
impl<'tok> Parser<'tok> {
    pub fn parse(&mut self) -> Result<Program, ParserError> {
        let mut statements = Vec::new();
        while !matches!(self.peek().kind, TokenKind::Eof) {
            statements.push(self.parse_declaration()?);
        }
        log::debug!("Parsed {} top level statements", statements.len());
        Ok(Program::new(statements))
    }

    fn parse_declaration(&mut self) -> Result<Statement, ParserError> {
        if self.eat_if(TokenKind::KeywordVar).is_some() {
            let name = self.expect(TokenKind::Ident)?;
            let initializer = match self.eat_if(TokenKind::Equal) {
                Some(_) => Some(self.parse_expression()?),
                None => None,
            };
            self.expect(TokenKind::Semicolon)?;
            return Ok(Statement::Var { name, initializer });
        }
        self.parse_statement()
    }

    fn parse_statement(&mut self) -> Result<Statement, ParserError> {
        match self.peek().kind {
            TokenKind::KeywordPrint => {
                let _ = self.next_token();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Statement::Print(expr))
            }
            TokenKind::LeftBrace => {
                let _ = self.next_token();
                let mut statements = Vec::new();
                while !matches!(self.peek().kind, TokenKind::RightBrace | TokenKind::Eof) {
                    statements.push(self.parse_declaration()?);
                }
                self.expect(TokenKind::RightBrace)?;
                Ok(Statement::Block(statements))
            }
            TokenKind::KeywordIf => {
                let _ = self.next_token();
                self.expect(TokenKind::LeftParenthesis)?;
                let condition = self.parse_expression()?;
                self.expect(TokenKind::RightParenthesis)?;
                let then_branch = Box::new(self.parse_statement()?);
                let else_branch = match self.eat_if(TokenKind::KeywordElse) {
                    Some(_) => Some(Box::new(self.parse_statement()?)),
                    None => None,
                };
                Ok(Statement::If {
                    condition,
                    then_branch,
                    else_branch,
                })
            }
            _ => {
                let expr = self.parse_expression()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(Statement::Expression(expr))
            }
        }
    }
}
