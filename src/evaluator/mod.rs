//! Tree-walking evaluation of expressions.
//!
//! Operands are evaluated depth first, left before right. The first runtime error aborts the
//! walk and is returned unchanged, so at most one error surfaces per call.

use crate::expression::{BinaryOperator, Expression, ExpressionNode, ExpressionNodeRef, UnaryOperator};
use crate::lexer::Token;
use crate::value::error::{RuntimeError, RuntimeErrorKind};
use crate::value::LoxValue;

/// Variable storage the evaluator reads and writes names through.
pub trait Bindings {
    fn resolve(&self, name: &Token) -> Result<LoxValue, RuntimeError>;
    fn assign(&mut self, name: &Token, value: LoxValue) -> Result<(), RuntimeError>;
}

/// Storage with no variables at all. Every access is an undefined variable.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unbound;

impl Bindings for Unbound {
    fn resolve(&self, name: &Token) -> Result<LoxValue, RuntimeError> {
        Err(RuntimeError::new(
            RuntimeErrorKind::UndefinedVariable(name.lexeme.clone()),
            name,
        ))
    }

    fn assign(&mut self, name: &Token, value: LoxValue) -> Result<(), RuntimeError> {
        let _ = value;
        Err(RuntimeError::new(
            RuntimeErrorKind::UndefinedVariable(name.lexeme.clone()),
            name,
        ))
    }
}

/// Evaluates `expr` with a fresh evaluator.
pub fn evaluate<B: Bindings + ?Sized>(
    expr: &Expression,
    bindings: &mut B,
) -> Result<LoxValue, RuntimeError> {
    ExpressionEvaluator::new().evaluate(expr, bindings)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate<B: Bindings + ?Sized>(
        &self,
        expr: &Expression,
        bindings: &mut B,
    ) -> Result<LoxValue, RuntimeError> {
        self.evaluate_node(expr, &expr.get_root_ref(), bindings)
    }

    fn evaluate_node<B: Bindings + ?Sized>(
        &self,
        expr: &Expression,
        node: &ExpressionNodeRef,
        bindings: &mut B,
    ) -> Result<LoxValue, RuntimeError> {
        let current_node = expr
            .get_node(node)
            .expect("Node ref came from the tree itself so it must exist.");

        let result = match current_node {
            ExpressionNode::Literal(value) => value.clone(),
            ExpressionNode::Group { inner } => self.evaluate_node(expr, inner, bindings)?,
            ExpressionNode::Unary {
                operator,
                token,
                rhs,
            } => {
                let rhs = self.evaluate_node(expr, rhs, bindings)?;
                Self::evaluate_unary(operator, &rhs)
                    .map_err(|kind| RuntimeError::new(kind, token))?
            }
            ExpressionNode::Binary {
                operator,
                token,
                lhs,
                rhs,
            } => {
                let lhs = self.evaluate_node(expr, lhs, bindings)?;
                let rhs = self.evaluate_node(expr, rhs, bindings)?;
                Self::evaluate_binary(operator, &lhs, &rhs)
                    .map_err(|kind| RuntimeError::new(kind, token))?
            }
            ExpressionNode::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                // Only the selected branch is evaluated.
                if self.evaluate_node(expr, condition, bindings)?.is_truthy() {
                    self.evaluate_node(expr, then_branch, bindings)?
                } else {
                    self.evaluate_node(expr, else_branch, bindings)?
                }
            }
            ExpressionNode::Variable { name } => bindings.resolve(name)?,
            ExpressionNode::Assignment { name, value } => {
                let value = self.evaluate_node(expr, value, bindings)?;
                bindings.assign(name, value.clone())?;
                value
            }
        };
        Ok(result)
    }

    fn evaluate_unary(
        operator: &UnaryOperator,
        rhs: &LoxValue,
    ) -> Result<LoxValue, RuntimeErrorKind> {
        match operator {
            UnaryOperator::Bang => Ok(LoxValue::Bool(rhs.logical_not())),
            UnaryOperator::Minus => rhs.numeric_negate(),
        }
    }

    fn evaluate_binary(
        operator: &BinaryOperator,
        lhs: &LoxValue,
        rhs: &LoxValue,
    ) -> Result<LoxValue, RuntimeErrorKind> {
        match operator {
            BinaryOperator::Add => lhs.add(rhs),
            BinaryOperator::Subtract => lhs.subtract(rhs),
            BinaryOperator::Multiply => lhs.multiply(rhs),
            BinaryOperator::Divide => lhs.divide(rhs),
            BinaryOperator::LessThan => lhs.less_than(rhs),
            BinaryOperator::LessThanEqual => lhs.less_than_or_equal(rhs),
            BinaryOperator::GreaterThan => lhs.greater_than(rhs),
            BinaryOperator::GreaterThanEqual => lhs.greater_than_or_equal(rhs),
            BinaryOperator::EqualEqual => Ok(LoxValue::Bool(lhs.is_equal(rhs))),
            BinaryOperator::BangEqual => Ok(LoxValue::Bool(lhs.is_not_equal(rhs))),
        }
    }
}
