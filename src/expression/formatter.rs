use super::{Expression, ExpressionNode, ExpressionNodeRef};
use crate::parser::ParserError;
use crate::value::LoxValue;

pub trait ExpressionFormatter {
    fn format(&self, expr: &Expression) -> String;
    fn format_error(&self, error: &ParserError) -> String;
}

pub struct DebugFormatter;

impl ExpressionFormatter for DebugFormatter {
    fn format(&self, expr: &Expression) -> String {
        format!("{expr:?}")
    }

    fn format_error(&self, error: &ParserError) -> String {
        format!("{error:?}")
    }
}

/// Fully parenthesized prefix form, e.g. `(* (group (+ 1.0 2.0)) 3.0)`.
pub struct SExpressionFormatter;

impl SExpressionFormatter {
    fn format_node(expr: &Expression, node: &ExpressionNodeRef) -> String {
        let current_node = expr
            .get_node(node)
            .expect("Node ref came from the tree itself so it must exist.");

        match current_node {
            ExpressionNode::Literal(value) => Self::format_literal(value),
            ExpressionNode::Group { inner } => {
                format!("(group {})", Self::format_node(expr, inner))
            }
            ExpressionNode::Unary { operator, rhs, .. } => {
                format!("({} {})", operator.symbol(), Self::format_node(expr, rhs))
            }
            ExpressionNode::Binary {
                operator, lhs, rhs, ..
            } => format!(
                "({} {} {})",
                operator.symbol(),
                Self::format_node(expr, lhs),
                Self::format_node(expr, rhs),
            ),
            ExpressionNode::Conditional {
                condition,
                then_branch,
                else_branch,
            } => format!(
                "(?: {} {} {})",
                Self::format_node(expr, condition),
                Self::format_node(expr, then_branch),
                Self::format_node(expr, else_branch),
            ),
            ExpressionNode::Variable { name } => name.lexeme.to_string(),
            ExpressionNode::Assignment { name, value } => format!(
                "(assign to {} {})",
                name.lexeme,
                Self::format_node(expr, value)
            ),
        }
    }

    // Numbers keep their fractional part here, unlike the user facing display form.
    fn format_literal(value: &LoxValue) -> String {
        match value {
            LoxValue::Number(v) => format!("{v:?}"),
            v => format!("{v}"),
        }
    }
}

impl ExpressionFormatter for SExpressionFormatter {
    fn format(&self, expr: &Expression) -> String {
        Self::format_node(expr, &expr.get_root_ref())
    }

    fn format_error(&self, error: &ParserError) -> String {
        format!("{error}")
    }
}
