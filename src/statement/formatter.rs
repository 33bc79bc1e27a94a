use super::{Program, Statement};
use crate::expression::formatter::{ExpressionFormatter, SExpressionFormatter};

/// Parenthesized form of statements, one top level statement per line.
pub struct StatementFormatter;

impl StatementFormatter {
    pub fn format(&self, statement: &Statement) -> String {
        let expr = SExpressionFormatter;
        match statement {
            // Children are concatenated without a separator.
            Statement::Block(statements) => {
                let inner: String = statements.iter().map(|s| self.format(s)).collect();
                format!("(block {inner})")
            }
            Statement::Expression(e) => format!("(; {})", expr.format(e)),
            Statement::If {
                condition,
                then_branch,
                else_branch: None,
            } => format!("(if {} {})", expr.format(condition), self.format(then_branch)),
            Statement::If {
                condition,
                then_branch,
                else_branch: Some(else_branch),
            } => format!(
                "(if-else {} {} {})",
                expr.format(condition),
                self.format(then_branch),
                self.format(else_branch)
            ),
            Statement::Print(e) => format!("(print {})", expr.format(e)),
            Statement::Var {
                name,
                initializer: None,
            } => format!("(var {})", name.lexeme),
            Statement::Var {
                name,
                initializer: Some(initializer),
            } => format!("(var {} = {})", name.lexeme, expr.format(initializer)),
        }
    }

    pub fn format_program(&self, program: &Program) -> String {
        program
            .iter()
            .map(|s| self.format(s))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
