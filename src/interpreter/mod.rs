pub mod context;
pub mod environment;

use crate::diagnostic::Reporter;
use crate::evaluator::ExpressionEvaluator;
use crate::expression::Expression;
use crate::statement::{Program, Statement};
use crate::value::error::RuntimeError;
use crate::value::LoxValue;
use environment::Environment;

pub trait SystemContext {
    fn writeln(&mut self, text: &str);
}

/// Top level entry point: evaluates expressions and executes statements, writing printed values
/// to its context.
pub struct Interpreter<C: SystemContext> {
    environment: Environment,
    context: C,
    evaluator: ExpressionEvaluator,
}

impl<C> Interpreter<C>
where
    C: SystemContext,
{
    pub fn new(context: C) -> Self {
        Self {
            environment: Environment::new(),
            context,
            evaluator: ExpressionEvaluator::new(),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }

    /// Evaluates `expr` and prints its value.
    ///
    /// A runtime error is reported once through `reporter` and nothing is printed.
    pub fn interpret<R: Reporter + ?Sized>(
        &mut self,
        expr: &Expression,
        reporter: &mut R,
    ) -> Option<LoxValue> {
        match self.evaluator.evaluate(expr, &mut self.environment) {
            Ok(value) => {
                self.context.writeln(&value.to_string());
                Some(value)
            }
            Err(error) => {
                log::debug!("Runtime error {} on line {}", error.code(), error.line());
                reporter.report_runtime(&error.token, &error.kind.to_string());
                None
            }
        }
    }

    /// Executes every statement in order, stopping at the first runtime error.
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        log::debug!("Running {} statements", program.len());
        for statement in program.iter() {
            self.execute(statement)?;
        }
        Ok(())
    }

    /// Same as [`Interpreter::run`] but reports the error instead of returning it.
    pub fn run_reporting<R: Reporter + ?Sized>(&mut self, program: &Program, reporter: &mut R) -> bool {
        match self.run(program) {
            Ok(()) => true,
            Err(error) => {
                reporter.report_runtime(&error.token, &error.kind.to_string());
                false
            }
        }
    }

    fn execute(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
        match statement {
            Statement::Expression(expr) => {
                let _ = self.evaluator.evaluate(expr, &mut self.environment)?;
            }
            Statement::Print(expr) => {
                let value = self.evaluator.evaluate(expr, &mut self.environment)?;
                self.context.writeln(&value.to_string());
            }
            Statement::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluator.evaluate(expr, &mut self.environment)?,
                    None => LoxValue::Nil,
                };
                self.environment.declare(&name.lexeme, value);
            }
            Statement::Block(statements) => {
                self.environment.push_scope();
                let result = statements.iter().try_for_each(|s| self.execute(s));
                self.environment.pop_scope();
                result?;
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let condition = self.evaluator.evaluate(condition, &mut self.environment)?;
                if condition.is_truthy() {
                    self.execute(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)?;
                }
            }
        }
        Ok(())
    }
}
