use crate::evaluator::Bindings;
use crate::lexer::Token;
use crate::value::error::{RuntimeError, RuntimeErrorKind};
use crate::value::LoxValue;
use compact_str::CompactString;
use std::collections::HashMap;

/// Lexically scoped variable storage. The outermost scope holds the globals and is never popped.
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<HashMap<CompactString, LoxValue>>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            scopes: vec![HashMap::new()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Declares `name` in the innermost scope, shadowing or redefining any previous value.
    pub fn declare(&mut self, name: &str, value: LoxValue) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.into(), value);
        }
    }

    pub fn access(&self, name: &str) -> Option<&LoxValue> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }
}

impl Bindings for Environment {
    fn resolve(&self, name: &Token) -> Result<LoxValue, RuntimeError> {
        self.access(&name.lexeme).cloned().ok_or_else(|| {
            RuntimeError::new(
                RuntimeErrorKind::UndefinedVariable(name.lexeme.clone()),
                name,
            )
        })
    }

    // Only existing variables can be assigned to.
    fn assign(&mut self, name: &Token, value: LoxValue) -> Result<(), RuntimeError> {
        match self
            .scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.get_mut(name.lexeme.as_str()))
        {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(RuntimeError::new(
                RuntimeErrorKind::UndefinedVariable(name.lexeme.clone()),
                name,
            )),
        }
    }
}
