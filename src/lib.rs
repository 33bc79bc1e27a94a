pub mod diagnostic;
pub mod evaluator;
pub mod expression;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod statement;
pub mod value;
