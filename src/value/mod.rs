pub mod error;
pub mod formatter;

use compact_str::{format_compact, CompactString, CompactStringExt};
use error::RuntimeErrorKind;

#[derive(Debug, Clone, PartialEq)]
pub enum LoxValue {
    Nil,
    Bool(bool),
    Number(f64),
    String(CompactString),
}

/// The user facing text of a value. Integral numbers drop their `.0` suffix.
impl std::fmt::Display for LoxValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Number(v) => {
                let text = format!("{v:?}");
                write!(f, "{}", text.strip_suffix(".0").unwrap_or(&text))
            }
            Self::String(v) => write!(f, "{v}"),
        }
    }
}

impl From<f64> for LoxValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LoxValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LoxValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl LoxValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
        }
    }
}

// Unary operators
impl LoxValue {
    pub fn is_truthy(&self) -> bool {
        !matches!(self, LoxValue::Bool(false) | LoxValue::Nil)
    }

    pub fn logical_not(&self) -> bool {
        !self.is_truthy()
    }

    pub fn numeric_negate(&self) -> Result<LoxValue, RuntimeErrorKind> {
        match self {
            LoxValue::Number(v) => Ok(LoxValue::Number(-v)),
            v => Err(RuntimeErrorKind::NonNumeric(v.clone())),
        }
    }
}

impl LoxValue {
    // Arithmetic + string concatenation
    pub fn add(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        match (self, other) {
            (LoxValue::Number(lhs), LoxValue::Number(rhs)) => Ok(LoxValue::Number(lhs + rhs)),
            (LoxValue::String(lhs), LoxValue::String(rhs)) => {
                Ok(LoxValue::String([lhs, rhs].concat_compact()))
            }
            (LoxValue::String(lhs), rhs @ LoxValue::Number(_)) => {
                Ok(LoxValue::String(format_compact!("{lhs}{rhs}")))
            }
            (lhs, rhs) => Err(RuntimeErrorKind::NonAddable(lhs.clone(), rhs.clone())),
        }
    }

    pub fn subtract(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        let (lhs, rhs) = Self::numeric_operands(self, other)?;
        Ok(LoxValue::Number(lhs - rhs))
    }

    pub fn multiply(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        let (lhs, rhs) = Self::numeric_operands(self, other)?;
        Ok(LoxValue::Number(lhs * rhs))
    }

    pub fn divide(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        let (lhs, rhs) = Self::numeric_operands(self, other)?;
        if rhs == 0.0 {
            return Err(RuntimeErrorKind::DivisionByZero);
        }
        Ok(LoxValue::Number(lhs / rhs))
    }

    // Comparison
    pub fn less_than(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        let (lhs, rhs) = Self::numeric_operands(self, other)?;
        Ok(LoxValue::Bool(lhs < rhs))
    }

    pub fn less_than_or_equal(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        let (lhs, rhs) = Self::numeric_operands(self, other)?;
        Ok(LoxValue::Bool(lhs <= rhs))
    }

    pub fn greater_than(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        let (lhs, rhs) = Self::numeric_operands(self, other)?;
        Ok(LoxValue::Bool(lhs > rhs))
    }

    pub fn greater_than_or_equal(&self, other: &LoxValue) -> Result<LoxValue, RuntimeErrorKind> {
        let (lhs, rhs) = Self::numeric_operands(self, other)?;
        Ok(LoxValue::Bool(lhs >= rhs))
    }

    // Equality
    pub fn is_equal(&self, other: &LoxValue) -> bool {
        match (self, other) {
            (LoxValue::Nil, LoxValue::Nil) => true,
            (LoxValue::Bool(lhs), LoxValue::Bool(rhs)) => lhs == rhs,
            (LoxValue::Number(lhs), LoxValue::Number(rhs)) => lhs == rhs,
            (LoxValue::String(lhs), LoxValue::String(rhs)) => lhs == rhs,
            _ => false,
        }
    }

    pub fn is_not_equal(&self, other: &LoxValue) -> bool {
        !self.is_equal(other)
    }

    fn numeric_operands(lhs: &LoxValue, rhs: &LoxValue) -> Result<(f64, f64), RuntimeErrorKind> {
        match (lhs, rhs) {
            (LoxValue::Number(lhs), LoxValue::Number(rhs)) => Ok((*lhs, *rhs)),
            (lhs, rhs) => Err(RuntimeErrorKind::NonNumerics(lhs.clone(), rhs.clone())),
        }
    }
}
