#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Bang,
    Minus,
}

impl UnaryOperator {
    pub fn get_binding_power(&self) -> u8 {
        match self {
            // 1. Unary operators
            Self::Bang | Self::Minus => 15,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Bang => "!",
            Self::Minus => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Multiply,
    Divide,
    Add,
    Subtract,
    LessThan,
    LessThanEqual,
    GreaterThan,
    GreaterThanEqual,
    EqualEqual,
    BangEqual,
}

impl BinaryOperator {
    pub fn get_binding_power(&self) -> (u8, u8) {
        match self {
            // 2. Multiplicative operators
            Self::Multiply | Self::Divide => (13, 14),
            // 3. Additive operators
            Self::Add | Self::Subtract => (11, 12),
            // 4. Comparison operators
            Self::LessThan | Self::LessThanEqual | Self::GreaterThan | Self::GreaterThanEqual => {
                (9, 10)
            }
            // 5. Equality operators
            Self::EqualEqual | Self::BangEqual => (7, 8),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::LessThan => "<",
            Self::LessThanEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEqual => ">=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
        }
    }
}

/// `condition ? then : else`, right associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalOperator;

impl ConditionalOperator {
    pub fn get_binding_power(&self) -> (u8, u8) {
        // 6. Conditional operator
        (4, 3)
    }
}

/// `name = value`, right associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentOperator;

impl AssignmentOperator {
    pub fn get_binding_power(&self) -> (u8, u8) {
        // 7. Assignment operator
        (2, 1)
    }
}
