pub mod formatter;
mod operator;

use crate::lexer::Token;
use crate::value::LoxValue;
pub use operator::{AssignmentOperator, BinaryOperator, ConditionalOperator, UnaryOperator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpressionNodeRef(u32);

#[derive(Debug, Clone)]
pub enum ExpressionNode {
    Literal(LoxValue),
    Group {
        inner: ExpressionNodeRef,
    },
    Unary {
        operator: UnaryOperator,
        token: Token,
        rhs: ExpressionNodeRef,
    },
    Binary {
        operator: BinaryOperator,
        token: Token,
        lhs: ExpressionNodeRef,
        rhs: ExpressionNodeRef,
    },
    Conditional {
        condition: ExpressionNodeRef,
        then_branch: ExpressionNodeRef,
        else_branch: ExpressionNodeRef,
    },
    Variable {
        name: Token,
    },
    Assignment {
        name: Token,
        value: ExpressionNodeRef,
    },
}

/// An expression tree that is still being built. Nodes only refer to nodes pushed before them,
/// so the finished tree is acyclic.
#[derive(Debug, Clone, Default)]
pub struct IncompleteExpression {
    nodes: Vec<ExpressionNode>,
}

impl IncompleteExpression {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: ExpressionNode) -> ExpressionNodeRef {
        self.nodes.push(node);
        ExpressionNodeRef(self.nodes.len() as u32 - 1)
    }

    pub fn get_node(&self, node: &ExpressionNodeRef) -> Option<&ExpressionNode> {
        self.nodes.get(node.0 as usize)
    }
}

#[derive(Debug, Clone)]
pub struct Expression {
    nodes: Vec<ExpressionNode>,
    root: ExpressionNodeRef,
}

impl Expression {
    pub fn new(tree: IncompleteExpression, root: ExpressionNodeRef) -> Option<Self> {
        if !(0..tree.nodes.len()).contains(&(root.0 as usize)) {
            None
        } else {
            Some(Self {
                nodes: tree.nodes,
                root,
            })
        }
    }

    /// Convenience for a tree made of a single literal.
    pub fn literal(value: LoxValue) -> Self {
        Self {
            nodes: vec![ExpressionNode::Literal(value)],
            root: ExpressionNodeRef(0),
        }
    }

    pub fn get_root_ref(&self) -> ExpressionNodeRef {
        self.root
    }

    pub fn get_root(&self) -> &ExpressionNode {
        &self.nodes[self.root.0 as usize]
    }

    pub fn get_node(&self, node: &ExpressionNodeRef) -> Option<&ExpressionNode> {
        self.nodes.get(node.0 as usize)
    }
}
