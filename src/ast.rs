//! Expression and statement trees handed over by the front-end
//!
//! Parsing, type checking, and storage assignment happen upstream; what
//! arrives here is already-resolved structure. The trees also deserialize
//! from JSON so front-ends in other languages can hand programs across a
//! process boundary.

use serde::{Deserialize, Serialize};

use crate::lower::BinOp;

/// Expression node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Unsigned integer literal
    Literal(u32),

    /// Read of a named scalar or pointer
    Variable(String),

    /// Array element access: array[index]
    Index {
        /// Name of the array symbol
        array: String,
        /// Element index expression
        index: Box<Expression>,
    },

    /// Address of an lvalue: &operand
    AddressOf(Box<Expression>),

    /// Read through an address: *operand
    Deref(Box<Expression>),

    /// Binary operation: left op right
    Binary {
        /// Operation to apply
        op: BinOp,
        /// Left operand, evaluated first
        left: Box<Expression>,
        /// Right operand, evaluated second
        right: Box<Expression>,
    },
}

impl Expression {
    /// Integer literal
    pub fn literal(value: u32) -> Self {
        Expression::Literal(value)
    }

    /// Named variable read
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }

    /// Array element access
    pub fn index(array: impl Into<String>, index: Expression) -> Self {
        Expression::Index {
            array: array.into(),
            index: Box::new(index),
        }
    }

    /// Address-of an lvalue
    pub fn address_of(operand: Expression) -> Self {
        Expression::AddressOf(Box::new(operand))
    }

    /// Dereference of an address value
    pub fn deref(operand: Expression) -> Self {
        Expression::Deref(Box::new(operand))
    }

    /// Binary operation
    pub fn binary(op: BinOp, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// True when the node can denote a storage location
    pub fn is_lvalue(&self) -> bool {
        matches!(
            self,
            Expression::Variable(_) | Expression::Index { .. } | Expression::Deref(_)
        )
    }

    /// Short description of the node kind, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Literal(_) => "literal",
            Expression::Variable(_) => "variable",
            Expression::Index { .. } => "array element",
            Expression::AddressOf(_) => "address-of expression",
            Expression::Deref(_) => "dereference",
            Expression::Binary { .. } => "binary operation",
        }
    }
}

/// Statement node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Write a value into an lvalue: target = value
    Assign {
        /// Location-denoting expression
        target: Expression,
        /// Value to write
        value: Expression,
    },

    /// Evaluate and discard the result
    ///
    /// Kept as a statement because reads of device registers have side
    /// effects the hardware observes.
    Expression(Expression),
}

impl Statement {
    /// Assignment statement
    pub fn assign(target: Expression, value: Expression) -> Self {
        Statement::Assign { target, value }
    }
}
