use crate::error::Span;
use std::fmt;

/// Root of a parse. Built once and only borrowed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VariableDeclaration {
        name: String,
        constant: bool,
        initializer: Option<Expr>,
        span: Span,
    },
    Expression {
        expr: Expr,
        span: Span,
    },
}

impl Stmt {
    pub fn span(&self) -> &Span {
        match self {
            Stmt::VariableDeclaration { span, .. } => span,
            Stmt::Expression { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Assignment {
        target: Box<Expr>,
        value: Box<Expr>,
        span: Span,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        span: Span,
    },
    Identifier {
        name: String,
        span: Span,
    },
    NumericLiteral {
        value: f64,
        span: Span,
    },
    ObjectLiteral {
        properties: Vec<Property>,
        span: Span,
    },
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
        span: Span,
    },
    /// `object.property` when not computed, `object[property]` when computed.
    Member {
        object: Box<Expr>,
        property: Box<Expr>,
        computed: bool,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Assignment { span, .. } => span,
            Expr::Binary { span, .. } => span,
            Expr::Identifier { span, .. } => span,
            Expr::NumericLiteral { span, .. } => span,
            Expr::ObjectLiteral { span, .. } => span,
            Expr::Call { span, .. } => span,
            Expr::Member { span, .. } => span,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Assignment { .. } => "assignment",
            Expr::Binary { .. } => "binary expression",
            Expr::Identifier { .. } => "identifier",
            Expr::NumericLiteral { .. } => "numeric literal",
            Expr::ObjectLiteral { .. } => "object literal",
            Expr::Call { .. } => "call expression",
            Expr::Member { .. } => "member expression",
        }
    }
}

/// An object-literal entry. A missing value is shorthand for a same-named variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl BinaryOp {
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Subtract),
            "*" => Some(BinaryOp::Multiply),
            "/" => Some(BinaryOp::Divide),
            "%" => Some(BinaryOp::Modulo),
            "^" => Some(BinaryOp::Power),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "^",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
