//! Statement and expression tree.
//!
//! The tree is built once by the parser and never mutated. Each node owns
//! its children; the one exception is [`FunctionDef`], which is shared via
//! `Rc` between the tree and every function value created from it, so a
//! closure can outlive the statement list that defined it.

mod operators;

use std::rc::Rc;

use crate::{Name, Span};

pub use operators::{BinaryOp, UnaryOp, UpdateOp};

/// A parsed program: the top-level statement sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

/// Literal values that appear directly in source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    Nil,
    Boolean(bool),
    Number(i64),
    String(String),
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Identifier and index expressions are the only assignment targets.
    pub fn is_assignable(&self) -> bool {
        matches!(self.kind, ExprKind::Ident(_) | ExprKind::Index { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Ident(Name),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    /// `++x`, `x++`, `--x`, `x--`.
    Update {
        op: UpdateOp,
        prefix: bool,
        target: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Ternary {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    /// `object.key` (key is a string literal) or `object[key]`.
    Index {
        object: Box<Expr>,
        key: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    New {
        constructor: Name,
        args: Vec<Expr>,
    },
    Object(Vec<(Name, Expr)>),
    Array(Vec<Expr>),
    Function(Rc<FunctionDef>),
}

/// A function definition, lambda, or function expression.
#[derive(Debug, PartialEq)]
pub struct FunctionDef {
    /// `None` for lambdas and anonymous function expressions.
    pub name: Option<Name>,
    pub params: Vec<Name>,
    pub body: FunctionBody,
    pub span: Span,
}

#[derive(Debug, PartialEq)]
pub enum FunctionBody {
    /// `function (..) { .. }` and `(..) => { .. }`.
    Block(Vec<Stmt>),
    /// `(..) => expr`.
    Expr(Box<Expr>),
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Empty,
    /// `var name [= init];`
    VarDef {
        name: Name,
        init: Option<Expr>,
    },
    /// `name = value;`
    VarAssign {
        name: Name,
        value: Expr,
    },
    FunctionDef(Rc<FunctionDef>),
    Return(Option<Expr>),
    Expr(Expr),
    Block(Vec<Stmt>),
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        step: Option<Expr>,
        body: Box<Stmt>,
    },
    Break,
}
