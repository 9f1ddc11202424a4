//! Tao IR - shared syntax types for the Tao scripting language.
//!
//! This crate is the leaf of the workspace. It has no runtime semantics:
//! the lexer produces [`TokenList`], the parser produces a [`Program`],
//! and the evaluator in `tao_eval` walks it.

pub mod ast;
mod name;
mod span;
mod token;

pub use ast::{
    BinaryOp, Expr, ExprKind, FunctionBody, FunctionDef, Literal, Program, Stmt, StmtKind,
    UnaryOp, UpdateOp,
};
pub use name::Name;
pub use span::{LineIndex, Span};
pub use token::{Token, TokenKind, TokenList};
