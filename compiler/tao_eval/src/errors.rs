//! Evaluation errors.
//!
//! Every failure raised while evaluating a program is an [`EvalError`]: a
//! category ([`EvalErrorKind`]), a rendered message, and the source span of
//! the top-level statement that failed, filled in by the interpreter.
//!
//! Factory functions below are the public way to build errors. They keep
//! message wording in one place.

use std::fmt;

use tao_ir::{BinaryOp, Span, UnaryOp, UpdateOp};

use crate::Value;

/// Result of evaluation.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// Error category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EvalErrorKind {
    /// Operand kind mismatch.
    TypeError,
    /// Unsupported operator for an operand pairing, or a bad `new` target.
    SyntaxError,
    /// Assignment or update target cannot be written.
    NotAssignable,
    /// Indexed value has no index capability.
    NotIndexable,
    /// Key kind does not match the index capability.
    KeyType,
    NotCallable,
    /// Identifier not defined anywhere in the context chain.
    UndefinedName,
    DivideByZero,
    IndexOutOfBounds,
    /// Call depth limit exceeded.
    StackOverflow,
}

impl EvalErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TypeError => "TypeError",
            Self::SyntaxError => "SyntaxError",
            Self::NotAssignable => "NotAssignableError",
            Self::NotIndexable => "NotIndexableError",
            Self::KeyType => "KeyTypeError",
            Self::NotCallable => "NotCallableError",
            Self::UndefinedName => "NameResolutionError",
            Self::DivideByZero => "DivideByZeroError",
            Self::IndexOutOfBounds => "IndexOutOfBoundsError",
            Self::StackOverflow => "StackOverflowError",
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub message: String,
    /// Location of the failing statement, once known.
    pub span: Option<Span>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, message: impl Into<String>) -> Self {
        EvalError {
            kind,
            message: message.into(),
            span: None,
        }
    }

    /// Attach `span` unless a more precise one is already recorded.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for EvalError {}

// Operators

pub fn unary_requires_number(op: UnaryOp, operand: &Value) -> EvalError {
    EvalError::new(
        EvalErrorKind::TypeError,
        format!(
            "operator `{}` requires a number, got {}",
            op.as_symbol(),
            operand.type_name()
        ),
    )
}

pub fn update_requires_number(op: UpdateOp, operand: &Value) -> EvalError {
    EvalError::new(
        EvalErrorKind::TypeError,
        format!(
            "operator `{}` requires a number, got {}",
            op.as_symbol(),
            operand.type_name()
        ),
    )
}

/// Operands of different kinds.
pub fn binary_type_mismatch(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalError::new(
        EvalErrorKind::TypeError,
        format!(
            "cannot apply `{}` to {} and {}",
            op.as_symbol(),
            left.type_name(),
            right.type_name()
        ),
    )
}

/// Operands of the same kind, but the operator is not defined for it.
pub fn unsupported_operator(op: BinaryOp, type_name: &str) -> EvalError {
    EvalError::new(
        EvalErrorKind::SyntaxError,
        format!("operator `{}` is not supported on two {type_name}s", op.as_symbol()),
    )
}

pub fn divide_by_zero() -> EvalError {
    EvalError::new(EvalErrorKind::DivideByZero, "divide by zero")
}

pub fn modulo_by_zero() -> EvalError {
    EvalError::new(EvalErrorKind::DivideByZero, "modulo by zero")
}

// Names and calls

pub fn undefined_name(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::UndefinedName, format!("`{name}` is not defined"))
}

pub fn not_callable(value: &Value) -> EvalError {
    EvalError::new(
        EvalErrorKind::NotCallable,
        format!("{} is not callable", value.type_name()),
    )
}

pub fn not_a_constructor(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::SyntaxError, format!("{name} is not a constructor"))
}

pub fn stack_overflow(limit: usize) -> EvalError {
    EvalError::new(
        EvalErrorKind::StackOverflow,
        format!("maximum call depth exceeded (limit: {limit})"),
    )
}

// Assignment and indexing

pub fn not_assignable(value: &Value) -> EvalError {
    EvalError::new(
        EvalErrorKind::NotAssignable,
        format!("cannot assign to {}", value.type_name()),
    )
}

pub fn not_indexable(value: &Value) -> EvalError {
    EvalError::new(
        EvalErrorKind::NotIndexable,
        format!("{} is not indexable", value.type_name()),
    )
}

pub fn key_type(container: &Value, key: &Value) -> EvalError {
    EvalError::new(
        EvalErrorKind::KeyType,
        format!(
            "cannot index {} with a {} key",
            container.type_name(),
            key.type_name()
        ),
    )
}

pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::new(
        EvalErrorKind::IndexOutOfBounds,
        format!("index {index} out of bounds for array of length {len}"),
    )
}

// Builtins and promises

pub fn wrong_arg_type(func: &str, expected: &str, got: &Value) -> EvalError {
    EvalError::new(
        EvalErrorKind::TypeError,
        format!("{func} expects {expected}, got {}", got.type_name()),
    )
}

pub fn promise_forwarding_cycle() -> EvalError {
    EvalError::new(EvalErrorKind::TypeError, "promise forwards to itself")
}
