//! Runtime values.
//!
//! [`Value`] is a closed set of kinds. Scalars (`Nil`, `Boolean`, `Number`,
//! `String`) have value semantics; `Object`, `Array`, `Function` and
//! `Promise` are shared handles.
//!
//! # Truthiness
//!
//! | kind        | truthy when             |
//! |-------------|-------------------------|
//! | `Nil`       | never                   |
//! | `Boolean`   | its own value           |
//! | `Number`    | nonzero                 |
//! | `String`    | non-empty               |
//! | `Variable`  | its resolved target is  |
//! | everything else | always              |

mod compound;

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;
use tao_ir::Name;

pub use compound::{
    ArrayRef, BuiltinValue, ConstructFn, ConstructorValue, FunctionValue, NativeFn, ObjectRef,
    Receiver,
};

use crate::{ContextRef, EvalResult, PromiseRef};

/// Evaluated argument list.
pub type Args = SmallVec<[Value; 4]>;

/// Nesting depth after which display output is elided.
const MAX_DISPLAY_DEPTH: usize = 16;

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Boolean(bool),
    Number(i64),
    String(Rc<str>),
    /// Deferred binding built by a host; evaluation never produces one.
    /// Resolved against the context wherever it is used.
    Variable(Name),
    Function(FunctionValue),
    Builtin(BuiltinValue),
    Object(ObjectRef),
    Array(ArrayRef),
    Constructor(ConstructorValue),
    Promise(PromiseRef),
}

impl Value {
    pub fn string(text: &str) -> Self {
        Value::String(Rc::from(text))
    }

    pub fn array(elems: Vec<Value>) -> Self {
        Value::Array(ArrayRef::new(elems))
    }

    pub fn object(props: impl IntoIterator<Item = (Name, Value)>) -> Self {
        Value::Object(props.into_iter().collect())
    }

    pub fn builtin(name: &str, func: NativeFn) -> Self {
        Value::Builtin(BuiltinValue::new(name, func))
    }

    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Variable(_) => "variable",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::Constructor(_) => "constructor",
            Value::Promise(_) => "promise",
        }
    }

    #[inline]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    #[inline]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Resolve a `Variable` against `ctx`; other kinds resolve to themselves.
    pub fn resolve(&self, ctx: &ContextRef) -> EvalResult {
        match self {
            Value::Variable(name) => ctx.find(name),
            other => Ok(other.clone()),
        }
    }

    /// Truthiness of a value that is not a `Variable`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0,
            Value::String(s) => !s.is_empty(),
            Value::Variable(_)
            | Value::Function(_)
            | Value::Builtin(_)
            | Value::Object(_)
            | Value::Array(_)
            | Value::Constructor(_)
            | Value::Promise(_) => true,
        }
    }

    /// Truthiness as seen from `ctx`.
    ///
    /// A `Variable` is resolved once; an unresolvable name is an error.
    pub fn truthiness(&self, ctx: &ContextRef) -> EvalResult<bool> {
        match self {
            Value::Variable(name) => Ok(ctx.find(name)?.is_truthy()),
            other => Ok(other.is_truthy()),
        }
    }

    /// `open` holds the containers currently being printed; meeting one
    /// again prints an elision instead of recursing.
    fn fmt_nested(
        &self,
        f: &mut fmt::Formatter<'_>,
        open: &mut SmallVec<[usize; 8]>,
    ) -> fmt::Result {
        match self {
            Value::String(s) if !open.is_empty() => write!(f, "{s:?}"),
            Value::Object(obj) => {
                if open.len() >= MAX_DISPLAY_DEPTH || open.contains(&obj.addr()) {
                    return f.write_str("{...}");
                }
                open.push(obj.addr());
                f.write_str("{")?;
                for (i, (key, value)) in obj.sorted_entries().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: ")?;
                    value.fmt_nested(f, open)?;
                }
                open.pop();
                f.write_str("}")
            }
            Value::Array(arr) => {
                if open.len() >= MAX_DISPLAY_DEPTH || open.contains(&arr.addr()) {
                    return f.write_str("[...]");
                }
                open.push(arr.addr());
                f.write_str("[")?;
                for (i, elem) in arr.to_vec().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    elem.fmt_nested(f, open)?;
                }
                open.pop();
                f.write_str("]")
            }
            Value::Nil => f.write_str("nil"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => f.write_str(s),
            Value::Variable(name) => write!(f, "{name}"),
            Value::Function(func) => match func.name() {
                Some(name) => write!(f, "function {name}"),
                None => f.write_str("function"),
            },
            Value::Builtin(b) => write!(f, "builtin {}", b.name),
            Value::Constructor(c) => write!(f, "constructor {}", c.name),
            Value::Promise(_) => f.write_str("promise"),
        }
    }
}

/// Identity equality: scalars compare by value, reference kinds by handle,
/// builtins by native function.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Variable(a), Value::Variable(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => {
                Rc::ptr_eq(&a.def, &b.def) && a.closure.ptr_eq(&b.closure)
            }
            (Value::Builtin(a), Value::Builtin(b)) => a.same_function(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Constructor(a), Value::Constructor(b)) => {
                a.construct as usize == b.construct as usize
            }
            (Value::Promise(a), Value::Promise(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, &mut SmallVec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("Nil"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Variable(name) => write!(f, "Variable({name})"),
            Value::Object(obj) => write!(f, "{obj:?}"),
            Value::Array(arr) => write!(f, "{arr:?}"),
            other => write!(f, "{}({other})", capitalized(other.type_name())),
        }
    }
}

fn capitalized(type_name: &str) -> String {
    let mut chars = type_name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::string(text)
    }
}
