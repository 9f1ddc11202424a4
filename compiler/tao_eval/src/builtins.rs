//! Native globals and array members.

use tao_ir::Name;

use crate::errors::{wrong_arg_type, EvalError, EvalErrorKind};
use crate::promise::construct_promise;
use crate::value::{Args, ArrayRef, BuiltinValue, ConstructorValue, NativeFn, Receiver};
use crate::{ContextRef, EvalResult, Interpreter, Value};

/// Define the builtin globals in `globals`.
pub(crate) fn install(globals: &ContextRef) {
    globals.define(Name::new("print"), Value::builtin("print", builtin_print));
    globals.define(Name::new("println"), Value::builtin("println", builtin_println));
    globals.define(Name::new("len"), Value::builtin("len", builtin_len));
    globals.define(Name::new("typeof"), Value::builtin("typeof", builtin_typeof));
    globals.define(
        Name::new("Promise"),
        Value::Constructor(ConstructorValue {
            name: Name::new("Promise"),
            construct: construct_promise,
        }),
    );
}

/// Named members readable on an array.
pub(crate) fn array_member(array: &ArrayRef, name: &str) -> Value {
    let func: NativeFn = match name {
        "push" => array_push,
        "pop" => array_pop,
        "len" => array_len,
        _ => return Value::Nil,
    };
    Value::Builtin(BuiltinValue::bound(Receiver::Array(array.clone()), name, func))
}

fn join_args(args: &Args) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn length(len: usize) -> Value {
    Value::Number(i64::try_from(len).unwrap_or(i64::MAX))
}

fn first(args: Args) -> Value {
    args.into_iter().next().unwrap_or_default()
}

fn builtin_print(interp: &Interpreter, _: &Receiver, _: &ContextRef, args: Args) -> EvalResult {
    interp.print_handler().print(&join_args(&args));
    Ok(Value::Nil)
}

fn builtin_println(interp: &Interpreter, _: &Receiver, _: &ContextRef, args: Args) -> EvalResult {
    interp.print_handler().println(&join_args(&args));
    Ok(Value::Nil)
}

fn builtin_len(_: &Interpreter, _: &Receiver, _: &ContextRef, args: Args) -> EvalResult {
    match first(args) {
        Value::String(s) => Ok(length(s.len())),
        Value::Array(array) => Ok(length(array.len())),
        Value::Object(object) => Ok(length(object.len())),
        other => Err(wrong_arg_type("len", "a string, array or object", &other)),
    }
}

fn builtin_typeof(_: &Interpreter, _: &Receiver, _: &ContextRef, args: Args) -> EvalResult {
    Ok(Value::string(first(args).type_name()))
}

fn receiver_array<'r>(receiver: &'r Receiver, method: &str) -> EvalResult<&'r ArrayRef> {
    match receiver {
        Receiver::Array(array) => Ok(array),
        Receiver::None | Receiver::Promise(_) => Err(EvalError::new(
            EvalErrorKind::TypeError,
            format!("{method} must be called on an array"),
        )),
    }
}

/// `array.push(values...)`: appends and yields the new length.
fn array_push(_: &Interpreter, receiver: &Receiver, _: &ContextRef, args: Args) -> EvalResult {
    let array = receiver_array(receiver, "push")?;
    Ok(length(array.push(args)))
}

/// `array.pop()`: removes the last element, `nil` when empty.
fn array_pop(_: &Interpreter, receiver: &Receiver, _: &ContextRef, _: Args) -> EvalResult {
    let array = receiver_array(receiver, "pop")?;
    Ok(array.pop().unwrap_or_default())
}

fn array_len(_: &Interpreter, receiver: &Receiver, _: &ContextRef, _: Args) -> EvalResult {
    let array = receiver_array(receiver, "len")?;
    Ok(length(array.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print_handler::buffer_handler;
    use smallvec::smallvec;

    fn interp() -> (Interpreter, crate::SharedPrintHandler) {
        let out = buffer_handler();
        let interp = Interpreter::builder().print_handler(out.clone()).build();
        (interp, out)
    }

    #[test]
    fn print_joins_with_spaces() {
        let (interp, out) = interp();
        let print = interp.globals().lookup("print");
        assert!(print.is_some());
        let print = print.unwrap_or_default();
        let result = interp.call_value(&print, smallvec![Value::from(1), Value::string("a")]);
        assert!(result.is_ok());
        assert_eq!(out.output(), "1 a");
    }

    #[test]
    fn len_rejects_numbers() {
        let (interp, _) = interp();
        let len = interp.globals().lookup("len").unwrap_or_default();
        let err = interp.call_value(&len, smallvec![Value::from(3)]);
        assert_eq!(err.map_err(|e| e.kind), Err(EvalErrorKind::TypeError));
    }

    #[test]
    fn push_returns_new_length() {
        let (interp, _) = interp();
        let array = ArrayRef::new(vec![Value::from(1)]);
        let push = array_member(&array, "push");
        let result = interp.call_value(&push, smallvec![Value::from(2), Value::from(3)]);
        assert_eq!(result.ok().and_then(|v| v.as_number()), Some(3));
        assert_eq!(array.len(), 3);
    }

    #[test]
    fn unknown_member_reads_nil() {
        let array = ArrayRef::new(Vec::new());
        assert!(array_member(&array, "shift").is_nil());
    }
}
