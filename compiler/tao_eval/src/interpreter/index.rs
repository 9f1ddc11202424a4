//! Index reads and writes.
//!
//! | container | key     | read                  | write          |
//! |-----------|---------|-----------------------|----------------|
//! | object    | string  | property or `nil`     | set property   |
//! | array     | number  | element (in bounds)   | replace element|
//! | array     | string  | `push`/`pop`/`len`    | not assignable |
//! | promise   | string  | `then`                | not assignable |
//!
//! Any other key kind on those containers is a key type error. Values with
//! no index capability are not indexable (not assignable on write).

use tao_ir::Name;

use super::Interpreter;
use crate::builtins::array_member;
use crate::errors::{index_out_of_bounds, key_type, not_assignable, not_indexable};
use crate::promise::promise_member;
use crate::{EvalResult, Value};

impl Interpreter {
    pub fn index_get(&self, container: &Value, key: &Value) -> EvalResult {
        match (container, key) {
            (Value::Object(object), Value::String(name)) => {
                Ok(object.get(name).unwrap_or_default())
            }
            (Value::Array(array), Value::Number(i)) => array
                .get(*i)
                .ok_or_else(|| index_out_of_bounds(*i, array.len())),
            (Value::Array(array), Value::String(name)) => Ok(array_member(array, name)),
            (Value::Promise(promise), Value::String(name)) => Ok(promise_member(promise, name)),
            (Value::Object(_) | Value::Array(_) | Value::Promise(_), _) => {
                Err(key_type(container, key))
            }
            _ => Err(not_indexable(container)),
        }
    }

    pub fn index_set(&self, container: &Value, key: &Value, value: Value) -> EvalResult<()> {
        match (container, key) {
            (Value::Object(object), Value::String(name)) => {
                object.set(Name::new(name), value);
                Ok(())
            }
            (Value::Array(array), Value::Number(i)) => {
                if array.set(*i, value) {
                    Ok(())
                } else {
                    Err(index_out_of_bounds(*i, array.len()))
                }
            }
            // Members are read-only.
            (Value::Array(_) | Value::Promise(_), Value::String(_)) => {
                Err(not_assignable(container))
            }
            (Value::Object(_) | Value::Array(_) | Value::Promise(_), _) => {
                Err(key_type(container, key))
            }
            _ => Err(not_assignable(container)),
        }
    }
}
