use std::fmt;

use itertools::Itertools;
use serde_json::Value;

use crate::{
    error::{WindowError, WindowResult},
    size::WindowSize,
    windowing::{Mode, WindowIterator},
};

/// The elements of an iterable JSON value: array items, object keys or the
/// characters of a string.
pub enum ValueIter {
    Array(std::vec::IntoIter<Value>),
    Keys(std::vec::IntoIter<String>),
    Chars(std::vec::IntoIter<char>),
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl TryFrom<Value> for ValueIter {
    type Error = WindowError;

    fn try_from(value: Value) -> WindowResult<Self> {
        match value {
            Value::Array(items) => Ok(Self::Array(items.into_iter())),
            Value::Object(map) => Ok(Self::Keys(
                map.into_iter().map(|(key, _)| key).collect_vec().into_iter(),
            )),
            Value::String(s) => Ok(Self::Chars(s.chars().collect_vec().into_iter())),
            other => Err(WindowError::Argument(format!(
                "'{}' value is not iterable",
                type_name(&other)
            ))),
        }
    }
}

impl Iterator for ValueIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        match self {
            Self::Array(items) => items.next(),
            Self::Keys(keys) => keys.next().map(Value::String),
            Self::Chars(chars) => chars.next().map(|c| Value::String(c.to_string())),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Array(items) => items.size_hint(),
            Self::Keys(keys) => keys.size_hint(),
            Self::Chars(chars) => chars.size_hint(),
        }
    }
}

impl ExactSizeIterator for ValueIter {}

// renders what is left to pull
impl fmt::Debug for ValueIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array(items) => write!(
                f,
                "array_iterator([{}])",
                items.as_slice().iter().format(", ")
            ),
            Self::Keys(keys) => write!(f, "key_iterator({:?})", keys.as_slice()),
            Self::Chars(chars) => write!(
                f,
                "str_iterator({:?})",
                chars.as_slice().iter().collect::<String>()
            ),
        }
    }
}

fn integer(value: &Value) -> Option<i128> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .map(i128::from)
            .or_else(|| number.as_u64().map(i128::from)),
        _ => None,
    }
}

/// Builds a window iterator from loosely typed arguments.
///
/// Expects exactly `[iterable, n]`. Arity and argument types are checked
/// before the value of `n`, so `[1, 0]` is an argument error while `[[], 0]`
/// is a value error.
pub fn make(mode: Mode, args: Vec<Value>) -> WindowResult<WindowIterator<ValueIter>> {
    let [iterable, size_arg]: [Value; 2] = args.try_into().map_err(|args: Vec<Value>| {
        WindowError::Argument(format!(
            "{mode}() takes exactly 2 arguments ({} given)",
            args.len()
        ))
    })?;
    let n = integer(&size_arg).ok_or_else(|| {
        WindowError::Argument(format!(
            "{mode}() expects an integer n, got '{}' value {size_arg}",
            type_name(&size_arg)
        ))
    })?;
    let source = ValueIter::try_from(iterable)?;
    let size = WindowSize::try_from(n)?;
    Ok(WindowIterator::new(source, mode, size))
}
