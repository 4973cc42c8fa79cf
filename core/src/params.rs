//! Parameter values and the ordered parameter mapping.
//!
//! # Design
//! `ParamValue` is a tagged variant so `encode` never has to guess whether a
//! value is a list. `Params` keeps insertion order in a plain `Vec`: mappings
//! are small, and ordered output makes encoded strings predictable.

use std::fmt;

use serde_json::Value;

use crate::error::Error;

/// A single parameter value: one scalar or an ordered list of scalars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
}

impl ParamValue {
    /// All values in encoding order. A scalar yields exactly one item.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        let slice = match self {
            ParamValue::Scalar(value) => std::slice::from_ref(value),
            ParamValue::List(values) => values.as_slice(),
        };
        slice.iter().map(String::as_str)
    }

    /// Append `value`, turning a scalar into a two-element list.
    pub(crate) fn push(&mut self, value: String) {
        match self {
            ParamValue::Scalar(first) => {
                let first = std::mem::take(first);
                *self = ParamValue::List(vec![first, value]);
            }
            ParamValue::List(values) => values.push(value),
        }
    }
}

macro_rules! scalar_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from!(&str, String, &String, char, bool);
scalar_from!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: fmt::Display> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(values.iter().map(ToString::to_string).collect())
    }
}

impl<T: fmt::Display, const N: usize> From<[T; N]> for ParamValue {
    fn from(values: [T; N]) -> Self {
        ParamValue::List(values.iter().map(ToString::to_string).collect())
    }
}

/// Insertion-ordered mapping of unique keys to parameter values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style `insert`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace `key`. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Record another occurrence of `key`, accumulating repeated keys into a list.
    pub(crate) fn append(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => slot.push(value),
            None => self.entries.push((key, ParamValue::Scalar(value))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overwrite every key of `overrides` into `self`; keys new to `self` are
    /// appended in the order `overrides` lists them.
    pub fn merge(&mut self, overrides: Params) {
        for (key, value) in overrides.entries {
            self.insert(key, value);
        }
    }

    /// Build a mapping from a JSON object.
    ///
    /// Strings, numbers and booleans become scalars; arrays of those become
    /// lists. `null`, nested objects and nested arrays are rejected with
    /// `Error::Encoding`.
    pub fn from_json(value: &Value) -> Result<Self, Error> {
        let Value::Object(map) = value else {
            return Err(Error::Encoding {
                key: String::new(),
                reason: format!("expected a JSON object, found {}", json_kind(value)),
            });
        };
        let mut params = Params::new();
        for (key, value) in map {
            let value = match value {
                Value::Array(items) => ParamValue::List(
                    items
                        .iter()
                        .map(|item| json_scalar(key, item))
                        .collect::<Result<_, _>>()?,
                ),
                other => ParamValue::Scalar(json_scalar(key, other)?),
            };
            params.insert(key.clone(), value);
        }
        Ok(params)
    }
}

fn json_scalar(key: &str, value: &Value) -> Result<String, Error> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(Error::Encoding {
            key: key.to_string(),
            reason: format!("{} is not a scalar", json_kind(other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
