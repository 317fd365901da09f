#[cfg(test)]
#[path = "./value_tests.rs"]
mod tests;

use crate::{Array, Datetime, Table};
use num_bigint::BigInt;
use std::fmt;

/// A parsed TOML value.
#[derive(Clone, PartialEq)]
pub enum Value {
    String(String),
    Boolean(bool),
    /// An integer that fits in an `i64`.
    Integer(i64),
    /// An integer outside the `i64` range.
    BigInteger(BigInt),
    Float(f64),
    Datetime(Datetime),
    Array(Array),
    Table(Table),
}

impl Value {
    /// Returns the TOML type name: `"string"`, `"integer"`, `"float"`,
    /// `"boolean"`, `"datetime"`, `"array"` or `"table"`.
    pub fn type_str(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) | Value::BigInteger(_) => "integer",
            Value::Float(_) => "float",
            Value::Datetime(_) => "datetime",
            Value::Array(_) => "array",
            Value::Table(_) => "table",
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if it fits in an `i64`.
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns any integer, widened to a [`BigInt`].
    pub fn as_big_integer(&self) -> Option<BigInt> {
        match self {
            Value::Integer(i) => Some(BigInt::from(*i)),
            Value::BigInteger(i) => Some(i.clone()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    pub fn as_datetime(&self) -> Option<&Datetime> {
        match self {
            Value::Datetime(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    #[inline]
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Follows a path of table keys, for example `["fruit", "color"]`.
    pub fn pointer<'k>(&self, path: impl IntoIterator<Item = &'k str>) -> Option<&Value> {
        let mut value = self;
        for key in path {
            value = value.as_table()?.get(key)?;
        }
        Some(value)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => fmt::Debug::fmt(s, f),
            Value::Boolean(b) => fmt::Debug::fmt(b, f),
            Value::Integer(i) => fmt::Debug::fmt(i, f),
            Value::BigInteger(i) => fmt::Debug::fmt(i, f),
            Value::Float(v) => fmt::Debug::fmt(v, f),
            Value::Datetime(dt) => fmt::Debug::fmt(dt, f),
            Value::Array(a) => fmt::Debug::fmt(a, f),
            Value::Table(t) => fmt::Debug::fmt(t, f),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<BigInt> for Value {
    /// Narrows to [`Value::Integer`] when the value fits.
    fn from(i: BigInt) -> Self {
        match i64::try_from(&i) {
            Ok(small) => Value::Integer(small),
            Err(_) => Value::BigInteger(i),
        }
    }
}

impl From<Datetime> for Value {
    fn from(dt: Datetime) -> Self {
        Value::Datetime(dt)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Value::Table(t)
    }
}
