#![cfg_attr(docsrs, doc(cfg(feature = "serde")))]

//! Provides [`serde::Serialize`] support for the document tree.
//!
//! Datetimes serialize as their normalized text. Integers that do not fit an
//! `i64` are written as `i128` when possible and as decimal strings otherwise.

#[cfg(test)]
#[path = "./impl_serde_tests.rs"]
mod tests;

use crate::{Array, Datetime, Table, Value};
use serde::ser::{SerializeMap, SerializeSeq};

impl serde::Serialize for Value {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::String(s) => ser.serialize_str(s),
            Value::Boolean(b) => ser.serialize_bool(*b),
            Value::Integer(i) => ser.serialize_i64(*i),
            Value::BigInteger(big) => match i128::try_from(big) {
                Ok(i) => ser.serialize_i128(i),
                Err(_) => ser.collect_str(big),
            },
            Value::Float(f) => ser.serialize_f64(*f),
            Value::Datetime(dt) => dt.serialize(ser),
            Value::Array(arr) => arr.serialize(ser),
            Value::Table(tab) => tab.serialize(ser),
        }
    }
}

impl serde::Serialize for Array {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut seq = ser.serialize_seq(Some(self.len()))?;
        for ele in self.iter() {
            seq.serialize_element(ele)?;
        }
        seq.end()
    }
}

impl serde::Serialize for Table {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = ser.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl serde::Serialize for Datetime {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        ser.serialize_str(self.as_str())
    }
}
