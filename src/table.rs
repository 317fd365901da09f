#[cfg(test)]
#[path = "./table_tests.rs"]
mod tests;

use crate::value::Value;
use std::fmt;

/// Tables with at least this many entries keep a hash index next to the
/// entry list. Smaller tables are scanned linearly.
const INDEXED_TABLE_THRESHOLD: usize = 6;

/// A TOML table: key/value pairs kept in insertion order.
///
/// Equality ignores ordering.
#[derive(Clone, Default)]
pub struct Table {
    entries: Vec<(String, Value)>,
    index: foldhash::HashMap<String, usize>,
}

impl Table {
    /// Creates an empty table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry index of `name`.
    pub fn find_index(&self, name: &str) -> Option<usize> {
        if self.entries.len() >= INDEXED_TABLE_THRESHOLD {
            return self.index.get(name).copied();
        }
        for (i, (key, _)) in self.entries.iter().enumerate() {
            if key == name {
                return Some(i);
            }
        }
        None
    }

    /// Returns a reference to the value for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let i = self.find_index(name)?;
        Some(&self.entries[i].1)
    }

    /// Returns a mutable reference to the value for `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        let i = self.find_index(name)?;
        Some(&mut self.entries[i].1)
    }

    /// Returns `true` if the table contains the key.
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.find_index(name).is_some()
    }

    /// Appends an entry. Does **not** check for duplicates.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> &mut Value {
        let name = name.into();
        let len = self.entries.len();
        if len + 1 == INDEXED_TABLE_THRESHOLD {
            for (i, (key, _)) in self.entries.iter().enumerate() {
                self.index.insert(key.clone(), i);
            }
        }
        if len + 1 >= INDEXED_TABLE_THRESHOLD {
            self.index.insert(name.clone(), len);
        }
        self.entries.push((name, value));
        &mut self.entries[len].1
    }

    /// Returns the value stored under `name`, inserting `default()` first if
    /// the key is absent. The flag is `true` when the value was just created.
    pub fn get_or_insert_with(
        &mut self,
        name: &str,
        default: impl FnOnce() -> Value,
    ) -> (&mut Value, bool) {
        match self.find_index(name) {
            Some(i) => (&mut self.entries[i].1, false),
            None => (self.insert(name, default()), true),
        }
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, (String, Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Returns the entries as a slice.
    #[inline]
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a (String, Value);
    type IntoIter = std::slice::Iter<'a, (String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Table {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut table = Table::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}
