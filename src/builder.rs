//! Table resolution.
//!
//! [`Builder`] owns the document being assembled during one parse. Key/value
//! lines are written into the *current* table, which headers move around.
//! Whether a node may still be extended is tracked in a side table keyed by
//! the node's path from the root, so the document itself stays plain data.

#[cfg(test)]
#[path = "./builder_tests.rs"]
mod tests;

use crate::error::ErrorKind;
use crate::value::Value;
use crate::{Array, Table};

/// One step of a path from the root table to a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Step {
    Key(String),
    /// An element of an array of tables.
    Index(usize),
}

type Path = Vec<Step>;

/// How a table or array came into existence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    /// Created as an ancestor of a header; may still get a header of its own.
    Implicit,
    /// Declared with `[name]`.
    Header,
    /// Created by a dotted key.
    Dotted,
    /// An inline table; closed for good.
    Frozen,
    /// Created by `[[name]]`.
    ArrayOfTables,
}

pub(crate) struct Builder {
    root: Table,
    current: Path,
    marks: foldhash::HashMap<Path, Mark>,
}

fn dotted(keys: &[String]) -> String {
    keys.join(".")
}

/// Resolves `path` from `root`, stepping into array elements through
/// [`Step::Index`].
fn table_at<'t>(root: &'t mut Table, path: &[Step]) -> Option<&'t mut Table> {
    let mut table = root;
    let mut steps = path.iter();
    while let Some(step) = steps.next() {
        let Step::Key(key) = step else {
            return None;
        };
        table = match table.get_mut(key)? {
            Value::Table(child) => child,
            Value::Array(array) => {
                let Some(Step::Index(i)) = steps.next() else {
                    return None;
                };
                array.get_mut(*i)?.as_table_mut()?
            }
            _ => return None,
        };
    }
    Some(table)
}

/// Walks the segments of a header before its last one, creating implicit
/// tables as needed. Arrays of tables are entered through their last element.
fn descend_header<'t>(
    mut table: &'t mut Table,
    marks: &mut foldhash::HashMap<Path, Mark>,
    parents: &[String],
    keys: &[String],
) -> Result<(&'t mut Table, Path), ErrorKind> {
    let mut path = Path::new();
    for key in parents {
        path.push(Step::Key(key.clone()));
        let (value, created) = table.get_or_insert_with(key, || Value::Table(Table::new()));
        if created {
            marks.insert(path.clone(), Mark::Implicit);
        }
        let mark = marks.get(&path).copied();
        table = match value {
            Value::Table(child) if mark != Some(Mark::Frozen) => child,
            Value::Array(array) if mark == Some(Mark::ArrayOfTables) => {
                path.push(Step::Index(array.len().saturating_sub(1)));
                match array.last_mut() {
                    Some(Value::Table(child)) => child,
                    _ => return Err(ErrorKind::DuplicateKey { key: dotted(keys) }),
                }
            }
            _ => return Err(ErrorKind::DuplicateKey { key: dotted(keys) }),
        };
    }
    Ok((table, path))
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self {
            root: Table::new(),
            current: Path::new(),
            marks: foldhash::HashMap::default(),
        }
    }

    /// Handles a `[a.b.c]` header.
    pub(crate) fn std_table(&mut self, keys: &[String]) -> Result<(), ErrorKind> {
        let Some((last, parents)) = keys.split_last() else {
            return Err(ErrorKind::Custom("empty table header".into()));
        };
        let marks = &mut self.marks;
        let (table, mut path) = descend_header(&mut self.root, marks, parents, keys)?;
        path.push(Step::Key(last.clone()));

        let (value, created) = table.get_or_insert_with(last, || Value::Table(Table::new()));
        if created {
            marks.insert(path.clone(), Mark::Header);
        } else {
            match (value, marks.get(&path).copied()) {
                (Value::Table(_), Some(Mark::Implicit)) => {
                    marks.insert(path.clone(), Mark::Header);
                }
                (Value::Table(_), Some(Mark::Header)) => {
                    return Err(ErrorKind::DuplicateTable { name: dotted(keys) });
                }
                _ => return Err(ErrorKind::DuplicateKey { key: dotted(keys) }),
            }
        }
        self.current = path;
        Ok(())
    }

    /// Handles a `[[a.b.c]]` header.
    pub(crate) fn array_table(&mut self, keys: &[String]) -> Result<(), ErrorKind> {
        let Some((last, parents)) = keys.split_last() else {
            return Err(ErrorKind::Custom("empty table header".into()));
        };
        let marks = &mut self.marks;
        let (table, mut path) = descend_header(&mut self.root, marks, parents, keys)?;
        path.push(Step::Key(last.clone()));

        let (value, created) = table.get_or_insert_with(last, || Value::Array(Array::new()));
        if created {
            marks.insert(path.clone(), Mark::ArrayOfTables);
        }
        match value {
            Value::Array(array) if marks.get(&path) == Some(&Mark::ArrayOfTables) => {
                path.push(Step::Index(array.len()));
                array.push(Value::Table(Table::new()));
            }
            Value::Table(_) => return Err(ErrorKind::RedefineAsArray { name: dotted(keys) }),
            _ => return Err(ErrorKind::DuplicateKey { key: dotted(keys) }),
        }
        self.current = path;
        Ok(())
    }

    /// Handles `a.b.c = value` relative to the current table.
    pub(crate) fn keyval(&mut self, keys: &[String], value: Value) -> Result<(), ErrorKind> {
        let Some((last, parents)) = keys.split_last() else {
            return Err(ErrorKind::Custom("empty key".into()));
        };
        let marks = &mut self.marks;
        let mut path = self.current.clone();
        let Some(mut table) = table_at(&mut self.root, &self.current) else {
            return Err(ErrorKind::Custom("current table is no longer reachable".into()));
        };

        for key in parents {
            path.push(Step::Key(key.clone()));
            let (entry, created) = table.get_or_insert_with(key, || Value::Table(Table::new()));
            if created {
                marks.insert(path.clone(), Mark::Dotted);
            }
            let mark = marks.get(&path).copied();
            table = match entry {
                Value::Table(child) if !matches!(mark, Some(Mark::Frozen | Mark::Header)) => child,
                _ => return Err(ErrorKind::DottedKeyInvalidType { key: dotted(keys) }),
            };
        }

        if table.contains_key(last) {
            return Err(ErrorKind::DuplicateKey { key: dotted(keys) });
        }
        if matches!(value, Value::Table(_)) {
            path.push(Step::Key(last.clone()));
            marks.insert(path, Mark::Frozen);
        }
        table.insert(last.clone(), value);
        Ok(())
    }

    pub(crate) fn finish(self) -> Table {
        self.root
    }
}
