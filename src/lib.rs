//! A TOML parser built on a small parser-combinator engine.
//!
//! The engine lives in the public modules [`outcome`], [`primitive`],
//! [`repeat`], [`combinator`], [`fatal`] and [`locate`] and can be used on its
//! own. The TOML grammar in [`parser`] is written entirely with it and
//! resolves table headers, dotted keys and arrays of tables into a plain
//! [`Table`] tree.
//!
//! # Examples
//!
//! ```
//! use toml_combinator::{Error, ErrorKind, Value};
//!
//! let content = r#"
//! dev-mode = true
//!
//! [[things]]
//! name = "hammer"
//! value = 43
//!
//! [[things]]
//! name = "drill"
//! value = 300
//! color = "green"
//! "#;
//!
//! let table = toml_combinator::parse(content)?;
//!
//! assert_eq!(table.get("dev-mode").and_then(Value::as_bool), Some(true));
//! let things = table.get("things").and_then(Value::as_array).unwrap();
//! assert_eq!(things.len(), 2);
//! assert_eq!(
//!     things.get(1).and_then(|t| t.pointer(["color"])).and_then(Value::as_str),
//!     Some("green"),
//! );
//!
//! let err = toml_combinator::parse("[a]\n[a]\n").unwrap_err();
//! assert_eq!(err.kind, ErrorKind::DuplicateTable { name: "a".into() });
//! # Ok::<(), Error>(())
//! ```

pub mod combinator;
pub mod fatal;
pub mod locate;
pub mod outcome;
pub mod parser;
pub mod primitive;
pub mod repeat;

mod array;
mod builder;
mod character;
mod error;
mod number;
mod span;
mod string;
mod table;
mod time;
mod value;

pub use array::Array;
pub use error::{Diagnostic, Error, ErrorKind};
pub use parser::parse;
pub use span::Span;
pub use table::Table;
pub use time::{Datetime, DatetimeKind};
pub use value::Value;

#[cfg(feature = "serde")]
pub mod impl_serde;
