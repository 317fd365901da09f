#![allow(clippy::question_mark)]

#[cfg(test)]
#[path = "./error_tests.rs"]
mod tests;

use crate::Span;
use crate::locate::{locate, render_diagnostics};
use crate::outcome::{Failure, Message};
use std::borrow::Cow;
use std::fmt::{self, Debug, Display};

/// Error returned by [`parse`](crate::parse).
#[derive(Debug, Clone)]
pub struct Error {
    /// The error kind
    pub kind: ErrorKind,
    /// The span where the error occurs.
    pub span: Span,
    /// Zero based line and column of `span.start`.
    pub line_info: Option<(usize, usize)>,
    /// The diagnostic frames collected while the failing parse unwound,
    /// innermost first.
    pub stack: Vec<Diagnostic>,
    /// The diagnostic stack rendered against the source.
    pub rendered: String,
}

impl std::error::Error for Error {}

impl From<(ErrorKind, Span)> for Error {
    fn from((kind, span): (ErrorKind, Span)) -> Self {
        Self {
            kind,
            span,
            line_info: None,
            stack: Vec::new(),
            rendered: String::new(),
        }
    }
}

/// One frame of an [`Error`]'s diagnostic stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: String,
    pub detail: String,
    /// Zero based.
    pub line: usize,
    /// Zero based, counted in characters.
    pub column: usize,
}

/// Errors that can occur when parsing TOML.
#[derive(Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input does not match the grammar.
    Syntax,

    /// EOF was reached in the middle of a construct.
    UnexpectedEof,

    /// An invalid escape sequence was found in a string.
    InvalidEscape,

    /// An escape names a code point that is not a Unicode scalar value.
    InvalidEscapeValue(u32),

    /// A string is missing its closing delimiter.
    UnterminatedString,

    /// A number failed to parse.
    InvalidNumber,

    /// A date or time is malformed or out of range.
    InvalidDatetime,

    /// The document exceeds a fixed limit, such as the nesting depth of
    /// arrays and inline tables.
    OutOfRange(&'static str),

    /// Duplicate key in table.
    DuplicateKey {
        /// The duplicate key, as written
        key: String,
    },

    /// A table header was declared twice.
    DuplicateTable {
        /// The name of the duplicate table
        name: String,
    },

    /// A previously defined table was redefined as an array.
    RedefineAsArray {
        /// The name of the array header
        name: String,
    },

    /// Dotted key attempted to extend something that is not an open table.
    DottedKeyInvalidType {
        /// The dotted key, as written
        key: String,
    },

    /// Anything else.
    Custom(Cow<'static, str>),
}

impl ErrorKind {
    /// Short machine readable code, also used as the kind of failure frames.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::UnexpectedEof => "unexpected-eof",
            Self::InvalidEscape => "invalid-escape",
            Self::InvalidEscapeValue(..) => "invalid-escape-value",
            Self::UnterminatedString => "unterminated-string",
            Self::InvalidNumber => "invalid-number",
            Self::InvalidDatetime => "invalid-datetime",
            Self::OutOfRange(..) => "out-of-range",
            Self::DuplicateKey { .. } => "duplicate-key",
            Self::DuplicateTable { .. } => "duplicate-table",
            Self::RedefineAsArray { .. } => "redefine-as-array",
            Self::DottedKeyInvalidType { .. } => "dotted-key-invalid-type",
            Self::Custom(..) => "custom",
        }
    }

    /// Converts a resolution conflict into a failure frame. The detail holds
    /// the key so [`ErrorKind::from_message`] can rebuild the kind.
    pub(crate) fn to_message(&self) -> Message {
        let detail: Cow<'static, str> = match self {
            Self::DuplicateKey { key } | Self::DottedKeyInvalidType { key } => key.clone().into(),
            Self::DuplicateTable { name } | Self::RedefineAsArray { name } => name.clone().into(),
            Self::InvalidEscapeValue(code) => format!("{code:X}").into(),
            Self::OutOfRange(what) => Cow::Borrowed(*what),
            Self::Custom(message) => message.clone(),
            _ => Cow::Borrowed(""),
        };
        Message::new(self.code(), detail)
    }

    /// Recognizes frames carrying a specific error. Generic frames such as
    /// `syntax`, `tag` or `repeat` yield `None`.
    pub fn from_message(message: &Message) -> Option<ErrorKind> {
        let detail = || message.detail.to_string();
        Some(match &*message.kind {
            "invalid-escape" => Self::InvalidEscape,
            "invalid-escape-value" => {
                Self::InvalidEscapeValue(u32::from_str_radix(&message.detail, 16).ok()?)
            }
            "unterminated-string" => Self::UnterminatedString,
            "invalid-number" => Self::InvalidNumber,
            "invalid-datetime" => Self::InvalidDatetime,
            "out-of-range" => match message.detail {
                Cow::Borrowed(what) => Self::OutOfRange(what),
                Cow::Owned(_) => return None,
            },
            "duplicate-key" => Self::DuplicateKey { key: detail() },
            "duplicate-table" => Self::DuplicateTable { name: detail() },
            "redefine-as-array" => Self::RedefineAsArray { name: detail() },
            "dotted-key-invalid-type" => Self::DottedKeyInvalidType { key: detail() },
            "custom" => Self::Custom(Cow::Owned(detail())),
            _ => return None,
        })
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

macro_rules! rtry {
    ($($tt:tt)*) => {
        if let Err(err) = $($tt)* {
            return Err(err);
        }
    };
}

impl Error {
    /// Builds the public error for a failed parse of `source`.
    ///
    /// The kind comes from the innermost frame that names a specific error,
    /// falling back to a syntax error, or an unexpected EOF when the failure
    /// sits at the end of the input.
    pub(crate) fn from_failure(failure: &Failure<'_>, source: &str) -> Self {
        let kind = failure
            .stack
            .iter()
            .find_map(|frame| ErrorKind::from_message(&frame.message))
            .unwrap_or(if failure.rest.is_empty() {
                ErrorKind::UnexpectedEof
            } else {
                ErrorKind::Syntax
            });

        let loc = locate(failure.rest, source);
        let width = source[loc.offset..].chars().next().map_or(0, char::len_utf8);
        let span = Span::new(loc.offset as u32, (loc.offset + width) as u32);

        let stack = failure
            .stack
            .iter()
            .map(|frame| {
                let at = locate(frame.at, source);
                Diagnostic {
                    kind: frame.message.kind.to_string(),
                    detail: frame.message.detail.to_string(),
                    line: at.line,
                    column: at.column,
                }
            })
            .collect();

        Self {
            kind,
            span,
            line_info: Some((loc.line, loc.column)),
            stack,
            rendered: render_diagnostics(failure, source),
        }
    }

    fn describe(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Syntax => f.write_str("invalid TOML syntax"),
            ErrorKind::UnexpectedEof => f.write_str("unexpected eof encountered"),
            ErrorKind::InvalidEscape => f.write_str("invalid escape sequence in string"),
            ErrorKind::InvalidEscapeValue(c) => {
                rtry!(f.write_str("invalid escape value: `"));
                rtry!(write!(f, "{c:X}"));
                f.write_str("`")
            }
            ErrorKind::UnterminatedString => f.write_str("unterminated string"),
            ErrorKind::InvalidNumber => f.write_str("invalid number"),
            ErrorKind::InvalidDatetime => f.write_str("invalid date or time"),
            ErrorKind::OutOfRange(what) => f.write_str(what),
            ErrorKind::DuplicateKey { key } => {
                rtry!(f.write_str("duplicate key: `"));
                rtry!(f.write_str(key));
                f.write_str("`")
            }
            ErrorKind::DuplicateTable { name } => {
                rtry!(f.write_str("redefinition of table `"));
                rtry!(f.write_str(name));
                f.write_str("`")
            }
            ErrorKind::RedefineAsArray { name } => {
                rtry!(f.write_str("table `"));
                rtry!(f.write_str(name));
                f.write_str("` redefined as array")
            }
            ErrorKind::DottedKeyInvalidType { key } => {
                rtry!(f.write_str("dotted key `"));
                rtry!(f.write_str(key));
                f.write_str("` attempted to extend non-table type")
            }
            ErrorKind::Custom(message) => f.write_str(message),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        rtry!(self.describe(f));
        match self.line_info {
            Some((line, column)) => write!(f, " at line {}, column {}", line + 1, column + 1),
            None => Ok(()),
        }
    }
}

#[cfg(feature = "reporting")]
#[cfg_attr(docsrs, doc(cfg(feature = "reporting")))]
impl Error {
    /// Converts this [`Error`] into a [`codespan_reporting::diagnostic::Diagnostic`]
    pub fn to_diagnostic<FileId: Copy + PartialEq>(
        &self,
        fid: FileId,
    ) -> codespan_reporting::diagnostic::Diagnostic<FileId> {
        use codespan_reporting::diagnostic::Label;

        struct Describe<'e>(&'e Error);

        impl Display for Describe<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.describe(f)
            }
        }

        let label = match &self.kind {
            ErrorKind::DuplicateKey { .. } => "duplicate key",
            ErrorKind::DuplicateTable { .. } => "duplicate table",
            ErrorKind::RedefineAsArray { .. } => "redefined as array",
            ErrorKind::DottedKeyInvalidType { .. } => "attempted to extend table here",
            ErrorKind::UnterminatedString => "string is never closed",
            ErrorKind::UnexpectedEof => "eof reached here",
            _ => "here",
        };

        codespan_reporting::diagnostic::Diagnostic::error()
            .with_code(self.kind.to_string())
            .with_message(Describe(self).to_string())
            .with_labels(vec![Label::primary(fid, self.span).with_message(label)])
            .with_notes(
                self.stack
                    .iter()
                    .filter(|frame| !frame.detail.is_empty())
                    .map(|frame| {
                        format!(
                            "{}:{}: {}",
                            frame.line + 1,
                            frame.column + 1,
                            frame.detail
                        )
                    })
                    .collect(),
            )
    }
}
