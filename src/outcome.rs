//! The result model shared by every parser in the engine.
//!
//! A parser is anything implementing [`Parser`]: given the remaining input it
//! returns either a [`Success`] holding the unconsumed rest and a value, or a
//! [`Failure`] holding the position it stopped at, a fatal flag and a stack of
//! diagnostic [`Frame`]s.
//!
//! Plain functions and closures of the shape `Fn(&'a str) -> PResult<'a, T>`
//! are parsers already, so grammars are written as ordinary Rust functions:
//!
//! ```
//! use toml_combinator::outcome::{PResult, Parser};
//! use toml_combinator::primitive::tag;
//!
//! fn hello(input: &str) -> PResult<'_, &str> {
//!     tag("hello").parse(input)
//! }
//!
//! let ok = hello.parse("hello world").unwrap();
//! assert_eq!(ok.rest, " world");
//! assert!(hello.parse("bye").is_err());
//! ```

#[cfg(test)]
#[path = "./outcome_tests.rs"]
mod tests;

use std::borrow::Cow;
use std::fmt;

/// The outcome of running a parser.
pub type PResult<'a, T> = Result<Success<'a, T>, Failure<'a>>;

/// A successful parse: the value together with the input left unconsumed.
#[derive(Debug, Clone, PartialEq)]
pub struct Success<'a, T> {
    /// Input remaining after the match. Always a suffix of the parser's input.
    pub rest: &'a str,
    /// The produced value.
    pub value: T,
}

impl<'a, T> Success<'a, T> {
    #[inline]
    pub fn new(rest: &'a str, value: T) -> Self {
        Self { rest, value }
    }

    /// Maps the value, keeping the remainder.
    #[inline]
    pub fn map<R>(self, f: impl FnOnce(T) -> R) -> Success<'a, R> {
        Success {
            rest: self.rest,
            value: f(self.value),
        }
    }
}

/// Human readable context attached to a failure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    /// Machine oriented category, for example `"tag"` or `"duplicate-key"`.
    pub kind: Cow<'static, str>,
    /// Free form text.
    pub detail: Cow<'static, str>,
}

impl Message {
    pub fn new(kind: impl Into<Cow<'static, str>>, detail: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind: kind.into(),
            detail: detail.into(),
        }
    }
}

impl From<&'static str> for Message {
    fn from(detail: &'static str) -> Self {
        Self {
            kind: Cow::Borrowed(""),
            detail: Cow::Borrowed(detail),
        }
    }
}

impl From<String> for Message {
    fn from(detail: String) -> Self {
        Self {
            kind: Cow::Borrowed(""),
            detail: Cow::Owned(detail),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_empty() {
            f.write_str(&self.detail)
        } else if self.detail.is_empty() {
            f.write_str(&self.kind)
        } else {
            write!(f, "[{}] {}", self.kind, self.detail)
        }
    }
}

/// A [`Message`] paired with the input that was active when it was pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub message: Message,
    pub at: &'a str,
}

/// A failed parse.
///
/// `stack` is innermost first: primitives push before the combinators that
/// wrap them. Frames are only ever appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure<'a> {
    /// Where the failure happened. Always a suffix of the parser's input.
    pub rest: &'a str,
    /// Fatal failures abort enclosing choices and repetitions.
    pub fatal: bool,
    pub stack: Vec<Frame<'a>>,
}

impl<'a> Failure<'a> {
    /// Appends a frame, keeping the fatal flag as it is.
    #[must_use]
    pub fn with_frame(mut self, message: impl Into<Message>, at: &'a str) -> Self {
        self.stack.push(Frame {
            message: message.into(),
            at,
        });
        self
    }

    /// Moves the failure position, keeping the stack.
    #[must_use]
    #[inline]
    pub fn with_rest(mut self, rest: &'a str) -> Self {
        self.rest = rest;
        self
    }

    #[must_use]
    #[inline]
    pub fn into_fatal(mut self) -> Self {
        self.fatal = true;
        self
    }

    #[must_use]
    #[inline]
    pub fn into_recoverable(mut self) -> Self {
        self.fatal = false;
        self
    }

    /// The innermost frame, which is usually the most specific one.
    pub fn innermost(&self) -> Option<&Frame<'a>> {
        self.stack.first()
    }
}

/// Creates a non-fatal failure at `rest` with an empty stack.
#[inline]
pub fn fail(rest: &str) -> Failure<'_> {
    Failure {
        rest,
        fatal: false,
        stack: Vec::new(),
    }
}

/// A parser over string slices.
///
/// Implemented for every `Fn(&'a str) -> PResult<'a, T>`.
pub trait Parser<'a> {
    type Output;

    fn parse(&self, input: &'a str) -> PResult<'a, Self::Output>;

    /// Pushes `message` onto the stack whenever this parser fails.
    fn label(self, message: impl Into<Message>) -> Labeled<Self>
    where
        Self: Sized,
    {
        Labeled {
            parser: self,
            message: message.into(),
        }
    }
}

impl<'a, T, F> Parser<'a> for F
where
    F: Fn(&'a str) -> PResult<'a, T>,
{
    type Output = T;

    #[inline]
    fn parse(&self, input: &'a str) -> PResult<'a, T> {
        self(input)
    }
}

/// Pins down the signature of a closure so it can be used as a parser.
///
/// ```
/// use toml_combinator::outcome::{from_fn, fail, Parser, Success};
///
/// let first = from_fn(|input| match input.chars().next() {
///     Some(ch) => Ok(Success::new(&input[ch.len_utf8()..], ch)),
///     None => Err(fail(input)),
/// });
/// assert_eq!(first.parse("xy").unwrap().value, 'x');
/// ```
#[inline]
pub fn from_fn<'a, T, F>(f: F) -> F
where
    F: Fn(&'a str) -> PResult<'a, T>,
{
    f
}

/// See [`Parser::label`].
#[derive(Clone)]
pub struct Labeled<P> {
    parser: P,
    message: Message,
}

impl<'a, P> Parser<'a> for Labeled<P>
where
    P: Parser<'a>,
{
    type Output = P::Output;

    fn parse(&self, input: &'a str) -> PResult<'a, P::Output> {
        self.parser
            .parse(input)
            .map_err(|failure| failure.with_frame(self.message.clone(), input))
    }
}
