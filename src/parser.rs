//! The TOML document grammar.
//!
//! Everything here is assembled from the engine's combinators. Semantic
//! actions that build the document run inside [`map_res`] and report key
//! conflicts as fatal failures, so a conflict always ends the parse.

#[cfg(test)]
#[path = "./parser_tests.rs"]
mod tests;

use crate::builder::Builder;
use crate::character::{is_comment_char, is_unquoted_key_char};
use crate::combinator::{
    alt, count, delimited, either, map, map_res, opt, pair, peek, preceded, recognize,
    separated_pair, terminated,
};
use crate::error::{Error, ErrorKind};
use crate::fatal::{catch_fatal, fatal};
use crate::number::number;
use crate::outcome::{Failure, Message, PResult, Parser, Success, fail, from_fn};
use crate::primitive::{eof, newline, position, regex, space0, tag};
use crate::repeat::{more0, more0_chars, more1_chars};
use crate::string::{basic_string, literal_string, string};
use crate::time::datetime;
use crate::{Array, Table, Value, combinator};
use regex::Regex;
use std::cell::RefCell;
use std::sync::LazyLock;

static STD_TABLE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\[[ \t]*").expect("valid pattern"));
static STD_TABLE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[ \t]*\]").expect("valid pattern"));
static ARRAY_TABLE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A\[\[[ \t]*").expect("valid pattern"));
static ARRAY_TABLE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[ \t]*\]\]").expect("valid pattern"));

/// A key/value pair together with where its key starts.
type Entry<'a> = (&'a str, (Vec<String>, Value));

fn conflict(start: &str, kind: ErrorKind) -> Failure<'_> {
    fail(start)
        .with_frame(kind.to_message(), start)
        .into_fatal()
}

/// `# ...` up to, not including, the line ending.
pub fn comment(input: &str) -> PResult<'_, &str> {
    recognize(pair(tag("#"), more0_chars(is_comment_char))).parse(input)
}

/// Whitespace, comments and newlines, as allowed inside arrays and inline
/// tables.
fn ws_comment_newline(input: &str) -> PResult<'_, ()> {
    map(
        count(either(
            map(more1_chars(crate::primitive::is_space), drop),
            map(pair(opt(comment, ""), newline), drop),
        )),
        drop,
    )
    .parse(input)
}

fn simple_key(input: &str) -> PResult<'_, String> {
    alt((
        basic_string,
        literal_string,
        map(more1_chars(is_unquoted_key_char), String::from),
    ))
    .parse(input)
}

/// A bare, quoted or dotted key, split into its segments.
pub fn key(input: &str) -> PResult<'_, Vec<String>> {
    map(
        pair(
            simple_key,
            more0(preceded(delimited(space0, tag("."), space0), simple_key)),
        ),
        |(first, rest)| {
            let mut keys = Vec::with_capacity(rest.len() + 1);
            keys.push(first);
            keys.extend(rest);
            keys
        },
    )
    .parse(input)
}

/// How deeply arrays and inline tables may nest inside one another.
pub(crate) const MAX_RECURSION_DEPTH: u32 = 64;

/// `key = value`, where the value sits `depth` containers deep. A value is
/// required once `=` has been seen.
fn keyval(input: &str, depth: u32) -> PResult<'_, Entry<'_>> {
    pair(
        position,
        separated_pair(
            key,
            delimited(space0, tag("="), space0),
            fatal(
                from_fn(move |input| value_at(input, depth))
                    .label(Message::new("syntax", "expected a value after `=`")),
            ),
        ),
    )
    .parse(input)
}

fn boolean(input: &str) -> PResult<'_, bool> {
    either(
        combinator::value(tag("true"), true),
        combinator::value(tag("false"), false),
    )
    .parse(input)
}

/// Fails fatally when a container opening at `depth` would nest too deep.
fn check_depth(input: &str, depth: u32, open: char) -> Result<(), Failure<'_>> {
    if depth >= MAX_RECURSION_DEPTH && input.starts_with(open) {
        return Err(conflict(
            input,
            ErrorKind::OutOfRange("max recursion depth exceeded"),
        ));
    }
    Ok(())
}

fn array_element(input: &str, depth: u32) -> PResult<'_, Value> {
    delimited(
        ws_comment_newline,
        from_fn(move |input| value_at(input, depth)),
        ws_comment_newline,
    )
    .parse(input)
}

fn array(input: &str, depth: u32) -> PResult<'_, Value> {
    check_depth(input, depth, '[')?;
    let element = from_fn(move |input| array_element(input, depth + 1));
    let elements = map(
        pair(element, more0(preceded(tag(","), element))),
        |(first, rest)| {
            let mut values = Vec::with_capacity(rest.len() + 1);
            values.push(first);
            values.extend(rest);
            values
        },
    );
    map(
        delimited(
            tag("["),
            opt(terminated(elements, opt(tag(","), "")), Vec::new()),
            fatal(
                preceded(ws_comment_newline, tag("]"))
                    .label(Message::new("syntax", "expected `]` to close the array")),
            ),
        ),
        |values| Value::Array(Array::from(values)),
    )
    .parse(input)
}

fn inline_entry(input: &str, depth: u32) -> PResult<'_, Entry<'_>> {
    delimited(
        ws_comment_newline,
        from_fn(move |input| keyval(input, depth)),
        ws_comment_newline,
    )
    .parse(input)
}

fn inline_table(input: &str, depth: u32) -> PResult<'_, Value> {
    check_depth(input, depth, '{')?;
    let entry = from_fn(move |input| inline_entry(input, depth + 1));
    let entries = map(
        pair(entry, more0(preceded(tag(","), entry))),
        |(first, rest)| {
            let mut entries = Vec::with_capacity(rest.len() + 1);
            entries.push(first);
            entries.extend(rest);
            entries
        },
    );
    map_res(
        delimited(
            tag("{"),
            opt(terminated(entries, opt(tag(","), "")), Vec::new()),
            fatal(
                preceded(ws_comment_newline, tag("}"))
                    .label(Message::new("syntax", "expected `}` to close the inline table")),
            ),
        ),
        |outcome| {
            let Success { rest, value } = outcome?;
            let mut builder = Builder::new();
            for (start, (keys, value)) in value {
                if let Err(kind) = builder.keyval(&keys, value) {
                    return Err(conflict(start, kind));
                }
            }
            Ok(Success::new(rest, Value::Table(builder.finish())))
        },
    )
    .parse(input)
}

/// A value nested `depth` arrays or inline tables deep.
fn value_at(input: &str, depth: u32) -> PResult<'_, Value> {
    alt((
        map(string, Value::String),
        map(boolean, Value::Boolean),
        from_fn(move |input| array(input, depth)),
        from_fn(move |input| inline_table(input, depth)),
        map(datetime, Value::Datetime),
        number,
    ))
    .parse(input)
}

/// Any TOML value.
pub fn value(input: &str) -> PResult<'_, Value> {
    value_at(input, 0)
}

/// Trailing whitespace and an optional comment after a line's content.
fn line_end(input: &str) -> PResult<'_, &str> {
    recognize(pair(space0, opt(comment, ""))).parse(input)
}

fn keyval_line<'a>(builder: &RefCell<Builder>) -> impl Parser<'a, Output = ()> {
    let entry = from_fn(|input| keyval(input, 0));
    map_res(terminated(entry, line_end), move |outcome| {
        let Success {
            rest,
            value: (start, (keys, value)),
        } = outcome?;
        match builder.borrow_mut().keyval(&keys, value) {
            Ok(()) => Ok(Success::new(rest, ())),
            Err(kind) => Err(conflict(start, kind)),
        }
    })
}

fn std_table<'a>(builder: &RefCell<Builder>) -> impl Parser<'a, Output = ()> {
    map_res(
        pair(
            position,
            delimited(
                regex(STD_TABLE_OPEN.clone()),
                key,
                regex(STD_TABLE_CLOSE.clone()),
            ),
        ),
        move |outcome| {
            let Success {
                rest,
                value: (start, keys),
            } = outcome?;
            match builder.borrow_mut().std_table(&keys) {
                Ok(()) => Ok(Success::new(rest, ())),
                Err(kind) => Err(conflict(start, kind)),
            }
        },
    )
}

fn array_table<'a>(builder: &RefCell<Builder>) -> impl Parser<'a, Output = ()> {
    map_res(
        pair(
            position,
            delimited(
                regex(ARRAY_TABLE_OPEN.clone()),
                key,
                regex(ARRAY_TABLE_CLOSE.clone()),
            ),
        ),
        move |outcome| {
            let Success {
                rest,
                value: (start, keys),
            } = outcome?;
            match builder.borrow_mut().array_table(&keys) {
                Ok(()) => Ok(Success::new(rest, ())),
                Err(kind) => Err(conflict(start, kind)),
            }
        },
    )
}

fn table_line<'a>(builder: &RefCell<Builder>) -> impl Parser<'a, Output = ()> {
    terminated(either(std_table(builder), array_table(builder)), line_end)
}

/// A blank line, a comment line or the end of the input.
fn ignore_line(input: &str) -> PResult<'_, ()> {
    alt((
        map(comment, drop),
        map(peek(newline), drop),
        map(eof, drop),
    ))
    .parse(input)
}

fn expression<'a>(builder: &RefCell<Builder>) -> impl Parser<'a, Output = ()> {
    preceded(
        space0,
        alt((ignore_line, keyval_line(builder), table_line(builder))),
    )
    .label(Message::new(
        "syntax",
        "expected a key/value pair, a table header or a comment",
    ))
}

/// The whole document. Every line must be a valid expression and the input
/// must be consumed completely.
fn document<'a>(builder: &RefCell<Builder>) -> impl Parser<'a, Output = ()> {
    catch_fatal(map(
        terminated(
            pair(
                fatal(expression(builder)),
                count(preceded(newline, fatal(expression(builder)))),
            ),
            fatal(eof.label(Message::new("syntax", "expected newline or end of input"))),
        ),
        drop,
    ))
}

/// Parses a TOML document. A leading UTF-8 byte order mark is skipped.
///
/// ```
/// let table = toml_combinator::parse("[server]\nport = 8080\n")?;
/// let port = table.get("server").and_then(|v| v.as_table()).and_then(|t| t.get("port"));
/// assert_eq!(port.and_then(|v| v.as_integer()), Some(8080));
/// # Ok::<(), toml_combinator::Error>(())
/// ```
pub fn parse(source: &str) -> Result<Table, Error> {
    let body = source.strip_prefix('\u{feff}').unwrap_or(source);
    let builder = RefCell::new(Builder::new());
    let outcome = document(&builder).parse(body);
    match outcome {
        Ok(_) => Ok(builder.into_inner().finish()),
        Err(failure) => Err(Error::from_failure(&failure, source)),
    }
}
