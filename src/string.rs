//! Basic, literal and multiline string literals.
//!
//! Once an opening delimiter has matched, a missing closing delimiter or a
//! malformed escape is a fatal failure.

#[cfg(test)]
#[path = "./string_tests.rs"]
mod tests;

use crate::character::{is_basic_unescaped, is_literal_char, is_ws_or_newline};
use crate::combinator::{alt, delimited, either, map, map_res, opt, pair, preceded, seq, value};
use crate::fatal::fatal;
use crate::outcome::{Message, PResult, Parser, Success, fail};
use crate::primitive::{is_hex_digit, lookahead, newline, one_of, position, space0, tag};
use crate::repeat::{more0, more0_chars, more1, more1_chars, repeat_chars, take_x_chars};

/// A piece of string content before it is stitched together.
#[derive(Clone, Copy)]
enum Fragment<'a> {
    Raw(&'a str),
    Escaped(char),
    /// A line ending backslash together with the whitespace it swallows.
    Trimmed,
}

fn push_fragment(out: &mut String, fragment: &Fragment<'_>) {
    match fragment {
        Fragment::Raw(text) => out.push_str(text),
        Fragment::Escaped(ch) => out.push(*ch),
        Fragment::Trimmed => {}
    }
}

fn unterminated(delimiter: &'static str) -> Message {
    Message::new("unterminated-string", format!("expected closing `{delimiter}`"))
}

/// `HH...` with exactly `digits` hex digits naming a Unicode scalar value.
fn hex_scalar<'a>(digits: usize) -> impl Parser<'a, Output = char> {
    map_res(
        pair(position, take_x_chars(is_hex_digit, digits)),
        |outcome| {
            let Success {
                rest,
                value: (start, hex),
            } = outcome?;
            let code = u32::from_str_radix(hex, 16).unwrap_or(u32::MAX);
            match char::from_u32(code) {
                Some(ch) => Ok(Success::new(rest, ch)),
                None => Err(fail(start)
                    .with_frame(
                        Message::new("invalid-escape-value", format!("{code:X}")),
                        start,
                    )
                    .into_fatal()),
            }
        },
    )
}

fn escape_sequence(input: &str) -> PResult<'_, char> {
    alt((
        map(one_of("btnfre\"\\"), |ch| match ch {
            'b' => '\u{8}',
            't' => '\t',
            'n' => '\n',
            'f' => '\u{c}',
            'r' => '\r',
            'e' => '\u{1b}',
            other => other,
        }),
        preceded(tag("x"), hex_scalar(2)),
        preceded(tag("u"), hex_scalar(4)),
        preceded(tag("U"), hex_scalar(8)),
    ))
    .parse(input)
}

fn escaped(input: &str) -> PResult<'_, Fragment<'_>> {
    map(
        preceded(
            tag("\\"),
            fatal(escape_sequence.label(Message::new("invalid-escape", "invalid escape sequence"))),
        ),
        Fragment::Escaped,
    )
    .parse(input)
}

fn basic_char(input: &str) -> PResult<'_, Fragment<'_>> {
    either(map(more1_chars(is_basic_unescaped), Fragment::Raw), escaped).parse(input)
}

/// `"..."`
pub fn basic_string(input: &str) -> PResult<'_, String> {
    map(
        delimited(
            tag("\""),
            more0(basic_char),
            fatal(tag("\"").label(unterminated("\""))),
        ),
        |fragments| {
            let mut out = String::new();
            for fragment in &fragments {
                push_fragment(&mut out, fragment);
            }
            out
        },
    )
    .parse(input)
}

/// `'...'`
pub fn literal_string(input: &str) -> PResult<'_, String> {
    map(
        delimited(
            tag("'"),
            more0_chars(is_literal_char),
            fatal(tag("'").label(unterminated("'"))),
        ),
        String::from,
    )
    .parse(input)
}

/// A backslash, trailing whitespace, a newline and every following
/// whitespace or newline.
fn escaped_newline(input: &str) -> PResult<'_, Fragment<'_>> {
    value(
        seq((
            tag("\\"),
            space0,
            newline,
            more0_chars(lookahead(is_ws_or_newline)),
        )),
        Fragment::Trimmed,
    )
    .parse(input)
}

fn ml_basic_content(input: &str) -> PResult<'_, Fragment<'_>> {
    alt((escaped_newline, basic_char, map(newline, Fragment::Raw))).parse(input)
}

fn ml_literal_content(input: &str) -> PResult<'_, &str> {
    either(more1_chars(is_literal_char), newline).parse(input)
}

/// The body of a multiline string followed by its closing delimiter.
///
/// Up to two quotes may appear inside the body. The closing delimiter may be
/// followed by up to two more quotes, which belong to the content.
fn ml_body<'a, C, T>(
    quote: char,
    delimiter: &'static str,
    content: C,
    push: fn(&mut String, &T),
) -> impl Parser<'a, Output = String>
where
    C: Parser<'a, Output = T> + Copy,
{
    let quotes = move |ch: char| ch == quote;
    map(
        seq((
            more0(content),
            more0(pair(repeat_chars(quotes, 1, 2), more1(content))),
            tag(delimiter),
            repeat_chars(quotes, 0, 2),
        )),
        move |(head, tail, _, extra)| {
            let mut out = String::new();
            for item in &head {
                push(&mut out, item);
            }
            for (quotes, items) in &tail {
                out.push_str(quotes);
                for item in items {
                    push(&mut out, item);
                }
            }
            out.push_str(extra);
            out
        },
    )
}

/// `"""..."""`
pub fn ml_basic_string(input: &str) -> PResult<'_, String> {
    preceded(
        pair(tag("\"\"\""), opt(newline, "")),
        fatal(
            ml_body('"', "\"\"\"", ml_basic_content, push_fragment)
                .label(unterminated("\"\"\"")),
        ),
    )
    .parse(input)
}

/// `'''...'''`
pub fn ml_literal_string(input: &str) -> PResult<'_, String> {
    preceded(
        pair(tag("'''"), opt(newline, "")),
        fatal(
            ml_body('\'', "'''", ml_literal_content, |out, text| out.push_str(text))
                .label(unterminated("'''")),
        ),
    )
    .parse(input)
}

/// Any of the four string forms.
pub fn string(input: &str) -> PResult<'_, String> {
    alt((ml_basic_string, ml_literal_string, basic_string, literal_string)).parse(input)
}
