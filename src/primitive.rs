//! Input consuming building blocks: literal tags, regular expressions,
//! character classes, newlines and end of input.
//!
//! None of these consume anything when they fail.

#[cfg(test)]
#[path = "./primitive_tests.rs"]
mod tests;

use crate::outcome::{Message, PResult, Parser, Success, fail, from_fn};
use crate::repeat::{more0_chars, take1_char};
use regex::Regex;

/// Decides how many bytes of `rest` belong to a character class.
///
/// `ch` is always the first character of `rest`. Returning `0` means the
/// character does not match. Any other value must land on a char boundary of
/// `rest`; lengths that do not are treated as a mismatch.
pub trait CharTest {
    fn test(&self, ch: char, rest: &str) -> usize;
}

impl<F> CharTest for F
where
    F: Fn(char) -> bool,
{
    #[inline]
    fn test(&self, ch: char, _rest: &str) -> usize {
        if self(ch) { ch.len_utf8() } else { 0 }
    }
}

/// A [`CharTest`] that inspects the input following the current character.
#[derive(Clone, Copy)]
pub struct Lookahead<F>(F);

impl<F> CharTest for Lookahead<F>
where
    F: Fn(char, &str) -> usize,
{
    #[inline]
    fn test(&self, ch: char, rest: &str) -> usize {
        (self.0)(ch, rest)
    }
}

/// Wraps a closure that reports the matched length itself.
///
/// ```
/// use toml_combinator::outcome::Parser;
/// use toml_combinator::primitive::lookahead;
/// use toml_combinator::repeat::more1_chars;
///
/// // `\r` only counts when followed by `\n`.
/// let line_break = lookahead(|ch, rest: &str| match ch {
///     '\n' => 1,
///     '\r' if rest[1..].starts_with('\n') => 2,
///     _ => 0,
/// });
/// let ok = more1_chars(line_break).parse("\r\n\n\rx").unwrap();
/// assert_eq!(ok.value, "\r\n\n");
/// ```
pub fn lookahead<F>(f: F) -> Lookahead<F>
where
    F: Fn(char, &str) -> usize,
{
    Lookahead(f)
}

/// Matches `literal` exactly.
pub fn tag<'a>(literal: &'static str) -> impl Parser<'a, Output = &'a str> {
    from_fn(move |input| match input.strip_prefix(literal) {
        Some(rest) => Ok(Success::new(rest, &input[..literal.len()])),
        None => Err(fail(input).with_frame(Message::new("tag", literal), input)),
    })
}

/// Matches the prefix of the input recognized by `re`.
///
/// Patterns without a leading `\A` are wrapped in one, so a failed match never
/// scans past the first byte.
pub fn regex<'a>(re: Regex) -> impl Parser<'a, Output = &'a str> {
    let pattern = re.as_str().to_owned();
    let re = anchored(re);
    from_fn(move |input| match re.find(input) {
        Some(found) if found.start() == 0 => {
            Ok(Success::new(&input[found.end()..], found.as_str()))
        }
        _ => Err(fail(input).with_frame(Message::new("regex", pattern.clone()), input)),
    })
}

fn anchored(re: Regex) -> Regex {
    if re.as_str().starts_with(r"\A") {
        return re;
    }
    // Wrapping a compiled pattern can only fail on the size limit.
    Regex::new(&format!(r"\A(?:{})", re.as_str())).unwrap_or(re)
}

/// Matches a single character contained in `chars`.
pub fn one_of<'a>(chars: &'static str) -> impl Parser<'a, Output = char> {
    from_fn(move |input| match input.chars().next() {
        Some(ch) if chars.contains(ch) => Ok(Success::new(&input[ch.len_utf8()..], ch)),
        _ => Err(fail(input).with_frame(Message::new("one_of", chars), input)),
    })
}

/// Matches a single character not contained in `chars`.
pub fn none_of<'a>(chars: &'static str) -> impl Parser<'a, Output = char> {
    from_fn(move |input| match input.chars().next() {
        Some(ch) if !chars.contains(ch) => Ok(Success::new(&input[ch.len_utf8()..], ch)),
        _ => Err(fail(input).with_frame(Message::new("none_of", chars), input)),
    })
}

/// Matches `\n` or `\r\n`. A lone `\r` is not a newline.
pub fn newline(input: &str) -> PResult<'_, &str> {
    let len = if input.starts_with('\n') {
        1
    } else if input.starts_with("\r\n") {
        2
    } else {
        return Err(fail(input).with_frame(Message::new("newline", "expected a newline"), input));
    };
    Ok(Success::new(&input[len..], &input[..len]))
}

/// Succeeds without consuming anything when the input is empty.
pub fn eof(input: &str) -> PResult<'_, &str> {
    if input.is_empty() {
        Ok(Success::new(input, input))
    } else {
        Err(fail(input).with_frame(Message::new("eof", "expected end of input"), input))
    }
}

/// Yields the remaining input without consuming it.
///
/// Semantic actions use this to remember where a construct started.
pub fn position(input: &str) -> PResult<'_, &str> {
    Ok(Success::new(input, input))
}

/// Zero or more spaces or tabs.
pub fn space0(input: &str) -> PResult<'_, &str> {
    more0_chars(is_space).parse(input)
}

/// Exactly one space or tab.
pub fn space(input: &str) -> PResult<'_, &str> {
    take1_char(is_space).parse(input)
}

#[inline]
pub fn is_space(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_digit19(ch: char) -> bool {
    matches!(ch, '1'..='9')
}

#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

#[inline]
pub fn is_oct_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

#[inline]
pub fn is_bin_digit(ch: char) -> bool {
    ch == '0' || ch == '1'
}

#[inline]
pub fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

#[inline]
pub fn is_alphanumeric(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}

/// Returns `true` if the code point of `ch` falls in one of the inclusive
/// `ranges`. The table must be sorted by start.
pub fn in_ranges(ch: char, ranges: &[(u32, u32)]) -> bool {
    let code = ch as u32;
    ranges
        .binary_search_by(|&(start, end)| {
            if end < code {
                std::cmp::Ordering::Less
            } else if start > code {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Builds a character class out of a sorted table of inclusive code point
/// ranges.
pub fn char_ranges(ranges: &'static [(u32, u32)]) -> impl Fn(char) -> bool + Copy {
    move |ch| in_ranges(ch, ranges)
}
