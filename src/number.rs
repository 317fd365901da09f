//! Integer and float literals.

#[cfg(test)]
#[path = "./number_tests.rs"]
mod tests;

use crate::combinator::{alt, either, map, map_res, opt, pair, peek, preceded, recognize};
use crate::fatal::fatal;
use crate::outcome::{Failure, Message, PResult, Parser, Success, fail};
use crate::primitive::{
    CharTest, is_bin_digit, is_digit, is_digit19, is_hex_digit, is_oct_digit, lookahead, one_of,
    position, tag,
};
use crate::repeat::{more0_chars, take1_char};
use crate::value::Value;
use num_bigint::BigInt;

/// A run of digits where each `_` must sit between two digits.
fn separated(is_digit: fn(char) -> bool) -> impl CharTest + Copy {
    lookahead(move |ch, rest: &str| {
        if is_digit(ch) {
            1
        } else if ch == '_' && rest[1..].chars().next().is_some_and(is_digit) {
            2
        } else {
            0
        }
    })
}

/// One digit followed by any number of digits or `_`-separated digits.
fn digit_run<'a>(is_digit: fn(char) -> bool) -> impl Parser<'a, Output = &'a str> {
    recognize(pair(take1_char(is_digit), more0_chars(separated(is_digit))))
}

/// A decimal integer without leading zeros.
fn unsigned_dec_int(input: &str) -> PResult<'_, &str> {
    either(
        recognize(pair(take1_char(is_digit19), more0_chars(separated(is_digit)))),
        take1_char(is_digit),
    )
    .parse(input)
}

fn dec_int(input: &str) -> PResult<'_, &str> {
    recognize(pair(opt(one_of("+-"), '+'), unsigned_dec_int)).parse(input)
}

fn strip_underscores(text: &str) -> String {
    text.chars().filter(|&ch| ch != '_').collect()
}

/// Builds an integer value, widening to a big integer when the digits do not
/// fit in an `i64`.
/// Converts digits the grammar already accepted. `None` means the literal
/// slipped past the grammar without being a number in `radix`.
fn integer_value(digits: &str, radix: u32) -> Option<Value> {
    let digits = strip_underscores(digits);
    if let Ok(i) = i64::from_str_radix(&digits, radix) {
        return Some(Value::Integer(i));
    }
    let (negative, magnitude) = match digits.strip_prefix('-') {
        Some(magnitude) => (true, magnitude),
        None => (false, digits.strip_prefix('+').unwrap_or(digits.as_str())),
    };
    let big = BigInt::parse_bytes(magnitude.as_bytes(), radix)?;
    Some(if negative { Value::from(-big) } else { Value::from(big) })
}

fn float_value(text: &str) -> Option<f64> {
    strip_underscores(text).parse().ok()
}

fn malformed(start: &str) -> Failure<'_> {
    fail(start)
        .with_frame(Message::new("invalid-number", "unexpected number format"), start)
        .into_fatal()
}

/// Runs `f` over the text `parser` recognized, failing fatally at the
/// start of the literal when the conversion does.
fn convert<'a, P, T>(parser: P, f: impl Fn(&str) -> Option<T>) -> impl Parser<'a, Output = T>
where
    P: Parser<'a, Output = &'a str>,
{
    map_res(pair(position, parser), move |outcome| {
        let Success {
            rest,
            value: (start, text),
        } = outcome?;
        match f(text) {
            Some(value) => Ok(Success::new(rest, value)),
            None => Err(malformed(start)),
        }
    })
}

fn prefixed_int<'a>(
    prefix: &'static str,
    is_digit: fn(char) -> bool,
    radix: u32,
) -> impl Parser<'a, Output = Value> {
    convert(
        preceded(tag(prefix), fatal(digit_run(is_digit))),
        move |digits| integer_value(digits, radix),
    )
}

pub fn integer(input: &str) -> PResult<'_, Value> {
    alt((
        prefixed_int("0x", is_hex_digit, 16),
        prefixed_int("0o", is_oct_digit, 8),
        prefixed_int("0b", is_bin_digit, 2),
        convert(dec_int, |digits| integer_value(digits, 10)),
    ))
    .parse(input)
}

fn special_float(input: &str) -> PResult<'_, f64> {
    map(
        pair(opt(one_of("+-"), '+'), either(tag("inf"), tag("nan"))),
        |(sign, word)| {
            let magnitude = if word == "inf" { f64::INFINITY } else { f64::NAN };
            if sign == '-' { -magnitude } else { magnitude }
        },
    )
    .parse(input)
}

/// `e` or `E`, an optional sign, then digits that may start with zero.
fn exponent(input: &str) -> PResult<'_, &str> {
    recognize(pair(
        pair(one_of("eE"), opt(one_of("+-"), '+')),
        digit_run(is_digit),
    ))
    .parse(input)
}

fn fraction(input: &str) -> PResult<'_, &str> {
    recognize(pair(tag("."), digit_run(is_digit))).parse(input)
}

pub fn float(input: &str) -> PResult<'_, f64> {
    either(
        special_float,
        convert(
            recognize(pair(
                dec_int,
                either(exponent, recognize(pair(fraction, opt(exponent, "")))),
            )),
            float_value,
        ),
    )
    .parse(input)
}

/// Parses an integer or float.
///
/// A leading sign, digit, `inf` or `nan` commits to a number, so anything
/// malformed after that is a fatal failure.
pub fn number(input: &str) -> PResult<'_, Value> {
    preceded(
        peek(alt((
            tag("+"),
            tag("-"),
            take1_char(is_digit),
            tag("inf"),
            tag("nan"),
        ))),
        fatal(
            either(map(float, Value::Float), integer)
                .label(Message::new("invalid-number", "unexpected number format")),
        ),
    )
    .parse(input)
}
