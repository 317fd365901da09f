use super::*;
use crate::fatal::fatal;
use crate::outcome::Message;
use crate::primitive::{is_digit, space0, tag};
use crate::repeat::more1_chars;
use std::cell::Cell;

fn digits(input: &str) -> PResult<'_, &str> {
    more1_chars(is_digit).parse(input)
}

#[test]
fn sequences() {
    let ok = seq((tag("a"), tag("b"), tag("c"))).parse("abcd").unwrap();
    assert_eq!(ok.value, ("a", "b", "c"));
    assert_eq!(ok.rest, "d");

    let ok = pair(tag("x"), digits).parse("x12").unwrap();
    assert_eq!(ok.value, ("x", "12"));

    let ok = triplet(digits, tag("-"), digits).parse("1-2").unwrap();
    assert_eq!(ok.value, ("1", "-", "2"));

    let eight = seq((
        tag("1"),
        tag("2"),
        tag("3"),
        tag("4"),
        tag("5"),
        tag("6"),
        tag("7"),
        tag("8"),
    ));
    assert_eq!(eight.parse("123456789").unwrap().rest, "9");
}

#[test]
fn sequence_failure_is_reported_where_it_happened() {
    let err = seq((tag("a"), tag("b"), tag("c"))).parse("abx").unwrap_err();
    assert_eq!(err.rest, "x");
    assert_eq!(err.stack[0].message, Message::new("tag", "c"));
}

#[test]
fn keep_one_side() {
    assert_eq!(preceded(tag("#"), digits).parse("#42").unwrap().value, "42");
    assert_eq!(terminated(digits, tag(";")).parse("42;").unwrap().value, "42");
    assert_eq!(
        delimited(tag("("), digits, tag(")")).parse("(7)x").unwrap().value,
        "7"
    );

    let ok = separated_pair(digits, delimited(space0, tag("="), space0), digits)
        .parse("1 = 2")
        .unwrap();
    assert_eq!(ok.value, ("1", "2"));
}

#[test]
fn ordered_choice() {
    let keyword = alt((tag("true"), tag("tr"), tag("t")));
    let cases = [("true", "true"), ("trick", "tr"), ("to", "t")];
    for (input, expected) in cases {
        assert_eq!(keyword.parse(input).unwrap().value, expected, "input: {input}");
    }

    // With every branch failing the last failure wins.
    let err = keyword.parse("x").unwrap_err();
    assert_eq!(err.stack[0].message, Message::new("tag", "t"));
    assert_eq!(err.rest, "x");

    assert_eq!(either(tag("a"), tag("b")).parse("b").unwrap().value, "b");
}

#[test]
fn choice_restarts_every_branch_from_the_same_input() {
    let seen = Cell::new(0);
    let second = from_fn(|input| {
        assert_eq!(input, "abz");
        seen.set(seen.get() + 1);
        tag("abz").parse(input)
    });
    let ok = alt((recognize(pair(tag("a"), tag("by"))), second)).parse("abz").unwrap();
    assert_eq!(ok.value, "abz");
    assert_eq!(seen.get(), 1);
}

#[test]
fn fatal_failure_short_circuits_choice() {
    let calls = Cell::new(0);
    let fallback = from_fn(|input| {
        calls.set(calls.get() + 1);
        tag("[x").parse(input)
    });
    let array = preceded(tag("["), fatal(tag("]")));

    let err = alt((array, fallback)).parse("[x").unwrap_err();
    assert!(err.fatal);
    assert_eq!(err.rest, "x");
    assert_eq!(calls.get(), 0);
}

#[test]
fn modifiers() {
    let number = map(digits, |d: &str| d.parse::<u32>().unwrap());
    assert_eq!(number.parse("42").unwrap().value, 42);

    let even = map_res(digits, |outcome| {
        let ok = outcome?;
        if ok.value.len() % 2 == 0 {
            Ok(ok.map(str::len))
        } else {
            Err(fail(ok.rest).with_frame("odd length", ok.rest))
        }
    });
    assert_eq!(even.parse("12").unwrap().value, 2);
    let err = even.parse("123x").unwrap_err();
    assert_eq!(err.rest, "x");
    assert_eq!(err.stack[0].message.detail, "odd length");

    let sign = opt(tag("-"), "+");
    assert_eq!(sign.parse("-1").unwrap().value, "-");
    let ok = sign.parse("1").unwrap();
    assert_eq!((ok.value, ok.rest), ("+", "1"));

    let ok = peek(tag("ab")).parse("abc").unwrap();
    assert_eq!((ok.value, ok.rest), ("ab", "abc"));

    assert!(value(tag("yes"), true).parse("yes").unwrap().value);

    let ok = recognize(pair(digits, pair(tag("."), digits))).parse("3.14;").unwrap();
    assert_eq!((ok.value, ok.rest), ("3.14", ";"));
}

#[test]
fn opt_passes_fatal_failures_through() {
    let committed = opt(preceded(tag("("), fatal(tag(")"))), "");
    assert!(committed.parse("(x").unwrap_err().fatal);
    assert_eq!(committed.parse("x").unwrap().value, "");
}

#[test]
fn count_never_fails_recoverably() {
    let cases = [("", 0, ""), ("ab", 0, "ab"), ("aaab", 3, "b"), ("aaa", 3, "")];
    for (input, expected, rest) in cases {
        let ok = count(tag("a")).parse(input).unwrap();
        assert_eq!(ok.value, expected, "input: {input}");
        assert_eq!(ok.rest, rest, "input: {input}");
    }

    let err = count(preceded(tag("a"), fatal(tag("b")))).parse("abac").unwrap_err();
    assert!(err.fatal);
    assert_eq!(err.rest, "c");
}

#[test]
fn debug_is_transparent() {
    let traced = debug(digits, "digits");
    assert_eq!(traced.parse("12a").unwrap().rest, "a");
    assert_eq!(traced.parse("a").unwrap_err().rest, "a");
    assert_eq!(Preview("short").to_string(), "\"short\"");
    assert_eq!(
        Preview("abcdefghijklmnopqrstuvwxyz").to_string(),
        "\"abcdefghijklmnopqrstuvwx\"..."
    );
}
