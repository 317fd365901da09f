//! Repetition.
//!
//! There are two families: one repeats a [`Parser`] and collects its values,
//! the other repeats a [`CharTest`] and yields the matched slice without
//! allocating. Both stop at the first mismatch, at the end of input, or once
//! `max` matches have been collected, and succeed if at least `min` matched.
//!
//! A fatal failure of the repeated parser is returned immediately. When too
//! few matches are found the failure points back at the entry input and
//! carries a `repeat` frame located at the first unsatisfied position.

#[cfg(test)]
#[path = "./repeat_tests.rs"]
mod tests;

use crate::outcome::{Message, Parser, Success, fail, from_fn};
use crate::primitive::CharTest;

fn bounds(min: usize, max: usize) -> Message {
    if max == usize::MAX {
        Message::new("repeat", format!("{min} - unbounded"))
    } else {
        Message::new("repeat", format!("{min} - {max}"))
    }
}

/// Applies `parser` between `min` and `max` times.
///
/// A match that consumes nothing ends the repetition after being recorded.
pub fn repeat<'a, P>(parser: P, min: usize, max: usize) -> impl Parser<'a, Output = Vec<P::Output>>
where
    P: Parser<'a>,
{
    from_fn(move |input| {
        let mut values = Vec::new();
        let mut rest = input;
        let mut stopped = None;
        while values.len() < max && !rest.is_empty() {
            match parser.parse(rest) {
                Ok(Success { rest: next, value }) => {
                    values.push(value);
                    let stalled = next.len() == rest.len();
                    rest = next;
                    if stalled {
                        break;
                    }
                }
                Err(failure) if failure.fatal => return Err(failure),
                Err(failure) => {
                    stopped = Some(failure);
                    break;
                }
            }
        }

        if values.len() >= min {
            return Ok(Success::new(rest, values));
        }
        let failure = match stopped {
            Some(failure) => failure.with_rest(input),
            None => fail(input),
        };
        Err(failure.with_frame(bounds(min, max), rest))
    })
}

/// Exactly one match, collected into a vector.
pub fn take1<'a, P: Parser<'a>>(parser: P) -> impl Parser<'a, Output = Vec<P::Output>> {
    repeat(parser, 1, 1)
}

/// Exactly `n` matches.
pub fn take_x<'a, P: Parser<'a>>(parser: P, n: usize) -> impl Parser<'a, Output = Vec<P::Output>> {
    repeat(parser, n, n)
}

pub fn more0<'a, P: Parser<'a>>(parser: P) -> impl Parser<'a, Output = Vec<P::Output>> {
    repeat(parser, 0, usize::MAX)
}

pub fn more1<'a, P: Parser<'a>>(parser: P) -> impl Parser<'a, Output = Vec<P::Output>> {
    repeat(parser, 1, usize::MAX)
}

/// At least `n` matches.
pub fn more_x<'a, P: Parser<'a>>(parser: P, n: usize) -> impl Parser<'a, Output = Vec<P::Output>> {
    repeat(parser, n, usize::MAX)
}

/// Matches between `min` and `max` characters accepted by `test`, yielding
/// the matched slice.
pub fn repeat_chars<'a, T>(test: T, min: usize, max: usize) -> impl Parser<'a, Output = &'a str>
where
    T: CharTest,
{
    from_fn(move |input| {
        let mut len = 0;
        let mut count = 0;
        while count < max {
            let rest = &input[len..];
            let Some(ch) = rest.chars().next() else {
                break;
            };
            let step = test.test(ch, rest);
            if step == 0 || !rest.is_char_boundary(step) {
                break;
            }
            len += step;
            count += 1;
        }

        if count >= min {
            Ok(Success::new(&input[len..], &input[..len]))
        } else {
            Err(fail(input).with_frame(bounds(min, max), &input[len..]))
        }
    })
}

pub fn take1_char<'a, T: CharTest>(test: T) -> impl Parser<'a, Output = &'a str> {
    repeat_chars(test, 1, 1)
}

pub fn take_x_chars<'a, T: CharTest>(test: T, n: usize) -> impl Parser<'a, Output = &'a str> {
    repeat_chars(test, n, n)
}

pub fn more0_chars<'a, T: CharTest>(test: T) -> impl Parser<'a, Output = &'a str> {
    repeat_chars(test, 0, usize::MAX)
}

pub fn more1_chars<'a, T: CharTest>(test: T) -> impl Parser<'a, Output = &'a str> {
    repeat_chars(test, 1, usize::MAX)
}

pub fn more_x_chars<'a, T: CharTest>(test: T, n: usize) -> impl Parser<'a, Output = &'a str> {
    repeat_chars(test, n, usize::MAX)
}
