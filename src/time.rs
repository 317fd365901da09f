//! TOML date and time literals.
//!
//! Values are kept as normalized text tagged with the form that matched:
//! the date/time delimiter becomes `T`, a lowercase `z` becomes `Z`, missing
//! seconds become `:00` and fractional seconds are padded to milliseconds.

#[cfg(test)]
#[path = "./time_tests.rs"]
mod tests;

use crate::combinator::{alt, either, map, map_res, opt, pair, peek, preceded, seq};
use crate::fatal::fatal;
use crate::outcome::{Failure, Message, PResult, Parser, Success, fail};
use crate::primitive::{is_digit, one_of, position, tag};
use crate::repeat::{more1_chars, take_x_chars};
use std::fmt;

/// Which of the four TOML date/time forms a [`Datetime`] was written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatetimeKind {
    /// `1979-05-27T07:32:00Z` or `1979-05-27T00:32:00-07:00`
    OffsetDateTime,
    /// `1979-05-27T07:32:00`
    LocalDateTime,
    /// `1979-05-27`
    LocalDate,
    /// `07:32:00`
    LocalTime,
}

/// A TOML date/time literal in normalized form.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Datetime {
    kind: DatetimeKind,
    text: String,
}

impl Datetime {
    #[inline]
    pub fn kind(&self) -> DatetimeKind {
        self.kind
    }

    /// The normalized literal.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Parses a complete literal, returning `None` on any syntax or range
    /// error.
    pub fn parse(text: &str) -> Option<Datetime> {
        match datetime(text) {
            Ok(ok) if ok.rest.is_empty() => Some(ok.value),
            _ => None,
        }
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Debug for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.kind, self.text)
    }
}

fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: u16, month: u8) -> u8 {
    const DAYS: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[month as usize]
    }
}

fn out_of_range<'a>(start: &'a str, what: &'static str) -> Failure<'a> {
    fail(start)
        .with_frame(Message::new("invalid-datetime", what), start)
        .into_fatal()
}

fn digits<'a>(n: usize) -> impl Parser<'a, Output = &'a str> {
    take_x_chars(is_digit, n)
}

fn number<T: std::str::FromStr + Default>(digits: &str) -> T {
    digits.parse().unwrap_or_default()
}

/// `YYYY-MM-DD`
fn full_date(input: &str) -> PResult<'_, String> {
    map_res(
        pair(
            position,
            seq((digits(4), tag("-"), digits(2), tag("-"), digits(2))),
        ),
        |outcome| {
            let Success {
                rest,
                value: (start, (year, _, month, _, day)),
            } = outcome?;
            let (y, m, d) = (number::<u16>(year), number::<u8>(month), number::<u8>(day));
            if !(1..=12).contains(&m) {
                return Err(out_of_range(start, "month must be between 01 and 12"));
            }
            if d < 1 || d > days_in_month(y, m) {
                return Err(out_of_range(start, "day is out of range for the month"));
            }
            Ok(Success::new(rest, format!("{year}-{month}-{day}")))
        },
    )
    .parse(input)
}

/// `HH:MM[:SS][.fraction]`
fn partial_time(input: &str) -> PResult<'_, String> {
    map_res(
        pair(
            position,
            seq((
                digits(2),
                tag(":"),
                digits(2),
                opt(preceded(tag(":"), digits(2)), ""),
                opt(preceded(tag("."), more1_chars(is_digit)), ""),
            )),
        ),
        |outcome| {
            let Success {
                rest,
                value: (start, (hour, _, minute, second, fraction)),
            } = outcome?;
            if number::<u8>(hour) > 23 {
                return Err(out_of_range(start, "hour must be between 00 and 23"));
            }
            if number::<u8>(minute) > 59 {
                return Err(out_of_range(start, "minute must be between 00 and 59"));
            }
            if number::<u8>(second) > 60 {
                return Err(out_of_range(start, "second must be between 00 and 60"));
            }
            let second = if second.is_empty() { "00" } else { second };
            let text = if fraction.is_empty() {
                format!("{hour}:{minute}:{second}")
            } else {
                format!("{hour}:{minute}:{second}.{fraction:0<3}")
            };
            Ok(Success::new(rest, text))
        },
    )
    .parse(input)
}

fn time_delim(input: &str) -> PResult<'_, char> {
    map(one_of("Tt "), |_| 'T').parse(input)
}

/// `Z` or `+HH:MM` / `-HH:MM`
fn time_offset(input: &str) -> PResult<'_, String> {
    either(
        map(one_of("Zz"), |_| String::from("Z")),
        map_res(
            pair(position, seq((one_of("+-"), digits(2), tag(":"), digits(2)))),
            |outcome| {
                let Success {
                    rest,
                    value: (start, (sign, hour, _, minute)),
                } = outcome?;
                if number::<u8>(hour) > 23 || number::<u8>(minute) > 59 {
                    return Err(out_of_range(start, "time offset is out of range"));
                }
                Ok(Success::new(rest, format!("{sign}{hour}:{minute}")))
            },
        ),
    )
    .parse(input)
}

fn tagged<'a, P>(parser: P, kind: DatetimeKind) -> impl Parser<'a, Output = Datetime>
where
    P: Parser<'a, Output = String>,
{
    map(parser, move |text| Datetime { kind, text })
}

/// Parses any of the four date/time forms.
///
/// Input starting with `DDDD-` or `DD:` commits to a date/time, so anything
/// malformed after that is a fatal failure.
pub fn datetime(input: &str) -> PResult<'_, Datetime> {
    let offset_date_time = map(
        seq((full_date, time_delim, partial_time, time_offset)),
        |(date, _, time, offset)| format!("{date}T{time}{offset}"),
    );
    let local_date_time = map(
        seq((full_date, time_delim, partial_time)),
        |(date, _, time)| format!("{date}T{time}"),
    );
    preceded(
        peek(either(
            pair(digits(4), tag("-")),
            pair(digits(2), tag(":")),
        )),
        fatal(
            alt((
                tagged(offset_date_time, DatetimeKind::OffsetDateTime),
                tagged(local_date_time, DatetimeKind::LocalDateTime),
                tagged(full_date, DatetimeKind::LocalDate),
                tagged(partial_time, DatetimeKind::LocalTime),
            ))
            .label(Message::new("invalid-datetime", "unexpected date time format")),
        ),
    )
    .parse(input)
}
