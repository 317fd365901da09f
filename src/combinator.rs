//! Sequencing, ordered choice and value transforming combinators.
//!
//! ```
//! use toml_combinator::combinator::{alt, delimited, map};
//! use toml_combinator::outcome::Parser;
//! use toml_combinator::primitive::{space0, tag};
//! use toml_combinator::repeat::more1_chars;
//!
//! let number = map(more1_chars(|ch: char| ch.is_ascii_digit()), |digits: &str| {
//!     digits.parse::<u32>().unwrap_or_default()
//! });
//! let word = map(alt((tag("one"), tag("two"))), |w: &str| w.len() as u32);
//! let item = delimited(space0, alt((number, word)), space0);
//!
//! assert_eq!(item.parse(" 42 ,").unwrap().value, 42);
//! assert_eq!(item.parse("two").unwrap().value, 3);
//! ```

#[cfg(test)]
#[path = "./combinator_tests.rs"]
mod tests;

use crate::outcome::{Failure, PResult, Parser, Success, fail, from_fn};

/// A tuple of parsers run one after another.
pub trait Sequence<'a> {
    type Output;

    fn parse_sequence(&self, input: &'a str) -> PResult<'a, Self::Output>;
}

macro_rules! impl_sequence {
    ($($parser:ident $bind:ident $val:ident),+) => {
        impl<'a, $($parser),+> Sequence<'a> for ($($parser,)+)
        where
            $($parser: Parser<'a>,)+
        {
            type Output = ($($parser::Output,)+);

            fn parse_sequence(&self, input: &'a str) -> PResult<'a, Self::Output> {
                let ($($bind,)+) = self;
                let rest = input;
                $(let Success { rest, value: $val } = $bind.parse(rest)?;)+
                Ok(Success::new(rest, ($($val,)+)))
            }
        }
    };
}

impl_sequence!(A a va, B b vb);
impl_sequence!(A a va, B b vb, C c vc);
impl_sequence!(A a va, B b vb, C c vc, D d vd);
impl_sequence!(A a va, B b vb, C c vc, D d vd, E e ve);
impl_sequence!(A a va, B b vb, C c vc, D d vd, E e ve, F f vf);
impl_sequence!(A a va, B b vb, C c vc, D d vd, E e ve, F f vf, G g vg);
impl_sequence!(A a va, B b vb, C c vc, D d vd, E e ve, F f vf, G g vg, H h vh);

/// Runs every parser of the tuple in order on successive remainders.
///
/// The first failure is returned as is: its `rest` is where that sub-parser
/// stopped, not where the sequence started.
pub fn seq<'a, S>(parsers: S) -> impl Parser<'a, Output = S::Output>
where
    S: Sequence<'a>,
{
    from_fn(move |input| parsers.parse_sequence(input))
}

pub fn pair<'a, A, B>(first: A, second: B) -> impl Parser<'a, Output = (A::Output, B::Output)>
where
    A: Parser<'a>,
    B: Parser<'a>,
{
    seq((first, second))
}

pub fn triplet<'a, A, B, C>(
    first: A,
    second: B,
    third: C,
) -> impl Parser<'a, Output = (A::Output, B::Output, C::Output)>
where
    A: Parser<'a>,
    B: Parser<'a>,
    C: Parser<'a>,
{
    seq((first, second, third))
}

/// Keeps the value of `second`.
pub fn preceded<'a, A, B>(first: A, second: B) -> impl Parser<'a, Output = B::Output>
where
    A: Parser<'a>,
    B: Parser<'a>,
{
    map(seq((first, second)), |(_, value)| value)
}

/// Keeps the value of `first`.
pub fn terminated<'a, A, B>(first: A, second: B) -> impl Parser<'a, Output = A::Output>
where
    A: Parser<'a>,
    B: Parser<'a>,
{
    map(seq((first, second)), |(value, _)| value)
}

/// Keeps the value of `inner`.
pub fn delimited<'a, L, P, R>(left: L, inner: P, right: R) -> impl Parser<'a, Output = P::Output>
where
    L: Parser<'a>,
    P: Parser<'a>,
    R: Parser<'a>,
{
    map(seq((left, inner, right)), |(_, value, _)| value)
}

/// Keeps the values on both sides of `separator`.
pub fn separated_pair<'a, A, S, B>(
    first: A,
    separator: S,
    second: B,
) -> impl Parser<'a, Output = (A::Output, B::Output)>
where
    A: Parser<'a>,
    S: Parser<'a>,
    B: Parser<'a>,
{
    map(seq((first, separator, second)), |(a, _, b)| (a, b))
}

/// A tuple of alternatives sharing one output type.
pub trait Choice<'a> {
    type Output;

    fn parse_choice(&self, input: &'a str) -> PResult<'a, Self::Output>;
}

fn choose<'a, T>(branches: &[&dyn Parser<'a, Output = T>], input: &'a str) -> PResult<'a, T> {
    let mut last = fail(input);
    for branch in branches {
        match branch.parse(input) {
            Err(failure) if !failure.fatal => last = failure,
            outcome => return outcome,
        }
    }
    Err(last)
}

macro_rules! impl_choice {
    ($first:ident $first_bind:ident $(, $parser:ident $bind:ident)+) => {
        impl<'a, $first, $($parser),+> Choice<'a> for ($first, $($parser),+)
        where
            $first: Parser<'a>,
            $($parser: Parser<'a, Output = $first::Output>,)+
        {
            type Output = $first::Output;

            fn parse_choice(&self, input: &'a str) -> PResult<'a, Self::Output> {
                let ($first_bind, $($bind),+) = self;
                let branches: &[&dyn Parser<'a, Output = Self::Output>] = &[$first_bind, $($bind),+];
                choose(branches, input)
            }
        }
    };
}

impl_choice!(A a, B b);
impl_choice!(A a, B b, C c);
impl_choice!(A a, B b, C c, D d);
impl_choice!(A a, B b, C c, D d, E e);
impl_choice!(A a, B b, C c, D d, E e, F f);
impl_choice!(A a, B b, C c, D d, E e, F f, G g);
impl_choice!(A a, B b, C c, D d, E e, F f, G g, H h);

/// Ordered choice.
///
/// Every branch starts from the same input and the first success wins. A
/// fatal failure ends the choice on the spot. When every branch fails the
/// failure of the last one is returned.
pub fn alt<'a, C>(branches: C) -> impl Parser<'a, Output = C::Output>
where
    C: Choice<'a>,
{
    from_fn(move |input| branches.parse_choice(input))
}

pub fn either<'a, A, B>(first: A, second: B) -> impl Parser<'a, Output = A::Output>
where
    A: Parser<'a>,
    B: Parser<'a, Output = A::Output>,
{
    alt((first, second))
}

/// Transforms the value of a success.
pub fn map<'a, P, F, R>(parser: P, f: F) -> impl Parser<'a, Output = R>
where
    P: Parser<'a>,
    F: Fn(P::Output) -> R,
{
    from_fn(move |input| parser.parse(input).map(|ok| ok.map(&f)))
}

/// Transforms the whole outcome, which lets a semantic check turn a
/// successful match into a failure.
pub fn map_res<'a, P, F, R>(parser: P, f: F) -> impl Parser<'a, Output = R>
where
    P: Parser<'a>,
    F: Fn(PResult<'a, P::Output>) -> PResult<'a, R>,
{
    from_fn(move |input| f(parser.parse(input)))
}

/// Turns a non-fatal failure into a success holding `default`, consuming
/// nothing. Fatal failures pass through.
pub fn opt<'a, P>(parser: P, default: P::Output) -> impl Parser<'a, Output = P::Output>
where
    P: Parser<'a>,
    P::Output: Clone,
{
    from_fn(move |input| match parser.parse(input) {
        Err(failure) if !failure.fatal => Ok(Success::new(input, default.clone())),
        outcome => outcome,
    })
}

/// Runs `parser` but leaves the input where it was.
pub fn peek<'a, P>(parser: P) -> impl Parser<'a, Output = P::Output>
where
    P: Parser<'a>,
{
    from_fn(move |input| {
        let ok = parser.parse(input)?;
        Ok(Success::new(input, ok.value))
    })
}

/// Replaces the value of a success with `value`.
pub fn value<'a, P, T>(parser: P, value: T) -> impl Parser<'a, Output = T>
where
    P: Parser<'a>,
    T: Clone,
{
    from_fn(move |input| {
        let ok = parser.parse(input)?;
        Ok(Success::new(ok.rest, value.clone()))
    })
}

/// Yields the slice consumed by `parser` instead of its value.
pub fn recognize<'a, P>(parser: P) -> impl Parser<'a, Output = &'a str>
where
    P: Parser<'a>,
{
    from_fn(move |input| {
        let ok = parser.parse(input)?;
        let consumed = input.len() - ok.rest.len();
        Ok(Success::new(ok.rest, &input[..consumed]))
    })
}

/// Counts consecutive matches of `parser`. Never fails unless `parser` fails
/// fatally.
pub fn count<'a, P>(parser: P) -> impl Parser<'a, Output = usize>
where
    P: Parser<'a>,
{
    from_fn(move |input| {
        let mut rest = input;
        let mut matched = 0;
        while !rest.is_empty() {
            match parser.parse(rest) {
                Ok(ok) => {
                    matched += 1;
                    let stalled = ok.rest.len() == rest.len();
                    rest = ok.rest;
                    if stalled {
                        break;
                    }
                }
                Err(failure) if failure.fatal => return Err(failure),
                Err(_) => break,
            }
        }
        Ok(Success::new(rest, matched))
    })
}

/// Emits `tracing` events around every invocation of `parser`.
pub fn debug<'a, P>(parser: P, name: &'static str) -> impl Parser<'a, Output = P::Output>
where
    P: Parser<'a>,
{
    from_fn(move |input| {
        tracing::trace!(parser = name, input = %Preview(input), "enter");
        let outcome = parser.parse(input);
        match &outcome {
            Ok(ok) => tracing::trace!(
                parser = name,
                consumed = input.len() - ok.rest.len(),
                "matched"
            ),
            Err(failure) => trace_failure(name, input, failure),
        }
        outcome
    })
}

fn trace_failure(name: &'static str, input: &str, failure: &Failure<'_>) {
    tracing::trace!(
        parser = name,
        fatal = failure.fatal,
        offset = input.len() - failure.rest.len(),
        context = ?failure.innermost().map(|frame| &frame.message),
        "failed"
    );
}

struct Preview<'a>(&'a str);

impl std::fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const LIMIT: usize = 24;
        match self.0.char_indices().nth(LIMIT) {
            Some((end, _)) => write!(f, "{:?}...", &self.0[..end]),
            None => write!(f, "{:?}", self.0),
        }
    }
}
