//! Fatal failures.
//!
//! A grammar calls [`fatal`] once it has committed to a production: from that
//! point on a mismatch is a syntax error, not an alternative to try. The flag
//! travels inside the [`Failure`](crate::outcome::Failure) itself, and
//! [`alt`](crate::combinator::alt), [`opt`](crate::combinator::opt) and the
//! repetition combinators hand fatal failures straight back to their caller.
//! Nothing unwinds, so [`catch_fatal`] only has to mark the boundary.
//!
//! ```
//! use toml_combinator::combinator::{alt, preceded};
//! use toml_combinator::fatal::fatal;
//! use toml_combinator::outcome::Parser;
//! use toml_combinator::primitive::tag;
//!
//! // Once `(` is seen, a missing `)` must not fall through to the `(x` branch.
//! let grammar = alt((preceded(tag("("), fatal(tag(")"))), tag("(x")));
//! let failure = grammar.parse("(x").unwrap_err();
//! assert!(failure.fatal);
//! assert_eq!(failure.rest, "x");
//! ```

#[cfg(test)]
#[path = "./fatal_tests.rs"]
mod tests;

use crate::outcome::{Parser, from_fn};

/// Marks every failure of `parser` as fatal.
///
/// Use [`Parser::label`] on `parser` to attach context to the failure.
pub fn fatal<'a, P>(parser: P) -> impl Parser<'a, Output = P::Output>
where
    P: Parser<'a>,
{
    from_fn(move |input| parser.parse(input).map_err(|failure| failure.into_fatal()))
}

/// Clears the fatal flag of failures coming out of `parser`, turning them back
/// into ordinary alternatives.
pub fn non_fatal<'a, P>(parser: P) -> impl Parser<'a, Output = P::Output>
where
    P: Parser<'a>,
{
    from_fn(move |input| parser.parse(input).map_err(|failure| failure.into_recoverable()))
}

/// The boundary fatal failures escalate to.
///
/// The outcome is returned unchanged, so callers above the boundary inspect a
/// fatal failure like any other, through its `fatal` flag.
pub fn catch_fatal<'a, P>(parser: P) -> impl Parser<'a, Output = P::Output>
where
    P: Parser<'a>,
{
    from_fn(move |input| {
        let outcome = parser.parse(input);
        if let Err(failure) = &outcome {
            if failure.fatal {
                tracing::debug!(
                    offset = input.len() - failure.rest.len(),
                    frames = failure.stack.len(),
                    "fatal failure reached boundary"
                );
            }
        }
        outcome
    })
}
