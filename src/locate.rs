//! Maps remaining-input slices back to positions in the original source.

#[cfg(test)]
#[path = "./locate_tests.rs"]
mod tests;

use crate::outcome::Failure;
use std::fmt::Write as _;

/// A zero based position in a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Byte offset from the start of the source.
    pub offset: usize,
    pub line: usize,
    /// Counted in characters from the start of the line.
    pub column: usize,
}

/// Locates the start of `rest` within `original`.
///
/// `rest` is expected to be a suffix of `original`, which holds for every
/// slice a parser hands back. Only `\n` starts a new line, so `\r\n` counts
/// once.
pub fn locate(rest: &str, original: &str) -> Location {
    let mut offset = original.len().saturating_sub(rest.len());
    while !original.is_char_boundary(offset) {
        offset -= 1;
    }
    let consumed = &original[..offset];
    let line = consumed.bytes().filter(|&b| b == b'\n').count();
    let line_start = consumed.rfind('\n').map_or(0, |i| i + 1);
    Location {
        offset,
        line,
        column: consumed[line_start..].chars().count(),
    }
}

/// Returns the full line of `original` containing `offset`, without its line
/// terminator.
fn source_line(original: &str, offset: usize) -> &str {
    let start = original[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = original[offset..]
        .find('\n')
        .map_or(original.len(), |i| offset + i);
    original[start..end].trim_end_matches('\r')
}

fn render_at(out: &mut String, original: &str, at: &str, message: &dyn std::fmt::Display) {
    let loc = locate(at, original);
    let line_no = (loc.line + 1).to_string();
    let gutter = " ".repeat(line_no.len());
    let _ = writeln!(out, "{}:{}: {message}", loc.line + 1, loc.column + 1);
    let _ = writeln!(out, "{gutter} |");
    let _ = writeln!(out, "{line_no} | {}", source_line(original, loc.offset));
    let _ = writeln!(out, "{gutter} | {}^", " ".repeat(loc.column));
}

/// Renders `failure` against `original`.
///
/// The first block points at where the failure happened, followed by one
/// block per frame in the order the frames were pushed.
pub fn render_diagnostics(failure: &Failure<'_>, original: &str) -> String {
    let mut out = String::new();
    let headline = if failure.fatal {
        "error"
    } else {
        "no alternative matched"
    };
    render_at(&mut out, original, failure.rest, &headline);
    for frame in &failure.stack {
        render_at(&mut out, original, frame.at, &frame.message);
    }
    out
}
