//! Character classes of the TOML grammar.

use crate::primitive::in_ranges;

/// Non-ASCII code points accepted in bare keys, besides ASCII letters,
/// digits, `-` and `_`.
static UNQUOTED_KEY_RANGES: &[(u32, u32)] = &[
    (0xB2, 0xB3),
    (0xB9, 0xB9),
    (0xBC, 0xBE),
    (0xC0, 0xD6),
    (0xD8, 0xF6),
    (0xF8, 0x37D),
    (0x37F, 0x1FFF),
    (0x200C, 0x200D),
    (0x203F, 0x2040),
    (0x2070, 0x218F),
    (0x2460, 0x24FF),
    (0x2C00, 0x2FEF),
    (0x3001, 0xD7FF),
    (0xF900, 0xFDCF),
    (0xFDF0, 0xFFFD),
    (0x10000, 0xEFFFF),
];

#[inline]
pub(crate) fn is_non_ascii(ch: char) -> bool {
    // `char` excludes surrogates, which covers the 0xD800..=0xDFFF gap.
    ch as u32 >= 0x80
}

pub(crate) fn is_unquoted_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || ch == '-'
        || ch == '_'
        || (is_non_ascii(ch) && in_ranges(ch, UNQUOTED_KEY_RANGES))
}

pub(crate) fn is_comment_char(ch: char) -> bool {
    matches!(ch, '\t' | ' '..='~') || is_non_ascii(ch)
}

/// Characters allowed verbatim in a basic string.
pub(crate) fn is_basic_unescaped(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '!' | '#'..='[' | ']'..='~') || is_non_ascii(ch)
}

/// Characters allowed in a literal string.
pub(crate) fn is_literal_char(ch: char) -> bool {
    matches!(ch, '\t' | ' '..='&' | '('..='~') || is_non_ascii(ch)
}

/// Whitespace and newlines, as skipped after a line ending backslash.
pub(crate) fn is_ws_or_newline(ch: char, rest: &str) -> usize {
    match ch {
        ' ' | '\t' | '\n' => 1,
        '\r' if rest[1..].starts_with('\n') => 2,
        _ => 0,
    }
}
