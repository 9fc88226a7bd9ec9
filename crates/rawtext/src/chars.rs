//! Character classes driving the compaction state machine.
//!
//! The classification is deliberately fixed and ASCII-only: no locale data and
//! no Unicode whitespace tables are consulted.
//!
//! | Class         | Members         |
//! |---------------|-----------------|
//! | space         | `' '`, `'\t'`   |
//! | end-of-line   | `'\n'`, `'\r'`  |
//! | tight joiner  | `'<'`, `'>'`    |
//!
//! Anything else (including U+00A0 and other Unicode spaces) is ordinary text
//! and is copied verbatim.

/// Returns true for the intra-line whitespace characters (space and tab).
#[inline]
pub fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t')
}

/// Returns true for line terminators (`\n` and `\r`).
#[inline]
pub fn is_end_of_line(ch: char) -> bool {
    matches!(ch, '\n' | '\r')
}

/// Returns true for characters that glue lines together without a space when
/// they border a newline-containing run on both sides.
#[inline]
pub fn is_tight_joiner(ch: char) -> bool {
    matches!(ch, '<' | '>')
}
