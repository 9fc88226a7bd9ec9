//! The compaction state machine.
//!
//! [`normalize`] makes one pass over a raw-text span with a [`Cursor`]. The
//! machine is either copying text or sitting inside a whitespace run. A run is
//! never written out while it is open; it is resolved into nothing or a single
//! space once the next non-whitespace character (or the end of input) shows up,
//! so the output buffer is only ever appended to.
//!
//! `//` starts a line comment. A comment is transparent to runs: text before
//! and after it joins as if the comment were not there, and the line break
//! that ends it takes part in the surrounding run. A comment that reaches the
//! end of input ends the whole call, and any run still open is dropped.
//!
//! See [`resolve_run`] for the decision table.

use crate::chars::{is_end_of_line, is_space, is_tight_joiner};
use crate::config::TrimConfig;
use crate::cursor::Cursor;

/// What a closed whitespace run turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunResolution {
    /// The run disappears.
    Collapse,
    /// The run becomes exactly one `' '`.
    Space,
}

/// Decides how a whitespace run renders.
///
/// * `before` is the last character emitted ahead of the run, or `None` when
///   the run leads the span.
/// * `after` is the first character following the run, or `None` when the run
///   reaches the end of input.
/// * `has_newline` says whether the run contains a line break.
///
/// Runs without a line break always render as a space. A line-broken run
/// collapses when it leads the span and `trim_prefix` is set, when it trails
/// the span and `trim_suffix` is set, or when it sits between two tight joiners
/// (`<` / `>`).
///
/// ```rust
/// use rawtext::{resolve_run, RunResolution, TrimConfig};
///
/// let cfg = TrimConfig::none();
/// assert_eq!(resolve_run(Some('>'), Some('<'), true, &cfg), RunResolution::Collapse);
/// assert_eq!(resolve_run(Some('>'), Some('<'), false, &cfg), RunResolution::Space);
/// assert_eq!(resolve_run(Some('a'), None, true, &TrimConfig::with_suffix()), RunResolution::Collapse);
/// ```
pub fn resolve_run(
    before: Option<char>,
    after: Option<char>,
    has_newline: bool,
    cfg: &TrimConfig,
) -> RunResolution {
    let leading_trim = cfg.trim_prefix && before.is_none();
    let collapse = has_newline
        && match after {
            Some(after) => {
                leading_trim || (before.is_some_and(is_tight_joiner) && is_tight_joiner(after))
            }
            None => cfg.trim_suffix || leading_trim,
        };

    if collapse {
        RunResolution::Collapse
    } else {
        RunResolution::Space
    }
}

/// Compacts a raw-text span.
///
/// Accepts any bytes. Valid UTF-8 is processed codepoint by codepoint; bytes
/// that are not valid UTF-8 are treated as ordinary text and copied through
/// unchanged.
///
/// ```rust
/// use rawtext::normalize;
///
/// assert_eq!(normalize("a // comment\nb", false, false), b"a b");
/// assert_eq!(normalize("<div>\n  <p>", false, false), b"<div><p>");
/// assert_eq!(normalize("hello  \n", false, true), b"hello");
/// assert_eq!(normalize("hello   // trailing", false, true), b"hello");
/// ```
pub fn normalize(text: impl AsRef<[u8]>, trim_prefix: bool, trim_suffix: bool) -> Vec<u8> {
    normalize_with(text, &TrimConfig::new(trim_prefix, trim_suffix))
}

/// [`normalize`] with the flags taken from a [`TrimConfig`].
pub fn normalize_with(text: impl AsRef<[u8]>, cfg: &TrimConfig) -> Vec<u8> {
    let text = text.as_ref();
    let mut cursor = Cursor::new(text);
    let mut run = RunState::default();
    let mut out = Vec::with_capacity(text.len());

    while let Some(mut ch) = cursor.advance() {
        if ch == '/' {
            match skip_line_comment(&mut cursor) {
                Comment::Absent => {}
                Comment::EndedBy(eol) => ch = eol,
                Comment::Unterminated => return out,
            }
        }

        if run.trimming {
            if is_space(ch) {
                continue;
            }
            if is_end_of_line(ch) {
                run.seen_newline = true;
                continue;
            }
            run.close(Some(ch), cfg, &mut out);
        }

        let newline = is_end_of_line(ch);
        if newline || is_space(ch) {
            run.open(newline);
            continue;
        }

        cursor.emit(&mut out);
        run.last_char = Some(ch);
    }

    if run.trimming {
        run.close(None, cfg, &mut out);
    }
    out
}

/// Compacts a span that is already a `&str`.
///
/// Only whole codepoints and ASCII spaces reach the output, so the result is
/// valid UTF-8 whenever the input is.
pub fn normalize_str(text: &str, trim_prefix: bool, trim_suffix: bool) -> String {
    let bytes = normalize(text, trim_prefix, trim_suffix);
    String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

/// Whitespace-run bookkeeping for a single call.
#[derive(Debug, Default)]
struct RunState {
    trimming: bool,
    seen_newline: bool,
    char_before_trim: Option<char>,
    last_char: Option<char>,
}

impl RunState {
    fn open(&mut self, newline: bool) {
        self.trimming = true;
        self.seen_newline = newline;
        self.char_before_trim = self.last_char;
    }

    fn close(&mut self, after: Option<char>, cfg: &TrimConfig, out: &mut Vec<u8>) {
        let resolution = resolve_run(self.char_before_trim, after, self.seen_newline, cfg);
        if resolution == RunResolution::Space {
            out.push(b' ');
        }
        self.trimming = false;
        self.seen_newline = false;
    }
}

enum Comment {
    /// The `/` just read is ordinary text.
    Absent,
    /// A comment was skipped; it ended at this line break, which was consumed.
    EndedBy(char),
    /// A comment ran to the end of input.
    Unterminated,
}

/// Called right after a `/` was read. Skips a `//` comment if one starts here,
/// otherwise leaves the cursor so that the `/` is the last advanced codepoint.
fn skip_line_comment(cursor: &mut Cursor<'_>) -> Comment {
    match cursor.advance() {
        Some('/') => {}
        Some(_) => {
            cursor.undo();
            return Comment::Absent;
        }
        None => return Comment::Absent,
    }

    loop {
        match cursor.advance() {
            None => return Comment::Unterminated,
            Some(ch) if is_end_of_line(ch) => return Comment::EndedBy(ch),
            Some(_) => {}
        }
    }
}
