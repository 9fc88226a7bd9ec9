//! Decoding cursor with a single level of undo.
//!
//! [`Cursor`] walks a byte slice one UTF-8 scalar at a time. It remembers the
//! offsets of the two most recent reads, which is exactly enough to give back
//! the last codepoint after a failed one-character lookahead.
//!
//! Malformed input never stops the walk: any byte that does not start a valid
//! UTF-8 sequence decodes as [`char::REPLACEMENT_CHARACTER`] with a width of one
//! byte, and [`Cursor::emit`] still copies that original byte through.
//!
//! ```rust
//! use rawtext::Cursor;
//!
//! let mut cursor = Cursor::new("/x".as_bytes());
//! assert_eq!(cursor.advance(), Some('/'));
//! assert_eq!(cursor.advance(), Some('x'));
//! cursor.undo();
//!
//! let mut out = Vec::new();
//! cursor.emit(&mut out);
//! assert_eq!(out, b"/");
//! ```

/// Byte cursor over a raw-text span.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    src: &'a [u8],
    pos: usize,
    last_pos: usize,
    last_pos2: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a [u8]) -> Self {
        Self {
            src,
            pos: 0,
            last_pos: 0,
            last_pos2: 0,
        }
    }

    /// Current byte offset into the source.
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Decodes the next codepoint and moves past it.
    ///
    /// Returns `None` at end of input; the recorded positions are left alone in
    /// that case, so a following [`undo`](Self::undo) still refers to the last
    /// successful read.
    pub fn advance(&mut self) -> Option<char> {
        if self.is_eof() {
            return None;
        }
        let (ch, width) = decode(&self.src[self.pos..]);
        self.last_pos2 = self.last_pos;
        self.last_pos = self.pos;
        self.pos += width;
        Some(ch)
    }

    /// Rewinds the most recent [`advance`](Self::advance).
    ///
    /// Only the offsets of the last two reads are kept, so only one undo per
    /// advance is meaningful. A second `undo` in a row rewinds the read before
    /// that one, after which the history is exhausted and a further `undo`
    /// goes back to the start of the input. The normalizer never undoes twice.
    pub fn undo(&mut self) {
        self.pos = self.last_pos;
        self.last_pos = self.last_pos2;
        self.last_pos2 = 0;
    }

    /// Appends the source bytes of the most recently advanced codepoint.
    pub fn emit(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.src[self.last_pos..self.pos]);
    }
}

/// Decodes one scalar from the front of `bytes`, returning it with its width.
///
/// Invalid lead bytes, truncated sequences, overlong forms and surrogates all
/// yield U+FFFD with width 1.
fn decode(bytes: &[u8]) -> (char, usize) {
    const INVALID: (char, usize) = (char::REPLACEMENT_CHARACTER, 1);

    let Some(&lead) = bytes.first() else {
        return INVALID;
    };
    let width = match lead {
        0x00..=0x7F => return (char::from(lead), 1),
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return INVALID,
    };

    bytes
        .get(..width)
        .and_then(|seq| std::str::from_utf8(seq).ok())
        .and_then(|s| s.chars().next())
        .map_or(INVALID, |ch| (ch, width))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(src: &[u8]) -> Vec<char> {
        let mut cursor = Cursor::new(src);
        let mut out = Vec::new();
        while let Some(ch) = cursor.advance() {
            out.push(ch);
        }
        out
    }

    #[test]
    fn decodes_multibyte_scalars() {
        let text = "a\u{e9}\u{20ac}\u{10348}";
        assert_eq!(drain(text.as_bytes()), text.chars().collect::<Vec<_>>());
    }

    #[test]
    fn advance_at_eof_does_not_move() {
        let mut cursor = Cursor::new(b"a");
        assert_eq!(cursor.advance(), Some('a'));
        assert!(cursor.is_eof());
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.pos(), 1);

        let mut out = Vec::new();
        cursor.emit(&mut out);
        assert_eq!(out, b"a");
    }

    #[test]
    fn undo_restores_previous_read() {
        let mut cursor = Cursor::new("x\u{e9}y".as_bytes());
        assert_eq!(cursor.advance(), Some('x'));
        assert_eq!(cursor.advance(), Some('\u{e9}'));
        cursor.undo();
        assert_eq!(cursor.pos(), 1);

        let mut out = Vec::new();
        cursor.emit(&mut out);
        assert_eq!(out, b"x");

        assert_eq!(cursor.advance(), Some('\u{e9}'));
        assert_eq!(cursor.advance(), Some('y'));
        assert!(cursor.is_eof());
    }

    #[test]
    fn repeated_undo_walks_back_through_history() {
        let mut cursor = Cursor::new(b"abc");
        for _ in 0..3 {
            cursor.advance();
        }
        cursor.undo();
        assert_eq!(cursor.pos(), 2);
        cursor.undo();
        assert_eq!(cursor.pos(), 1);
        cursor.undo();
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn invalid_bytes_decode_one_at_a_time() {
        let src = [b'a', 0xFF, 0xC3, b'b', 0xE2, 0x82];
        assert_eq!(
            drain(&src),
            vec![
                'a',
                char::REPLACEMENT_CHARACTER,
                char::REPLACEMENT_CHARACTER,
                'b',
                char::REPLACEMENT_CHARACTER,
                char::REPLACEMENT_CHARACTER,
            ]
        );
    }

    #[test]
    fn overlong_and_surrogate_forms_are_rejected() {
        // Overlong '/' and an encoded surrogate half.
        assert_eq!(decode(&[0xC0, 0xAF]), (char::REPLACEMENT_CHARACTER, 1));
        assert_eq!(decode(&[0xED, 0xA0, 0x80]), (char::REPLACEMENT_CHARACTER, 1));
    }

    #[test]
    fn emit_copies_invalid_byte_verbatim() {
        let mut cursor = Cursor::new(&[0xFF, b'z']);
        assert_eq!(cursor.advance(), Some(char::REPLACEMENT_CHARACTER));
        let mut out = Vec::new();
        cursor.emit(&mut out);
        assert_eq!(out, vec![0xFF]);
    }
}
