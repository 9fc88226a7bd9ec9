//! Raw-text compaction for template sources.
//!
//! Template sources mix directives with literal output text. This crate takes
//! one literal span and produces the text the renderer should actually write:
//! `//` line comments removed and every whitespace run folded into a single
//! space or nothing at all.
//!
//! ## Rules in short
//!
//! - `//` up to the end of the line is dropped. The line break stays and joins
//!   the surrounding whitespace.
//! - A run of spaces/tabs/line breaks renders as one space, except:
//!   - a run containing a line break between two tight joiners (`<`, `>`)
//!     renders as nothing, so `"<div>\n  <p>"` becomes `"<div><p>"`;
//!   - a leading line-broken run vanishes under `trim_prefix`;
//!   - a trailing line-broken run vanishes under `trim_suffix`.
//! - A comment that runs to the end of input stops processing right there.
//! - Everything else is copied byte for byte.
//!
//! ## Pure function guarantee
//!
//! No I/O, no globals, no locale. The same bytes and flags always give the
//! same output, and the call never fails: malformed UTF-8 is treated as
//! ordinary text and passed through.
//!
//! ```
//! use rawtext::{normalize_str, normalize_with, TrimConfig};
//!
//! assert_eq!(normalize_str("a // note\n   b", false, false), "a b");
//! assert_eq!(normalize_with("\n  <ul>\n    <li>", &TrimConfig::both()), b"<ul><li>");
//! ```

mod chars;
mod config;
mod cursor;
mod normalize;

pub use crate::chars::{is_end_of_line, is_space, is_tight_joiner};
pub use crate::config::TrimConfig;
pub use crate::cursor::Cursor;
pub use crate::normalize::{normalize, normalize_str, normalize_with, resolve_run, RunResolution};

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "plain",
        "  lead and trail  ",
        "a // comment\nb",
        "<div>\n  <p>\n    text\n  </p>\n</div>\n",
        "\n\n  {hello}  \n\n",
        "a\n<b>\nc",
        "x / y // z\n  w",
        "tabs\t\tand\r\nCRLF\r\n",
        "url: http://example.com\n",
        "\u{3000}ideographic\u{3000}space",
    ];

    const FLAGS: [(bool, bool); 4] = [(false, false), (true, false), (false, true), (true, true)];

    #[test]
    fn output_never_contains_line_breaks_or_double_spaces() {
        for text in SAMPLES {
            for (prefix, suffix) in FLAGS {
                let out = normalize_str(text, prefix, suffix);
                assert!(!out.contains('\n'), "newline in {out:?} from {text:?}");
                assert!(!out.contains('\r'), "carriage return in {out:?} from {text:?}");
                assert!(!out.contains("  "), "double space in {out:?} from {text:?}");
                assert!(!out.contains('\t'), "tab in {out:?} from {text:?}");
                assert!(!out.contains("//"), "comment marker in {out:?} from {text:?}");
            }
        }
    }

    #[test]
    fn output_is_a_fixed_point() {
        for text in SAMPLES {
            for (prefix, suffix) in FLAGS {
                let once = normalize_str(text, prefix, suffix);
                let twice = normalize_str(&once, false, false);
                assert_eq!(once, twice, "not stable for {text:?} with {prefix}/{suffix}");
            }
        }
    }

    #[test]
    fn joiners_are_glued_across_line_breaks() {
        let out = normalize_str("<div>\n  <p>\n    text\n  </p>\n</div>\n", false, true);
        assert_eq!(out, "<div><p> text </p></div>");
    }

    #[test]
    fn comment_after_url_scheme_swallows_rest_of_line() {
        assert_eq!(normalize_str("url: http://example.com\nnext", false, false), "url: http: next");
    }

    #[test]
    fn str_and_bytes_agree() {
        for text in SAMPLES {
            for (prefix, suffix) in FLAGS {
                assert_eq!(
                    normalize_str(text, prefix, suffix).into_bytes(),
                    normalize(text.as_bytes(), prefix, suffix)
                );
            }
        }
    }

    #[test]
    fn config_and_flags_agree() {
        for text in SAMPLES {
            for (prefix, suffix) in FLAGS {
                let cfg = TrimConfig::new(prefix, suffix);
                assert_eq!(normalize_with(text, &cfg), normalize(text, prefix, suffix));
            }
        }
    }

    #[test]
    fn arbitrary_bytes_never_panic() {
        let inputs: [&[u8]; 5] = [
            &[0xFF, 0xFE, 0xFD],
            &[b'/', 0xC0],
            &[0xF0, 0x9F, b' ', b'\n', 0x98],
            &[b'<', b'\n', 0xE2, 0x82, b'>'],
            &[0xED, 0xA0, 0x80, b'/', b'/'],
        ];
        for input in inputs {
            for (prefix, suffix) in FLAGS {
                let out = normalize(input, prefix, suffix);
                assert!(out.len() <= input.len());
            }
        }
    }
}
