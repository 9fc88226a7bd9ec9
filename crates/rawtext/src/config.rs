//! Boundary flags for raw-text compaction.
//!
//! The template compiler knows what surrounds each raw-text span; this crate
//! does not. [`TrimConfig`] carries that knowledge in: whether a
//! newline-containing run at the start of the span (`trim_prefix`) or at its end
//! (`trim_suffix`) should vanish instead of becoming a single space.
//!
//! # Examples
//!
//! ```rust
//! use rawtext::{normalize_with, TrimConfig};
//!
//! let cfg = TrimConfig::with_prefix();
//! assert_eq!(normalize_with("\n  hello", &cfg), b"hello");
//!
//! let cfg = TrimConfig::default();
//! assert_eq!(normalize_with("\n  hello", &cfg), b" hello");
//! ```

use serde::{Deserialize, Serialize};

/// Trimming policy for the edges of one raw-text span.
///
/// Serializes as:
///
/// ```json
/// { "trim_prefix": true, "trim_suffix": false }
/// ```
///
/// Trimming only ever applies to runs that contain a line break. A trailing
/// run of plain spaces still renders as one space even with `trim_suffix` set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TrimConfig {
    /// Drop a leading newline-containing run.
    #[serde(default)]
    pub trim_prefix: bool,
    /// Drop a trailing newline-containing run.
    #[serde(default)]
    pub trim_suffix: bool,
}

impl TrimConfig {
    pub const fn new(trim_prefix: bool, trim_suffix: bool) -> Self {
        Self {
            trim_prefix,
            trim_suffix,
        }
    }

    /// Neither edge is trimmed.
    pub const fn none() -> Self {
        Self::new(false, false)
    }

    /// Both edges are trimmed.
    pub const fn both() -> Self {
        Self::new(true, true)
    }

    pub const fn with_prefix() -> Self {
        Self::new(true, false)
    }

    pub const fn with_suffix() -> Self {
        Self::new(false, true)
    }
}
