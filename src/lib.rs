//! Umbrella crate for template raw-text compaction.
//!
//! Re-exports the [`rawtext`] core and adds what a template compiler needs
//! around it: span records carrying their boundary flags, batch compaction
//! with structured logs, an optional latency observer and YAML configuration.

pub mod config;

pub use crate::config::{ConfigLoadError, NormalizeYamlConfig, RawTextConfig};
pub use rawtext::{
    normalize, normalize_str, normalize_with, resolve_run, Cursor, RunResolution, TrimConfig,
};

use std::borrow::Cow;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, Level};

/// One literal-text span as cut out of a template by its parser.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawTextSpan {
    pub text: String,
    #[serde(default)]
    pub trim_prefix: bool,
    #[serde(default)]
    pub trim_suffix: bool,
}

impl RawTextSpan {
    pub fn new(text: impl Into<String>, trim: TrimConfig) -> Self {
        Self {
            text: text.into(),
            trim_prefix: trim.trim_prefix,
            trim_suffix: trim.trim_suffix,
        }
    }

    pub fn trim(&self) -> TrimConfig {
        TrimConfig::new(self.trim_prefix, self.trim_suffix)
    }
}

/// Compacted output of one span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactedSpan {
    /// Bytes ready to be written verbatim by the renderer.
    pub text: Vec<u8>,
    /// Byte length of the source span.
    pub input_len: usize,
}

impl CompactedSpan {
    pub fn as_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    /// True when the span compacted away entirely.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Latency observer for compaction calls.
pub trait CompactMetrics: Send + Sync {
    fn record_compact(&self, latency: Duration, input_bytes: usize, output_bytes: usize);
}

/// Install or clear the global compaction metrics recorder.
pub fn set_compact_metrics(recorder: Option<Arc<dyn CompactMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn CompactMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn CompactMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn CompactMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn CompactMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record(self, input_bytes: usize, output_bytes: usize) {
        self.recorder
            .record_compact(self.start.elapsed(), input_bytes, output_bytes);
    }
}

/// Compact a single span with the flags it carries.
pub fn compact_span(span: &RawTextSpan) -> CompactedSpan {
    let start = Instant::now();
    let metrics = MetricsSpan::start();

    let text = normalize_with(&span.text, &span.trim());
    let input_len = span.text.len();

    if let Some(metrics) = metrics {
        metrics.record(input_len, text.len());
    }
    debug!(
        input_len,
        output_len = text.len(),
        trim_prefix = span.trim_prefix,
        trim_suffix = span.trim_suffix,
        elapsed_micros = start.elapsed().as_micros(),
        "compact_span"
    );

    CompactedSpan { text, input_len }
}

/// Compact a batch of spans, preserving order.
pub fn compact_spans(spans: &[RawTextSpan]) -> Vec<CompactedSpan> {
    let start = Instant::now();
    let span = tracing::span!(Level::INFO, "rawtext.compact_spans", spans = spans.len());
    let _guard = span.enter();

    let out: Vec<CompactedSpan> = spans.iter().map(compact_span).collect();

    info!(
        spans = out.len(),
        input_bytes = out.iter().map(|s| s.input_len).sum::<usize>(),
        output_bytes = out.iter().map(|s| s.text.len()).sum::<usize>(),
        elapsed_micros = start.elapsed().as_micros(),
        "compact_success"
    );
    out
}

/// Compact the raw-text spans of one template, deriving each span's flags
/// from the configured boundary policy (see [`RawTextConfig::trim_for_span`]).
pub fn compact_spans_with_config(texts: &[String], cfg: &RawTextConfig) -> Vec<CompactedSpan> {
    let count = texts.len();
    let spans: Vec<RawTextSpan> = texts
        .iter()
        .enumerate()
        .map(|(index, text)| RawTextSpan::new(text.as_str(), cfg.trim_for_span(index, count)))
        .collect();
    compact_spans(&spans)
}
