#![deny(missing_docs)]
//! codemound core library.
//!
//! Heuristic, text-only quality scoring for source files: language detection,
//! signal extraction, scoring, report rendering, and batch traversal.

pub mod batch;
pub mod detector;
pub mod domain;
pub mod error;
pub mod fs;
pub mod metrics;
pub mod report;
pub mod scorer;

pub use batch::{BatchDriver, BatchOutcome, SkippedFile};
pub use detector::{detect_language, language_for_path};
pub use domain::{Language, MetricSignals, ScoreBreakdown, ScoreResult, ScoredFile, Suggestion};
pub use error::{CodeMoundError, Result};
pub use fs::{FileSystem, StdFileSystem};
pub use metrics::extract_signals;
pub use report::{
    DEFAULT_LOCALE, LOCALES, LocaleLabels, ReportStyle, format_report, locale_labels,
    render_json, render_text,
};
pub use scorer::{LanguageHint, score_breakdown, score_signals, score_source};
