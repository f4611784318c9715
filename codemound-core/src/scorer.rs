//! Heuristic scoring of extracted signals.
//!
//! The formulas are deliberately crude. Loops always cost maintainability and
//! declarations always add to it, so that sub-score can exceed 20 and the total
//! can exceed 100. Only the shit index is clamped.

use std::path::Path;

use crate::detector::detect_language;
use crate::domain::{Language, MetricSignals, ScoreBreakdown, ScoreResult, Suggestion};
use crate::metrics::extract_signals;

/// Average line length above which lines are considered too long.
pub const LONG_LINE_THRESHOLD: f64 = 100.0;
/// Minimum share of comment lines before comments are considered missing.
pub const MIN_COMMENT_RATIO: f64 = 0.05;

/// Language selection for a scoring call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LanguageHint {
    /// Detect from filename and content.
    #[default]
    Auto,
    /// Use this tag as given.
    Explicit(Language),
}

impl LanguageHint {
    /// Parse a command-line value; `auto` means detection.
    pub fn parse(value: &str) -> Self {
        match value {
            "auto" => Self::Auto,
            other => match other.parse() {
                Ok(language) => Self::Explicit(language),
                Err(never) => match never {},
            },
        }
    }
}

/// Convert signals into the seven sub-scores.
pub fn score_breakdown(signals: &MetricSignals) -> ScoreBreakdown {
    let n_lines = signals.lines as f64;

    let long_line_penalty = (signals.avg_line_len / 5.0) as i64;
    let comment_gap_penalty = ((signals.comment_lines as f64 - n_lines * 0.1).abs() / 2.0) as i64;
    let readability = 20 - long_line_penalty - comment_gap_penalty;

    let maintainability = 20 - 2 * signals.loops as i64 + signals.functions as i64;
    let robustness = if signals.has_error_handling { 15 } else { 8 };
    let performance = 15 - (signals.lines / 200) as i64;
    let security = 10 - 2 * signals.dangerous_calls as i64;
    let testability = if signals.has_tests { 10 } else { 4 };
    let consistency = if signals.trailing_newline { 10 } else { 7 };

    ScoreBreakdown {
        readability: floor_at_zero(readability),
        maintainability: floor_at_zero(maintainability),
        robustness,
        performance: floor_at_zero(performance),
        security: floor_at_zero(security),
        testability,
        consistency,
    }
}

/// Collect suggestions in their fixed trigger order.
pub fn suggestions(signals: &MetricSignals) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    if signals.avg_line_len > LONG_LINE_THRESHOLD {
        suggestions.push(Suggestion::LinesTooLong);
    }
    if (signals.comment_lines as f64) < signals.lines as f64 * MIN_COMMENT_RATIO {
        suggestions.push(Suggestion::InsufficientComments);
    }
    if !signals.dangerous_matches.is_empty() {
        suggestions.push(Suggestion::DangerousCalls(signals.dangerous_matches.clone()));
    }
    if !signals.has_tests {
        suggestions.push(Suggestion::MissingTests);
    }
    suggestions
}

/// Score already extracted signals under the given language tag.
pub fn score_signals(language: Language, signals: MetricSignals) -> ScoreResult {
    let breakdown = score_breakdown(&signals);
    let total = breakdown.total();
    ScoreResult {
        language,
        total,
        shit_index: 100u32.saturating_sub(total),
        breakdown,
        suggestions: suggestions(&signals),
        signals,
    }
}

/// Detect, extract, and score a source buffer.
pub fn score_source(text: &str, hint: &LanguageHint, filename: Option<&Path>) -> ScoreResult {
    let language = match hint {
        LanguageHint::Auto => detect_language(text, filename),
        LanguageHint::Explicit(language) => language.clone(),
    };
    log::debug!(
        "scoring {} as {language}",
        filename.map_or_else(|| "<text>".into(), |path| path.display().to_string())
    );
    score_signals(language, extract_signals(text))
}

fn floor_at_zero(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}
