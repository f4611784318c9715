//! Report formatting utilities for codemound outputs.

use std::fmt::Write;

use serde::Serialize;

use crate::domain::{ScoreResult, ScoredFile, Suggestion};

/// Locale used when none is requested or the requested one is unknown.
pub const DEFAULT_LOCALE: &str = "zh-CN";

const SEPARATOR_WIDTH: usize = 40;

/// Label set for one report locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleLabels {
    /// Locale identifier, e.g. `en-US`.
    pub id: &'static str,
    /// Report title; the language tag is appended in parentheses.
    pub header: &'static str,
    /// Label of the shit index line.
    pub shit_index: &'static str,
    /// Label of the total score line.
    pub score: &'static str,
    /// Title of the suggestions section.
    pub suggestions: &'static str,
    /// Shown instead of a list when there is nothing to suggest.
    pub all_clear: &'static str,
    /// Message for [`Suggestion::LinesTooLong`].
    pub lines_too_long: &'static str,
    /// Message for [`Suggestion::InsufficientComments`].
    pub insufficient_comments: &'static str,
    /// Prefix for [`Suggestion::DangerousCalls`].
    pub dangerous_calls: &'static str,
    /// Message for [`Suggestion::MissingTests`].
    pub missing_tests: &'static str,
}

/// Every supported locale. Add a row to support another.
pub static LOCALES: &[LocaleLabels] = &[
    LocaleLabels {
        id: "en-US",
        header: "Code Quality Report",
        shit_index: "💩 Shit Index",
        score: "✨ Score",
        suggestions: "🛠 Suggestions",
        all_clear: "nothing to complain about, keep it up!",
        lines_too_long: "lines too long, consider splitting",
        insufficient_comments: "insufficient comments",
        dangerous_calls: "dangerous calls",
        missing_tests: "missing tests",
    },
    LocaleLabels {
        id: "zh-CN",
        header: "代码质量报告",
        shit_index: "💩 屎山指数",
        score: "✨ 综合得分",
        suggestions: "🛠 改进建议",
        all_clear: "没啥要挑剔的，继续保持！",
        lines_too_long: "行太长，考虑拆分",
        insufficient_comments: "缺少注释，别人看不懂",
        dangerous_calls: "危险调用",
        missing_tests: "缺少测试",
    },
];

/// Rendering options for text reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStyle {
    /// Emit only the header and the two score lines.
    pub summary: bool,
    /// Markdown rendering. The text report is already markdown, so output is unchanged.
    pub markdown: bool,
}

/// Look up labels for a locale, falling back to [`DEFAULT_LOCALE`].
pub fn locale_labels(locale: &str) -> &'static LocaleLabels {
    LOCALES
        .iter()
        .find(|labels| labels.id == locale)
        .or_else(|| LOCALES.iter().find(|labels| labels.id == DEFAULT_LOCALE))
        .unwrap_or(&LOCALES[0])
}

/// Render a suggestion in the given locale.
pub fn localize_suggestion(suggestion: &Suggestion, labels: &LocaleLabels) -> String {
    match suggestion {
        Suggestion::LinesTooLong => labels.lines_too_long.to_string(),
        Suggestion::InsufficientComments => labels.insufficient_comments.to_string(),
        Suggestion::DangerousCalls(calls) => {
            format!("{}: {}", labels.dangerous_calls, calls.join(", "))
        }
        Suggestion::MissingTests => labels.missing_tests.to_string(),
    }
}

/// Render one score result as a text report.
pub fn format_report(result: &ScoreResult, locale: &str, style: ReportStyle) -> String {
    let labels = locale_labels(locale);
    let mut output = String::new();
    let _ = writeln!(output, "## {} ({})", labels.header, result.language);
    let _ = writeln!(output, "- {}: {}", labels.shit_index, result.shit_index);
    let _ = write!(output, "- {}: {}", labels.score, result.total);
    if style.summary {
        return output;
    }

    let _ = writeln!(output, "\n\n### Breakdown");
    for (name, value) in result.breakdown.entries() {
        let _ = writeln!(output, "- {name}: {value}");
    }

    if result.suggestions.is_empty() {
        let _ = write!(output, "\n{}: {}", labels.suggestions, labels.all_clear);
    } else {
        let _ = write!(output, "\n{}:", labels.suggestions);
        for suggestion in &result.suggestions {
            let _ = write!(output, "\n- {}", localize_suggestion(suggestion, labels));
        }
    }
    output
}

/// Render every scored file, each followed by a separator rule.
pub fn render_text(files: &[ScoredFile], locale: &str, style: ReportStyle) -> String {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    let mut output = String::new();
    for file in files {
        let _ = writeln!(output, "{}", format_report(&file.result, locale, style));
        let _ = writeln!(output, "\n{separator}\n");
    }
    output
}

/// Render any serializable report payload as JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}
