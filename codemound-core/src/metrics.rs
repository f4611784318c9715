//! Textual signal extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::MetricSignals;

const COMMENT_MARKERS: [&str; 4] = ["#", "//", "/*", "*"];
const ERROR_HANDLING_MARKERS: [&str; 3] = ["try", "catch", "except"];

// `\b` is a real word boundary, so ordinary code yields non-zero counts.
static DECLARATIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(def |func |function |void |class )").expect("valid declaration regex")
});
static LOOPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(for |while )").expect("valid loop regex"));
static DANGEROUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(eval|exec|system\(|popen|md5|sha1|password)").expect("valid dangerous regex")
});
static TEST_MARKERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(unittest|pytest|JUnit|XCTest|@Test|describe\(|it\()")
        .expect("valid test marker regex")
});

/// Compute every signal the scorer needs from a source buffer.
pub fn extract_signals(text: &str) -> MetricSignals {
    let lines = split_lines(text);
    let n_lines = lines.len();
    let total_len: usize = lines
        .iter()
        .map(|line| line.trim_end().chars().count())
        .sum();
    let avg_line_len = total_len as f64 / n_lines.max(1) as f64;

    let comment_lines = lines
        .iter()
        .filter(|line| {
            let content = line.trim_start();
            COMMENT_MARKERS
                .iter()
                .any(|marker| content.starts_with(marker))
        })
        .count();

    let dangerous_matches: Vec<String> = DANGEROUS
        .find_iter(text)
        .map(|found| found.as_str().to_string())
        .collect();

    MetricSignals {
        lines: n_lines,
        avg_line_len,
        comment_lines,
        functions: DECLARATIONS.find_iter(text).count(),
        loops: LOOPS.find_iter(text).count(),
        dangerous_calls: dangerous_matches.len(),
        dangerous_matches,
        has_tests: TEST_MARKERS.is_match(text),
        has_error_handling: ERROR_HANDLING_MARKERS
            .iter()
            .any(|marker| text.contains(marker)),
        trailing_newline: text.ends_with('\n'),
    }
}

/// Split on every universal line boundary, treating `\r\n` as one break.
///
/// A trailing break does not open an extra empty line, so `""` has zero
/// lines and `"a\n"` has one.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        lines.push(&text[start..index]);
        let mut end = index + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(next_index, '\n')) = chars.peek() {
                chars.next();
                end = next_index + 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}
