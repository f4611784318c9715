//! Domain entities for codemound.

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

/// Language tag attached to a scored file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Language {
    /// Python.
    Python,
    /// Java.
    Java,
    /// Swift.
    Swift,
    /// Objective-C.
    ObjC,
    /// Dart.
    Dart,
    /// C++.
    Cpp,
    /// C.
    C,
    /// JavaScript.
    Js,
    /// TypeScript.
    Ts,
    /// Go.
    Go,
    /// Nothing matched.
    Unknown,
    /// An explicit tag outside the known set, carried through as given.
    Other(String),
}

impl Language {
    /// The tag string used in reports and serialized output.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Python => "python",
            Self::Java => "java",
            Self::Swift => "swift",
            Self::ObjC => "objc",
            Self::Dart => "dart",
            Self::Cpp => "cpp",
            Self::C => "c",
            Self::Js => "js",
            Self::Ts => "ts",
            Self::Go => "go",
            Self::Unknown => "unknown",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "python" => Self::Python,
            "java" => Self::Java,
            "swift" => Self::Swift,
            "objc" => Self::ObjC,
            "dart" => Self::Dart,
            "cpp" => Self::Cpp,
            "c" => Self::C,
            "js" => Self::Js,
            "ts" => Self::Ts,
            "go" => Self::Go,
            "unknown" => Self::Unknown,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(language) => language,
            Err(never) => match never {},
        }
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        match value {
            Language::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// Raw textual signals extracted from a source buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSignals {
    /// Number of lines, using universal newline splitting.
    pub lines: usize,
    /// Mean length of each line after trailing whitespace is stripped.
    pub avg_line_len: f64,
    /// Lines whose first non-blank characters are a comment marker.
    pub comment_lines: usize,
    /// Declaration keyword matches (def, func, function, void, class).
    pub functions: usize,
    /// Loop keyword matches (for, while).
    pub loops: usize,
    /// Number of risky call matches.
    pub dangerous_calls: usize,
    /// The matched risky substrings, in order of appearance.
    pub dangerous_matches: Vec<String>,
    /// Whether a test framework marker appears anywhere in the text.
    pub has_tests: bool,
    /// Whether the text mentions try, catch, or except.
    pub has_error_handling: bool,
    /// Whether the final character of the text is a newline.
    pub trailing_newline: bool,
}

/// The seven bounded sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Line length and comment balance, at most 20.
    pub readability: u32,
    /// Declarations credited, loops penalized, starts at 20.
    pub maintainability: u32,
    /// 15 with error handling keywords, otherwise 8.
    pub robustness: u32,
    /// 15 minus one per 200 lines.
    pub performance: u32,
    /// 10 minus two per dangerous call.
    pub security: u32,
    /// 10 with a test marker, otherwise 4.
    pub testability: u32,
    /// 10 with a trailing newline, otherwise 7.
    pub consistency: u32,
}

impl ScoreBreakdown {
    /// Sub-scores paired with their names, in declaration order.
    pub fn entries(&self) -> [(&'static str, u32); 7] {
        [
            ("readability", self.readability),
            ("maintainability", self.maintainability),
            ("robustness", self.robustness),
            ("performance", self.performance),
            ("security", self.security),
            ("testability", self.testability),
            ("consistency", self.consistency),
        ]
    }

    /// Sum of every sub-score. Not capped.
    pub fn total(&self) -> u32 {
        self.entries().iter().map(|(_, value)| value).sum()
    }
}

/// An improvement hint attached to a score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestion {
    /// Average line length exceeds 100 characters.
    LinesTooLong,
    /// Fewer than 5% of lines are comments.
    InsufficientComments,
    /// Risky calls were found; holds the matched substrings.
    DangerousCalls(Vec<String>),
    /// No test marker was found.
    MissingTests,
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinesTooLong => f.write_str("lines too long, consider splitting"),
            Self::InsufficientComments => f.write_str("insufficient comments"),
            Self::DangerousCalls(calls) => write!(f, "dangerous calls: {}", calls.join(", ")),
            Self::MissingTests => f.write_str("missing tests"),
        }
    }
}

impl Serialize for Suggestion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The outcome of scoring one source buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Detected or overridden language.
    pub language: Language,
    /// Sum of the breakdown.
    pub total: u32,
    /// `100 - total`, floored at zero. Higher is worse.
    pub shit_index: u32,
    /// Individual sub-scores.
    pub breakdown: ScoreBreakdown,
    /// Hints in a fixed trigger order.
    pub suggestions: Vec<Suggestion>,
    /// Signals the score was computed from.
    pub signals: MetricSignals,
}

/// A score tied to the file it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredFile {
    /// Path of the scored file.
    pub path: PathBuf,
    /// Score for the file contents.
    #[serde(flatten)]
    pub result: ScoreResult,
}

#[cfg(test)]
mod tests {
    use super::{Language, ScoreBreakdown, Suggestion};

    #[test]
    fn language_round_trips_known_tags() {
        for tag in ["python", "objc", "cpp", "ts", "unknown"] {
            let language: Language = tag.parse().expect("infallible");
            assert_eq!(language.as_str(), tag);
            assert!(!matches!(language, Language::Other(_)));
        }
    }

    #[test]
    fn language_keeps_unrecognized_tag_verbatim() {
        let language: Language = "Rust".parse().expect("infallible");
        assert_eq!(language, Language::Other("Rust".to_string()));
        assert_eq!(serde_json::to_string(&language).expect("json"), "\"Rust\"");
    }

    #[test]
    fn breakdown_total_is_plain_sum() {
        let breakdown = ScoreBreakdown {
            readability: 20,
            maintainability: 40,
            robustness: 15,
            performance: 15,
            security: 10,
            testability: 10,
            consistency: 10,
        };
        assert_eq!(breakdown.total(), 120);
        assert_eq!(breakdown.entries()[1], ("maintainability", 40));
    }

    #[test]
    fn suggestion_serializes_as_message() {
        let suggestion = Suggestion::DangerousCalls(vec!["eval".to_string(), "md5".to_string()]);
        assert_eq!(
            serde_json::to_string(&suggestion).expect("json"),
            "\"dangerous calls: eval, md5\""
        );
    }
}
