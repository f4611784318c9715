//! Language detection from file extensions and keyword heuristics.

use std::path::Path;

use crate::domain::Language;

/// Extension to language table. Matching is case-sensitive.
const EXTENSIONS: &[(&str, Language)] = &[
    ("py", Language::Python),
    ("java", Language::Java),
    ("swift", Language::Swift),
    ("m", Language::ObjC),
    ("mm", Language::ObjC),
    ("dart", Language::Dart),
    ("cpp", Language::Cpp),
    ("cc", Language::Cpp),
    ("c", Language::C),
    ("js", Language::Js),
    ("ts", Language::Ts),
    ("go", Language::Go),
];

/// Keyword fallback table, scanned in order. The first language with any hit wins.
const KEYWORDS: &[(Language, &[&str])] = &[
    (Language::Python, &["def ", "class ", "import "]),
    (Language::Java, &["class ", "public ", "void "]),
    (Language::Swift, &["func ", "class ", "import "]),
    (Language::ObjC, &["@interface", "@implementation"]),
    (Language::Dart, &["class ", "import ", "void "]),
    (Language::Cpp, &["#include", "int main", "class "]),
    (Language::C, &["#include", "int main"]),
    (Language::Js, &["function ", "class ", "import "]),
    (Language::Ts, &["function ", "class ", "import ", "interface"]),
    (Language::Go, &["package ", "func ", "import "]),
];

/// Detect the language of `text`, preferring the extension of `filename`.
pub fn detect_language(text: &str, filename: Option<&Path>) -> Language {
    if let Some(language) = filename.and_then(language_for_path) {
        return language;
    }

    KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(language, _)| language.clone())
        .unwrap_or(Language::Unknown)
}

/// Look up a language by file extension alone.
pub fn language_for_path(path: &Path) -> Option<Language> {
    let ext = path.extension()?.to_str()?;
    EXTENSIONS
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, language)| language.clone())
}

#[cfg(test)]
mod tests {
    use super::{detect_language, language_for_path};
    use crate::domain::Language;
    use std::path::Path;

    #[test]
    fn extension_wins_over_content() {
        let text = "def main():\n    import os\n";
        assert_eq!(detect_language(text, Some(Path::new("x.go"))), Language::Go);
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        assert_eq!(language_for_path(Path::new("Main.PY")), None);
        assert_eq!(
            detect_language("", Some(Path::new("Main.PY"))),
            Language::Unknown
        );
    }

    #[test]
    fn objc_has_two_extensions() {
        assert_eq!(language_for_path(Path::new("a.m")), Some(Language::ObjC));
        assert_eq!(language_for_path(Path::new("dir/b.mm")), Some(Language::ObjC));
    }

    #[test]
    fn dotfile_has_no_extension() {
        assert_eq!(language_for_path(Path::new(".py")), None);
    }

    #[test]
    fn keyword_fallback_uses_table_order() {
        // "class " is listed for python first, so it wins over java.
        assert_eq!(detect_language("public class Foo {}", None), Language::Python);
        assert_eq!(detect_language("public static int x;", None), Language::Java);
        assert_eq!(detect_language("#include <stdio.h>", None), Language::Cpp);
        assert_eq!(detect_language("package main", None), Language::Go);
        assert_eq!(detect_language("@interface Foo", None), Language::ObjC);
    }

    #[test]
    fn unknown_when_nothing_matches() {
        assert_eq!(detect_language("hello world", None), Language::Unknown);
        assert_eq!(
            detect_language("just prose", Some(Path::new("notes.txt"))),
            Language::Unknown
        );
        assert_eq!(detect_language("", None), Language::Unknown);
    }
}
