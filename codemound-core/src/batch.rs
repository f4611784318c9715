//! Batch scoring over a file or directory tree.

use std::path::{Path, PathBuf};

use crate::domain::ScoredFile;
use crate::error::Result;
use crate::fs::FileSystem;
use crate::scorer::{LanguageHint, score_source};

/// A file that could not be scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Path of the skipped file.
    pub path: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// Scores and skips from one batch run, both in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// Successfully scored files.
    pub files: Vec<ScoredFile>,
    /// Files that failed to read.
    pub skipped: Vec<SkippedFile>,
}

impl BatchOutcome {
    /// Record the outcome for one file.
    pub fn record(&mut self, path: PathBuf, outcome: Result<ScoredFile>) {
        match outcome {
            Ok(scored) => self.files.push(scored),
            Err(err) => {
                log::debug!("skipping {}: {err}", path.display());
                self.skipped.push(SkippedFile {
                    path,
                    reason: err.to_string(),
                });
            }
        }
    }
}

/// Discovers files and scores each one independently.
pub struct BatchDriver<F: FileSystem> {
    fs: F,
    hint: LanguageHint,
    sorted: bool,
}

impl<F: FileSystem> BatchDriver<F> {
    /// Create a driver that auto-detects languages and keeps walk order.
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            hint: LanguageHint::Auto,
            sorted: false,
        }
    }

    /// Use a language override instead of detection.
    pub fn with_language(mut self, hint: LanguageHint) -> Self {
        self.hint = hint;
        self
    }

    /// Sort discovered paths before scoring.
    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// List the files under `root`, or `root` itself when it is not a directory.
    ///
    /// Only a failure to list the root directory is an error.
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = if self.fs.is_dir(root) {
            self.fs.list_files(root)?
        } else {
            vec![root.to_path_buf()]
        };
        if self.sorted {
            files.sort();
        }
        log::debug!("discovered {} file(s) under {}", files.len(), root.display());
        Ok(files)
    }

    /// Read and score a single file.
    pub fn score_file(&self, path: &Path) -> Result<ScoredFile> {
        let text = self.fs.read_text(path)?;
        Ok(ScoredFile {
            path: path.to_path_buf(),
            result: score_source(&text, &self.hint, Some(path)),
        })
    }

    /// Score every discovered file sequentially. Per-file failures are recorded, not returned.
    pub fn run(&self, root: &Path) -> Result<BatchOutcome> {
        let mut outcome = BatchOutcome::default();
        for path in self.discover(root)? {
            let scored = self.score_file(&path);
            outcome.record(path, scored);
        }
        Ok(outcome)
    }
}
