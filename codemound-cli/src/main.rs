#![deny(missing_docs)]
//! codemound command-line interface.
//!
//! Scores a source file, or every file under a directory, and prints a report
//! per file.

use clap::Parser;
use codemound_core::{
    BatchDriver, BatchOutcome, DEFAULT_LOCALE, LanguageHint, ReportStyle, ScoredFile,
    SkippedFile, StdFileSystem, render_json, render_text,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser, Debug)]
#[command(
    name = "codemound",
    version,
    about = "Heuristic code quality and shit index scorer"
)]
struct Cli {
    /// Source file or directory to scan.
    path: PathBuf,
    /// Language tag to use for every file instead of detection.
    #[arg(long, env = "CODEMOUND_LANG", default_value = "auto")]
    lang: String,
    /// Emit all scored files as JSON.
    #[arg(long)]
    json: bool,
    /// Markdown rendering. The text report is already markdown.
    #[arg(long)]
    markdown: bool,
    /// Only print the header and score lines of each report.
    #[arg(long)]
    summary: bool,
    /// Enable debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
    /// Locale for report labels (zh-CN, en-US).
    #[arg(long, env = "CODEMOUND_LOCALE", default_value = DEFAULT_LOCALE)]
    locale: String,
    /// Maximum number of files scored concurrently.
    #[arg(short = 'j', long, env = "CODEMOUND_JOBS", default_value_t = 1)]
    jobs: usize,
    /// Sort discovered files by path before scoring.
    #[arg(long)]
    sort: bool,
    /// Write the report to a file instead of stdout.
    #[arg(long = "report-output", env = "CODEMOUND_REPORT_OUTPUT")]
    report_output: Option<PathBuf>,
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let outcome = run_scan(&cli).await?;
    report_skipped(&outcome.skipped, &mut std::io::stderr().lock())?;

    let contents = render_outcome(&outcome.files, &cli)?;
    emit_output(cli.report_output.as_deref(), contents).await?;
    log::debug!(
        "scored {} file(s), skipped {}",
        outcome.files.len(),
        outcome.skipped.len()
    );
    Ok(())
}

#[cfg(test)]
fn main() {}

#[cfg(not(test))]
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

async fn run_scan(cli: &Cli) -> CliResult<BatchOutcome> {
    let driver = BatchDriver::new(StdFileSystem::new())
        .with_language(LanguageHint::parse(&cli.lang))
        .with_sorted(cli.sort);

    if cli.jobs <= 1 {
        return Ok(driver.run(&cli.path)?);
    }
    score_concurrently(Arc::new(driver), &cli.path, cli.jobs).await
}

async fn score_concurrently(
    driver: Arc<BatchDriver<StdFileSystem>>,
    root: &Path,
    jobs: usize,
) -> CliResult<BatchOutcome> {
    let paths = driver.discover(root)?;
    log::debug!("scoring {} file(s) on {jobs} worker(s)", paths.len());
    let semaphore = Arc::new(Semaphore::new(jobs));
    let mut tasks = JoinSet::new();

    for (index, path) in paths.into_iter().enumerate() {
        let permit = semaphore.clone().acquire_owned().await?;
        let driver = driver.clone();
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let scored = driver.score_file(&path);
            (index, path, scored)
        });
    }

    let mut completed = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        completed.push(joined?);
    }
    // Tasks finish in any order; reports follow discovery order.
    completed.sort_by_key(|(index, _, _)| *index);

    let mut outcome = BatchOutcome::default();
    for (_, path, scored) in completed {
        outcome.record(path, scored);
    }
    Ok(outcome)
}

fn report_skipped(skipped: &[SkippedFile], out: &mut impl Write) -> std::io::Result<()> {
    for file in skipped {
        writeln!(out, "skipping {}: {}", file.path.display(), file.reason)?;
    }
    Ok(())
}

fn render_outcome(files: &[ScoredFile], cli: &Cli) -> CliResult<String> {
    if cli.json {
        let mut json = render_json(files)?;
        json.push('\n');
        return Ok(json);
    }
    let style = ReportStyle {
        summary: cli.summary,
        markdown: cli.markdown,
    };
    Ok(render_text(files, &cli.locale, style))
}

async fn emit_output(report_output: Option<&Path>, contents: String) -> CliResult<()> {
    if let Some(path) = report_output {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
    } else {
        print!("{contents}");
    }
    Ok(())
}
