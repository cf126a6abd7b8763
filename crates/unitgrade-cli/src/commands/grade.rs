//! The `unitgrade grade` command.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use unitgrade_core::engine::grade_all_with;
use unitgrade_core::{grade_all_concurrent, GradingObserver, Submission, Verdict, Worksheet};
use unitgrade_io::table::render_tallies;
use unitgrade_io::{load_config_from, read_grid, write_results, GridFormat};

/// Console progress observer.
struct ConsoleObserver;

impl GradingObserver for ConsoleObserver {
    fn on_submission_graded(&self, submission: &Submission) {
        let correct = submission
            .verdicts
            .iter()
            .filter(|v| **v == Verdict::Correct)
            .count();
        eprintln!(
            "  Graded: {} ({correct}/{} correct)",
            submission.student_name,
            submission.verdicts.len()
        );
    }

    fn on_complete(&self, graded: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {graded} submissions graded ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

pub async fn execute(
    worksheet_path: PathBuf,
    responses_path: PathBuf,
    output: PathBuf,
    format: Option<String>,
    parallelism: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let parallelism = parallelism.unwrap_or(config.parallelism);
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");
    let format = output_format(format.as_deref(), &output, config.default_format)?;

    // Build everything before touching the output file.
    let worksheet_grid = read_grid(&worksheet_path)?;
    let worksheet = Worksheet::from_rows(&worksheet_grid)
        .with_context(|| format!("invalid worksheet {}", worksheet_path.display()))?;

    let responses_grid = read_grid(&responses_path)?;
    let submissions = Submission::batch_from_rows(&responses_grid)
        .with_context(|| format!("invalid responses {}", responses_path.display()))?;

    eprintln!(
        "unitgrade v{}: grading {} submissions x {} questions",
        env!("CARGO_PKG_VERSION"),
        submissions.len(),
        worksheet.len()
    );
    eprintln!();

    let observer = ConsoleObserver;
    let results = if parallelism > 1 {
        grade_all_concurrent(worksheet, submissions, parallelism, &observer).await?
    } else {
        grade_all_with(worksheet, submissions, &observer)
    };

    write_results(&output, &results, format)?;

    eprintln!("\n{}", render_tallies(&results.tallies()));
    eprintln!("Results saved to: {}", output.display());
    Ok(())
}

/// Explicit flag, then the output extension, then the configured default.
fn output_format(flag: Option<&str>, output: &Path, fallback: GridFormat) -> Result<GridFormat> {
    if let Some(name) = flag {
        return name.parse::<GridFormat>().map_err(anyhow::Error::msg);
    }
    Ok(match GridFormat::from_path(output) {
        Ok(format) => format,
        Err(reason) => {
            tracing::debug!("{reason}; falling back to {fallback}");
            fallback
        }
    })
}
