//! Grading engine.
//!
//! Every submission is graded against the same read-only answer key, so
//! submissions can be graded independently and in any order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;

use crate::results::Results;
use crate::submission::Submission;
use crate::worksheet::{AnswerKey, Worksheet};

/// Progress reporting trait.
pub trait GradingObserver: Send + Sync {
    fn on_submission_graded(&self, submission: &Submission);
    fn on_complete(&self, graded: usize, elapsed: Duration);
}

/// No-op observer.
pub struct NoopObserver;

impl GradingObserver for NoopObserver {
    fn on_submission_graded(&self, _: &Submission) {}
    fn on_complete(&self, _: usize, _: Duration) {}
}

fn check_alignment(key: &AnswerKey, submission: &Submission) {
    if submission.responses.len() != key.len() {
        tracing::warn!(
            "submission for '{}' has {} responses, worksheet has {} questions",
            submission.student_name,
            submission.responses.len(),
            key.len()
        );
    }
}

/// Grade every submission in input order.
pub fn grade_all(worksheet: Worksheet, submissions: Vec<Submission>) -> Results {
    grade_all_with(worksheet, submissions, &NoopObserver)
}

/// [`grade_all`] with progress reporting.
pub fn grade_all_with(
    worksheet: Worksheet,
    mut submissions: Vec<Submission>,
    observer: &dyn GradingObserver,
) -> Results {
    let start = Instant::now();
    let key = worksheet.key();

    for submission in &mut submissions {
        check_alignment(&key, submission);
        submission.grade(&key);
        observer.on_submission_graded(submission);
    }

    observer.on_complete(submissions.len(), start.elapsed());
    Results::new(worksheet, submissions)
}

/// Grade submissions concurrently, at most `parallelism` at a time.
///
/// The returned submissions keep their input order.
pub async fn grade_all_concurrent(
    worksheet: Worksheet,
    submissions: Vec<Submission>,
    parallelism: usize,
    observer: &dyn GradingObserver,
) -> Result<Results> {
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");

    let start = Instant::now();
    let key = Arc::new(worksheet.key());
    let semaphore = Arc::new(Semaphore::new(parallelism));
    let total = submissions.len();

    let mut futures = FuturesUnordered::new();
    for (idx, submission) in submissions.into_iter().enumerate() {
        let key = Arc::clone(&key);
        let semaphore = Arc::clone(&semaphore);
        futures.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| anyhow::anyhow!("semaphore closed"))?;
            check_alignment(&key, &submission);
            Ok::<_, anyhow::Error>((idx, submission.graded(&key)))
        }));
    }

    let mut slots: Vec<Option<Submission>> = vec![None; total];
    while let Some(joined) = futures.next().await {
        let (idx, graded) = joined??;
        observer.on_submission_graded(&graded);
        slots[idx] = Some(graded);
    }

    let graded = slots
        .into_iter()
        .enumerate()
        .map(|(idx, s)| s.ok_or_else(|| anyhow::anyhow!("submission {idx} was not graded")))
        .collect::<Result<Vec<_>>>()?;

    observer.on_complete(graded.len(), start.elapsed());
    tracing::debug!(
        "graded {} submissions with parallelism {parallelism}",
        graded.len()
    );

    Ok(Results::new(worksheet, graded))
}
