use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokdiff_tokenizer::{load_document, NormalizingTokenizer, Tokenizer};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::report::{AlignmentReport, PairOutcome, PairReport};

/// One expected/actual document pair to align
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairSpec {
    pub name: String,
    pub expected: PathBuf,
    pub actual: PathBuf,
}

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Pairs aligned at the same time
    pub jobs: usize,

    /// Give up waiting for a single pair after this long
    pub pair_timeout: Option<Duration>,
}

/// Load, tokenize and align both documents of a pair.
pub fn align_documents(
    expected: &Path,
    actual: &Path,
    tokenizer: &dyn Tokenizer,
) -> tokdiff_tokenizer::Result<AlignmentReport> {
    let expected = load_document(expected, tokenizer)?;
    let actual = load_document(actual, tokenizer)?;
    Ok(AlignmentReport::from_documents(&expected, &actual))
}

/// Align every pair on the blocking pool, at most `options.jobs` at once.
/// Reports come back in input order whatever order the pairs finish in.
pub async fn run_pairs(
    pairs: Vec<PairSpec>,
    tokenizer: Arc<NormalizingTokenizer>,
    options: BatchOptions,
) -> Vec<PairReport> {
    let work = move |pair: &PairSpec| {
        align_documents(&pair.expected, &pair.actual, tokenizer.as_ref())
    };
    run_pairs_with(pairs, Arc::new(work), options).await
}

async fn run_pairs_with<F>(
    pairs: Vec<PairSpec>,
    work: Arc<F>,
    options: BatchOptions,
) -> Vec<PairReport>
where
    F: Fn(&PairSpec) -> tokdiff_tokenizer::Result<AlignmentReport> + Send + Sync + 'static,
{
    let semaphore = Arc::new(Semaphore::new(options.jobs.max(1)));
    log::info!(
        "Aligning {} pair(s) with {} job(s)",
        pairs.len(),
        options.jobs.max(1)
    );

    let mut tasks = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let semaphore = Arc::clone(&semaphore);
        let work = Arc::clone(&work);
        let spec = pair.clone();
        let handle = tokio::spawn(async move {
            // The semaphore is never closed; acquire failures are not expected.
            let permit = semaphore
                .acquire_owned()
                .await
                .unwrap_or_else(|_| unreachable!("batch semaphore closed"));
            align_pair(spec, work, permit, options.pair_timeout).await
        });
        tasks.push((pair, handle));
    }

    let mut reports = Vec::with_capacity(tasks.len());
    for (idx, (pair, handle)) in tasks.into_iter().enumerate() {
        let outcome = handle.await.unwrap_or_else(|err| PairOutcome::Failed {
            error: format!("alignment task failed: {err}"),
        });
        log_outcome(&pair, &outcome);
        reports.push(PairReport {
            index: idx + 1,
            name: pair.name,
            expected_path: pair.expected,
            actual_path: pair.actual,
            outcome,
        });
    }
    reports
}

/// The permit travels with the blocking work: a pair that timed out keeps
/// its job slot until the alignment really returns.
async fn align_pair<F>(
    pair: PairSpec,
    work: Arc<F>,
    permit: OwnedSemaphorePermit,
    timeout: Option<Duration>,
) -> PairOutcome
where
    F: Fn(&PairSpec) -> tokdiff_tokenizer::Result<AlignmentReport> + Send + Sync + 'static,
{
    let task = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        work(&pair)
    });

    let joined = match timeout {
        Some(limit) => match tokio::time::timeout(limit, task).await {
            Ok(joined) => joined,
            Err(_) => {
                return PairOutcome::TimedOut {
                    after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
                }
            }
        },
        None => task.await,
    };

    match joined {
        Ok(Ok(report)) => PairOutcome::Aligned(report),
        Ok(Err(err)) => PairOutcome::Failed {
            error: err.to_string(),
        },
        Err(err) => PairOutcome::Failed {
            error: format!("alignment task failed: {err}"),
        },
    }
}

fn log_outcome(pair: &PairSpec, outcome: &PairOutcome) {
    match outcome {
        PairOutcome::Aligned(report) => log::debug!(
            "{}: residuals {}/{} of {}/{} tokens",
            pair.name,
            report.residual_expected,
            report.residual_actual,
            report.expected_tokens,
            report.actual_tokens
        ),
        PairOutcome::Failed { error } => log::warn!("{}: {}", pair.name, error),
        PairOutcome::TimedOut { after_ms } => {
            log::warn!("{}: no result after {}ms", pair.name, after_ms)
        }
    }
}
