use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokdiff_align::{align_detailed, AnchorStats, Residuals};
use tokdiff_tokenizer::Document;

/// Alignment of one expected/actual document pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub expected_tokens: usize,
    pub actual_tokens: usize,
    pub residual_expected: usize,
    pub residual_actual: usize,
    pub anchors: AnchorStats,
    pub residuals: Residuals<String>,
}

impl AlignmentReport {
    pub fn from_documents(expected: &Document, actual: &Document) -> Self {
        let (residuals, anchors) = align_detailed(&expected.tokens, &actual.tokens);
        let (residual_expected, residual_actual) = residuals.counts();
        Self {
            expected_tokens: expected.len(),
            actual_tokens: actual.len(),
            residual_expected,
            residual_actual,
            anchors,
            residuals,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairOutcome {
    Aligned(AlignmentReport),
    Failed { error: String },
    TimedOut { after_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairReport {
    /// 1-based position in the batch
    pub index: usize,
    pub name: String,
    pub expected_path: PathBuf,
    pub actual_path: PathBuf,
    pub outcome: PairOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub pairs: usize,
    pub aligned: usize,
    pub failed: usize,
    pub timed_out: usize,
    pub clean: usize,
    pub residual_expected_total: usize,
    pub residual_actual_total: usize,
}

impl BatchSummary {
    pub fn from_pairs(pairs: &[PairReport]) -> Self {
        let mut summary = Self {
            pairs: pairs.len(),
            ..Default::default()
        };
        for pair in pairs {
            match &pair.outcome {
                PairOutcome::Aligned(report) => {
                    summary.aligned += 1;
                    if report.residuals.is_clean() {
                        summary.clean += 1;
                    }
                    summary.residual_expected_total += report.residual_expected;
                    summary.residual_actual_total += report.residual_actual;
                }
                PairOutcome::Failed { .. } => summary.failed += 1,
                PairOutcome::TimedOut { .. } => summary.timed_out += 1,
            }
        }
        summary
    }

    /// Pairs that produced no alignment
    pub const fn unprocessed(&self) -> usize {
        self.failed + self.timed_out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub pairs: Vec<PairReport>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn new(pairs: Vec<PairReport>) -> Self {
        let summary = BatchSummary::from_pairs(&pairs);
        Self { pairs, summary }
    }
}

pub const TEXT_HEADER: &str = "# pair\tresidual_expected\tresidual_actual\texpected_tokens\tactual_tokens\tname";

/// Tab-separated rows, one per pair, in batch order.
pub fn render_text(report: &BatchReport, show_residuals: bool) -> String {
    let mut out = String::new();
    out.push_str(TEXT_HEADER);
    out.push('\n');

    for pair in &report.pairs {
        match &pair.outcome {
            PairOutcome::Aligned(alignment) => {
                out.push_str(&format!(
                    "{}\t{}\t{}\t{}\t{}\t{}\n",
                    pair.index,
                    alignment.residual_expected,
                    alignment.residual_actual,
                    alignment.expected_tokens,
                    alignment.actual_tokens,
                    pair.name
                ));
                if show_residuals {
                    push_residual_line(&mut out, '-', "expected", &alignment.residuals.expected);
                    push_residual_line(&mut out, '+', "actual", &alignment.residuals.actual);
                }
            }
            PairOutcome::Failed { error } => {
                out.push_str(&format!(
                    "{}\tfailed\t-\t-\t-\t{}\t{}\n",
                    pair.index,
                    pair.name,
                    one_line(error)
                ));
            }
            PairOutcome::TimedOut { after_ms } => {
                out.push_str(&format!(
                    "{}\ttimed_out\t-\t-\t-\t{}\t{}ms\n",
                    pair.index, pair.name, after_ms
                ));
            }
        }
    }

    out
}

fn push_residual_line(out: &mut String, marker: char, label: &str, tokens: &[String]) {
    if tokens.is_empty() {
        return;
    }
    out.push_str(&format!("\t{marker} {label}: {}\n", tokens.join(" ")));
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
