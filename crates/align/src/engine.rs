use crate::anchor::unique_prefix_len;
use crate::locator::find_first;
use crate::reconcile::reconcile;
use crate::types::{AlignOutcome, AnchorOutcome, AnchorStats, AnchorStep, Residuals};

/// Working state of one anchor phase.
///
/// The expected sequence is borrowed and walked with a cursor. The actual
/// sequence is copied into a buffer owned by the state; matched anchors are
/// spliced out of it, so it only ever shrinks.
#[derive(Debug, Clone)]
pub struct AlignmentState<'a, T> {
    expected: &'a [T],
    cursor: usize,
    actual: Vec<T>,
    missed: Vec<T>,
    stats: AnchorStats,
}

impl<'a, T: Clone + PartialEq> AlignmentState<'a, T> {
    #[must_use]
    pub fn new(expected: &'a [T], actual: &[T]) -> Self {
        Self {
            expected,
            cursor: 0,
            actual: actual.to_vec(),
            missed: Vec::new(),
            stats: AnchorStats::default(),
        }
    }

    /// Extract and consume the next anchor. Returns `None` once the expected
    /// sequence is exhausted.
    pub fn step(&mut self) -> Option<AnchorStep> {
        let expected = self.expected;
        let rest = &expected[self.cursor..];
        if rest.is_empty() {
            return None;
        }

        let len = unique_prefix_len(rest);
        let anchor = &rest[..len];
        let start = self.cursor;

        // First fit: the earliest occurrence wins, no scoring among candidates.
        let outcome = match find_first(anchor, &self.actual) {
            Some(at) => {
                self.actual.drain(at..at + len);
                self.stats.matched_anchors += 1;
                self.stats.matched_tokens += len;
                AnchorOutcome::Matched { at }
            }
            None => {
                self.missed.extend_from_slice(anchor);
                self.stats.missed_anchors += 1;
                AnchorOutcome::Missed
            }
        };
        self.cursor += len;

        log::trace!(
            "anchor {}..{} ({} tokens): {:?}, {} actual tokens left",
            start,
            self.cursor,
            len,
            outcome,
            self.actual.len()
        );

        Some(AnchorStep {
            range: start..self.cursor,
            outcome,
        })
    }

    /// Run the remaining steps and hand over the leftovers.
    #[must_use]
    pub fn finish(mut self) -> AlignOutcome<T> {
        while self.step().is_some() {}
        AlignOutcome {
            missed: self.missed,
            remaining: self.actual,
            anchors: self.stats,
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.cursor == self.expected.len()
    }

    /// Expected tokens not yet covered by an anchor
    #[must_use]
    pub fn remaining_expected(&self) -> &'a [T] {
        &self.expected[self.cursor..]
    }

    /// Actual tokens not yet consumed
    #[must_use]
    pub fn remaining_actual(&self) -> &[T] {
        &self.actual
    }

    #[must_use]
    pub fn missed(&self) -> &[T] {
        &self.missed
    }

    #[must_use]
    pub fn stats(&self) -> AnchorStats {
        self.stats
    }
}

/// Run the anchor phase over `expected` and `actual` to completion.
#[must_use]
pub fn run_anchor_phase<T: Clone + PartialEq>(expected: &[T], actual: &[T]) -> AlignOutcome<T> {
    AlignmentState::new(expected, actual).finish()
}

/// Align `expected` against `actual` and return what neither side explains.
///
/// Neither input is modified. Any pair of sequences, empty ones included,
/// yields a result.
#[must_use]
pub fn align<T: Clone + PartialEq>(expected: &[T], actual: &[T]) -> Residuals<T> {
    align_detailed(expected, actual).0
}

/// [`align`], plus the counters gathered during the anchor phase.
#[must_use]
pub fn align_detailed<T: Clone + PartialEq>(
    expected: &[T],
    actual: &[T],
) -> (Residuals<T>, AnchorStats) {
    let AlignOutcome {
        missed,
        remaining,
        anchors: stats,
    } = run_anchor_phase(expected, actual);
    let missed_len = missed.len();
    let residuals = reconcile(missed, remaining);

    log::debug!(
        "aligned {} expected / {} actual tokens: {} anchors ({} missed), {} of {} missed tokens reconciled, residuals {:?}",
        expected.len(),
        actual.len(),
        stats.anchors(),
        stats.missed_anchors,
        missed_len - residuals.expected.len(),
        missed_len,
        residuals.counts()
    );

    (residuals, stats)
}
