use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Counters collected while anchors are consumed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorStats {
    /// Anchors found contiguously in the actual sequence
    pub matched_anchors: usize,

    /// Anchors with no contiguous occurrence in the actual sequence
    pub missed_anchors: usize,

    /// Tokens of the expected sequence covered by matched anchors
    pub matched_tokens: usize,
}

impl AnchorStats {
    /// Total number of anchors extracted
    #[must_use]
    pub const fn anchors(&self) -> usize {
        self.matched_anchors + self.missed_anchors
    }
}

/// What happened to a single anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorOutcome {
    /// Spliced out of the actual sequence starting at `at`
    Matched { at: usize },

    /// Appended to the missed tokens
    Missed,
}

/// One iteration of the anchor phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorStep {
    /// Anchor position within the expected sequence
    pub range: Range<usize>,

    pub outcome: AnchorOutcome,
}

impl AnchorStep {
    #[must_use]
    pub fn len(&self) -> usize {
        self.range.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self.outcome, AnchorOutcome::Matched { .. })
    }
}

/// State left by the anchor phase, before reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignOutcome<T> {
    /// Tokens of unmatched anchors, in expected order
    pub missed: Vec<T>,

    /// Actual tokens not consumed by any anchor, in actual order
    pub remaining: Vec<T>,

    /// Counters gathered while anchors were matched
    pub anchors: AnchorStats,
}

/// Tokens left unexplained on each side after alignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Residuals<T> {
    /// Expected tokens with no supporting match in the actual sequence
    pub expected: Vec<T>,

    /// Actual tokens that nothing in the expected sequence accounts for
    pub actual: Vec<T>,
}

impl<T> Residuals<T> {
    /// True when both sides are fully explained
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.expected.is_empty() && self.actual.is_empty()
    }

    /// `(expected, actual)` residual sizes, the headline mismatch counts
    #[must_use]
    pub fn counts(&self) -> (usize, usize) {
        (self.expected.len(), self.actual.len())
    }
}
