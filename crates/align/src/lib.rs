//! # tokdiff align
//!
//! Greedy, reorder-tolerant alignment of two token sequences.
//!
//! The aligner answers one question: which tokens of an *expected* sequence
//! have no supporting run in an *actual* sequence, and which tokens of the
//! actual sequence are left over. Paragraphs may be moved around and
//! boilerplate may be inserted or removed; local contiguity is trusted,
//! global order is not.
//!
//! ## Architecture
//!
//! ```text
//! expected (A), actual (B)
//!     │
//!     ├──> Anchor phase (AlignmentState)
//!     │    ├─> shortest self-unique prefix of the rest of A
//!     │    ├─> first contiguous occurrence of it in B
//!     │    └─> splice it out of B, or record it as missed
//!     │
//!     └──> Reconciliation
//!          ├─> absorb missed tokens that still occur anywhere in B
//!          └─> Residuals { expected, actual }
//! ```
//!
//! The matcher is first-fit: when an anchor occurs several times in B the
//! earliest occurrence is consumed, even if a later one would align more of A.
//!
//! ## Example
//!
//! ```rust
//! use tokdiff_align::align;
//!
//! let expected = ["a", "b", "c", "d"];
//! let actual = ["x", "a", "b", "c", "y", "d"];
//!
//! let residuals = align(&expected, &actual);
//! assert!(residuals.expected.is_empty());
//! assert_eq!(residuals.actual, vec!["x", "y"]);
//! ```

mod anchor;
mod engine;
mod locator;
mod reconcile;
mod types;

pub use anchor::{unique_prefix, unique_prefix_len};
pub use engine::{align, align_detailed, run_anchor_phase, AlignmentState};
pub use locator::{count_up_to, find_all, find_first};
pub use reconcile::reconcile;
pub use types::{AlignOutcome, AnchorOutcome, AnchorStats, AnchorStep, Residuals};
