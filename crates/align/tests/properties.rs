use proptest::prelude::*;
use tokdiff_align::{align, unique_prefix_len, AlignmentState};

// A small alphabet keeps repeats (and therefore multi-token anchors) common.
fn tokens() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "d", "e"]), 0..32)
}

fn is_subsequence(sub: &[&str], full: &[&str]) -> bool {
    let mut it = full.iter();
    sub.iter().all(|token| it.any(|candidate| candidate == token))
}

proptest! {
    #[test]
    fn self_alignment_is_clean(a in tokens()) {
        prop_assert!(align(&a, &a).is_clean());
    }

    #[test]
    fn empty_side_passes_the_other_through(a in tokens()) {
        let empty: Vec<&str> = Vec::new();

        let left = align(&empty, &a);
        prop_assert!(left.expected.is_empty());
        prop_assert_eq!(left.actual, a.clone());

        let right = align(&a, &empty);
        prop_assert_eq!(right.expected, a);
        prop_assert!(right.actual.is_empty());
    }

    #[test]
    fn residuals_are_ordered_subsequences(a in tokens(), b in tokens()) {
        let result = align(&a, &b);
        prop_assert!(result.expected.len() <= a.len());
        prop_assert!(result.actual.len() <= b.len());
        prop_assert!(is_subsequence(&result.expected, &a));
        prop_assert!(is_subsequence(&result.actual, &b));
    }

    #[test]
    fn explained_tokens_balance(a in tokens(), b in tokens()) {
        let result = align(&a, &b);
        prop_assert_eq!(a.len() - result.expected.len(), b.len() - result.actual.len());
    }

    #[test]
    fn alignment_is_deterministic(a in tokens(), b in tokens()) {
        prop_assert_eq!(align(&a, &b), align(&a, &b));
    }

    #[test]
    fn anchors_partition_the_expected_sequence(a in tokens(), b in tokens()) {
        let mut state = AlignmentState::new(&a, &b);
        let mut cursor = 0;
        let mut actual_len = b.len();

        while let Some(step) = state.step() {
            prop_assert!(!step.is_empty());
            prop_assert_eq!(step.range.start, cursor);
            cursor = step.range.end;

            let now = state.remaining_actual().len();
            if step.is_match() {
                prop_assert_eq!(now, actual_len - step.len());
            } else {
                prop_assert_eq!(now, actual_len);
            }
            actual_len = now;
        }
        prop_assert_eq!(cursor, a.len());
    }

    #[test]
    fn anchor_prefix_is_self_unique_and_minimal(a in prop::collection::vec(prop::sample::select(vec!["a", "b", "c"]), 1..24)) {
        let len = unique_prefix_len(&a);
        let count = |k: usize| a.windows(k).filter(|w| *w == &a[..k]).count();
        prop_assert_eq!(count(len), 1);
        for shorter in 1..len {
            prop_assert!(count(shorter) > 1);
        }
    }
}
