use crate::locator::count_up_to;

/// Length of the shortest prefix of `seq` that occurs exactly once in `seq`.
///
/// Prefix lengths are tried in increasing order, so the result is the
/// shortest self-unique prefix starting at the front, not the best split
/// point overall. The whole sequence always qualifies.
///
/// # Panics
///
/// Panics if `seq` is empty.
pub fn unique_prefix_len<T: PartialEq>(seq: &[T]) -> usize {
    assert!(!seq.is_empty(), "anchor extraction requires a non-empty sequence");

    (1..=seq.len())
        .find(|&len| count_up_to(&seq[..len], seq, 2) == 1)
        .unwrap_or(seq.len())
}

/// The prefix measured by [`unique_prefix_len`].
///
/// # Panics
///
/// Panics if `seq` is empty.
pub fn unique_prefix<T: PartialEq>(seq: &[T]) -> &[T] {
    &seq[..unique_prefix_len(seq)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_token_when_first_token_is_unique() {
        assert_eq!(unique_prefix(&["a", "b", "b"]), &["a"]);
    }

    #[test]
    fn extends_past_repeated_tokens() {
        assert_eq!(unique_prefix(&["x", "y", "x"]), &["x", "y"]);
        assert_eq!(unique_prefix(&["the", "cat", "the", "dog"]), &["the", "cat"]);
    }

    #[test]
    fn repeated_phrase_needs_extra_context() {
        let seq = ["a", "b", "a", "b", "c"];
        assert_eq!(unique_prefix_len(&seq), 3);
    }

    #[test]
    fn uniform_sequence_takes_everything() {
        let seq = ["z"; 5];
        assert_eq!(unique_prefix_len(&seq), 5);
    }

    #[test]
    fn single_element_is_its_own_anchor() {
        assert_eq!(unique_prefix(&[42]), &[42]);
    }

    #[test]
    #[should_panic(expected = "non-empty sequence")]
    fn empty_sequence_is_rejected() {
        let _ = unique_prefix_len::<u8>(&[]);
    }
}
