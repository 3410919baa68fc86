/// Every start offset at which `needle` occurs contiguously in `haystack`.
///
/// Offsets are ascending and overlapping occurrences are all reported. A
/// needle longer than the haystack yields no offsets.
///
/// # Panics
///
/// Panics if `needle` is empty.
pub fn find_all<T: PartialEq>(needle: &[T], haystack: &[T]) -> Vec<usize> {
    occurrences(needle, haystack).collect()
}

/// The earliest offset reported by [`find_all`], without scanning past it.
///
/// # Panics
///
/// Panics if `needle` is empty.
pub fn find_first<T: PartialEq>(needle: &[T], haystack: &[T]) -> Option<usize> {
    occurrences(needle, haystack).next()
}

/// Number of occurrences of `needle` in `haystack`, saturating at `limit`.
///
/// # Panics
///
/// Panics if `needle` is empty.
pub fn count_up_to<T: PartialEq>(needle: &[T], haystack: &[T], limit: usize) -> usize {
    occurrences(needle, haystack).take(limit).count()
}

fn occurrences<'a, T: PartialEq>(
    needle: &'a [T],
    haystack: &'a [T],
) -> impl Iterator<Item = usize> + 'a {
    assert!(
        !needle.is_empty(),
        "subsequence search requires a non-empty needle"
    );

    haystack
        .windows(needle.len())
        .enumerate()
        .filter(move |(_, window)| *window == needle)
        .map(|(idx, _)| idx)
}
