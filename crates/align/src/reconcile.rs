use crate::types::Residuals;

/// Match leftover tokens one for one, ignoring contiguity.
///
/// Each missed token, in order, removes the first equal token still present
/// in `remaining`; if there is none it becomes an expected residual.
/// Whatever is left in `remaining` is the actual residual.
pub fn reconcile<T: PartialEq>(missed: Vec<T>, mut remaining: Vec<T>) -> Residuals<T> {
    let mut unexplained = Vec::new();

    for token in missed {
        match remaining.iter().position(|candidate| *candidate == token) {
            Some(idx) => {
                remaining.remove(idx);
            }
            None => unexplained.push(token),
        }
    }

    Residuals {
        expected: unexplained,
        actual: remaining,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scattered_tokens_are_absorbed() {
        let residuals = reconcile(vec!["x", "y"], vec!["y", "q", "x"]);
        assert_eq!(residuals.expected, Vec::<&str>::new());
        assert_eq!(residuals.actual, vec!["q"]);
    }

    #[test]
    fn each_actual_token_explains_one_missed_token() {
        let residuals = reconcile(vec!["a", "a", "a"], vec!["b", "a", "c", "a"]);
        assert_eq!(residuals.expected, vec!["a"]);
        assert_eq!(residuals.actual, vec!["b", "c"]);
    }

    #[test]
    fn removes_first_occurrence_by_position() {
        let residuals = reconcile(vec![1], vec![2, 1, 3, 1]);
        assert_eq!(residuals.actual, vec![2, 3, 1]);
    }

    #[test]
    fn unexplained_tokens_keep_their_order() {
        let residuals = reconcile(vec!["c", "a", "b"], vec!["a"]);
        assert_eq!(residuals.expected, vec!["c", "b"]);
        assert!(residuals.actual.is_empty());
    }
}
