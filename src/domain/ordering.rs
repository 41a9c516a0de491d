//! Ordering of path component sequences.

use std::cmp::Ordering;

/// Compares two component sequences lexicographically, component by component.
///
/// Components compare by their natural `str` ordering. When one sequence is a
/// strict prefix of the other, the shorter one sorts first, so an empty
/// sequence sorts before every non-empty one.
///
/// After sorting with this ordering all paths sharing a prefix are contiguous,
/// which is what the partitioning in [`build_tree`](crate::domain::build_tree)
/// relies on.
pub fn compare_paths<A, B>(a: &[A], b: &[B]) -> Ordering
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    for (left, right) in a.iter().zip(b.iter()) {
        match left.as_ref().cmp(right.as_ref()) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// True if `path` starts with every component of `prefix`.
pub fn has_prefix<A, B>(path: &[A], prefix: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    path.len() >= prefix.len()
        && path
            .iter()
            .zip(prefix.iter())
            .all(|(p, q)| p.as_ref() == q.as_ref())
}
