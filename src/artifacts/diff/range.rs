//! Range utilities shared by the orchestrator and the cleanup passes
//!
//! All functions are pure and linear in the length of their inputs, except
//! [`find`] and [`common_overlap`] which are quadratic in the worst case.

use derive_new::new;

/// Length of the longest common prefix of `a` and `b`
pub fn common_prefix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Length of the longest common suffix of `a` and `b`
pub fn common_suffix<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

pub fn equal<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a == b
}

/// An empty prefix always matches
pub fn starts_with<T: PartialEq>(a: &[T], prefix: &[T]) -> bool {
    a.starts_with(prefix)
}

/// An empty suffix always matches
pub fn ends_with<T: PartialEq>(a: &[T], suffix: &[T]) -> bool {
    a.ends_with(suffix)
}

/// Position of the first occurrence of `needle` in `haystack`
pub fn find<T: PartialEq>(haystack: &[T], needle: &[T]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Length of the longest suffix of `a` that is also a prefix of `b`
///
/// e.g. `common_overlap("abcxxx", "xxxdef") == 3`
pub fn common_overlap<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let len = a.len().min(b.len());
    if len == 0 {
        return 0;
    }

    // Only the tail of `a` and the head of `b` can take part in an overlap
    let a = &a[a.len() - len..];
    let b = &b[..len];
    if a == b {
        return len;
    }

    // Grow a candidate suffix of `a` and jump straight to the next place it
    // occurs in `b`; a hit at offset 0 (or a verified jump) is an overlap.
    let mut best = 0;
    let mut length = 1;
    loop {
        let pattern = &a[len - length..];
        let Some(found) = find(b, pattern) else {
            return best;
        };
        length += found;
        if found == 0 || a[len - length..] == b[..length] {
            best = length;
            length += 1;
        }
    }
}

/// Mutual prefix and suffix stripped from a pair of segments by [`partition`]
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Affixes<T> {
    pub prefix: Vec<T>,
    pub suffix: Vec<T>,
}

/// Strips the common prefix and then the common suffix off both segments
///
/// `a` and `b` are left holding their differing cores; the stripped parts are
/// returned. Either affix is empty when there is nothing in common.
pub fn partition<T: PartialEq>(a: &mut Vec<T>, b: &mut Vec<T>) -> Affixes<T> {
    let prefix_len = common_prefix(a, b);
    let prefix: Vec<T> = a.drain(..prefix_len).collect();
    b.drain(..prefix_len);

    let suffix_len = common_suffix(a, b);
    let suffix: Vec<T> = a.drain(a.len() - suffix_len..).collect();
    b.truncate(b.len() - suffix_len);

    Affixes::new(prefix, suffix)
}
