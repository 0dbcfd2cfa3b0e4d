use derive_new::new;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Equal,
    Insert,
    Remove,
}

impl Operation {
    pub fn is_equal(self) -> bool {
        self == Operation::Equal
    }

    pub fn is_insert(self) -> bool {
        self == Operation::Insert
    }

    pub fn is_remove(self) -> bool {
        self == Operation::Remove
    }

    pub fn is_change(self) -> bool {
        self != Operation::Equal
    }

    pub fn symbol(self) -> char {
        match self {
            Operation::Equal => ' ',
            Operation::Insert => '+',
            Operation::Remove => '-',
        }
    }
}

/// One step of an edit script: an operation applied to an owned run of elements
///
/// Equal segments appear in both sequences, Insert segments only in the target and
/// Remove segments only in the source.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Edit<T> {
    pub operation: Operation,
    pub segment: Vec<T>,
}

impl<T> Edit<T> {
    pub fn equal(segment: Vec<T>) -> Self {
        Self::new(Operation::Equal, segment)
    }

    pub fn insert(segment: Vec<T>) -> Self {
        Self::new(Operation::Insert, segment)
    }

    pub fn remove(segment: Vec<T>) -> Self {
        Self::new(Operation::Remove, segment)
    }

    pub fn len(&self) -> usize {
        self.segment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segment.is_empty()
    }
}

impl<T: Display> Edit<T> {
    pub fn as_string(&self) -> String {
        let mut rendered = String::with_capacity(self.segment.len() + 1);
        rendered.push(self.operation.symbol());
        for element in &self.segment {
            rendered.push_str(&element.to_string());
        }
        rendered
    }
}

impl<T: Display> Display for Edit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

/// Ordered list of edits turning a source sequence into a target sequence
pub type EditScript<T> = Vec<Edit<T>>;

/// Rebuilds the source sequence: every Equal and Remove segment, in order
pub fn source<T: Clone>(script: &[Edit<T>]) -> Vec<T> {
    collect_segments(script, |operation| !operation.is_insert())
}

/// Rebuilds the target sequence: every Equal and Insert segment, in order
pub fn target<T: Clone>(script: &[Edit<T>]) -> Vec<T> {
    collect_segments(script, |operation| !operation.is_remove())
}

fn collect_segments<T: Clone>(script: &[Edit<T>], keep: impl Fn(Operation) -> bool) -> Vec<T> {
    script
        .iter()
        .filter(|edit| keep(edit.operation))
        .flat_map(|edit| edit.segment.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_edit_as_string() {
        assert_eq!(Edit::insert(chars("abc")).as_string(), "+abc");
        assert_eq!(Edit::remove(chars("abc")).as_string(), "-abc");
        assert_eq!(Edit::equal(chars("abc")).to_string(), " abc");
    }

    #[test]
    fn test_source_and_target_reconstruction() {
        let script = vec![
            Edit::equal(chars("a")),
            Edit::remove(chars("b")),
            Edit::insert(chars("XY")),
            Edit::equal(chars("c")),
        ];

        assert_eq!(source(&script), chars("abc"));
        assert_eq!(target(&script), chars("aXYc"));
    }

    #[test]
    fn test_operation_predicates() {
        assert!(Operation::Equal.is_equal());
        assert!(!Operation::Equal.is_change());
        assert!(Operation::Insert.is_change());
        assert!(Operation::Remove.is_remove());
        assert_eq!(Operation::Remove.symbol(), '-');
    }
}
