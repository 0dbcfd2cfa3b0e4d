//! Line-mode acceleration for large text
//!
//! Every line (up to and including its terminator) is interned into a table
//! shared by both inputs, so the inputs shrink to sequences of line ids. The
//! id sequences are diffed, expanded back into elements, and finally every
//! block that both removes and inserts lines is re-diffed element by element.

use crate::artifacts::core::debug_log;
use crate::artifacts::diff::calculation::calculate;
use crate::artifacts::diff::element::Element;
use crate::artifacts::diff::operation::{Edit, EditScript, Operation};
use derive_new::new;
use std::collections::HashMap;
use std::mem;

type LineId = usize;

/// Distinct lines in order of first occurrence, plus the reverse lookup
#[derive(Debug, new)]
struct LineTable<'a, T> {
    #[new(default)]
    lines: Vec<&'a [T]>,
    #[new(default)]
    ids: HashMap<&'a [T], LineId>,
}

impl<'a, T: Element> LineTable<'a, T> {
    fn intern(&mut self, line: &'a [T]) -> LineId {
        if let Some(&id) = self.ids.get(line) {
            return id;
        }
        let id = self.lines.len();
        self.lines.push(line);
        self.ids.insert(line, id);
        id
    }

    /// Splits `text` after each `terminator`; a trailing unterminated line counts too
    fn tokenize(&mut self, text: &'a [T], terminator: &T) -> Vec<LineId> {
        text.split_inclusive(|element| element == terminator)
            .map(|line| self.intern(line))
            .collect()
    }

    fn expand(&self, ids: &[LineId]) -> Vec<T> {
        ids.iter()
            .flat_map(|&id| self.lines[id].iter().cloned())
            .collect()
    }

    fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Diffs `old` and `new` at line granularity, then refines mixed blocks
pub(crate) fn line_diff<T: Element>(old: &[T], new: &[T], terminator: &T) -> EditScript<T> {
    let mut table = LineTable::new();
    let old_ids = table.tokenize(old, terminator);
    let new_ids = table.tokenize(new, terminator);
    debug_log!(
        "line-mode: {} + {} lines, {} distinct",
        old_ids.len(),
        new_ids.len(),
        table.len()
    );

    let mut script: EditScript<T> = calculate(&old_ids, &new_ids, None)
        .into_iter()
        .map(|edit| Edit::new(edit.operation, table.expand(&edit.segment)))
        .collect();

    refine_changed_blocks(&mut script);
    script
}

/// Re-diffs, element by element, each run of edits holding both removals and insertions
fn refine_changed_blocks<T: Element>(script: &mut EditScript<T>) {
    // Trailing sentinel so the last block gets flushed too
    script.push(Edit::equal(Vec::new()));

    let mut inserted = Vec::new();
    let mut removed = Vec::new();
    let mut inserted_count = 0;
    let mut removed_count = 0;

    let mut i = 0;
    while i < script.len() {
        match script[i].operation {
            Operation::Insert => {
                inserted_count += 1;
                inserted.extend_from_slice(&script[i].segment);
            }
            Operation::Remove => {
                removed_count += 1;
                removed.extend_from_slice(&script[i].segment);
            }
            Operation::Equal => {
                if inserted_count > 0 && removed_count > 0 {
                    let start = i - inserted_count - removed_count;
                    let refined =
                        calculate(&mem::take(&mut removed), &mem::take(&mut inserted), None);
                    debug_log!(
                        "line-mode: refined {} edits into {}",
                        inserted_count + removed_count,
                        refined.len()
                    );
                    let refined_len = refined.len();
                    script.splice(start..i, refined);
                    i = start + refined_len;
                }
                inserted_count = 0;
                removed_count = 0;
                inserted.clear();
                removed.clear();
            }
        }
        i += 1;
    }

    if script.last().is_some_and(Edit::is_empty) {
        script.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::diff::operation::{source, target};
    use pretty_assertions::assert_eq;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_tokenize_shares_ids_across_inputs() {
        let old = chars("alpha\nbeta\nalpha\n");
        let new = chars("beta\nalpha\ngamma");
        let mut table = LineTable::new();

        let old_ids = table.tokenize(&old, &'\n');
        let new_ids = table.tokenize(&new, &'\n');

        assert_eq!(old_ids, vec![0, 1, 0]);
        assert_eq!(new_ids, vec![1, 0, 2]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.expand(&[2]), chars("gamma"));
        assert_eq!(table.expand(&old_ids), old);
    }

    #[test]
    fn test_tokenize_without_terminator() {
        let text = chars("no newline here");
        let mut table = LineTable::new();

        assert_eq!(table.tokenize(&text, &'\n'), vec![0]);
        assert_eq!(table.tokenize(&[], &'\n'), Vec::<LineId>::new());
    }

    #[test]
    fn test_line_diff_preserves_content() {
        let old = chars("one\ntwo\nthree\nfour\n");
        let new = chars("one\n2\nthree\nfour\nfive\n");

        let result = line_diff(&old, &new, &'\n');

        assert_eq!(source(&result), old);
        assert_eq!(target(&result), new);
    }

    #[test]
    fn test_line_diff_refines_changed_lines() {
        let old = chars("same\nthe cat sat\nsame\n");
        let new = chars("same\nthe bat sat\nsame\n");

        let result = line_diff(&old, &new, &'\n');

        // The changed line is re-diffed: only the differing letter is replaced
        assert!(result.contains(&Edit::remove(chars("c"))));
        assert!(result.contains(&Edit::insert(chars("b"))));
        assert_eq!(source(&result), old);
        assert_eq!(target(&result), new);
    }

    #[test]
    fn test_refine_leaves_pure_insertions() {
        let mut script = vec![
            Edit::equal(chars("a\n")),
            Edit::insert(chars("b\n")),
            Edit::equal(chars("c\n")),
        ];
        let expected = script.clone();

        refine_changed_blocks(&mut script);

        assert_eq!(script, expected);
    }

    #[test]
    fn test_refine_splices_in_place() {
        let mut script = vec![
            Edit::equal(chars("head\n")),
            Edit::remove(chars("abc\n")),
            Edit::insert(chars("abd\n")),
        ];

        refine_changed_blocks(&mut script);

        assert_eq!(
            script,
            vec![
                Edit::equal(chars("head\n")),
                Edit::equal(chars("ab")),
                Edit::remove(chars("c")),
                Edit::insert(chars("d")),
                Edit::equal(chars("\n")),
            ]
        );
    }
}
