//! Semantic cleanup
//!
//! Makes a minimal edit script easier for humans to read. It runs once over a
//! complete script, after the orchestrator is done, in three stages:
//!
//! 1. equalities dwarfed by the changes on both sides become part of the change
//! 2. edits between two equalities slide to the best scoring boundary (word,
//!    sentence, line or blank line)
//! 3. overlapping content between a removal and the following insertion is
//!    factored out into an equality
//!
//! None of the stages changes the sequences the script reconstructs.

use crate::artifacts::core::debug_log;
use crate::artifacts::diff::cleanup::cleanup;
use crate::artifacts::diff::element::Element;
use crate::artifacts::diff::operation::{Edit, EditScript, Operation};
use crate::artifacts::diff::range::{common_overlap, common_suffix, ends_with, starts_with};

/// Semantic cleanup entry point
///
/// # Example
///
/// ```
/// use sesdiff::artifacts::diff::{clean, compute, source, target};
///
/// let old: Vec<char> = "The cat came.".chars().collect();
/// let new: Vec<char> = "The cat cat came.".chars().collect();
///
/// let script = clean(compute(&old, &new));
///
/// assert_eq!(source(&script), old);
/// assert_eq!(target(&script), new);
/// ```
pub fn clean<T: Element>(mut script: EditScript<T>) -> EditScript<T> {
    eliminate_small_equalities(&mut script);
    align_isolated_changes(&mut script);
    extract_change_overlaps(&mut script);
    script
}

/// Score of the boundary between `one` (before) and `two` (after)
///
/// Ranges from 6 (edge of the text) down to 0 (inside a word).
pub fn semantic_score<T: Element>(one: &[T], two: &[T]) -> u8 {
    let (Some(last), Some(first)) = (one.last(), two.first()) else {
        // Edges are the best.
        return 6;
    };

    let class1 = last.class();
    let class2 = first.class();
    let non_alphanumeric1 = !class1.is_alphanumeric();
    let non_alphanumeric2 = !class2.is_alphanumeric();
    let whitespace1 = class1.is_whitespace();
    let whitespace2 = class2.is_whitespace();
    let line_break1 = class1.is_line_break();
    let line_break2 = class2.is_line_break();

    let blank_line = T::line_terminator().map(|terminator| [terminator.clone(), terminator]);
    let blank_line1 = line_break1
        && blank_line
            .as_ref()
            .is_some_and(|blank| ends_with(one, blank));
    let blank_line2 = line_break2
        && blank_line
            .as_ref()
            .is_some_and(|blank| starts_with(two, blank));

    if blank_line1 || blank_line2 {
        // Five points for blank lines.
        5
    } else if line_break1 || line_break2 {
        // Four points for line breaks.
        4
    } else if non_alphanumeric1 && !whitespace1 && whitespace2 {
        // Three points for end of sentences.
        3
    } else if whitespace1 || whitespace2 {
        // Two points for whitespace.
        2
    } else if non_alphanumeric1 || non_alphanumeric2 {
        // One point for non-alphanumeric.
        1
    } else {
        0
    }
}

/// Turns equalities no longer than the changes around them into changes
///
/// A stack of equality positions tracks candidates. After an elimination both
/// the eliminated equality and the one before it are dropped from the stack
/// and the scan resumes right after the equality now on top; with an empty
/// stack it resumes after the first edit of the script.
fn eliminate_small_equalities<T: Element>(script: &mut EditScript<T>) {
    let mut equalities: Vec<usize> = Vec::new();
    let mut changed = false;

    // Sizes of the changes before and after the equality on top of the stack
    let mut pre_inserted = 0;
    let mut pre_removed = 0;
    let mut post_inserted = 0;
    let mut post_removed = 0;

    let mut i = 0;
    while i < script.len() {
        match script[i].operation {
            Operation::Equal => {
                equalities.push(i);
                pre_inserted = post_inserted;
                pre_removed = post_removed;
                post_inserted = 0;
                post_removed = 0;
            }
            operation => {
                if operation.is_insert() {
                    post_inserted += script[i].len();
                } else {
                    post_removed += script[i].len();
                }

                // Eliminate an equality that is smaller or equal to the edits
                // on both sides of it.
                if let Some(&last) = equalities.last() {
                    let size = script[last].len();
                    if size <= pre_inserted.max(pre_removed)
                        && size <= post_inserted.max(post_removed)
                    {
                        debug_log!("semantic: eliminating equality of {} at {}", size, last);
                        let segment = script[last].segment.clone();
                        script[last].operation = Operation::Remove;
                        script.insert(last + 1, Edit::insert(segment));
                        changed = true;

                        // Throw away the equality we just eliminated and the
                        // previous one, which needs to be re-evaluated.
                        equalities.pop();
                        equalities.pop();
                        i = equalities.last().copied().unwrap_or(0);

                        pre_inserted = 0;
                        pre_removed = 0;
                        post_inserted = 0;
                        post_removed = 0;
                    }
                }
            }
        }
        i += 1;
    }

    if changed {
        cleanup(script);
    }
}

/// Slides single edits between two equalities to the most readable boundary
///
/// e.g: `The c<ins>at c</ins>ame.` -> `The <ins>cat </ins>came.`
fn align_isolated_changes<T: Element>(script: &mut EditScript<T>) {
    let mut i = 1;
    while i + 1 < script.len() {
        if script[i - 1].operation.is_equal() && script[i + 1].operation.is_equal() {
            let mut equality1 = script[i - 1].segment.clone();
            let mut edit = script[i].segment.clone();
            let mut equality2 = script[i + 1].segment.clone();

            // First, shift the edit as far left as possible.
            let common = common_suffix(&equality1, &edit);
            if common > 0 {
                let common_part = edit.split_off(edit.len() - common);
                equality1.truncate(equality1.len() - common);
                edit = [common_part.as_slice(), &edit[..]].concat();
                equality2 = [common_part.as_slice(), &equality2[..]].concat();
            }

            // Second, step element by element right, looking for the best fit.
            let mut best_equality1 = equality1.clone();
            let mut best_edit = edit.clone();
            let mut best_equality2 = equality2.clone();
            let mut best_score =
                semantic_score(&equality1, &edit) + semantic_score(&edit, &equality2);
            while !edit.is_empty() && !equality2.is_empty() && edit[0] == equality2[0] {
                equality1.push(edit.remove(0));
                edit.push(equality2.remove(0));
                let score = semantic_score(&equality1, &edit) + semantic_score(&edit, &equality2);
                // The >= encourages trailing rather than leading whitespace on edits.
                if score >= best_score {
                    best_score = score;
                    best_equality1.clone_from(&equality1);
                    best_edit.clone_from(&edit);
                    best_equality2.clone_from(&equality2);
                }
            }

            if script[i - 1].segment != best_equality1 {
                // We have an improvement, save it back to the script.
                debug_log!("semantic: realigned edit at {} (score {})", i, best_score);
                if !best_equality1.is_empty() {
                    script[i - 1].segment = best_equality1;
                } else {
                    script.remove(i - 1);
                    i -= 1;
                }
                script[i].segment = best_edit;
                if !best_equality2.is_empty() {
                    script[i + 1].segment = best_equality2;
                } else {
                    script.remove(i + 1);
                    i = i.saturating_sub(1);
                }
            }
        }
        i += 1;
    }
}

/// Factors out content shared by the end of a removal and the start of the
/// following insertion (or the other way round)
///
/// e.g: `<del>abcxxx</del><ins>xxxdef</ins>` -> `<del>abc</del>xxx<ins>def</ins>`
/// e.g: `<del>xxxabc</del><ins>defxxx</ins>` -> `<ins>def</ins>xxx<del>abc</del>`
///
/// Only extracts an overlap if it is as big as half the edit ahead or behind it.
fn extract_change_overlaps<T: Element>(script: &mut EditScript<T>) {
    let mut i = 1;
    while i < script.len() {
        if script[i - 1].operation.is_remove() && script[i].operation.is_insert() {
            let removed = script[i - 1].segment.clone();
            let inserted = script[i].segment.clone();
            let overlap1 = common_overlap(&removed, &inserted);
            let overlap2 = common_overlap(&inserted, &removed);
            let reaches_half =
                |overlap: usize| 2 * overlap >= removed.len() || 2 * overlap >= inserted.len();

            if overlap1 >= overlap2 {
                if overlap1 > 0 && reaches_half(overlap1) {
                    script.insert(i, Edit::equal(inserted[..overlap1].to_vec()));
                    script[i - 1].segment = removed[..removed.len() - overlap1].to_vec();
                    script[i + 1].segment = inserted[overlap1..].to_vec();
                    i += 1;
                }
            } else if reaches_half(overlap2) {
                // Reverse overlap found: insert an equality, then swap and trim
                // the surrounding edits.
                script.insert(i, Edit::equal(removed[..overlap2].to_vec()));
                script[i - 1] = Edit::insert(inserted[..inserted.len() - overlap2].to_vec());
                script[i + 1] = Edit::remove(removed[overlap2..].to_vec());
                i += 1;
            }
            i += 1;
        }
        i += 1;
    }

    script.retain(|edit| !edit.is_empty());
}
