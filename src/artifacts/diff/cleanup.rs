//! Structural cleanup
//!
//! Normalizes an edit script without changing what it reconstructs:
//!
//! - runs of inserts and removes between two equalities collapse into at most
//!   one remove followed by one insert
//! - content shared by such a remove/insert pair moves into the surrounding
//!   equalities
//! - adjacent equalities merge
//! - a single edit between two equalities slides sideways when that lets one
//!   of the equalities disappear
//!
//! Both passes repeat until the sliding pass no longer shrinks the script.

use crate::artifacts::core::debug_log;
use crate::artifacts::diff::element::Element;
use crate::artifacts::diff::operation::{Edit, EditScript, Operation};
use crate::artifacts::diff::range::{ends_with, partition, starts_with};
use std::mem;

pub(crate) fn cleanup<T: Element>(script: &mut EditScript<T>) {
    loop {
        merge_pass(script);
        if !shift_pass(script) {
            break;
        }
        debug_log!("cleanup: shifted edits, {} left, re-running", script.len());
    }
}

/// Merges like operations and factors common affixes out of change blocks
fn merge_pass<T: Element>(script: &mut EditScript<T>) {
    // Dummy equality at the end, so the last block gets flushed too
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
                let block = inserted_count + removed_count;
                if inserted_count > 0 && removed_count > 0 {
                    // Both kinds of change before this equality
                    script.drain(i - block..i);
                    i -= block;

                    let mut removed = mem::take(&mut removed);
                    let mut inserted = mem::take(&mut inserted);
                    let affixes = partition(&mut removed, &mut inserted);

                    if !affixes.prefix.is_empty() {
                        if i > 0 {
                            script[i - 1].segment.extend(affixes.prefix);
                        } else {
                            script.insert(0, Edit::equal(affixes.prefix));
                            i += 1;
                        }
                    }
                    if !affixes.suffix.is_empty() {
                        let mut segment = affixes.suffix;
                        segment.append(&mut script[i].segment);
                        script[i].segment = segment;
                    }

                    let collapsed = removed.is_empty() && inserted.is_empty();
                    if !removed.is_empty() {
                        script.insert(i, Edit::remove(removed));
                        i += 1;
                    }
                    if !inserted.is_empty() {
                        script.insert(i, Edit::insert(inserted));
                        i += 1;
                    }
                    if collapsed && i > 0 && script[i - 1].operation.is_equal() {
                        // The whole block was shared content
                        merge_into_previous(script, i);
                        i -= 1;
                    }
                } else if inserted_count > 1 {
                    // Multiple consecutive inserts before equality, merge them together
                    script.drain(i - inserted_count..i);
                    i -= inserted_count;
                    script.insert(i, Edit::insert(mem::take(&mut inserted)));
                    i += 1;
                } else if removed_count > 1 {
                    // Multiple consecutive removes before equality, merge them together
                    script.drain(i - removed_count..i);
                    i -= removed_count;
                    script.insert(i, Edit::remove(mem::take(&mut removed)));
                    i += 1;
                } else if block == 0 && i > 0 && script[i - 1].operation.is_equal() {
                    merge_into_previous(script, i);
                    i -= 1;
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

/// Folds the equality before `i` into the one at `i`
fn merge_into_previous<T>(script: &mut EditScript<T>, i: usize) {
    let mut previous = script.remove(i - 1);
    previous.segment.append(&mut script[i - 1].segment);
    script[i - 1].segment = previous.segment;
}

/// Slides single edits surrounded by equalities to eliminate one of them
///
/// e.g: `A<ins>BA</ins>C -> <ins>AB</ins>AC`
/// e.g: `AX<ins>BAX</ins>C -> <ins>AXB</ins>AXC`
/// e.g: `GH<del>KOP</del>KO -> GHKO<del>PKO</del>`
///
/// Returns whether the script shrank.
fn shift_pass<T: Element>(script: &mut EditScript<T>) -> bool {
    let size = script.len();
    if size < 3 {
        return false;
    }

    let mut i = 1;
    while i + 1 < script.len() {
        if script[i - 1].operation.is_equal() && script[i + 1].operation.is_equal() {
            if ends_with(&script[i].segment, &script[i - 1].segment) {
                // Shift the edit over the previous equality.
                let previous = script.remove(i - 1).segment;
                let edit = &mut script[i - 1].segment;
                let kept = edit.len() - previous.len();
                let mut shifted = previous.clone();
                shifted.extend_from_slice(&edit[..kept]);
                *edit = shifted;

                let mut next = previous;
                next.append(&mut script[i].segment);
                script[i].segment = next;
                // The former next equality now sits at `i`
                continue;
            } else if starts_with(&script[i].segment, &script[i + 1].segment) {
                // Shift the edit over the next equality.
                let next = script.remove(i + 1).segment;
                script[i - 1].segment.extend_from_slice(&next);
                let edit = &mut script[i].segment;
                edit.drain(..next.len());
                edit.extend(next);
            }
        }
        i += 1;
    }

    script.len() != size
}
