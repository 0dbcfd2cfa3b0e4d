//! Myers' O(ND) shortest edit script search in linear space
//!
//! The edit graph has the elements of the old range along the x axis and the
//! elements of the new range along the y axis. Diagonal moves are matches, a
//! step right is a removal and a step down is an insertion. Diagonal `k` is the
//! set of points with `x - y = k`.
//!
//! Instead of recording the whole trace and backtracking (which needs O(N·D)
//! memory), the search runs forward from the top-left corner and backward from
//! the bottom-right corner at the same time, one edit step per round. As soon
//! as the two frontiers meet on some diagonal, that point lies on a shortest
//! path: the problem is split there and both halves are diffed independently.

use crate::artifacts::core::debug_log;
use crate::artifacts::diff::calculation::calculate;
use crate::artifacts::diff::element::Element;
use crate::artifacts::diff::operation::{Edit, EditScript};

/// Finds the middle snake of `old`/`new` and diffs the two halves around it
///
/// Callers strip the common prefix and suffix first; the result is a valid but
/// not yet normalized edit script. If the frontiers never meet the whole range
/// is reported as one removal followed by one insertion.
pub(crate) fn bisect<T: Element>(old: &[T], new: &[T]) -> EditScript<T> {
    if old.is_empty() || new.is_empty() {
        return replace(old, new);
    }

    let old_len = old.len() as isize;
    let new_len = new.len() as isize;
    let max_d = (old_len + new_len + 1) / 2;
    let v_offset = max_d;
    let v_len = 2 * max_d + 1;

    // Furthest x reached on each diagonal, forward (v1) and reverse (v2).
    // Both buffers are dropped on every return path below.
    let mut v1 = vec![-1_isize; v_len as usize];
    let mut v2 = vec![-1_isize; v_len as usize];
    v1[(v_offset + 1) as usize] = 0;
    v2[(v_offset + 1) as usize] = 0;

    let delta = old_len - new_len;
    // If the total number of elements is odd, the front path collides with the
    // reverse path; otherwise the reverse path collides with the front path.
    let front = delta % 2 != 0;

    // Trim the k loops once a path runs off the grid.
    let mut k1_start = 0_isize;
    let mut k1_end = 0_isize;
    let mut k2_start = 0_isize;
    let mut k2_end = 0_isize;

    for d in 0..max_d {
        // Walk the front path one step.
        let mut k1 = -d + k1_start;
        while k1 <= d - k1_end {
            let k1_offset = (v_offset + k1) as usize;
            let mut x1 = if k1 == -d || (k1 != d && v1[k1_offset - 1] < v1[k1_offset + 1]) {
                v1[k1_offset + 1]
            } else {
                v1[k1_offset - 1] + 1
            };
            let mut y1 = x1 - k1;
            while x1 < old_len && y1 < new_len && old[x1 as usize] == new[y1 as usize] {
                // snake
                x1 += 1;
                y1 += 1;
            }
            v1[k1_offset] = x1;

            if x1 > old_len {
                // Ran off the right of the graph.
                k1_end += 2;
            } else if y1 > new_len {
                // Ran off the bottom of the graph.
                k1_start += 2;
            } else if front {
                let k2_offset = v_offset + delta - k1;
                if k2_offset >= 0 && k2_offset < v_len && v2[k2_offset as usize] != -1 {
                    // Mirror x2 onto the top-left coordinate system.
                    let x2 = old_len - v2[k2_offset as usize];
                    if x1 >= x2 {
                        debug_log!("bisect: front overlap at ({}, {}), d={}", x1, y1, d);
                        return split(old, new, x1 as usize, y1 as usize);
                    }
                }
            }
            k1 += 2;
        }

        // Walk the reverse path one step.
        let mut k2 = -d + k2_start;
        while k2 <= d - k2_end {
            let k2_offset = (v_offset + k2) as usize;
            let mut x2 = if k2 == -d || (k2 != d && v2[k2_offset - 1] < v2[k2_offset + 1]) {
                v2[k2_offset + 1]
            } else {
                v2[k2_offset - 1] + 1
            };
            let mut y2 = x2 - k2;
            while x2 < old_len
                && y2 < new_len
                && old[(old_len - x2 - 1) as usize] == new[(new_len - y2 - 1) as usize]
            {
                x2 += 1;
                y2 += 1;
            }
            v2[k2_offset] = x2;

            if x2 > old_len {
                // Ran off the left of the graph.
                k2_end += 2;
            } else if y2 > new_len {
                // Ran off the top of the graph.
                k2_start += 2;
            } else if !front {
                let k1_offset = v_offset + delta - k2;
                if k1_offset >= 0 && k1_offset < v_len && v1[k1_offset as usize] != -1 {
                    let x1 = v1[k1_offset as usize];
                    let y1 = v_offset + x1 - k1_offset;
                    // Mirror x2 onto the top-left coordinate system.
                    if x1 >= old_len - x2 {
                        debug_log!("bisect: reverse overlap at ({}, {}), d={}", x1, y1, d);
                        return split(old, new, x1 as usize, y1 as usize);
                    }
                }
            }
            k2 += 2;
        }
    }

    // No commonality at all (or the search gave up): the number of diffs
    // equals the number of elements.
    debug_log!("bisect: no split point for {}x{}", old_len, new_len);
    replace(old, new)
}

/// Diffs both sides of the split point `(x, y)` with line-mode disabled
fn split<T: Element>(old: &[T], new: &[T], x: usize, y: usize) -> EditScript<T> {
    let (old_head, old_tail) = old.split_at(x);
    let (new_head, new_tail) = new.split_at(y);

    let mut script = calculate(old_head, new_head, None);
    script.extend(calculate(old_tail, new_tail, None));
    script
}

fn replace<T: Clone>(old: &[T], new: &[T]) -> EditScript<T> {
    let mut script = Vec::with_capacity(2);
    if !old.is_empty() {
        script.push(Edit::remove(old.to_vec()));
    }
    if !new.is_empty() {
        script.push(Edit::insert(new.to_vec()));
    }
    script
}
