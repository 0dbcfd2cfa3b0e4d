//! Diff orchestrator
//!
//! `calculate` is the recursive driver behind every entry point. Each call
//! peels off the cheap cases first and only then pays for a real diff:
//!
//! 1. empty or identical ranges
//! 2. common prefix and suffix, re-attached as equalities afterwards
//! 3. the shorter core found verbatim inside the longer one
//! 4. a single-element core that could not be matched
//! 5. line-mode for large text, bisection otherwise
//!
//! The local result is normalized with the structural cleanup before it is
//! returned to the caller (which may be another `calculate` further up).

use crate::artifacts::core::debug_log;
use crate::artifacts::diff::bisect::bisect;
use crate::artifacts::diff::cleanup::cleanup;
use crate::artifacts::diff::element::Element;
use crate::artifacts::diff::line_mode::line_diff;
use crate::artifacts::diff::operation::{Edit, EditScript, Operation};
use crate::artifacts::diff::range::{common_prefix, common_suffix, equal, find};
use crate::artifacts::diff::semantic::clean;
use derive_new::new;

/// Tuning knobs for a diff run
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct DiffOptions {
    /// Diff large text line by line first, then refine changed blocks
    pub line_mode: bool,
    /// Overrides [`Element::line_mode_min_size`] when set
    pub line_mode_min_size: Option<usize>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            line_mode: true,
            line_mode_min_size: None,
        }
    }
}

impl DiffOptions {
    pub fn with_line_mode(mut self, line_mode: bool) -> Self {
        self.line_mode = line_mode;
        self
    }

    pub fn with_line_mode_min_size(mut self, min_size: usize) -> Self {
        self.line_mode_min_size = Some(min_size);
        self
    }

    /// Threshold handed to the orchestrator, `None` when line-mode is off
    /// or the element type has no line terminator.
    fn line_threshold<T: Element>(&self) -> Option<usize> {
        if !self.line_mode || T::line_terminator().is_none() {
            return None;
        }
        Some(self.line_mode_min_size.unwrap_or_else(T::line_mode_min_size))
    }
}

/// Shortest edit script between two sequences
///
/// # Example
///
/// ```
/// use sesdiff::artifacts::diff::{Edit, MyersDiff};
///
/// let old: Vec<char> = "ab".chars().collect();
/// let new: Vec<char> = "aXb".chars().collect();
///
/// assert_eq!(
///     MyersDiff::new(&old, &new).diff(),
///     vec![
///         Edit::equal(vec!['a']),
///         Edit::insert(vec!['X']),
///         Edit::equal(vec!['b']),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
    #[new(default)]
    options: DiffOptions,
}

impl<'d, T: Element> MyersDiff<'d, T> {
    pub fn with_options(mut self, options: DiffOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Minimal, structurally normalized edit script
    pub fn diff(&self) -> EditScript<T> {
        calculate(self.a, self.b, self.options.line_threshold::<T>())
    }

    /// Edit script with boundaries moved to human-friendly positions
    pub fn diff_semantic(&self) -> EditScript<T> {
        clean(self.diff())
    }
}

/// Diffs `a` against `b` with default options
pub fn compute<T: Element>(a: &[T], b: &[T]) -> EditScript<T> {
    MyersDiff::new(a, b).diff()
}

/// Recursive orchestrator
///
/// `line_threshold` is `None` for every internal call (bisection halves,
/// line-token diffs, refinement of changed line blocks) so tokenization never
/// recurses into itself.
pub(crate) fn calculate<T: Element>(
    old: &[T],
    new: &[T],
    line_threshold: Option<usize>,
) -> EditScript<T> {
    if old.is_empty() || new.is_empty() {
        return check_empty(old, new).unwrap_or_default();
    }

    if equal(old, new) {
        return vec![Edit::equal(old.to_vec())];
    }

    let prefix_len = common_prefix(old, new);
    let (old_core, new_core) = (&old[prefix_len..], &new[prefix_len..]);
    let suffix_len = common_suffix(old_core, new_core);
    let old_core = &old_core[..old_core.len() - suffix_len];
    let new_core = &new_core[..new_core.len() - suffix_len];

    let mut script = Vec::new();
    if prefix_len > 0 {
        script.push(Edit::equal(old[..prefix_len].to_vec()));
    }

    match check_empty(old_core, new_core).or_else(|| check_subrange(old_core, new_core)) {
        Some(shortcut) => script.extend(shortcut),
        None => script.extend(compute_core(old_core, new_core, line_threshold)),
    }

    if suffix_len > 0 {
        script.push(Edit::equal(old[old.len() - suffix_len..].to_vec()));
    }

    cleanup(&mut script);
    script
}

/// Real diff of two cores that share no prefix, suffix or containment
fn compute_core<T: Element>(
    old: &[T],
    new: &[T],
    line_threshold: Option<usize>,
) -> EditScript<T> {
    if let (Some(min_size), Some(terminator)) = (line_threshold, T::line_terminator()) {
        if old.len() > min_size && new.len() > min_size {
            debug_log!("calculate: line-mode for {}x{}", old.len(), new.len());
            return line_diff(old, new, &terminator);
        }
    }

    debug_log!("calculate: bisect {}x{}", old.len(), new.len());
    bisect(old, new)
}

/// One side is empty: the other side is a single insert or remove
fn check_empty<T: Clone>(old: &[T], new: &[T]) -> Option<EditScript<T>> {
    if old.is_empty() {
        return Some(if new.is_empty() {
            Vec::new()
        } else {
            vec![Edit::insert(new.to_vec())]
        });
    }
    if new.is_empty() {
        return Some(vec![Edit::remove(old.to_vec())]);
    }
    None
}

/// The shorter range occurs inside the longer one, or is a lone element
fn check_subrange<T: Element>(old: &[T], new: &[T]) -> Option<EditScript<T>> {
    let old_longer = old.len() > new.len();
    let (short, long) = if old_longer { (new, old) } else { (old, new) };

    if let Some(position) = find(long, short) {
        debug_log!("calculate: {} elements contained at {}", short.len(), position);
        let operation = if old_longer {
            Operation::Remove
        } else {
            Operation::Insert
        };

        let mut script = Vec::with_capacity(3);
        if position > 0 {
            script.push(Edit::new(operation, long[..position].to_vec()));
        }
        script.push(Edit::equal(short.to_vec()));
        if position + short.len() < long.len() {
            script.push(Edit::new(operation, long[position + short.len()..].to_vec()));
        }
        return Some(script);
    }

    if short.len() == 1 {
        // After the containment check the element can't be an equality.
        return Some(vec![Edit::remove(old.to_vec()), Edit::insert(new.to_vec())]);
    }

    None
}
