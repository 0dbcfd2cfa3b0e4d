//! Shortest edit script diffing
//!
//! The engine is split into one file per stage:
//!
//! - `element`: what can be diffed, line terminators and character classes
//! - `operation`: `Operation`, `Edit` and `EditScript`
//! - `range`: prefix/suffix/overlap primitives on slices
//! - `bisect`: Myers' middle snake search in linear space
//! - `calculation`: the recursive orchestrator and its entry points
//! - `line_mode`: line-level pre-pass for large text
//! - `cleanup`: structural normalization of edit scripts
//! - `semantic`: human-oriented boundary adjustment
//!
//! Every entry point is total: any pair of finite sequences yields an edit
//! script that rebuilds both of them.

mod bisect;
pub mod calculation;
mod cleanup;
pub mod element;
mod line_mode;
pub mod operation;
pub mod range;
pub mod semantic;

pub use calculation::{DiffOptions, MyersDiff, compute};
pub use element::{DEFAULT_LINE_MODE_MIN_SIZE, Element, ElementClass};
pub use operation::{Edit, EditScript, Operation, source, target};
pub use semantic::clean;
