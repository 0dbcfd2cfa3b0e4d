//! Diff engine building blocks
//!
//! - `core`: shared utilities (debug logging, pager wrapper)
//! - `diff`: the shortest edit script engine and its cleanup passes

pub mod core;
pub mod diff;
