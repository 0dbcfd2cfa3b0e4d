//! Shortest edit script diffing for generic sequences
//!
//! See [`artifacts::diff`] for the engine and its entry points.

pub mod artifacts;
