//! Core utilities and shared types
//!
//! This module contains shared utilities used across the crate:
//!
//! - `debug_log!`: feature-gated tracing of the diff internals
//! - `PagerWriter`: `std::io::Write` adapter over the minus pager, used by the binary

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// Macro for debug logging that is enabled with the `debug_diff` feature flag
///
/// Without the feature the arguments are type-checked but nothing is emitted, so
/// tracing calls can stay in the hot paths of the diff engine.
///
/// # Usage
/// ```rust,ignore
/// debug_log!("bisect: split at ({}, {})", x, y);
/// ```
///
/// Then build with: `cargo build --features debug_diff`
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_diff")]
        {
            eprintln!($($arg)*);
        }
        #[cfg(not(feature = "debug_diff"))]
        {
            let _ = || format!($($arg)*);
        }
    };
}

pub(crate) use debug_log;

/// Wrapper that implements `Write` for the minus pager
///
/// The minus pager doesn't implement `std::io::Write` directly, so this wrapper
/// adapts it to be compatible with Rust's standard I/O traits. The binary renders
/// an edit script into it when stdout is a terminal and `NO_PAGER` is not set.
///
/// ## Usage
///
/// ```ignore
/// let pager = Pager::new();
/// let mut writer = PagerWriter::new(pager.clone());
/// writeln!(writer, "+inserted")?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl PagerWriter {
    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
