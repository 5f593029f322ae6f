//! Filesystem helpers for replacing output files safely
//!
//! - `atomic_rename`: replace a file in one step (Windows requires explicit delete)
//! - `write_json_atomic`: pretty-print JSON to a sibling temp file, then rename over the target

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Cross-platform atomic rename that handles Windows file replacement.
///
/// On Unix, `fs::rename` atomically replaces the target if it exists.
/// On Windows, `fs::rename` fails if the target exists, so the target is
/// deleted first.
pub fn atomic_rename(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if dst.exists() {
            fs::remove_file(dst)?;
        }
    }
    fs::rename(src, dst)
}

/// Write `value` as pretty JSON (2-space indent, UTF-8 kept as-is).
///
/// Returns the number of bytes written.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, &content)?;
    atomic_rename(&temp_path, path)?;

    Ok(content.len())
}
