use std::fs::{rename, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use lexer::is_whitespace;

use crate::error::{Result, StoreError};
use crate::format::{format_line, line_key, validate_key, validate_value};
use crate::reader::read_file;

/// Merges one `key value` pair into the file at `path` and rewrites it in
/// canonical order.
///
/// The file is re-read from disk; an open [`Store`](crate::Store) for the same
/// path is neither consulted nor updated. A missing file is treated as empty
/// and created.
///
/// # Steps
///
/// 1. Read the existing lines. Blank lines are dropped; every other line is
///    kept byte-for-byte (minus a trailing `\r`) unless its key equals `key`.
/// 2. Replace the first line for `key` with the freshly formatted line (later
///    lines for `key` are dropped), or append it if there was none.
/// 3. Stable-sort the lines by key and write them back, one per line, each
///    ending in `\n`. Lines with the same key keep their relative order, so
///    the occurrence a load would pick does not change.
///
/// `value_text` is written bare if it reads back as the same number (see
/// [`is_numeric_text`](crate::is_numeric_text)); otherwise it is quoted and
/// escaped.
///
/// # Errors
///
/// [`StoreError::InvalidKey`] / [`StoreError::InvalidValue`] for a pair that
/// could not be read back, and any I/O error from reading or writing the file.
pub fn save<P: AsRef<Path>>(key: &str, value_text: &str, path: P) -> Result<()> {
    validate_key(key)?;
    validate_value(key, value_text)?;
    let path = path.as_ref();

    let existing = match read_file(path) {
        Ok(buf) => buf,
        Err(StoreError::FileNotFound(_)) => Vec::new(),
        Err(e) => return Err(e),
    };

    let lines = merge_line(&existing, key, format_line(key, value_text));
    write_lines(path, &lines)
}

/// Applies steps 1-3 of [`save`] to `existing` and returns the sorted lines.
pub fn merge_line(existing: &[u8], key: &str, new_line: String) -> Vec<Vec<u8>> {
    let mut lines: Vec<Vec<u8>> = Vec::new();
    let mut pending = Some(new_line.into_bytes());

    for line in existing.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.iter().all(|&b| is_whitespace(b)) {
            continue;
        }
        if line_key(line) == Some(key.as_bytes()) {
            if let Some(l) = pending.take() {
                lines.push(l);
            }
            continue;
        }
        lines.push(line.to_vec());
    }
    if let Some(l) = pending {
        lines.push(l);
    }

    // stable: lines sharing a key keep their source order
    lines.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));
    lines
}

fn sort_key(line: &[u8]) -> &[u8] {
    line_key(line).unwrap_or(line)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Replaces the file at `path` with `lines`, each followed by `\n`.
///
/// Data goes to `<path>.tmp` first, is synced, and is then renamed over
/// `path`, so a crash mid-write leaves the previous file intact.
pub(crate) fn write_lines<L: AsRef<[u8]>>(path: &Path, lines: &[L]) -> Result<()> {
    // Create temporary file next to target for atomic rename later
    let tmp = tmp_path(path);
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&tmp)?;

    // Assemble the whole file
    let mut out = Vec::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for line in lines {
        out.extend_from_slice(line.as_ref());
        out.push(b'\n');
    }
    file.write_all(&out)?;

    // Flush and sync
    file.flush()?;
    file.sync_all()?;

    // Atomically move into place
    rename(&tmp, path)?;
    log::info!("wrote {} ({} lines)", path.display(), lines.len());
    Ok(())
}
