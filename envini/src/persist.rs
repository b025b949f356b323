//! Persistence of rendered documents.
//!
//! In-place replacement follows the usual atomic-write pattern:
//! 1. Write the content to a temporary file in the target's directory
//! 2. Flush and sync the file to disk
//! 3. Rename it over the target
//! 4. Sync the directory so the rename itself is durable
//!
//! Readers of the target therefore see either the old or the new document,
//! never a partial one. The rename is only atomic when the temporary file
//! and the target live on the same filesystem, which is why the temporary
//! file is created next to the target. If the target is a symlink, the link
//! itself is replaced.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::document::IniDocument;
use crate::error::{Error, Result};

/// Prefix of the temporary file created next to the target.
pub const TEMP_PREFIX: &str = ".envini";

/// Writes a rendered document to a stream.
///
/// # Errors
///
/// Returns [`Error::Io`] if the stream rejects the write.
pub fn write_to<W: Write>(writer: &mut W, document: &IniDocument) -> Result<()> {
    write!(writer, "{document}")?;
    writer.flush()?;
    Ok(())
}

/// Atomically replaces `target` with `contents`.
///
/// When the target already exists its permissions are carried over to the
/// replacement. A newly created target keeps the temporary file's
/// owner-only permissions.
///
/// # Errors
///
/// Returns [`Error::Persist`] if the temporary file cannot be created,
/// written or synced, or if the final rename fails. The original target is
/// left untouched in every failure case.
pub fn write_atomic(target: &Path, contents: &str) -> Result<()> {
    let dir = parent_dir(target);

    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(&dir)
        .map_err(|e| persist_error(target, "failed to create temporary file", e))?;
    log::debug!("writing {} via {}", target.display(), temp.path().display());

    temp.write_all(contents.as_bytes())
        .map_err(|e| persist_error(target, "failed to write temporary file", e))?;
    temp.flush()
        .map_err(|e| persist_error(target, "failed to flush temporary file", e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| persist_error(target, "failed to sync temporary file", e))?;

    if let Ok(metadata) = fs::metadata(target) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .map_err(|e| persist_error(target, "failed to copy permissions", e))?;
    }

    // On failure the temporary file is handed back and removed when dropped.
    temp.persist(target)
        .map_err(|e| persist_error(target, "failed to replace target", e.error))?;

    // The target is already replaced; a failed directory sync only weakens
    // crash durability.
    if let Err(e) = sync_dir(&dir) {
        log::warn!("failed to sync directory {}: {e}", dir.display());
    }
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    fs::File::open(dir)?.sync_all()
}

// Directories cannot be opened as files here.
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

fn persist_error(target: &Path, what: &str, cause: impl std::fmt::Display) -> Error {
    Error::Persist {
        path: target.to_path_buf(),
        reason: format!("{what}: {cause}"),
    }
}

fn parent_dir(target: &Path) -> PathBuf {
    match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
