//! Validated file persistence
//!
//! Every destination check runs before the file is opened, so a rejected
//! destination never leaves a partial file behind.

use crate::error::{DestinationError, Result};
use crate::types::DataFormat;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write `content` to `path` as a `format` file
///
/// The file ends with exactly one newline unless `content` already ends
/// with one. Fails with [`DestinationError`] when the path names a
/// directory, carries the wrong extension, has no existing parent or the
/// parent is not writable.
pub fn save_data(content: &str, path: impl AsRef<Path>, format: DataFormat) -> Result<()> {
    let path = path.as_ref();
    let parent = validate_destination(path, format)?;

    let mut file = File::create(path).map_err(|e| permission_error(e, &parent))?;
    file.write_all(content.as_bytes())
        .map_err(|e| permission_error(e, &parent))?;
    if !content.ends_with('\n') {
        file.write_all(b"\n")?;
    }
    file.flush()?;

    debug!("Saved {} bytes of {} to {}", content.len(), format, path.display());
    Ok(())
}

/// Check `path` as a destination for `format`, returning its parent directory
pub fn validate_destination(path: &Path, format: DataFormat) -> Result<PathBuf> {
    if path.is_dir() || path.file_name().is_none() || ends_with_separator(path) {
        return Err(DestinationError::IsADirectory {
            path: path.to_path_buf(),
        }
        .into());
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    if !extension.eq_ignore_ascii_case(format.extension()) {
        return Err(DestinationError::InvalidExtension {
            expected: format,
            found: extension.to_string(),
        }
        .into());
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if !parent.is_dir() {
        return Err(DestinationError::MissingParent { path: parent }.into());
    }

    if fs::metadata(&parent)?.permissions().readonly() {
        return Err(DestinationError::PermissionDenied { dir: parent }.into());
    }

    Ok(parent)
}

fn ends_with_separator(path: &Path) -> bool {
    path.as_os_str()
        .to_str()
        .is_some_and(|s| s.ends_with(std::path::MAIN_SEPARATOR) || s.ends_with('/'))
}

fn permission_error(error: std::io::Error, parent: &Path) -> crate::Error {
    if error.kind() == ErrorKind::PermissionDenied {
        DestinationError::PermissionDenied {
            dir: parent.to_path_buf(),
        }
        .into()
    } else {
        error.into()
    }
}
