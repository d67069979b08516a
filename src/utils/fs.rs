//! File system utilities.

use crate::{Error, Result};
use std::path::Path;

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write `content` to `path`, refusing to replace an existing file unless `force` is set.
pub fn write_new_file(path: &Path, content: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::ConfigExists(path.display().to_string()));
    }
    ensure_parent_dir(path)?;
    std::fs::write(path, content)?;
    Ok(())
}
