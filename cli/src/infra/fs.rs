//! Filesystem infrastructure: state home and atomic file writes.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Environment variable overriding the state directory.
pub const HOME_ENV: &str = "SCTL_HOME";

/// Directory holding sctl's own state (`~/.sctl` unless `SCTL_HOME` is set).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn sctl_home() -> Result<PathBuf> {
    if let Ok(val) = std::env::var(HOME_ENV) {
        return Ok(PathBuf::from(val));
    }
    dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))
        .map(|h| h.join(".sctl"))
}

/// Write `content` to `path` via a temp file in the same directory, then rename.
///
/// Parent directories are created as needed. On unix the file ends up with mode 600.
///
/// # Errors
///
/// Returns an error if any step of the write fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .with_context(|| format!("creating directory {}", parent.display()))?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("creating temp file in {}", parent.display()))?;
    temp.write_all(content.as_bytes())
        .with_context(|| format!("writing temp file for {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(temp.path(), std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("setting permissions on {}", temp.path().display()))?;
    }

    temp.persist(path)
        .with_context(|| format!("finalizing {}", path.display()))?;
    Ok(())
}
