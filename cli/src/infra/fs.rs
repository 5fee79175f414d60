//! Raw filesystem helpers shared by the file-backed stores.

use std::path::Path;

use anyhow::{Context, Result};

/// Write `content` to `path` via a sibling temp file and rename, so readers
/// see either the old file or the new one. The file is 0600 on unix.
///
/// # Errors
///
/// Returns an error if the parent directory, temp file, or rename fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);
    std::fs::write(&temp_path, content)
        .with_context(|| format!("writing temp file {}", temp_path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
    }

    std::fs::rename(&temp_path, path).with_context(|| format!("finalizing {}", path.display()))
}
