//! External tool detection and availability checking.

use std::path::PathBuf;
use std::sync::LazyLock;

/// Location of `create-dmg`, if it is installed and runnable.
///
/// Cached so the lookup happens once per run.
pub static CREATE_DMG: LazyLock<Option<PathBuf>> = LazyLock::new(|| match which::which("create-dmg") {
    Ok(path) => {
        log::debug!("Found create-dmg at: {}", path.display());

        match std::process::Command::new(&path).arg("--version").output() {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                log::info!("✓ create-dmg available: {}", version.trim());
                Some(path)
            }
            Ok(output) => {
                log::warn!(
                    "create-dmg found at {} but --version check failed (exit code: {:?}). \
                         Falling back to hdiutil. \
                         Stderr: {}",
                    path.display(),
                    output.status.code(),
                    String::from_utf8_lossy(&output.stderr)
                );
                None
            }
            Err(e) => {
                log::warn!(
                    "create-dmg found at {} but failed to execute: {}. \
                         Falling back to hdiutil. \
                         Check file permissions.",
                    path.display(),
                    e
                );
                None
            }
        }
    }
    Err(e) => {
        log::debug!("create-dmg not found in PATH: {}. Using hdiutil.", e);
        None
    }
});
