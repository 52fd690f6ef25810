//! Workspace reset.
//!
//! Every run starts from a clean slate: freezer outputs and the two
//! generated files from a previous run are removed. Paths that do not exist
//! are skipped, so resetting twice is the same as resetting once.

use crate::bundler::{Result, Settings, utils::fs};

/// Removes `build/`, `dist/`, the freezer spec file, the runtime hook and
/// the entitlements manifest.
///
/// A previously produced disk image is left alone; the packaging stage
/// decides whether to replace it.
pub async fn reset(settings: &Settings) -> Result<()> {
    for dir in [settings.build_dir(), settings.dist_dir()] {
        log::debug!("Removing {}", dir.display());
        fs::remove_dir_all(&dir).await?;
    }

    for file in [
        settings.spec_file(),
        settings.runtime_hook_path(),
        settings.entitlements_path(),
    ] {
        log::debug!("Removing {}", file.display());
        fs::remove_file(&file).await?;
    }

    log::info!("✓ Workspace reset: {}", settings.workdir().display());
    Ok(())
}
