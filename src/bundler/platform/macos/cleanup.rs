//! Bundle post-processing before signing.
//!
//! Compiled-object leftovers are deleted and extended attributes (quarantine
//! flags, Finder info) are cleared. `codesign` refuses to seal a bundle
//! whose files carry resource forks or Finder info.

use crate::bundler::{Result, Settings, error::ErrorExt, utils::process};
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Deletes every file under `bundle` whose extension is in `extensions`.
///
/// Returns the removed paths.
pub async fn remove_junk(bundle: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let root = glob::Pattern::escape(&bundle.to_string_lossy());
    let mut removed = Vec::new();

    for ext in extensions {
        let pattern = format!("{root}/**/*.{ext}");
        for entry in glob::glob(&pattern)? {
            let path = entry?;
            if !path.is_file() {
                continue;
            }
            tokio::fs::remove_file(&path)
                .await
                .fs_context("removing junk file", &path)?;
            log::debug!("Removed {}", path.display());
            removed.push(path);
        }
    }

    Ok(removed)
}

/// Recursively clears extended attributes with `xattr -cr`.
pub async fn clear_extended_attributes(bundle: &Path) -> Result<()> {
    let mut cmd = Command::new("xattr");
    cmd.arg("-cr").arg(bundle);
    process::run(&mut cmd).await?;
    Ok(())
}

/// Runs both cleanup steps on the frozen bundle.
pub async fn clean_bundle(settings: &Settings, bundle: &Path) -> Result<()> {
    let removed = remove_junk(bundle, &settings.macos().junk_extensions).await?;
    log::info!("✓ Removed {} compiled-object leftovers", removed.len());

    clear_extended_attributes(bundle).await?;
    log::info!("✓ Cleared extended attributes on {}", bundle.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn removes_only_listed_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("Mac[Whisper].app");
        let res = app.join("Contents/Resources/lib");
        std::fs::create_dir_all(&res).unwrap();
        std::fs::write(res.join("module.pyc"), b"").unwrap();
        std::fs::write(res.join("object.o"), b"").unwrap();
        std::fs::write(res.join("keep.py"), b"").unwrap();
        std::fs::write(res.join("libkeep.dylib"), b"").unwrap();

        let mut removed = remove_junk(&app, &["pyc".into(), "o".into()]).await.unwrap();
        removed.sort();

        assert_eq!(removed, vec![res.join("module.pyc"), res.join("object.o")]);
        assert!(res.join("keep.py").exists());
        assert!(res.join("libkeep.dylib").exists());
    }

    #[tokio::test]
    async fn directories_with_junk_extension_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let app = dir.path().join("App.app");
        std::fs::create_dir_all(app.join("Contents/odd.o")).unwrap();

        let removed = remove_junk(&app, &["o".into()]).await.unwrap();
        assert!(removed.is_empty());
        assert!(app.join("Contents/odd.o").is_dir());
    }
}
