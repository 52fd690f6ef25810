//! macOS DMG disk image creator.
//!
//! Two ways to build the image:
//! - `creation` - `create-dmg` with a laid-out Finder window, when installed
//! - `hdiutil` - the system tool with minimal options otherwise

mod creation;
mod hdiutil;

use crate::bundler::{Result, Settings, builder::CREATE_DMG};
use std::path::{Path, PathBuf};

pub use creation::{create_dmg_args, create_with_create_dmg};
pub use hdiutil::{create_with_hdiutil, hdiutil_args};

/// Tool chosen for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DmgTool {
    /// `create-dmg` at the given path.
    CreateDmg(PathBuf),
    /// `hdiutil create`.
    Hdiutil,
}

/// Picks `create-dmg` when allowed by settings and available on `PATH`.
pub fn select_tool(settings: &Settings) -> DmgTool {
    if !settings.dmg().use_create_dmg {
        log::debug!("create-dmg disabled in settings");
        return DmgTool::Hdiutil;
    }

    match CREATE_DMG.as_ref() {
        Some(path) => DmgTool::CreateDmg(path.clone()),
        None => DmgTool::Hdiutil,
    }
}

/// Packages the signed bundle as `<App>_<Version>.dmg` in the working directory.
pub async fn bundle_project(settings: &Settings, app_bundle: &Path) -> Result<PathBuf> {
    let dmg_path = settings.dmg_path();

    match select_tool(settings) {
        DmgTool::CreateDmg(tool) => {
            create_with_create_dmg(settings, &tool, app_bundle, &dmg_path).await?
        }
        DmgTool::Hdiutil => create_with_hdiutil(settings, app_bundle, &dmg_path).await?,
    }

    if !dmg_path.is_file() {
        crate::bail!("disk image was not created at {}", dmg_path.display());
    }

    log::info!("✓ Created DMG: {}", dmg_path.display());
    Ok(dmg_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{DmgSettings, SettingsBuilder};

    #[test]
    fn disabled_create_dmg_always_uses_hdiutil() {
        let settings = SettingsBuilder::new()
            .workdir("/work")
            .dmg_settings(DmgSettings {
                use_create_dmg: false,
                ..Default::default()
            })
            .build()
            .unwrap();
        assert_eq!(select_tool(&settings), DmgTool::Hdiutil);
    }
}
