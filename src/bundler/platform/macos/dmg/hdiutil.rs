//! Fallback disk image creation with the system `hdiutil`.

use crate::bundler::{Result, Settings, utils::fs, utils::process};
use std::ffi::OsString;
use std::path::Path;
use tokio::process::Command;

/// Builds the `hdiutil create` argument vector.
pub fn hdiutil_args(settings: &Settings, app_bundle: &Path, dmg_path: &Path) -> Vec<OsString> {
    vec![
        "create".into(),
        "-volname".into(),
        settings.product_name().into(),
        "-srcfolder".into(),
        app_bundle.into(),
        "-ov".into(),
        "-format".into(),
        "UDZO".into(),
        dmg_path.into(),
    ]
}

/// Removes any previous image, then creates a compressed UDZO image.
pub async fn create_with_hdiutil(
    settings: &Settings,
    app_bundle: &Path,
    dmg_path: &Path,
) -> Result<()> {
    fs::remove_file(dmg_path).await?;

    log::info!("Creating DMG with hdiutil...");
    let mut cmd = Command::new("hdiutil");
    cmd.args(hdiutil_args(settings, app_bundle, dmg_path))
        .current_dir(settings.workdir());
    process::run(&mut cmd).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::SettingsBuilder;

    #[test]
    fn compressed_image_of_the_bundle() {
        let settings = SettingsBuilder::new().workdir("/work").build().unwrap();
        let args: Vec<String> = hdiutil_args(
            &settings,
            &settings.app_bundle_path(),
            &settings.dmg_path(),
        )
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

        assert_eq!(
            args,
            vec![
                "create",
                "-volname",
                "MacWhisper",
                "-srcfolder",
                "/work/dist/MacWhisper.app",
                "-ov",
                "-format",
                "UDZO",
                "/work/MacWhisper_1.0.0.dmg",
            ]
        );
    }
}
