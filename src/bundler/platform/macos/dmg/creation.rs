//! Disk image creation with `create-dmg`.
//!
//! `create-dmg` lays out the Finder window (icon positions, window
//! geometry, Applications drop link). It takes a source folder, so the
//! signed bundle is copied into a temporary staging directory first; the
//! freezer's `dist/` also holds the one-folder build, which must not end
//! up in the image.

use crate::bundler::{Result, Settings, error::Context, utils::fs, utils::process};
use std::ffi::OsString;
use std::path::Path;
use tokio::process::Command;

fn push_pair(args: &mut Vec<OsString>, (x, y): (u32, u32)) {
    args.push(x.to_string().into());
    args.push(y.to_string().into());
}

/// Builds the `create-dmg` argument vector.
pub fn create_dmg_args(settings: &Settings, dmg_path: &Path, staging: &Path) -> Vec<OsString> {
    let layout = settings.dmg();
    let app_name = format!("{}.app", settings.product_name());
    let mut args: Vec<OsString> = vec!["--volname".into(), settings.product_name().into()];

    args.push("--window-pos".into());
    push_pair(&mut args, layout.window_position);
    args.push("--window-size".into());
    push_pair(&mut args, layout.window_size);
    args.push("--icon-size".into());
    args.push(layout.icon_size.to_string().into());
    args.push("--icon".into());
    args.push(app_name.as_str().into());
    push_pair(&mut args, layout.app_icon_position);
    args.push("--hide-extension".into());
    args.push(app_name.as_str().into());
    args.push("--app-drop-link".into());
    push_pair(&mut args, layout.app_drop_link);

    args.push(dmg_path.into());
    args.push(staging.into());
    args
}

/// Creates the image with `create-dmg` from a staged copy of `app_bundle`.
pub async fn create_with_create_dmg(
    settings: &Settings,
    tool: &Path,
    app_bundle: &Path,
    dmg_path: &Path,
) -> Result<()> {
    let temp_dir = tempfile::tempdir().map_err(|e| {
        crate::bundler::Error::GenericError(format!(
            "Failed to create temporary directory for DMG contents: {}",
            e
        ))
    })?;
    let staging = temp_dir.path();

    let app_name = app_bundle
        .file_name()
        .ok_or_else(|| crate::bundler::Error::GenericError("Invalid app bundle path".into()))?;
    let staged_app = staging.join(app_name);

    log::debug!("Copying .app to staging: {}", staged_app.display());
    fs::copy_dir(app_bundle, &staged_app)
        .await
        .with_context(|| {
            format!(
                "copying .app bundle to staging directory: {}",
                staged_app.display()
            )
        })?;

    log::info!("Creating DMG with create-dmg...");
    let mut cmd = Command::new(tool);
    cmd.args(create_dmg_args(settings, dmg_path, staging))
        .current_dir(settings.workdir());
    process::run(&mut cmd).await?;

    drop(temp_dir);
    Ok(())
}
