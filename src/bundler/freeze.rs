//! Freezer invocation.
//!
//! One PyInstaller run turns the entry point, the interpreter and the Qt
//! assets into `dist/<App>.app`. The Qt plugins and translations are
//! embedded under `<subfolder>/plugins` and `<subfolder>/translations`,
//! which is exactly where the runtime hook points Qt at startup.

use crate::bundler::{Error, Result, Settings, toolkit::QtToolkit, utils::process};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Separator between source and destination in `--add-data`/`--add-binary`.
const EMBED_SEPARATOR: &str = ":";

fn embed_spec(source: &Path, dest: &str) -> OsString {
    let mut spec = source.as_os_str().to_os_string();
    spec.push(EMBED_SEPARATOR);
    spec.push(dest);
    spec
}

/// Builds the freezer argument vector.
///
/// `hook` and `entitlements` are the files written by the generate stage.
pub fn freeze_args(
    settings: &Settings,
    qt: &QtToolkit,
    hook: &Path,
    entitlements: &Path,
) -> Vec<OsString> {
    let subfolder = qt.subfolder().as_str();
    let mut args: Vec<OsString> = vec![
        "--noconfirm".into(),
        "--clean".into(),
        "--windowed".into(),
        "--name".into(),
        settings.product_name().into(),
        "--osx-bundle-identifier".into(),
        settings.identifier().into(),
        "--distpath".into(),
        settings.dist_dir().into(),
        "--workpath".into(),
        settings.build_dir().into(),
        "--specpath".into(),
        settings.workdir().into(),
        "--add-data".into(),
        embed_spec(&qt.translations_dir(), &format!("{subfolder}/translations")),
        "--add-binary".into(),
        embed_spec(&qt.plugins_dir(), &format!("{subfolder}/plugins")),
    ];

    for module in &settings.freeze().hidden_imports {
        args.push("--hidden-import".into());
        args.push(module.into());
    }

    args.push("--runtime-hook".into());
    args.push(hook.into());
    args.push("--osx-entitlements-file".into());
    args.push(entitlements.into());
    args.push(settings.entry_point().into());
    args
}

/// Runs the freezer and returns the produced `.app` path.
pub async fn freeze(
    settings: &Settings,
    qt: &QtToolkit,
    hook: &Path,
    entitlements: &Path,
) -> Result<PathBuf> {
    let entry_point = settings.entry_point();
    if !entry_point.is_file() {
        return Err(Error::MissingEntryPoint(entry_point));
    }

    log::info!(
        "Freezing {} with {}",
        entry_point.display(),
        settings.toolkit().pyinstaller
    );

    let mut cmd = Command::new(&settings.toolkit().pyinstaller);
    cmd.args(freeze_args(settings, qt, hook, entitlements))
        .current_dir(settings.workdir());
    process::run(&mut cmd).await?;

    let app = settings.app_bundle_path();
    if !app.is_dir() {
        crate::bail!(
            "{} finished but {} was not created",
            settings.toolkit().pyinstaller,
            app.display()
        );
    }

    log::info!("✓ Frozen app bundle: {}", app.display());
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{FreezeSettings, SettingsBuilder};

    fn args_as_strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    fn value_after(args: &[String], flag: &str) -> Vec<String> {
        args.windows(2)
            .filter(|w| w[0] == flag)
            .map(|w| w[1].clone())
            .collect()
    }

    #[test]
    fn embeds_assets_under_detected_subfolder() {
        let site = tempfile::tempdir().unwrap();
        std::fs::create_dir(site.path().join("Qt")).unwrap();
        let qt = QtToolkit::detect(site.path()).unwrap();

        let settings = SettingsBuilder::new().workdir("/work").build().unwrap();
        let args = args_as_strings(&freeze_args(
            &settings,
            &qt,
            Path::new("/work/qt_runtime_hook.py"),
            Path::new("/work/entitlements.plist"),
        ));

        assert_eq!(
            value_after(&args, "--add-data"),
            vec![format!("{}/Qt/translations:Qt/translations", site.path().display())]
        );
        assert_eq!(
            value_after(&args, "--add-binary"),
            vec![format!("{}/Qt/plugins:Qt/plugins", site.path().display())]
        );
        assert_eq!(value_after(&args, "--name"), vec!["MacWhisper"]);
        assert_eq!(
            value_after(&args, "--osx-bundle-identifier"),
            vec!["com.macwhisper.app"]
        );
        assert_eq!(
            value_after(&args, "--runtime-hook"),
            vec!["/work/qt_runtime_hook.py"]
        );
        assert_eq!(
            value_after(&args, "--osx-entitlements-file"),
            vec!["/work/entitlements.plist"]
        );
        assert!(args.contains(&"--windowed".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("/work/main.py"));
    }

    #[test]
    fn one_flag_per_hidden_import() {
        let site = tempfile::tempdir().unwrap();
        std::fs::create_dir(site.path().join("Qt6")).unwrap();
        let qt = QtToolkit::detect(site.path()).unwrap();

        let settings = SettingsBuilder::new()
            .workdir("/work")
            .freeze_settings(FreezeSettings {
                hidden_imports: vec!["PyQt6.sip".into(), "faster_whisper".into()],
            })
            .build()
            .unwrap();
        let args = args_as_strings(&freeze_args(
            &settings,
            &qt,
            Path::new("hook.py"),
            Path::new("ent.plist"),
        ));

        assert_eq!(
            value_after(&args, "--hidden-import"),
            vec!["PyQt6.sip", "faster_whisper"]
        );
    }

    #[tokio::test]
    async fn missing_entry_point_stops_before_freezer() {
        let work = tempfile::tempdir().unwrap();
        std::fs::create_dir(work.path().join("Qt6")).unwrap();
        let qt = QtToolkit::detect(work.path()).unwrap();
        let settings = SettingsBuilder::new().workdir(work.path()).build().unwrap();

        let err = freeze(&settings, &qt, Path::new("h"), Path::new("e"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingEntryPoint(_)));
    }
}
