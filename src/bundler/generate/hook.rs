//! Runtime hook generation.
//!
//! The hook runs inside the frozen app before `main.py`. It points Qt's
//! plugin, translation and prefix lookups at the copy embedded under
//! `<_MEIPASS>/<subfolder>` so a system-wide Qt install is never picked up.

use crate::bundler::{Result, Settings, toolkit::QtToolkit, utils::fs};
use handlebars::Handlebars;
use std::collections::BTreeMap;
use std::path::PathBuf;

const RUNTIME_HOOK_TEMPLATE: &str = r#"import os
import sys
from pathlib import Path

if getattr(sys, "frozen", False):
    bundle_dir = Path(sys._MEIPASS)
    qt_root = bundle_dir / "{{qt_subfolder}}"

    os.environ["QT_PLUGIN_PATH"] = str(qt_root / "plugins")
    os.environ["QT_TRANSLATIONS_DIR"] = str(qt_root / "translations")
    os.environ["QLIBRARYINFO_QT_PREFIX"] = str(qt_root)
"#;

/// Renders the hook for the detected toolkit.
pub fn render_runtime_hook(qt: &QtToolkit) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    let mut data = BTreeMap::new();
    data.insert("qt_subfolder", qt.subfolder().as_str());

    Ok(handlebars.render_template(RUNTIME_HOOK_TEMPLATE, &data)?)
}

/// Writes the hook to [`Settings::runtime_hook_path`].
pub async fn write_runtime_hook(settings: &Settings, qt: &QtToolkit) -> Result<PathBuf> {
    let path = settings.runtime_hook_path();
    let script = render_runtime_hook(qt)?;
    fs::write_file(&path, script).await?;

    log::info!("✓ Generated runtime hook: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toolkit_with(subfolder: &str) -> (tempfile::TempDir, QtToolkit) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(subfolder)).unwrap();
        let qt = QtToolkit::detect(dir.path()).unwrap();
        (dir, qt)
    }

    #[test]
    fn hook_points_at_bundled_qt6_tree() {
        let (_dir, qt) = toolkit_with("Qt6");
        let hook = render_runtime_hook(&qt).unwrap();

        assert!(hook.contains(r#"qt_root = bundle_dir / "Qt6""#));
        assert!(hook.contains(r#"os.environ["QT_PLUGIN_PATH"] = str(qt_root / "plugins")"#));
        assert!(hook.contains(r#"os.environ["QT_TRANSLATIONS_DIR"] = str(qt_root / "translations")"#));
        assert!(hook.contains(r#"os.environ["QLIBRARYINFO_QT_PREFIX"] = str(qt_root)"#));
        assert!(hook.starts_with("import os\n"));
    }

    #[test]
    fn hook_sets_only_plugin_translation_and_prefix_vars() {
        let (_dir, qt) = toolkit_with("Qt6");
        let hook = render_runtime_hook(&qt).unwrap();

        let vars: Vec<&str> = hook
            .lines()
            .filter_map(|line| line.trim().strip_prefix("os.environ[\""))
            .filter_map(|rest| rest.split('"').next())
            .collect();
        assert_eq!(
            vars,
            ["QT_PLUGIN_PATH", "QT_TRANSLATIONS_DIR", "QLIBRARYINFO_QT_PREFIX"]
        );
    }

    #[test]
    fn hook_uses_legacy_subfolder_name() {
        let (_dir, qt) = toolkit_with("Qt");
        let hook = render_runtime_hook(&qt).unwrap();
        assert!(hook.contains(r#"bundle_dir / "Qt""#));
        assert!(!hook.contains("Qt6"));
    }

    #[tokio::test]
    async fn hook_is_written_into_workdir() {
        let (_dir, qt) = toolkit_with("Qt6");
        let work = tempfile::tempdir().unwrap();
        let settings = crate::bundler::SettingsBuilder::new()
            .workdir(work.path())
            .build()
            .unwrap();

        let path = write_runtime_hook(&settings, &qt).await.unwrap();
        assert_eq!(path, work.path().join("qt_runtime_hook.py"));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            render_runtime_hook(&qt).unwrap()
        );
    }
}
