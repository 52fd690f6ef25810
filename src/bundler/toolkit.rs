//! Qt toolkit discovery.
//!
//! PyQt ships its Qt runtime (platform plugins, translations) in a
//! subfolder of the package directory. Depending on the wheel that folder
//! is named `Qt6` or `Qt`. The interpreter is asked where the module lives,
//! then the two names are checked in that order.

use crate::bundler::{Error, Result, Settings, utils::process};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Name of the folder holding Qt's runtime assets inside the toolkit package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QtSubfolder {
    /// `Qt6`, used by current PyQt6 wheels.
    Qt6,
    /// `Qt`, used by older wheels.
    Qt,
}

impl QtSubfolder {
    /// Candidates in detection order.
    pub const CANDIDATES: [QtSubfolder; 2] = [QtSubfolder::Qt6, QtSubfolder::Qt];

    /// Folder name on disk.
    pub fn as_str(self) -> &'static str {
        match self {
            QtSubfolder::Qt6 => "Qt6",
            QtSubfolder::Qt => "Qt",
        }
    }
}

impl fmt::Display for QtSubfolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Installed toolkit location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QtToolkit {
    install_dir: PathBuf,
    subfolder: QtSubfolder,
}

impl QtToolkit {
    /// Inspects `install_dir` for a known asset subfolder.
    ///
    /// # Errors
    ///
    /// [`Error::QtToolkitNotFound`] when neither `Qt6` nor `Qt` is a directory there.
    pub fn detect(install_dir: &Path) -> Result<Self> {
        QtSubfolder::CANDIDATES
            .into_iter()
            .find(|candidate| install_dir.join(candidate.as_str()).is_dir())
            .map(|subfolder| Self {
                install_dir: install_dir.to_path_buf(),
                subfolder,
            })
            .ok_or_else(|| Error::QtToolkitNotFound {
                install_dir: install_dir.to_path_buf(),
            })
    }

    /// Package directory reported by the interpreter.
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Detected asset subfolder.
    pub fn subfolder(&self) -> QtSubfolder {
        self.subfolder
    }

    /// `<install_dir>/<subfolder>`
    pub fn qt_root(&self) -> PathBuf {
        self.install_dir.join(self.subfolder.as_str())
    }

    /// Platform plugins shipped with the toolkit.
    pub fn plugins_dir(&self) -> PathBuf {
        self.qt_root().join("plugins")
    }

    /// Translation catalogs shipped with the toolkit.
    pub fn translations_dir(&self) -> PathBuf {
        self.qt_root().join("translations")
    }
}

fn probe_script(module: &str) -> String {
    format!("import os, {module}; print(os.path.dirname({module}.__file__))")
}

/// Asks the interpreter for the toolkit's install directory and detects
/// the asset subfolder.
pub async fn probe(settings: &Settings) -> Result<QtToolkit> {
    let toolkit = settings.toolkit();
    log::info!(
        "Probing {} for {} install path",
        toolkit.python,
        toolkit.module
    );

    let mut cmd = Command::new(&toolkit.python);
    cmd.arg("-c")
        .arg(probe_script(&toolkit.module))
        .current_dir(settings.workdir());
    let output = process::run(&mut cmd).await?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let install_dir = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(PathBuf::from)
        .ok_or_else(|| {
            Error::GenericError(format!(
                "{} printed no install path for {}",
                toolkit.python, toolkit.module
            ))
        })?;

    log::debug!("{} installed at {}", toolkit.module, install_dir.display());

    let qt = QtToolkit::detect(&install_dir)?;
    log::info!("✓ Using Qt assets from {}", qt.qt_root().display());
    Ok(qt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_qt6_when_both_exist() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Qt6")).unwrap();
        std::fs::create_dir(dir.path().join("Qt")).unwrap();

        let qt = QtToolkit::detect(dir.path()).unwrap();
        assert_eq!(qt.subfolder(), QtSubfolder::Qt6);
        assert_eq!(qt.plugins_dir(), dir.path().join("Qt6/plugins"));
        assert_eq!(qt.translations_dir(), dir.path().join("Qt6/translations"));
    }

    #[test]
    fn falls_back_to_qt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Qt")).unwrap();

        let qt = QtToolkit::detect(dir.path()).unwrap();
        assert_eq!(qt.subfolder(), QtSubfolder::Qt);
        assert_eq!(qt.qt_root(), dir.path().join("Qt"));
    }

    #[test]
    fn plain_file_named_qt6_does_not_count() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Qt6"), b"").unwrap();

        let err = QtToolkit::detect(dir.path()).unwrap_err();
        assert!(matches!(err, Error::QtToolkitNotFound { .. }));
    }

    #[test]
    fn probe_script_imports_configured_module() {
        assert_eq!(
            probe_script("PyQt6"),
            "import os, PyQt6; print(os.path.dirname(PyQt6.__file__))"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn probe_uses_last_line_of_interpreter_output() {
        use crate::bundler::{SettingsBuilder, ToolkitSettings};
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let site = dir.path().join("site-packages/PyQt6");
        std::fs::create_dir_all(site.join("Qt")).unwrap();

        let python = dir.path().join("fake-python");
        std::fs::write(
            &python,
            format!("#!/bin/sh\necho 'warning: noisy import'\necho '{}'\n", site.display()),
        )
        .unwrap();
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755)).unwrap();

        let settings = SettingsBuilder::new()
            .workdir(dir.path())
            .toolkit_settings(ToolkitSettings {
                python: python.display().to_string(),
                ..Default::default()
            })
            .build()
            .unwrap();

        let qt = probe(&settings).await.unwrap();
        assert_eq!(qt.install_dir(), site.as_path());
        assert_eq!(qt.subfolder(), QtSubfolder::Qt);
    }
}
