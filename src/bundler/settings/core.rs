//! Core Settings struct and derived paths.

use super::{DmgSettings, FreezeSettings, MacOsSettings, PackageSettings, ToolkitSettings};
use std::path::{Path, PathBuf};

/// File name of the generated runtime hook.
pub const RUNTIME_HOOK_FILE: &str = "qt_runtime_hook.py";

/// File name of the generated entitlements manifest.
pub const ENTITLEMENTS_FILE: &str = "entitlements.plist";

/// Main settings for a packaging run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). Every path the
/// pipeline reads or writes is derived from the working directory here, so
/// stages never join paths on their own.
#[derive(Clone, Debug)]
pub struct Settings {
    package: PackageSettings,
    toolkit: ToolkitSettings,
    freeze: FreezeSettings,
    macos: MacOsSettings,
    dmg: DmgSettings,

    /// Absolute working directory holding the entry point and all outputs.
    workdir: PathBuf,
}

impl Settings {
    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.product_name
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Returns the bundle identifier.
    pub fn identifier(&self) -> &str {
        &self.package.identifier
    }

    /// Returns the toolchain settings.
    pub fn toolkit(&self) -> &ToolkitSettings {
        &self.toolkit
    }

    /// Returns the freeze settings.
    pub fn freeze(&self) -> &FreezeSettings {
        &self.freeze
    }

    /// Returns the macOS signing settings.
    pub fn macos(&self) -> &MacOsSettings {
        &self.macos
    }

    /// Returns the disk image settings.
    pub fn dmg(&self) -> &DmgSettings {
        &self.dmg
    }

    /// Returns the working directory.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Entry point script, resolved against the working directory.
    pub fn entry_point(&self) -> PathBuf {
        self.workdir.join(&self.package.entry_point)
    }

    /// Freezer scratch directory (`build/`).
    pub fn build_dir(&self) -> PathBuf {
        self.workdir.join("build")
    }

    /// Freezer output directory (`dist/`).
    pub fn dist_dir(&self) -> PathBuf {
        self.workdir.join("dist")
    }

    /// Spec file the freezer writes next to the entry point.
    pub fn spec_file(&self) -> PathBuf {
        self.workdir.join(format!("{}.spec", self.product_name()))
    }

    /// Generated runtime hook.
    pub fn runtime_hook_path(&self) -> PathBuf {
        self.workdir.join(RUNTIME_HOOK_FILE)
    }

    /// Generated entitlements manifest.
    pub fn entitlements_path(&self) -> PathBuf {
        self.workdir.join(ENTITLEMENTS_FILE)
    }

    /// `dist/<App>.app`
    pub fn app_bundle_path(&self) -> PathBuf {
        self.dist_dir().join(format!("{}.app", self.product_name()))
    }

    /// `dist/<App>.app/Contents/MacOS/<App>`
    pub fn executable_path(&self) -> PathBuf {
        self.app_bundle_path()
            .join("Contents/MacOS")
            .join(self.product_name())
    }

    /// Disk image file name: `<App>_<Version>.dmg`.
    pub fn dmg_file_name(&self) -> String {
        format!("{}_{}.dmg", self.product_name(), self.version_string())
    }

    /// Disk image path inside the working directory.
    pub fn dmg_path(&self) -> PathBuf {
        self.workdir.join(self.dmg_file_name())
    }

    pub(super) fn new(
        package: PackageSettings,
        toolkit: ToolkitSettings,
        freeze: FreezeSettings,
        macos: MacOsSettings,
        dmg: DmgSettings,
        workdir: PathBuf,
    ) -> Self {
        Self {
            package,
            toolkit,
            freeze,
            macos,
            dmg,
            workdir,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bundler::SettingsBuilder;
    use std::path::Path;

    #[test]
    fn derived_paths_follow_product_name_and_version() {
        let settings = SettingsBuilder::new()
            .workdir("/work/macwhisper")
            .build()
            .unwrap();

        assert_eq!(settings.dmg_file_name(), "MacWhisper_1.0.0.dmg");
        assert_eq!(
            settings.dmg_path(),
            Path::new("/work/macwhisper/MacWhisper_1.0.0.dmg")
        );
        assert_eq!(
            settings.app_bundle_path(),
            Path::new("/work/macwhisper/dist/MacWhisper.app")
        );
        assert_eq!(
            settings.executable_path(),
            Path::new("/work/macwhisper/dist/MacWhisper.app/Contents/MacOS/MacWhisper")
        );
        assert_eq!(
            settings.spec_file(),
            Path::new("/work/macwhisper/MacWhisper.spec")
        );
        assert_eq!(
            settings.runtime_hook_path(),
            Path::new("/work/macwhisper/qt_runtime_hook.py")
        );
        assert_eq!(
            settings.entitlements_path(),
            Path::new("/work/macwhisper/entitlements.plist")
        );
    }
}
