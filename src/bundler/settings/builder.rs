//! Builder for constructing Settings.

use super::{DmgSettings, FreezeSettings, MacOsSettings, PackageSettings, Settings, ToolkitSettings};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Every section starts from its defaults, so `SettingsBuilder::new().workdir(".")`
/// alone describes the MacWhisper 1.0.0 release.
///
/// ```no_run
/// use macwhisper_packager::bundler::{PackageSettings, SettingsBuilder};
///
/// # fn example() -> macwhisper_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .workdir(".")
///     .package_settings(PackageSettings {
///         version: "1.1.0".into(),
///         ..Default::default()
///     })
///     .build()?;
/// assert_eq!(settings.dmg_file_name(), "MacWhisper_1.1.0.dmg");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    workdir: Option<PathBuf>,
    package: PackageSettings,
    toolkit: ToolkitSettings,
    freeze: FreezeSettings,
    macos: MacOsSettings,
    dmg: DmgSettings,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the working directory.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn workdir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.workdir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets application metadata.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package = settings;
        self
    }

    /// Sets the toolchain settings.
    pub fn toolkit_settings(mut self, settings: ToolkitSettings) -> Self {
        self.toolkit = settings;
        self
    }

    /// Sets freeze options.
    pub fn freeze_settings(mut self, settings: FreezeSettings) -> Self {
        self.freeze = settings;
        self
    }

    /// Sets signing options.
    pub fn macos_settings(mut self, settings: MacOsSettings) -> Self {
        self.macos = settings;
        self
    }

    /// Sets disk image layout.
    pub fn dmg_settings(mut self, settings: DmgSettings) -> Self {
        self.dmg = settings;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// - `workdir` was never set
    /// - the product name is empty or contains a path separator
    /// - the version is not a semantic version
    /// - the identifier, interpreter, freezer or signing identity is empty
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::{Context, ErrorExt};

        let workdir = self.workdir.context("workdir is required")?;
        let workdir = workdir
            .absolutize()
            .fs_context("resolving working directory", &workdir)?
            .into_owned();

        let name = &self.package.product_name;
        if name.trim().is_empty() {
            crate::bail!("product name must not be empty");
        }
        if name.contains('/') {
            crate::bail!("product name must not contain '/': {}", name);
        }

        semver::Version::parse(&self.package.version)?;

        if self.package.identifier.trim().is_empty() {
            crate::bail!("bundle identifier must not be empty");
        }
        if self.toolkit.python.trim().is_empty() || self.toolkit.pyinstaller.trim().is_empty() {
            crate::bail!("python and pyinstaller commands must not be empty");
        }
        if self.macos.signing_identity.trim().is_empty() {
            crate::bail!("signing identity must not be empty (use \"-\" for ad-hoc)");
        }

        Ok(Settings::new(
            self.package,
            self.toolkit,
            self.freeze,
            self.macos,
            self.dmg,
            workdir,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_macwhisper_release() {
        let settings = SettingsBuilder::new().workdir("/tmp/mw").build().unwrap();
        assert_eq!(settings.product_name(), "MacWhisper");
        assert_eq!(settings.version_string(), "1.0.0");
        assert_eq!(settings.macos().signing_identity, "-");
        assert!(settings.macos().is_ad_hoc());
        assert_eq!(settings.toolkit().module, "PyQt6");
    }

    #[test]
    fn relative_workdir_is_made_absolute() {
        let settings = SettingsBuilder::new().workdir("relative/dir").build().unwrap();
        assert!(settings.workdir().is_absolute());
        assert!(settings.workdir().ends_with("relative/dir"));
    }

    #[test]
    fn missing_workdir_is_rejected() {
        let err = SettingsBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("workdir is required"));
    }

    #[test]
    fn invalid_version_is_rejected() {
        let err = SettingsBuilder::new()
            .workdir("/tmp/mw")
            .package_settings(PackageSettings {
                version: "one".into(),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(err.to_string().starts_with("invalid version"));
    }

    #[test]
    fn product_name_with_separator_is_rejected() {
        let err = SettingsBuilder::new()
            .workdir("/tmp/mw")
            .package_settings(PackageSettings {
                product_name: "Mac/Whisper".into(),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("must not contain '/'"));
    }
}
