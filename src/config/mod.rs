//! `packager.toml` loading.
//!
//! The file is optional. Every section and every key falls back to the
//! defaults of the matching settings struct, so a file containing only
//! `[package] version = "1.1.0"` is enough to cut a new release.

use crate::bundler::{
    DmgSettings, FreezeSettings, MacOsSettings, PackageSettings, SettingsBuilder,
    ToolkitSettings,
};
use crate::error::{CliError, PackagerError, Result};
use std::path::Path;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "packager.toml";

/// Parsed `packager.toml`.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagerConfig {
    /// `[package]`
    pub package: PackageSettings,
    /// `[toolkit]`
    pub toolkit: ToolkitSettings,
    /// `[freeze]`
    pub freeze: FreezeSettings,
    /// `[macos]`
    pub macos: MacOsSettings,
    /// `[dmg]`
    pub dmg: DmgSettings,
}

impl PackagerConfig {
    /// Parses a config document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Starts a [`SettingsBuilder`] for `workdir` populated from this config.
    pub fn into_builder(self, workdir: &Path) -> SettingsBuilder {
        SettingsBuilder::new()
            .workdir(workdir)
            .package_settings(self.package)
            .toolkit_settings(self.toolkit)
            .freeze_settings(self.freeze)
            .macos_settings(self.macos)
            .dmg_settings(self.dmg)
    }
}

/// Reads and parses the config file at `path`.
pub fn load_config(path: &Path) -> Result<PackagerConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        PackagerError::Cli(CliError::ExecutionFailed {
            command: "read_config".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    PackagerConfig::from_toml_str(&contents).map_err(|e| {
        PackagerError::Cli(CliError::ExecutionFailed {
            command: "parse_config".to_string(),
            reason: format!("Failed to parse {}: {}", path.display(), e),
        })
    })
}

/// Loads the explicit config file, or `packager.toml` in `workdir` when it
/// exists, or the defaults.
///
/// An explicit path that does not exist is an error; a missing
/// `packager.toml` is not.
pub fn discover_config(workdir: &Path, explicit: Option<&Path>) -> Result<PackagerConfig> {
    if let Some(path) = explicit {
        log::debug!("Loading config from {}", path.display());
        return load_config(path);
    }

    let default_path = workdir.join(CONFIG_FILE_NAME);
    if default_path.is_file() {
        log::debug!("Loading config from {}", default_path.display());
        load_config(&default_path)
    } else {
        log::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, workdir.display());
        Ok(PackagerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_sections_keep_defaults() {
        let config = PackagerConfig::from_toml_str(
            r#"
            [package]
            version = "1.2.0"

            [macos]
            verify = false

            [dmg]
            window_size = [800, 400]
            "#,
        )
        .unwrap();

        assert_eq!(config.package.product_name, "MacWhisper");
        assert_eq!(config.package.version, "1.2.0");
        assert_eq!(config.macos.signing_identity, "-");
        assert!(!config.macos.verify);
        assert_eq!(config.dmg.window_size, (800, 400));
        assert_eq!(config.dmg.icon_size, 100);
        assert_eq!(config.toolkit.python, "python3");
    }

    #[test]
    fn unknown_sections_are_rejected() {
        let err = PackagerConfig::from_toml_str("[notarize]\nteam = \"X\"\n").unwrap_err();
        assert!(matches!(err, PackagerError::Toml(_)));
    }

    #[test]
    fn misspelled_keys_are_rejected() {
        let err = PackagerConfig::from_toml_str("[package]\nverison = \"2.0.0\"\n").unwrap_err();
        assert!(matches!(err, PackagerError::Toml(_)));
        assert!(err.to_string().contains("verison"));

        for doc in [
            "[toolkit]\npyton = \"python3.12\"\n",
            "[freeze]\nhidden_import = [\"PyQt6.QtNetwork\"]\n",
            "[macos]\nsigning_identiy = \"-\"\n",
            "[dmg]\nwindow_sise = [800, 400]\n",
        ] {
            assert!(PackagerConfig::from_toml_str(doc).is_err(), "accepted: {doc}");
        }
    }

    #[test]
    fn missing_default_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = discover_config(dir.path(), None).unwrap();
        assert_eq!(config.package.version, "1.0.0");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = discover_config(dir.path(), Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("read_config"));
    }

    #[test]
    fn workdir_file_feeds_settings() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[package]\nname = \"Whisperer\"\nversion = \"2.0.0\"\n",
        )
        .unwrap();

        let settings = discover_config(dir.path(), None)
            .unwrap()
            .into_builder(dir.path())
            .build()
            .unwrap();
        assert_eq!(settings.dmg_file_name(), "Whisperer_2.0.0.dmg");
    }
}
