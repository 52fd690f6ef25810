//! Application metadata.

use std::path::PathBuf;

/// Application name used when nothing else is configured.
pub const DEFAULT_PRODUCT_NAME: &str = "MacWhisper";

/// Version used when nothing else is configured.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Application metadata for the frozen bundle.
///
/// # Configuration
///
/// ```toml
/// [package]
/// name = "MacWhisper"
/// version = "1.0.0"
/// identifier = "com.macwhisper.app"
/// entry_point = "main.py"
/// ```
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageSettings {
    /// Product name. Becomes `<name>.app`, the executable name and the
    /// disk image volume name.
    #[serde(rename = "name")]
    pub product_name: String,

    /// Version string in semantic versioning format.
    pub version: String,

    /// Bundle identifier in reverse domain notation.
    pub identifier: String,

    /// Python entry point, relative to the working directory.
    pub entry_point: PathBuf,
}

impl Default for PackageSettings {
    fn default() -> Self {
        Self {
            product_name: DEFAULT_PRODUCT_NAME.into(),
            version: DEFAULT_VERSION.into(),
            identifier: "com.macwhisper.app".into(),
            entry_point: PathBuf::from("main.py"),
        }
    }
}
