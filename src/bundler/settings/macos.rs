//! macOS signing and disk image settings.

/// Code signing and bundle post-processing configuration.
///
/// # Configuration
///
/// ```toml
/// [macos]
/// signing_identity = "-"
/// hardened_runtime = true
/// junk_extensions = ["pyc", "pyo", "o"]
/// verify = true
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MacOsSettings {
    /// Code signing identity name.
    ///
    /// Use "-" for ad-hoc signing.
    ///
    /// Default: "-"
    pub signing_identity: String,

    /// Sign with `--options runtime`.
    ///
    /// Default: true
    pub hardened_runtime: bool,

    /// File extensions (without the dot) removed from the bundle before signing.
    ///
    /// Default: `["pyc", "pyo", "o"]`
    pub junk_extensions: Vec<String>,

    /// Run `codesign --verify --deep --strict` after sealing the bundle.
    ///
    /// Default: true
    pub verify: bool,
}

impl Default for MacOsSettings {
    fn default() -> Self {
        Self {
            signing_identity: "-".into(),
            hardened_runtime: true,
            junk_extensions: vec!["pyc".into(), "pyo".into(), "o".into()],
            verify: true,
        }
    }
}

impl MacOsSettings {
    /// Whether the identity is Apple's ad-hoc marker.
    pub fn is_ad_hoc(&self) -> bool {
        self.signing_identity == "-"
    }
}

/// Disk image layout, used when `create-dmg` is available.
///
/// # Configuration
///
/// ```toml
/// [dmg]
/// use_create_dmg = true
/// window_position = [200, 120]
/// window_size = [600, 300]
/// icon_size = 100
/// app_icon_position = [175, 120]
/// app_drop_link = [425, 120]
/// ```
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DmgSettings {
    /// Use `create-dmg` when it is on `PATH`. `false` always uses `hdiutil`.
    pub use_create_dmg: bool,

    /// Finder window origin (x, y).
    pub window_position: (u32, u32),

    /// Finder window size (width, height).
    pub window_size: (u32, u32),

    /// Icon size in points.
    pub icon_size: u32,

    /// Position of the `.app` icon inside the window.
    pub app_icon_position: (u32, u32),

    /// Position of the Applications drop link.
    pub app_drop_link: (u32, u32),
}

impl Default for DmgSettings {
    fn default() -> Self {
        Self {
            use_create_dmg: true,
            window_position: (200, 120),
            window_size: (600, 300),
            icon_size: 100,
            app_icon_position: (175, 120),
            app_drop_link: (425, 120),
        }
    }
}
