//! Python toolchain and freeze settings.

/// Interpreter, freezer and GUI toolkit module to probe.
///
/// ```toml
/// [toolkit]
/// python = "python3"
/// pyinstaller = "pyinstaller"
/// module = "PyQt6"
/// ```
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolkitSettings {
    /// Interpreter used for the toolkit probe. Resolved through `PATH`.
    pub python: String,

    /// Freezer executable. Resolved through `PATH`.
    pub pyinstaller: String,

    /// Importable toolkit module whose install directory holds the Qt assets.
    pub module: String,
}

impl Default for ToolkitSettings {
    fn default() -> Self {
        Self {
            python: "python3".into(),
            pyinstaller: "pyinstaller".into(),
            module: "PyQt6".into(),
        }
    }
}

/// Options passed through to the freezer.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FreezeSettings {
    /// Modules the freezer's import analysis misses.
    pub hidden_imports: Vec<String>,
}

impl Default for FreezeSettings {
    fn default() -> Self {
        Self {
            hidden_imports: vec![
                "PyQt6.sip".into(),
                "PyQt6.QtCore".into(),
                "PyQt6.QtGui".into(),
                "PyQt6.QtWidgets".into(),
            ],
        }
    }
}
