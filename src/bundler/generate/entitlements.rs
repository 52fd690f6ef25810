//! Entitlements manifest generation.
//!
//! The frozen interpreter maps writable+executable memory, loads unsigned
//! extension modules and reads `DYLD_*` variables set by the bootloader.
//! Under the hardened runtime each of those needs an explicit exception,
//! and the transcription UI needs microphone access.

use crate::bundler::{Result, Settings, utils::fs};
use plist::{Dictionary, Value};
use std::path::PathBuf;

/// Entitlements granted to every signed binary in the bundle.
pub const ENTITLEMENT_KEYS: [&str; 5] = [
    "com.apple.security.cs.allow-jit",
    "com.apple.security.cs.allow-unsigned-executable-memory",
    "com.apple.security.cs.allow-dyld-environment-variables",
    "com.apple.security.device.audio-input",
    "com.apple.security.cs.disable-library-validation",
];

/// Renders the manifest as an XML property list.
pub fn render_entitlements() -> Result<Vec<u8>> {
    let mut dict = Dictionary::new();
    for key in ENTITLEMENT_KEYS {
        dict.insert(key.to_string(), Value::Boolean(true));
    }

    let mut xml = Vec::new();
    Value::Dictionary(dict).to_writer_xml(&mut xml)?;
    xml.push(b'\n');
    Ok(xml)
}

/// Writes the manifest to [`Settings::entitlements_path`].
pub async fn write_entitlements(settings: &Settings) -> Result<PathBuf> {
    let path = settings.entitlements_path();
    fs::write_file(&path, render_entitlements()?).await?;

    log::info!("✓ Generated entitlements: {}", path.display());
    Ok(path)
}
