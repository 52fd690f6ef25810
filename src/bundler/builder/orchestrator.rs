//! Main packaging orchestration.
//!
//! The stages run strictly one after another. The first failure aborts the
//! run; nothing is rolled back, and the next run starts again from the
//! workspace reset.

use crate::bundler::{
    Result, Settings,
    error::ErrorExt,
    freeze, generate,
    platform::macos::{cleanup, dmg, sign},
    toolkit, workspace,
};
use std::fmt;
use std::path::PathBuf;

use super::checksum::calculate_sha256;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Remove previous outputs and generated files.
    Reset,
    /// Locate the Qt assets of the installed toolkit.
    ProbeToolkit,
    /// Write the runtime hook.
    GenerateHook,
    /// Write the entitlements manifest.
    GenerateEntitlements,
    /// Run PyInstaller.
    Freeze,
    /// Delete junk files and clear extended attributes.
    Cleanup,
    /// Sign nested code, the executable, then the bundle.
    Sign,
    /// Build the disk image.
    Package,
}

impl Stage {
    /// Every stage, in the order [`Packager::package`] runs them.
    pub const ALL: [Stage; 8] = [
        Stage::Reset,
        Stage::ProbeToolkit,
        Stage::GenerateHook,
        Stage::GenerateEntitlements,
        Stage::Freeze,
        Stage::Cleanup,
        Stage::Sign,
        Stage::Package,
    ];

    /// Human-readable description for progress output.
    pub fn description(self) -> &'static str {
        match self {
            Stage::Reset => "Resetting workspace",
            Stage::ProbeToolkit => "Locating Qt toolkit",
            Stage::GenerateHook => "Generating runtime hook",
            Stage::GenerateEntitlements => "Generating entitlements",
            Stage::Freeze => "Freezing application",
            Stage::Cleanup => "Cleaning bundle",
            Stage::Sign => "Signing bundle",
            Stage::Package => "Creating disk image",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct PackagedArtifact {
    /// Signed `.app` bundle.
    pub app_bundle: PathBuf,
    /// Final disk image.
    pub dmg_path: PathBuf,
    /// Disk image size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256 of the disk image.
    pub checksum: String,
}

/// Runs the release pipeline for one [`Settings`].
#[derive(Debug)]
pub struct Packager {
    settings: Settings,
}

impl Packager {
    /// Creates a packager for the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs every stage in order, calling `on_stage` before each one.
    pub async fn package<F>(&self, mut on_stage: F) -> Result<PackagedArtifact>
    where
        F: FnMut(Stage),
    {
        let settings = &self.settings;

        if !cfg!(target_os = "macos") {
            log::warn!(
                "Packaging on {}: codesign, xattr and hdiutil are macOS tools and must be provided on PATH",
                std::env::consts::OS
            );
        }

        on_stage(Stage::Reset);
        workspace::reset(settings).await?;

        on_stage(Stage::ProbeToolkit);
        let qt = toolkit::probe(settings).await?;

        on_stage(Stage::GenerateHook);
        let hook = generate::write_runtime_hook(settings, &qt).await?;

        on_stage(Stage::GenerateEntitlements);
        let entitlements = generate::write_entitlements(settings).await?;

        on_stage(Stage::Freeze);
        let app_bundle = freeze::freeze(settings, &qt, &hook, &entitlements).await?;

        on_stage(Stage::Cleanup);
        cleanup::clean_bundle(settings, &app_bundle).await?;

        on_stage(Stage::Sign);
        sign::sign_bundle(settings, &app_bundle).await?;

        on_stage(Stage::Package);
        let dmg_path = dmg::bundle_project(settings, &app_bundle).await?;

        let size = tokio::fs::metadata(&dmg_path)
            .await
            .fs_context("reading artifact metadata", &dmg_path)?
            .len();
        let checksum = calculate_sha256(&dmg_path).await?;

        Ok(PackagedArtifact {
            app_bundle,
            dmg_path,
            size,
            checksum,
        })
    }
}
