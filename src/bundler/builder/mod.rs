//! Pipeline orchestration.
//!
//! This module provides the [`Packager`] that runs the release stages in
//! order and reports the produced disk image.
//!
//! # Overview
//!
//! The packager:
//! 1. Resets the workspace
//! 2. Probes the Qt toolkit install
//! 3. Generates the runtime hook and entitlements manifest
//! 4. Freezes the app with PyInstaller
//! 5. Cleans and signs the bundle inside-out
//! 6. Packages the signed bundle into a `.dmg`
//! 7. Returns a [`PackagedArtifact`] with size and checksum
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for the image
//! - [`orchestrator`] - [`Packager`] and the [`Stage`] sequence
//! - [`tool_detection`] - `create-dmg` availability checking

mod checksum;
mod orchestrator;
mod tool_detection;

pub use checksum::calculate_sha256;
pub use orchestrator::{PackagedArtifact, Packager, Stage};
pub use tool_detection::CREATE_DMG;
