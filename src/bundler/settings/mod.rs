//! Configuration structures for the packaging pipeline.
//!
//! This module provides the settings consumed by every stage: application
//! metadata, the Python/Qt toolchain, freeze options, macOS signing options
//! and disk image layout, plus the builder that validates them.

mod builder;
mod core;
mod macos;
mod package;
mod toolkit;

pub use builder::SettingsBuilder;
pub use core::Settings;
pub use macos::{DmgSettings, MacOsSettings};
pub use package::PackageSettings;
pub use toolkit::{FreezeSettings, ToolkitSettings};
