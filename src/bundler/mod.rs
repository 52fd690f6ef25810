//! Release pipeline for the MacWhisper desktop app.
//!
//! Turns the PyQt application in the working directory into a signed
//! `dist/MacWhisper.app` and a distributable `MacWhisper_<version>.dmg`.
//!
//! # Configuration
//!
//! Settings come from `packager.toml` in the working directory, overridden
//! by command line flags:
//!
//! ```toml
//! [package]
//! name = "MacWhisper"
//! version = "1.0.0"
//!
//! [macos]
//! signing_identity = "-"
//! ```
//!
//! # Integration
//!
//! ```no_run
//! use macwhisper_packager::bundler::{Packager, SettingsBuilder};
//!
//! # async fn example() -> macwhisper_packager::bundler::Result<()> {
//! let settings = SettingsBuilder::new().workdir(".").build()?;
//! let artifact = Packager::new(settings)
//!     .package(|stage| println!("{stage}..."))
//!     .await?;
//! println!("{} ({} bytes)", artifact.dmg_path.display(), artifact.size);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod builder;
pub mod error;
pub mod freeze;
pub mod generate;
pub mod platform;
mod settings;
pub mod toolkit;
mod utils;
pub mod workspace;

pub use builder::{PackagedArtifact, Packager, Stage, calculate_sha256};
pub use error::{Error, Result};
pub use settings::{
    DmgSettings, FreezeSettings, MacOsSettings, PackageSettings, Settings, SettingsBuilder,
    ToolkitSettings,
};
pub use toolkit::{QtSubfolder, QtToolkit};
