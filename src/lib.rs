//! Release packager for the MacWhisper desktop app.
//!
//! This library provides the pipeline that turns the PyQt application into:
//! - a signed macOS `.app` bundle (PyInstaller + `codesign`)
//! - a distributable `.dmg` disk image (`create-dmg` or `hdiutil`)
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod config;
pub mod error;

pub use error::{CliError, PackagerError, Result};
