//! Command line argument parsing and validation.
//!
//! Every flag is optional: with none given the packager builds the
//! release described by `packager.toml` (or the built-in defaults) from
//! the current directory.

use crate::config::PackagerConfig;
use clap::Parser;
use std::path::PathBuf;

/// Release packager for the MacWhisper desktop app
#[derive(Parser, Debug)]
#[command(
    name = "macwhisper_packager",
    version,
    about = "Freeze, sign and package MacWhisper into a .dmg",
    long_about = "Builds a signed MacWhisper.app with PyInstaller and wraps it in a disk image.

Stages: reset workspace, locate Qt assets, generate runtime hook and entitlements,
freeze, clean, sign inside-out, create .dmg.

Usage:
  macwhisper_packager
  macwhisper_packager --app-version 1.1.0
  macwhisper_packager -C ~/src/macwhisper --signing-identity \"Developer ID Application: Example (TEAMID)\"

Exit code 0 = <AppName>_<Version>.dmg exists in the working directory."
)]
pub struct Args {
    /// Working directory containing the entry point
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub workdir: PathBuf,

    /// Config file (default: packager.toml in the working directory, if present)
    #[arg(long, value_name = "FILE", env = "MACWHISPER_PACKAGER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Application name
    #[arg(long, value_name = "NAME")]
    pub app_name: Option<String>,

    /// Application version (semver)
    #[arg(long, value_name = "VERSION")]
    pub app_version: Option<String>,

    /// Bundle identifier
    #[arg(long, value_name = "ID")]
    pub identifier: Option<String>,

    /// Python entry point, relative to the working directory
    #[arg(long, value_name = "FILE")]
    pub entry_point: Option<PathBuf>,

    /// Python interpreter used to locate the Qt toolkit
    #[arg(long, value_name = "PATH", env = "MACWHISPER_PYTHON")]
    pub python: Option<String>,

    /// PyInstaller executable
    #[arg(long, value_name = "PATH")]
    pub pyinstaller: Option<String>,

    /// Code signing identity ("-" for ad-hoc)
    #[arg(long, value_name = "IDENTITY", env = "MACWHISPER_SIGNING_IDENTITY")]
    pub signing_identity: Option<String>,

    /// Always use hdiutil, even when create-dmg is installed
    #[arg(long)]
    pub no_create_dmg: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.workdir.is_dir() {
            return Err(format!(
                "Working directory does not exist: {}",
                self.workdir.display()
            ));
        }

        if self.app_name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err("App name cannot be empty".to_string());
        }

        if let Some(version) = &self.app_version {
            semver::Version::parse(version)
                .map_err(|e| format!("Invalid version '{}': {}", version, e))?;
        }

        Ok(())
    }

    /// Applies flag overrides on top of the loaded config.
    pub fn apply(&self, mut config: PackagerConfig) -> PackagerConfig {
        if let Some(name) = &self.app_name {
            config.package.product_name = name.clone();
        }
        if let Some(version) = &self.app_version {
            config.package.version = version.clone();
        }
        if let Some(identifier) = &self.identifier {
            config.package.identifier = identifier.clone();
        }
        if let Some(entry_point) = &self.entry_point {
            config.package.entry_point = entry_point.clone();
        }
        if let Some(python) = &self.python {
            config.toolkit.python = python.clone();
        }
        if let Some(pyinstaller) = &self.pyinstaller {
            config.toolkit.pyinstaller = pyinstaller.clone();
        }
        if let Some(identity) = &self.signing_identity {
            config.macos.signing_identity = identity.clone();
        }
        if self.no_create_dmg {
            config.dmg.use_create_dmg = false;
        }
        config
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.quiet);
        Self { output }
    }
}

impl RuntimeConfig {
    /// Print success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print a numbered pipeline stage
    pub fn stage(&self, index: usize, total: usize, message: &str) -> std::io::Result<()> {
        self.output.stage(index, total, message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
