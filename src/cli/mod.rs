//! Command line interface for the MacWhisper packager.
//!
//! Parses flags, layers them over `packager.toml`, runs the pipeline and
//! reports the produced disk image.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::bundler::{Packager, Stage};
use crate::config::discover_config;
use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Runs the pipeline for already-parsed arguments.
pub async fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let runtime = RuntimeConfig::from(args);
    let config = args.apply(discover_config(&args.workdir, args.config.as_deref())?);
    let settings = config.into_builder(&args.workdir).build()?;

    let _ = runtime.section(&format!(
        "Packaging {} {}",
        settings.product_name(),
        settings.version_string()
    ));

    let _ = runtime.progress(&format!("Working directory: {}", settings.workdir().display()));

    let packager = Packager::new(settings);
    let mut index = 0;
    let artifact = packager
        .package(|stage| {
            index += 1;
            let _ = runtime.stage(index, Stage::ALL.len(), stage.description());
        })
        .await?;

    let _ = runtime.success(&format!(
        "Build complete: {}",
        artifact.dmg_path.display()
    ));
    let _ = runtime.indent(&format!("app:    {}", artifact.app_bundle.display()));
    let _ = runtime.indent(&format!("size:   {} bytes", artifact.size));
    let _ = runtime.indent(&format!("sha256: {}", artifact.checksum));

    Ok(0)
}
