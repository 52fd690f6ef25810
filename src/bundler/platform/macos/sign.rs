//! Inside-out code signing of the frozen bundle.
//!
//! A container's signature seals the hashes of everything inside it, so
//! nested code has to be signed before the code that encloses it:
//!
//! 1. shared libraries, extension modules, loose Mach-O files and
//!    frameworks, deepest path first
//! 2. the main executable
//! 3. the `.app` itself
//!
//! Every signature carries the same entitlements manifest.

use crate::bundler::{Error, Result, Settings, error::ErrorExt, utils::process};
use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Ordered signing targets for one bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningPlan {
    /// Libraries and frameworks, deepest first.
    pub nested: Vec<PathBuf>,
    /// `Contents/MacOS/<App>`
    pub executable: PathBuf,
    /// The `.app` directory.
    pub bundle: PathBuf,
}

impl SigningPlan {
    /// Walks `bundle` and collects everything that needs its own signature.
    ///
    /// Symlinks are skipped: the framework aliases point at files that are
    /// already in the plan.
    ///
    /// Blocking; async callers go through [`SigningPlan::discover_async`].
    pub fn discover(bundle: &Path, executable: &Path) -> Result<Self> {
        if !executable.is_file() {
            return Err(Error::MissingExecutable(executable.to_path_buf()));
        }

        let mut nested = Vec::new();
        for entry in walkdir::WalkDir::new(bundle).follow_links(false).min_depth(1) {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type();

            if file_type.is_symlink() || path == executable {
                continue;
            }

            if file_type.is_dir() {
                if has_extension(path, "framework") {
                    nested.push(path.to_path_buf());
                }
                continue;
            }

            if has_extension(path, "so") || has_extension(path, "dylib") {
                nested.push(path.to_path_buf());
            } else if path.extension().is_none() && is_mach_o(path)? {
                nested.push(path.to_path_buf());
            }
        }

        nested.sort_by(|a, b| {
            let depth = |p: &Path| p.components().count();
            depth(b).cmp(&depth(a)).then_with(|| a.cmp(b))
        });

        Ok(Self {
            nested,
            executable: executable.to_path_buf(),
            bundle: bundle.to_path_buf(),
        })
    }

    /// Runs [`SigningPlan::discover`] on the blocking thread pool.
    pub async fn discover_async(bundle: &Path, executable: &Path) -> Result<Self> {
        let bundle = bundle.to_path_buf();
        let executable = executable.to_path_buf();

        tokio::task::spawn_blocking(move || Self::discover(&bundle, &executable))
            .await
            .map_err(|e| Error::GenericError(format!("Signing plan task panicked: {}", e)))?
    }

    /// Every target in signing order.
    pub fn ordered(&self) -> impl Iterator<Item = &Path> {
        self.nested
            .iter()
            .map(PathBuf::as_path)
            .chain([self.executable.as_path(), self.bundle.as_path()])
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

/// Checks the first four bytes for a thin or universal Mach-O magic.
fn is_mach_o(path: &Path) -> Result<bool> {
    use goblin::mach::{fat, header};

    let mut magic = [0u8; 4];
    let mut file = std::fs::File::open(path).fs_context("reading Mach-O header", path)?;
    if file.read_exact(&mut magic).is_err() {
        return Ok(false);
    }

    let Ok(value) = goblin::mach::peek(&magic, 0) else {
        return Ok(false);
    };

    Ok(matches!(
        value,
        header::MH_MAGIC
            | header::MH_CIGAM
            | header::MH_MAGIC_64
            | header::MH_CIGAM_64
            | fat::FAT_MAGIC
            | fat::FAT_CIGAM
    ))
}

/// Builds the `codesign` arguments for one target.
pub fn codesign_args(settings: &Settings, target: &Path) -> Vec<OsString> {
    let macos = settings.macos();
    let mut args: Vec<OsString> = vec![
        "--force".into(),
        "--sign".into(),
        macos.signing_identity.as_str().into(),
    ];

    if macos.is_ad_hoc() {
        args.push("--timestamp=none".into());
    } else {
        args.push("--timestamp".into());
    }

    if macos.hardened_runtime {
        args.push("--options".into());
        args.push("runtime".into());
    }

    args.push("--entitlements".into());
    args.push(settings.entitlements_path().into());
    args.push(target.into());
    args
}

async fn codesign(settings: &Settings, target: &Path) -> Result<()> {
    let mut cmd = Command::new("codesign");
    cmd.args(codesign_args(settings, target));
    process::run(&mut cmd).await?;
    log::debug!("Signed {}", target.display());
    Ok(())
}

/// Signs the bundle inside-out and optionally verifies the result.
pub async fn sign_bundle(settings: &Settings, bundle: &Path) -> Result<SigningPlan> {
    let executable = settings.executable_path();
    let plan = SigningPlan::discover_async(bundle, &executable).await?;

    log::info!(
        "Signing {} nested items in {} with identity '{}'",
        plan.nested.len(),
        bundle.display(),
        settings.macos().signing_identity
    );

    for target in plan.ordered() {
        codesign(settings, target).await?;
    }
    log::info!("✓ Signed {}", bundle.display());

    if settings.macos().verify {
        verify_bundle(bundle).await?;
    }

    Ok(plan)
}

/// Runs `codesign --verify --deep --strict` on the sealed bundle.
pub async fn verify_bundle(bundle: &Path) -> Result<()> {
    let mut cmd = Command::new("codesign");
    cmd.args(["--verify", "--deep", "--strict", "--verbose=2"])
        .arg(bundle);
    process::run(&mut cmd).await?;
    log::info!("✓ Signature verified: {}", bundle.display());
    Ok(())
}
