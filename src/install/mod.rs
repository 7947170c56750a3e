// Dependency capability check and pip-backed installer

use crate::error::{HandlerError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Import name of the remote web client package.
pub const WEB_CLIENT_MODULE: &str = "gemini_webapi";
/// Pinned install spec of the remote web client package.
pub const WEB_CLIENT_SPEC_PINNED: &str = "gemini_webapi==1.18.1";
/// Import name of the browser cookie extraction package.
pub const COOKIE_MODULE: &str = "browser_cookie3";
/// Install spec of the browser cookie extraction package (upstream does
/// not pin it).
pub const COOKIE_SPEC: &str = "browser-cookie3";

/// Capability check and installation of the external client packages.
pub trait DependencyProvider: Send + Sync {
    /// Whether both required packages are importable from the configured
    /// package directory. No side effects.
    fn is_installed(&self) -> bool;

    /// Install the packages into the configured package directory.
    /// Failures are the installer's to report and are passed through.
    fn install(&self) -> Result<()>;
}

/// Installs the client packages with pip into a plugin-local directory.
pub struct PipInstaller {
    package_dir: PathBuf,
    pinned: bool,
}

impl PipInstaller {
    pub fn new(package_dir: impl AsRef<Path>, pinned: bool) -> Self {
        Self {
            package_dir: package_dir.as_ref().to_path_buf(),
            pinned,
        }
    }

    /// Install specs for the two required packages under the current
    /// pinning policy.
    pub fn package_specs(&self) -> [&'static str; 2] {
        if self.pinned {
            [WEB_CLIENT_SPEC_PINNED, COOKIE_SPEC]
        } else {
            [WEB_CLIENT_MODULE, COOKIE_SPEC]
        }
    }

    fn module_importable(&self, module: &str) -> bool {
        Command::new("python3")
            .args(["-c", &format!("import {}", module)])
            .env("PYTHONPATH", &self.package_dir)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn pip_install(&self, spec: &str) -> Result<()> {
        info!("Installing {} into {}", spec, self.package_dir.display());
        let output = Command::new("python3")
            .args(["-m", "pip", "install", "--target"])
            .arg(&self.package_dir)
            .arg(spec)
            .output()
            .map_err(|err| HandlerError::Install(format!("could not run pip: {}", err)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HandlerError::Install(format!(
                "pip install {} failed: {}",
                spec,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

impl DependencyProvider for PipInstaller {
    fn is_installed(&self) -> bool {
        let installed =
            self.module_importable(WEB_CLIENT_MODULE) && self.module_importable(COOKIE_MODULE);
        debug!("Dependency check: installed={}", installed);
        installed
    }

    fn install(&self) -> Result<()> {
        std::fs::create_dir_all(&self.package_dir)?;
        for spec in self.package_specs() {
            self.pip_install(spec)?;
        }
        Ok(())
    }
}
