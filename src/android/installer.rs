//! NDK installation
//!
//! Exactly one NDK is kept at the canonical location: whatever is found
//! there is removed before the requested version is installed, even when it
//! is neither the previous nor the requested version.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::android::ndk::{current_ndk_home, installed_ndk_version, NdkComponent};
use crate::android::sdk::AndroidSdk;
use crate::android::sdkmanager::PackageManager;
use crate::env::EnvironmentPort;
use crate::error::StepError;
use crate::utils::terminal;
use crate::version::NdkVersion;

/// What the installer did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The requested version was already at the current location
    AlreadyInstalled(PathBuf),
    /// The requested version was installed at this path
    Installed(PathBuf),
}

/// Remove-then-install cycle for one SDK
pub struct NdkInstaller<'a, P: PackageManager + ?Sized> {
    sdk: &'a AndroidSdk,
    package_manager: &'a P,
}

impl<'a, P: PackageManager + ?Sized> NdkInstaller<'a, P> {
    pub fn new(sdk: &'a AndroidSdk, package_manager: &'a P) -> Self {
        Self {
            sdk,
            package_manager,
        }
    }

    /// Make `version` the installed NDK.
    ///
    /// Repeating the call with the same version is a no-op once the
    /// environment points at the installed NDK.
    pub fn install<E: EnvironmentPort + ?Sized>(
        &self,
        version: &NdkVersion,
        env: &E,
    ) -> Result<InstallOutcome> {
        let current_home = current_ndk_home(env);
        let current_version = installed_ndk_version(&current_home);

        if current_version
            .as_deref()
            .is_some_and(|installed| version.matches_revision(installed))
        {
            terminal::print_success(&format!(
                "NDK {} already installed at {}",
                version,
                current_home.display()
            ));
            return Ok(InstallOutcome::AlreadyInstalled(current_home));
        }

        if let Some(current) = &current_version {
            terminal::print_step(&format!("NDK {} found at: {}", current, current_home.display()));
        }

        terminal::print_step("Removing existing NDK...");
        remove_path(&current_home)?;
        terminal::print_step("Done");

        let component = NdkComponent::new(version.clone());
        terminal::print_step(&format!(
            "Installing NDK {} with sdkmanager",
            component.version()
        ));
        self.package_manager
            .install(&component)
            .with_context(|| format!("Failed to install {}", component.package_name()))?;
        terminal::print_step("Done");

        Ok(InstallOutcome::Installed(self.sdk.install_path(&component)))
    }
}

/// Remove a directory tree or file; a missing path is fine
fn remove_path(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(StepError::filesystem("inspect", path, err).into()),
    };

    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match removed {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(StepError::filesystem("remove", path, err).into()),
    }
}
