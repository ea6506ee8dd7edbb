//! NDK reconciliation
//!
//! One decision per invocation: with no version requested the NDK home is
//! cleared, otherwise the requested version is installed (if it is not
//! already current) and published. Any failure aborts; nothing is rolled
//! back.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::android::{AndroidSdk, InstallOutcome, NdkInstaller, PackageManager};
use crate::env::publish::{clear_ndk_home, publish_ndk_home};
use crate::env::EnvironmentPort;
use crate::utils::terminal;
use crate::version::NdkVersion;

/// The NDK state the caller asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NdkRequest {
    /// No NDK should be configured
    Unset,
    /// This exact version should be installed
    Version(NdkVersion),
}

impl NdkRequest {
    /// Absent or blank input means no version; anything else must be valid
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(NdkRequest::Unset),
            Some(version) => Ok(NdkRequest::Version(NdkVersion::parse(version)?)),
        }
    }
}

/// Result of a reconciliation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// `ANDROID_NDK_HOME` was cleared
    Cleared,
    /// Nothing to do, the NDK at this path already has the requested version
    AlreadyInstalled(PathBuf),
    /// The requested NDK was installed here and published
    Installed(PathBuf),
}

/// Drives install and publish against one environment
pub struct Reconciler<'a, E: EnvironmentPort + ?Sized> {
    env: &'a mut E,
}

impl<'a, E: EnvironmentPort + ?Sized> Reconciler<'a, E> {
    pub fn new(env: &'a mut E) -> Self {
        Self { env }
    }

    /// Bring the host to `request`
    pub fn reconcile<P: PackageManager + ?Sized>(
        &mut self,
        request: &NdkRequest,
        sdk: &AndroidSdk,
        package_manager: &P,
    ) -> Result<Reconciliation> {
        match request {
            NdkRequest::Unset => self.clear(),
            NdkRequest::Version(version) => self.install(version, sdk, package_manager),
        }
    }

    /// Declare that no NDK is configured
    pub fn clear(&mut self) -> Result<Reconciliation> {
        terminal::print_section("Clearing NDK environment");
        clear_ndk_home(&mut *self.env)?;
        Ok(Reconciliation::Cleared)
    }

    /// Install `version` unless it is already current, then publish it
    pub fn install<P: PackageManager + ?Sized>(
        &mut self,
        version: &NdkVersion,
        sdk: &AndroidSdk,
        package_manager: &P,
    ) -> Result<Reconciliation> {
        terminal::print_section("Installing Android NDK");

        let outcome = NdkInstaller::new(sdk, package_manager)
            .install(version, &*self.env)
            .context("Failed to install new NDK package")?;

        match outcome {
            InstallOutcome::AlreadyInstalled(path) => Ok(Reconciliation::AlreadyInstalled(path)),
            InstallOutcome::Installed(path) => {
                publish_ndk_home(&mut *self.env, &path).context("Failed to publish NDK location")?;
                Ok(Reconciliation::Installed(path))
            }
        }
    }
}
