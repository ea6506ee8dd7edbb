//! NDK command - only the NDK reconciliation
//!
//! Usage:
//!   install-android-tools ndk --ndk-version 23.1.7779620   # install if needed
//!   install-android-tools ndk                              # clear ANDROID_NDK_HOME

use anyhow::{Context, Result};
use clap::Args;

use super::{ExportArgs, SdkArgs};
use crate::android::SdkManager;
use crate::reconcile::{NdkRequest, Reconciler, Reconciliation};
use crate::utils::terminal;

/// Install the requested NDK, or clear the NDK environment
#[derive(Args, Debug)]
pub struct NdkCommand {
    /// NDK version to install, e.g. 23.1.7779620; empty clears ANDROID_NDK_HOME
    #[arg(long, env = "ndk_version")]
    pub ndk_version: Option<String>,

    #[command(flatten)]
    pub sdk: SdkArgs,

    #[command(flatten)]
    pub export: ExportArgs,
}

impl NdkCommand {
    /// Execute the ndk command
    pub fn execute(self, _verbose: bool) -> Result<()> {
        let request = NdkRequest::parse(self.ndk_version.as_deref()).context("Invalid step input")?;
        let mut env = self.export.environment()?;
        self.sdk.apply(&mut env)?;
        let mut reconciler = Reconciler::new(&mut env);

        // The SDK is only needed when something gets installed
        let result = match &request {
            NdkRequest::Unset => reconciler.clear()?,
            NdkRequest::Version(version) => {
                let sdk = self.sdk.resolve()?;
                let sdk_manager =
                    SdkManager::new(&sdk).context("Failed to initialize Android SDK")?;
                reconciler.install(version, &sdk, &sdk_manager)?
            }
        };

        println!();
        match result {
            Reconciliation::Cleared => terminal::print_success("NDK environment cleared"),
            Reconciliation::AlreadyInstalled(path) => {
                terminal::print_success(&format!("NDK unchanged at {}", path.display()))
            }
            Reconciliation::Installed(path) => {
                terminal::print_success(&format!("NDK installed at {}", path.display()))
            }
        }
        Ok(())
    }
}
