//! Run command - the whole build step
//!
//! Sequence: validate inputs, make gradlew executable, locate the SDK,
//! reconcile the NDK, accept licenses, let Gradle ensure the project's SDK
//! components.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::{ExportArgs, SdkArgs};
use crate::android::components::{accept_licenses, prepare_gradlew};
use crate::android::{ComponentEnsurer, GradleComponentEnsurer, SdkManager};
use crate::reconcile::{NdkRequest, Reconciler};
use crate::utils::terminal;

/// Install the requested NDK and the SDK components the project needs
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Path to the project's Gradle wrapper
    #[arg(long, env = "gradlew_path")]
    pub gradlew_path: PathBuf,

    /// NDK version to install, e.g. 23.1.7779620; empty clears ANDROID_NDK_HOME
    #[arg(long, env = "ndk_version")]
    pub ndk_version: Option<String>,

    #[command(flatten)]
    pub sdk: SdkArgs,

    #[command(flatten)]
    pub export: ExportArgs,
}

impl RunCommand {
    /// Execute the run command
    pub fn execute(self, _verbose: bool) -> Result<()> {
        terminal::print_section("Configuration");
        terminal::print_config_entry("gradlew_path", &self.gradlew_path.display().to_string());
        terminal::print_config_entry("ndk_version", self.ndk_version.as_deref().unwrap_or_default());
        self.sdk.print();
        self.export.print();

        // Everything that can be rejected is rejected before the host changes
        let request = NdkRequest::parse(self.ndk_version.as_deref()).context("Invalid step input")?;
        let mut env = self.export.environment()?;
        self.sdk.apply(&mut env)?;

        terminal::print_section("Preparation");
        terminal::print_step("Set executable permission for gradlew");
        prepare_gradlew(&self.gradlew_path)
            .context("Failed to set executable permission for gradlew")?;

        terminal::print_section("Initialize Android SDK");
        let sdk = self.sdk.resolve()?;
        terminal::print_step(&format!("Android SDK: {}", sdk.root().display()));
        let sdk_manager = SdkManager::new(&sdk).context("Failed to initialize Android SDK")?;

        Reconciler::new(&mut env).reconcile(&request, &sdk, &sdk_manager)?;

        terminal::print_section("Ensure android licences");
        accept_licenses(&sdk_manager).context("Failed to ensure android licences")?;

        terminal::print_section("Ensure required Android SDK components");
        GradleComponentEnsurer
            .ensure(&sdk, &self.gradlew_path)
            .context("Failed to ensure android components")?;

        println!();
        terminal::print_success("Required SDK components are installed");
        Ok(())
    }
}
