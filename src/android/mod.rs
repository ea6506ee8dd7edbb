//! Android SDK and NDK management

pub mod components;
pub mod installer;
pub mod ndk;
pub mod sdk;
pub mod sdkmanager;

pub use components::{ComponentEnsurer, GradleComponentEnsurer};
pub use installer::{InstallOutcome, NdkInstaller};
pub use ndk::{installed_ndk_version, resolve_ndk_location};
pub use sdk::AndroidSdk;
pub use sdkmanager::{PackageManager, SdkManager};
