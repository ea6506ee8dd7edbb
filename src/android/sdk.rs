//! Android SDK location
//!
//! `ANDROID_HOME` is deprecated in favour of `ANDROID_SDK_ROOT`, but when it
//! is defined and points at a usable directory it is still used first, which
//! mirrors how the Android tooling itself resolves the SDK.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::android::ndk::NdkComponent;
use crate::error::{hints, StepError};
use crate::utils::terminal;

/// A resolved Android SDK installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidSdk {
    root: PathBuf,
}

impl AndroidSdk {
    /// Use `root` as the SDK directory without validation
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the SDK from the `ANDROID_HOME` and `ANDROID_SDK_ROOT` values
    pub fn from_env(android_home: &str, android_sdk_root: &str) -> Result<Self> {
        let mut problems = Vec::new();

        for (key, dir) in [("ANDROID_HOME", android_home), ("ANDROID_SDK_ROOT", android_sdk_root)] {
            if dir.is_empty() {
                problems.push(format!("{} is unset or empty", key));
                continue;
            }

            match validate_sdk_root(Path::new(dir)) {
                Ok(root) => {
                    terminal::print_debug(&format!("Android SDK from {}: {}", key, root.display()));
                    return Ok(Self::new(root));
                }
                Err(problem) => {
                    terminal::print_warning(&format!("{}: {}", key, problem));
                    problems.push(format!("{}: {}", key, problem));
                }
            }
        }

        Err(StepError::config_error_with_hint(
            format!("could not locate Android SDK root directory ({})", problems.join("; ")),
            hints::android_sdk(),
        )
        .into())
    }

    /// SDK root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where sdkmanager installs `component` inside this SDK
    pub fn install_path(&self, component: &NdkComponent) -> PathBuf {
        self.root.join(component.install_path_in_sdk())
    }
}

/// Resolve symlinks and check the directory exists
fn validate_sdk_root(dir: &Path) -> std::result::Result<PathBuf, String> {
    let root = fs::canonicalize(dir).map_err(|e| format!("{} ({})", dir.display(), e))?;
    if !root.is_dir() {
        return Err(format!("{} is not a directory", root.display()));
    }
    Ok(root)
}
