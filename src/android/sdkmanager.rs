//! sdkmanager wrapper
//!
//! Installs SDK packages and accepts licenses by driving the command-line
//! `sdkmanager` that ships with the SDK.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::android::ndk::NdkComponent;
use crate::android::sdk::AndroidSdk;
use crate::error::{hints, StepError};
use crate::exec::{yes_answers, CommandSpec};
use crate::utils::terminal;
use crate::utils::tools::{find_executable, script_name};

/// Enough answers for every license prompt sdkmanager currently shows
const LICENSE_ANSWERS: usize = 32;

/// Package manager operations the step depends on
pub trait PackageManager {
    /// Install `component`, returning the tool's trimmed output
    fn install(&self, component: &NdkComponent) -> Result<String>;

    /// Accept all SDK licenses, returning the tool's trimmed output
    fn accept_licenses(&self) -> Result<String>;
}

/// The SDK's own sdkmanager
#[derive(Debug, Clone)]
pub struct SdkManager {
    sdk_root: PathBuf,
    binary: PathBuf,
}

impl SdkManager {
    /// Locate sdkmanager inside `sdk`
    pub fn new(sdk: &AndroidSdk) -> Result<Self> {
        let (binary, legacy) = Self::find_sdkmanager(sdk.root()).ok_or_else(|| {
            StepError::missing_tool(
                "sdkmanager",
                format!("installing packages into {}", sdk.root().display()),
                hints::sdkmanager(),
            )
        })?;

        if legacy {
            terminal::print_warning(&format!(
                "Using legacy sdkmanager from SDK Tools: {}",
                binary.display()
            ));
        } else {
            terminal::print_debug(&format!("sdkmanager: {}", binary.display()));
        }

        Ok(Self {
            sdk_root: sdk.root().to_path_buf(),
            binary,
        })
    }

    /// Find sdkmanager: cmdline-tools/latest, any versioned cmdline-tools,
    /// then the legacy tools/ directory. The flag is true for the legacy one.
    fn find_sdkmanager(sdk_root: &Path) -> Option<(PathBuf, bool)> {
        let exe_name = script_name("sdkmanager");
        let cmdline_tools = sdk_root.join("cmdline-tools");

        let mut candidates = vec![cmdline_tools.join("latest").join("bin").join(&exe_name)];

        // Newest versioned directory first
        if let Ok(entries) = fs::read_dir(&cmdline_tools) {
            let mut versioned: Vec<PathBuf> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.file_name().is_some_and(|name| name != "latest"))
                .collect();
            versioned.sort();
            versioned.reverse();
            candidates.extend(versioned.into_iter().map(|dir| dir.join("bin").join(&exe_name)));
        }

        if let Some(found) = find_executable(candidates.iter().map(PathBuf::as_path)) {
            return Some((found, false));
        }

        let legacy = sdk_root.join("tools").join("bin").join(&exe_name);
        find_executable([legacy.as_path()]).map(|found| (found, true))
    }

    fn run(&self, args: &[&str], activity: &str) -> Result<String> {
        let mut spec = CommandSpec::new(&self.binary)
            .env("ANDROID_SDK_ROOT", &self.sdk_root)
            .env("ANDROID_HOME", &self.sdk_root)
            .stdin(yes_answers(LICENSE_ANSWERS))
            .stream(terminal::is_verbose());
        for arg in args {
            spec = spec.arg(*arg);
        }
        let display = spec.display();
        terminal::print_debug(&format!("$ {}", display));

        let spinner = (!terminal::is_verbose()).then(|| terminal::create_spinner(activity));
        let result = spec.run();
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        let result = result.with_context(|| format!("Failed to run {}", display))?;

        terminal::print_debug(&format!(
            "sdkmanager finished in {:.1}s",
            result.duration.as_secs_f64()
        ));

        let output = result.trimmed_output();
        if !result.success {
            return Err(StepError::external_tool(
                "sdkmanager",
                format!("{} exited with code {}", activity, result.exit_code),
                output,
            )
            .into());
        }

        Ok(result.stdout.trim().to_string())
    }
}

impl PackageManager for SdkManager {
    fn install(&self, component: &NdkComponent) -> Result<String> {
        let package = component.package_name();
        self.run(&[package.as_str()], &format!("Installing {}", package))
    }

    fn accept_licenses(&self) -> Result<String> {
        self.run(&["--licenses"], "Accepting SDK licenses")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::NdkVersion;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_find_prefers_latest_cmdline_tools() {
        let sdk = tempfile::tempdir().unwrap();
        let exe = script_name("sdkmanager");
        let latest = sdk.path().join("cmdline-tools/latest/bin").join(&exe);
        let versioned = sdk.path().join("cmdline-tools/9.0/bin").join(&exe);
        let legacy = sdk.path().join("tools/bin").join(&exe);
        touch(&latest);
        touch(&versioned);
        touch(&legacy);

        assert_eq!(SdkManager::find_sdkmanager(sdk.path()), Some((latest.clone(), false)));

        fs::remove_file(&latest).unwrap();
        assert_eq!(SdkManager::find_sdkmanager(sdk.path()), Some((versioned.clone(), false)));

        fs::remove_file(&versioned).unwrap();
        assert_eq!(SdkManager::find_sdkmanager(sdk.path()), Some((legacy, true)));
    }

    #[test]
    fn test_find_newest_versioned_cmdline_tools() {
        let sdk = tempfile::tempdir().unwrap();
        let exe = script_name("sdkmanager");
        let older = sdk.path().join("cmdline-tools/8.0/bin").join(&exe);
        let newer = sdk.path().join("cmdline-tools/9.0/bin").join(&exe);
        touch(&older);
        touch(&newer);

        assert_eq!(SdkManager::find_sdkmanager(sdk.path()), Some((newer, false)));
    }

    #[test]
    fn test_missing_sdkmanager_is_missing_tool() {
        let sdk = tempfile::tempdir().unwrap();
        let err = SdkManager::new(&AndroidSdk::new(sdk.path())).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StepError>(),
            Some(StepError::MissingTool { .. })
        ));
    }

    #[cfg(unix)]
    fn fake_sdkmanager(sdk: &Path, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = sdk.join("cmdline-tools/latest/bin/sdkmanager");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_install_passes_package_name() {
        let sdk = tempfile::tempdir().unwrap();
        fake_sdkmanager(
            sdk.path(),
            "#!/bin/sh\necho \"  installed $1 into $ANDROID_SDK_ROOT  \"\n",
        );
        let manager = SdkManager::new(&AndroidSdk::new(sdk.path())).unwrap();
        let component = NdkComponent::new(NdkVersion::parse("22.1.7171670").unwrap());

        let output = manager.install(&component).unwrap();
        assert_eq!(
            output,
            format!("installed ndk;22.1.7171670 into {}", sdk.path().display())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_install_failure_carries_output() {
        let sdk = tempfile::tempdir().unwrap();
        fake_sdkmanager(
            sdk.path(),
            "#!/bin/sh\necho 'Warning: Failed to find package ndk;0.0.1'\nexit 1\n",
        );
        let manager = SdkManager::new(&AndroidSdk::new(sdk.path())).unwrap();
        let component = NdkComponent::new(NdkVersion::parse("0.0.1").unwrap());

        let err = manager.install(&component).unwrap_err();
        match err.downcast_ref::<StepError>() {
            Some(StepError::ExternalTool { tool, output, .. }) => {
                assert_eq!(tool, "sdkmanager");
                assert_eq!(output, "Warning: Failed to find package ndk;0.0.1");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
