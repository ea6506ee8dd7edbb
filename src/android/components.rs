//! SDK licenses and project components
//!
//! Which platforms and build-tools a project needs is decided by the
//! project's own build; this module only prepares the Gradle wrapper,
//! accepts licenses and lets Gradle resolve the rest.

use std::path::Path;

use anyhow::{Context, Result};

use crate::android::sdk::AndroidSdk;
use crate::android::sdkmanager::PackageManager;
use crate::error::{hints, StepError};
use crate::exec::CommandSpec;
use crate::utils::terminal;

/// Ensures the SDK components a project requires are installed
pub trait ComponentEnsurer {
    fn ensure(&self, sdk: &AndroidSdk, gradlew: &Path) -> Result<()>;
}

/// Lets the Android Gradle plugin download missing platforms and build-tools
/// by resolving the project's dependencies.
#[derive(Debug, Default)]
pub struct GradleComponentEnsurer;

impl ComponentEnsurer for GradleComponentEnsurer {
    fn ensure(&self, sdk: &AndroidSdk, gradlew: &Path) -> Result<()> {
        // Absolute, so the wrapper resolves the same from its own directory
        let gradlew = std::fs::canonicalize(gradlew)
            .map_err(|err| StepError::filesystem("resolve", gradlew, err))?;
        let project_dir = gradlew.parent().unwrap_or_else(|| Path::new("/"));

        let spec = CommandSpec::new(&gradlew)
            .arg("dependencies")
            .arg("--stacktrace")
            .env("ANDROID_HOME", sdk.root())
            .env("ANDROID_SDK_ROOT", sdk.root())
            .current_dir(project_dir)
            .stream(terminal::is_verbose());
        let display = spec.display();
        terminal::print_step(&format!("$ {}", display));

        let spinner = (!terminal::is_verbose()).then(|| terminal::create_spinner("Resolving project dependencies"));
        let result = spec.run();
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        let result = result.with_context(|| format!("Failed to run {}", display))?;

        if !result.success {
            return Err(StepError::external_tool(
                "gradlew",
                format!("dependency resolution exited with code {}", result.exit_code),
                result.trimmed_output(),
            )
            .into());
        }

        Ok(())
    }
}

/// Check the Gradle wrapper exists and make it executable
pub fn prepare_gradlew(gradlew: &Path) -> Result<()> {
    if !gradlew.is_file() {
        return Err(StepError::config_error_with_hint(
            format!("gradlew_path: {} does not exist", gradlew.display()),
            hints::gradlew(),
        )
        .into());
    }

    set_executable(gradlew)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o770))
        .map_err(|err| StepError::filesystem("set executable permission on", path, err).into())
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Accept every SDK license so later installs are not blocked on prompts
pub fn accept_licenses<P: PackageManager + ?Sized>(package_manager: &P) -> Result<()> {
    let output = package_manager.accept_licenses()?;
    if let Some(summary) = output.lines().last() {
        terminal::print_step(summary);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::android::installer::tests::FakeSdkManager;

    #[test]
    fn test_missing_gradlew_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = prepare_gradlew(&dir.path().join("gradlew")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StepError>(),
            Some(StepError::Config { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_gradlew_made_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let gradlew = dir.path().join("gradlew");
        std::fs::write(&gradlew, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&gradlew, std::fs::Permissions::from_mode(0o644)).unwrap();

        prepare_gradlew(&gradlew).unwrap();

        let mode = std::fs::metadata(&gradlew).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o770);
    }

    #[test]
    fn test_accept_licenses_runs_package_manager() {
        let dir = tempfile::tempdir().unwrap();
        let manager = FakeSdkManager::new(dir.path());

        accept_licenses(&manager).unwrap();
        assert_eq!(*manager.license_runs.borrow(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_gradle_ensurer_runs_in_project_dir() {
        use std::os::unix::fs::PermissionsExt;

        let project = tempfile::tempdir().unwrap();
        let gradlew = project.path().join("gradlew");
        std::fs::write(
            &gradlew,
            "#!/bin/sh\necho \"$@\" > args.txt\necho \"$ANDROID_SDK_ROOT\" >> args.txt\n",
        )
        .unwrap();
        std::fs::set_permissions(&gradlew, std::fs::Permissions::from_mode(0o755)).unwrap();

        let sdk = AndroidSdk::new("/opt/android-sdk");
        GradleComponentEnsurer.ensure(&sdk, &gradlew).unwrap();

        let recorded = std::fs::read_to_string(project.path().join("args.txt")).unwrap();
        assert_eq!(recorded, "dependencies --stacktrace\n/opt/android-sdk\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_gradle_ensurer_failure_carries_output() {
        use std::os::unix::fs::PermissionsExt;

        let project = tempfile::tempdir().unwrap();
        let gradlew = project.path().join("gradlew");
        std::fs::write(&gradlew, "#!/bin/sh\necho 'BUILD FAILED' >&2\nexit 1\n").unwrap();
        std::fs::set_permissions(&gradlew, std::fs::Permissions::from_mode(0o755)).unwrap();

        let err = GradleComponentEnsurer
            .ensure(&AndroidSdk::new("/opt/android-sdk"), &gradlew)
            .unwrap_err();
        match err.downcast_ref::<StepError>() {
            Some(StepError::ExternalTool { tool, output, .. }) => {
                assert_eq!(tool, "gradlew");
                assert_eq!(output, "BUILD FAILED");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
