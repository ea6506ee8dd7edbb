//! Publishing the NDK location to later steps

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{EnvironmentPort, ANDROID_NDK_HOME, PATH};
use crate::utils::terminal;

/// `PATH` with `entry` appended; existing entries are kept as they are
pub fn append_to_path(path: &str, entry: &Path) -> Result<String> {
    let mut entries: Vec<PathBuf> = if path.is_empty() {
        Vec::new()
    } else {
        env::split_paths(path).collect()
    };
    entries.push(entry.to_path_buf());

    let joined = env::join_paths(entries)
        .with_context(|| format!("Cannot add {} to PATH", entry.display()))?;
    Ok(joined.to_string_lossy().into_owned())
}

/// Append the new NDK to `PATH` and point `ANDROID_NDK_HOME` at it
///
/// A stale `PATH` entry for a removed NDK is left in place; lookups go
/// through `ANDROID_NDK_HOME` first. Both values are computed before either
/// is exported, and the live process only changes once the export succeeded.
pub fn publish_ndk_home<E: EnvironmentPort + ?Sized>(env: &mut E, ndk_home: &Path) -> Result<()> {
    terminal::print_step("Append NDK folder to $PATH");
    let path = append_to_path(&env.get(PATH), ndk_home)?;
    let ndk_home = ndk_home.to_string_lossy();

    env.export_all(&[(PATH, path.as_str()), (ANDROID_NDK_HOME, &*ndk_home)])
        .with_context(|| format!("Failed to export PATH and {}", ANDROID_NDK_HOME))?;
    env.set(PATH, &path)?;
    env.set(ANDROID_NDK_HOME, &ndk_home)?;
    terminal::print_step(&format!("Exported ${}: {}", ANDROID_NDK_HOME, ndk_home));

    Ok(())
}

/// Declare "no NDK configured": unset in this process and export as empty
pub fn clear_ndk_home<E: EnvironmentPort + ?Sized>(env: &mut E) -> Result<()> {
    terminal::print_step(&format!("Unset {}", ANDROID_NDK_HOME));
    env.set(ANDROID_NDK_HOME, "")
        .context("Failed to unset environment variable")?;
    env.export(ANDROID_NDK_HOME, "")
        .context("Failed to set environment variable")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::memory::MemoryEnvironment;

    #[test]
    fn test_append_to_path() {
        assert_eq!(append_to_path("", Path::new("/ndk")).unwrap(), "/ndk");
        if cfg!(unix) {
            assert_eq!(
                append_to_path("/usr/bin:/old/ndk", Path::new("/ndk")).unwrap(),
                "/usr/bin:/old/ndk:/ndk"
            );
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_append_rejects_entry_with_separator() {
        assert!(append_to_path("/usr/bin", Path::new("/sdk:evil/ndk")).is_err());
    }

    #[test]
    fn test_failed_export_leaves_environment_untouched() {
        let mut env = MemoryEnvironment::new()
            .with(PATH, "/usr/bin")
            .failing_exports();

        assert!(publish_ndk_home(&mut env, Path::new("/sdk/ndk/22.1.7171670")).is_err());

        assert!(env.exported.is_empty());
        assert_eq!(env.get(PATH), "/usr/bin");
        assert!(!env.is_set(ANDROID_NDK_HOME));
    }

    #[cfg(unix)]
    #[test]
    fn test_publish_exports_path_then_ndk_home() {
        let mut env = MemoryEnvironment::new().with(PATH, "/usr/bin:/sdk/ndk-bundle");

        publish_ndk_home(&mut env, Path::new("/sdk/ndk/22.1.7171670")).unwrap();

        assert_eq!(
            env.exported,
            vec![
                (PATH.to_string(), "/usr/bin:/sdk/ndk-bundle:/sdk/ndk/22.1.7171670".to_string()),
                (ANDROID_NDK_HOME.to_string(), "/sdk/ndk/22.1.7171670".to_string()),
            ]
        );
        assert_eq!(env.get(ANDROID_NDK_HOME), "/sdk/ndk/22.1.7171670");
        assert_eq!(env.get(PATH), "/usr/bin:/sdk/ndk-bundle:/sdk/ndk/22.1.7171670");
    }

    #[test]
    fn test_clear_without_previous_value() {
        let mut env = MemoryEnvironment::new();

        clear_ndk_home(&mut env).unwrap();

        assert!(!env.is_set(ANDROID_NDK_HOME));
        assert_eq!(env.exported_value(ANDROID_NDK_HOME), Some(""));
    }

    #[test]
    fn test_clear_existing_value() {
        let mut env = MemoryEnvironment::new().with(ANDROID_NDK_HOME, "/sdk/ndk-bundle");

        clear_ndk_home(&mut env).unwrap();

        assert_eq!(env.get(ANDROID_NDK_HOME), "");
        assert_eq!(env.exported, vec![(ANDROID_NDK_HOME.to_string(), String::new())]);
    }
}
