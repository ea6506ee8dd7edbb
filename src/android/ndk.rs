//! Android NDK location and installed-version detection
//!
//! Detection always targets the legacy flat `ndk-bundle` layout (or an
//! explicit `ANDROID_NDK_HOME`), even though new installs land in the
//! versioned `<sdk>/ndk/<version>` directory. Older Android Gradle Plugin
//! versions still read the legacy location, so both paths are kept.

use std::fs;
use std::path::{Path, PathBuf};

use crate::env::{EnvironmentPort, ANDROID_HOME, ANDROID_NDK_HOME, ANDROID_SDK_ROOT, HOME};
use crate::version::NdkVersion;

/// Legacy NDK directory name inside the SDK (or home) directory
pub const NDK_BUNDLE_DIR: &str = "ndk-bundle";

/// Metadata file every NDK package ships at its root
pub const SOURCE_PROPERTIES: &str = "source.properties";

const REVISION_KEY: &str = "pkg.revision";

/// The side-by-side NDK package for one version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdkComponent {
    version: NdkVersion,
}

impl NdkComponent {
    pub fn new(version: NdkVersion) -> Self {
        Self { version }
    }

    pub fn version(&self) -> &NdkVersion {
        &self.version
    }

    /// sdkmanager package name, e.g. `ndk;23.1.7779620`
    pub fn package_name(&self) -> String {
        format!("ndk;{}", self.version)
    }

    /// Install directory relative to the SDK root, e.g. `ndk/23.1.7779620`
    pub fn install_path_in_sdk(&self) -> PathBuf {
        Path::new("ndk").join(self.version.as_str())
    }
}

type PathTransform = fn(&str) -> PathBuf;

fn as_is(value: &str) -> PathBuf {
    PathBuf::from(value)
}

fn ndk_bundle_in(value: &str) -> PathBuf {
    Path::new(value).join(NDK_BUNDLE_DIR)
}

/// Where to look for the current NDK, highest precedence first.
///
/// `ANDROID_HOME` is deprecated but still wins over `ANDROID_SDK_ROOT` here;
/// do not reorder.
const LOCATION_PRECEDENCE: &[(&str, PathTransform)] = &[
    (ANDROID_NDK_HOME, as_is),
    (ANDROID_HOME, ndk_bundle_in),
    (ANDROID_SDK_ROOT, ndk_bundle_in),
    (HOME, ndk_bundle_in),
];

/// The NDK location currently considered authoritative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdkLocation {
    pub path: PathBuf,
    /// Variable that decided the location, `None` for the bare fallback
    pub source: Option<&'static str>,
}

/// Resolve the current NDK location from the environment.
///
/// Never touches the filesystem; the result may not exist.
pub fn resolve_ndk_location<E: EnvironmentPort + ?Sized>(env: &E) -> NdkLocation {
    LOCATION_PRECEDENCE
        .iter()
        .find_map(|(key, transform)| {
            let value = env.get(key);
            (!value.is_empty()).then(|| NdkLocation {
                path: transform(&value),
                source: Some(*key),
            })
        })
        .unwrap_or_else(|| NdkLocation {
            path: PathBuf::from(NDK_BUNDLE_DIR),
            source: None,
        })
}

/// Path of the current NDK home
pub fn current_ndk_home<E: EnvironmentPort + ?Sized>(env: &E) -> PathBuf {
    resolve_ndk_location(env).path
}

/// Revision of the NDK installed at `ndk_home`.
///
/// A missing or unreadable `source.properties` is the normal state of a
/// fresh host and yields `None`.
pub fn installed_ndk_version(ndk_home: &Path) -> Option<String> {
    let properties_path = ndk_home.join(SOURCE_PROPERTIES);
    let content = fs::read_to_string(properties_path).ok()?;
    parse_revision(&content)
}

/// Extract `Pkg.Revision` from `source.properties` content.
///
/// Keys compare case-insensitively, the value is everything after the first
/// `=`. Only the first revision line counts, and an empty value is no value.
pub fn parse_revision(content: &str) -> Option<String> {
    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(REVISION_KEY))
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
