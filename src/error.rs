//! Error types and helpers for user-friendly error messages
//!
//! Every fatal condition of the step ends up as a [`StepError`] somewhere in
//! an `anyhow` chain. The outer contexts name the phase that failed, the
//! `StepError` carries the hint and any captured tool output.

use std::path::PathBuf;

use thiserror::Error;

/// Step failures, grouped by what went wrong
#[derive(Error, Debug)]
pub enum StepError {
    /// Invalid or missing input, raised before anything is mutated
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        hint: Option<String>,
    },

    /// A filesystem mutation failed
    #[error("Failed to {action} {}", path.display())]
    Filesystem {
        action: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An external tool exited with an error
    #[error("{tool} failed: {message}")]
    ExternalTool {
        tool: String,
        message: String,
        output: String,
    },

    /// Tool/executable not found
    #[error("Missing tool: {tool}")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },
}

impl StepError {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            hint: None,
        }
    }

    /// Create a configuration error with a hint
    pub fn config_error_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create a filesystem error
    pub fn filesystem(
        action: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Filesystem {
            action: action.into(),
            path: path.into(),
            source,
        }
    }

    /// Create an external tool error carrying the captured output
    pub fn external_tool(
        tool: impl Into<String>,
        message: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self::ExternalTool {
            tool: tool.into(),
            message: message.into(),
            output: output.into(),
        }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    /// Print hint and captured output, if any
    pub fn display_details(&self) {
        use console::style;

        match self {
            StepError::Config { hint: Some(h), .. } => {
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
            }
            StepError::MissingTool {
                required_for, hint, ..
            } => {
                eprintln!("\n{} {}", style("REQUIRED FOR:").cyan().bold(), required_for);
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
            }
            StepError::ExternalTool { output, .. } if !output.trim().is_empty() => {
                eprintln!("\n{}", style("OUTPUT:").cyan().bold());
                for line in output.lines() {
                    eprintln!("  {}", line);
                }
            }
            _ => {}
        }
    }
}

/// Report a fatal error: the phase chain first, then details of the root cause
pub fn report(err: &anyhow::Error) {
    use console::style;

    eprintln!("\n{} {:#}", style("ERROR:").red().bold(), err);

    if let Some(step_error) = err.chain().find_map(|e| e.downcast_ref::<StepError>()) {
        step_error.display_details();
    }

    eprintln!();
}

/// Common error hints
pub mod hints {
    /// Hint for an NDK version that does not parse
    pub fn ndk_version() -> &'static str {
        "This should be the full version number, such as 23.0.7599858.\n\
         To see all available versions, run 'sdkmanager --list'"
    }

    /// Hint for a missing Android SDK
    pub fn android_sdk() -> &'static str {
        "Set ANDROID_SDK_ROOT (preferred) or ANDROID_HOME to the Android SDK directory,\n\
         or pass --android-sdk-root / --android-home."
    }

    /// Hint for a missing sdkmanager
    pub fn sdkmanager() -> &'static str {
        "Install the Android SDK Command-line Tools:\n\
         • Android Studio: Tools → SDK Manager → SDK Tools → 'Android SDK Command-line Tools'\n\
         • Or unpack commandlinetools into <sdk>/cmdline-tools/latest"
    }

    /// Hint for a missing envman
    pub fn envman() -> &'static str {
        "envman is needed to pass environment variables to later steps.\n\
         Install it from https://github.com/bitrise-io/envman,\n\
         or pass --export-file <PATH> to write the variables to a dotenv file instead."
    }

    /// Hint for a missing Gradle wrapper
    pub fn gradlew() -> &'static str {
        "Point --gradlew-path (or $gradlew_path) at the project's Gradle wrapper,\n\
         usually ./gradlew in the project root."
    }
}
