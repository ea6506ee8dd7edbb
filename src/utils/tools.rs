//! Tool detection
//!
//! Locates executables the step shells out to and turns a missing one into
//! a [`StepError::MissingTool`] with an actionable hint.

use std::path::{Path, PathBuf};

use anyhow::Result;
use which::which;

use crate::error::StepError;

/// Path of a tool on PATH, if it exists
pub fn check_tool(tool_name: &str) -> Option<PathBuf> {
    which(tool_name).ok()
}

/// Require a tool to exist on PATH, return error with hint if missing
pub fn require_tool(tool_name: &str, required_for: &str, hint: &str) -> Result<PathBuf> {
    check_tool(tool_name)
        .ok_or_else(|| StepError::missing_tool(tool_name, required_for, hint).into())
}

/// First candidate path that is an existing file
pub fn find_executable<'a, I>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = &'a Path>,
{
    candidates
        .into_iter()
        .find(|path| path.is_file())
        .map(Path::to_path_buf)
}

/// Platform-specific executable file name (`.bat` wrappers on Windows)
pub fn script_name(base: &str) -> String {
    if cfg!(windows) {
        format!("{}.bat", base)
    } else {
        base.to_string()
    }
}
