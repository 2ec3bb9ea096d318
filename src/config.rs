// src/config.rs
//
// Runtime Configuration
//
// Resolved once from the command line and passed into the services.
// No ambient global state.

use chrono::Local;
use std::env;
use std::path::PathBuf;

use crate::services::naming_service::DEFAULT_PATCH_NAME_TEMPLATE;

/// Name of the diff executable searched next to the program by default
pub const XDELTA_EXECUTABLE_NAME: &str = "xdelta3.exe";

/// How chatty the external diff tool should be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffVerbosity {
    /// Forward `-v`
    Verbose,
    /// Forward nothing
    Normal,
    /// Forward `-q`
    Quiet,
}

#[derive(Debug, Clone)]
pub struct PatchConfig {
    /// Naming template for generated patch artifacts
    pub patch_name_template: String,

    /// Location of the external xdelta3 executable
    pub xdelta_location: PathBuf,

    /// Verbosity forwarded to the diff tool
    pub diff_verbosity: DiffVerbosity,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            patch_name_template: DEFAULT_PATCH_NAME_TEMPLATE.to_string(),
            xdelta_location: default_xdelta_location(),
            diff_verbosity: DiffVerbosity::Verbose,
        }
    }
}

/// `xdelta3.exe` in the same directory as this executable, falling back to
/// the bare name when the executable path cannot be resolved
pub fn default_xdelta_location() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(XDELTA_EXECUTABLE_NAME)))
        .unwrap_or_else(|| PathBuf::from(XDELTA_EXECUTABLE_NAME))
}

/// Date-stamped `batch-...` folder under the current working directory
pub fn default_output_folder() -> PathBuf {
    PathBuf::from(format!("batch-{}", Local::now().format("%Y-%m-%d-%H-%M")))
}
