// src/integrations/xdelta/client.rs
//
// xdelta3 Integration
//
// Handles locating the external diff executable and producing patch
// artifacts with it.
//
// Note: a missing executable is a fatal configuration error, but a failing
// subprocess for one pair is logged and absorbed so the rest of the queue
// still runs.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::{DiffVerbosity, XDELTA_EXECUTABLE_NAME};
use crate::domain::pairing::ResolvedPair;
use crate::error::{AppError, AppResult};

pub struct XdeltaClient {
    executable: PathBuf,
    verbosity: DiffVerbosity,
}

impl XdeltaClient {
    pub fn new(executable: PathBuf, verbosity: DiffVerbosity) -> Self {
        Self {
            executable,
            verbosity,
        }
    }

    /// Basename of the executable as referenced from the update script
    pub fn executable_name(&self) -> String {
        self.executable
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Checks the executable is usable before any patch is attempted
    pub fn verify(&self) -> AppResult<()> {
        if !self.executable.is_file() {
            return Err(AppError::Config(format!(
                "the xdelta3 executable could not be found at '{}'; download the \
                 correct build for your system from the xdelta site or compile it \
                 yourself, then place it next to this program as '{}'",
                self.executable.display(),
                XDELTA_EXECUTABLE_NAME,
            )));
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mode = fs::metadata(&self.executable)?.permissions().mode();
            if mode & 0o111 == 0 {
                return Err(AppError::Config(format!(
                    "the xdelta3 executable at '{}' does not have execution permissions",
                    self.executable.display()
                )));
            }
        }

        Ok(())
    }

    /// Creates one patch artifact in `target_dir`.
    ///
    /// A failing or unstartable subprocess is logged as a warning; the rest
    /// of the queue still runs.
    pub fn create_patch(&self, pair: &ResolvedPair, target_dir: &Path) -> AppResult<()> {
        log::info!(
            "Creating patch: {} -> {}",
            pair.source.full_path.display(),
            pair.target.full_path.display()
        );

        let destination = target_dir.join(&pair.patch_filename);
        let args = self.build_args(
            &pair.source.full_path,
            &pair.target.full_path,
            &destination,
        );

        log::debug!(
            "Starting subprocess, command line: {} {}",
            self.executable.display(),
            args.iter()
                .map(|arg| arg.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        match Command::new(&self.executable).args(&args).status() {
            Ok(status) if !status.success() => {
                log::warn!(
                    "xdelta returned a non-zero status ({status}); this probably means something went wrong"
                );
            }
            Ok(_) => {}
            Err(err) => {
                log::warn!("Starting the xdelta subprocess failed: {err}");
            }
        }

        Ok(())
    }

    /// Copies the executable next to the generated script so the update
    /// script works standalone
    pub fn copy_to(&self, target_dir: &Path) -> AppResult<()> {
        log::debug!("Copying xdelta to the target folder {}.", target_dir.display());
        fs::copy(&self.executable, target_dir.join(self.executable_name()))?;
        Ok(())
    }

    // -e creates a patch, -9 selects maximum compression, -s reads the old file
    fn build_args(&self, source: &Path, target: &Path, destination: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-e".into(), "-9".into()];

        match self.verbosity {
            DiffVerbosity::Verbose => args.push("-v".into()),
            DiffVerbosity::Quiet => args.push("-q".into()),
            DiffVerbosity::Normal => {}
        }

        args.push("-s".into());
        args.push(source.as_os_str().to_owned());
        args.push(target.as_os_str().to_owned());
        args.push(destination.as_os_str().to_owned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(verbosity: DiffVerbosity) -> XdeltaClient {
        XdeltaClient::new(PathBuf::from("/tools/xdelta3.exe"), verbosity)
    }

    fn args_as_strings(client: &XdeltaClient) -> Vec<String> {
        client
            .build_args(
                Path::new("/old/a.mkv"),
                Path::new("/new/a.mkv"),
                Path::new("/out/a.vcdiff"),
            )
            .into_iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_verbose_argument_order() {
        assert_eq!(
            args_as_strings(&client(DiffVerbosity::Verbose)),
            vec!["-e", "-9", "-v", "-s", "/old/a.mkv", "/new/a.mkv", "/out/a.vcdiff"]
        );
    }

    #[test]
    fn test_quiet_argument_order() {
        assert_eq!(
            args_as_strings(&client(DiffVerbosity::Quiet)),
            vec!["-e", "-9", "-q", "-s", "/old/a.mkv", "/new/a.mkv", "/out/a.vcdiff"]
        );
    }

    #[test]
    fn test_normal_verbosity_forwards_no_flag() {
        assert_eq!(
            args_as_strings(&client(DiffVerbosity::Normal)),
            vec!["-e", "-9", "-s", "/old/a.mkv", "/new/a.mkv", "/out/a.vcdiff"]
        );
    }

    #[test]
    fn test_verify_rejects_a_missing_executable() {
        let dir = tempfile::tempdir().unwrap();
        let client = XdeltaClient::new(dir.path().join("gone.exe"), DiffVerbosity::Normal);

        assert!(matches!(client.verify(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_executable_name_is_the_basename() {
        assert_eq!(
            client(DiffVerbosity::Normal).executable_name(),
            "xdelta3.exe"
        );
    }
}
