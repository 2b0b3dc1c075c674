//! Running texconv as a child process

use super::command::TexconvCommand;
use crate::export::ExportError;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A texconv executable that was found on disk
#[derive(Debug, Clone)]
pub struct Texconv {
    path: PathBuf,
}

impl Texconv {
    /// Check that the configured executable exists
    ///
    /// Nothing is spawned here; a missing tool is reported before any work starts.
    pub fn locate(path: &Path) -> Result<Self, ExportError> {
        if !path.is_file() {
            return Err(ExportError::ToolNotFound(path.to_path_buf()));
        }

        log::debug!("Using texconv at {:?}", path);
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run one conversion and wait for texconv to exit
    ///
    /// Only a failure to start the process is an error here. Exit status and
    /// the presence of the output are recorded in the returned outcome.
    pub fn convert(&self, command: &TexconvCommand) -> Result<ConversionOutcome, ExportError> {
        let mut cmd = Command::new(&self.path);
        cmd.args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        hide_console_window(&mut cmd);

        log::debug!("Converting {:?} into {:?}", command.input(), command.output_dir());
        log::debug!("Running: {:?}", cmd);

        let output = cmd.output().map_err(|source| ExportError::Spawn {
            path: self.path.clone(),
            source,
        })?;

        let expected_output = command.expected_output();
        let produced_file = expected_output.is_file().then(|| expected_output.clone());

        let outcome = ConversionOutcome {
            success: output.status.success(),
            exit_code: output.status.code(),
            expected_output,
            produced_file,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        log::debug!(
            "texconv exited with {:?}, output present: {}",
            outcome.exit_code,
            outcome.produced_file.is_some()
        );
        Ok(outcome)
    }
}

#[cfg(windows)]
fn hide_console_window(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;

    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    cmd.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_cmd: &mut Command) {}

/// Result of a finished texconv process
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// Process exited with status 0
    pub success: bool,

    /// Exit code (None when killed by a signal)
    pub exit_code: Option<i32>,

    /// Path texconv should have written
    pub expected_output: PathBuf,

    /// `expected_output`, if it existed after the process exited
    pub produced_file: Option<PathBuf>,

    /// Captured standard output
    pub stdout: String,

    /// Captured standard error
    pub stderr: String,
}

impl ConversionOutcome {
    /// Text shown to the user when the conversion went wrong
    pub fn diagnostic(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            "Unknown error"
        } else {
            stderr
        }
    }

    /// Turn a non-zero exit into an error
    pub fn ensure_success(&self) -> Result<(), ExportError> {
        if self.success {
            return Ok(());
        }

        Err(ExportError::ConversionFailed {
            code: self.exit_code,
            stderr: self.diagnostic().to_string(),
        })
    }
}
