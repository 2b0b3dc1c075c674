//! Failures of an export, one variant per step that can go wrong

use crate::host::HostError;
use std::io;
use std::path::PathBuf;

/// Reasons an export ends without a DDS file at the destination
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The user dismissed the options or the save dialog
    #[error("Export cancelled")]
    Cancelled,

    /// The export procedure was triggered while one was already running
    #[error("A DDS export is already in progress")]
    Busy,

    #[error("texconv.exe not found at path: {}", .0.display())]
    ToolNotFound(PathBuf),

    #[error("Temporary file save error: could not create a file in {}: {source}", .dir.display())]
    TempFile {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The host could not write the image as PNG
    #[error("Temporary file save error: PNG save error: {0}")]
    Staging(#[from] HostError),

    #[error("Failed to start texconv at {}: {source}", .path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("texconv exited with {}:\n{stderr}", exit_label(.code))]
    ConversionFailed { code: Option<i32>, stderr: String },

    /// Exit status was 0 but the expected file is not there
    #[error("texconv did not produce a file:\n{stderr}")]
    OutputMissing { expected: PathBuf, stderr: String },

    #[error("Failed to move {} to {}: {source}", .from.display(), .to.display())]
    RelocationFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    /// Cancellation ends the export quietly, everything else is reported
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExportError::Cancelled)
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "no exit status (terminated by signal)".to_string(),
    }
}
