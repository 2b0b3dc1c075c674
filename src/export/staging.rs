//! Temporary files owned by one export: the staged PNG and texconv's output

use super::ExportError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempPath;

const PREFIX: &str = "dds-export-";
const SUFFIX: &str = ".png";

/// Intermediate PNG owned by one export
///
/// The file is removed when the artifact is dropped, whichever way the export
/// ends. A failed removal is logged and otherwise ignored.
#[derive(Debug)]
pub struct IntermediateArtifact {
    path: Option<TempPath>,
}

impl IntermediateArtifact {
    /// Create an empty, uniquely named `.png` file in `dir`
    pub fn create_in(dir: &Path) -> Result<Self, ExportError> {
        let file = tempfile::Builder::new()
            .prefix(PREFIX)
            .suffix(SUFFIX)
            .tempfile_in(dir)
            .map_err(|source| ExportError::TempFile {
                dir: dir.to_path_buf(),
                source,
            })?;

        // Drop the handle so the host can reopen the path for writing
        let path = file.into_temp_path();
        log::debug!("Staging image at {:?}", &*path);

        Ok(Self { path: Some(path) })
    }

    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }
}

impl Drop for IntermediateArtifact {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };

        let shown = path.to_path_buf();
        match path.close() {
            Ok(()) => log::debug!("Removed intermediate file {:?}", shown),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not remove intermediate file {:?}: {}", shown, e),
        }
    }
}

/// texconv's output in the destination folder, removed on drop unless delivered
///
/// Covers the cases where texconv writes its file and then fails, or where
/// the final move does not happen.
#[derive(Debug)]
pub struct PendingOutput {
    path: Option<PathBuf>,
}

impl PendingOutput {
    pub fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn path(&self) -> &Path {
        self.path.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// The file has been moved to the destination, leave it alone
    pub fn disarm(mut self) {
        self.path = None;
    }
}

impl Drop for PendingOutput {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };

        match fs::remove_file(&path) {
            Ok(()) => log::debug!("Removed leftover texconv output {:?}", path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not remove texconv output {:?}: {}", path, e),
        }
    }
}
