use super::ExportOptions;
use std::path::{Path, PathBuf};

/// Everything needed to run one export, built after both dialogs were confirmed
#[derive(Debug)]
pub struct ExportRequest<'a, I> {
    /// Image handle owned by the host
    pub image: &'a I,

    /// Final `.dds` path chosen by the user
    pub destination: PathBuf,

    /// Options from the export dialog
    pub options: ExportOptions,
}

impl<'a, I> ExportRequest<'a, I> {
    pub fn new(image: &'a I, destination: PathBuf, options: ExportOptions) -> Self {
        Self {
            image,
            destination,
            options,
        }
    }

    /// Directory texconv writes into (`-o`)
    ///
    /// A bare file name resolves to the current directory so the argument is never empty.
    pub fn output_dir(&self) -> &Path {
        match self.destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}
