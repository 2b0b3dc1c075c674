//! Destination path handling

use super::ExportError;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension enforced on the chosen destination
pub const DDS_EXTENSION: &str = ".dds";

/// Append `.dds` unless the file name already ends with it (any case)
pub fn ensure_dds_extension(path: PathBuf) -> PathBuf {
    let has_extension = path
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(DDS_EXTENSION))
        .unwrap_or(false);

    if has_extension {
        return path;
    }

    let mut raw: OsString = path.into_os_string();
    raw.push(DDS_EXTENSION);
    PathBuf::from(raw)
}

/// Move the converted file over the destination
///
/// An existing file at `to` is always replaced.
pub fn relocate(from: &Path, to: &Path) -> Result<(), ExportError> {
    fs::rename(from, to).map_err(|source| ExportError::RelocationFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;

    log::debug!("Moved {:?} to {:?}", from, to);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_appends_once() {
        assert_eq!(ensure_dds_extension(PathBuf::from("out/tex")), PathBuf::from("out/tex.dds"));
        assert_eq!(ensure_dds_extension(PathBuf::from("out/tex.png")), PathBuf::from("out/tex.png.dds"));
        assert_eq!(
            ensure_dds_extension(ensure_dds_extension(PathBuf::from("tex"))),
            PathBuf::from("tex.dds")
        );
    }

    #[test]
    fn test_keeps_existing_extension_any_case() {
        for name in ["a/tex.dds", "a/tex.DDS", "a/tex.Dds"] {
            assert_eq!(ensure_dds_extension(PathBuf::from(name)), PathBuf::from(name));
        }
    }

    #[test]
    fn test_relocate_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("tmp.DDS");
        let to = dir.path().join("final.dds");
        fs::write(&from, b"new").unwrap();
        fs::write(&to, b"old").unwrap();

        relocate(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read(&to).unwrap(), b"new");
    }

    #[test]
    fn test_relocate_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = relocate(&dir.path().join("gone.DDS"), &dir.path().join("x.dds")).unwrap_err();
        assert!(matches!(err, ExportError::RelocationFailed { .. }));
    }
}
