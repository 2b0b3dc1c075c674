//! Host trait definitions and dialog descriptions

use crate::model::{CompressionFormat, ExportOptions};
use std::path::{Path, PathBuf};

/// How the host invoked the export procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Started by the user, dialogs may be shown
    Interactive,

    /// Scripted or batch call, the exporter does nothing
    NonInteractive,
}

/// Host application trait - lets the exporter run inside an editor or stand-alone
pub trait ExportHost {
    /// The host's handle to an open image
    type Image;

    /// Present the export options and return the user's choice, None on cancel
    fn choose_export_options(&mut self, dialog: &OptionsDialog) -> Option<ExportOptions>;

    /// Present a save-file chooser, None on cancel
    fn choose_save_path(&mut self, dialog: &SaveDialog) -> Option<PathBuf>;

    /// Write the image to `path` as a lossless PNG, overwriting the file
    fn export_png(&mut self, image: &Self::Image, path: &Path) -> Result<(), HostError>;

    /// Show an informational message to the user
    fn message(&mut self, text: &str);
}

/// Failure reported by the host while writing the image
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", .message.as_deref().unwrap_or("Unknown error"))]
pub struct HostError {
    /// Diagnostic from the host, if it gave one
    pub message: Option<String>,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// The host failed without saying why
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Description of the export options dialog
#[derive(Debug, Clone)]
pub struct OptionsDialog {
    pub title: &'static str,
    pub format_label: &'static str,
    pub formats: &'static [CompressionFormat],
    pub options_label: &'static str,
    pub mipmaps_label: &'static str,
    pub srgb_label: &'static str,
    pub overwrite_label: &'static str,
    pub confirm_label: &'static str,
    pub cancel_label: &'static str,
}

impl OptionsDialog {
    /// Plain-text rendering of a set of options, for hosts without widgets
    pub fn summary(&self, options: &ExportOptions) -> String {
        let check = |on: bool| if on { "[x]" } else { "[ ]" };

        let formats: Vec<String> = self
            .formats
            .iter()
            .map(|format| {
                let mark = if *format == options.format { "(*)" } else { "( )" };
                format!("  {} {}", mark, format.display_name())
            })
            .collect();

        format!(
            "{}\n{}\n{}\n  {} {}\n  {} {}\n  {} {}",
            self.format_label,
            formats.join("\n"),
            self.options_label,
            check(options.generate_mipmaps),
            self.mipmaps_label,
            check(options.use_srgb),
            self.srgb_label,
            check(options.overwrite_existing),
            self.overwrite_label,
        )
    }
}

/// Button label without its mnemonic underscore
pub fn button_text(label: &str) -> String {
    label.replace('_', "")
}

impl Default for OptionsDialog {
    fn default() -> Self {
        Self {
            title: "Export image as DDS (texconv)",
            format_label: "Compression format:",
            formats: &CompressionFormat::ALL,
            options_label: "Options:",
            mipmaps_label: "Generate mipmaps",
            srgb_label: "sRGB color space (perceptual)",
            overwrite_label: "Overwrite existing file",
            confirm_label: "_Export",
            cancel_label: "_Cancel",
        }
    }
}

/// Description of the destination chooser
#[derive(Debug, Clone)]
pub struct SaveDialog {
    pub title: &'static str,

    /// File name pre-filled in the chooser
    pub suggested_name: &'static str,

    /// Name of the file filter
    pub filter_name: &'static str,

    /// Extensions the filter shows (without the dot)
    pub filter_extensions: &'static [&'static str],
}

impl Default for SaveDialog {
    fn default() -> Self {
        Self {
            title: "Save as DDS",
            suggested_name: "texture.dds",
            filter_name: "DDS files",
            filter_extensions: &["dds"],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_dialog_offers_all_formats() {
        let dialog = OptionsDialog::default();
        assert_eq!(dialog.formats.len(), 7);
        assert_eq!(dialog.formats[0], ExportOptions::default().format);
    }

    #[test]
    fn test_summary() {
        let dialog = OptionsDialog::default();
        let options = ExportOptions::new(CompressionFormat::Bc5).with_srgb(false);
        let summary = dialog.summary(&options);

        assert!(summary.starts_with("Compression format:\n  ( ) BC1 / DXT1\n"));
        assert!(summary.contains("  (*) BC5 (RG)\n"));
        assert_eq!(summary.matches("(*)").count(), 1);
        assert_eq!(summary.matches("( )").count(), 6);
        assert!(summary.contains("[x] Generate mipmaps"));
        assert!(summary.contains("[ ] sRGB color space (perceptual)"));
        assert!(summary.contains("[x] Overwrite existing file"));
    }

    #[test]
    fn test_button_text() {
        let dialog = OptionsDialog::default();
        assert_eq!(button_text(dialog.confirm_label), "Export");
        assert_eq!(button_text(dialog.cancel_label), "Cancel");
    }

    #[test]
    fn test_host_error_display() {
        assert_eq!(HostError::unknown().to_string(), "Unknown error");
        assert_eq!(HostError::new("disk full").to_string(), "disk full");
    }
}
