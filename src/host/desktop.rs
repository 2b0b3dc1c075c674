//! Stand-alone host: images from disk, native dialogs from rfd

use super::traits::{button_text, ExportHost, HostError, OptionsDialog, SaveDialog};
use crate::model::ExportOptions;
use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::{Path, PathBuf};

/// Load an image file to export
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path).with_context(|| format!("Failed to open image: {}", path.display()))?;
    log::info!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Host used by the `dds-exporter` binary
///
/// Options come from the command line and are confirmed in a native dialog;
/// the destination comes from the command line or a native save dialog.
pub struct DesktopHost {
    /// Options preset from the command line
    options: ExportOptions,

    /// Ask for confirmation before exporting
    confirm: bool,

    /// Destination given up front (skips the save dialog)
    output: Option<PathBuf>,
}

impl DesktopHost {
    pub fn new(options: ExportOptions) -> Self {
        Self {
            options,
            confirm: true,
            output: None,
        }
    }

    /// Skip the confirmation dialog
    pub fn without_confirmation(mut self) -> Self {
        self.confirm = false;
        self
    }

    /// Use this destination instead of asking
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }
}

impl ExportHost for DesktopHost {
    type Image = DynamicImage;

    fn choose_export_options(&mut self, dialog: &OptionsDialog) -> Option<ExportOptions> {
        if !self.confirm {
            return Some(self.options);
        }

        let confirm = button_text(dialog.confirm_label);
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(dialog.title)
            .set_description(dialog.summary(&self.options))
            .set_buttons(MessageButtons::OkCancelCustom(
                confirm.clone(),
                button_text(dialog.cancel_label),
            ))
            .show();

        match answer {
            MessageDialogResult::Ok => Some(self.options),
            MessageDialogResult::Custom(label) if label == confirm => Some(self.options),
            _ => None,
        }
    }

    fn choose_save_path(&mut self, dialog: &SaveDialog) -> Option<PathBuf> {
        if let Some(output) = self.output.take() {
            return Some(output);
        }

        FileDialog::new()
            .set_title(dialog.title)
            .set_file_name(dialog.suggested_name)
            .add_filter(dialog.filter_name, dialog.filter_extensions)
            .save_file()
    }

    fn export_png(&mut self, image: &DynamicImage, path: &Path) -> Result<(), HostError> {
        image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| HostError::new(e.to_string()))
    }

    fn message(&mut self, text: &str) {
        log::info!("{}", text);
        println!("{}", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use tempfile::TempDir;

    fn host() -> DesktopHost {
        DesktopHost::new(ExportOptions::default()).without_confirmation()
    }

    #[test]
    fn test_preset_options_without_confirmation() {
        let mut host = host();
        assert_eq!(
            host.choose_export_options(&OptionsDialog::default()),
            Some(ExportOptions::default())
        );
    }

    #[test]
    fn test_output_skips_dialog() {
        let mut host = host().with_output(Some(PathBuf::from("out/tex")));
        assert_eq!(host.choose_save_path(&SaveDialog::default()), Some(PathBuf::from("out/tex")));
    }

    #[test]
    fn test_export_png_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("staged.png");
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255])));

        host().export_png(&image, &path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (4, 2));
        assert_eq!(loaded.to_rgba8().get_pixel(3, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_export_png_reports_host_error() {
        let dir = TempDir::new().unwrap();
        let image = DynamicImage::ImageRgba8(RgbaImage::new(1, 1));
        let err = host()
            .export_png(&image, &dir.path().join("missing/staged.png"))
            .unwrap_err();
        assert!(err.message.is_some());
    }
}
