//! Host application layer
//!
//! The exporter talks to the image editor only through [`ExportHost`]: dialogs,
//! writing the image as PNG and showing messages. [`DesktopHost`] is the
//! stand-alone implementation used by the binary.

mod desktop;
mod traits;

pub use desktop::{load_image, DesktopHost};
pub use traits::{button_text, ExportHost, HostError, OptionsDialog, RunMode, SaveDialog};
