//! DDS Exporter - export images to DDS through texconv
//!
//! This library implements an image-editor export procedure that stages the
//! current image as PNG, converts it with Microsoft's texconv and moves the
//! resulting `.dds` file to the location the user picked.

pub mod export;
pub mod host;
pub mod model;
pub mod procedure;
pub mod texconv;

pub use export::config::ExportConfig;
pub use export::pipeline::ExportPipeline;
pub use export::ExportError;
pub use model::{CompressionFormat, ExportOptions};
pub use procedure::{DdsExportPlugin, ProcedureStatus};
