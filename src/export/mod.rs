//! Export orchestration

pub mod config;
pub mod destination;
pub mod error;
pub mod pipeline;
pub mod staging;

pub use config::{ConfigError, ExportConfig};
pub use error::ExportError;
pub use pipeline::{ExportPipeline, ExportReport, ExportState};
pub use staging::{IntermediateArtifact, PendingOutput};
