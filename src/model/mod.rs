//! Transient data passed through a single export
//!
//! Nothing here outlives one invocation of the export procedure.

mod options;
mod request;

pub use options::{CompressionFormat, ExportOptions};
pub use request::ExportRequest;
