//! Plugin procedure registration and entry point
//!
//! The host queries the procedures this plugin provides, registers them under
//! their menu path and calls [`DdsExportPlugin::run`] when the user picks the
//! menu entry.

use crate::export::{ExportConfig, ExportError, ExportPipeline};
use crate::host::{ExportHost, RunMode};
use std::sync::atomic::{AtomicBool, Ordering};

/// Name of the single procedure this plugin registers
pub const PROCEDURE_NAME: &str = "jb-dds-export";

/// Error domain used when reporting failures to the host
pub const ERROR_DOMAIN: &str = "DDS Export";

/// Registration data for a plugin procedure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureInfo {
    pub name: &'static str,
    /// Image types the procedure accepts (`*` = any)
    pub image_types: &'static str,
    pub menu_label: &'static str,
    pub menu_path: &'static str,
    pub blurb: &'static str,
    pub help: &'static str,
    pub authors: &'static str,
    pub copyright: &'static str,
    pub date: &'static str,
}

/// The DDS export procedure
pub const DDS_EXPORT_PROCEDURE: ProcedureInfo = ProcedureInfo {
    name: PROCEDURE_NAME,
    image_types: "*",
    menu_label: "Export as DDS (texconv)...",
    menu_path: "<Image>/File/Export",
    blurb: "Export to DDS using texconv",
    help: "Exports the image to DDS using the external tool texconv",
    authors: "Tenir",
    copyright: "Tenir",
    date: "2025",
};

/// Status handed back to the host when the procedure returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcedureStatus {
    Success,
    Cancel,
    ExecutionError {
        domain: &'static str,
        message: String,
    },
}

impl ProcedureStatus {
    fn execution_error(err: &ExportError) -> Self {
        ProcedureStatus::ExecutionError {
            domain: ERROR_DOMAIN,
            message: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProcedureStatus::Success)
    }
}

/// The plugin instance registered with the host
pub struct DdsExportPlugin {
    config: ExportConfig,

    /// Set while an interactive export runs
    in_flight: AtomicBool,
}

impl DdsExportPlugin {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Names of the procedures provided by this plugin
    pub fn query_procedures(&self) -> Vec<&'static str> {
        vec![PROCEDURE_NAME]
    }

    /// Registration data for `name`, if this plugin provides it
    pub fn create_procedure(&self, name: &str) -> Option<ProcedureInfo> {
        (name == PROCEDURE_NAME).then_some(DDS_EXPORT_PROCEDURE)
    }

    /// Whether an export is currently running
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Procedure entry point
    ///
    /// Only interactive calls do anything; a non-interactive call succeeds
    /// without touching the image.
    pub fn run<H: ExportHost, D>(
        &self,
        host: &mut H,
        run_mode: RunMode,
        image: &H::Image,
        drawables: &[D],
    ) -> ProcedureStatus {
        if run_mode == RunMode::NonInteractive {
            log::debug!("Non-interactive call, nothing to do");
            return ProcedureStatus::Success;
        }
        log::debug!("{} called with {} drawable(s)", PROCEDURE_NAME, drawables.len());

        let result = match InFlight::acquire(&self.in_flight) {
            Ok(_guard) => ExportPipeline::new(&self.config, &mut *host).export(image),
            Err(e) => Err(e),
        };

        match result {
            Ok(report) => {
                host.message(&report.message());
                ProcedureStatus::Success
            }
            Err(e) if e.is_cancelled() => {
                log::info!("Export cancelled");
                ProcedureStatus::Cancel
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                ProcedureStatus::execution_error(&e)
            }
        }
    }
}

/// Marks the plugin busy until dropped
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, ExportError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExportError::Busy)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostError, OptionsDialog, SaveDialog};
    use crate::model::ExportOptions;
    use std::path::{Path, PathBuf};

    /// Host that cancels every dialog and records messages
    #[derive(Default)]
    struct CancellingHost {
        dialogs: usize,
        messages: Vec<String>,
    }

    impl ExportHost for CancellingHost {
        type Image = ();

        fn choose_export_options(&mut self, _dialog: &OptionsDialog) -> Option<ExportOptions> {
            self.dialogs += 1;
            None
        }

        fn choose_save_path(&mut self, _dialog: &SaveDialog) -> Option<PathBuf> {
            self.dialogs += 1;
            None
        }

        fn export_png(&mut self, _image: &(), _path: &Path) -> Result<(), HostError> {
            Err(HostError::unknown())
        }

        fn message(&mut self, text: &str) {
            self.messages.push(text.to_string());
        }
    }

    fn plugin() -> DdsExportPlugin {
        DdsExportPlugin::new(ExportConfig::new(PathBuf::from("/nonexistent/texconv.exe")))
    }

    #[test]
    fn test_registration() {
        let plugin = plugin();
        assert_eq!(plugin.query_procedures(), vec!["jb-dds-export"]);

        let info = plugin.create_procedure("jb-dds-export").unwrap();
        assert_eq!(info.image_types, "*");
        assert_eq!(info.menu_label, "Export as DDS (texconv)...");
        assert_eq!(info.menu_path, "<Image>/File/Export");
        assert!(plugin.create_procedure("file-png-export").is_none());
    }

    #[test]
    fn test_non_interactive_is_noop() {
        let mut host = CancellingHost::default();
        let status = plugin().run::<_, ()>(&mut host, RunMode::NonInteractive, &(), &[]);

        assert_eq!(status, ProcedureStatus::Success);
        assert_eq!(host.dialogs, 0);
    }

    #[test]
    fn test_cancel_is_silent() {
        let mut host = CancellingHost::default();
        let plugin = plugin();
        let status = plugin.run::<_, ()>(&mut host, RunMode::Interactive, &(), &[]);

        assert_eq!(status, ProcedureStatus::Cancel);
        assert!(host.messages.is_empty());
        assert!(!plugin.is_busy());
    }

    #[test]
    fn test_in_flight_guard() {
        let flag = AtomicBool::new(false);
        let guard = InFlight::acquire(&flag).unwrap();
        assert!(matches!(InFlight::acquire(&flag), Err(ExportError::Busy)));
        drop(guard);
        assert!(InFlight::acquire(&flag).is_ok());
    }

    #[test]
    fn test_failure_status() {
        let status = ProcedureStatus::execution_error(&ExportError::Busy);
        assert_eq!(
            status,
            ProcedureStatus::ExecutionError {
                domain: "DDS Export",
                message: "A DDS export is already in progress".to_string(),
            }
        );
        assert!(!status.is_success());
    }
}
