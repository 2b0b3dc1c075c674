//! Main export pipeline orchestration

use super::config::ExportConfig;
use super::destination::{ensure_dds_extension, relocate};
use super::error::ExportError;
use super::staging::{IntermediateArtifact, PendingOutput};
use crate::host::{ExportHost, OptionsDialog, SaveDialog};
use crate::model::{ExportOptions, ExportRequest};
use crate::texconv::{expected_output_path, ConversionOutcome, Texconv, TexconvCommand};
use std::path::{Path, PathBuf};

/// Steps of a single export, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    OptionsCollected,
    DestinationChosen,
    ToolLocated,
    Staged,
    Converted,
    OutputVerified,
    Relocated,
}

/// What a successful export produced
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Final location of the DDS file
    pub destination: PathBuf,

    /// texconv's standard output
    pub tool_output: String,
}

impl ExportReport {
    /// Message shown to the user after a successful export
    pub fn message(&self) -> String {
        format!(
            "Successfully exported to:\n{}\n\n{}",
            self.destination.display(),
            self.tool_output
        )
    }
}

/// Main export pipeline
pub struct ExportPipeline<'a, H: ExportHost> {
    config: &'a ExportConfig,
    host: &'a mut H,
    state: ExportState,
}

impl<'a, H: ExportHost> ExportPipeline<'a, H> {
    /// Create a new export pipeline
    pub fn new(config: &'a ExportConfig, host: &'a mut H) -> Self {
        Self {
            config,
            host,
            state: ExportState::Idle,
        }
    }

    /// Last step reached
    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Run the complete interactive export of `image`
    pub fn export(&mut self, image: &H::Image) -> Result<ExportReport, ExportError> {
        let options = self
            .request_export_options()
            .ok_or(ExportError::Cancelled)?;
        let destination = self
            .request_destination_path()
            .ok_or(ExportError::Cancelled)?;

        self.run(&ExportRequest::new(image, destination, options))
    }

    /// Convert and deliver an already confirmed request
    pub fn run(&mut self, request: &ExportRequest<'_, H::Image>) -> Result<ExportReport, ExportError> {
        log::info!("Exporting DDS ({}) to {:?}", request.options.format, request.destination);

        let texconv = Texconv::locate(&self.config.texconv_path)?;
        self.advance(ExportState::ToolLocated);
        log::info!("Converting with {}", texconv.path().display());

        // Both removed when they go out of scope, on every return path below
        let artifact = self.stage_intermediate_artifact(request.image)?;
        let pending = PendingOutput::new(expected_output_path(artifact.path(), request.output_dir()));

        let outcome = self.run_conversion(&texconv, artifact.path(), &request.options, request.output_dir())?;
        self.finalize_output(&outcome, artifact.path(), &request.destination)?;
        pending.disarm();

        log::info!("Export complete: {:?}", request.destination);
        Ok(ExportReport {
            destination: request.destination.clone(),
            tool_output: outcome.stdout,
        })
    }

    /// Ask the host for the export options
    pub fn request_export_options(&mut self) -> Option<ExportOptions> {
        let options = self.host.choose_export_options(&OptionsDialog::default());
        match options {
            Some(options) => {
                log::debug!("Options: {:?}", options);
                self.advance(ExportState::OptionsCollected);
            }
            None => log::info!("Export options dialog cancelled"),
        }
        options
    }

    /// Ask the host where to save, with `.dds` enforced
    pub fn request_destination_path(&mut self) -> Option<PathBuf> {
        let Some(chosen) = self.host.choose_save_path(&SaveDialog::default()) else {
            log::info!("Save dialog cancelled");
            return None;
        };

        let destination = ensure_dds_extension(chosen);
        self.advance(ExportState::DestinationChosen);
        Some(destination)
    }

    /// Write the image into a fresh temporary PNG
    pub fn stage_intermediate_artifact(&mut self, image: &H::Image) -> Result<IntermediateArtifact, ExportError> {
        let artifact = IntermediateArtifact::create_in(&self.config.staging_dir())?;

        if let Err(e) = self.host.export_png(image, artifact.path()) {
            log::error!("Host failed to write {:?}: {}", artifact.path(), e);
            return Err(e.into());
        }

        self.advance(ExportState::Staged);
        Ok(artifact)
    }

    /// Run texconv on the staged file, writing into `output_dir`
    pub fn run_conversion(
        &mut self,
        texconv: &Texconv,
        intermediate: &Path,
        options: &ExportOptions,
        output_dir: &Path,
    ) -> Result<ConversionOutcome, ExportError> {
        let command = TexconvCommand::new(intermediate, output_dir, options);
        let outcome = texconv.convert(&command)?;
        outcome.ensure_success()?;

        self.advance(ExportState::Converted);
        Ok(outcome)
    }

    /// Check texconv's output and move it to the destination
    ///
    /// The destination is replaced even when `overwrite_existing` is off; that
    /// option only controls texconv's own `-y`.
    pub fn finalize_output(
        &mut self,
        outcome: &ConversionOutcome,
        intermediate: &Path,
        destination: &Path,
    ) -> Result<(), ExportError> {
        let produced = match outcome.produced_file.as_deref() {
            Some(path) if path.is_file() => path,
            _ => {
                log::error!(
                    "texconv reported success for {:?} but {:?} is missing",
                    intermediate,
                    outcome.expected_output
                );
                return Err(ExportError::OutputMissing {
                    expected: outcome.expected_output.clone(),
                    stderr: outcome.diagnostic().to_string(),
                });
            }
        };
        self.advance(ExportState::OutputVerified);

        relocate(produced, destination)?;
        self.advance(ExportState::Relocated);
        Ok(())
    }

    fn advance(&mut self, next: ExportState) {
        log::debug!("Export state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
