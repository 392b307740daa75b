//! The whole preprocessing page: every controller wired to one backend.

use std::time::Instant;

use tracing::warn;

use prep_client::Backend;
use prep_model::{ProcessingStep, SelectedFile, StatusResponse};

use crate::alert::{Alert, AlertPresenter};
use crate::error::{Result, UiError};
use crate::orchestrator::{ProcessOutcome, ProcessingOrchestrator};
use crate::preview::DataPreviewRenderer;
use crate::steps::StepSelectionController;
use crate::upload::{FileUploadController, UploadOutcome};

/// Session state for one user. Each controller owns its own slot; the page
/// only passes them to each other by reference.
pub struct Page<B> {
    backend: B,
    alerts: AlertPresenter,
    uploads: FileUploadController,
    previews: DataPreviewRenderer,
    steps: StepSelectionController,
    orchestrator: ProcessingOrchestrator,
}

impl<B: Backend> Page<B> {
    pub fn new(backend: B) -> Self {
        Self::with_alerts(backend, AlertPresenter::new())
    }

    /// Use a preconfigured presenter, e.g. one with a listener attached.
    pub fn with_alerts(backend: B, alerts: AlertPresenter) -> Self {
        Self {
            backend,
            alerts,
            uploads: FileUploadController::new(),
            previews: DataPreviewRenderer::new(),
            steps: StepSelectionController::new(),
            orchestrator: ProcessingOrchestrator::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn alerts(&self) -> &AlertPresenter {
        &self.alerts
    }

    pub fn uploads(&self) -> &FileUploadController {
        &self.uploads
    }

    pub fn previews(&self) -> &DataPreviewRenderer {
        &self.previews
    }

    pub fn steps(&self) -> &StepSelectionController {
        &self.steps
    }

    pub fn last_outcome(&self) -> Option<&ProcessOutcome> {
        self.orchestrator.last_outcome()
    }

    pub fn choose_file(&mut self, file: SelectedFile) -> Option<UploadOutcome> {
        self.uploads
            .choose_file(file, &self.backend, &mut self.alerts, &mut self.previews)
    }

    pub fn drag_enter(&mut self) {
        self.uploads.drop_zone_mut().drag_enter();
    }

    pub fn drag_leave(&mut self, related_inside: bool) {
        self.uploads.drop_zone_mut().drag_leave(related_inside);
    }

    pub fn drop_files(&mut self, files: Vec<SelectedFile>) -> Option<UploadOutcome> {
        self.uploads
            .drop_files(files, &self.backend, &mut self.alerts, &mut self.previews)
    }

    pub fn select_step(&mut self, step: ProcessingStep) {
        self.steps.select_step(step);
    }

    pub fn process(&mut self) -> Option<&ProcessOutcome> {
        self.orchestrator.run(
            &self.uploads,
            &mut self.steps,
            &self.backend,
            &mut self.alerts,
        )
    }

    /// Fetch the processed file behind the last result's download link.
    pub fn download_last(&mut self) -> Option<(String, Vec<u8>)> {
        let Some(outcome) = self.orchestrator.last_outcome() else {
            warn!("download requested before any step completed");
            return None;
        };
        let name = outcome.view.download.filename.clone();
        match self.backend.download(&name) {
            Ok(bytes) => Some((name, bytes)),
            Err(err) => {
                let message = UiError::from(err).alert_message();
                self.alerts.error(format!("Error downloading file: {message}"));
                None
            }
        }
    }

    pub fn status(&self) -> Result<StatusResponse> {
        Ok(self.backend.status()?)
    }

    /// Remove alerts whose display time has passed.
    pub fn tick(&mut self, now: Instant) -> Vec<Alert> {
        self.alerts.expire(now)
    }
}
