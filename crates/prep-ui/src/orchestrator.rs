//! Runs the selected processing step against the server.

use tracing::{info, info_span, warn};

use prep_client::{Backend, RequestError};
use prep_model::{ProcessingResult, ProcessingStep};

use crate::alert::AlertPresenter;
use crate::error::{Result, UiError, ValidationError};
use crate::results::{ResultsRenderer, ResultsView};
use crate::steps::StepSelectionController;
use crate::upload::FileUploadController;

/// Holds the step controller in its in-flight state until dropped.
struct InFlight<'a> {
    steps: &'a mut StepSelectionController,
}

impl<'a> InFlight<'a> {
    fn enter(steps: &'a mut StepSelectionController) -> Self {
        steps.set_processing_state(true);
        Self { steps }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.steps.set_processing_state(false);
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutcome {
    pub result: ProcessingResult,
    pub view: ResultsView,
}

#[derive(Debug, Default)]
pub struct ProcessingOrchestrator {
    renderer: ResultsRenderer,
    last: Option<ProcessOutcome>,
}

impl ProcessingOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent successful run.
    pub fn last_outcome(&self) -> Option<&ProcessOutcome> {
        self.last.as_ref()
    }

    /// Process the selected step.
    ///
    /// Requires both a selected file and a selected step; otherwise an
    /// error alert is raised and no request is sent. The step controller is
    /// put into its in-flight state for the duration of the request and
    /// always restored afterwards.
    pub fn run(
        &mut self,
        files: &FileUploadController,
        steps: &mut StepSelectionController,
        backend: &dyn Backend,
        alerts: &mut AlertPresenter,
    ) -> Option<&ProcessOutcome> {
        let (Some(_), Some(step)) = (files.selected_file(), steps.selected_step()) else {
            alerts.error(ValidationError::MissingSelection.to_string());
            return None;
        };

        let span = info_span!("process", step = step.number());
        let _entered = span.enter();
        let outcome = {
            let _in_flight = InFlight::enter(steps);
            self.process(step, backend)
        };

        match outcome {
            Ok(outcome) => {
                alerts.success(outcome.result.message());
                info!(output = %outcome.result.output_file(), "step completed");
                Some(&*self.last.insert(outcome))
            }
            Err(err) => {
                warn!(error = %err, "processing failed");
                alerts.error(process_failure_message(&err));
                None
            }
        }
    }

    fn process(&self, step: ProcessingStep, backend: &dyn Backend) -> Result<ProcessOutcome> {
        let response = backend.process(step)?;
        let result = ProcessingResult::from_value(step, response.result)?;
        let view = self.renderer.render(&result, step);
        Ok(ProcessOutcome { result, view })
    }
}

/// Server-provided text is shown as is; anything else gets a generic alert.
fn process_failure_message(err: &UiError) -> String {
    match err {
        UiError::Request(RequestError::Server(message) | RequestError::Status { message, .. }) => {
            message.clone()
        }
        _ => "Error processing data".to_string(),
    }
}
