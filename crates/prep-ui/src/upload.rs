//! File selection and upload.

use tracing::{debug, info, warn};

use prep_client::{Backend, RequestError};
use prep_model::SelectedFile;

use crate::alert::AlertPresenter;
use crate::error::{Result, UiError, ValidationError};
use crate::preview::{DataPreviewRenderer, PreviewView};

/// Highlight state of the drop target.
///
/// A leave event only clears the highlight when the pointer moved to a
/// node outside the target's subtree, so crossing into a child element
/// does not flicker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropZone {
    highlighted: bool,
}

impl DropZone {
    pub fn drag_enter(&mut self) {
        self.highlighted = true;
    }

    /// `related_inside` is true when the node the pointer moved to is the
    /// target itself or one of its descendants.
    pub fn drag_leave(&mut self, related_inside: bool) {
        if !related_inside {
            self.highlighted = false;
        }
    }

    pub fn drop_received(&mut self) {
        self.highlighted = false;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

/// What a successful upload produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Name the server stored the file under, shown as the active file.
    pub filename: String,
    pub preview: Option<PreviewView>,
}

/// Owns the currently selected file.
#[derive(Debug, Default)]
pub struct FileUploadController {
    selected: Option<SelectedFile>,
    active_filename: Option<String>,
    drop_zone: DropZone,
}

impl FileUploadController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// File name confirmed by the last successful upload.
    pub fn active_filename(&self) -> Option<&str> {
        self.active_filename.as_deref()
    }

    pub fn drop_zone(&self) -> &DropZone {
        &self.drop_zone
    }

    pub fn drop_zone_mut(&mut self) -> &mut DropZone {
        &mut self.drop_zone
    }

    /// File-picker path: non-CSV files are ignored without an alert.
    ///
    /// Returns the upload outcome, or `None` when nothing was uploaded.
    pub fn choose_file(
        &mut self,
        file: SelectedFile,
        backend: &dyn Backend,
        alerts: &mut AlertPresenter,
        previews: &mut DataPreviewRenderer,
    ) -> Option<UploadOutcome> {
        if !file.is_csv() {
            debug!(file = %file.name, "ignoring non-CSV file from picker");
            return None;
        }
        self.upload_selected(file, backend, alerts, previews)
    }

    /// Drag-and-drop path: only the first dropped file is considered, and a
    /// non-CSV file raises an error alert.
    pub fn drop_files(
        &mut self,
        files: Vec<SelectedFile>,
        backend: &dyn Backend,
        alerts: &mut AlertPresenter,
        previews: &mut DataPreviewRenderer,
    ) -> Option<UploadOutcome> {
        self.drop_zone.drop_received();
        let file = files.into_iter().next()?;
        if !file.is_csv() {
            let err = ValidationError::NotCsv(file.name);
            alerts.error(err.to_string());
            return None;
        }
        self.upload_selected(file, backend, alerts, previews)
    }

    fn upload_selected(
        &mut self,
        file: SelectedFile,
        backend: &dyn Backend,
        alerts: &mut AlertPresenter,
        previews: &mut DataPreviewRenderer,
    ) -> Option<UploadOutcome> {
        let file = self.selected.insert(file);
        match Self::upload(file, backend, previews) {
            Ok((message, outcome)) => {
                alerts.success(message);
                self.active_filename = Some(outcome.filename.clone());
                Some(outcome)
            }
            Err(err) => {
                alerts.error(upload_failure_message(&err));
                None
            }
        }
    }

    /// Send `file` to the server and render the returned preview.
    fn upload(
        file: &SelectedFile,
        backend: &dyn Backend,
        previews: &mut DataPreviewRenderer,
    ) -> Result<(String, UploadOutcome)> {
        info!(file = %file.name, size = file.size(), "uploading file");
        let response = backend.upload(file)?;
        let preview = match &response.preview {
            Some(payload) => Some(previews.show(payload)),
            None => {
                warn!(file = %response.filename, "upload response carried no preview");
                None
            }
        };
        Ok((
            response.message,
            UploadOutcome {
                filename: response.filename,
                preview,
            },
        ))
    }
}

fn upload_failure_message(err: &UiError) -> String {
    match err {
        UiError::Request(RequestError::Server(message)) => message.clone(),
        other => format!("Error uploading file: {}", other.alert_message()),
    }
}
