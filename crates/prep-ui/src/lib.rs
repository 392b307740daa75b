//! Presentation layer for the CSV preprocessing client.
//!
//! Controllers own the user's selections and talk to a
//! [`prep_client::Backend`]; renderers turn server payloads into plain view
//! models that a front end draws however it likes.

pub mod alert;
pub mod error;
pub mod format;
pub mod orchestrator;
pub mod page;
pub mod preview;
pub mod results;
pub mod steps;
pub mod upload;
pub mod view;

pub use alert::{ALERT_TIMEOUT, Alert, AlertId, AlertPresenter, Severity};
pub use error::{Result, UiError, ValidationError};
pub use orchestrator::{ProcessOutcome, ProcessingOrchestrator};
pub use page::Page;
pub use preview::{ColumnTag, DataPreviewRenderer, PreviewView, render_preview};
pub use results::{ResultsRenderer, ResultsView};
pub use steps::{ProcessButton, StepCard, StepSelectionController};
pub use upload::{DropZone, FileUploadController, UploadOutcome};
pub use view::{Cell, ChartView, DownloadLink, Section, SummaryCard, TableView, Tone};
