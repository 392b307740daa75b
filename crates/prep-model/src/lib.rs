//! Data model shared by the preprocessing client crates.
//!
//! Every body exchanged with the preprocessing service is described here,
//! along with the [`ProcessingStep`] catalogue and the user's [`SelectedFile`].

pub mod chart;
pub mod error;
pub mod file;
pub mod preview;
pub mod response;
pub mod result;
pub mod step;

pub use chart::ChartImage;
pub use error::{ModelError, Result};
pub use file::{CSV_EXTENSION, SelectedFile, is_csv_filename};
pub use preview::{PreviewPayload, Record};
pub use response::{
    ErrorBody, ProcessRequest, ProcessResponse, StatusResponse, StepStatus, UploadResponse,
};
pub use result::{
    BalancingResult, BalancingStats, ClassDistribution, FeatureAnalysis, FeatureComparison,
    FeatureSelectionResult, MissingSummaryItem, MissingValuesResult, ProcessingResult,
    ResultCommon, ScalingResult, ScalingStats, SelectedFeature, SelectionStats, download_name,
};
pub use step::ProcessingStep;
