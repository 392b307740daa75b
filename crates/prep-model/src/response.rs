//! Request and response bodies for the preprocessing service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::preview::PreviewPayload;
use crate::step::ProcessingStep;

/// Body of every non-success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Successful `POST /upload` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<PreviewPayload>,
}

/// `POST /process` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub step: String,
}

impl From<ProcessingStep> for ProcessRequest {
    fn from(step: ProcessingStep) -> Self {
        Self {
            step: step.wire_value(),
        }
    }
}

/// Successful `POST /process` response. `result` is decoded per step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub step: Option<String>,
    pub result: Value,
}

/// Completion flag for one step in `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStatus {
    pub completed: bool,
    pub filename: String,
}

/// `GET /status` body, keyed `step_1` .. `step_4`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusResponse {
    pub steps: BTreeMap<String, StepStatus>,
}

impl StatusResponse {
    pub fn get(&self, step: ProcessingStep) -> Option<&StepStatus> {
        self.steps.get(&format!("step_{}", step.number()))
    }
}
