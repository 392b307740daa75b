use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown processing step: {0}")]
    UnknownStep(String),
    #[error("invalid chart payload: {0}")]
    InvalidChart(String),
    #[error("invalid {step} result: {source}")]
    InvalidResult {
        step: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
