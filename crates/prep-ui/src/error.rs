use thiserror::Error;

use prep_client::RequestError;
use prep_model::ModelError;

/// Input problems caught before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a CSV file")]
    NotCsv(String),
    #[error("Please select a file and processing step")]
    MissingSelection,
}

#[derive(Debug, Error)]
pub enum UiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl UiError {
    /// Text for the error alert raised for this failure.
    pub fn alert_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Request(err) => err.user_message(),
            Self::Model(_) => "The server sent an unexpected result.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, UiError>;
