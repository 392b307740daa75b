//! Blocking HTTP implementation of [`Backend`].

use reqwest::Method;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use serde_json::Value;
use tracing::{debug, warn};

use prep_model::{
    ErrorBody, ProcessRequest, ProcessResponse, ProcessingStep, SelectedFile, StatusResponse,
    UploadResponse,
};

use crate::backend::Backend;
use crate::config::ClientConfig;
use crate::error::{RequestError, Result};

/// Multipart field name the upload endpoint reads.
pub const UPLOAD_FIELD: &str = "file";

const CSV_MIME: &str = "text/csv";

/// Body of an outgoing request.
#[derive(Debug)]
pub enum RequestBody<'a> {
    Empty,
    Json(Value),
    File(&'a SelectedFile),
}

/// Client for the preprocessing service.
pub struct HttpBackend {
    client: Client,
    config: ClientConfig,
}

impl HttpBackend {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("prep/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send a request and return the decoded JSON body.
    ///
    /// Non-success statuses and bodies carrying an `error` field become
    /// errors; nothing is swallowed.
    pub fn request(&self, method: Method, segments: &[&str], body: RequestBody<'_>) -> Result<Value> {
        let response = self.send(method, segments, body)?;
        let status = response.status();
        let bytes = response.bytes()?;
        decode_json(status.as_u16(), status.is_success(), &bytes)
    }

    fn send(&self, method: Method, segments: &[&str], body: RequestBody<'_>) -> Result<Response> {
        let url = self.config.endpoint(segments)?;
        debug!(%method, %url, "sending request");
        let builder = self.client.request(method, url.clone());
        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::File(file) => {
                let part = Part::bytes(file.content.clone())
                    .file_name(file.name.clone())
                    .mime_str(CSV_MIME)?;
                builder.multipart(Form::new().part(UPLOAD_FIELD, part))
            }
        };
        builder.send().map_err(|err| {
            warn!(%url, error = %err, "request failed");
            RequestError::from(err)
        })
    }
}

impl Backend for HttpBackend {
    fn upload(&self, file: &SelectedFile) -> Result<UploadResponse> {
        debug!(file = %file.name, size = file.size(), "uploading file");
        let value = self.request(Method::POST, &["upload"], RequestBody::File(file))?;
        Ok(serde_json::from_value(value)?)
    }

    fn process(&self, step: ProcessingStep) -> Result<ProcessResponse> {
        let body = serde_json::to_value(ProcessRequest::from(step))?;
        let value = self.request(Method::POST, &["process"], RequestBody::Json(body))?;
        Ok(serde_json::from_value(value)?)
    }

    fn download(&self, filename: &str) -> Result<Vec<u8>> {
        let response = self.send(Method::GET, &["download", filename], RequestBody::Empty)?;
        let status = response.status();
        let bytes = response.bytes()?;
        if !status.is_success() {
            return Err(error_from_status(status.as_u16(), &bytes));
        }
        Ok(bytes.to_vec())
    }

    fn status(&self) -> Result<StatusResponse> {
        let value = self.request(Method::GET, &["status"], RequestBody::Empty)?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Normalize a response into a JSON value or a [`RequestError`].
pub(crate) fn decode_json(status: u16, success: bool, body: &[u8]) -> Result<Value> {
    if !success {
        return Err(error_from_status(status, body));
    }
    let value: Value = serde_json::from_slice(body)?;
    if let Some(message) = value.get("error").and_then(Value::as_str)
        && !message.is_empty()
    {
        return Err(RequestError::Server(message.to_string()));
    }
    Ok(value)
}

fn error_from_status(status: u16, body: &[u8]) -> RequestError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|body| body.error)
        .filter(|message| !message.is_empty());
    warn!(status, message = message.as_deref().unwrap_or("-"), "server returned an error status");
    RequestError::status(status, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_uses_server_message() {
        let err = decode_json(400, false, br#"{"error": "No file selected"}"#).unwrap_err();
        assert!(matches!(err, RequestError::Status { status: 400, .. }));
        assert_eq!(err.to_string(), "No file selected");
    }

    #[test]
    fn error_status_without_json_is_generic() {
        let err = decode_json(502, false, b"<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502");
    }

    #[test]
    fn success_with_error_field_is_an_error() {
        let err = decode_json(200, true, br#"{"error": "Invalid process step"}"#).unwrap_err();
        assert!(matches!(err, RequestError::Server(_)));
    }

    #[test]
    fn success_body_is_returned() {
        let value = decode_json(200, true, br#"{"message": "ok", "filename": "a.csv"}"#).unwrap();
        assert_eq!(value["filename"], "a.csv");
    }

    #[test]
    fn success_with_invalid_json_is_decode_error() {
        let err = decode_json(200, true, b"not json").unwrap_err();
        assert!(matches!(err, RequestError::Decode(_)));
    }
}
