//! The seam between the presentation layer and the preprocessing service.

use prep_model::{ProcessResponse, ProcessingStep, SelectedFile, StatusResponse, UploadResponse};

use crate::error::Result;

/// Operations the preprocessing service exposes.
///
/// Every method fails with a [`crate::RequestError`] on transport failure,
/// on a non-success status, or when the body carries an `error` field.
pub trait Backend {
    /// `POST /upload` with the file as multipart field `file`.
    fn upload(&self, file: &SelectedFile) -> Result<UploadResponse>;

    /// `POST /process` with `{ "step": "<n>" }`.
    fn process(&self, step: ProcessingStep) -> Result<ProcessResponse>;

    /// `GET /download/<filename>`, returning the raw file.
    fn download(&self, filename: &str) -> Result<Vec<u8>>;

    /// `GET /status`.
    fn status(&self) -> Result<StatusResponse>;
}

impl<B: Backend + ?Sized> Backend for &B {
    fn upload(&self, file: &SelectedFile) -> Result<UploadResponse> {
        (**self).upload(file)
    }

    fn process(&self, step: ProcessingStep) -> Result<ProcessResponse> {
        (**self).process(step)
    }

    fn download(&self, filename: &str) -> Result<Vec<u8>> {
        (**self).download(filename)
    }

    fn status(&self) -> Result<StatusResponse> {
        (**self).status()
    }
}
