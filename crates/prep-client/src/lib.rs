//! Client for the CSV preprocessing service.
//!
//! [`Backend`] describes the four endpoints the presentation layer uses;
//! [`HttpBackend`] implements it over blocking HTTP.

pub mod backend;
pub mod config;
pub mod error;
pub mod http;

pub use backend::Backend;
pub use config::{ClientConfig, DEFAULT_SERVER_URL, DEFAULT_TIMEOUT};
pub use error::{RequestError, Result};
pub use http::{HttpBackend, RequestBody, UPLOAD_FIELD};
