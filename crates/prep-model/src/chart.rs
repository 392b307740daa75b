//! Decoding of chart images sent as `data:` URIs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{ModelError, Result};

/// A decoded chart image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartImage {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ChartImage {
    /// Parse `data:<mime>;base64,<payload>`.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| ModelError::InvalidChart("missing data: prefix".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ModelError::InvalidChart("missing payload separator".to_string()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| ModelError::InvalidChart("payload is not base64".to_string()))?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| ModelError::InvalidChart(e.to_string()))?;
        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    /// File extension matching the mime type.
    pub fn extension(&self) -> &'static str {
        match self.mime.as_str() {
            "image/jpeg" => "jpg",
            "image/svg+xml" => "svg",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_png_data_uri() {
        let uri = format!("data:image/png;base64,{}", STANDARD.encode(b"\x89PNG"));
        let chart = ChartImage::from_data_uri(&uri).unwrap();
        assert_eq!(chart.mime, "image/png");
        assert_eq!(chart.bytes, b"\x89PNG");
        assert_eq!(chart.extension(), "png");
    }

    #[test]
    fn rejects_non_data_uri() {
        assert!(ChartImage::from_data_uri("https://example.com/chart.png").is_err());
        assert!(ChartImage::from_data_uri("data:image/png,raw").is_err());
        assert!(ChartImage::from_data_uri("data:image/png;base64,@@@").is_err());
    }
}
