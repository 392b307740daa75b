//! A page session driven from the command line.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use prep_client::{Backend, ClientConfig, HttpBackend};
use prep_model::{ChartImage, SelectedFile, download_name};
use prep_ui::{AlertPresenter, Page, Severity};

use crate::render::alert_line;

/// Build the HTTP backend for `url`.
pub fn connect(url: &str, timeout: Duration) -> Result<HttpBackend> {
    let config = ClientConfig::new(url)
        .with_context(|| format!("configure server {url}"))?
        .with_timeout(timeout);
    HttpBackend::new(config).context("build HTTP client")
}

/// Alerts go to stdout, errors to stderr, as soon as they are raised.
pub fn printing_alerts() -> AlertPresenter {
    AlertPresenter::new().with_listener(|alert| {
        let line = alert_line(alert);
        match alert.severity {
            Severity::Error => eprintln!("{line}"),
            Severity::Info | Severity::Success => println!("{line}"),
        }
    })
}

pub fn read_file(path: &Path) -> Result<SelectedFile> {
    SelectedFile::from_path(path).with_context(|| format!("read {}", path.display()))
}

/// True when the page raised no error alert.
pub fn succeeded<B: Backend>(page: &Page<B>) -> bool {
    page.alerts().errors_raised() == 0
}

/// Write `bytes` under `dir` using the last segment of `output_file`.
pub fn save_download(dir: &Path, output_file: &str, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(download_name(output_file));
    fs::write(&path, bytes).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "saved download");
    Ok(path)
}

/// Decode a chart data URI and write the image to `path`.
pub fn save_chart(data_uri: &str, path: &Path) -> Result<()> {
    let chart = ChartImage::from_data_uri(data_uri).context("decode chart")?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, &chart.bytes).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), mime = %chart.mime, "saved chart");
    Ok(())
}

/// Print rendered text to stdout.
pub fn print_block(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_uses_basename() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_download(dir.path(), "output/2_scaled_data.csv", b"a\n0.5\n").unwrap();
        assert_eq!(path, dir.path().join("2_scaled_data.csv"));
        assert_eq!(fs::read(&path).unwrap(), b"a\n0.5\n");
    }

    #[test]
    fn chart_is_decoded_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts").join("anova.png");
        save_chart("data:image/png;base64,aGVsbG8=", &path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"hello");
    }

    #[test]
    fn bad_chart_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = save_chart("not a data uri", &dir.path().join("x.png")).unwrap_err();
        assert!(err.to_string().contains("decode chart"));
    }

    #[test]
    fn invalid_server_url_is_reported() {
        assert!(connect("not a url", Duration::from_secs(1)).is_err());
    }
}
