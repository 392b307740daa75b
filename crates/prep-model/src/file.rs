//! The user's chosen CSV file.

use std::fs;
use std::io;
use std::path::Path;

/// Extension accepted by the upload path (compared case-insensitively).
pub const CSV_EXTENSION: &str = ".csv";

/// Returns true when `name` ends in `.csv`, ignoring case.
pub fn is_csv_filename(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(CSV_EXTENSION)
}

/// A file picked by the user, held in memory until it is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// Read a file from disk, naming it after the last path component.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| io::Error::other(format!("not a file path: {}", path.display())))?;
        let content = fs::read(path)?;
        Ok(Self { name, content })
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn is_csv(&self) -> bool {
        is_csv_filename(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_extension_is_case_insensitive() {
        assert!(is_csv_filename("data.csv"));
        assert!(is_csv_filename("DATA.CSV"));
        assert!(is_csv_filename("archive.tar.Csv"));
        assert!(!is_csv_filename("data.csv.txt"));
        assert!(!is_csv_filename("csv"));
        assert!(!is_csv_filename("data.xlsx"));
    }
}
