//! View models produced by the renderers.
//!
//! These carry only display-ready strings; whatever draws them (terminal,
//! HTML, GUI) decides how they look.

use serde::Serialize;

/// Emphasis hint for a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Tone {
    #[default]
    Normal,
    Positive,
    Negative,
    Muted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Normal,
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// A headline number with a title and an optional caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
    pub caption: Option<String>,
    pub tone: Tone,
}

impl SummaryCard {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            caption: None,
            tone: Tone::Normal,
        }
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    #[must_use]
    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl TableView {
    pub fn new(title: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            title: title.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Text of the cell at `row`, `column`, if present.
    pub fn text(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(|cell| cell.text.as_str())
    }
}

/// Chart image embedded as a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartView {
    pub title: String,
    pub data_uri: String,
}

/// Link to the processed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub label: String,
    pub href: String,
    pub filename: String,
}

/// One block of a rendered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Section {
    Text(String),
    Cards { title: String, cards: Vec<SummaryCard> },
    Tags { title: String, tags: Vec<String> },
    Table(TableView),
}

impl Section {
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Cards { title, .. } | Self::Tags { title, .. } => Some(title),
            Self::Table(table) => Some(&table.title),
        }
    }
}
