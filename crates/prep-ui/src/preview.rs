//! Rendering of the upload preview.

use serde::Serialize;

use prep_model::PreviewPayload;

use crate::format::cell_text;
use crate::view::{Cell, SummaryCard, TableView, Tone};

/// Rows shown in the sample table.
pub const PREVIEW_ROWS: usize = 5;
/// Data columns shown in the sample table before truncating.
pub const PREVIEW_COLUMNS: usize = 8;
/// Header and cell text of the truncation column.
pub const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnTag {
    pub name: String,
    pub dtype: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewView {
    pub cards: Vec<SummaryCard>,
    pub columns: Vec<ColumnTag>,
    pub sample: TableView,
    /// True when the sample table carries a truncation column.
    pub truncated: bool,
}

/// Build the preview view for `preview`.
pub fn render_preview(preview: &PreviewPayload) -> PreviewView {
    let missing_columns = preview.columns_with_missing();
    let cards = vec![
        SummaryCard::new(
            "Dataset Size",
            format!("{} × {}", preview.row_count(), preview.column_count()),
        )
        .with_caption("rows × columns"),
        SummaryCard::new("Features", preview.column_count().to_string())
            .with_caption("total columns"),
        SummaryCard::new("Missing Values", missing_columns.to_string())
            .with_caption("columns with missing data")
            .with_tone(if missing_columns > 0 {
                Tone::Negative
            } else {
                Tone::Normal
            }),
        SummaryCard::new("Data Types", "Mixed").with_caption("numeric & categorical"),
    ];

    let columns = preview
        .columns
        .iter()
        .map(|name| ColumnTag {
            name: name.clone(),
            dtype: preview
                .dtypes
                .as_ref()
                .and_then(|dtypes| dtypes.get(name))
                .cloned(),
        })
        .collect();

    let (sample, truncated) = sample_table(preview);
    PreviewView {
        cards,
        columns,
        sample,
        truncated,
    }
}

fn sample_table(preview: &PreviewPayload) -> (TableView, bool) {
    let shown: Vec<&String> = preview.columns.iter().take(PREVIEW_COLUMNS).collect();
    let truncated = preview.columns.len() > PREVIEW_COLUMNS;

    let mut headers: Vec<String> = shown.iter().map(|name| (*name).clone()).collect();
    if truncated {
        headers.push(TRUNCATION_MARKER.to_string());
    }
    let mut table = TableView::new(
        format!("Sample Data (First {PREVIEW_ROWS} rows)"),
        headers,
    );
    for record in preview.sample_data.iter().take(PREVIEW_ROWS) {
        let mut row: Vec<Cell> = shown
            .iter()
            .map(|name| {
                let text = cell_text(record.get(name.as_str()));
                Cell::new(text)
            })
            .collect();
        if truncated {
            row.push(Cell::toned(TRUNCATION_MARKER, Tone::Muted));
        }
        table.push_row(row);
    }
    (table, truncated)
}

/// Renders previews and remembers the last payload shown.
#[derive(Debug, Default)]
pub struct DataPreviewRenderer {
    last: Option<PreviewPayload>,
}

impl DataPreviewRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, preview: &PreviewPayload) -> PreviewView {
        let view = render_preview(preview);
        self.last = Some(preview.clone());
        view
    }

    /// The payload most recently shown, for other components to read.
    pub fn last_preview(&self) -> Option<&PreviewPayload> {
        self.last.as_ref()
    }
}
