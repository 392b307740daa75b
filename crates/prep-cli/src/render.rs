//! Terminal rendering of the view models.

use std::fmt::Write as _;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use prep_model::{ProcessingStep, StatusResponse};
use prep_ui::{Alert, PreviewView, ResultsView, Section, SummaryCard, TableView, Tone};

/// One line per alert, the way it is printed to stdout or stderr.
pub fn alert_line(alert: &Alert) -> String {
    format!("{}: {}", alert.severity.label(), alert.message)
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    width: u16,
    plain: bool,
}

impl Renderer {
    pub fn new(width: u16) -> Self {
        Self {
            width,
            plain: false,
        }
    }

    /// Disable colors regardless of the terminal.
    #[must_use]
    pub fn plain(mut self) -> Self {
        self.plain = true;
        self
    }

    pub fn preview(&self, view: &PreviewView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.cards(&view.cards));
        let columns: Vec<String> = view
            .columns
            .iter()
            .map(|column| match &column.dtype {
                Some(dtype) => format!("{} ({dtype})", column.name),
                None => column.name.clone(),
            })
            .collect();
        let _ = writeln!(out, "Columns: {}", columns.join(", "));
        let _ = writeln!(out, "{}", view.sample.title);
        let _ = write!(out, "{}", self.table(&view.sample));
        out
    }

    pub fn results(&self, view: &ResultsView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", view.step.display_name());
        for section in &view.sections {
            match section {
                Section::Text(text) => {
                    let _ = writeln!(out, "{text}");
                }
                Section::Cards { title, cards } => {
                    let _ = writeln!(out, "{title}");
                    let _ = writeln!(out, "{}", self.cards(cards));
                }
                Section::Tags { title, tags } => {
                    let _ = writeln!(out, "{title}: {}", tags.join(", "));
                }
                Section::Table(table) => {
                    let _ = writeln!(out, "{}", table.title);
                    let _ = writeln!(out, "{}", self.table(table));
                }
            }
        }
        if let Some(chart) = &view.chart {
            let _ = writeln!(
                out,
                "{}: image attached ({} bytes encoded, save with --save-chart)",
                chart.title,
                chart.data_uri.len()
            );
        }
        let _ = write!(
            out,
            "{}: {} ({})",
            view.download.label, view.download.filename, view.download.href
        );
        out
    }

    pub fn status(&self, status: &StatusResponse) -> String {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Step"),
            header_cell("Name"),
            header_cell("Completed"),
            header_cell("Output"),
        ]);
        self.style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        align_column(&mut table, 2, CellAlignment::Center);
        for &step in ProcessingStep::all() {
            let (done, file) = match status.get(step) {
                Some(entry) => (entry.completed, entry.filename.as_str()),
                None => (false, "-"),
            };
            table.add_row(vec![
                Cell::new(step.number()),
                Cell::new(step.display_name()),
                if done {
                    Cell::new("✓").fg(Color::Green)
                } else {
                    dim_cell("✗")
                },
                if done { Cell::new(file) } else { dim_cell(file) },
            ]);
        }
        table.to_string()
    }

    pub fn steps(&self) -> String {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Step"),
            header_cell("Id"),
            header_cell("Name"),
            header_cell("Description"),
        ]);
        self.style(&mut table);
        align_column(&mut table, 0, CellAlignment::Right);
        for &step in ProcessingStep::all() {
            table.add_row(vec![
                Cell::new(step.number()),
                Cell::new(step.slug()).fg(Color::Cyan),
                Cell::new(step.display_name()),
                Cell::new(step.description()),
            ]);
        }
        table.to_string()
    }

    fn cards(&self, cards: &[SummaryCard]) -> String {
        let mut table = Table::new();
        table.set_header(cards.iter().map(|card| header_cell(&card.title)));
        self.style_cards(&mut table);
        table.add_row(
            cards
                .iter()
                .map(|card| toned_cell(&card.value, card.tone).add_attribute(Attribute::Bold)),
        );
        if cards.iter().any(|card| card.caption.is_some()) {
            table.add_row(
                cards
                    .iter()
                    .map(|card| dim_cell(card.caption.as_deref().unwrap_or_default())),
            );
        }
        for index in 0..cards.len() {
            align_column(&mut table, index, CellAlignment::Center);
        }
        table.to_string()
    }

    fn table(&self, view: &TableView) -> String {
        let mut table = Table::new();
        table.set_header(view.headers.iter().map(|header| header_cell(header)));
        self.style(&mut table);
        for row in &view.rows {
            table.add_row(row.iter().map(|cell| toned_cell(&cell.text, cell.tone)));
        }
        table.to_string()
    }

    fn style(&self, table: &mut Table) {
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(self.width);
        if self.plain {
            table.force_no_tty();
        }
    }

    fn style_cards(&self, table: &mut Table) {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .apply_modifier(UTF8_SOLID_INNER_BORDERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(self.width);
        if self.plain {
            table.force_no_tty();
        }
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell(value: &str) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn toned_cell(text: &str, tone: Tone) -> Cell {
    match tone {
        Tone::Normal => Cell::new(text),
        Tone::Positive => Cell::new(text).fg(Color::Green),
        Tone::Negative => Cell::new(text).fg(Color::Red),
        Tone::Muted => dim_cell(text),
    }
}
