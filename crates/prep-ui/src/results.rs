//! Rendering of processing results, one layout per step.

use serde::Serialize;

use prep_model::{
    BalancingResult, FeatureSelectionResult, MissingValuesResult, ProcessingResult,
    ProcessingStep, Record, ScalingResult,
};

use crate::format::{
    NULL_MARKER, cell_text, numeric_cell_text, stat_or_na, to_exponential, to_fixed,
};
use crate::view::{Cell, ChartView, DownloadLink, Section, SummaryCard, TableView, Tone};

/// Rows of the missing-values and feature-analysis tables.
pub const TOP_FEATURES: usize = 10;
/// Rows and columns of the before/after scaling tables.
pub const SCALING_PREVIEW: usize = 5;
/// Rows and columns of sample-output tables.
pub const SAMPLE_PREVIEW: usize = 8;
/// After-ratio at or below which classes count as balanced.
pub const BALANCED_RATIO: f64 = 1.05;

/// Key naming the row label in server sample tables.
const ROW_KEY: &str = "row";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub step: ProcessingStep,
    pub message: String,
    pub sections: Vec<Section>,
    pub chart: Option<ChartView>,
    pub download: DownloadLink,
}

impl ResultsView {
    /// Find a section by its title.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.title() == Some(title))
    }

    pub fn table(&self, title: &str) -> Option<&TableView> {
        match self.section(title)? {
            Section::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn cards(&self, title: &str) -> Option<&[SummaryCard]> {
        match self.section(title)? {
            Section::Cards { cards, .. } => Some(cards),
            _ => None,
        }
    }
}

/// Stateless renderer for processing results.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResultsRenderer;

impl ResultsRenderer {
    /// Build the view for `result`, laid out for `step`.
    ///
    /// A result whose variant does not match `step` renders only the common
    /// parts (message, chart, download link).
    pub fn render(&self, result: &ProcessingResult, step: ProcessingStep) -> ResultsView {
        let sections = match (result, step) {
            (ProcessingResult::MissingValues(r), ProcessingStep::MissingValues) => {
                missing_values_sections(r)
            }
            (ProcessingResult::Scaling(r), ProcessingStep::Scaling) => scaling_sections(r),
            (ProcessingResult::FeatureSelection(r), ProcessingStep::FeatureSelection) => {
                feature_selection_sections(r)
            }
            (ProcessingResult::Smote(r), ProcessingStep::Smote) => balancing_sections(r),
            _ => Vec::new(),
        };
        let chart = result.chart().map(|uri| ChartView {
            title: chart_title(step).to_string(),
            data_uri: uri.to_string(),
        });
        let filename = result.download_name().to_string();
        ResultsView {
            step,
            message: result.message().to_string(),
            sections,
            chart,
            download: DownloadLink {
                label: "Download CSV Result".to_string(),
                href: format!("/download/{filename}"),
                filename,
            },
        }
    }
}

fn chart_title(step: ProcessingStep) -> &'static str {
    match step {
        ProcessingStep::FeatureSelection => "ANOVA Analysis Chart",
        ProcessingStep::Smote => "SMOTE Balancing Visualization",
        ProcessingStep::MissingValues | ProcessingStep::Scaling => "Chart",
    }
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn missing_values_sections(result: &MissingValuesResult) -> Vec<Section> {
    let total = result
        .total_missing_features
        .unwrap_or(result.missing_summary.len() as u64);
    let mut table = TableView::new(
        "Missing Values Summary",
        headers(&["Feature", "Missing Count", "Missing %"]),
    );
    for item in result.missing_summary.iter().take(TOP_FEATURES) {
        table.push_row(vec![
            Cell::new(item.feature.clone()),
            Cell::new(item.missing_count.to_string()),
            Cell::new(format!("{}%", to_fixed(item.missing_percentage, 2))),
        ]);
    }
    vec![
        Section::Text(format!("Found {total} columns with missing values")),
        Section::Table(table),
    ]
}

fn scaling_sections(result: &ScalingResult) -> Vec<Section> {
    let mut sections = Vec::new();
    for (title, data) in [
        ("Before Scaling", &result.before_scaling_table),
        ("After Scaling", &result.after_scaling_table),
    ] {
        if let Some(table) = record_table(title, data, SCALING_PREVIEW, SCALING_PREVIEW, 6) {
            sections.push(Section::Table(table));
        }
    }
    if !result.feature_comparison.is_empty() {
        let mut table = TableView::new(
            "Feature Ranges",
            headers(&[
                "Feature",
                "Original Min",
                "Original Max",
                "Scaled Min",
                "Scaled Max",
                "Range",
            ]),
        );
        let fixed = |value: Option<f64>| {
            value.map_or_else(|| NULL_MARKER.to_string(), |v| to_fixed(v, 4))
        };
        for item in result.feature_comparison.iter().take(TOP_FEATURES) {
            table.push_row(vec![
                Cell::new(item.feature.clone()),
                Cell::new(fixed(item.original_min)),
                Cell::new(fixed(item.original_max)),
                Cell::new(fixed(item.scaled_min)),
                Cell::new(fixed(item.scaled_max)),
                Cell::new(item.range_reduction.clone()),
            ]);
        }
        sections.push(Section::Table(table));
    }
    let stats = &result.summary_stats;
    sections.push(Section::Cards {
        title: "Summary Statistics".to_string(),
        cards: vec![
            SummaryCard::new("Total Rows", stats.total_rows.to_string()),
            SummaryCard::new("Features", stats.numeric_features.to_string()),
            SummaryCard::new("Scaling Range", "0 - 1"),
            SummaryCard::new("Missing Values", "Handled").with_tone(Tone::Positive),
        ],
    });
    sections
}

fn feature_selection_sections(result: &FeatureSelectionResult) -> Vec<Section> {
    let stats = &result.summary_stats;
    let mut sections = vec![Section::Cards {
        title: "Feature Selection Summary".to_string(),
        cards: vec![
            SummaryCard::new("Features Analyzed", stats.total_features_analyzed.to_string()),
            SummaryCard::new("Selected Features", stats.features_selected.to_string()),
            SummaryCard::new("Selection Rate", stats.selection_rate.clone()),
            SummaryCard::new("Target Column", stats.target_column.clone()),
        ],
    }];

    sections.push(Section::Tags {
        title: "Selected Features".to_string(),
        tags: result
            .selected_features_summary
            .iter()
            .map(|feature| format!("{} (Rank: {})", feature.feature, feature.rank))
            .collect(),
    });

    let mut analysis = TableView::new(
        "Feature Analysis (Top 10)",
        headers(&[
            "Rank",
            "Feature",
            "F-Score",
            "P-Value",
            "Significance",
            "Selected",
        ]),
    );
    for (index, item) in result.feature_analysis_table.iter().take(TOP_FEATURES).enumerate() {
        let significance_tone = if item.is_significant() {
            Tone::Positive
        } else {
            Tone::Muted
        };
        let selected = if item.selected {
            Cell::toned("✓", Tone::Positive)
        } else {
            Cell::toned("✗", Tone::Muted)
        };
        analysis.push_row(vec![
            Cell::new((index + 1).to_string()),
            Cell::new(item.feature.clone()),
            Cell::new(stat_or_na(item.f_score, |v| to_fixed(v, 4))),
            Cell::new(stat_or_na(item.p_value, |v| to_exponential(v, 2))),
            Cell::toned(item.significance.clone(), significance_tone),
            selected,
        ]);
    }
    sections.push(Section::Table(analysis));

    if let Some(sample) = record_table(
        "Sample Selected Data",
        &result.sample_output_table,
        SAMPLE_PREVIEW,
        SAMPLE_PREVIEW,
        4,
    ) {
        sections.push(Section::Table(sample));
    }
    sections
}

fn balancing_sections(result: &BalancingResult) -> Vec<Section> {
    let stats = &result.summary_stats;
    let mut sections = vec![Section::Cards {
        title: "Data Balancing Summary".to_string(),
        cards: vec![
            SummaryCard::new("Samples Before", stats.total_samples_before.to_string()),
            SummaryCard::new("Samples After", stats.total_samples_after.to_string()),
            SummaryCard::new("Classes", stats.classes.join(", ")),
            SummaryCard::new("Balance Status", stats.balancing_status.clone()),
        ],
    }];

    let mut distribution = TableView::new(
        "Class Distribution Comparison",
        headers(&[
            "Class",
            "Before SMOTE",
            "After SMOTE",
            "Added Samples",
            "Change %",
        ]),
    );
    for item in &result.distribution_comparison {
        let change = match item.change {
            c if c > 0 => Cell::toned(format!("+{c}"), Tone::Positive),
            c if c < 0 => Cell::toned(c.to_string(), Tone::Negative),
            _ => Cell::new("0"),
        };
        let percentage = if item.change > 0 {
            Cell::toned(item.percentage_change.clone(), Tone::Positive)
        } else {
            Cell::toned("No change", Tone::Muted)
        };
        distribution.push_row(vec![
            Cell::new(item.class_label.clone()),
            Cell::new(item.before_smote.to_string()),
            Cell::new(item.after_smote.to_string()),
            change,
            percentage,
        ]);
    }
    sections.push(Section::Table(distribution));

    let balanced = stats.imbalance_ratio_after <= BALANCED_RATIO;
    sections.push(Section::Cards {
        title: "Imbalance Ratio Analysis".to_string(),
        cards: vec![
            SummaryCard::new(
                "Before SMOTE",
                format!("{}:1", to_fixed(stats.imbalance_ratio_before, 2)),
            )
            .with_caption("Highly imbalanced")
            .with_tone(Tone::Negative),
            SummaryCard::new(
                "After SMOTE",
                format!("{}:1", to_fixed(stats.imbalance_ratio_after, 2)),
            )
            .with_caption(if balanced { "Balanced!" } else { "Improved" })
            .with_tone(if balanced { Tone::Positive } else { Tone::Normal }),
        ],
    });

    if let Some(sample) = record_table(
        "Sample Balanced Data",
        &result.sample_output_table,
        SAMPLE_PREVIEW,
        SAMPLE_PREVIEW,
        4,
    ) {
        sections.push(Section::Table(sample));
    }
    sections
}

/// Table of server records: a `Row` label column followed by the first
/// `max_columns` data columns of the first record. Empty input renders
/// nothing.
fn record_table(
    title: &str,
    records: &[Record],
    max_rows: usize,
    max_columns: usize,
    digits: usize,
) -> Option<TableView> {
    let first = records.first()?;
    let columns: Vec<&str> = first
        .keys()
        .map(String::as_str)
        .filter(|key| *key != ROW_KEY)
        .take(max_columns)
        .collect();

    let mut header = vec!["Row".to_string()];
    header.extend(columns.iter().map(|name| (*name).to_string()));
    let mut table = TableView::new(title, header);
    for record in records.iter().take(max_rows) {
        let mut row = vec![Cell::toned(
            cell_text(record.get(ROW_KEY)),
            Tone::Muted,
        )];
        row.extend(
            columns
                .iter()
                .map(|name| Cell::new(numeric_cell_text(record.get(*name), digits))),
        );
        table.push_row(row);
    }
    Some(table)
}
