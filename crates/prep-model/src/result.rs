//! Step-specific processing results returned by `POST /process`.
//!
//! The server does not tag the result body with its step; the variant is
//! chosen by the step that was requested (see [`ProcessingResult::from_value`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::preview::Record;
use crate::step::ProcessingStep;

/// Fields every step result carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultCommon {
    pub message: String,
    pub output_file: String,
    /// Chart image as a `data:` URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_base64: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingSummaryItem {
    pub feature: String,
    pub missing_count: u64,
    pub missing_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingValuesResult {
    #[serde(flatten)]
    pub common: ResultCommon,
    #[serde(default)]
    pub missing_summary: Vec<MissingSummaryItem>,
    #[serde(default)]
    pub total_missing_features: Option<u64>,
    #[serde(default)]
    pub sample_output: Vec<MissingSummaryItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingStats {
    pub total_rows: u64,
    pub numeric_features: u64,
    pub feature_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureComparison {
    pub feature: String,
    #[serde(default)]
    pub original_min: Option<f64>,
    #[serde(default)]
    pub original_max: Option<f64>,
    #[serde(default)]
    pub scaled_min: Option<f64>,
    #[serde(default)]
    pub scaled_max: Option<f64>,
    #[serde(default)]
    pub range_reduction: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingResult {
    #[serde(flatten)]
    pub common: ResultCommon,
    #[serde(default)]
    pub before_scaling_table: Vec<Record>,
    #[serde(default)]
    pub after_scaling_table: Vec<Record>,
    #[serde(default)]
    pub feature_comparison: Vec<FeatureComparison>,
    #[serde(default)]
    pub summary_stats: ScalingStats,
}

/// One row of the ANOVA analysis table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureAnalysis {
    pub feature: String,
    #[serde(default)]
    pub f_score: Option<f64>,
    #[serde(default)]
    pub p_value: Option<f64>,
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub significance: String,
}

impl FeatureAnalysis {
    pub fn is_significant(&self) -> bool {
        self.significance == "Significant"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedFeature {
    pub rank: u32,
    pub feature: String,
    #[serde(default)]
    pub f_score: Option<f64>,
    #[serde(default)]
    pub p_value: Option<f64>,
    #[serde(default)]
    pub significance_level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionStats {
    pub total_features_analyzed: u64,
    pub features_selected: u64,
    pub selection_rate: String,
    pub target_column: String,
    pub selection_criteria: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSelectionResult {
    #[serde(flatten)]
    pub common: ResultCommon,
    #[serde(default)]
    pub feature_analysis_table: Vec<FeatureAnalysis>,
    #[serde(default)]
    pub selected_features_summary: Vec<SelectedFeature>,
    #[serde(default)]
    pub sample_output_table: Vec<Record>,
    #[serde(default)]
    pub summary_stats: SelectionStats,
}

/// Per-class counts before and after balancing.
///
/// Older backends report the counts as `before_rus`/`after_rus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDistribution {
    #[serde(rename = "class")]
    pub class_label: String,
    #[serde(alias = "before_rus")]
    pub before_smote: i64,
    #[serde(alias = "after_rus")]
    pub after_smote: i64,
    pub change: i64,
    #[serde(default)]
    pub percentage_change: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancingStats {
    pub total_samples_before: u64,
    pub total_samples_after: u64,
    pub total_features: Option<u64>,
    pub target_column: Option<String>,
    pub classes: Vec<String>,
    pub imbalance_ratio_before: f64,
    pub imbalance_ratio_after: f64,
    pub balancing_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancingResult {
    #[serde(flatten)]
    pub common: ResultCommon,
    #[serde(default)]
    pub distribution_comparison: Vec<ClassDistribution>,
    #[serde(default)]
    pub sample_output_table: Vec<Record>,
    #[serde(default)]
    pub summary_stats: BalancingStats,
}

/// A processing result, tagged by the step that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingResult {
    MissingValues(MissingValuesResult),
    Scaling(ScalingResult),
    FeatureSelection(FeatureSelectionResult),
    Smote(BalancingResult),
}

impl ProcessingResult {
    /// Decode the untagged `result` body for the step that was requested.
    pub fn from_value(step: ProcessingStep, value: Value) -> Result<Self> {
        let invalid = |source| ModelError::InvalidResult {
            step: step.slug(),
            source,
        };
        Ok(match step {
            ProcessingStep::MissingValues => {
                Self::MissingValues(serde_json::from_value(value).map_err(invalid)?)
            }
            ProcessingStep::Scaling => Self::Scaling(serde_json::from_value(value).map_err(invalid)?),
            ProcessingStep::FeatureSelection => {
                Self::FeatureSelection(serde_json::from_value(value).map_err(invalid)?)
            }
            ProcessingStep::Smote => Self::Smote(serde_json::from_value(value).map_err(invalid)?),
        })
    }

    pub fn step(&self) -> ProcessingStep {
        match self {
            Self::MissingValues(_) => ProcessingStep::MissingValues,
            Self::Scaling(_) => ProcessingStep::Scaling,
            Self::FeatureSelection(_) => ProcessingStep::FeatureSelection,
            Self::Smote(_) => ProcessingStep::Smote,
        }
    }

    pub fn common(&self) -> &ResultCommon {
        match self {
            Self::MissingValues(r) => &r.common,
            Self::Scaling(r) => &r.common,
            Self::FeatureSelection(r) => &r.common,
            Self::Smote(r) => &r.common,
        }
    }

    pub fn message(&self) -> &str {
        &self.common().message
    }

    pub fn output_file(&self) -> &str {
        &self.common().output_file
    }

    /// The chart data URI, if the server sent a non-empty one.
    pub fn chart(&self) -> Option<&str> {
        self.common()
            .chart_base64
            .as_deref()
            .filter(|chart| !chart.is_empty())
    }

    /// File name used for `GET /download/<name>`.
    pub fn download_name(&self) -> &str {
        download_name(self.output_file())
    }
}

/// Last `/`-separated segment of a server output path.
pub fn download_name(output_file: &str) -> &str {
    output_file.rsplit('/').next().unwrap_or(output_file)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn download_name_takes_last_segment() {
        assert_eq!(download_name("output/2_scaled_data.csv"), "2_scaled_data.csv");
        assert_eq!(download_name("plain.csv"), "plain.csv");
        assert_eq!(download_name("a/b/c.csv"), "c.csv");
    }

    #[test]
    fn empty_chart_is_treated_as_absent() {
        let result = ProcessingResult::from_value(
            ProcessingStep::MissingValues,
            json!({
                "message": "done",
                "output_file": "output/1_missing_values_analysis.csv",
                "chart_base64": "",
                "missing_summary": []
            }),
        )
        .unwrap();
        assert_eq!(result.chart(), None);
        assert_eq!(result.step(), ProcessingStep::MissingValues);
    }

    #[test]
    fn balancing_accepts_rus_field_names() {
        let result = ProcessingResult::from_value(
            ProcessingStep::Smote,
            json!({
                "message": "RUS data balancing completed successfully",
                "output_file": "output/4_rus_cleaned_data.csv",
                "distribution_comparison": [
                    {"class": "Class 0", "before_rus": 80, "after_rus": 80, "change": 0, "percentage_change": "0.0%"}
                ],
                "summary_stats": {"imbalance_ratio_before": 12.5, "imbalance_ratio_after": 1.0}
            }),
        )
        .unwrap();
        let ProcessingResult::Smote(balancing) = result else {
            panic!("expected balancing result");
        };
        assert_eq!(balancing.distribution_comparison[0].before_smote, 80);
        assert_eq!(balancing.distribution_comparison[0].after_smote, 80);
    }

    #[test]
    fn missing_required_field_is_reported_with_step() {
        let err = ProcessingResult::from_value(ProcessingStep::Scaling, json!({"message": "x"}))
            .unwrap_err();
        assert!(err.to_string().starts_with("invalid scaling result"));
    }
}
