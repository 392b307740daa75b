//! Tests for prep-model wire types.

use proptest::prelude::*;
use serde_json::json;

use prep_model::{ProcessResponse, ProcessingResult, ProcessingStep, is_csv_filename};

#[test]
fn process_response_decodes_feature_selection() {
    let body = json!({
        "success": true,
        "step": "3",
        "result": {
            "message": "ANOVA feature selection completed successfully",
            "output_file": "output/3_selected_features.csv",
            "chart_base64": "data:image/png;base64,AAAA",
            "feature_analysis_table": [
                {"feature": "Age", "p_value": 0.0003, "f_score": 14.2, "selected": true, "significance": "Significant"},
                {"feature": "Smokes", "p_value": null, "f_score": null, "selected": false, "significance": "Not Significant"}
            ],
            "selected_features_summary": [
                {"rank": 1, "feature": "Age", "f_score": 14.2, "p_value": 0.0003, "significance_level": "p < 0.05"}
            ],
            "sample_output_table": [{"row": "Row 1", "Age": 0.25, "Biopsy": 0}],
            "summary_stats": {
                "total_features_analyzed": 2,
                "features_selected": 1,
                "selection_criteria": "p-value < 0.05 or top 10",
                "target_column": "Biopsy",
                "selection_rate": "50.0%"
            }
        }
    });
    let response: ProcessResponse = serde_json::from_value(body).unwrap();
    let result =
        ProcessingResult::from_value(ProcessingStep::FeatureSelection, response.result).unwrap();
    let ProcessingResult::FeatureSelection(selection) = &result else {
        panic!("expected feature selection result");
    };
    assert_eq!(selection.feature_analysis_table.len(), 2);
    assert!(selection.feature_analysis_table[0].is_significant());
    assert_eq!(selection.feature_analysis_table[1].p_value, None);
    assert_eq!(selection.summary_stats.target_column, "Biopsy");
    assert_eq!(result.download_name(), "3_selected_features.csv");
    assert_eq!(result.chart(), Some("data:image/png;base64,AAAA"));
}

#[test]
fn sample_tables_keep_server_column_order() {
    let result = ProcessingResult::from_value(
        ProcessingStep::Scaling,
        json!({
            "message": "MinMax scaling completed successfully",
            "output_file": "output/2_scaled_data.csv",
            "before_scaling_table": [{"row": "Row 1", "zeta": 3, "alpha": 1}],
            "after_scaling_table": [{"row": "Row 1", "zeta": 1.0, "alpha": 0.0}],
            "summary_stats": {"total_rows": 1, "numeric_features": 2}
        }),
    )
    .unwrap();
    let ProcessingResult::Scaling(scaling) = result else {
        panic!("expected scaling result");
    };
    let keys: Vec<&str> = scaling.before_scaling_table[0]
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["row", "zeta", "alpha"]);
}

proptest! {
    #[test]
    fn csv_check_ignores_case(stem in "[a-zA-Z0-9_]{1,12}", upper in any::<bool>()) {
        let ext = if upper { ".CSV" } else { ".csv" };
        let name = format!("{stem}{ext}");
        prop_assert!(is_csv_filename(&name));
    }

    #[test]
    fn other_extensions_are_rejected(stem in "[a-z]{1,8}", ext in "(txt|xlsx|json|tsv|parquet)") {
        let name = format!("{stem}.{ext}");
        prop_assert!(!is_csv_filename(&name));
    }
}
