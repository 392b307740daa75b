//! The four server-side processing steps.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A preprocessing step the backend can run on the uploaded CSV.
///
/// Steps are numbered 1 through 4 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProcessingStep {
    MissingValues,
    Scaling,
    FeatureSelection,
    Smote,
}

impl ProcessingStep {
    /// All steps in wire order.
    pub const fn all() -> &'static [ProcessingStep] {
        &[
            Self::MissingValues,
            Self::Scaling,
            Self::FeatureSelection,
            Self::Smote,
        ]
    }

    /// Wire number (1-based).
    pub const fn number(self) -> u8 {
        match self {
            Self::MissingValues => 1,
            Self::Scaling => 2,
            Self::FeatureSelection => 3,
            Self::Smote => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::all().iter().copied().find(|step| step.number() == number)
    }

    /// Name shown on the step card and the process button.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::MissingValues => "Missing Values Analysis",
            Self::Scaling => "MinMax Scaling",
            Self::FeatureSelection => "Feature Selection (ANOVA)",
            Self::Smote => "SMOTE Data Balancing",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::MissingValues => "Count and rank missing values per column",
            Self::Scaling => "Normalize numeric features into the 0-1 range",
            Self::FeatureSelection => "Rank features by ANOVA F-score against the target",
            Self::Smote => "Rebalance target classes and compare distributions",
        }
    }

    /// Short identifier accepted on the command line.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::MissingValues => "missing-values",
            Self::Scaling => "scaling",
            Self::FeatureSelection => "feature-selection",
            Self::Smote => "smote",
        }
    }

    /// The `step` field of a `/process` request body.
    pub fn wire_value(self) -> String {
        self.number().to_string()
    }
}

impl fmt::Display for ProcessingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ProcessingStep {
    type Err = ModelError;

    /// Accepts the wire number ("1".."4") or the slug, case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Ok(number) = trimmed.parse::<u8>() {
            return Self::from_number(number)
                .ok_or_else(|| ModelError::UnknownStep(trimmed.to_string()));
        }
        Self::all()
            .iter()
            .copied()
            .find(|step| step.slug().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownStep(trimmed.to_string()))
    }
}
