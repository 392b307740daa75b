//! Processing-step selection and the process button.

use serde::Serialize;
use tracing::debug;

use prep_model::ProcessingStep;

/// Button label before any step is chosen.
pub const GENERIC_PROCESS_LABEL: &str = "Process Selected Step";
/// Button label while a request is in flight.
pub const PROCESSING_LABEL: &str = "Processing...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepCard {
    pub step: ProcessingStep,
    pub name: &'static str,
    pub description: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessButton {
    pub enabled: bool,
    pub label: String,
    pub spinner: bool,
}

/// Owns the currently selected step and the process button state.
#[derive(Debug, Clone)]
pub struct StepSelectionController {
    selected: Option<ProcessingStep>,
    button: ProcessButton,
}

impl Default for StepSelectionController {
    fn default() -> Self {
        Self {
            selected: None,
            button: ProcessButton {
                enabled: false,
                label: GENERIC_PROCESS_LABEL.to_string(),
                spinner: false,
            },
        }
    }
}

impl StepSelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_step(&self) -> Option<ProcessingStep> {
        self.selected
    }

    pub fn button(&self) -> &ProcessButton {
        &self.button
    }

    /// Mark `step` as the only active step and enable processing.
    pub fn select_step(&mut self, step: ProcessingStep) {
        debug!(step = step.number(), "step selected");
        self.selected = Some(step);
        self.button.enabled = true;
        self.button.label = self.idle_label();
    }

    /// Toggle the in-flight indicator. Safe with no step selected.
    pub fn set_processing_state(&mut self, in_flight: bool) {
        if in_flight {
            self.button.enabled = false;
            self.button.label = PROCESSING_LABEL.to_string();
            self.button.spinner = true;
        } else {
            self.button.enabled = self.selected.is_some();
            self.button.label = self.idle_label();
            self.button.spinner = false;
        }
    }

    pub fn is_processing(&self) -> bool {
        self.button.spinner
    }

    /// Step cards in display order, exactly one active after a selection.
    pub fn cards(&self) -> Vec<StepCard> {
        ProcessingStep::all()
            .iter()
            .map(|&step| StepCard {
                step,
                name: step.display_name(),
                description: step.description(),
                active: self.selected == Some(step),
            })
            .collect()
    }

    fn idle_label(&self) -> String {
        match self.selected {
            Some(step) => format!("Process {}", step.display_name()),
            None => GENERIC_PROCESS_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_disabled_with_generic_label() {
        let steps = StepSelectionController::new();
        assert!(!steps.button().enabled);
        assert_eq!(steps.button().label, GENERIC_PROCESS_LABEL);
        assert!(steps.cards().iter().all(|card| !card.active));
    }

    #[test]
    fn selecting_updates_label_and_cards() {
        let mut steps = StepSelectionController::new();
        steps.select_step(ProcessingStep::Scaling);
        steps.select_step(ProcessingStep::Smote);
        insta::assert_snapshot!(steps.button().label, @"Process SMOTE Data Balancing");
        let active: Vec<_> = steps.cards().into_iter().filter(|c| c.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].step, ProcessingStep::Smote);
    }

    #[test]
    fn processing_state_round_trip() {
        let mut steps = StepSelectionController::new();
        steps.select_step(ProcessingStep::FeatureSelection);
        let before = steps.button().clone();

        steps.set_processing_state(true);
        assert!(!steps.button().enabled);
        assert!(steps.button().spinner);
        assert_eq!(steps.button().label, PROCESSING_LABEL);

        steps.set_processing_state(false);
        assert_eq!(steps.button(), &before);
    }

    #[test]
    fn processing_state_without_selection_uses_generic_label() {
        let mut steps = StepSelectionController::new();
        steps.set_processing_state(true);
        steps.set_processing_state(false);
        assert_eq!(steps.button().label, GENERIC_PROCESS_LABEL);
        assert!(!steps.button().enabled);
    }
}
