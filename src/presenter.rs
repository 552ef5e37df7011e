//! Presentation surface for the wizard. The controller never renders anything
//! itself; it reports annotations, step changes and outcomes through
//! [`WizardPresenter`].

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::submission::SubmissionReceipt;
use crate::summary::BookingSummary;

pub trait WizardPresenter {
    /// Replaces any annotation on `field` with one showing `message` and marks
    /// the field as errored.
    fn show_error(&mut self, field: &str, message: &str);

    /// Removes the annotation and errored mark from `field`, if present.
    fn clear_error(&mut self, field: &str);

    fn show_step(&mut self, _step: usize, _indicators: &[bool]) {}

    fn show_summary(&mut self, _summary: &BookingSummary) {}

    /// Blocking notice the user has to dismiss.
    fn alert(&mut self, message: &str);

    fn set_submit_busy(&mut self, _busy: bool) {}

    fn acknowledge(&mut self, _receipt: &SubmissionReceipt) {}
}

/// Error text rendered immediately after the field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAnnotation {
    pub after: String,
    pub message: String,
}

/// Headless presenter that keeps the current view state in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlinePresenter {
    annotations: BTreeMap<String, FieldAnnotation>,
    errored: BTreeSet<String>,
    step: usize,
    indicators: Vec<bool>,
    summary: Option<BookingSummary>,
    summary_renders: usize,
    alerts: Vec<String>,
    submit_busy: bool,
    busy_transitions: Vec<bool>,
    acknowledgements: Vec<SubmissionReceipt>,
}

impl InlinePresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn annotation(&self, field: &str) -> Option<&FieldAnnotation> {
        self.annotations.get(field)
    }

    pub fn error_message(&self, field: &str) -> Option<&str> {
        self.annotations
            .get(field)
            .map(|annotation| annotation.message.as_str())
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_errored(&self, field: &str) -> bool {
        self.errored.contains(field)
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn indicators(&self) -> &[bool] {
        &self.indicators
    }

    pub fn summary(&self) -> Option<&BookingSummary> {
        self.summary.as_ref()
    }

    /// How many times a summary has been rendered.
    pub fn summary_renders(&self) -> usize {
        self.summary_renders
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn is_submit_busy(&self) -> bool {
        self.submit_busy
    }

    pub fn busy_transitions(&self) -> &[bool] {
        &self.busy_transitions
    }

    pub fn acknowledgements(&self) -> &[SubmissionReceipt] {
        &self.acknowledgements
    }
}

impl WizardPresenter for InlinePresenter {
    fn show_error(&mut self, field: &str, message: &str) {
        self.clear_error(field);
        self.annotations.insert(
            field.to_string(),
            FieldAnnotation {
                after: field.to_string(),
                message: message.to_string(),
            },
        );
        self.errored.insert(field.to_string());
    }

    fn clear_error(&mut self, field: &str) {
        self.annotations.remove(field);
        self.errored.remove(field);
    }

    fn show_step(&mut self, step: usize, indicators: &[bool]) {
        debug!(step, "showing step");
        self.step = step;
        self.indicators = indicators.to_vec();
    }

    fn show_summary(&mut self, summary: &BookingSummary) {
        self.summary = Some(summary.clone());
        self.summary_renders += 1;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn set_submit_busy(&mut self, busy: bool) {
        self.submit_busy = busy;
        self.busy_transitions.push(busy);
    }

    fn acknowledge(&mut self, receipt: &SubmissionReceipt) {
        self.acknowledgements.push(receipt.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_error_replaces_previous_annotation() {
        let mut presenter = InlinePresenter::new();
        presenter.show_error("email", "Email Address is required");
        presenter.show_error("email", "Please enter a valid email address");
        assert_eq!(presenter.annotation_count(), 1);
        assert_eq!(
            presenter.annotation("email"),
            Some(&FieldAnnotation {
                after: "email".into(),
                message: "Please enter a valid email address".into(),
            })
        );
        assert!(presenter.is_errored("email"));
    }

    #[test]
    fn show_error_is_idempotent() {
        let mut once = InlinePresenter::new();
        once.show_error("phone", "Please enter a valid phone number");
        let mut twice = once.clone();
        twice.show_error("phone", "Please enter a valid phone number");
        assert_eq!(once, twice);
    }

    #[test]
    fn clear_error_is_idempotent() {
        let mut presenter = InlinePresenter::new();
        presenter.show_error("phone", "Please enter a valid phone number");
        presenter.clear_error("phone");
        let after_once = presenter.clone();
        presenter.clear_error("phone");
        assert_eq!(presenter, after_once);
        assert!(!presenter.is_errored("phone"));
        assert_eq!(presenter.annotation_count(), 0);
    }

    #[test]
    fn clear_error_leaves_other_fields_alone() {
        let mut presenter = InlinePresenter::new();
        presenter.show_error("email", "bad");
        presenter.show_error("phone", "bad");
        presenter.clear_error("email");
        assert!(presenter.is_errored("phone"));
        assert_eq!(presenter.error_message("phone"), Some("bad"));
    }
}
