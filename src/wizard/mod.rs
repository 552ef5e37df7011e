//! Booking wizard controller.
//!
//! [`BookingWizard`] owns the form, the active step and the collaborators the
//! booking flow needs (presenter, draft mirror, dispatcher, clock). It is an
//! ordinary value, so several wizards can live side by side.

pub mod step;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::WizardConfig;
use crate::errors::{BookingError, Result};
use crate::form::catalog::{booking_template, WizardTemplate};
use crate::form::{BookingForm, BookingSnapshot, FieldValue, ValidationVerdict};
use crate::persistence::{PersistenceMirror, SaveDebouncer};
use crate::presenter::{InlinePresenter, WizardPresenter};
use crate::storage::LocalStorage;
use crate::submission::{BookingDispatcher, Rejection, SimulatedDispatcher, SubmissionOutcome};
use crate::summary::{BookingSummary, SummaryProjector};
use crate::time::{Clock, SystemClock};

use step::{StepDescriptor, StepState};

pub const CONSENT_ALERT: &str =
    "Please accept the Terms of Service and Privacy Policy to continue.";
pub const DISPATCH_FAILED_ALERT: &str =
    "We could not send your booking request. Please try again.";

pub struct BookingWizard<P: WizardPresenter = InlinePresenter> {
    form: BookingForm,
    steps: Vec<StepDescriptor>,
    state: StepState,
    summary: SummaryProjector,
    presenter: P,
    mirror: PersistenceMirror,
    autosave: SaveDebouncer,
    dispatcher: Arc<dyn BookingDispatcher>,
    clock: Arc<dyn Clock>,
    config: WizardConfig,
    submitting: bool,
}

impl<P: WizardPresenter> BookingWizard<P> {
    /// Builds the standard booking wizard and restores any saved draft.
    pub fn new(config: WizardConfig, presenter: P, storage: Box<dyn LocalStorage>) -> Result<Self> {
        let template = booking_template(&config)?;
        Self::with_template(template, config, presenter, storage)
    }

    pub fn with_template(
        template: WizardTemplate,
        config: WizardConfig,
        presenter: P,
        storage: Box<dyn LocalStorage>,
    ) -> Result<Self> {
        check_steps(&template.form, &template.steps)?;
        let state = StepState::new(template.steps.len())?;
        let mirror = PersistenceMirror::new(storage, config.storage_key.clone());
        let autosave = SaveDebouncer::new(config.autosave_debounce_ms);
        let dispatcher = Arc::new(SimulatedDispatcher::from_millis(config.submit_delay_ms));

        let mut wizard = Self {
            form: template.form,
            steps: template.steps,
            state,
            summary: template.summary,
            presenter,
            mirror,
            autosave,
            dispatcher,
            clock: Arc::new(SystemClock),
            config,
            submitting: false,
        };
        let restored = wizard.mirror.restore_into(&mut wizard.form);
        debug!(restored, "booking wizard initialized");
        wizard.enter_step();
        Ok(wizard)
    }

    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn BookingDispatcher>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn active_step(&self) -> usize {
        self.state.active()
    }

    pub fn total_steps(&self) -> usize {
        self.state.total()
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn snapshot(&self) -> BookingSnapshot {
        self.form.snapshot()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn has_pending_save(&self) -> bool {
        self.autosave.is_pending()
    }

    /// Records a user edit. The field's annotation is cleared (or refreshed
    /// when validating on input) and a draft save is scheduled.
    pub fn input(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.form.set_value(name, value)?;
        if self.config.validate_on_input {
            self.validate_field(name)?;
        } else {
            self.presenter.clear_error(name);
        }
        self.autosave.touch(self.clock.now());
        Ok(())
    }

    /// Focus left `name`: validate it and refresh its annotation.
    pub fn blur(&mut self, name: &str) -> Result<ValidationVerdict> {
        self.validate_field(name)
    }

    /// Saves the draft if the debounce interval has elapsed since the last
    /// edit. Returns whether a save was attempted.
    pub fn tick(&mut self) -> bool {
        if self.autosave.take_due(self.clock.now()) {
            self.save_draft();
            true
        } else {
            false
        }
    }

    /// Saves the draft immediately, dropping any scheduled save.
    pub fn flush_draft(&mut self) {
        self.autosave.cancel();
        self.save_draft();
    }

    /// Validates every field of the active step, refreshing each field's
    /// annotation, and reports whether all of them passed.
    pub fn validate_active_step(&mut self) -> bool {
        let today = self.clock.today();
        let step = &self.steps[self.state.active() - 1];
        let mut valid = true;
        for name in &step.fields {
            if let Some(field) = self.form.field(name) {
                let verdict = field.validate(today);
                present(&mut self.presenter, name, &verdict);
                valid &= verdict.valid;
            }
        }
        debug!(step = self.state.active(), valid, "step validation result");
        valid
    }

    /// Moves to the next step when the active one validates.
    pub fn advance(&mut self) -> bool {
        if !self.validate_active_step() {
            debug!(step = self.state.active(), "validation failed, staying on step");
            return false;
        }
        if !self.state.advance() {
            return false;
        }
        self.enter_step();
        true
    }

    /// Moves back one step without validating.
    pub fn retreat(&mut self) -> bool {
        if !self.state.retreat() {
            return false;
        }
        self.enter_step();
        true
    }

    pub fn jump_to(&mut self, step: usize) -> Result<()> {
        self.state.jump_to(step)?;
        self.enter_step();
        Ok(())
    }

    /// Recap of the current form values.
    pub fn summary(&self) -> BookingSummary {
        self.summary.project(&self.form.snapshot(), &self.form)
    }

    /// Runs the submission pipeline: validate the final step, require consent,
    /// send the booking, then reset the wizard and drop the saved draft.
    ///
    /// Validation and consent failures come back as
    /// [`SubmissionOutcome::Rejected`] with the form untouched. A dispatcher
    /// error is alerted and returned, also leaving the form untouched.
    pub async fn submit(&mut self) -> Result<SubmissionOutcome> {
        if self.submitting {
            return Ok(SubmissionOutcome::Rejected(Rejection::InFlight));
        }
        if !self.state.is_final() {
            return Ok(SubmissionOutcome::Rejected(Rejection::NotFinalStep));
        }
        if !self.validate_active_step() {
            debug!("final validation failed");
            return Ok(SubmissionOutcome::Rejected(Rejection::InvalidStep));
        }
        let consent = self
            .form
            .value(&self.config.consent_field)
            .is_some_and(FieldValue::is_checked);
        if !consent {
            self.presenter.alert(CONSENT_ALERT);
            return Ok(SubmissionOutcome::Rejected(Rejection::ConsentMissing));
        }

        let snapshot = self.form.snapshot();
        self.autosave.cancel();
        if let Err(err) = self.mirror.save(&snapshot) {
            warn!(error = %err, "failed to save booking before submission");
        }

        let submitted_at = self.clock.now();
        let dispatcher = Arc::clone(&self.dispatcher);
        let result = {
            let _busy = SubmitGuard::engage(&mut self.submitting, &mut self.presenter);
            dispatcher.dispatch(&snapshot, submitted_at).await
        };

        let receipt = match result {
            Ok(receipt) => receipt,
            Err(err) => {
                warn!(error = %err, "booking dispatch failed");
                self.presenter.alert(DISPATCH_FAILED_ALERT);
                return Err(err);
            }
        };

        self.form.reset();
        self.state.jump_to(1)?;
        self.enter_step();
        if let Err(err) = self.mirror.clear() {
            warn!(error = %err, "failed to clear saved booking draft");
        }
        self.presenter.acknowledge(&receipt);
        info!(reference = %receipt.reference, "booking submitted successfully");
        Ok(SubmissionOutcome::Submitted(receipt))
    }

    fn validate_field(&mut self, name: &str) -> Result<ValidationVerdict> {
        let field = self
            .form
            .field(name)
            .ok_or_else(|| BookingError::UnknownField(name.to_string()))?;
        let verdict = field.validate(self.clock.today());
        present(&mut self.presenter, name, &verdict);
        Ok(verdict)
    }

    fn enter_step(&mut self) {
        self.presenter
            .show_step(self.state.active(), &self.state.indicators());
        if self.state.is_final() {
            let summary = self.summary();
            self.presenter.show_summary(&summary);
        }
    }

    fn save_draft(&self) {
        if let Err(err) = self.mirror.save(&self.form.snapshot()) {
            warn!(error = %err, "failed to save booking draft");
        }
    }
}

/// Marks a submission in flight for as long as it lives. Dropping it, including
/// when the `submit` future itself is dropped mid-dispatch, re-enables submit.
struct SubmitGuard<'a, P: WizardPresenter> {
    submitting: &'a mut bool,
    presenter: &'a mut P,
}

impl<'a, P: WizardPresenter> SubmitGuard<'a, P> {
    fn engage(submitting: &'a mut bool, presenter: &'a mut P) -> Self {
        *submitting = true;
        presenter.set_submit_busy(true);
        Self {
            submitting,
            presenter,
        }
    }
}

impl<P: WizardPresenter> Drop for SubmitGuard<'_, P> {
    fn drop(&mut self) {
        *self.submitting = false;
        self.presenter.set_submit_busy(false);
    }
}

fn present<P: WizardPresenter>(presenter: &mut P, name: &str, verdict: &ValidationVerdict) {
    match (verdict.valid, verdict.message.as_deref()) {
        (false, Some(message)) => presenter.show_error(name, message),
        (false, None) => presenter.show_error(name, "Invalid value"),
        (true, _) => presenter.clear_error(name),
    }
}

fn check_steps(form: &BookingForm, steps: &[StepDescriptor]) -> Result<()> {
    for (position, step) in steps.iter().enumerate() {
        if step.index != position + 1 {
            return Err(BookingError::InvalidTemplate(format!(
                "step `{}` has index {} but is in position {}",
                step.title,
                step.index,
                position + 1
            )));
        }
        if let Some(missing) = step.fields.iter().find(|name| !form.contains(name)) {
            return Err(BookingError::InvalidTemplate(format!(
                "step {} references unknown field `{}`",
                step.index, missing
            )));
        }
    }
    Ok(())
}
