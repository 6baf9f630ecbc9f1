//! Registration form state.

use crate::error::ValidationError;
use crate::types::{FieldName, FieldSet, SubmissionOutcome, SubmissionPhase};
use crate::validator;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Field values, touch flags, derived errors and submission phase of one form.
///
/// Errors are recomputed from the full field set on every mutation and are
/// never stored independently of the values they describe.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    fields: FieldSet,
    touched: BTreeSet<FieldName>,
    errors: BTreeMap<FieldName, ValidationError>,
    phase: SubmissionPhase,
    submit_attempted: bool,
}

impl RegistrationForm {
    /// Create an empty, idle form. Errors are derived immediately so an
    /// untouched empty form already knows it is invalid.
    pub fn new() -> Self {
        let mut form = Self::default();
        form.revalidate();
        form
    }

    /// Set a field value, mark it touched and re-derive errors.
    pub fn update_field(&mut self, name: FieldName, value: impl Into<String>) {
        self.fields.set(name, value);
        self.touched.insert(name);
        self.revalidate();
    }

    /// Mark a field as visited without changing its value.
    pub fn blur(&mut self, name: FieldName) {
        self.touched.insert(name);
    }

    /// Return to the initial empty idle state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn value(&self, name: FieldName) -> &str {
        self.fields.get(name)
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn is_touched(&self, name: FieldName) -> bool {
        self.touched.contains(&name)
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    /// Current error for a field, whether or not it is shown yet.
    pub fn error(&self, name: FieldName) -> Option<&ValidationError> {
        self.errors.get(&name)
    }

    pub fn errors(&self) -> &BTreeMap<FieldName, ValidationError> {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error as the user should see it: only for touched fields, or for
    /// every field once a submit has been attempted.
    pub fn visible_error(&self, name: FieldName) -> Option<&ValidationError> {
        if self.submit_attempted || self.is_touched(name) {
            self.error(name)
        } else {
            None
        }
    }

    /// All currently visible errors, in field order.
    pub fn visible_errors(&self) -> Vec<(FieldName, &ValidationError)> {
        FieldName::ALL
            .into_iter()
            .filter_map(|name| self.visible_error(name).map(|err| (name, err)))
            .collect()
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.phase.accepts_submit()
    }

    /// Touch every field and re-run validation over the full set.
    /// Returns `true` when the form is clean.
    pub(crate) fn touch_all(&mut self) -> bool {
        self.submit_attempted = true;
        self.touched.extend(FieldName::ALL);
        self.revalidate();
        self.is_valid()
    }

    /// Enter the submitting phase. Only allowed from `Idle` or `Failed`.
    pub(crate) fn begin_submission(&mut self) -> bool {
        if !self.phase.accepts_submit() {
            return false;
        }
        self.phase = SubmissionPhase::Submitting;
        true
    }

    /// Leave the submitting phase according to the attempt's outcome.
    pub(crate) fn complete_submission(&mut self, outcome: &SubmissionOutcome) {
        if self.phase != SubmissionPhase::Submitting {
            return;
        }
        self.phase = if outcome.is_created() {
            SubmissionPhase::Success
        } else {
            SubmissionPhase::Failed
        };
    }

    /// Release the submitting gate without an outcome.
    pub(crate) fn abandon_submission(&mut self) {
        if self.phase == SubmissionPhase::Submitting {
            self.phase = SubmissionPhase::Failed;
        }
    }

    fn revalidate(&mut self) {
        self.errors = validator::validate(&self.fields);
        debug!(error_count = self.errors.len(), "Form revalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Identity, RejectionReason};

    fn filled_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.update_field(FieldName::Firstname, "Al");
        form.update_field(FieldName::Surname, "Doe");
        form.update_field(FieldName::Email, "al@x.com");
        form.update_field(FieldName::Password, "secret1");
        form.update_field(FieldName::ConfirmPassword, "secret1");
        form
    }

    #[test]
    fn test_new_form_is_idle_and_hides_errors() {
        let form = RegistrationForm::new();

        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert!(!form.is_valid());
        assert!(form.visible_errors().is_empty());
        assert!(form.can_submit());
    }

    #[test]
    fn test_update_field_touches_and_shows_only_that_error() {
        let mut form = RegistrationForm::new();
        form.update_field(FieldName::Password, "abc");

        assert!(form.is_touched(FieldName::Password));
        assert_eq!(
            form.visible_error(FieldName::Password),
            Some(&ValidationError::PasswordTooShort { min: 6 })
        );
        assert!(form.visible_error(FieldName::Email).is_none());
        assert!(form.error(FieldName::Email).is_some());
    }

    #[test]
    fn test_blur_touches_without_changing_value() {
        let mut form = RegistrationForm::new();
        form.blur(FieldName::Email);

        assert_eq!(form.value(FieldName::Email), "");
        assert_eq!(
            form.visible_error(FieldName::Email),
            Some(&ValidationError::Required(FieldName::Email))
        );
    }

    #[test]
    fn test_confirm_password_follows_password_changes() {
        let mut form = filled_form();
        assert!(form.error(FieldName::ConfirmPassword).is_none());

        form.update_field(FieldName::Password, "secret2");
        assert_eq!(
            form.error(FieldName::ConfirmPassword),
            Some(&ValidationError::PasswordMismatch)
        );

        form.update_field(FieldName::ConfirmPassword, "secret2");
        assert!(form.error(FieldName::ConfirmPassword).is_none());
        assert!(form.is_valid());
    }

    #[test]
    fn test_touch_all_reveals_every_error() {
        let mut form = RegistrationForm::new();
        form.update_field(FieldName::Firstname, "Al");

        assert!(!form.touch_all());
        assert!(form.submit_attempted());
        assert_eq!(form.visible_errors().len(), 4);
    }

    #[test]
    fn test_phase_transitions() {
        let mut form = filled_form();

        assert!(form.begin_submission());
        assert_eq!(form.phase(), SubmissionPhase::Submitting);
        assert!(!form.can_submit());
        assert!(!form.begin_submission());

        form.complete_submission(&SubmissionOutcome::Rejected(RejectionReason::Unknown));
        assert_eq!(form.phase(), SubmissionPhase::Failed);
        assert!(form.can_submit());

        assert!(form.begin_submission());
        form.complete_submission(&SubmissionOutcome::Created(Identity::new("uid", "al@x.com")));
        assert_eq!(form.phase(), SubmissionPhase::Success);

        // Success is terminal
        assert!(!form.begin_submission());
        form.abandon_submission();
        assert_eq!(form.phase(), SubmissionPhase::Success);
    }

    #[test]
    fn test_complete_ignored_outside_submitting() {
        let mut form = filled_form();
        form.complete_submission(&SubmissionOutcome::Created(Identity::new("uid", "al@x.com")));
        assert_eq!(form.phase(), SubmissionPhase::Idle);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut form = filled_form();
        form.touch_all();
        form.begin_submission();

        form.reset();

        assert_eq!(form.phase(), SubmissionPhase::Idle);
        assert_eq!(form.value(FieldName::Email), "");
        assert!(!form.submit_attempted());
        assert!(!form.is_touched(FieldName::Email));
        assert!(form.visible_errors().is_empty());
    }
}
