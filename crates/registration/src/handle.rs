//! Mounted form handle.
//!
//! A `FormHandle` ties one `RegistrationForm` to a component lifetime. The
//! submission controller only ever mutates the form through the handle, so
//! an attempt that completes after `reset` or `unmount` can be recognised
//! and dropped instead of touching discarded state.

use crate::form::RegistrationForm;
use crate::types::{FieldName, FieldSet, SubmissionOutcome, SubmissionPhase};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;
use tracing::debug;

struct Mounted {
    form: RegistrationForm,
    /// Bumped on every reset; attempts started under an older value are stale.
    generation: u64,
    /// Cancelled on reset or unmount. Scheduled effects listen on it.
    scope: CancellationToken,
    mounted: bool,
}

/// Shared handle to a mounted registration form.
#[derive(Clone)]
pub struct FormHandle {
    inner: Arc<Mutex<Mounted>>,
    lifetime: CancellationToken,
}

/// Result of trying to open a submission attempt.
pub(crate) enum BeginAttempt {
    /// Already submitting, succeeded, or unmounted.
    Busy(SubmissionPhase),
    /// Validation failed after touching every field.
    Invalid(usize),
    Started(AttemptTicket),
}

/// Snapshot of the form taken when an attempt starts.
pub(crate) struct AttemptTicket {
    pub(crate) generation: u64,
    pub(crate) fields: FieldSet,
}

impl FormHandle {
    /// Mount a fresh, empty form.
    pub fn mount() -> Self {
        let lifetime = CancellationToken::new();
        let scope = lifetime.child_token();

        Self {
            inner: Arc::new(Mutex::new(Mounted {
                form: RegistrationForm::new(),
                generation: 0,
                scope,
                mounted: true,
            })),
            lifetime,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Mounted> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn update_field(&self, name: FieldName, value: impl Into<String>) {
        let mut state = self.lock();
        if state.mounted {
            state.form.update_field(name, value);
        }
    }

    pub fn blur(&self, name: FieldName) {
        let mut state = self.lock();
        if state.mounted {
            state.form.blur(name);
        }
    }

    /// Logical restart: empty idle form, pending effects cancelled, any
    /// in-flight attempt detached from the new state.
    pub fn reset(&self) {
        let mut state = self.lock();
        if !state.mounted {
            return;
        }
        state.form.reset();
        state.generation += 1;
        state.scope.cancel();
        state.scope = self.lifetime.child_token();
        debug!(generation = state.generation, "Form reset");
    }

    /// Tear the form down. Pending completions and scheduled redirects
    /// become no-ops.
    pub fn unmount(&self) {
        let mut state = self.lock();
        if !state.mounted {
            return;
        }
        state.mounted = false;
        self.lifetime.cancel();
        debug!("Form unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.lock().mounted
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.lock().form.phase()
    }

    /// Run a read-only closure against the current state.
    pub fn with<R>(&self, f: impl FnOnce(&RegistrationForm) -> R) -> R {
        f(&self.lock().form)
    }

    /// Token cancelled when the form unmounts.
    pub fn lifetime(&self) -> CancellationToken {
        self.lifetime.clone()
    }

    pub(crate) fn begin_attempt(&self) -> BeginAttempt {
        let mut state = self.lock();
        if !state.mounted {
            return BeginAttempt::Busy(state.form.phase());
        }

        let phase = state.form.phase();
        if !phase.accepts_submit() {
            return BeginAttempt::Busy(phase);
        }

        if !state.form.touch_all() {
            return BeginAttempt::Invalid(state.form.errors().len());
        }

        state.form.begin_submission();
        BeginAttempt::Started(AttemptTicket {
            generation: state.generation,
            fields: state.form.fields().clone(),
        })
    }

    /// Apply an outcome if the attempt still belongs to the live form.
    /// Returns the scope token for follow-up effects, or `None` when the
    /// form was reset or unmounted in the meantime.
    pub(crate) fn finish_attempt(
        &self,
        ticket: &AttemptTicket,
        outcome: &SubmissionOutcome,
    ) -> Option<CancellationToken> {
        let mut state = self.lock();
        if !state.mounted || state.generation != ticket.generation {
            return None;
        }
        state.form.complete_submission(outcome);
        Some(state.scope.clone())
    }

    pub(crate) fn abandon_attempt(&self, generation: u64) {
        let mut state = self.lock();
        if state.mounted && state.generation == generation {
            state.form.abandon_submission();
        }
    }
}

impl Default for FormHandle {
    fn default() -> Self {
        Self::mount()
    }
}
