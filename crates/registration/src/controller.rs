//! Submission workflow.
//!
//! Validates the whole form, creates the account, writes the profile,
//! notifies the user and schedules the redirect. Every failure is handled
//! here; nothing propagates to the caller as an error.

use crate::handle::{BeginAttempt, FormHandle};
use crate::messages::Locale;
use crate::ports::{AuthService, Navigator, Notifier, ProfileStore};
use crate::redirect::ScheduledRedirect;
use crate::types::{
    FieldName, Identity, Profile, RejectionReason, SubmissionOutcome, SubmissionPhase,
};
use chrono::Utc;
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

const DEFAULT_REDIRECT_PATH: &str = "/login";
const DEFAULT_REDIRECT_DELAY_MS: u64 = 2000;
const DEFAULT_PROFILE_SAVE_ATTEMPTS: u32 = 3;
const DEFAULT_PROFILE_RETRY_BACKOFF_MS: u64 = 200;
const MAX_PROFILE_RETRY_BACKOFF_MS: u64 = 2000;

/// Tunables for the submission workflow.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Route to navigate to after a successful registration.
    pub redirect_path: String,
    /// How long the success notification stays up before redirecting.
    pub redirect_delay: Duration,
    /// Total profile write attempts before giving up.
    pub profile_save_attempts: u32,
    /// Initial backoff between profile write attempts.
    pub profile_retry_backoff: Duration,
    pub locale: Locale,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            redirect_path: DEFAULT_REDIRECT_PATH.into(),
            redirect_delay: Duration::from_millis(DEFAULT_REDIRECT_DELAY_MS),
            profile_save_attempts: DEFAULT_PROFILE_SAVE_ATTEMPTS,
            profile_retry_backoff: Duration::from_millis(DEFAULT_PROFILE_RETRY_BACKOFF_MS),
            locale: Locale::default(),
        }
    }
}

/// What a call to [`SubmissionController::submit`] did.
#[derive(Debug)]
pub enum SubmitReport {
    /// The form was not accepting submissions (already submitting,
    /// already succeeded, or unmounted). Nothing happened.
    Ignored(SubmissionPhase),
    /// Validation failed; every error is now visible. No network call.
    Invalid { error_count: usize },
    /// The service answered but the form was reset or unmounted first.
    Discarded,
    /// Account created; the redirect is pending.
    Created {
        identity: Identity,
        /// `false` if the account exists but its profile could not be written.
        profile_saved: bool,
        redirect: ScheduledRedirect,
    },
    /// The service refused the attempt. The form can be resubmitted.
    Rejected(RejectionReason),
}

/// Drives one registration form through validation and account creation.
pub struct SubmissionController {
    auth: Arc<dyn AuthService>,
    profiles: Arc<dyn ProfileStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    settings: ControllerSettings,
}

impl SubmissionController {
    pub fn new(
        auth: Arc<dyn AuthService>,
        profiles: Arc<dyn ProfileStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            auth,
            profiles,
            notifier,
            navigator,
            settings: ControllerSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ControllerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    /// Submit the form.
    ///
    /// At most one attempt is in flight per form: while the form is
    /// submitting, further calls return [`SubmitReport::Ignored`] without
    /// reaching the service.
    #[instrument(skip_all)]
    pub async fn submit(&self, form: &FormHandle) -> SubmitReport {
        let ticket = match form.begin_attempt() {
            BeginAttempt::Busy(phase) => {
                debug!(?phase, "Submit ignored");
                return SubmitReport::Ignored(phase);
            }
            BeginAttempt::Invalid(error_count) => {
                info!(error_count, "Submit blocked by validation errors");
                return SubmitReport::Invalid { error_count };
            }
            BeginAttempt::Started(ticket) => ticket,
        };

        let mut guard = AttemptGuard {
            form,
            generation: ticket.generation,
            armed: true,
        };

        let email = ticket.fields.get(FieldName::Email);
        let password = SecretString::new(ticket.fields.get(FieldName::Password).to_string());
        debug!(email = %email, "Creating account");

        match self.auth.create_account(email, &password).await {
            Ok(identity) => {
                // The account exists from here on; the form must not fall
                // back to Failed even if this future is dropped.
                guard.disarm();
                let outcome = SubmissionOutcome::Created(identity.clone());
                let scope = form.finish_attempt(&ticket, &outcome);

                let profile = Profile::from_fields(&ticket.fields, Utc::now());
                let profile_saved = self.save_profile(&identity, &profile).await;

                let Some(scope) = scope.filter(|scope| !scope.is_cancelled()) else {
                    info!(uid = %identity.uid, "Form gone before account creation completed");
                    return SubmitReport::Discarded;
                };

                info!(uid = %identity.uid, profile_saved, "Registration succeeded");
                self.notifier.success(self.settings.locale.success_message());

                let redirect = ScheduledRedirect::schedule(
                    self.navigator.clone(),
                    self.settings.redirect_path.clone(),
                    self.settings.redirect_delay,
                    scope,
                );

                SubmitReport::Created {
                    identity,
                    profile_saved,
                    redirect,
                }
            }
            Err(err) => {
                let reason = RejectionReason::classify(&err.code);
                match reason {
                    RejectionReason::Unknown => {
                        error!(code = %err.code, message = %err.message, "Account creation failed");
                    }
                    _ => {
                        warn!(code = %err.code, ?reason, "Account creation rejected");
                    }
                }

                guard.disarm();
                if form
                    .finish_attempt(&ticket, &SubmissionOutcome::Rejected(reason))
                    .is_none()
                {
                    info!("Form gone before account creation failed");
                    return SubmitReport::Discarded;
                }

                self.notifier
                    .error(self.settings.locale.rejection_message(reason));
                SubmitReport::Rejected(reason)
            }
        }
    }

    /// Write the profile, retrying with backoff. The account already exists
    /// at this point, so a final failure is logged and reported, not raised.
    async fn save_profile(&self, identity: &Identity, profile: &Profile) -> bool {
        let attempts = self.settings.profile_save_attempts.max(1);
        let mut backoff = self.settings.profile_retry_backoff;

        for attempt in 1..=attempts {
            match self.profiles.save(identity, profile).await {
                Ok(()) => {
                    debug!(uid = %identity.uid, attempt, "Profile saved");
                    return true;
                }
                Err(e) if attempt < attempts => {
                    warn!(uid = %identity.uid, attempt, error = %e, "Profile save failed, retrying");
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(Duration::from_millis(MAX_PROFILE_RETRY_BACKOFF_MS));
                }
                Err(e) => {
                    error!(
                        uid = %identity.uid,
                        attempts,
                        error = %e,
                        "Profile save failed; account exists without profile"
                    );
                }
            }
        }

        false
    }
}

/// Releases the submitting gate if the submit future is dropped before an
/// outcome was applied.
struct AttemptGuard<'a> {
    form: &'a FormHandle,
    generation: u64,
    armed: bool,
}

impl AttemptGuard<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Submission abandoned while in flight");
            self.form.abandon_attempt(self.generation);
        }
    }
}
