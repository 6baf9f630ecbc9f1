//! Interactive registration session.

use crate::error::AppResult;
use crate::terminal::Terminal;
use registration::{
    FieldName, FormHandle, Locale, ScheduledRedirect, SubmissionController, SubmitReport,
};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::{debug, warn};

/// How a session ended.
#[derive(Debug)]
pub enum SessionEnd {
    /// Account created; the redirect is pending.
    Registered(ScheduledRedirect),
    /// Input closed or the form went away.
    Aborted,
}

/// Prompts for each field on a line-based input and drives the controller.
pub struct Session<R> {
    form: FormHandle,
    controller: Arc<SubmissionController>,
    lines: Lines<R>,
    terminal: Terminal,
    locale: Locale,
}

impl<R: AsyncBufRead + Unpin> Session<R> {
    pub fn new(
        form: FormHandle,
        controller: Arc<SubmissionController>,
        input: R,
        terminal: Terminal,
    ) -> Self {
        let locale = controller.settings().locale;
        Self {
            form,
            controller,
            lines: input.lines(),
            terminal,
            locale,
        }
    }

    /// Run until the account is created or input ends.
    pub async fn run(&mut self) -> AppResult<SessionEnd> {
        let mut pending: Vec<FieldName> = FieldName::ALL.to_vec();

        loop {
            for name in std::mem::take(&mut pending) {
                if !self.ask(name).await? {
                    return Ok(SessionEnd::Aborted);
                }
            }

            match self.controller.submit(&self.form).await {
                SubmitReport::Created { redirect, .. } => {
                    return Ok(SessionEnd::Registered(redirect));
                }
                SubmitReport::Rejected(reason) => {
                    pending = match reason.field() {
                        Some(FieldName::Password) => {
                            vec![FieldName::Password, FieldName::ConfirmPassword]
                        }
                        Some(field) => vec![field],
                        None => {
                            if !self.confirm_retry().await? {
                                return Ok(SessionEnd::Aborted);
                            }
                            Vec::new()
                        }
                    };
                }
                SubmitReport::Invalid { error_count } => {
                    debug!(error_count, "Re-prompting invalid fields");
                    pending = self.form.with(|form| {
                        form.visible_errors()
                            .into_iter()
                            .map(|(name, _)| name)
                            .collect()
                    });
                }
                SubmitReport::Ignored(phase) => {
                    warn!(?phase, "Form not accepting submissions");
                    return Ok(SessionEnd::Aborted);
                }
                SubmitReport::Discarded => return Ok(SessionEnd::Aborted),
            }
        }
    }

    /// Prompt until the field is valid. `false` when input is exhausted.
    async fn ask(&mut self, name: FieldName) -> AppResult<bool> {
        loop {
            self.terminal.prompt(self.locale.field_label(name));
            let Some(line) = self.lines.next_line().await? else {
                return Ok(false);
            };

            self.form.update_field(name, line.trim_end_matches('\r'));
            match self.form.with(|form| form.visible_error(name).cloned()) {
                Some(err) => self
                    .terminal
                    .line(&format!("  {}", self.locale.validation_message(&err))),
                None => return Ok(true),
            }
        }
    }

    async fn confirm_retry(&mut self) -> AppResult<bool> {
        let prompt = match self.locale {
            Locale::En => "Try again? [Y/n]",
            Locale::Fr => "Réessayer ? [O/n]",
        };
        self.terminal.prompt(prompt);

        let Some(answer) = self.lines.next_line().await? else {
            return Ok(false);
        };
        Ok(!matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "n" | "no" | "non"
        ))
    }
}
