//! Delayed post-success navigation.

use crate::ports::Navigator;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// A navigation scheduled to run after a display delay.
///
/// The redirect listens on a cancellation token tied to the form's
/// lifetime; once the form is reset or unmounted the navigator is never
/// called.
pub struct ScheduledRedirect {
    path: String,
    cancel: CancellationToken,
    task: JoinHandle<bool>,
}

impl ScheduledRedirect {
    /// Spawn the redirect task on the current runtime.
    pub fn schedule(
        navigator: Arc<dyn Navigator>,
        path: impl Into<String>,
        delay: Duration,
        cancel: CancellationToken,
    ) -> Self {
        let path = path.into();
        let task_path = path.clone();
        let task_cancel = cancel.clone();

        let task = tokio::spawn(async move {
            tokio::select! {
                _ = task_cancel.cancelled() => {
                    debug!(path = %task_path, "Redirect cancelled");
                    false
                }
                _ = tokio::time::sleep(delay) => {
                    info!(path = %task_path, "Redirecting");
                    navigator.go_to(&task_path);
                    true
                }
            }
        });

        Self { path, cancel, task }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the task; `true` if the navigator was called.
    pub async fn wait(self) -> bool {
        self.task.await.unwrap_or(false)
    }
}

impl std::fmt::Debug for ScheduledRedirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledRedirect")
            .field("path", &self.path)
            .field("cancelled", &self.cancel.is_cancelled())
            .field("finished", &self.task.is_finished())
            .finish()
    }
}
