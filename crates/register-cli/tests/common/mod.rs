//! Shared fixtures for session tests.

#![allow(dead_code)]

use identity_client::{IdentityClient, ProfileDatabaseClient};
use register_cli::{RouteNavigator, Session, Terminal, TerminalNotifier};
use registration::{ControllerSettings, FormHandle, Locale, SubmissionController};
use register_cli::terminal::CapturedOutput;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct Fixture {
    pub server: MockServer,
    pub form: FormHandle,
    pub output: CapturedOutput,
    pub route: watch::Receiver<Option<String>>,
    controller: Arc<SubmissionController>,
    terminal: Terminal,
}

impl Fixture {
    pub async fn start(locale: Locale) -> Self {
        let server = MockServer::start().await;

        let auth = IdentityClient::new("test-api-key", server.uri(), Duration::from_secs(5))
            .expect("identity client");
        let profiles = ProfileDatabaseClient::new(server.uri(), Duration::from_secs(5))
            .expect("database client");

        let (terminal, output) = Terminal::capture();
        let (navigator, route) = RouteNavigator::new(terminal.clone());

        let controller = SubmissionController::new(
            Arc::new(auth),
            Arc::new(profiles),
            Arc::new(TerminalNotifier::new(terminal.clone())),
            Arc::new(navigator),
        )
        .with_settings(ControllerSettings {
            redirect_delay: Duration::from_millis(20),
            profile_retry_backoff: Duration::from_millis(1),
            locale,
            ..ControllerSettings::default()
        });

        Self {
            server,
            form: FormHandle::mount(),
            output,
            route,
            controller: Arc::new(controller),
            terminal,
        }
    }

    /// Session reading the given lines as user input.
    pub fn session(&self, input: &'static str) -> Session<&'static [u8]> {
        Session::new(
            self.form.clone(),
            self.controller.clone(),
            input.as_bytes(),
            self.terminal.clone(),
        )
    }

    pub async fn accept_sign_up(&self, uid: &str, email: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "localId": uid,
                "email": email,
                "idToken": "id-token",
                "refreshToken": "refresh-token",
                "expiresIn": "3600"
            })))
            .mount(&self.server)
            .await;
    }

    /// Reject the next sign-up with the given service error message.
    pub async fn reject_sign_up_once(&self, message: &str) {
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {"code": 400, "message": message}
            })))
            .up_to_n_times(1)
            .mount(&self.server)
            .await;
    }

    pub async fn accept_profiles(&self) {
        Mock::given(method("PUT"))
            .and(path_regex(r"^/users/.+\.json$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&self.server)
            .await;
    }

    pub async fn sign_up_requests(&self) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path() == "/v1/accounts:signUp")
            .count()
    }
}
