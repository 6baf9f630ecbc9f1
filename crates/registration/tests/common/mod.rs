//! Common test doubles for submission integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use registration::{
    AuthError, AuthService, FieldName, FormHandle, Identity, Navigator, Notifier, Profile,
    ProfileStore, StoreError,
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Side effect observed by the notifier or navigator, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Success(String),
    Error(String),
    Navigate(String),
}

/// Shared, ordered log of user-visible effects.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<Event>>>);

impl EventLog {
    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }
}

pub struct RecordingNotifier(pub EventLog);

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.0.push(Event::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.0.push(Event::Error(message.to_string()));
    }
}

pub struct RecordingNavigator(pub EventLog);

impl Navigator for RecordingNavigator {
    fn go_to(&self, path: &str) {
        self.0.push(Event::Navigate(path.to_string()));
    }
}

/// Auth service that answers with a fixed result once released.
pub struct GatedAuthService {
    result: Result<Identity, AuthError>,
    gate: Notify,
    gated: bool,
    calls: AtomicUsize,
    passwords: Mutex<Vec<String>>,
}

impl GatedAuthService {
    /// Answers immediately.
    pub fn open(result: Result<Identity, AuthError>) -> Self {
        Self {
            result,
            gate: Notify::new(),
            gated: false,
            calls: AtomicUsize::new(0),
            passwords: Mutex::new(Vec::new()),
        }
    }

    /// Answers only after `release` is called.
    pub fn closed(result: Result<Identity, AuthError>) -> Self {
        Self {
            gated: true,
            ..Self::open(result)
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn passwords(&self) -> Vec<String> {
        self.passwords.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthService for GatedAuthService {
    async fn create_account(
        &self,
        _email: &str,
        password: &SecretString,
    ) -> Result<Identity, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.passwords
            .lock()
            .unwrap()
            .push(password.expose_secret().clone());
        if self.gated {
            self.gate.notified().await;
        }
        self.result.clone()
    }
}

/// Profile store keeping writes in memory.
#[derive(Default)]
pub struct InMemoryProfileStore {
    saved: Mutex<Vec<(String, Profile)>>,
}

impl InMemoryProfileStore {
    pub fn saved(&self) -> Vec<(String, Profile)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn save(&self, identity: &Identity, profile: &Profile) -> Result<(), StoreError> {
        self.saved
            .lock()
            .unwrap()
            .push((identity.uid.clone(), profile.clone()));
        Ok(())
    }
}

/// Profile store whose writes never complete.
#[derive(Default)]
pub struct StalledProfileStore {
    started: AtomicUsize,
}

impl StalledProfileStore {
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileStore for StalledProfileStore {
    async fn save(&self, _identity: &Identity, _profile: &Profile) -> Result<(), StoreError> {
        self.started.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

/// Mount a form and type the given values into it.
pub fn form_with(values: [(FieldName, &str); 5]) -> FormHandle {
    let form = FormHandle::mount();
    for (name, value) in values {
        form.update_field(name, value);
    }
    form
}

/// The canonical valid registration.
pub fn valid_form() -> FormHandle {
    form_with([
        (FieldName::Firstname, "Al"),
        (FieldName::Surname, "Doe"),
        (FieldName::Email, "al@x.com"),
        (FieldName::Password, "secret1"),
        (FieldName::ConfirmPassword, "secret1"),
    ])
}
