//! Field, identity and outcome types.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One named input slot of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Firstname,
    Surname,
    Email,
    Password,
    ConfirmPassword,
}

impl FieldName {
    /// Every field, in display order.
    pub const ALL: [FieldName; 5] = [
        FieldName::Firstname,
        FieldName::Surname,
        FieldName::Email,
        FieldName::Password,
        FieldName::ConfirmPassword,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Firstname => "firstname",
            FieldName::Surname => "surname",
            FieldName::Email => "email",
            FieldName::Password => "password",
            FieldName::ConfirmPassword => "confirmPassword",
        }
    }

    /// Whether the value must be masked when echoed back.
    pub fn is_secret(&self) -> bool {
        matches!(self, FieldName::Password | FieldName::ConfirmPassword)
    }

    fn index(self) -> usize {
        match self {
            FieldName::Firstname => 0,
            FieldName::Surname => 1,
            FieldName::Email => 2,
            FieldName::Password => 3,
            FieldName::ConfirmPassword => 4,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown field: {}", s))
    }
}

/// Raw values of all five fields.
///
/// Every field is always present, so rule evaluation never has to deal
/// with a missing slot.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    values: [String; 5],
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: FieldName) -> &str {
        &self.values[name.index()]
    }

    pub fn set(&mut self, name: FieldName, value: impl Into<String>) {
        self.values[name.index()] = value.into();
    }

    /// Builder-style setter, mostly useful in tests and fixtures.
    pub fn with(mut self, name: FieldName, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }
}

impl fmt::Debug for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for name in FieldName::ALL {
            if name.is_secret() {
                map.entry(&name.as_str(), &"[REDACTED]");
            } else {
                map.entry(&name.as_str(), &self.get(name));
            }
        }
        map.finish()
    }
}

/// Submission lifecycle of one form instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Success,
    Failed,
}

impl SubmissionPhase {
    /// Whether the submit control should accept a new attempt.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, SubmissionPhase::Idle | SubmissionPhase::Failed)
    }
}

/// Handle returned by the account-creation service for a new user.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Provider-assigned user id.
    pub uid: String,
    pub email: String,
    /// Session token for follow-up writes on behalf of the new user.
    pub id_token: Option<SecretString>,
}

impl Identity {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            id_token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.id_token = Some(SecretString::new(token.into()));
        self
    }
}

/// Profile record written next to the new account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub firstname: String,
    pub surname: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Build the profile from the submitted field values.
    pub fn from_fields(fields: &FieldSet, created_at: DateTime<Utc>) -> Self {
        Self {
            firstname: fields.get(FieldName::Firstname).to_string(),
            surname: fields.get(FieldName::Surname).to_string(),
            email: fields.get(FieldName::Email).to_string(),
            created_at,
        }
    }
}

/// User-facing reason a creation attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    EmailAlreadyUsed,
    WeakPassword,
    Unknown,
}

impl RejectionReason {
    /// Map a service classification code onto a user-facing reason.
    pub fn classify(code: &str) -> Self {
        match code {
            "auth/email-already-in-use" => RejectionReason::EmailAlreadyUsed,
            "auth/weak-password" => RejectionReason::WeakPassword,
            _ => RejectionReason::Unknown,
        }
    }

    /// The field the user has to change before retrying, if any.
    pub fn field(&self) -> Option<FieldName> {
        match self {
            RejectionReason::EmailAlreadyUsed => Some(FieldName::Email),
            RejectionReason::WeakPassword => Some(FieldName::Password),
            RejectionReason::Unknown => None,
        }
    }
}

/// Result of one submit attempt that reached the account-creation service.
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    Created(Identity),
    Rejected(RejectionReason),
}

impl SubmissionOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, SubmissionOutcome::Created(_))
    }
}
