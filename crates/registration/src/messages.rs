//! User-facing message catalog.

use crate::error::ValidationError;
use crate::types::{FieldName, RejectionReason};
use serde::Deserialize;
use std::str::FromStr;

/// Language for field errors and notifications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "fr" | "french" | "francais" | "français" => Ok(Locale::Fr),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}

impl Locale {
    /// Inline message for a field error.
    pub fn validation_message(&self, error: &ValidationError) -> String {
        match self {
            Locale::En => error.to_string(),
            Locale::Fr => french_validation_message(error),
        }
    }

    /// Notification shown after the account was created.
    pub fn success_message(&self) -> &'static str {
        match self {
            Locale::En => "Registration successful!",
            Locale::Fr => "Inscription réussie !",
        }
    }

    /// Notification shown after the service refused the attempt.
    /// Each reason gets its own wording.
    pub fn rejection_message(&self, reason: RejectionReason) -> &'static str {
        match (self, reason) {
            (Locale::En, RejectionReason::EmailAlreadyUsed) => {
                "This email address is already in use."
            }
            (Locale::En, RejectionReason::WeakPassword) => "The password is too weak.",
            (Locale::En, RejectionReason::Unknown) => "Something went wrong. Please try again.",
            (Locale::Fr, RejectionReason::EmailAlreadyUsed) => {
                "L'adresse e-mail est déjà utilisée."
            }
            (Locale::Fr, RejectionReason::WeakPassword) => "Le mot de passe est trop faible.",
            (Locale::Fr, RejectionReason::Unknown) => "Une erreur est survenue.",
        }
    }

    /// Prompt label for a field.
    pub fn field_label(&self, name: FieldName) -> &'static str {
        match (self, name) {
            (Locale::En, FieldName::Firstname) => "First name",
            (Locale::En, FieldName::Surname) => "Surname",
            (Locale::En, FieldName::Email) => "Email",
            (Locale::En, FieldName::Password) => "Password",
            (Locale::En, FieldName::ConfirmPassword) => "Confirm password",
            (Locale::Fr, FieldName::Firstname) => "Votre prénom",
            (Locale::Fr, FieldName::Surname) => "Votre nom",
            (Locale::Fr, FieldName::Email) => "Votre e-mail",
            (Locale::Fr, FieldName::Password) => "Mot de passe",
            (Locale::Fr, FieldName::ConfirmPassword) => "Confirmez votre mot de passe",
        }
    }
}

fn french_validation_message(error: &ValidationError) -> String {
    match error {
        ValidationError::Required(field) => match field {
            FieldName::Firstname => "Le prénom est requis".into(),
            FieldName::Surname => "Le nom est requis".into(),
            FieldName::Email => "L'e-mail est requis".into(),
            FieldName::Password => "Le mot de passe est requis".into(),
            FieldName::ConfirmPassword => {
                "La confirmation du mot de passe est requise".into()
            }
        },
        ValidationError::TooLong { field, max } => match field {
            FieldName::Firstname => {
                format!("Le prénom ne peut pas dépasser {} caractères", max)
            }
            _ => format!("Le nom ne peut pas dépasser {} caractères", max),
        },
        ValidationError::PasswordTooShort { min } => {
            format!("Le mot de passe doit contenir au moins {} caractères", min)
        }
        ValidationError::InvalidEmail => "Adresse e-mail invalide".into(),
        ValidationError::PasswordMismatch => "Les mots de passe ne correspondent pas".into(),
    }
}
