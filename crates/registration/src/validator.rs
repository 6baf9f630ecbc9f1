//! Field validation rules.
//!
//! Rules are pure functions of the full field set: the same input always
//! yields the same errors, so they are safe to run on every keystroke.

use crate::error::ValidationError;
use crate::types::{FieldName, FieldSet};
use std::collections::BTreeMap;

pub const FIRSTNAME_MAX_LEN: usize = 15;
pub const SURNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 6;

/// Validate every field, returning the first failing rule per field.
pub fn validate(fields: &FieldSet) -> BTreeMap<FieldName, ValidationError> {
    FieldName::ALL
        .into_iter()
        .filter_map(|name| validate_field(name, fields).map(|err| (name, err)))
        .collect()
}

/// Validate a single field against the current field set.
///
/// The whole set is needed because `confirmPassword` depends on `password`.
pub fn validate_field(name: FieldName, fields: &FieldSet) -> Option<ValidationError> {
    let value = fields.get(name);
    if value.is_empty() {
        return Some(ValidationError::Required(name));
    }

    match name {
        FieldName::Firstname => max_len(name, value, FIRSTNAME_MAX_LEN),
        FieldName::Surname => max_len(name, value, SURNAME_MAX_LEN),
        FieldName::Email => (!is_valid_email(value)).then_some(ValidationError::InvalidEmail),
        FieldName::Password => (char_len(value) < PASSWORD_MIN_LEN).then_some(
            ValidationError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            },
        ),
        FieldName::ConfirmPassword => (value != fields.get(FieldName::Password))
            .then_some(ValidationError::PasswordMismatch),
    }
}

fn max_len(field: FieldName, value: &str, max: usize) -> Option<ValidationError> {
    (char_len(value) > max).then_some(ValidationError::TooLong { field, max })
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Check an address against the usual `local@domain.tld` syntax.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    const SPECIAL: &str = "!#$%&'*+/=?^_`{|}~-.";

    !local.is_empty()
        && local.len() <= 64
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SPECIAL.contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || domain.len() > 253 {
        return false;
    }

    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });

    let tld_ok = labels
        .last()
        .map(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false);

    labels_ok && tld_ok
}
