//! Person record
//!
//! The record stored in the `persons` table and cached as JSON text.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Required email domain, including the `@`.
pub const EMAIL_DOMAIN: &str = "@gmail.com";

/// Exclusive upper bound for `age`.
pub const MAX_AGE: i32 = 100;

/// A person record.
///
/// `id` is assigned by the authoritative store; it defaults to 0 when absent
/// from a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Person {
    /// Store-assigned identity
    #[serde(default)]
    pub id: i64,
    /// Display name, must not be blank
    pub name: String,
    /// Age in years, in (0, 100)
    pub age: i32,
    /// Email address on the gmail.com domain
    pub email: String,
}

impl Person {
    /// Creates a person that has not been stored yet.
    pub fn new(name: impl Into<String>, age: i32, email: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            age,
            email: email.into(),
        }
    }

    /// Returns a copy carrying the given id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// Validates the record. See [`validate_person`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_person(self)
    }
}

/// Checks a person against the validation rules, in order, returning the
/// first violated rule.
pub fn validate_person(person: &Person) -> Result<(), ValidationError> {
    if person.email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if person.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let local_part = person
        .email
        .strip_suffix(EMAIL_DOMAIN)
        .ok_or(ValidationError::WrongEmailDomain)?;
    if local_part.is_empty() {
        return Err(ValidationError::EmptyEmailLocalPart);
    }
    if person.age <= 0 {
        return Err(ValidationError::AgeTooLow);
    }
    if person.age >= MAX_AGE {
        return Err(ValidationError::AgeTooHigh);
    }
    Ok(())
}
