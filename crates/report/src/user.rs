//! Player identity and the lead form that produces it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum trimmed name length accepted by the lead form.
pub const MIN_NAME_CHARS: usize = 2;

/// Player attached to every submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LeadError {
    #[error("Please enter your name")]
    NameMissing,
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    #[error("Please enter your phone number")]
    PhoneMissing,
    #[error("Please enter a valid 10-digit Indian mobile number")]
    PhoneInvalid,
    #[error("You must accept the terms to continue")]
    TermsNotAccepted,
}

impl LeadError {
    /// Form field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            LeadError::NameMissing | LeadError::NameTooShort => "name",
            LeadError::PhoneMissing | LeadError::PhoneInvalid => "phone",
            LeadError::TermsNotAccepted => "agreed",
        }
    }
}

/// Raw lead form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadForm {
    pub name: String,
    pub phone: String,
    pub agreed: bool,
}

impl LeadForm {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            agreed: true,
        }
    }

    /// Check every field and return the trimmed user, or all field errors at once
    pub fn validate(&self) -> Result<User, Vec<LeadError>> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        let mut errors = Vec::new();

        if name.is_empty() {
            errors.push(LeadError::NameMissing);
        } else if name.chars().count() < MIN_NAME_CHARS {
            errors.push(LeadError::NameTooShort);
        }

        if phone.is_empty() {
            errors.push(LeadError::PhoneMissing);
        } else if !is_mobile_number(phone) {
            errors.push(LeadError::PhoneInvalid);
        }

        if !self.agreed {
            errors.push(LeadError::TermsNotAccepted);
        }

        if errors.is_empty() {
            Ok(User {
                name: name.to_string(),
                phone: phone.to_string(),
            })
        } else {
            Err(errors)
        }
    }
}

/// Ten digits, the first one 6 through 9
fn is_mobile_number(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 10
        && matches!(bytes[0], b'6'..=b'9')
        && bytes.iter().all(u8::is_ascii_digit)
}
