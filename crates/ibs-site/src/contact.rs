//! Contact form validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").unwrap());

/// Submitted contact form fields.
///
/// `company` and `phone` are optional; every other field is required.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// Per-field validation messages.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub subject: Option<&'static str>,
    pub message: Option<&'static str>,
}

impl FieldErrors {
    /// Whether no field failed validation.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.subject.is_none() && self.message.is_none()
    }
}

/// State of the contact page.
#[derive(Clone, Debug, Default)]
pub enum ContactState {
    /// Empty form.
    #[default]
    Blank,
    /// Rejected submission, re-displayed with its messages.
    Invalid(ContactForm, FieldErrors),
    /// Accepted submission.
    Submitted,
}

fn min_chars(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

impl ContactForm {
    /// Check every field, collecting all failures.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let errors = FieldErrors {
            name: (!min_chars(&self.name, 2)).then_some("Name must be at least 2 characters."),
            email: (!EMAIL_RE.is_match(self.email.trim()))
                .then_some("Please enter a valid email address."),
            subject: (!min_chars(&self.subject, 5))
                .then_some("Subject must be at least 5 characters."),
            message: (!min_chars(&self.message, 10))
                .then_some("Message must be at least 10 characters."),
        };

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid() -> ContactForm {
        ContactForm {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            company: String::new(),
            phone: String::new(),
            subject: "Demo request".to_owned(),
            message: "Please schedule a demo.".to_owned(),
        }
    }

    #[test]
    fn test_valid_form_without_optional_fields() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn test_empty_form_reports_every_required_field() {
        let errors = ContactForm::default().validate().unwrap_err();
        assert_eq!(
            errors,
            FieldErrors {
                name: Some("Name must be at least 2 characters."),
                email: Some("Please enter a valid email address."),
                subject: Some("Subject must be at least 5 characters."),
                message: Some("Message must be at least 10 characters."),
            }
        );
    }

    #[test]
    fn test_length_boundaries() {
        let form = ContactForm {
            name: "Al".to_owned(),
            subject: "Hello".to_owned(),
            message: "0123456789".to_owned(),
            ..valid()
        };
        assert_eq!(form.validate(), Ok(()));

        let form = ContactForm {
            name: " A ".to_owned(),
            ..valid()
        };
        assert!(form.validate().unwrap_err().name.is_some());
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let form = ContactForm {
            name: "Ñ".to_owned(),
            ..valid()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_email_shapes() {
        for bad in ["", "plain", "a@b", "a b@example.com", "@example.com", "a@example."] {
            let form = ContactForm {
                email: bad.to_owned(),
                ..valid()
            };
            assert!(form.validate().is_err(), "{bad} should be rejected");
        }
        let form = ContactForm {
            email: "first.last+tag@sub.example.co".to_owned(),
            ..valid()
        };
        assert_eq!(form.validate(), Ok(()));
    }
}
