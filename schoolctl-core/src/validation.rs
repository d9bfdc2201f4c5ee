//! Validation rules for school submissions
//!
//! Two rule sets share the same patterns:
//! - server rules ([`ValidationError`]): enforced on every insert, first failure wins
//! - form rules ([`validate_form`]): stricter client-side checks, every failing field reported

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::school::SchoolPayload;

/// Something, then `@`, then something containing a dot. No whitespace.
pub(crate) static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex")
});

/// Exactly ten ASCII digits. Matches DB constraint on `schools.contact`.
pub(crate) static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("invalid contact regex"));

/// Check an email address against the shared pattern.
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Check a contact number against the shared pattern.
pub fn is_valid_contact(s: &str) -> bool {
    CONTACT_RE.is_match(s)
}

/// Server-side validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty
    MissingFields,

    /// `email_id` does not look like an email address
    InvalidEmail,

    /// `contact` is not ten digits
    InvalidContact,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "All fields are required"),
            Self::InvalidEmail => write!(f, "Invalid email format"),
            Self::InvalidContact => write!(f, "Contact number should be 10 digits"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// One failing form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All failing form fields, in form order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors(pub Vec<FieldError>);

impl FormErrors {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Message for a single field, if it failed.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// Per-field form rule
enum Rule {
    MinChars(usize, &'static str),
    Pattern(&'static Lazy<Regex>, &'static str),
}

struct FieldRule {
    field: &'static str,
    required: &'static str,
    rule: Rule,
}

static FORM_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        required: "School name is required",
        rule: Rule::MinChars(2, "School name must be at least 2 characters"),
    },
    FieldRule {
        field: "address",
        required: "Address is required",
        rule: Rule::MinChars(10, "Address must be at least 10 characters"),
    },
    FieldRule {
        field: "city",
        required: "City is required",
        rule: Rule::MinChars(2, "City name must be at least 2 characters"),
    },
    FieldRule {
        field: "state",
        required: "State is required",
        rule: Rule::MinChars(2, "State name must be at least 2 characters"),
    },
    FieldRule {
        field: "contact",
        required: "Contact number is required",
        rule: Rule::Pattern(&CONTACT_RE, "Contact number must be exactly 10 digits"),
    },
    FieldRule {
        field: "email_id",
        required: "Email is required",
        rule: Rule::Pattern(&EMAIL_RE, "Please enter a valid email address"),
    },
];

/// Run the client-side form rules against a payload.
///
/// Unlike [`crate::NewSchool::validate`], this reports every failing field.
/// Values are not trimmed and lengths count characters, not bytes.
///
/// # Example
/// ```
/// use schoolctl_core::{validate_form, SchoolPayload};
///
/// let payload = SchoolPayload {
///     name: Some("X".into()),
///     ..Default::default()
/// };
/// let errors = validate_form(&payload).unwrap_err();
/// assert_eq!(errors.get("name"), Some("School name must be at least 2 characters"));
/// assert_eq!(errors.get("city"), Some("City is required"));
/// ```
pub fn validate_form(payload: &SchoolPayload) -> Result<(), FormErrors> {
    let errors: Vec<FieldError> = FORM_RULES
        .iter()
        .filter_map(|rule| {
            let value = payload.field(rule.field).unwrap_or_default();
            check(rule, value).map(|message| FieldError {
                field: rule.field,
                message,
            })
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(FormErrors(errors))
    }
}

fn check(rule: &FieldRule, value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return Some(rule.required);
    }
    match &rule.rule {
        Rule::MinChars(min, message) => (value.chars().count() < *min).then_some(*message),
        Rule::Pattern(re, message) => (!re.is_match(value)).then_some(*message),
    }
}
