//! Field-level validation rules for the user form
//!
//! Rules run in a fixed order (required, max length, min length, pattern)
//! and only the first failure is reported for a field.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::UserDraft;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address.";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Named pattern checks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pattern {
    Email,
}

impl Pattern {
    fn is_match(&self, value: &str) -> bool {
        match self {
            Pattern::Email => EMAIL_PATTERN.is_match(value),
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Pattern::Email => INVALID_EMAIL_MESSAGE,
        }
    }
}

/// Constraints attached to one form field
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldRules {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Pattern>,
}

impl FieldRules {
    pub const fn none() -> Self {
        Self {
            required: false,
            min_length: None,
            max_length: None,
            pattern: None,
        }
    }

    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    pub const fn length(self, min: usize, max: usize) -> Self {
        Self {
            min_length: Some(min),
            max_length: Some(max),
            ..self
        }
    }

    pub const fn pattern(self, pattern: Pattern) -> Self {
        Self {
            pattern: Some(pattern),
            ..self
        }
    }

    /// Check a value; `None` means valid, otherwise the first failing message.
    pub fn check(&self, value: &str) -> Option<String> {
        if value.is_empty() {
            return self.required.then(|| REQUIRED_MESSAGE.to_string());
        }

        let length = value.chars().count();
        if let Some(max) = self.max_length {
            if length > max {
                return Some(format!("Must be {} characters or less.", max));
            }
        }
        if let Some(min) = self.min_length {
            if length < min {
                return Some(format!("Must be at least {} characters.", min));
            }
        }
        if let Some(pattern) = self.pattern {
            if !pattern.is_match(value) {
                return Some(pattern.message().to_string());
            }
        }

        None
    }
}

pub const NAME_RULES: FieldRules = FieldRules::required().length(6, 20);
pub const EMAIL_RULES: FieldRules = FieldRules::required().length(6, 50).pattern(Pattern::Email);
pub const ADDRESS_RULES: FieldRules = FieldRules::required().length(2, 150);
pub const CITY_RULES: FieldRules = FieldRules::required().length(2, 20);
pub const SELECT_RULES: FieldRules = FieldRules::required();

/// A failing field and its message
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

/// Validate a complete draft outside the interactive form (CLI `add`).
pub fn validate_draft(draft: &UserDraft) -> Vec<ValidationError> {
    let checks: [(&'static str, &str, FieldRules); 8] = [
        ("first_name", &draft.first_name, NAME_RULES),
        ("last_name", &draft.last_name, NAME_RULES),
        ("email", &draft.email, EMAIL_RULES),
        ("address", &draft.address, ADDRESS_RULES),
        ("city", &draft.city, CITY_RULES),
        ("country", &draft.country, SELECT_RULES),
        ("state", &draft.state, SELECT_RULES),
        ("role", &draft.role, SELECT_RULES),
    ];

    checks
        .into_iter()
        .filter_map(|(field, value, rules)| {
            rules.check(value).map(|message| ValidationError {
                field,
                message,
            })
        })
        .collect()
}
