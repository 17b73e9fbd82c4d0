//! Form schema and validation
//!
//! Declares the shape of the application form and the rules a submission
//! must satisfy. Validation is a pure function from a raw [`FormInput`] to
//! either a fully valid [`FormValues`] or a per-field [`FormErrors`] map.

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Default email shape: local-part@domain with a dot in the domain
pub const DEFAULT_EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Default experience brackets, in display order
pub const DEFAULT_EXPERIENCE_OPTIONS: [&str; 4] =
    ["under 1 year", "1–3 years", "4–7 years", "8+ years"];

const URL_PATTERN: &str = r"^https?://.+";

const NAME_MESSAGE: &str = "Please enter your name or nickname.";
const EMAIL_MESSAGE: &str = "Please enter a valid email address.";
const EXPERIENCE_MESSAGE: &str = "Please select your years of frontend experience.";
const URL_MESSAGE: &str = "Please enter a valid URL.";

static DEFAULT_EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_EMAIL_PATTERN).expect("default email pattern is valid"));

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URL_PATTERN).expect("url pattern is valid"));

/// Identifies one field of the form
///
/// The declaration order is the form's field order; `Ord` follows it, so
/// maps keyed by `FieldId` iterate top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Name,
    Email,
    ExperienceYears,
    GithubUrl,
}

impl FieldId {
    /// All fields in form order
    pub const ALL: [FieldId; 4] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::ExperienceYears,
        FieldId::GithubUrl,
    ];

    /// Stable key, matching the serialized field name
    pub fn key(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Email => "email",
            FieldId::ExperienceYears => "experienceYears",
            FieldId::GithubUrl => "githubUrl",
        }
    }

    /// Human-readable label shown next to the input
    pub fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Name / nickname",
            FieldId::Email => "Email",
            FieldId::ExperienceYears => "Frontend experience",
            FieldId::GithubUrl => "GitHub link (optional)",
        }
    }

    /// Id of the error node describing this field
    pub fn error_id(self) -> &'static str {
        match self {
            FieldId::Name => "error-name",
            FieldId::Email => "error-email",
            FieldId::ExperienceYears => "error-exp",
            FieldId::GithubUrl => "error-github",
        }
    }
}

/// A validated form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub experience_years: String,
    /// Empty when the optional link was left blank
    pub github_url: String,
}

impl FormValues {
    /// The GitHub link, if one was given
    pub fn github_url(&self) -> Option<&str> {
        if self.github_url.is_empty() {
            None
        } else {
            Some(&self.github_url)
        }
    }
}

/// Optional initial values for the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialFormValues {
    pub name: Option<String>,
    pub email: Option<String>,
    pub experience_years: Option<String>,
    pub github_url: Option<String>,
}

/// Raw, unvalidated form contents as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub experience_years: String,
    pub github_url: String,
}

impl FormInput {
    /// Build a draft from optional initial values; missing fields start empty
    pub fn from_partial(partial: &PartialFormValues) -> Self {
        Self {
            name: partial.name.clone().unwrap_or_default(),
            email: partial.email.clone().unwrap_or_default(),
            experience_years: partial.experience_years.clone().unwrap_or_default(),
            github_url: partial.github_url.clone().unwrap_or_default(),
        }
    }

    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Name => &self.name,
            FieldId::Email => &self.email,
            FieldId::ExperienceYears => &self.experience_years,
            FieldId::GithubUrl => &self.github_url,
        }
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let value = value.into();
        match field {
            FieldId::Name => self.name = value,
            FieldId::Email => self.email = value,
            FieldId::ExperienceYears => self.experience_years = value,
            FieldId::GithubUrl => self.github_url = value,
        }
    }
}

/// Why a field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Value missing or empty
    RequiredField,
    /// Value present but does not match the expected shape
    InvalidFormat,
}

/// A field-scoped validation failure with its user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: ValidationErrorKind,
    pub message: &'static str,
}

impl FieldError {
    fn required(message: &'static str) -> Self {
        Self {
            kind: ValidationErrorKind::RequiredField,
            message,
        }
    }

    fn invalid(message: &'static str) -> Self {
        Self {
            kind: ValidationErrorKind::InvalidFormat,
            message,
        }
    }
}

/// Validation failures keyed by field, iterated in form order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<FieldId, FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldId) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        self.errors.contains_key(&field)
    }

    /// Record or replace the error for a field
    pub fn insert(&mut self, field: FieldId, error: FieldError) {
        self.errors.insert(field, error);
    }

    /// Clear the error for a field, returning it if there was one
    pub fn remove(&mut self, field: FieldId) -> Option<FieldError> {
        self.errors.remove(&field)
    }

    /// First invalid field in form order
    pub fn first_field(&self) -> Option<FieldId> {
        self.errors.keys().next().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates form input against the configured rules
#[derive(Debug, Clone)]
pub struct Validator {
    email_pattern: Regex,
    experience_options: Vec<String>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(
            DEFAULT_EMAIL_RE.clone(),
            DEFAULT_EXPERIENCE_OPTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }
}

impl Validator {
    pub fn new(email_pattern: Regex, experience_options: Vec<String>) -> Self {
        Self {
            email_pattern,
            experience_options,
        }
    }

    /// The allowed experience brackets, in display order
    pub fn experience_options(&self) -> &[String] {
        &self.experience_options
    }

    /// Validate the whole form
    ///
    /// Every field is checked, so the error map reports all failures at once.
    pub fn validate(&self, input: &FormInput) -> Result<FormValues, FormErrors> {
        let mut errors = FormErrors::new();
        for field in FieldId::ALL {
            if let Err(error) = self.validate_field(field, input) {
                errors.insert(field, error);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(FormValues {
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            experience_years: input.experience_years.clone(),
            github_url: input.github_url.trim().to_string(),
        })
    }

    /// Validate a single field of the form
    pub fn validate_field(&self, field: FieldId, input: &FormInput) -> Result<(), FieldError> {
        match field {
            FieldId::Name => {
                if input.name.trim().is_empty() {
                    return Err(FieldError::required(NAME_MESSAGE));
                }
            }
            FieldId::Email => {
                let email = input.email.trim();
                if email.is_empty() {
                    return Err(FieldError::required(EMAIL_MESSAGE));
                }
                if !self.email_pattern.is_match(email) {
                    return Err(FieldError::invalid(EMAIL_MESSAGE));
                }
            }
            FieldId::ExperienceYears => {
                let value = input.experience_years.as_str();
                if value.is_empty() {
                    return Err(FieldError::required(EXPERIENCE_MESSAGE));
                }
                if !self.experience_options.iter().any(|option| option == value) {
                    return Err(FieldError::invalid(EXPERIENCE_MESSAGE));
                }
            }
            FieldId::GithubUrl => {
                let url = input.github_url.trim();
                if !url.is_empty() && !URL_RE.is_match(url) {
                    return Err(FieldError::invalid(URL_MESSAGE));
                }
            }
        }
        Ok(())
    }
}
