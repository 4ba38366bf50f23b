//! Field validators shared by the create and update paths of every entity.
//!
//! Each entity module composes these helpers into per-field validators so a
//! constraint is declared once and enforced identically on both paths.

use std::sync::OnceLock;

use regex::Regex;

use super::slug::is_valid_slug;

/// Maximum length accepted for email addresses.
pub const EMAIL_MAX: usize = 255;

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required text field was empty or whitespace.
    #[error("{field} must not be blank")]
    Blank { field: &'static str },
    /// A text field exceeded its maximum character count.
    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// The value does not look like `local@domain.tld`.
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: &'static str },
    /// The value is not a lowercase, hyphenated slug.
    #[error("{field} must contain only lowercase letters, digits, and hyphens")]
    InvalidSlug { field: &'static str },
    /// The value contains whitespace where none is allowed.
    #[error("{field} must not contain whitespace")]
    ContainsWhitespace { field: &'static str },
    /// A list carried the same identifier twice.
    #[error("{field} contains duplicate entry {value}")]
    Duplicate { field: &'static str, value: i64 },
}

impl ValidationError {
    /// Name of the offending field.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Blank { field }
            | Self::TooLong { field, .. }
            | Self::InvalidEmail { field }
            | Self::InvalidSlug { field }
            | Self::ContainsWhitespace { field }
            | Self::Duplicate { field, .. } => field,
        }
    }
}

/// Raised when stored text does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    /// Record the enum name and the rejected text.
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Deserialise a field where absence and `null` mean different things.
///
/// Pair with `#[serde(default)]`: an absent key yields `None`, an explicit
/// `null` yields `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    <Option<T> as serde::Deserialize>::deserialize(deserializer).map(Some)
}

/// Ensure `value` is at most `max` characters long.
pub fn max_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

/// Validate a required, non-blank text field bounded by `max`.
pub fn required_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    max_length(field, value, max)
}

/// Validate an optional text field bounded by `max`. Blank values are allowed.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |text| max_length(field, text, max))
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Validate an email address against the `local@domain.tld` pattern.
pub fn email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    required_text(field, value, EMAIL_MAX)?;
    if !email_regex().is_match(value) {
        return Err(ValidationError::InvalidEmail { field });
    }
    Ok(())
}

/// Validate a slug bounded by `max`.
pub fn slug(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    required_text(field, value, max)?;
    if !is_valid_slug(value) {
        return Err(ValidationError::InvalidSlug { field });
    }
    Ok(())
}

/// Validate a non-blank token that must not contain whitespace.
pub fn token(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    required_text(field, value, max)?;
    if value.chars().any(char::is_whitespace) {
        return Err(ValidationError::ContainsWhitespace { field });
    }
    Ok(())
}
