//! Error types for Colibri2 codec operations.

use thiserror::Error;

/// Errors raised while decoding or encoding Colibri2 messages.
///
/// Decoding is all-or-nothing: the first hard error aborts construction of
/// the enclosing message. Unknown elements are not errors — they are skipped
/// (with a `tracing` event) or handed to the provider registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColibriError {
    /// A required attribute or child was absent.
    #[error("<{element}>: missing required field '{field}'")]
    MissingRequiredField {
        element: &'static str,
        field: &'static str,
    },

    /// An enum-valued field held a literal outside the enum's members.
    #[error("<{element}>: invalid value '{value}' for '{field}'")]
    InvalidEnumValue {
        element: &'static str,
        field: &'static str,
        value: String,
    },

    /// A numeric field could not be parsed or overflowed its range.
    #[error("<{element}>: invalid numeric value '{value}' for '{field}'")]
    InvalidNumericValue {
        element: &'static str,
        field: &'static str,
        value: String,
    },

    /// A URI-valued field was not a well-formed URI.
    #[error("<{element}>: invalid URI '{value}'")]
    InvalidUri {
        element: &'static str,
        value: String,
    },

    /// Depth mismatch, unexpected token, or an unparsable document.
    #[error("<{element}>: malformed structure: {reason}")]
    MalformedStructure { element: String, reason: String },
}

impl ColibriError {
    /// Create a missing-required-field error.
    pub fn missing(element: &'static str, field: &'static str) -> Self {
        Self::MissingRequiredField { element, field }
    }

    /// Create an invalid-enum-value error.
    pub fn invalid_enum(element: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidEnumValue {
            element,
            field,
            value: value.into(),
        }
    }

    /// Create an invalid-numeric-value error.
    pub fn invalid_number(element: &'static str, field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidNumericValue {
            element,
            field,
            value: value.into(),
        }
    }

    /// Create an invalid-URI error.
    pub fn invalid_uri(element: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidUri {
            element,
            value: value.into(),
        }
    }

    /// Create a malformed-structure error.
    pub fn malformed(element: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedStructure {
            element: element.into(),
            reason: reason.into(),
        }
    }
}
