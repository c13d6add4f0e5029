//! Error types for quote validation and dispatch.

use std::fmt;

use shield_core::error::ShieldError;

/// A field on the quote form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteField {
    Name,
    Phone,
    Email,
    Vehicle,
    ServiceType,
}

impl fmt::Display for QuoteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteField::Name => write!(f, "name"),
            QuoteField::Phone => write!(f, "phone"),
            QuoteField::Email => write!(f, "email"),
            QuoteField::Vehicle => write!(f, "vehicle"),
            QuoteField::ServiceType => write!(f, "service type"),
        }
    }
}

/// Why a single field failed validation. The `Display` text is shown inline
/// next to the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Enter a valid phone number")]
    InvalidPhone,
    #[error("Enter a valid email address")]
    InvalidEmail,
}

/// Every field error found in one validation pass, in form order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", summarize(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<(QuoteField, FieldError)>,
}

fn summarize(errors: &[(QuoteField, FieldError)]) -> String {
    errors
        .iter()
        .map(|(field, err)| format!("{field}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// The error reported for `field`, if any.
    pub fn get(&self, field: QuoteField) -> Option<&FieldError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, err)| err)
    }

    /// Fields that failed, in form order.
    pub fn fields(&self) -> Vec<QuoteField> {
        self.errors.iter().map(|(f, _)| *f).collect()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Failures on the way to a notification or the local log.
///
/// None of these reach the customer; the dispatcher absorbs them.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("notification transport is not configured")]
    NotConfigured,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("transport returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("local store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("local store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl From<ValidationErrors> for ShieldError {
    fn from(err: ValidationErrors) -> Self {
        ShieldError::Validation(err.to_string())
    }
}

impl From<DispatchError> for ShieldError {
    fn from(err: DispatchError) -> Self {
        ShieldError::Dispatch(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_messages() {
        assert_eq!(FieldError::Required.to_string(), "This field is required");
        assert_eq!(FieldError::InvalidPhone.to_string(), "Enter a valid phone number");
        assert_eq!(FieldError::InvalidEmail.to_string(), "Enter a valid email address");
    }

    #[test]
    fn test_validation_errors_lookup_and_display() {
        let errs = ValidationErrors {
            errors: vec![
                (QuoteField::Name, FieldError::Required),
                (QuoteField::Phone, FieldError::InvalidPhone),
            ],
        };
        assert_eq!(errs.get(QuoteField::Name), Some(&FieldError::Required));
        assert_eq!(errs.get(QuoteField::Vehicle), None);
        assert_eq!(errs.fields(), vec![QuoteField::Name, QuoteField::Phone]);
        assert_eq!(
            errs.to_string(),
            "name: This field is required; phone: Enter a valid phone number"
        );
    }

    #[test]
    fn test_dispatch_error_display() {
        let err = DispatchError::Status {
            status: 400,
            body: "The user_id parameter is required".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "transport returned 400: The user_id parameter is required"
        );
        assert_eq!(
            DispatchError::NotConfigured.to_string(),
            "notification transport is not configured"
        );
    }

    #[test]
    fn test_into_shield_error() {
        let err: ShieldError = ValidationErrors {
            errors: vec![(QuoteField::Vehicle, FieldError::Required)],
        }
        .into();
        assert!(matches!(err, ShieldError::Validation(_)));

        let err: ShieldError = DispatchError::NotConfigured.into();
        assert!(matches!(err, ShieldError::Dispatch(_)));
    }
}
