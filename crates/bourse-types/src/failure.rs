use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::page::ErrorBody;

/// Field name to message, keyed by the backend's field names
/// (`name`, `description`, `currentPrice`, ...).
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum FailureKind {
    Unauthorized,
    Validation,
    NotFound,
    General,
}

/// The one error shape the UI deals with, whatever went wrong underneath.
///
/// `Display` emits JSON and `FromStr` parses it back, so the value survives
/// being carried as the custom error of a server function.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiFailure {
    pub kind: FailureKind,
    pub message: String,
    #[serde(default)]
    pub field_errors: FieldErrors,
}

impl ApiFailure {
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::General,
            message: message.into(),
            field_errors: FieldErrors::new(),
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            kind: FailureKind::Unauthorized,
            message: "Unauthorized".into(),
            field_errors: FieldErrors::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::NotFound,
            message: message.into(),
            field_errors: FieldErrors::new(),
        }
    }

    pub fn validation(message: impl Into<String>, field_errors: FieldErrors) -> Self {
        Self {
            kind: FailureKind::Validation,
            message: message.into(),
            field_errors,
        }
    }

    /// Normalizes a non-2xx response. `fallback` is used when the body carries
    /// no message of its own.
    pub fn from_error_body(status: u16, body: Option<ErrorBody>, fallback: &str) -> Self {
        let body = body.unwrap_or_default();
        match body.errors {
            Some(entries) if !entries.is_empty() => {
                let fieldErrors = entries
                    .into_iter()
                    .map(|e| (e.field, e.message))
                    .collect::<FieldErrors>();
                Self::validation(
                    body.message.unwrap_or_else(|| "Validation failed".into()),
                    fieldErrors,
                )
            }
            _ => {
                let message = body
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_string());
                match status {
                    401 => Self::unauthorized(),
                    404 => Self::not_found(message),
                    _ => Self::general(message),
                }
            }
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == FailureKind::Unauthorized
    }

    pub fn has_field_errors(&self) -> bool {
        !self.field_errors.is_empty()
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => f.write_str(&self.message),
        }
    }
}

impl FromStr for ApiFailure {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl std::error::Error for ApiFailure {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::FieldErrorEntry;

    #[test]
    fn field_errors_become_validation_failure() {
        let body = ErrorBody {
            message: None,
            errors: Some(vec![
                FieldErrorEntry {
                    field: "name".into(),
                    message: "Name is mandatory".into(),
                },
                FieldErrorEntry {
                    field: "currentPrice".into(),
                    message: "Current price must be positive".into(),
                },
            ]),
        };

        let failure = ApiFailure::from_error_body(400, Some(body), "Failed to create stock");

        assert_eq!(failure.kind, FailureKind::Validation);
        assert_eq!(failure.message, "Validation failed");
        assert_eq!(failure.field_errors["name"], "Name is mandatory");
        assert_eq!(failure.field_errors.len(), 2);
    }

    #[test]
    fn missing_body_falls_back_to_operation_message() {
        let failure = ApiFailure::from_error_body(500, None, "Failed to fetch stocks");
        assert_eq!(failure, ApiFailure::general("Failed to fetch stocks"));

        let notFound = ApiFailure::from_error_body(
            404,
            Some(ErrorBody {
                message: Some("Stock not found with id 9".into()),
                errors: None,
            }),
            "Failed to fetch stock details",
        );
        assert_eq!(notFound.kind, FailureKind::NotFound);
        assert_eq!(notFound.message, "Stock not found with id 9");
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let mut fields = FieldErrors::new();
        fields.insert("name".into(), "too long".into());
        let failure = ApiFailure::validation("Validation failed", fields);

        let parsed: ApiFailure = failure.to_string().parse().unwrap();
        assert_eq!(parsed, failure);
    }
}
