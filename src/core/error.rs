use serde::Serialize;
use thiserror::Error;

/// Errors returned by the invoice pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransformError {
    /// The request body could not be decoded into an invoice record.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// Caller-supplied data violated a presence or format rule.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A codec invariant broke. Never caused by bad input.
    #[error("internal error: {0}")]
    Internal(#[from] InternalError),
}

/// Invariant violations inside the aggregator, composer or serializer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InternalError {
    /// Totals overflowed or failed to reconcile.
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// The composed document is inconsistent with its inputs.
    #[error("composition error: {0}")]
    Composition(String),

    /// XML writing failed.
    #[error("XML error: {0}")]
    Xml(String),
}

/// The first rule a request violated, with the path of the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Path to the invalid field (e.g. "recipient.order_id", "items[2].quantity").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub const ERR_CODE_INVALID_JSON: &str = "INVALID_JSON";
pub const ERR_CODE_VALIDATION: &str = "VALIDATION_ERROR";
pub const ERR_CODE_INTERNAL: &str = "INTERNAL_ERROR";

/// Client-facing error payload for the service layer wrapping the codec.
///
/// Validation and decoding failures describe the offending input. Internal
/// failures carry a generic message only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// HTTP status the service should answer with.
    #[serde(skip)]
    pub status: u16,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl TransformError {
    /// True when the caller can fix the request and retry.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }

    pub fn response(&self) -> ErrorResponse {
        match self {
            Self::InvalidJson(details) => ErrorResponse {
                status: 400,
                code: ERR_CODE_INVALID_JSON,
                message: "invalid JSON".into(),
                field: None,
                details: Some(details.clone()),
            },
            Self::Validation(err) => ErrorResponse {
                status: 400,
                code: ERR_CODE_VALIDATION,
                message: "validation failed".into(),
                field: Some(err.field.clone()),
                details: Some(err.message.clone()),
            },
            Self::Internal(_) => ErrorResponse {
                status: 500,
                code: ERR_CODE_INTERNAL,
                message: "invoice could not be generated".into(),
                field: None,
                details: None,
            },
        }
    }
}

#[cfg(feature = "json")]
impl ErrorResponse {
    /// Render as `{"error": {...}}`.
    pub fn to_json(&self) -> String {
        #[derive(Serialize)]
        struct Envelope<'a> {
            error: &'a ErrorResponse,
        }
        serde_json::to_string(&Envelope { error: self }).unwrap_or_else(|e| {
            tracing::error!(code = self.code, error = %e, "error response could not be serialized");
            FALLBACK_ERROR_BODY.to_string()
        })
    }
}

/// Body sent when an [`ErrorResponse`] itself cannot be rendered.
#[cfg(feature = "json")]
pub const FALLBACK_ERROR_BODY: &str =
    r#"{"error":{"code":"INTERNAL_ERROR","message":"invoice could not be generated"}}"#;
