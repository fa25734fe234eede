use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

/// Unified API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Caller input violates a documented constraint. Raised before any
    /// upstream call is attempted.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A required secret is missing from the process configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provider could not be reached, or answered with a payload we
    /// cannot interpret.
    #[error("bad gateway: {0}")]
    BadGateway(String),

    /// The provider answered with a non-success status. Relayed verbatim.
    #[error("upstream returned {status}")]
    Upstream {
        status: u16,
        content_type: Option<String>,
        body: Bytes,
    },
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Configuration(_) => "configuration_error",
            Self::BadGateway(_) => "bad_gateway",
            Self::Upstream { .. } => "upstream_error",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Configuration(_) => 500,
            Self::BadGateway(_) => 502,
            Self::Upstream { status, .. } => *status,
        }
    }
}

/// JSON error envelope: `{ "error": { "code": "…", "message": "…", "details": {} } }`
#[derive(Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(e: &ApiError) -> Self {
        Self {
            error: ErrorBody {
                code: e.code().to_string(),
                message: e.to_string(),
                details: serde_json::Value::Object(serde_json::Map::new()),
            },
        }
    }
}
