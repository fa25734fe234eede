use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use reelgate_core::error::{ApiError, ErrorEnvelope};
use reelgate_metadata::MetadataError;

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Provider errors go back byte-for-byte so clients can read the
        // provider's own error detail.
        if let ApiError::Upstream {
            content_type, body, ..
        } = self.0
        {
            let mut resp = (status, body).into_response();
            match content_type.and_then(|ct| HeaderValue::from_str(&ct).ok()) {
                Some(ct) => resp.headers_mut().insert(header::CONTENT_TYPE, ct),
                None => resp.headers_mut().remove(header::CONTENT_TYPE),
            };
            return resp;
        }

        let envelope = ErrorEnvelope::from(&self.0);
        (status, Json(envelope)).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

impl From<MetadataError> for AppError {
    fn from(e: MetadataError) -> Self {
        let api = match e {
            MetadataError::Configuration(msg) => ApiError::Configuration(msg),
            MetadataError::Unavailable(_) => ApiError::BadGateway(e.to_string()),
            MetadataError::Upstream {
                status,
                content_type,
                body,
            } => ApiError::Upstream {
                status,
                content_type,
                body,
            },
            MetadataError::MalformedRecord(_) => ApiError::BadGateway(e.to_string()),
        };
        Self(api)
    }
}
