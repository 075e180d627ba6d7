use crate::models::ErrorBody;
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures talking to GitHub or to the proxy.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("GitHub responded with status {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    #[error("GitHub GraphQL error: {0}")]
    UpstreamGraphQl(serde_json::Value),

    #[error("{}", rate_limit_message(.reset.as_deref()))]
    RateLimited { reset: Option<String> },

    #[error("GitHub user '{0}' not found")]
    NotFound(String),

    #[error("access denied or rate limited by GitHub: {0}")]
    Forbidden(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("configuration error: {0}")]
    Config(String),
}

fn rate_limit_message(reset: Option<&str>) -> String {
    match reset {
        Some(reset) => format!("GitHub API rate limit exceeded; resets at {reset}"),
        None => "GitHub API rate limit exceeded".to_string(),
    }
}

#[derive(Debug)]
enum Payload {
    Json(ErrorBody),
    Text(String),
}

/// Error returned by the HTTP handlers.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    payload: Payload,
}

impl AppError {
    fn json(status: StatusCode, error: impl Into<String>, details: Option<serde_json::Value>) -> Self {
        Self {
            status,
            payload: Payload::Json(ErrorBody {
                error: error.into(),
                details,
            }),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::json(StatusCode::BAD_REQUEST, message, None)
    }

    pub fn unconfigured(message: impl Into<String>) -> Self {
        Self::json(StatusCode::INTERNAL_SERVER_ERROR, message, None)
    }

    /// Passes a non-2xx upstream answer through with its status and raw body.
    pub fn upstream(status: u16, body: String) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            payload: Payload::Text(body),
        }
    }

    pub fn graphql(details: serde_json::Value) -> Self {
        Self::json(
            StatusCode::INTERNAL_SERVER_ERROR,
            "GitHub GraphQL error",
            Some(details),
        )
    }

    pub fn bad_gateway(err: impl std::error::Error) -> Self {
        Self::json(
            StatusCode::BAD_GATEWAY,
            "Failed to reach GitHub",
            Some(serde_json::Value::String(err.to_string())),
        )
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self::json(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal error",
            Some(serde_json::Value::String(err.to_string())),
        )
    }

    pub fn message(&self) -> &str {
        match &self.payload {
            Payload::Json(body) => &body.error,
            Payload::Text(text) => text,
        }
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::UpstreamHttp { status, body } => Self::upstream(status, body),
            CalendarError::UpstreamGraphQl(details) => Self::graphql(details),
            CalendarError::Network(err) => Self::bad_gateway(err),
            other => Self::internal(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.payload {
            Payload::Json(body) => (self.status, Json(body)).into_response(),
            Payload::Text(text) => (
                self.status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                text,
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_message_mentions_reset_when_known() {
        let err = CalendarError::RateLimited {
            reset: Some("2024-01-10 12:00:00 UTC".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "GitHub API rate limit exceeded; resets at 2024-01-10 12:00:00 UTC"
        );
        let err = CalendarError::RateLimited { reset: None };
        assert_eq!(err.to_string(), "GitHub API rate limit exceeded");
    }

    #[test]
    fn upstream_errors_keep_status() {
        let err = AppError::from(CalendarError::UpstreamHttp {
            status: 401,
            body: "Bad credentials".to_string(),
        });
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "Bad credentials");
    }

    #[test]
    fn graphql_errors_become_500() {
        let err = AppError::from(CalendarError::UpstreamGraphQl(serde_json::json!([
            { "message": "Could not resolve to a User" }
        ])));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "GitHub GraphQL error");
    }
}
