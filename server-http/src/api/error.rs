use super::responses::ErrorResponse;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::Error;

/// Error returned by handlers, rendered as a JSON `ErrorResponse`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    /// Map a core error to a response; `context` names the failed operation
    /// and is only shown for server-side faults
    pub fn from_error(context: &str, err: Error) -> Self {
        match err {
            Error::NotFound => Self {
                status: StatusCode::NOT_FOUND,
                body: ErrorResponse::new("No cached data available", None),
            },
            Error::InvalidKey { .. } | Error::InvalidInput(_) => Self {
                status: StatusCode::BAD_REQUEST,
                body: ErrorResponse::new(err.to_string(), None),
            },
            Error::Storage(_) | Error::Serialization(_) | Error::Internal(_) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: ErrorResponse::new(context, Some(err.to_string())),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            body: ErrorResponse::new("Invalid request body", Some(rejection.body_text())),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: rejection.status(),
            body: ErrorResponse::new("Invalid query string", Some(rejection.body_text())),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
