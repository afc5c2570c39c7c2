use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Shared secret guarding operator-only routes
#[derive(Clone)]
pub struct OperatorToken(Arc<str>);

impl OperatorToken {
    pub fn new(token: impl AsRef<str>) -> Self {
        Self(Arc::from(token.as_ref()))
    }

    /// Compare without short-circuiting on the first differing byte
    fn matches(&self, candidate: &str) -> bool {
        let expected = self.0.as_bytes();
        let candidate = candidate.as_bytes();

        if expected.len() != candidate.len() {
            return false;
        }

        expected
            .iter()
            .zip(candidate)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    let mut parts = auth_header.split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Some(token),
        _ => None,
    }
}

fn unauthorized(message: &'static str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Bearer realm=\"dashcache\"")],
        message,
    )
        .into_response()
}

/// Reject requests that do not carry the operator token
pub async fn require_operator_token(
    State(token): State<OperatorToken>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let candidate = extract_bearer_token(auth_header)
        .ok_or_else(|| unauthorized("Invalid Authorization header format"))?;

    if !token.matches(candidate) {
        tracing::warn!("Rejected operator request with invalid token");
        return Err(unauthorized("Invalid operator token"));
    }

    Ok(next.run(request).await)
}
