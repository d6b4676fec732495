use axum::{
    extract::{Request, State},
    http::HeaderName,
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::common::AppState;
use crate::error::{AppError, AppResult};

/// Header carrying the shared secret (`ApiToken`; header names are case-insensitive).
pub static API_TOKEN_HEADER: HeaderName = HeaderName::from_static("apitoken");

/// Reject the request unless `ApiToken` matches the configured secret exactly.
///
/// Runs before any extractor of the wrapped handlers, so a rejected request
/// never reaches a use case.
pub async fn require_api_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> AppResult<Response> {
    let provided = request
        .headers()
        .get(&API_TOKEN_HEADER)
        .map(|value| value.as_bytes());

    if !token_matches(state.config.api_token.as_bytes(), provided) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            "API token authentication failed"
        );
        return Err(AppError::NotAuthorized("Invalid API token.".to_string()));
    }

    Ok(next.run(request).await)
}

fn token_matches(expected: &[u8], provided: Option<&[u8]>) -> bool {
    provided.is_some_and(|provided| bool::from(expected.ct_eq(provided)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_must_match_exactly() {
        assert!(token_matches(b"secret", Some(b"secret")));
        assert!(!token_matches(b"secret", Some(b"Secret")));
        assert!(!token_matches(b"secret", Some(b"secret ")));
        assert!(!token_matches(b"secret", Some(b"secre")));
        assert!(!token_matches(b"secret", Some(b"")));
        assert!(!token_matches(b"secret", None));
    }
}
