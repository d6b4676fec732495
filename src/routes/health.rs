use axum::http::StatusCode;

/// Liveness message
///
/// Plain-text confirmation that the API process is up.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = String, content_type = "text/plain"),
    ),
    tag = "health"
)]
pub async fn liveness() -> &'static str {
    "Humidity API is running."
}

/// Health check endpoint
///
/// Returns 200 OK if the service is running.
/// Not authenticated, suitable for container health checks.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "health"
)]
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
