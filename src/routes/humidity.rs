use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::common::AppState;
use crate::error::{AppError, AppResult, ErrorBody};
use crate::humidity::{HumidityResponse, Reading};

/// List the humidity history
///
/// Every stored reading with its derived status, most recent first.
#[utoipa::path(
    get,
    path = "/humidity",
    responses(
        (status = 200, description = "Humidity history retrieved", body = Vec<HumidityResponse>),
        (status = 401, description = "Missing or invalid API token", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    security(("api_token" = [])),
    tag = "humidity"
)]
pub async fn get_humidity_history(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<HumidityResponse>>> {
    let mut history = state.get_humidity_history.execute().await?;
    sort_most_recent_first(&mut history);

    tracing::debug!(count = history.len(), "Humidity history served");

    Ok(Json(history.iter().map(HumidityResponse::from).collect()))
}

/// Record a humidity reading
///
/// The value is taken from the path and stamped with the current time.
#[utoipa::path(
    post,
    path = "/humidity/{value}",
    params(
        ("value" = f64, Path, description = "Raw sensor value (0-1023)"),
    ),
    responses(
        (status = 201, description = "Reading stored"),
        (status = 400, description = "Value is not a finite number", body = ErrorBody),
        (status = 401, description = "Missing or invalid API token", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    security(("api_token" = [])),
    tag = "humidity"
)]
pub async fn save_humidity(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> AppResult<StatusCode> {
    // Undecodable segments such as `%FF` use the JSON error body too
    let Path(raw_value) = path.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let value = parse_humidity_value(&raw_value)?;
    let reading = state.save_humidity.execute(value).await?;

    tracing::info!(value, status = %reading.status(), "Humidity reading saved");

    Ok(StatusCode::CREATED)
}

/// Clear the humidity history
///
/// Deletes every stored reading.
#[utoipa::path(
    delete,
    path = "/humidity",
    responses(
        (status = 204, description = "History cleared"),
        (status = 401, description = "Missing or invalid API token", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody),
    ),
    security(("api_token" = [])),
    tag = "humidity"
)]
pub async fn clear_humidity_history(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.clear_history.execute().await?;

    tracing::info!("Humidity history cleared");

    Ok(StatusCode::NO_CONTENT)
}

/// Parse the path segment of `POST /humidity/{value}`.
///
/// Anything that is not a finite number is rejected rather than coerced.
pub fn parse_humidity_value(raw: &str) -> AppResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            AppError::BadRequest(format!("Humidity value must be a finite number, got '{raw}'"))
        })
}

fn sort_most_recent_first(history: &mut [Reading]) {
    history.sort_by(|a, b| {
        b.analyzed_at()
            .cmp(&a.analyzed_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
}
