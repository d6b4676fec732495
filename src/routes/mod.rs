pub mod auth;
pub mod health;
pub mod humidity;

use std::any::Any;

use axum::{
    http::Uri,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_scalar::{Scalar, Servable};

use crate::common::AppState;
use crate::error::{AppError, ErrorBody, ErrorDetail};
use crate::humidity::{HumidityResponse, HumidityStatus};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::liveness,
        health::healthz,
        humidity::get_humidity_history,
        humidity::save_humidity,
        humidity::clear_humidity_history,
    ),
    components(
        schemas(
            HumidityResponse,
            HumidityStatus,
            ErrorBody,
            ErrorDetail,
        )
    ),
    modifiers(&ApiTokenScheme),
    tags(
        (name = "health", description = "Liveness and health checks"),
        (name = "humidity", description = "Humidity readings"),
    ),
    info(
        title = "Humidity API",
        description = "Humidity readings classified into soil moisture bands",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiTokenScheme;

impl Modify for ApiTokenScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("ApiToken"))),
            );
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // Every /humidity route requires the shared API token
    let humidity_routes = Router::new()
        .route(
            "/humidity",
            get(humidity::get_humidity_history).delete(humidity::clear_humidity_history),
        )
        .route("/humidity/{value}", post(humidity::save_humidity))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_token,
        ));

    let health_routes = Router::new()
        .route("/", get(health::liveness))
        .route("/healthz", get(health::healthz));

    let docs_routes = Router::new().merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    Router::new()
        .merge(humidity_routes)
        .merge(health_routes)
        .merge(docs_routes)
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("Route '{}' not found", uri.path()))
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else {
        "Request handler panicked".to_string()
    };

    AppError::Internal(message).into_response()
}
