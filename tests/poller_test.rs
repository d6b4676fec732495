//! Poller client against a live router on a loopback port.
//!
//! Run with: cargo test --test poller_test

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use humidity_api::common::AppState;
use humidity_api::config::{Config, PollerConfig};
use humidity_api::gateway::InMemoryHumidityGateway;
use humidity_api::humidity::HumidityStatus;
use humidity_api::poller::{ClientError, Dashboard, HumidityClient, Phase};
use humidity_api::routes::build_router;

const TOKEN: &str = "poller-token";

async fn spawn_server() -> String {
    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://unused".to_string()),
        "API_TOKEN" => Some(TOKEN.to_string()),
        _ => None,
    })
    .unwrap();
    let state = AppState::new(config, Arc::new(InMemoryHumidityGateway::new()));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(state)).await.unwrap();
    });

    format!("http://{addr}")
}

fn client(api_url: &str, token: &str) -> HumidityClient {
    let config = PollerConfig {
        api_url: api_url.to_string(),
        api_token: token.to_string(),
        poll_interval: Duration::from_millis(2000),
    };
    HumidityClient::new(&config).unwrap()
}

/// Record a reading the way the sensor does.
async fn post_reading(api_url: &str, value: f64) {
    let response = reqwest::Client::new()
        .post(format!("{api_url}/humidity/{value}"))
        .header("ApiToken", TOKEN)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
}

#[tokio::test]
async fn client_round_trip() {
    let api_url = spawn_server().await;
    let client = client(&api_url, TOKEN);

    post_reading(&api_url, 920.0).await;
    post_reading(&api_url, 610.0).await;

    let history = client.list_humidity().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].value, 610.0);
    assert_eq!(history[0].status, HumidityStatus::SlightlyMoist);
    assert_eq!(history[1].status, HumidityStatus::InAir);

    client.clear_humidity().await.unwrap();
    assert!(client.list_humidity().await.unwrap().is_empty());
}

#[tokio::test]
async fn wrong_token_surfaces_server_message() {
    let api_url = spawn_server().await;
    let client = client(&api_url, "nope");

    let err = client.list_humidity().await.unwrap_err();
    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API token.");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn dashboard_tracks_live_server() {
    let api_url = spawn_server().await;
    let client = client(&api_url, TOKEN);
    let mut dashboard = Dashboard::default();

    dashboard.refresh(&client).await;
    assert_eq!(dashboard.phase(), &Phase::Idle);
    assert!(dashboard.readings().is_empty());

    post_reading(&api_url, 130.0).await;
    dashboard.refresh(&client).await;
    let current = dashboard.current().unwrap();
    assert_eq!(current.status, HumidityStatus::WaterSubmerged);

    dashboard.clear(&client).await;
    assert_eq!(dashboard.phase(), &Phase::Idle);
    assert!(dashboard.readings().is_empty());
}

#[tokio::test]
async fn unreachable_server_keeps_displayed_history() {
    let api_url = spawn_server().await;
    let mut dashboard = Dashboard::default();

    let good = client(&api_url, TOKEN);
    post_reading(&api_url, 750.0).await;
    dashboard.refresh(&good).await;
    assert_eq!(dashboard.readings().len(), 1);

    // Nothing listens on port 9 of the loopback interface
    let broken = client("http://127.0.0.1:9", TOKEN);
    dashboard.refresh(&broken).await;

    assert!(matches!(dashboard.phase(), Phase::Error(_)));
    assert_eq!(dashboard.readings().len(), 1);
    assert_eq!(dashboard.current().unwrap().status, HumidityStatus::DrySoil);
}
