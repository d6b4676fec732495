use std::sync::Arc;

use crate::config::Config;
use crate::gateway::HumidityGateway;
use crate::usecases::{ClearHistory, GetHumidityHistory, SaveHumidity};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub save_humidity: SaveHumidity,
    pub get_humidity_history: GetHumidityHistory,
    pub clear_history: ClearHistory,
}

impl AppState {
    pub fn new(config: Config, gateway: Arc<dyn HumidityGateway>) -> Self {
        Self {
            config: Arc::new(config),
            save_humidity: SaveHumidity::new(gateway.clone()),
            get_humidity_history: GetHumidityHistory::new(gateway.clone()),
            clear_history: ClearHistory::new(gateway),
        }
    }
}
