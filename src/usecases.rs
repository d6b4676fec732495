//! Application use cases. Each one is a single call into the gateway.

use std::sync::Arc;

use crate::error::AppResult;
use crate::gateway::HumidityGateway;
use crate::humidity::Reading;

/// Record a raw sensor value captured now.
#[derive(Clone)]
pub struct SaveHumidity {
    gateway: Arc<dyn HumidityGateway>,
}

impl SaveHumidity {
    #[must_use]
    pub fn new(gateway: Arc<dyn HumidityGateway>) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn execute(&self, value: f64) -> AppResult<Reading> {
        let reading = Reading::new(value);
        self.gateway.save_humidity(&reading).await?;
        Ok(reading)
    }
}

#[derive(Clone)]
pub struct GetHumidityHistory {
    gateway: Arc<dyn HumidityGateway>,
}

impl GetHumidityHistory {
    #[must_use]
    pub fn new(gateway: Arc<dyn HumidityGateway>) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn execute(&self) -> AppResult<Vec<Reading>> {
        self.gateway.get_all_humidity().await
    }
}

#[derive(Clone)]
pub struct ClearHistory {
    gateway: Arc<dyn HumidityGateway>,
}

impl ClearHistory {
    #[must_use]
    pub fn new(gateway: Arc<dyn HumidityGateway>) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// Propagates the gateway error.
    pub async fn execute(&self) -> AppResult<()> {
        self.gateway.clear_humidity_history().await
    }
}
