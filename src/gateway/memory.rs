use async_trait::async_trait;
use tokio::sync::RwLock;

use super::HumidityGateway;
use crate::error::AppResult;
use crate::humidity::Reading;

#[derive(Debug, Default)]
struct Table {
    last_id: i32,
    rows: Vec<Reading>,
}

/// Process-local store. Lists in insertion order; identities keep
/// increasing across clears like a database sequence.
#[derive(Debug, Default)]
pub struct InMemoryHumidityGateway {
    table: RwLock<Table>,
}

impl InMemoryHumidityGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HumidityGateway for InMemoryHumidityGateway {
    async fn save_humidity(&self, reading: &Reading) -> AppResult<()> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let stored = Reading::restore(table.last_id, reading.value(), reading.analyzed_at());
        table.rows.push(stored);
        Ok(())
    }

    async fn get_all_humidity(&self) -> AppResult<Vec<Reading>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn clear_humidity_history(&self) -> AppResult<()> {
        self.table.write().await.rows.clear();
        Ok(())
    }
}
