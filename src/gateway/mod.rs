//! Persistence boundary between the use cases and the concrete store.
//!
//! [`HumidityGateway`] is object safe so the application state can hold any
//! implementation behind an `Arc<dyn HumidityGateway>`:
//!
//! - [`SeaOrmHumidityGateway`]: PostgreSQL through SeaORM, used in production.
//! - [`InMemoryHumidityGateway`]: process-local store for tests and demos.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::humidity::Reading;

pub use memory::InMemoryHumidityGateway;
pub use postgres::{ensure_schema, SeaOrmHumidityGateway};

#[async_trait]
pub trait HumidityGateway: Send + Sync {
    /// Append a reading. The store assigns its identity.
    async fn save_humidity(&self, reading: &Reading) -> AppResult<()>;

    /// Every stored reading, in an order chosen by the implementation.
    async fn get_all_humidity(&self) -> AppResult<Vec<Reading>>;

    /// Delete every stored reading.
    async fn clear_humidity_history(&self) -> AppResult<()>;
}
