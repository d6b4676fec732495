use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Schema,
};

use super::HumidityGateway;
use crate::entity::humidity;
use crate::error::AppResult;
use crate::humidity::Reading;

/// Create the readings table when it does not exist yet.
///
/// # Errors
///
/// Returns the database error if the statement fails.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(humidity::Entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    Ok(())
}

pub struct SeaOrmHumidityGateway {
    db: DatabaseConnection,
}

impl SeaOrmHumidityGateway {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HumidityGateway for SeaOrmHumidityGateway {
    async fn save_humidity(&self, reading: &Reading) -> AppResult<()> {
        let model = humidity::ActiveModel {
            value: Set(reading.value()),
            analyzed_at: Set(reading.analyzed_at()),
            ..Default::default()
        };

        humidity::Entity::insert(model).exec(&self.db).await?;
        Ok(())
    }

    async fn get_all_humidity(&self) -> AppResult<Vec<Reading>> {
        let rows = humidity::Entity::find()
            .order_by_desc(humidity::Column::AnalyzedAt)
            .order_by_desc(humidity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Reading::restore(row.id, row.value, row.analyzed_at))
            .collect())
    }

    async fn clear_humidity_history(&self) -> AppResult<()> {
        let result = humidity::Entity::delete_many().exec(&self.db).await?;
        tracing::debug!(rows = result.rows_affected, "Humidity history cleared");
        Ok(())
    }
}
