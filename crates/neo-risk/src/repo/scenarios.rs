use sqlx::SqlitePool;

use super::DocumentRow;
use crate::{error::Result, models::ImpactScenario};

/// Append-only store for impact scenarios.
#[derive(Clone)]
pub struct ScenarioRepository {
    pool: SqlitePool,
}

impl ScenarioRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, scenario: &ImpactScenario) -> Result<()> {
        let document = serde_json::to_string(scenario)?;
        sqlx::query(
            "INSERT INTO impact_scenarios(id, asteroid_id, created_at, document) \
             VALUES(?, ?, ?, ?)",
        )
        .bind(scenario.id.to_string())
        .bind(&scenario.asteroid_id)
        .bind(scenario.created_at.to_rfc3339())
        .bind(&document)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn list(&self, limit: u32) -> Result<Vec<ImpactScenario>> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT document FROM impact_scenarios ORDER BY rowid LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(DocumentRow::decode).collect()
    }

    pub async fn count(&self) -> Result<i64> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM impact_scenarios")
                .fetch_one(&self.pool)
                .await?,
        )
    }
}
