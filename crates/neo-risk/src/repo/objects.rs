use sqlx::SqlitePool;

use super::DocumentRow;
use crate::{
    error::{AppError, Result},
    models::{NearEarthObject, RiskLevel},
    risk,
};

/// Sole owner of the `asteroids` table, keyed by `neo_reference_id`.
#[derive(Clone)]
pub struct ObjectRepository {
    pool: SqlitePool,
}

impl ObjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts or wholesale replaces the record for this reference id.
    ///
    /// The risk tier is recomputed from the record's own approach data first,
    /// so a stored tier always agrees with the stored inputs.
    pub async fn upsert(&self, mut neo: NearEarthObject) -> Result<NearEarthObject> {
        neo.risk_level = risk::assess(&neo)?;
        let document = serde_json::to_string(&neo)?;

        sqlx::query(
            "INSERT INTO asteroids\
             (neo_reference_id, risk_level, is_hazardous, last_updated, document) \
             VALUES(?, ?, ?, ?, ?) \
             ON CONFLICT(neo_reference_id) DO UPDATE SET \
             risk_level = excluded.risk_level, \
             is_hazardous = excluded.is_hazardous, \
             last_updated = excluded.last_updated, \
             document = excluded.document",
        )
        .bind(&neo.neo_reference_id)
        .bind(neo.risk_level.as_str())
        .bind(neo.is_potentially_hazardous_asteroid)
        .bind(neo.last_updated.to_rfc3339())
        .bind(&document)
        .execute(&self.pool)
        .await?;

        Ok(neo)
    }

    pub async fn get(&self, reference_id: &str) -> Result<NearEarthObject> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT document FROM asteroids WHERE neo_reference_id = ?",
        )
        .bind(reference_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => row.decode(),
            None => Err(AppError::NotFound(format!("asteroid {reference_id}"))),
        }
    }

    /// Records in storage order, optionally restricted to one tier.
    pub async fn list(
        &self,
        risk_level: Option<RiskLevel>,
        limit: u32,
    ) -> Result<Vec<NearEarthObject>> {
        let rows = match risk_level {
            Some(level) => {
                sqlx::query_as::<_, DocumentRow>(
                    "SELECT document FROM asteroids WHERE risk_level = ? ORDER BY rowid LIMIT ?",
                )
                .bind(level.as_str())
                .bind(i64::from(limit))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, DocumentRow>(
                    "SELECT document FROM asteroids ORDER BY rowid LIMIT ?",
                )
                .bind(i64::from(limit))
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(DocumentRow::decode).collect()
    }

    pub async fn count(&self) -> Result<i64> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM asteroids")
            .fetch_one(&self.pool)
            .await?)
    }

    pub async fn count_hazardous(&self) -> Result<i64> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM asteroids WHERE is_hazardous = 1")
                .fetch_one(&self.pool)
                .await?,
        )
    }

    pub async fn count_by_risk(&self, level: RiskLevel) -> Result<i64> {
        Ok(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM asteroids WHERE risk_level = ?")
                .bind(level.as_str())
                .fetch_one(&self.pool)
                .await?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::test_pool,
        parser::min_miss_distance_km,
        repo::fixtures::{approach, neo},
    };

    #[tokio::test]
    async fn fetched_tier_matches_fresh_classification() {
        let repo = ObjectRepository::new(test_pool().await);
        let mut apophis = neo("2099942", true, 1.2);
        apophis.close_approach_data =
            vec![approach("9,000,000", "5.8"), approach("31,600", "7.42")];
        repo.upsert(apophis).await.unwrap();

        let stored = repo.get("2099942").await.unwrap();
        let fresh = risk::classify(
            stored.is_potentially_hazardous_asteroid,
            stored.estimated_diameter.kilometers_max,
            min_miss_distance_km(&stored.close_approach_data).unwrap(),
        );
        assert_eq!(stored.risk_level, fresh);
        assert_eq!(stored.risk_level, RiskLevel::Critical);
    }

    #[tokio::test]
    async fn upsert_recomputes_a_stale_tier() {
        let repo = ObjectRepository::new(test_pool().await);
        let mut pebble = neo("3000100", false, 0.01);
        pebble.risk_level = RiskLevel::Critical;

        let stored = repo.upsert(pebble).await.unwrap();
        assert_eq!(stored.risk_level, RiskLevel::Low);
        assert_eq!(repo.count_by_risk(RiskLevel::Critical).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn repeated_upsert_replaces_every_field() {
        let repo = ObjectRepository::new(test_pool().await);
        let mut first = neo("2465633", true, 0.6);
        first.is_sentry_object = true;
        first.close_approach_data.push(approach("100", "30"));
        repo.upsert(first).await.unwrap();

        let mut second = neo("2465633", false, 0.05);
        second.name = "465633 (2009 JR5)".into();
        second.close_approach_data.clear();
        let second = repo.upsert(second).await.unwrap();

        let stored = repo.get("2465633").await.unwrap();
        assert_eq!(stored, second);
        assert!(!stored.is_sentry_object);
        assert!(stored.close_approach_data.is_empty());
        assert_eq!(stored.risk_level, RiskLevel::Low);
        assert_eq!(repo.count().await.unwrap(), 1);
        assert_eq!(repo.count_hazardous().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn upsert_rejects_malformed_distance_without_writing() {
        let repo = ObjectRepository::new(test_pool().await);
        let mut broken = neo("3999999", true, 0.3);
        broken.close_approach_data = vec![approach("abc", "9.1")];

        let err = repo.upsert(broken).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedQuantity(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn get_unknown_reference_is_not_found() {
        let repo = ObjectRepository::new(test_pool().await);
        assert!(matches!(
            repo.get("404").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_filters_by_tier_and_honours_limit() {
        let repo = ObjectRepository::new(test_pool().await);
        repo.upsert(neo("1", false, 0.01)).await.unwrap();
        repo.upsert(neo("2", false, 0.3)).await.unwrap();
        repo.upsert(neo("3", false, 0.4)).await.unwrap();
        repo.upsert(neo("4", true, 2.0)).await.unwrap();

        let moderate = repo.list(Some(RiskLevel::Moderate), 50).await.unwrap();
        let ids: Vec<_> = moderate.iter().map(|n| n.neo_reference_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);

        assert_eq!(repo.list(None, 3).await.unwrap().len(), 3);
        assert_eq!(repo.count_by_risk(RiskLevel::Critical).await.unwrap(), 1);
        assert_eq!(repo.count_hazardous().await.unwrap(), 1);
    }
}
