mod extract;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    error::Result,
    ingest::{self, IngestReport},
    models::{DashboardStats, ImpactLocation, ImpactScenario, NearEarthObject, RiskLevel},
    physics, AppState,
};

use extract::{ApiJson, ApiQuery};

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({"message": "NEO Risk API", "status": "active"}))
}

#[derive(Debug, Deserialize)]
pub struct FetchParams {
    #[serde(default = "default_days_ahead")]
    days_ahead: u32,
}

fn default_days_ahead() -> u32 {
    7
}

pub async fn fetch_asteroids(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<FetchParams>,
) -> Result<Json<IngestReport>> {
    let (start, end) = ingest::window_from_today(params.days_ahead)?;
    let report = ingest::ingest_window(state.feed.as_ref(), &state.objects, start, end).await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct ListAsteroidsParams {
    risk_level: Option<RiskLevel>,
    #[serde(default = "default_asteroid_limit")]
    limit: u32,
}

fn default_asteroid_limit() -> u32 {
    50
}

pub async fn list_asteroids(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListAsteroidsParams>,
) -> Result<Json<Vec<NearEarthObject>>> {
    let items = state.objects.list(params.risk_level, params.limit).await?;
    Ok(Json(items))
}

pub async fn get_asteroid(
    State(state): State<AppState>,
    Path(reference_id): Path<String>,
) -> Result<Json<NearEarthObject>> {
    Ok(Json(state.objects.get(&reference_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct ImpactScenarioRequest {
    asteroid_neo_id: String,
    impact_location: ImpactLocation,
}

pub async fn create_impact_scenario(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ImpactScenarioRequest>,
) -> Result<Json<ImpactScenario>> {
    let neo = state.objects.get(&req.asteroid_neo_id).await?;
    let outcome = physics::simulate_for(&neo)?;

    let scenario = ImpactScenario {
        id: Uuid::new_v4(),
        asteroid_id: neo.neo_reference_id,
        impact_location: req.impact_location,
        estimated_damage_radius_km: outcome.damage_radius_km,
        estimated_casualties: outcome.estimated_casualties,
        impact_energy_megatons: outcome.energy_megatons,
        created_at: Utc::now(),
    };
    state.scenarios.insert(&scenario).await?;

    info!(
        scenario_id = %scenario.id,
        asteroid_id = %scenario.asteroid_id,
        megatons = scenario.impact_energy_megatons,
        "impact scenario created"
    );
    Ok(Json(scenario))
}

#[derive(Debug, Deserialize)]
pub struct ListScenariosParams {
    #[serde(default = "default_scenario_limit")]
    limit: u32,
}

fn default_scenario_limit() -> u32 {
    20
}

pub async fn list_impact_scenarios(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListScenariosParams>,
) -> Result<Json<Vec<ImpactScenario>>> {
    Ok(Json(state.scenarios.list(params.limit).await?))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    Ok(Json(DashboardStats {
        total_asteroids: state.objects.count().await?,
        hazardous_asteroids: state.objects.count_hazardous().await?,
        critical_risk_count: state.objects.count_by_risk(RiskLevel::Critical).await?,
        high_risk_count: state.objects.count_by_risk(RiskLevel::High).await?,
        total_scenarios: state.scenarios.count().await?,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{
        app,
        db::test_pool,
        ingest::tests::{DownFeed, FixtureFeed},
        repo::{ObjectRepository, ScenarioRepository},
        AppState,
    };

    async fn test_app(feed: Arc<dyn crate::adapters::FeedAdapter>) -> Router {
        let pool = test_pool().await;
        app(AppState {
            objects: ObjectRepository::new(pool.clone()),
            scenarios: ScenarioRepository::new(pool),
            feed,
        })
    }

    async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.expect("router is infallible");
        let status = resp.status();
        let bytes = resp.into_body().collect().await.expect("body").to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_active() {
        let app = test_app(Arc::new(FixtureFeed::default())).await;
        let (status, body) = call(&app, get("/api/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "active");
    }

    #[tokio::test]
    async fn unknown_asteroid_is_404_with_detail() {
        let app = test_app(Arc::new(FixtureFeed::default())).await;
        let (status, body) = call(&app, get("/api/asteroids/0000000")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "asteroid 0000000 not found");
    }

    #[tokio::test]
    async fn scenario_for_unknown_asteroid_is_404() {
        let app = test_app(Arc::new(FixtureFeed::default())).await;
        let (status, _) = call(
            &app,
            post_json(
                "/api/impact-scenario",
                json!({"asteroid_neo_id": "nope", "impact_location": {"lat": 0.0, "lng": 0.0}}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bad_query_parameters_are_400_with_detail() {
        let app = test_app(Arc::new(FixtureFeed::default())).await;
        for uri in [
            "/api/asteroids?risk_level=extreme",
            "/api/asteroids?limit=-1",
            "/api/asteroids/fetch?days_ahead=soon",
            "/api/impact-scenarios?limit=many",
        ] {
            let (status, body) = call(&app, get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            let detail = body["detail"].as_str().unwrap_or_default();
            assert!(detail.starts_with("invalid parameter: "), "{uri}: {body}");
        }
    }

    #[tokio::test]
    async fn malformed_scenario_body_is_400_with_detail() {
        let app = test_app(Arc::new(FixtureFeed::default())).await;
        let bodies = [
            json!({"impact_location": {"lat": 0.0, "lng": 0.0}}),
            json!({"asteroid_neo_id": "2099942", "impact_location": "Tokyo"}),
        ];
        for body in bodies {
            let (status, resp) = call(&app, post_json("/api/impact-scenario", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(resp["detail"].is_string(), "{resp}");
        }

        let not_json = Request::builder()
            .method("POST")
            .uri("/api/impact-scenario")
            .header("content-type", "application/json")
            .body(Body::from("{"))
            .unwrap();
        let (status, resp) = call(&app, not_json).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(resp["detail"].is_string());
    }

    #[tokio::test]
    async fn upstream_outage_is_500() {
        let app = test_app(Arc::new(DownFeed)).await;
        let (status, body) = call(&app, get("/api/asteroids/fetch")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().contains("upstream"));
    }

    #[tokio::test]
    async fn fetch_list_simulate_and_count() {
        let feed = Arc::new(FixtureFeed::default());
        let app = test_app(feed.clone()).await;

        let (status, report) = call(&app, get("/api/asteroids/fetch?days_ahead=3")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["processed_count"], 3);
        let (start, end) = feed.requests.lock().unwrap()[0];
        assert_eq!((end - start).num_days(), 3);

        let (_, critical) = call(&app, get("/api/asteroids?risk_level=critical")).await;
        let critical = critical.as_array().unwrap();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0]["neo_reference_id"], "2099942");
        assert_eq!(critical[0]["risk_level"], "critical");

        let (_, limited) = call(&app, get("/api/asteroids?limit=2")).await;
        assert_eq!(limited.as_array().unwrap().len(), 2);

        let request = json!({
            "asteroid_neo_id": "2099942",
            "impact_location": {"lat": 35.6762, "lng": 139.6503}
        });
        let (status, first) = call(&app, post_json("/api/impact-scenario", request.clone())).await;
        assert_eq!(status, StatusCode::OK);
        let (_, second) = call(&app, post_json("/api/impact-scenario", request)).await;
        assert_ne!(first["id"], second["id"]);

        let expected = crate::physics::simulate_impact(1.2, 7.42).unwrap();
        assert_eq!(first["asteroid_id"], "2099942");
        assert_eq!(first["impact_location"]["lng"], 139.6503);
        assert_eq!(first["estimated_casualties"], expected.estimated_casualties);
        assert_eq!(
            first["impact_energy_megatons"].as_f64().unwrap(),
            expected.energy_megatons
        );

        let (_, scenarios) = call(&app, get("/api/impact-scenarios?limit=1")).await;
        assert_eq!(scenarios.as_array().unwrap().len(), 1);

        let (_, stats) = call(&app, get("/api/stats")).await;
        assert_eq!(
            stats,
            json!({
                "total_asteroids": 3,
                "hazardous_asteroids": 2,
                "critical_risk_count": 1,
                "high_risk_count": 1,
                "total_scenarios": 2
            })
        );
    }
}
