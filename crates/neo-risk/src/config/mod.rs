use std::{env, fs};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub nasa_api_key: String,
    pub feed_base_url: String,
    pub feed_timeout_secs: u64,
    /// `*` or an explicit list of allowed origins.
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let path = env::var("NEO_RISK_CONFIG").unwrap_or_else(|_| "config.json".to_string());
        let file_cfg: Option<AppConfig> = fs::read_to_string(&path)
            .ok()
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .with_context(|| format!("failed to parse {path}"))?;

        let mut cfg = file_cfg.unwrap_or_default();
        cfg.apply_overrides(|key| env::var(key).ok());
        Ok(cfg)
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("NEO_HOST") {
            self.host = v;
        }
        if let Some(v) = var("NEO_PORT") {
            self.port = v.parse().unwrap_or(self.port);
        }
        if let Some(v) = var("NEO_DATABASE_URL") {
            self.database_url = v;
        }
        if let Some(v) = var("NASA_API_KEY") {
            self.nasa_api_key = v;
        }
        if let Some(v) = var("NEO_FEED_BASE_URL") {
            self.feed_base_url = v;
        }
        if let Some(v) = var("NEO_FEED_TIMEOUT_SECS") {
            self.feed_timeout_secs = v.parse().unwrap_or(self.feed_timeout_secs);
        }
        if let Some(v) = var("CORS_ORIGINS") {
            self.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "sqlite://neo-risk.db".to_string(),
            nasa_api_key: "DEMO_KEY".to_string(),
            feed_base_url: "https://api.nasa.gov/neo/rest/v1".to_string(),
            feed_timeout_secs: 30,
            cors_origins: vec!["*".to_string()],
        }
    }
}
