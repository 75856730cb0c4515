use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Severity tiers, declared in ascending order so the derived `Ord` ranks them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EstimatedDiameter {
    pub kilometers_min: f64,
    pub kilometers_max: f64,
    pub meters_min: f64,
    pub meters_max: f64,
}

/// Velocity as the feed reports it: decimal text, one field per unit.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_hour: String,
    pub kilometers_per_second: String,
    pub miles_per_hour: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MissDistance {
    pub astronomical: String,
    pub lunar: String,
    pub kilometers: String,
    pub miles: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CloseApproach {
    pub close_approach_date: String,
    pub close_approach_date_full: String,
    /// Milliseconds since the Unix epoch, as defined by the feed.
    pub epoch_date_close_approach: i64,
    pub relative_velocity: RelativeVelocity,
    pub miss_distance: MissDistance,
    pub orbiting_body: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NearEarthObject {
    pub id: Uuid,
    pub neo_reference_id: String,
    pub name: String,
    pub nasa_jpl_url: String,
    pub absolute_magnitude_h: f64,
    pub estimated_diameter: EstimatedDiameter,
    pub is_potentially_hazardous_asteroid: bool,
    /// Kept in feed order.
    pub close_approach_data: Vec<CloseApproach>,
    pub is_sentry_object: bool,
    pub risk_level: RiskLevel,
    pub impact_probability: f64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImpactLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImpactScenario {
    pub id: Uuid,
    /// Reference id of the source object. Not enforced against the object store.
    pub asteroid_id: String,
    pub impact_location: ImpactLocation,
    pub estimated_damage_radius_km: f64,
    pub estimated_casualties: u64,
    pub impact_energy_megatons: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DashboardStats {
    pub total_asteroids: i64,
    pub hazardous_asteroids: i64,
    pub critical_risk_count: i64,
    pub high_risk_count: i64,
    pub total_scenarios: i64,
}

#[cfg(test)]
mod tests {
    use super::RiskLevel;

    #[test]
    fn risk_levels_are_totally_ordered_by_severity() {
        let mut levels = vec![
            RiskLevel::Critical,
            RiskLevel::Low,
            RiskLevel::High,
            RiskLevel::Moderate,
        ];
        levels.sort();
        assert_eq!(
            levels,
            vec![
                RiskLevel::Low,
                RiskLevel::Moderate,
                RiskLevel::High,
                RiskLevel::Critical
            ]
        );
    }

    #[test]
    fn risk_level_wire_name_matches_storage_name() {
        for level in [
            RiskLevel::Low,
            RiskLevel::Moderate,
            RiskLevel::High,
            RiskLevel::Critical,
        ] {
            let json = serde_json::to_string(&level).expect("serialize");
            assert_eq!(json, format!("\"{}\"", level.as_str()));
        }
    }
}
