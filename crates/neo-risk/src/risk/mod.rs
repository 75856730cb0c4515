use crate::{
    error::Result,
    models::{NearEarthObject, RiskLevel},
    parser::min_miss_distance_km,
};

const CRITICAL_DIAMETER_KM: f64 = 1.0;
const CRITICAL_DISTANCE_KM: f64 = 1_000_000.0;
const HIGH_DIAMETER_KM: f64 = 0.5;
const HIGH_DISTANCE_KM: f64 = 5_000_000.0;
const MODERATE_DIAMETER_KM: f64 = 0.1;

/// Maps hazard flag, maximum diameter and closest approach to a tier.
///
/// Tiers are checked from most to least severe and the first match wins, so
/// the conditions overlap on purpose. `None` for the distance means the object
/// has no recorded approach and no proximity condition can match.
pub fn classify(hazardous: bool, diameter_km: f64, min_distance_km: Option<f64>) -> RiskLevel {
    let distance = min_distance_km.unwrap_or(f64::INFINITY);

    if hazardous && diameter_km > CRITICAL_DIAMETER_KM && distance < CRITICAL_DISTANCE_KM {
        RiskLevel::Critical
    } else if hazardous && (diameter_km > HIGH_DIAMETER_KM || distance < HIGH_DISTANCE_KM) {
        RiskLevel::High
    } else if hazardous || diameter_km > MODERATE_DIAMETER_KM {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

/// Classifies an object from its stored approach data.
pub fn assess(neo: &NearEarthObject) -> Result<RiskLevel> {
    let min_distance = min_miss_distance_km(&neo.close_approach_data)?;
    Ok(classify(
        neo.is_potentially_hazardous_asteroid,
        neo.estimated_diameter.kilometers_max,
        min_distance,
    ))
}
