use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{
        CloseApproach, EstimatedDiameter, MissDistance, NearEarthObject, RelativeVelocity,
        RiskLevel,
    },
    risk,
};

const DEFAULT_ORBITING_BODY: &str = "Earth";

/// One page of the upstream feed. Records stay untyped here so a single bad
/// record can be rejected without failing the whole page.
#[derive(Debug, Default, serde::Deserialize)]
pub struct RawFeed {
    #[serde(default)]
    pub element_count: u64,
    #[serde(default)]
    pub near_earth_objects: BTreeMap<String, Vec<serde_json::Value>>,
}

impl RawFeed {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| AppError::UpstreamFailure(format!("unreadable feed body: {e}")))
    }

    pub fn into_records(self) -> impl Iterator<Item = serde_json::Value> {
        self.near_earth_objects.into_values().flatten()
    }
}

#[derive(Debug, serde::Deserialize)]
struct RawNeo {
    #[serde(default)]
    id: String,
    #[serde(default)]
    neo_reference_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    nasa_jpl_url: String,
    #[serde(default)]
    absolute_magnitude_h: f64,
    #[serde(default)]
    estimated_diameter: RawDiameters,
    #[serde(default)]
    is_potentially_hazardous_asteroid: bool,
    #[serde(default)]
    close_approach_data: Vec<RawApproach>,
    #[serde(default)]
    is_sentry_object: bool,
}

#[derive(Debug, Default, serde::Deserialize)]
struct RawDiameters {
    #[serde(default)]
    kilometers: RawRange,
    #[serde(default)]
    meters: RawRange,
}

#[derive(Debug, Default, serde::Deserialize)]
struct RawRange {
    #[serde(default)]
    estimated_diameter_min: f64,
    #[serde(default)]
    estimated_diameter_max: f64,
}

#[derive(Debug, serde::Deserialize)]
struct RawApproach {
    #[serde(default)]
    close_approach_date: String,
    #[serde(default)]
    close_approach_date_full: String,
    #[serde(default)]
    epoch_date_close_approach: i64,
    relative_velocity: Option<RawVelocity>,
    miss_distance: Option<RawMissDistance>,
    orbiting_body: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct RawVelocity {
    kilometers_per_hour: Option<String>,
    kilometers_per_second: Option<String>,
    miles_per_hour: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct RawMissDistance {
    astronomical: Option<String>,
    lunar: Option<String>,
    kilometers: Option<String>,
    miles: Option<String>,
}

/// Parses feed text such as `"1,234,567.89"` into a float. Separators and
/// surrounding whitespace are dropped; anything else non-numeric is rejected.
pub fn parse_quantity(raw: &str) -> Result<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(AppError::MalformedQuantity(raw.to_string())),
    }
}

pub fn miss_distance_km(distance: &MissDistance) -> Result<f64> {
    parse_quantity(&distance.kilometers)
}

pub fn velocity_kms(velocity: &RelativeVelocity) -> Result<f64> {
    parse_quantity(&velocity.kilometers_per_second)
}

/// Closest approach across the sequence, `None` when there are no approaches.
pub fn min_miss_distance_km(approaches: &[CloseApproach]) -> Result<Option<f64>> {
    let mut min: Option<f64> = None;
    for approach in approaches {
        let km = miss_distance_km(&approach.miss_distance)?;
        min = Some(min.map_or(km, |m| m.min(km)));
    }
    Ok(min)
}

/// Turns one raw feed record into a classified object stamped with `now`.
pub fn parse_neo(record: serde_json::Value, now: DateTime<Utc>) -> Result<NearEarthObject> {
    let raw: RawNeo =
        serde_json::from_value(record).map_err(|e| AppError::MalformedRecord(e.to_string()))?;

    let reference_id = if raw.id.trim().is_empty() {
        raw.neo_reference_id
    } else {
        raw.id
    };
    if reference_id.trim().is_empty() {
        return Err(AppError::MalformedRecord("missing field `id`".into()));
    }

    let close_approach_data = raw
        .close_approach_data
        .into_iter()
        .map(parse_approach)
        .collect::<Result<Vec<_>>>()
        .map_err(|e| match e {
            AppError::MalformedRecord(msg) => {
                AppError::MalformedRecord(format!("object {reference_id}: {msg}"))
            }
            other => other,
        })?;

    let mut neo = NearEarthObject {
        id: Uuid::new_v4(),
        neo_reference_id: reference_id,
        name: raw.name,
        nasa_jpl_url: raw.nasa_jpl_url,
        absolute_magnitude_h: raw.absolute_magnitude_h,
        estimated_diameter: parse_diameter(raw.estimated_diameter),
        is_potentially_hazardous_asteroid: raw.is_potentially_hazardous_asteroid,
        close_approach_data,
        is_sentry_object: raw.is_sentry_object,
        risk_level: RiskLevel::Low,
        impact_probability: 0.0,
        last_updated: now,
    };
    neo.risk_level = risk::assess(&neo)?;
    Ok(neo)
}

fn parse_diameter(raw: RawDiameters) -> EstimatedDiameter {
    EstimatedDiameter {
        kilometers_min: raw.kilometers.estimated_diameter_min,
        kilometers_max: raw.kilometers.estimated_diameter_max,
        meters_min: raw.meters.estimated_diameter_min,
        meters_max: raw.meters.estimated_diameter_max,
    }
}

fn parse_approach(raw: RawApproach) -> Result<CloseApproach> {
    let velocity = raw
        .relative_velocity
        .ok_or_else(|| missing("relative_velocity"))?;
    let distance = raw.miss_distance.ok_or_else(|| missing("miss_distance"))?;

    let relative_velocity = RelativeVelocity {
        kilometers_per_hour: quantity_field(velocity.kilometers_per_hour, "kilometers_per_hour")?,
        kilometers_per_second: quantity_field(
            velocity.kilometers_per_second,
            "kilometers_per_second",
        )?,
        miles_per_hour: quantity_field(velocity.miles_per_hour, "miles_per_hour")?,
    };
    let miss_distance = MissDistance {
        astronomical: quantity_field(distance.astronomical, "astronomical")?,
        lunar: quantity_field(distance.lunar, "lunar")?,
        kilometers: quantity_field(distance.kilometers, "kilometers")?,
        miles: quantity_field(distance.miles, "miles")?,
    };

    Ok(CloseApproach {
        close_approach_date: raw.close_approach_date,
        close_approach_date_full: raw.close_approach_date_full,
        epoch_date_close_approach: raw.epoch_date_close_approach,
        relative_velocity,
        miss_distance,
        orbiting_body: raw
            .orbiting_body
            .unwrap_or_else(|| DEFAULT_ORBITING_BODY.to_string()),
    })
}

/// Required textual quantity: must be present and must parse.
fn quantity_field(value: Option<String>, name: &str) -> Result<String> {
    let value = value.ok_or_else(|| missing(name))?;
    parse_quantity(&value)?;
    Ok(value)
}

fn missing(field: &str) -> AppError {
    AppError::MalformedRecord(format!("missing field `{field}`"))
}
