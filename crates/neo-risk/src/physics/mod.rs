//! Kinetic impact estimate for a spherical rocky body.
//!
//! The formula chain and its constants are fixed so that stored scenarios can
//! be reproduced bit for bit, including the truncated value of pi.

use crate::{
    error::{AppError, Result},
    models::{CloseApproach, NearEarthObject},
    parser::velocity_kms,
};

pub const REFERENCE_PI: f64 = 3.14159;
/// kg/m^3
pub const ASTEROID_DENSITY: f64 = 2000.0;
pub const JOULES_PER_MEGATON: f64 = 4.184e15;
/// people/km^2
pub const POPULATION_DENSITY: f64 = 100.0;
/// Used when an object has no recorded approach.
pub const DEFAULT_VELOCITY_KMS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactOutcome {
    pub energy_megatons: f64,
    pub damage_radius_km: f64,
    pub estimated_casualties: u64,
}

pub fn impact_energy_megatons(diameter_km: f64, velocity_kms: f64) -> Result<f64> {
    check_input("diameter_km", diameter_km)?;
    check_input("velocity_kms", velocity_kms)?;

    let radius_m = diameter_km * 1000.0 / 2.0;
    let volume_m3 = (4.0 / 3.0) * REFERENCE_PI * radius_m.powf(3.0);
    let mass_kg = volume_m3 * ASTEROID_DENSITY;
    let velocity_ms = velocity_kms * 1000.0;
    let kinetic_energy_joules = 0.5 * mass_kg * velocity_ms.powf(2.0);
    Ok(kinetic_energy_joules / JOULES_PER_MEGATON)
}

pub fn simulate_impact(diameter_km: f64, velocity_kms: f64) -> Result<ImpactOutcome> {
    let energy_megatons = impact_energy_megatons(diameter_km, velocity_kms)?;
    let damage_radius_km = energy_megatons.powf(0.33) * 2.0;
    check_output("energy_megatons", energy_megatons)?;
    check_output("damage_radius_km", damage_radius_km)?;

    let affected_area_km2 = REFERENCE_PI * damage_radius_km.powf(2.0);
    let casualties = (affected_area_km2 * POPULATION_DENSITY).floor();
    // u64::MAX as f64 rounds up to 2^64, so equality already overflows.
    if !casualties.is_finite() || casualties >= u64::MAX as f64 {
        return Err(AppError::InvalidPhysicalInput(format!(
            "casualty estimate {casualties} is out of range"
        )));
    }
    let estimated_casualties = casualties as u64;

    Ok(ImpactOutcome {
        energy_megatons,
        damage_radius_km,
        estimated_casualties,
    })
}

/// Velocity of the first approach in feed order, or the default.
pub fn impact_velocity_kms(approaches: &[CloseApproach]) -> Result<f64> {
    match approaches.first() {
        Some(first) => velocity_kms(&first.relative_velocity),
        None => Ok(DEFAULT_VELOCITY_KMS),
    }
}

/// Worst case for a stored object: maximum diameter at the first approach velocity.
pub fn simulate_for(neo: &NearEarthObject) -> Result<ImpactOutcome> {
    let velocity = impact_velocity_kms(&neo.close_approach_data)?;
    simulate_impact(neo.estimated_diameter.kilometers_max, velocity)
}

fn check_input(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AppError::InvalidPhysicalInput(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

/// Finite inputs can still overflow the chain.
fn check_output(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AppError::InvalidPhysicalInput(format!(
            "{name} overflows for these inputs"
        )))
    }
}
