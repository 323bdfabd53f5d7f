//! Fuel consumption model
//!
//! Static per-100km rates for every supported vehicle profile and fuel type.

use crate::error::AppError;
use crate::models::{FuelType, VehicleProfile};

/// Fuel units consumed per 100 km
const RATES: &[(VehicleProfile, FuelType, f64)] = &[
    (VehicleProfile::DrivingHgv, FuelType::Diesel, 40.0),
    (VehicleProfile::DrivingHgv, FuelType::Gasoline, 50.0),
    (VehicleProfile::DrivingCar, FuelType::Diesel, 5.0),
    (VehicleProfile::DrivingCar, FuelType::Gasoline, 6.5),
];

/// Consumption rate for a profile and fuel type, if the table has one
pub fn rate(profile: VehicleProfile, fuel_type: FuelType) -> Option<f64> {
    RATES
        .iter()
        .find(|(p, f, _)| *p == profile && *f == fuel_type)
        .map(|(_, _, rate)| *rate)
}

/// Fuel consumed over `distance_km`
pub fn consumption(
    distance_km: f64,
    profile: VehicleProfile,
    fuel_type: FuelType,
) -> Result<f64, AppError> {
    let rate = rate(profile, fuel_type).ok_or_else(|| {
        AppError::UnsupportedCombination(format!(
            "no consumption rate for profile '{}' with fuel '{}'",
            profile, fuel_type
        ))
    })?;

    Ok((distance_km / 100.0) * rate)
}
