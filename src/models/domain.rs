use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Vehicle profile understood by the routing provider
///
/// Closed set: every profile needs a row in the consumption rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleProfile {
    #[serde(rename = "driving-hgv")]
    DrivingHgv,
    #[serde(rename = "driving-car")]
    DrivingCar,
}

impl VehicleProfile {
    pub const ALL: [VehicleProfile; 2] = [VehicleProfile::DrivingHgv, VehicleProfile::DrivingCar];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleProfile::DrivingHgv => "driving-hgv",
            VehicleProfile::DrivingCar => "driving-car",
        }
    }
}

impl std::str::FromStr for VehicleProfile {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "driving-hgv" => Ok(VehicleProfile::DrivingHgv),
            "driving-car" => Ok(VehicleProfile::DrivingCar),
            _ => Err(AppError::InvalidInput(format!(
                "Unknown vehicle profile '{}', expected one of: driving-hgv, driving-car",
                s
            ))),
        }
    }
}

impl std::fmt::Display for VehicleProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fuel type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Diesel,
    Gasoline,
}

impl FuelType {
    pub const ALL: [FuelType; 2] = [FuelType::Diesel, FuelType::Gasoline];

    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Diesel => "diesel",
            FuelType::Gasoline => "gasoline",
        }
    }

    /// Row label used by the price listing page, e.g. "Diesel prices"
    pub fn price_label(&self) -> &'static str {
        match self {
            FuelType::Diesel => "Diesel prices",
            FuelType::Gasoline => "Gasoline prices",
        }
    }

    /// Inverse of [`FuelType::price_label`]; unrelated rows map to `None`
    pub fn from_price_label(label: &str) -> Option<Self> {
        FuelType::ALL
            .into_iter()
            .find(|fuel| fuel.price_label().eq_ignore_ascii_case(label.trim()))
    }
}

impl std::str::FromStr for FuelType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diesel" => Ok(FuelType::Diesel),
            "gasoline" => Ok(FuelType::Gasoline),
            _ => Err(AppError::InvalidInput(format!(
                "Unknown fuel type '{}', expected one of: diesel, gasoline",
                s
            ))),
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A (longitude, latitude) pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting values outside the WGS84 range
    pub fn new(lon: f64, lat: f64) -> Option<Self> {
        let valid = lon.is_finite()
            && lat.is_finite()
            && (-180.0..=180.0).contains(&lon)
            && (-90.0..=90.0).contains(&lat);
        valid.then_some(Self { lon, lat })
    }

    pub fn as_lon_lat(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    pub fn as_lat_lon(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

/// Normalized route between two places
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub distance_km: f64,
    pub duration_seconds: f64,
    /// Ordered (lon, lat) points; empty when geometry was not requested
    pub path: Vec<Coordinate>,
}

impl RouteResult {
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration_seconds)
    }
}

/// Final output of the estimation pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct CostEstimate {
    /// Rounded to 2 decimals
    pub distance_km: f64,
    pub duration_seconds: f64,
    /// H:MM:SS
    pub duration: String,
    /// Rounded to 2 decimals, in MAD
    pub transport_cost: f64,
    pub fuel_consumed: f64,
    pub fuel_price: f64,
    pub route_geometry: Option<Vec<Coordinate>>,
}

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Render elapsed seconds as `H:MM:SS`
///
/// Durations of a day or more get a `N day(s), ` prefix and fractional
/// seconds are kept to microsecond precision, e.g. `1 day, 2:03:04.500000`.
pub fn format_duration(seconds: f64) -> String {
    let micros_total = (seconds.max(0.0) * 1_000_000.0).round() as u64;
    let micros = micros_total % 1_000_000;
    let whole = micros_total / 1_000_000;

    let days = whole / 86_400;
    let hours = (whole % 86_400) / 3_600;
    let minutes = (whole % 3_600) / 60;
    let secs = whole % 60;

    let mut out = String::new();
    if days > 0 {
        let unit = if days == 1 { "day" } else { "days" };
        out.push_str(&format!("{} {}, ", days, unit));
    }
    out.push_str(&format!("{}:{:02}:{:02}", hours, minutes, secs));
    if micros > 0 {
        out.push_str(&format!(".{:06}", micros));
    }
    out
}
