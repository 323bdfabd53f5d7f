use crate::error::AppError;
use crate::models::{Coordinate, VehicleProfile};
use async_trait::async_trait;

/// Single-vehicle, single-job optimization problem: drive from `start` and
/// serve one job at `job_location`
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationRequest {
    pub profile: VehicleProfile,
    pub start: Coordinate,
    pub job_location: Coordinate,
}

/// Raw geocoding hit, not yet range-checked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeocodeCandidate {
    pub lon: f64,
    pub lat: f64,
}

impl GeocodeCandidate {
    pub fn to_coordinate(self) -> Option<Coordinate> {
        Coordinate::new(self.lon, self.lat)
    }
}

impl From<Coordinate> for GeocodeCandidate {
    fn from(coord: Coordinate) -> Self {
        Self {
            lon: coord.lon,
            lat: coord.lat,
        }
    }
}

/// One vehicle route as reported by the optimizer
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedRoute {
    pub distance_m: f64,
    pub duration_s: f64,
    /// Encoded polyline (precision 5), when the provider returned one
    pub geometry: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimizationResult {
    pub routes: Vec<OptimizedRoute>,
}

/// Geocoding and route optimization capability
///
/// Implementations are injected into [`super::RouteResolver`], which makes
/// it possible to swap the real provider for a test double.
#[async_trait]
pub trait RoutingProvider: Send + Sync + 'static {
    /// Candidates for a free-text place name, best match first and in
    /// provider order. An empty list means "no match" and is not an error
    /// at this level.
    async fn geocode(&self, text: &str) -> Result<Vec<GeocodeCandidate>, AppError>;

    /// Solve the optimization problem. Zero routes is a valid answer.
    async fn optimize(&self, request: &OptimizationRequest) -> Result<OptimizationResult, AppError>;
}
