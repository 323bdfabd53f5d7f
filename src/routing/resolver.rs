use crate::error::AppError;
use crate::models::{Coordinate, RouteResult, VehicleProfile};
use crate::routing::polyline::decode_polyline;
use crate::routing::provider::{OptimizationRequest, RoutingProvider};
use std::sync::Arc;
use tracing::debug;

/// Resolves two place names into a normalized route
pub struct RouteResolver {
    provider: Arc<dyn RoutingProvider>,
}

impl RouteResolver {
    pub fn new(provider: Arc<dyn RoutingProvider>) -> Self {
        Self { provider }
    }

    async fn geocode_first(&self, place: &str) -> Result<Coordinate, AppError> {
        let candidates = self.provider.geocode(place).await?;
        let first = candidates.first().copied().ok_or_else(|| {
            AppError::Geocoding(format!("no location found for '{}'", place))
        })?;
        let coord = first.to_coordinate().ok_or_else(|| {
            AppError::Geocoding(format!(
                "location for '{}' is outside valid range ({}, {})",
                place, first.lon, first.lat
            ))
        })?;

        debug!(place, lon = coord.lon, lat = coord.lat, "Geocoded place");
        Ok(coord)
    }

    /// Geocode both places, optimize a one-job route between them and
    /// normalize the first route returned.
    ///
    /// `with_path` controls whether the route geometry is decoded.
    pub async fn resolve(
        &self,
        start: &str,
        end: &str,
        profile: VehicleProfile,
        with_path: bool,
    ) -> Result<RouteResult, AppError> {
        let (start_coord, end_coord) =
            tokio::try_join!(self.geocode_first(start), self.geocode_first(end))?;

        let result = self
            .provider
            .optimize(&OptimizationRequest {
                profile,
                start: start_coord,
                job_location: end_coord,
            })
            .await?;

        if result.routes.len() > 1 {
            debug!(routes = result.routes.len(), "Optimizer returned several routes, using the first");
        }

        let route = result.routes.into_iter().next().ok_or_else(|| {
            AppError::Routing(format!("no route found from '{}' to '{}'", start, end))
        })?;

        if !(route.distance_m.is_finite() && route.distance_m >= 0.0) {
            return Err(AppError::Routing(format!(
                "provider reported invalid distance {}",
                route.distance_m
            )));
        }
        if !(route.duration_s.is_finite() && route.duration_s >= 0.0) {
            return Err(AppError::Routing(format!(
                "provider reported invalid duration {}",
                route.duration_s
            )));
        }

        let path = match (with_path, route.geometry.as_deref()) {
            (true, Some(encoded)) => decode_polyline(encoded)?,
            (true, None) => {
                return Err(AppError::Routing(
                    "provider route missing geometry".to_string(),
                ))
            }
            (false, _) => Vec::new(),
        };

        Ok(RouteResult {
            distance_km: route.distance_m / 1000.0,
            duration_seconds: route.duration_s,
            path,
        })
    }
}
