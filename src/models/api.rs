use serde::{Deserialize, Serialize};

use super::domain::CostEstimate;

/// Body of `POST /calculate-route/`
///
/// Profile and fuel type stay plain strings here so that unknown values reach
/// the pipeline's validation step instead of failing JSON extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRouteRequest {
    pub start_location: String,
    pub end_location: String,
    pub profile: String,
    pub fuel_type: String,
    /// Attach the decoded route geometry (default: true)
    #[serde(default = "default_include_geometry")]
    pub include_geometry: bool,
    /// Pair ordering of `route_coordinates`
    #[serde(default)]
    pub coordinate_order: CoordinateOrder,
}

fn default_include_geometry() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateOrder {
    /// GeoJSON order, as returned by the routing provider
    #[default]
    LonLat,
    /// Order expected by most web mapping libraries
    LatLon,
}

/// Successful response of `POST /calculate-route/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRouteResponse {
    pub distance_km: f64,
    pub duration: String,
    pub transport_cost_mad: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_coordinates: Option<Vec<[f64; 2]>>,
}

impl CalculateRouteResponse {
    pub fn from_estimate(estimate: CostEstimate, order: CoordinateOrder) -> Self {
        let route_coordinates = estimate.route_geometry.map(|path| {
            path.iter()
                .map(|c| match order {
                    CoordinateOrder::LonLat => c.as_lon_lat(),
                    CoordinateOrder::LatLon => c.as_lat_lon(),
                })
                .collect()
        });

        Self {
            distance_km: estimate.distance_km,
            duration: estimate.duration,
            transport_cost_mad: estimate.transport_cost,
            route_coordinates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Coordinate;

    fn sample_estimate() -> CostEstimate {
        CostEstimate {
            distance_km: 120.0,
            duration_seconds: 3600.0,
            duration: "1:00:00".to_string(),
            transport_cost: 69.0,
            fuel_consumed: 6.0,
            fuel_price: 11.5,
            route_geometry: Some(vec![
                Coordinate { lon: -7.59, lat: 33.57 },
                Coordinate { lon: -6.84, lat: 34.02 },
            ]),
        }
    }

    #[test]
    fn test_request_defaults() {
        let request: CalculateRouteRequest = serde_json::from_value(serde_json::json!({
            "start_location": "Casablanca",
            "end_location": "Rabat",
            "profile": "driving-car",
            "fuel_type": "diesel"
        }))
        .unwrap();

        assert!(request.include_geometry);
        assert_eq!(request.coordinate_order, CoordinateOrder::LonLat);
    }

    #[test]
    fn test_response_keeps_lon_lat_by_default() {
        let response = CalculateRouteResponse::from_estimate(sample_estimate(), CoordinateOrder::LonLat);
        let coords = response.route_coordinates.unwrap();
        assert_eq!(coords[0], [-7.59, 33.57]);
    }

    #[test]
    fn test_response_swaps_to_lat_lon() {
        let response = CalculateRouteResponse::from_estimate(sample_estimate(), CoordinateOrder::LatLon);
        let coords = response.route_coordinates.unwrap();
        assert_eq!(coords[1], [34.02, -6.84]);
    }

    #[test]
    fn test_response_omits_missing_geometry() {
        let mut estimate = sample_estimate();
        estimate.route_geometry = None;
        let response = CalculateRouteResponse::from_estimate(estimate, CoordinateOrder::LonLat);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("route_coordinates").is_none());
        assert_eq!(json["transport_cost_mad"], 69.0);
        assert_eq!(json["duration"], "1:00:00");
    }
}
