pub mod api;
pub mod domain;

pub use api::{CalculateRouteRequest, CalculateRouteResponse, CoordinateOrder};
pub use domain::{Coordinate, CostEstimate, FuelType, RouteResult, VehicleProfile};
