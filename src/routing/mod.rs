pub mod ors;
pub mod polyline;
pub mod provider;
pub mod resolver;

pub use ors::OrsClient;
pub use polyline::decode_polyline;
pub use provider::{GeocodeCandidate, OptimizationRequest, OptimizationResult, OptimizedRoute, RoutingProvider};
pub use resolver::RouteResolver;
