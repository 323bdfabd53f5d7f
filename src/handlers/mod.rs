pub mod calculate_route;
pub mod health;
pub mod metrics_handler;

pub use calculate_route::AppState;
