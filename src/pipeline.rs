use crate::{
    config::Config,
    consumption,
    error::AppError,
    fuel_prices::{resolve_price, CachedPriceSource, FuelPriceSource, HttpPriceSource},
    metrics,
    models::{
        domain::{format_duration, round2},
        CalculateRouteRequest, CostEstimate, FuelType, VehicleProfile,
    },
    routing::{OrsClient, RouteResolver},
};
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Unvalidated estimation input, as received from a caller
#[derive(Debug, Clone)]
pub struct EstimateRequest {
    pub start_location: String,
    pub end_location: String,
    pub profile: String,
    pub fuel_type: String,
    pub include_geometry: bool,
}

impl From<&CalculateRouteRequest> for EstimateRequest {
    fn from(req: &CalculateRouteRequest) -> Self {
        Self {
            start_location: req.start_location.clone(),
            end_location: req.end_location.clone(),
            profile: req.profile.clone(),
            fuel_type: req.fuel_type.clone(),
            include_geometry: req.include_geometry,
        }
    }
}

/// Geocode → route → fetch price → compute cost
pub struct CostEstimationPipeline {
    resolver: RouteResolver,
    prices: Arc<dyn FuelPriceSource>,
    price_url: String,
}

impl CostEstimationPipeline {
    pub fn new(resolver: RouteResolver, prices: Arc<dyn FuelPriceSource>, price_url: String) -> Self {
        Self {
            resolver,
            prices,
            price_url,
        }
    }

    /// Wire the production collaborators from configuration
    pub fn from_config(config: &Config, client: Client) -> Self {
        let provider = Arc::new(OrsClient::new(client.clone(), &config.ors));
        let http_source: Arc<dyn FuelPriceSource> =
            Arc::new(HttpPriceSource::new(client, &config.fuel_prices));

        let prices: Arc<dyn FuelPriceSource> = if config.fuel_prices.cache_ttl_seconds > 0 {
            info!(
                ttl_seconds = config.fuel_prices.cache_ttl_seconds,
                "Fuel price cache enabled"
            );
            Arc::new(CachedPriceSource::new(
                http_source,
                Duration::from_secs(config.fuel_prices.cache_ttl_seconds),
            ))
        } else {
            http_source
        };

        Self::new(
            RouteResolver::new(provider),
            prices,
            config.fuel_prices.url.clone(),
        )
    }

    pub fn price_url(&self) -> &str {
        &self.price_url
    }

    /// Run one estimation, recording metrics and logging the outcome
    pub async fn estimate(&self, request: &EstimateRequest) -> Result<CostEstimate, AppError> {
        let request_id = Uuid::new_v4();
        let span = info_span!(
            "estimate",
            %request_id,
            profile = %request.profile,
            fuel_type = %request.fuel_type,
        );

        // Metric labels stay bounded whatever the caller sent
        let profile_label = request
            .profile
            .parse::<VehicleProfile>()
            .map(|p| p.as_str())
            .unwrap_or("unknown");
        let fuel_label = request
            .fuel_type
            .parse::<FuelType>()
            .map(|f| f.as_str())
            .unwrap_or("unknown");

        let start = Instant::now();
        let result = self.run(request).instrument(span.clone()).await;
        let elapsed = start.elapsed();

        span.in_scope(|| match &result {
            Ok(estimate) => {
                metrics::record_request(profile_label, fuel_label, "success");
                metrics::record_duration(profile_label, fuel_label, elapsed);
                info!(
                    distance_km = estimate.distance_km,
                    transport_cost = estimate.transport_cost,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Estimate computed"
                );
            }
            Err(e) => {
                metrics::record_request(profile_label, fuel_label, "error");
                metrics::record_error(e.error_type());
                warn!(error = %e, error_type = e.error_type(), "Estimate failed");
            }
        });

        result
    }

    async fn run(&self, request: &EstimateRequest) -> Result<CostEstimate, AppError> {
        // 1. Validate
        let profile: VehicleProfile = request.profile.parse()?;
        let fuel_type: FuelType = request.fuel_type.parse()?;
        let start = non_empty_place("start_location", &request.start_location)?;
        let end = non_empty_place("end_location", &request.end_location)?;

        // 2. Route
        let route = self
            .resolver
            .resolve(start, end, profile, request.include_geometry)
            .await?;

        // 3-4. Price
        let table = self.prices.fetch_prices(&self.price_url).await?;
        let price = resolve_price(&table, fuel_type)?;

        // 5-6. Consumption and cost
        let consumed = consumption::consumption(route.distance_km, profile, fuel_type)?;
        let cost = consumed * price;

        Ok(CostEstimate {
            distance_km: round2(route.distance_km),
            duration_seconds: route.duration_seconds,
            duration: format_duration(route.duration_seconds),
            transport_cost: round2(cost),
            fuel_consumed: consumed,
            fuel_price: price,
            route_geometry: request.include_geometry.then_some(route.path),
        })
    }
}

fn non_empty_place<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!("{} cannot be empty", field)));
    }
    Ok(trimmed)
}
