use anyhow::Result;
use colored::Colorize;
use fuel_cost_api::{
    config,
    models::{CalculateRouteResponse, CoordinateOrder},
    pipeline::{CostEstimationPipeline, EstimateRequest},
};
use std::path::Path;

/// Options of the estimate command
#[derive(Debug, Clone)]
pub struct EstimateArgs {
    pub from: String,
    pub to: String,
    pub profile: String,
    pub fuel: String,
    pub geometry: bool,
}

/// Execute the estimate command
///
/// Runs the same pipeline as `POST /calculate-route/` once and prints the
/// response body to stdout. Progress goes to stderr so the output stays
/// pipeable.
pub async fn execute(config_path: &Path, args: EstimateArgs) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let client = reqwest::Client::builder()
        .user_agent(concat!("fuel-cost-api/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let pipeline = CostEstimationPipeline::from_config(&cfg, client);

    eprintln!(
        "{} {} → {} ({}, {})",
        "Estimating".yellow(),
        args.from,
        args.to,
        args.profile,
        args.fuel
    );

    let request = EstimateRequest {
        start_location: args.from,
        end_location: args.to,
        profile: args.profile,
        fuel_type: args.fuel,
        include_geometry: args.geometry,
    };

    let estimate = match pipeline.estimate(&request).await {
        Ok(estimate) => estimate,
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            return Err(e.into());
        }
    };

    let response = CalculateRouteResponse::from_estimate(estimate, CoordinateOrder::LonLat);
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
