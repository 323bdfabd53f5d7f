use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics exporter
///
/// Fails if a global recorder is already installed (e.g. a second server in
/// the same process).
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!(
        "fuel_cost_requests_total",
        "Total number of cost estimation requests"
    );
    describe_histogram!(
        "fuel_cost_request_duration_seconds",
        "Cost estimation duration in seconds"
    );
    describe_counter!(
        "fuel_cost_errors_total",
        "Total number of failed estimations by error type"
    );
    describe_counter!(
        "fuel_cost_upstream_requests_total",
        "Calls to geocoding, routing and price upstreams"
    );
    describe_gauge!(
        "fuel_cost_api_info",
        "Service version information"
    );

    gauge!("fuel_cost_api_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a finished estimation
pub fn record_request(profile: &str, fuel_type: &str, status: &str) {
    counter!(
        "fuel_cost_requests_total",
        "profile" => profile.to_string(),
        "fuel_type" => fuel_type.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);
}

/// Record estimation duration
pub fn record_duration(profile: &str, fuel_type: &str, duration: Duration) {
    histogram!(
        "fuel_cost_request_duration_seconds",
        "profile" => profile.to_string(),
        "fuel_type" => fuel_type.to_string(),
    )
    .record(duration.as_secs_f64());
}

/// Record an error
pub fn record_error(error_type: &str) {
    counter!(
        "fuel_cost_errors_total",
        "error_type" => error_type.to_string(),
    )
    .increment(1);
}

/// Record an upstream call (`service`: geocoding, routing, fuel_prices)
pub fn record_upstream(service: &str, outcome: &str) {
    counter!(
        "fuel_cost_upstream_requests_total",
        "service" => service.to_string(),
        "outcome" => outcome.to_string(),
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_metrics() {
        init_metric_descriptions();

        record_request("driving-car", "diesel", "success");
        record_duration("driving-car", "diesel", Duration::from_millis(250));
        record_error("geocoding_error");
        record_upstream("routing", "success");

        // Without a recorder installed these are no-ops; they must not panic
    }
}
