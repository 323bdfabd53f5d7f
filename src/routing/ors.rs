use crate::config::OrsConfig;
use crate::error::AppError;
use crate::metrics;
use crate::routing::provider::{
    GeocodeCandidate, OptimizationRequest, OptimizationResult, OptimizedRoute, RoutingProvider,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error};

/// ORS optimization error code for "no route between the locations"
const UNFOUND_ROUTE_CODE: i64 = 3;

// --- Data Structures for parsing ORS responses ---

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct OptimizationResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    distance: Option<f64>,
    duration: Option<f64>,
    #[serde(default)]
    geometry: Option<String>,
}

/// openrouteservice client: Pelias geocoding + VROOM optimization
pub struct OrsClient {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OrsClient {
    pub fn new(client: Client, config: &OrsConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    /// Read a non-success ORS response into its error code and message
    ///
    /// ORS reports errors either as `{"code": .., "error": "..."}` or as
    /// `{"error": {"code": .., "message": ".."}}`.
    async fn error_body(response: Response) -> (Option<i64>, String) {
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        let Ok(body) = serde_json::from_str::<serde_json::Value>(&text) else {
            return (None, text);
        };

        match &body["error"] {
            serde_json::Value::String(msg) => (body["code"].as_i64(), msg.clone()),
            serde_json::Value::Object(obj) => (
                obj.get("code").and_then(|c| c.as_i64()),
                obj.get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or(text),
            ),
            _ => (body["code"].as_i64(), text),
        }
    }

    /// Turn a non-success ORS response into an [`AppError::Upstream`]
    async fn upstream_error(response: Response) -> AppError {
        let status = response.status();
        let (_, message) = Self::error_body(response).await;
        AppError::Upstream { status, message }
    }

    async fn send_geocode(&self, text: &str) -> Result<Vec<GeocodeCandidate>, AppError> {
        let url = format!("{}/geocode/search", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[("text", text)])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let body: GeoResponse = response.json().await?;

        // Range checks happen on the chosen candidate, order is preserved
        Ok(body
            .features
            .into_iter()
            .filter_map(|feature| match feature.geometry.coordinates.as_slice() {
                [lon, lat, ..] => Some(GeocodeCandidate { lon: *lon, lat: *lat }),
                _ => None,
            })
            .collect())
    }

    async fn send_optimization(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResult, AppError> {
        let url = format!("{}/optimization", self.base_url);
        // Geometry is always requested: VROOM only reports route distance with it
        let body = json!({
            "vehicles": [{
                "id": 0,
                "profile": request.profile.as_str(),
                "start": request.start.as_lon_lat(),
            }],
            "jobs": [{
                "id": 0,
                "location": request.job_location.as_lon_lat(),
            }],
            "options": { "g": true },
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", &self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let (code, message) = Self::error_body(response).await;
            let err = if code == Some(UNFOUND_ROUTE_CODE) {
                AppError::Routing(message)
            } else {
                AppError::Upstream { status, message }
            };
            error!(url = %url, error = %err, "Optimization request failed");
            return Err(err);
        }

        let parsed: OptimizationResponse = response.json().await?;

        let routes = parsed
            .routes
            .into_iter()
            .map(|route| {
                let distance_m = route.distance.ok_or_else(|| {
                    AppError::Routing("provider route missing distance".to_string())
                })?;
                let duration_s = route.duration.ok_or_else(|| {
                    AppError::Routing("provider route missing duration".to_string())
                })?;
                Ok(OptimizedRoute {
                    distance_m,
                    duration_s,
                    geometry: route.geometry,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(OptimizationResult { routes })
    }
}

#[async_trait]
impl RoutingProvider for OrsClient {
    async fn geocode(&self, text: &str) -> Result<Vec<GeocodeCandidate>, AppError> {
        debug!(text, "[PROVIDER] Calling ORS geocode");

        let result = self.send_geocode(text).await;
        metrics::record_upstream("geocoding", if result.is_ok() { "success" } else { "failure" });
        result
    }

    async fn optimize(&self, request: &OptimizationRequest) -> Result<OptimizationResult, AppError> {
        debug!(
            profile = %request.profile,
            start = ?request.start,
            job = ?request.job_location,
            "[PROVIDER] Calling ORS optimization"
        );

        let result = self.send_optimization(request).await;
        metrics::record_upstream("routing", if result.is_ok() { "success" } else { "failure" });
        result
    }
}
