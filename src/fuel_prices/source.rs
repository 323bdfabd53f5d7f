use crate::config::FuelPricesConfig;
use crate::error::AppError;
use crate::fuel_prices::parser::parse_price_page;
use crate::fuel_prices::table::FuelPriceTable;
use crate::metrics;
use async_trait::async_trait;
use reqwest::{header::USER_AGENT, Client};
use std::time::Duration;
use tracing::{debug, warn};

/// Anything that can produce a fuel price table for a listing URL
#[async_trait]
pub trait FuelPriceSource: Send + Sync + 'static {
    /// Fetch and parse the listing at `url`.
    ///
    /// Transport and HTTP status failures are reported as [`AppError::Fetch`].
    /// A page that does not contain the expected table is not an error: it
    /// produces an empty table.
    async fn fetch_prices(&self, url: &str) -> Result<FuelPriceTable, AppError>;
}

/// Scrapes the price listing page over HTTP
pub struct HttpPriceSource {
    client: Client,
    container_id: String,
    timeout: Duration,
}

impl HttpPriceSource {
    pub fn new(client: Client, config: &FuelPricesConfig) -> Self {
        Self {
            client,
            container_id: config.container_id.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }

    async fn download(&self, url: &str) -> Result<String, AppError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, concat!("fuel-cost-api/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::Fetch(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Fetch(format!("{} returned HTTP {}", url, status)));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::Fetch(format!("failed to read body from {}: {}", url, e)))
    }
}

#[async_trait]
impl FuelPriceSource for HttpPriceSource {
    async fn fetch_prices(&self, url: &str) -> Result<FuelPriceTable, AppError> {
        debug!(url, "Fetching fuel price listing");

        let html = match self.download(url).await {
            Ok(html) => {
                metrics::record_upstream("fuel_prices", "success");
                html
            }
            Err(e) => {
                metrics::record_upstream("fuel_prices", "failure");
                warn!(url, error = %e, "Fuel price fetch failed");
                return Err(e);
            }
        };

        let rows = parse_price_page(&html, &self.container_id)?;
        let table = FuelPriceTable::from_labels(rows);

        debug!(url, entries = table.len(), "Fuel price table built");
        Ok(table)
    }
}
