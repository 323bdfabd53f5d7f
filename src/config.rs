use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::Path;

use crate::fuel_prices::parser::DEFAULT_CONTAINER_ID;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub ors: OrsConfig,
    #[serde(default)]
    pub fuel_prices: FuelPricesConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

/// openrouteservice credentials and endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrsConfig {
    pub api_key: String,
    #[serde(default = "default_ors_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FuelPricesConfig {
    #[serde(default = "default_fuel_prices_url")]
    pub url: String,
    /// Id of the `<div>` wrapping the price table
    #[serde(default = "default_container_id")]
    pub container_id: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// How long a fetched price table is reused; 0 disables caching
    #[serde(default)]
    pub cache_ttl_seconds: u64,
}

impl Default for FuelPricesConfig {
    fn default() -> Self {
        Self {
            url: default_fuel_prices_url(),
            container_id: default_container_id(),
            timeout_seconds: default_timeout(),
            cache_ttl_seconds: 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_metrics_endpoint")]
    pub endpoint: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_metrics_endpoint(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_ors_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_fuel_prices_url() -> String {
    "https://www.globalpetrolprices.com/Morocco/".to_string()
}

fn default_container_id() -> String {
    DEFAULT_CONTAINER_ID.to_string()
}

/// Upstream calls have no timeout of their own; 10s bounds a stuck request
fn default_timeout() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_metrics_endpoint() -> String {
    "/metrics".to_string()
}

/// Load configuration from a TOML file layered with `FUEL_COST__*` env vars
///
/// The file is optional so that a deployment can be configured purely from
/// the environment, e.g. `FUEL_COST__ORS__API_KEY`.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("FUEL_COST")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.host.parse::<IpAddr>().is_err() {
        anyhow::bail!(
            "server.host must be an IP address (e.g. 0.0.0.0), got '{}'",
            cfg.server.host
        );
    }

    if cfg.ors.api_key.trim().is_empty() {
        anyhow::bail!("ors.api_key must be set (or FUEL_COST__ORS__API_KEY)");
    }

    if cfg.ors.timeout_seconds == 0 {
        anyhow::bail!("ors.timeout_seconds must be greater than 0");
    }

    if cfg.fuel_prices.timeout_seconds == 0 {
        anyhow::bail!("fuel_prices.timeout_seconds must be greater than 0");
    }

    for (name, url) in [
        ("ors.base_url", &cfg.ors.base_url),
        ("fuel_prices.url", &cfg.fuel_prices.url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("{} must be an http(s) URL, got '{}'", name, url);
        }
    }

    if cfg.fuel_prices.container_id.trim().is_empty() {
        anyhow::bail!("fuel_prices.container_id cannot be empty");
    }

    match cfg.server.log_format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("server.log_format must be 'text' or 'json', got '{}'", other),
    }

    if cfg.metrics.enabled && !cfg.metrics.endpoint.starts_with('/') {
        anyhow::bail!("metrics.endpoint must start with '/'");
    }

    Ok(())
}
