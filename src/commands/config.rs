use anyhow::Result;
use colored::Colorize;
use fuel_cost_api::config::{self, Config};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the current configuration with secrets masked
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(config_path)?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();

    let toml_string = toml::to_string_pretty(&sanitized)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Listen: {}:{}", cfg.server.host, cfg.server.port);
    println!("  ORS key: {}", mask_api_key(&cfg.ors.api_key));
    println!("  Price page: {}", cfg.fuel_prices.url);

    info!("Configuration validation successful");
    Ok(())
}

fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    sanitized.ors.api_key = mask_api_key(&sanitized.ors.api_key);
    sanitized
}

/// Mask an API key for safe display
///
/// Shows first 7 and last 4 characters with asterisks in between
/// Example: "5b3ce3597851110001cf6248" -> "5b3ce35...6248"
fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 11 {
        // Too short to mask meaningfully
        return "***".to_string();
    }

    let prefix: String = chars[..7].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();

    format!("{}...{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuel_cost_api::config::{FuelPricesConfig, MetricsConfig, OrsConfig, ServerConfig};

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("5b3ce3597851110001cf6248"), "5b3ce35...6248");
        assert_eq!(mask_api_key("short"), "***");
    }

    #[test]
    fn test_sanitize_secrets_masks_ors_key_only() {
        let cfg = Config {
            server: ServerConfig::default(),
            ors: OrsConfig {
                api_key: "5b3ce3597851110001cf6248".to_string(),
                base_url: "https://api.openrouteservice.org".to_string(),
                timeout_seconds: 10,
            },
            fuel_prices: FuelPricesConfig::default(),
            metrics: MetricsConfig::default(),
        };

        let sanitized = sanitize_secrets(&cfg);
        assert_eq!(sanitized.ors.api_key, "5b3ce35...6248");
        assert_eq!(sanitized.ors.base_url, cfg.ors.base_url);
        assert_eq!(sanitized.fuel_prices.url, cfg.fuel_prices.url);
    }
}
