//! Environment overrides live in their own test binary: they mutate
//! process-wide state.

use fuel_cost_api::config::load_config;
use std::io::Write;

#[test]
fn test_env_overrides_file_values() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(
        br#"
        [ors]
        api_key = "from-file-key-123456"

        [fuel_prices]
        cache_ttl_seconds = 60
        "#,
    )?;

    std::env::set_var("FUEL_COST__ORS__API_KEY", "from-env-key-654321");
    std::env::set_var("FUEL_COST__FUEL_PRICES__CACHE_TTL_SECONDS", "300");

    let config = load_config(file.path())?;

    std::env::remove_var("FUEL_COST__ORS__API_KEY");
    std::env::remove_var("FUEL_COST__FUEL_PRICES__CACHE_TTL_SECONDS");

    assert_eq!(config.ors.api_key, "from-env-key-654321");
    assert_eq!(config.fuel_prices.cache_ttl_seconds, 300);
    Ok(())
}
