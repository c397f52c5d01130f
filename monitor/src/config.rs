//! Configuration management for the KystVern monitor
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with KYSTVERN_ prefix

use std::time::Duration;

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// MET Norway Locationforecast 2.0, compact variant
pub const DEFAULT_FORECAST_ENDPOINT: &str =
    "https://api.met.no/weatherapi/locationforecast/2.0/compact";

/// Main monitor configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Forecast provider configuration
    pub forecast: ForecastConfig,

    /// Background refresh configuration
    pub polling: PollingConfig,

    /// Emergency planner configuration
    pub planner: PlannerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// Locationforecast endpoint
    pub endpoint: String,

    /// Identifying User-Agent; MET rejects anonymous clients
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum timeseries entries scanned for a complete reading
    pub lookahead: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollingConfig {
    pub enabled: bool,

    /// Seconds between refreshes
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlannerConfig {
    /// Neighbouring locations added to a response route
    pub route_limit: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("KYSTVERN_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("forecast.endpoint", DEFAULT_FORECAST_ENDPOINT)?
            .set_default(
                "forecast.user_agent",
                concat!("kystvern-monitor/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("forecast.timeout_secs", 10)?
            .set_default("forecast.lookahead", 6)?
            .set_default("polling.enabled", true)?
            .set_default("polling.interval_secs", 600)?
            .set_default("planner.route_limit", 2)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (KYSTVERN_POLLING__INTERVAL_SECS)
            .add_source(
                Environment::with_prefix("KYSTVERN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the monitor cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.forecast.lookahead == 0 {
            return Err(ConfigError::Message(
                "forecast.lookahead must be at least 1".into(),
            ));
        }
        if self.polling.enabled && self.polling.interval_secs == 0 {
            return Err(ConfigError::Message(
                "polling.interval_secs must be at least 1 when polling is enabled".into(),
            ));
        }
        Ok(())
    }
}

impl ForecastConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_FORECAST_ENDPOINT.to_string(),
            user_agent: concat!("kystvern-monitor/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
            lookahead: 6,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 600,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            route_limit: shared::DEFAULT_ROUTE_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Config {
        Config {
            environment: "test".to_string(),
            forecast: ForecastConfig::default(),
            polling: PollingConfig::default(),
            planner: PlannerConfig::default(),
        }
    }

    #[test]
    fn test_defaults_load_without_files() {
        let config = Config::load().unwrap();
        assert_eq!(config.forecast.lookahead, 6);
        assert_eq!(config.forecast.timeout(), Duration::from_secs(10));
        assert!(config.forecast.user_agent.starts_with("kystvern-monitor/"));
    }

    // Only this test touches the process environment
    #[test]
    fn test_prefixed_environment_overrides() {
        std::env::set_var("KYSTVERN_POLLING__INTERVAL_SECS", "300");
        std::env::set_var("KYSTVERN_PLANNER__ROUTE_LIMIT", "4");
        let loaded = Config::load();
        std::env::remove_var("KYSTVERN_POLLING__INTERVAL_SECS");
        std::env::remove_var("KYSTVERN_PLANNER__ROUTE_LIMIT");

        let config = loaded.unwrap();
        assert_eq!(config.polling.interval(), Duration::from_secs(300));
        assert_eq!(config.planner.route_limit, 4);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(defaults().validate().is_ok());
    }

    #[test]
    fn test_zero_lookahead_rejected() {
        let mut config = defaults();
        config.forecast.lookahead = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Message(_))));
    }

    #[test]
    fn test_zero_interval_rejected_only_when_polling() {
        let mut config = defaults();
        config.polling.interval_secs = 0;
        assert!(config.validate().is_err());

        config.polling.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_section_defaults_match_loader() {
        assert_eq!(ForecastConfig::default().endpoint, DEFAULT_FORECAST_ENDPOINT);
        assert_eq!(PollingConfig::default().interval(), Duration::from_secs(600));
        assert_eq!(PlannerConfig::default().route_limit, 2);
    }
}
