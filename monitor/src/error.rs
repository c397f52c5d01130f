//! Error handling for the KystVern monitor

use thiserror::Error;

/// Forecast acquisition failures for a single location
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Forecast request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Forecast provider returned HTTP {status}")]
    Http { status: u16 },

    #[error("Failed to parse forecast response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No complete forecast entry in the first {scanned} timeseries entries")]
    DataShape { scanned: usize },
}

/// Monitor-level error types
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Forecast error: {0}")]
    Forecast(#[from] ForecastError),

    #[error("Refresh task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type alias for forecast providers
pub type ForecastResult<T> = Result<T, ForecastError>;

/// Result type alias for monitor operations
pub type MonitorResult<T> = Result<T, MonitorError>;
