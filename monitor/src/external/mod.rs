//! External forecast integrations

pub mod met;

use async_trait::async_trait;
use shared::{Coordinate, WeatherObservation};

use crate::error::ForecastResult;

pub use met::MetClient;

/// Source of point forecasts.
///
/// Implementations return an observation with the gust fallback already
/// applied, so nothing downstream re-derives it.
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Human-readable provider name for logs
    fn name(&self) -> &str;

    async fn fetch(&self, coordinate: Coordinate) -> ForecastResult<WeatherObservation>;
}
