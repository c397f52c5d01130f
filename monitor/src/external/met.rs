//! MET Norway Locationforecast client
//!
//! Only the fields the risk engine needs are decoded; everything else in
//! the document is ignored.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, Client};
use serde::Deserialize;
use shared::{Coordinate, WeatherObservation, WeatherReading};

use super::ForecastProvider;
use crate::config::ForecastConfig;
use crate::error::{ForecastError, ForecastResult};

/// Locationforecast API client
#[derive(Clone)]
pub struct MetClient {
    client: Client,
    endpoint: String,
    lookahead: usize,
}

/// Locationforecast response (GeoJSON feature)
#[derive(Debug, Deserialize)]
pub struct ForecastDocument {
    pub properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub timeseries: Vec<TimeseriesEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TimeseriesEntry {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub data: EntryData,
}

#[derive(Debug, Default, Deserialize)]
pub struct EntryData {
    #[serde(default)]
    pub instant: Instant,
    pub next_1_hours: Option<PeriodForecast>,
    pub next_6_hours: Option<PeriodForecast>,
    pub next_12_hours: Option<PeriodForecast>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Instant {
    #[serde(default)]
    pub details: InstantDetails,
}

#[derive(Debug, Default, Deserialize)]
pub struct InstantDetails {
    pub wind_speed: Option<f64>,
    pub wind_speed_of_gust: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PeriodForecast {
    #[serde(default)]
    pub details: PeriodDetails,
}

#[derive(Debug, Default, Deserialize)]
pub struct PeriodDetails {
    pub precipitation_amount: Option<f64>,
}

impl EntryData {
    /// Precipitation from the shortest window that reports it
    fn precipitation(&self) -> Option<f64> {
        [&self.next_1_hours, &self.next_6_hours, &self.next_12_hours]
            .into_iter()
            .flatten()
            .find_map(|period| period.details.precipitation_amount)
    }
}

impl TimeseriesEntry {
    /// A reading, if this entry carries both wind and a precipitation window
    fn reading(&self) -> Option<WeatherReading> {
        let wind = self.data.instant.details.wind_speed?;
        let precip = self.data.precipitation()?;

        Some(WeatherReading {
            wind,
            gust: self.data.instant.details.wind_speed_of_gust,
            precip,
            time: self.time,
        })
    }
}

/// First structurally complete entry within the first `lookahead` entries
pub fn select_reading(
    document: &ForecastDocument,
    lookahead: usize,
) -> ForecastResult<WeatherReading> {
    let window = &document.properties.timeseries;
    window
        .iter()
        .take(lookahead)
        .find_map(TimeseriesEntry::reading)
        .ok_or(ForecastError::DataShape {
            scanned: window.len().min(lookahead),
        })
}

/// Decode a raw response body and pick the reading
pub fn parse_forecast(body: &str, lookahead: usize) -> ForecastResult<WeatherReading> {
    let document: ForecastDocument = serde_json::from_str(body)?;
    select_reading(&document, lookahead)
}

impl MetClient {
    /// Create a new MetClient from forecast configuration
    pub fn new(config: &ForecastConfig) -> ForecastResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            lookahead: config.lookahead,
        })
    }

    pub fn request_url(&self, coordinate: Coordinate) -> String {
        format!(
            "{}?lat={:.4}&lon={:.4}",
            self.endpoint, coordinate.lat, coordinate.lon
        )
    }

    /// Fetch the raw reading (gust not yet resolved)
    pub async fn fetch_reading(&self, coordinate: Coordinate) -> ForecastResult<WeatherReading> {
        let url = self.request_url(coordinate);
        tracing::debug!(%url, "Requesting forecast");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_forecast(&body, self.lookahead)
    }
}

#[async_trait]
impl ForecastProvider for MetClient {
    fn name(&self) -> &str {
        "met.no"
    }

    async fn fetch(&self, coordinate: Coordinate) -> ForecastResult<WeatherObservation> {
        self.fetch_reading(coordinate)
            .await
            .map(WeatherReading::into_observation)
    }
}
