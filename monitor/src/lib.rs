//! KystVern coastal risk monitor
//!
//! Native runtime around the shared decision engine: fetches point
//! forecasts for the monitored locations, keeps the dashboard state fresh
//! on a timer and exposes planning and scenario operations over it.

pub mod config;
pub mod error;
pub mod external;
pub mod services;

pub use config::Config;
pub use error::{ForecastError, ForecastResult, MonitorError, MonitorResult};
pub use external::{ForecastProvider, MetClient};
pub use services::{Monitor, Poller};
