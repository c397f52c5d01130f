//! KystVern Monitor
//!
//! Keeps coastal risk for the monitored Norwegian cities up to date and
//! logs alerts as they change.

use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kystvern_monitor::{Config, MetClient, Monitor, MonitorResult, Poller};
use shared::format::fmt1;
use shared::DashboardState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kystvern_monitor=debug,reqwest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    run().await?;

    Ok(())
}

async fn run() -> MonitorResult<()> {
    let config = Config::load()?;

    tracing::info!("Starting KystVern monitor");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Forecast endpoint: {}", config.forecast.endpoint);

    let client = MetClient::new(&config.forecast)?;
    let monitor = Monitor::with_planner(client, &config.planner);

    let reporter = tokio::spawn(report_changes(monitor.subscribe()));

    let mut poller = Poller::new();
    if config.polling.enabled {
        poller.start(monitor.clone(), config.polling.interval())?;
    } else {
        monitor.refresh().await;
    }

    tokio::signal::ctrl_c().await.ok();
    tracing::info!("Shutdown requested");

    poller.shutdown().await?;
    reporter.abort();
    Ok(())
}

/// Log a summary every time a refresh cycle completes
async fn report_changes(mut rx: watch::Receiver<DashboardState>) {
    let mut last_seen = (None, None);
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        let cycle = (state.last_updated, state.error.clone());
        if state.loading || cycle == last_seen {
            continue;
        }
        last_seen = cycle;

        if let Some(error) = &state.error {
            tracing::error!("{}", error);
            continue;
        }

        for location in &state.locations {
            let weather = location.weather();
            tracing::debug!(
                location = %location.name,
                risk = location.risk_level().map(|r| r.as_str()).unwrap_or("unknown"),
                wind = %fmt1(weather.map(|w| w.wind)),
                gust = %fmt1(weather.map(|w| w.gust)),
                precip = %fmt1(weather.map(|w| w.precip)),
                "Location status"
            );
        }

        if state.alerts.is_empty() {
            tracing::info!("No active alerts");
        }
        for alert in &state.alerts {
            tracing::warn!(level = ?alert.level, "{}", alert.message);
        }
    }
}
