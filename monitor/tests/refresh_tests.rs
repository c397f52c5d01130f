//! Refresh and polling integration tests
//!
//! Runs the monitor against a scripted in-memory forecast provider:
//! - fan-out refresh with per-location failures
//! - fan-out failure surfaced as the global error
//! - poller start/stop semantics

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use kystvern_monitor::config::{ForecastConfig, PlannerConfig};
use kystvern_monitor::{
    ForecastError, ForecastProvider, ForecastResult, MetClient, Monitor, Poller,
};
use shared::{
    Coordinate, EventType, PlanRequest, RiskLevel, ScenarioSettings, WeatherObservation,
    WeatherReading, MY_LOCATION, NORWEGIAN_CITIES,
};
use tokio_test::{assert_err, assert_ok};

const BERGEN: Coordinate = NORWEGIAN_CITIES[0].coordinate;
const STAVANGER: Coordinate = NORWEGIAN_CITIES[1].coordinate;
const TROMSO: Coordinate = NORWEGIAN_CITIES[2].coordinate;

#[derive(Debug, Clone)]
enum Script {
    Weather { wind: f64, gust: Option<f64>, precip: f64 },
    Fail(u16),
    Panic,
}

#[derive(Clone, Default)]
struct ScriptedProvider {
    script: Arc<Mutex<Vec<(Coordinate, Script)>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    fn set(&self, coordinate: Coordinate, script: Script) {
        let mut entries = self.script.lock().unwrap();
        entries.retain(|(c, _)| *c != coordinate);
        entries.push((coordinate, script));
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForecastProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self, coordinate: Coordinate) -> ForecastResult<WeatherObservation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let script = self
            .script
            .lock()
            .unwrap()
            .iter()
            .find(|(c, _)| *c == coordinate)
            .map(|(_, s)| s.clone());

        match script {
            Some(Script::Weather { wind, gust, precip }) => Ok(WeatherReading {
                wind,
                gust,
                precip,
                time: Utc.with_ymd_and_hms(2024, 11, 3, 12, 0, 0).unwrap(),
            }
            .into_observation()),
            Some(Script::Fail(status)) => Err(ForecastError::Http { status }),
            Some(Script::Panic) => panic!("scripted provider panic"),
            None => Err(ForecastError::DataShape { scanned: 6 }),
        }
    }
}

/// Every fetch takes a while; tracks how many run at once
#[derive(Clone, Default)]
struct SlowProvider {
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

#[async_trait]
impl ForecastProvider for SlowProvider {
    fn name(&self) -> &str {
        "slow"
    }

    async fn fetch(&self, _coordinate: Coordinate) -> ForecastResult<WeatherObservation> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(running, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(60)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(WeatherObservation::new(4.0, 5.0, 0.0, Utc::now()))
    }
}

fn weather(wind: f64, gust: f64, precip: f64) -> Script {
    Script::Weather {
        wind,
        gust: Some(gust),
        precip,
    }
}

fn scripted() -> ScriptedProvider {
    let provider = ScriptedProvider::default();
    provider.set(BERGEN, weather(25.0, 30.0, 60.0));
    provider.set(STAVANGER, weather(5.0, 6.0, 1.0));
    provider.set(TROMSO, weather(12.0, 16.0, 15.0));
    provider
}

// ============================================================================
// Refresh Tests
// ============================================================================

#[tokio::test]
async fn test_refresh_applies_weather_and_alerts() {
    let monitor = Monitor::new(scripted());
    monitor.refresh().await;

    let state = monitor.snapshot();
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert!(state.last_updated.is_some());

    let risk = |name: &str| state.location(name).and_then(|l| l.risk_level());
    assert_eq!(risk("Bergen"), Some(RiskLevel::Severe));
    assert_eq!(risk("Stavanger"), Some(RiskLevel::Low));
    assert_eq!(risk("Tromsø"), Some(RiskLevel::Moderate));
    assert_eq!(risk("Bodø"), None);

    assert_eq!(state.alerts.len(), 1);
    assert_eq!(state.alerts[0].city, "Bergen");
    assert_eq!(state.unavailable.len(), 3);
}

#[tokio::test]
async fn test_failed_location_keeps_previous_weather() {
    let provider = scripted();
    let monitor = Monitor::new(provider.clone());
    monitor.refresh().await;
    assert_eq!(monitor.snapshot().alerts.len(), 1);

    provider.set(BERGEN, Script::Fail(503));
    monitor.refresh().await;

    let state = monitor.snapshot();
    let bergen = state.location("Bergen").unwrap();
    assert_eq!(bergen.weather().map(|w| w.wind), Some(25.0));
    assert!(state.unavailable.contains("Bergen"));
    // excluded from this cycle's alerts, but no global banner
    assert!(state.alerts.is_empty());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_missing_gust_uses_wind() {
    let provider = ScriptedProvider::default();
    provider.set(
        BERGEN,
        Script::Weather {
            wind: 16.0,
            gust: None,
            precip: 0.0,
        },
    );
    let monitor = Monitor::new(provider);
    monitor.refresh().await;

    let state = monitor.snapshot();
    let bergen = state.location("Bergen").unwrap();
    assert_eq!(bergen.weather().unwrap().gust, 16.0);
    assert_eq!(bergen.risk_level(), Some(RiskLevel::High));
}

#[tokio::test]
async fn test_panicked_fetch_sets_global_error() {
    let provider = scripted();
    provider.set(TROMSO, Script::Panic);
    let monitor = Monitor::new(provider);
    monitor.refresh().await;

    let state = monitor.snapshot();
    assert!(!state.loading);
    assert!(state.error.as_deref().unwrap().starts_with("Refresh failed"));
    // completed tasks are still applied
    assert!(state.location("Stavanger").unwrap().weather().is_some());
    assert!(state.last_updated.is_none());
}

#[tokio::test]
async fn test_next_refresh_clears_error() {
    let provider = scripted();
    provider.set(TROMSO, Script::Panic);
    let monitor = Monitor::new(provider.clone());
    monitor.refresh().await;
    assert!(monitor.snapshot().error.is_some());

    provider.set(TROMSO, weather(3.0, 4.0, 0.0));
    monitor.refresh().await;
    assert!(monitor.snapshot().error.is_none());
}

#[tokio::test]
async fn test_subscribers_receive_completed_snapshot() {
    let monitor = Monitor::new(scripted());
    let mut rx = monitor.subscribe();

    monitor.refresh().await;
    assert!(rx.has_changed().unwrap());

    let state = rx.borrow_and_update().clone();
    assert!(!state.loading);
    assert_eq!(state.locations.iter().filter(|l| l.weather().is_some()).count(), 3);
}

#[tokio::test]
async fn test_user_location_is_refreshed() {
    let provider = scripted();
    let position = Coordinate::new(60.35, 5.36);
    provider.set(position, weather(4.0, 5.0, 0.2));

    let monitor = Monitor::new(provider);
    monitor.locate_user(position);

    let state = monitor.snapshot();
    assert_eq!(state.locations[0].name, MY_LOCATION);
    assert_eq!(state.user_location.as_ref().unwrap().name, "Bergen");

    monitor.refresh().await;
    let state = monitor.snapshot();
    assert_eq!(
        state.location(MY_LOCATION).unwrap().risk_level(),
        Some(RiskLevel::Low)
    );
}

#[tokio::test]
async fn test_plan_and_scenario_use_current_snapshot() {
    let monitor = Monitor::new(scripted());
    monitor.refresh().await;

    let plan = monitor
        .plan(&PlanRequest {
            event_type: Some(EventType::Search),
            start_point: Some("Bergen".to_string()),
            ..PlanRequest::default()
        })
        .unwrap();
    assert_eq!(plan.route.first().map(String::as_str), Some("Bergen"));
    assert_eq!(plan.route.len(), 3);
    assert!(plan.eta_hours > 0.0);

    let report = monitor.scenario(&ScenarioSettings::neutral());
    assert_eq!(report.results.len(), 3);
    assert_eq!(report.summary.unchanged, 3);
}

#[tokio::test]
async fn test_plan_uses_configured_route_limit() {
    let monitor = Monitor::with_planner(scripted(), &PlannerConfig { route_limit: 4 });
    monitor.refresh().await;

    let request = PlanRequest {
        event_type: Some(EventType::Oil),
        start_point: Some("Bergen".to_string()),
        ..PlanRequest::default()
    };
    let plan = monitor.plan(&request).unwrap();
    assert_eq!(plan.route.len(), 5);
    assert_eq!(plan.route[0], "Bergen");

    // an explicit limit on the request wins
    let plan = monitor
        .plan(&PlanRequest {
            route_limit: Some(1),
            ..request
        })
        .unwrap();
    assert_eq!(plan.route.len(), 2);
}

#[tokio::test]
async fn test_provider_errors_surface_directly() {
    let provider = scripted();
    provider.set(BERGEN, Script::Fail(429));
    assert_err!(provider.fetch(BERGEN).await);
    assert_ok!(provider.fetch(STAVANGER).await);
}

#[tokio::test]
async fn test_met_monitor_starts_with_fixed_cities() {
    let client = assert_ok!(MetClient::new(&ForecastConfig::default()));
    let monitor = Monitor::new(client);
    let state = monitor.snapshot();
    assert_eq!(state.locations.len(), 6);
    assert!(state.locations.iter().all(|l| l.weather().is_none()));
}

// ============================================================================
// Poller Tests
// ============================================================================

#[tokio::test]
async fn test_poller_refreshes_until_stopped() {
    let provider = scripted();
    let monitor = Monitor::new(provider.clone());
    let mut poller = Poller::new();

    assert_ok!(poller.start(monitor.clone(), Duration::from_millis(20)));
    assert!(poller.is_running());
    tokio::time::sleep(Duration::from_millis(90)).await;
    assert!(provider.calls() >= 6 * 2);

    assert!(poller.stop());
    assert!(!poller.is_running());
    tokio::time::sleep(Duration::from_millis(30)).await;
    let settled = provider.calls();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(provider.calls(), settled);
    assert!(monitor.snapshot().last_updated.is_some());
}

#[tokio::test]
async fn test_restart_cancels_previous_loop() {
    let provider = scripted();
    let monitor = Monitor::new(provider.clone());
    let mut poller = Poller::new();

    assert_ok!(poller.start(monitor.clone(), Duration::from_millis(20)));
    assert_ok!(poller.start(monitor.clone(), Duration::from_millis(20)));
    tokio::time::sleep(Duration::from_millis(50)).await;

    // a single stop must silence everything
    poller.stop();
    tokio::time::sleep(Duration::from_millis(30)).await;
    let settled = provider.calls();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(provider.calls(), settled);
}

#[tokio::test]
async fn test_restart_waits_for_in_flight_refresh() {
    let provider = SlowProvider::default();
    let monitor = Monitor::new(provider.clone());
    let mut poller = Poller::new();

    assert_ok!(poller.start(monitor.clone(), Duration::from_millis(20)));
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_ok!(poller.start(monitor.clone(), Duration::from_millis(20)));
    assert!(poller.is_running());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_ok!(poller.shutdown().await);

    // one refresh at a time: never more fetches than locations
    assert_eq!(provider.peak.load(Ordering::SeqCst), 6);
    let state = monitor.snapshot();
    assert!(!state.loading);
    assert!(state.last_updated.is_some());
}

#[tokio::test]
async fn test_zero_period_is_rejected() {
    let provider = scripted();
    let monitor = Monitor::new(provider.clone());
    let mut poller = Poller::new();

    assert_err!(poller.start(monitor.clone(), Duration::ZERO));
    assert!(!poller.is_running());
    assert_eq!(provider.calls(), 0);

    // a rejected start leaves a running loop alone
    assert_ok!(poller.start(monitor, Duration::from_secs(3600)));
    assert_err!(poller.start(Monitor::new(provider), Duration::ZERO));
    assert!(poller.is_running());
    assert_ok!(poller.shutdown().await);
}

#[tokio::test]
async fn test_stop_without_start_is_noop() {
    let mut poller = Poller::new();
    assert!(!poller.stop());
    assert_ok!(poller.shutdown().await);
}

#[tokio::test]
async fn test_shutdown_waits_for_loop() {
    let monitor = Monitor::new(scripted());
    let mut poller = Poller::new();
    assert_ok!(poller.start(monitor.clone(), Duration::from_secs(3600)));

    // first tick fires immediately
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_ok!(poller.shutdown().await);
    assert!(!poller.is_running());
    assert!(monitor.snapshot().last_updated.is_some());
}
