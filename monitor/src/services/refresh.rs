//! Dashboard refresh service
//!
//! Owns the dashboard state and publishes every change as a whole
//! snapshot on a watch channel.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use shared::emergency;
use shared::scenario;
use shared::{
    Coordinate, DashboardEvent, DashboardState, EmergencyPlan, PlanRequest, ScenarioReport,
    ScenarioSettings, DEFAULT_ROUTE_LIMIT,
};
use tokio::sync::watch;

use crate::config::PlannerConfig;
use crate::external::ForecastProvider;

struct Inner<P> {
    provider: P,
    state: watch::Sender<DashboardState>,
    route_limit: usize,
}

/// Refresh coordinator, cheap to clone and share with a poller
pub struct Monitor<P> {
    inner: Arc<Inner<P>>,
}

impl<P> Clone for Monitor<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: ForecastProvider + 'static> Monitor<P> {
    /// Create a monitor over the fixed city set
    pub fn new(provider: P) -> Self {
        Self::with_state(provider, DashboardState::default())
    }

    /// Create a monitor whose plans default to the configured route limit
    pub fn with_planner(provider: P, planner: &PlannerConfig) -> Self {
        Self::build(provider, DashboardState::default(), planner.route_limit)
    }

    pub fn with_state(provider: P, state: DashboardState) -> Self {
        Self::build(provider, state, DEFAULT_ROUTE_LIMIT)
    }

    fn build(provider: P, state: DashboardState, route_limit: usize) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self {
            inner: Arc::new(Inner {
                provider,
                state: tx,
                route_limit,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    fn apply(&self, event: DashboardEvent) {
        self.inner
            .state
            .send_modify(|state| *state = std::mem::take(state).reduce(event));
    }

    fn apply_all(&self, events: Vec<DashboardEvent>) {
        self.inner.state.send_modify(|state| {
            *state = events
                .into_iter()
                .fold(std::mem::take(state), DashboardState::reduce);
        });
    }

    /// Fetch every location in parallel and publish the result.
    ///
    /// Per-location failures are logged and mark that location unavailable
    /// for this cycle. Only a failure of the fan-out itself (a panicked
    /// task) sets the global error.
    pub async fn refresh(&self) {
        self.apply(DashboardEvent::RefreshStarted);

        let targets: Vec<(String, Coordinate)> = self
            .inner
            .state
            .borrow()
            .locations
            .iter()
            .map(|l| (l.name.clone(), l.coordinate))
            .collect();
        tracing::debug!(
            count = targets.len(),
            provider = self.inner.provider.name(),
            "Refreshing forecasts"
        );

        let tasks = targets.into_iter().map(|(name, coordinate)| {
            let inner = Arc::clone(&self.inner);
            tokio::spawn(async move {
                let result = inner.provider.fetch(coordinate).await;
                (name, result)
            })
        });

        let mut events = Vec::new();
        let mut failure = None;
        for joined in join_all(tasks).await {
            match joined {
                Ok((name, Ok(observation))) => {
                    events.push(DashboardEvent::WeatherReceived { name, observation });
                }
                Ok((name, Err(e))) => {
                    tracing::warn!(location = %name, error = %e, "Forecast unavailable");
                    events.push(DashboardEvent::WeatherUnavailable {
                        name,
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "Forecast task failed");
                    failure.get_or_insert_with(|| format!("Refresh failed: {}", e));
                }
            }
        }

        // Apply whatever completed, then close the cycle in the same snapshot
        match failure {
            Some(message) => events.push(DashboardEvent::RefreshFailed { message }),
            None => events.push(DashboardEvent::RefreshFinished { at: Utc::now() }),
        }
        self.apply_all(events);

        let (alerts, unavailable) = {
            let state = self.inner.state.borrow();
            (state.alerts.len(), state.unavailable.len())
        };
        tracing::info!(alerts, unavailable, "Refresh complete");
    }

    /// Register the user's position and label it with the nearest city
    pub fn locate_user(&self, coordinate: Coordinate) {
        self.apply(DashboardEvent::UserLocated { coordinate });
        if let Some(nearest) = &self.inner.state.borrow().user_location {
            tracing::info!(
                city = %nearest.name,
                distance_km = nearest.distance_km,
                "User located"
            );
        }
    }

    /// Response plan over the current locations.
    ///
    /// A request without a route limit gets the monitor's configured one.
    pub fn plan(&self, request: &PlanRequest) -> Option<EmergencyPlan> {
        let request = PlanRequest {
            route_limit: request.route_limit.or(Some(self.inner.route_limit)),
            ..request.clone()
        };
        emergency::build_plan(&request, &self.inner.state.borrow().locations)
    }

    /// Climate scenario over the current locations
    pub fn scenario(&self, settings: &ScenarioSettings) -> ScenarioReport {
        scenario::run(&self.inner.state.borrow().locations, settings)
    }
}
