//! Dashboard state container
//!
//! All state changes go through [`DashboardState::reduce`], which consumes
//! the previous snapshot and returns the next one. Callers publish whole
//! snapshots, so readers never observe a half-applied refresh.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::alerts;
use crate::geo::{nearest_to, Nearest};
use crate::models::{Alert, Location, WeatherObservation, MY_LOCATION};
use crate::types::{Coordinate, NORWEGIAN_CITIES};

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    RefreshStarted,
    WeatherReceived {
        name: String,
        observation: WeatherObservation,
    },
    /// No usable forecast for a location this cycle
    WeatherUnavailable { name: String, reason: String },
    RefreshFinished { at: DateTime<Utc> },
    /// The refresh as a whole failed
    RefreshFailed { message: String },
    UserLocated { coordinate: Coordinate },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub locations: Vec<Location>,
    pub alerts: Vec<Alert>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Locations with no usable data in the current cycle
    pub unavailable: BTreeSet<String>,
    /// Fixed city closest to the user's position, once located
    pub user_location: Option<Nearest>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(NORWEGIAN_CITIES.iter().map(Location::from).collect())
    }
}

impl DashboardState {
    pub fn new(locations: Vec<Location>) -> Self {
        Self {
            locations,
            alerts: Vec::new(),
            loading: false,
            error: None,
            last_updated: None,
            unavailable: BTreeSet::new(),
            user_location: None,
        }
    }

    pub fn location(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.name == name)
    }

    /// Locations that have weather and were not marked unavailable
    pub fn fresh_locations(&self) -> impl Iterator<Item = &Location> {
        self.locations
            .iter()
            .filter(|l| l.weather().is_some() && !self.unavailable.contains(&l.name))
    }

    pub fn reduce(mut self, event: DashboardEvent) -> Self {
        match event {
            DashboardEvent::RefreshStarted => {
                self.loading = true;
                self.error = None;
                self.unavailable.clear();
            }
            DashboardEvent::WeatherReceived { name, observation } => {
                if let Some(location) = self.locations.iter_mut().find(|l| l.name == name) {
                    location.set_weather(observation);
                    self.unavailable.remove(&name);
                }
            }
            DashboardEvent::WeatherUnavailable { name, .. } => {
                if self.locations.iter().any(|l| l.name == name) {
                    self.unavailable.insert(name);
                }
            }
            DashboardEvent::RefreshFinished { at } => {
                self.loading = false;
                self.last_updated = Some(at);
                self.alerts = alerts::generate(self.fresh_locations());
            }
            DashboardEvent::RefreshFailed { message } => {
                self.loading = false;
                self.error = Some(message);
            }
            DashboardEvent::UserLocated { coordinate } => {
                self.locations.retain(|l| l.name != MY_LOCATION);
                self.locations.insert(0, Location::new(MY_LOCATION, coordinate));
                self.unavailable.remove(MY_LOCATION);
                self.user_location = nearest_to(
                    coordinate,
                    NORWEGIAN_CITIES.iter().map(|c| (c.name, c.coordinate)),
                );
            }
        }
        self
    }
}
