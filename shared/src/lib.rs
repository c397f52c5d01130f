//! Shared decision engine for the KystVern coastal monitoring platform
//!
//! This crate contains the data model and the pure rules used by the
//! native monitor and the browser frontend (via WASM): risk
//! classification, alerts, fisheries advice, emergency planning, climate
//! scenarios and citizen report triage. It performs no I/O.

pub mod alerts;
pub mod emergency;
pub mod fisheries;
pub mod format;
pub mod geo;
pub mod models;
pub mod reports;
pub mod scenario;
pub mod state;
pub mod types;
pub mod validation;

pub use models::*;
pub use state::{DashboardEvent, DashboardState};
pub use types::*;
pub use validation::*;
