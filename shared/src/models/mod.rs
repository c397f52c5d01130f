//! Domain models for the coastal risk dashboard

mod alert;
mod emergency;
mod fisheries;
mod location;
mod report;
mod risk;
mod scenario;
mod weather;

pub use alert::*;
pub use emergency::*;
pub use fisheries::*;
pub use location::*;
pub use report::*;
pub use risk::*;
pub use scenario::*;
pub use weather::*;
