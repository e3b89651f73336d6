//! Multi-touch attribution
//!
//! Converts ordered touchpoint sequences plus conversion events into
//! fractional per-content credit under a selectable model.

mod engine;
mod model;

pub use engine::{AttributionReport, ContentCredit, attribute};
pub use model::AttributionModel;
