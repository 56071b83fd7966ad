//! E-commerce analytics over order and customer exports.
//!
//! Records are bucketed by calendar period ([`Granularity`]) and folded into
//! sales totals, growth rates, repeat-customer counts, cohort lifetime value
//! and a city distribution. [`routes::router`] exposes each metric over HTTP.

pub mod bucket;
pub mod cohorts;
pub mod customers;
pub mod distribution;
pub mod error;
pub mod granularity;
pub mod growth;
pub mod records;
pub mod routes;
pub mod state;
pub mod storage;
pub mod store;

pub use error::{AnalyticsError, Result};
pub use granularity::{Granularity, normalize};
