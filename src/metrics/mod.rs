//! Delta engine
//!
//! Stateless conversion of cumulative HAProxy counters into per-second rates
//! and instantaneous ratios. All cross-cycle state lives in the poller.

mod derived;
mod rate;

pub use derived::{DerivedMetrics, MetricName, MetricValue};
pub use rate::{rate_of, ratio_of, scaled_rate_of};
