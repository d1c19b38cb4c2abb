//! Period-over-period trend classification.

mod comparator;
mod name_key;
mod trend;

pub use comparator::{annotate, compare};
pub use name_key::{names_match, normalize};
pub use trend::{Trend, TrendAnalysis, TrendStatus};

/// Log target for trend computation
const LOG_TARGET: &str = "trends";
