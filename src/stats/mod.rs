//! Statistics module - state aggregation and delivery-time summaries

mod aggregator;
mod summary;

pub use aggregator::{StateAggregator, StateCount, DEFAULT_BOTTOM_STATES, DEFAULT_TOP_STATES};
pub use summary::{DeliveryDistribution, DeliveryStats, DeliverySummary, DEFAULT_HISTOGRAM_BINS};
