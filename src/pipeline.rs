//! Dashboard Pipeline
//! Runs filter -> derive -> aggregate for one date selection.

use crate::config::DashboardConfig;
use crate::data::{DataProcessor, DateRange, DeliveredOrder, OrderTable, ProcessorError};
use crate::stats::{DeliveryDistribution, DeliveryStats, StateAggregator, StateCount};
use chrono::NaiveDate;
use tracing::info;

/// Limits applied while building a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub top_states: usize,
    pub bottom_states: usize,
    pub histogram_bins: usize,
}

impl From<&DashboardConfig> for ViewOptions {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            top_states: config.top_states,
            bottom_states: config.bottom_states,
            histogram_bins: config.histogram_bins,
        }
    }
}

/// Everything the presentation layer renders for one selection.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub range: DateRange,
    pub orders: Vec<DeliveredOrder>,
    pub distinct_orders: usize,
    pub distribution: DeliveryDistribution,
    pub most_orders: Vec<StateCount>,
    pub least_orders: Vec<StateCount>,
}

/// Build a fresh view from the base table. The base table is never modified.
pub fn build_view(
    base: &OrderTable,
    start: NaiveDate,
    end: NaiveDate,
    options: ViewOptions,
) -> Result<DashboardView, ProcessorError> {
    let filtered = DataProcessor::filter_by_delivery_date(base, start, end)?;
    let range = DateRange { start, end };

    let orders = DataProcessor::derive_delivery_time(&filtered);
    let distribution = DeliveryStats::distribution(&orders, options.histogram_bins);

    let counts = StateAggregator::count_by_state(&filtered);
    let most_orders = StateAggregator::top_states(&counts, options.top_states);
    let least_orders = StateAggregator::bottom_states(&counts, options.bottom_states);

    info!(
        start = %range.start,
        end = %range.end,
        rows = orders.len(),
        states = counts.len(),
        "built dashboard view"
    );

    Ok(DashboardView {
        range,
        distinct_orders: filtered.distinct_orders(),
        orders,
        distribution,
        most_orders,
        least_orders,
    })
}
