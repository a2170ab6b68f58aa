//! State Aggregator Module
//! Distinct order counts per customer state and the ranked views built on them.

use crate::data::OrderTable;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

/// Default size of the "most orders" view.
pub const DEFAULT_TOP_STATES: usize = 14;
/// Default size of the "least orders" view.
pub const DEFAULT_BOTTOM_STATES: usize = 13;

/// Distinct orders placed from one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateCount {
    pub customer_state: String,
    pub order_count: u64,
}

/// Handles per-state aggregation and ranking.
pub struct StateAggregator;

impl StateAggregator {
    /// Count distinct `order_id` values per state.
    ///
    /// One entry per state present in the table, ordered by state name.
    /// Rows missing either the state or the order id are not counted.
    pub fn count_by_state(table: &OrderTable) -> Vec<StateCount> {
        let mut orders_by_state: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();
        for record in table.records() {
            let (Some(state), Some(order_id)) =
                (record.customer_state.as_deref(), record.order_id.as_deref())
            else {
                continue;
            };
            orders_by_state.entry(state).or_default().insert(order_id);
        }

        orders_by_state
            .into_iter()
            .map(|(state, orders)| StateCount {
                customer_state: state.to_string(),
                order_count: orders.len() as u64,
            })
            .collect()
    }

    /// States with the most orders, largest first. Ties go to the smaller name.
    pub fn top_states(counts: &[StateCount], n: usize) -> Vec<StateCount> {
        let mut ranked = counts.to_vec();
        ranked.sort_by(|a, b| {
            (Reverse(a.order_count), &a.customer_state)
                .cmp(&(Reverse(b.order_count), &b.customer_state))
        });
        ranked.truncate(n);
        ranked
    }

    /// States with the fewest orders, smallest first. Ties go to the smaller name.
    pub fn bottom_states(counts: &[StateCount], n: usize) -> Vec<StateCount> {
        let mut ranked = counts.to_vec();
        ranked.sort_by(|a, b| {
            (a.order_count, &a.customer_state).cmp(&(b.order_count, &b.customer_state))
        });
        ranked.truncate(n);
        ranked
    }
}
