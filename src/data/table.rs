//! Order Table Module
//! In-memory order records and the date range used to slice them.

use chrono::{NaiveDate, NaiveDateTime};

/// Column holding the order identifier.
pub const ORDER_ID_COL: &str = "order_id";
/// Column holding the customer's state.
pub const CUSTOMER_STATE_COL: &str = "customer_state";
/// Column holding the promised delivery date.
pub const ESTIMATED_DATE_COL: &str = "order_estimated_delivery_date_only";
/// Column holding the actual delivery date.
pub const DELIVERED_DATE_COL: &str = "order_delivered_customer_date_only";

/// Columns the dataset must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    ORDER_ID_COL,
    CUSTOMER_STATE_COL,
    ESTIMATED_DATE_COL,
    DELIVERED_DATE_COL,
];

/// One row of the dataset. An order split across line items appears once per item.
///
/// Only the delivery date is mandatory; empty cells elsewhere are kept as
/// `None` and left out of whichever view needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub order_id: Option<String>,
    pub customer_state: Option<String>,
    pub estimated_delivery: Option<NaiveDateTime>,
    pub delivered: NaiveDateTime,
}

impl OrderRecord {
    /// Calendar day the order reached the customer.
    pub fn delivered_date(&self) -> NaiveDate {
        self.delivered.date()
    }
}

/// Ordered, read-only collection of order records.
///
/// Tables produced by the loader are sorted by delivery date; every derived
/// table is a stable subsequence of its source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderTable {
    records: Vec<OrderRecord>,
    skipped_rows: usize,
}

impl OrderTable {
    /// Wrap records as-is, keeping their order.
    pub fn from_records(records: Vec<OrderRecord>) -> Self {
        Self {
            records,
            skipped_rows: 0,
        }
    }

    pub(crate) fn with_skipped_rows(mut self, skipped_rows: usize) -> Self {
        self.skipped_rows = skipped_rows;
        self
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows dropped at load time because the delivery date was empty.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Earliest and latest delivery dates, or `None` for an empty table.
    pub fn delivered_date_bounds(&self) -> Option<DateRange> {
        let mut dates = self.records.iter().map(OrderRecord::delivered_date);
        let first = dates.next()?;
        let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(DateRange { start, end })
    }

    /// Number of distinct order identifiers in the table. Missing ids are not counted.
    pub fn distinct_orders(&self) -> usize {
        let mut ids: Vec<&str> = self
            .records
            .iter()
            .filter_map(|r| r.order_id.as_deref())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}

/// Inclusive calendar interval. `start <= end` is checked by the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Days covered, counting both ends.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
