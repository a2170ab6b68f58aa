//! Data Processor Module
//! Date-range filtering and delivery-time derivation over Order Tables.

use crate::data::table::{DateRange, OrderRecord, OrderTable};
use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessorError {
    #[error("Start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

/// An order row annotated with its delivery time in days.
///
/// Positive values mean the order arrived before the estimate, negative
/// values mean it was late. `None` when the row has no estimated date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredOrder {
    pub record: OrderRecord,
    pub delivery_time: Option<i64>,
}

/// Stateless transformations; inputs are never modified.
pub struct DataProcessor;

impl DataProcessor {
    fn date_range(start: NaiveDate, end: NaiveDate) -> Result<DateRange, ProcessorError> {
        if start > end {
            return Err(ProcessorError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// Keep records delivered on a calendar day inside `[start, end]`.
    ///
    /// Rejects `start > end`. The result keeps the source order.
    pub fn filter_by_delivery_date(
        table: &OrderTable,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<OrderTable, ProcessorError> {
        let range = Self::date_range(start, end)?;
        Ok(Self::filter_by_range(table, &range))
    }

    fn filter_by_range(table: &OrderTable, range: &DateRange) -> OrderTable {
        let records: Vec<OrderRecord> = table
            .records()
            .iter()
            .filter(|r| range.contains(r.delivered_date()))
            .cloned()
            .collect();

        debug!(
            start = %range.start,
            end = %range.end,
            kept = records.len(),
            total = table.len(),
            "filtered orders by delivery date"
        );
        OrderTable::from_records(records)
    }

    /// Annotate every record with its delivery time. Row count is preserved.
    pub fn derive_delivery_time(table: &OrderTable) -> Vec<DeliveredOrder> {
        table
            .records()
            .iter()
            .map(|record| DeliveredOrder {
                delivery_time: Self::delivery_days(record),
                record: record.clone(),
            })
            .collect()
    }

    /// `estimated - delivered` in whole days, rounding half to even.
    pub fn delivery_days(record: &OrderRecord) -> Option<i64> {
        let estimated = record.estimated_delivery?;
        let seconds = (estimated - record.delivered).num_seconds() as f64;
        Some((seconds / SECONDS_PER_DAY).round_ties_even() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::fixtures::{date, record};
    use pretty_assertions::assert_eq;

    fn sample_table() -> OrderTable {
        OrderTable::from_records(vec![
            record("A1", "SP", "2018-01-05", "2018-01-01"),
            record("A2", "RJ", "2018-01-05", "2018-01-03"),
            record("A3", "SP", "2018-01-05", "2018-01-03"),
            record("A4", "MG", "2018-01-05", "2018-01-07"),
            record("A5", "BA", "2018-01-05", "2018-01-10"),
        ])
    }

    fn ids(table: &OrderTable) -> Vec<&str> {
        table
            .records()
            .iter()
            .filter_map(|r| r.order_id.as_deref())
            .collect()
    }

    #[test]
    fn filter_is_inclusive_on_both_ends() {
        let table = sample_table();
        let filtered =
            DataProcessor::filter_by_delivery_date(&table, date("2018-01-03"), date("2018-01-07"))
                .unwrap();

        assert_eq!(ids(&filtered), vec!["A2", "A3", "A4"]);
        for r in filtered.records() {
            assert!(r.delivered_date() >= date("2018-01-03"));
            assert!(r.delivered_date() <= date("2018-01-07"));
        }
    }

    #[test]
    fn filter_with_full_bounds_returns_whole_table() {
        let table = sample_table();
        let bounds = table.delivered_date_bounds().unwrap();
        let filtered =
            DataProcessor::filter_by_delivery_date(&table, bounds.start, bounds.end).unwrap();
        assert_eq!(filtered.records(), table.records());
    }

    #[test]
    fn filter_can_yield_empty_table() {
        let table = sample_table();
        let filtered =
            DataProcessor::filter_by_delivery_date(&table, date("2019-01-01"), date("2019-12-31"))
                .unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn filter_rejects_inverted_range() {
        let table = sample_table();
        let err =
            DataProcessor::filter_by_delivery_date(&table, date("2018-01-07"), date("2018-01-03"))
                .unwrap_err();
        assert_eq!(
            err,
            ProcessorError::InvalidRange {
                start: date("2018-01-07"),
                end: date("2018-01-03"),
            }
        );
    }

    #[test]
    fn single_day_range_is_valid() {
        let table = sample_table();
        let filtered =
            DataProcessor::filter_by_delivery_date(&table, date("2018-01-03"), date("2018-01-03"))
                .unwrap();
        assert_eq!(ids(&filtered), vec!["A2", "A3"]);
    }

    #[test]
    fn delivery_time_sign_follows_estimate_minus_actual() {
        let early = record("E", "SP", "2024-01-10", "2024-01-08");
        let late = record("L", "SP", "2024-01-08", "2024-01-10");
        assert_eq!(DataProcessor::delivery_days(&early), Some(2));
        assert_eq!(DataProcessor::delivery_days(&late), Some(-2));
    }

    #[test]
    fn missing_estimate_keeps_row_without_delivery_time() {
        let mut unknown = record("U", "SP", "2018-01-05", "2018-01-03");
        unknown.estimated_delivery = None;
        let table = OrderTable::from_records(vec![
            record("A1", "SP", "2018-01-05", "2018-01-01"),
            unknown,
        ]);

        let derived = DataProcessor::derive_delivery_time(&table);
        assert_eq!(derived.len(), 2);
        assert_eq!(derived[0].delivery_time, Some(4));
        assert_eq!(derived[1].delivery_time, None);
    }

    #[test]
    fn derive_preserves_row_count() {
        let table = sample_table();
        let derived = DataProcessor::derive_delivery_time(&table);
        assert_eq!(derived.len(), table.len());

        let days: Vec<i64> = derived.iter().filter_map(|d| d.delivery_time).collect();
        assert_eq!(days, vec![4, 2, 2, -2, -5]);
        assert_eq!(derived[0].record, table.records()[0]);
    }

    #[test]
    fn derive_on_empty_table_is_empty() {
        assert!(DataProcessor::derive_delivery_time(&OrderTable::default()).is_empty());
    }

    #[test]
    fn half_day_residues_round_to_even() {
        let at = |d: &str, h: u32| date(d).and_hms_opt(h, 0, 0).unwrap();
        let mut r = record("R", "SP", "2024-01-10", "2024-01-10");

        // +1.5 days -> 2
        r.estimated_delivery = Some(at("2024-01-11", 12));
        r.delivered = at("2024-01-10", 0);
        assert_eq!(DataProcessor::delivery_days(&r), Some(2));

        // +2.5 days -> 2
        r.estimated_delivery = Some(at("2024-01-12", 12));
        assert_eq!(DataProcessor::delivery_days(&r), Some(2));

        // +0.5 days -> 0
        r.estimated_delivery = Some(at("2024-01-10", 12));
        assert_eq!(DataProcessor::delivery_days(&r), Some(0));

        // -0.5 days -> 0
        r.estimated_delivery = Some(at("2024-01-10", 0));
        r.delivered = at("2024-01-10", 12);
        assert_eq!(DataProcessor::delivery_days(&r), Some(0));

        // -1.5 days -> -2
        r.delivered = at("2024-01-11", 12);
        assert_eq!(DataProcessor::delivery_days(&r), Some(-2));
    }

    #[test]
    fn repeated_derivation_is_stable() {
        let table = sample_table();
        let first = DataProcessor::derive_delivery_time(&table);
        let second = DataProcessor::derive_delivery_time(&table);
        assert_eq!(first, second);
    }
}
