//! CSV Data Loader Module
//! Reads the order dataset with Polars and materializes a typed Order Table.

use crate::data::table::{
    OrderRecord, OrderTable, CUSTOMER_STATE_COL, DELIVERED_DATE_COL, ESTIMATED_DATE_COL,
    ORDER_ID_COL, REQUIRED_COLUMNS,
};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Timestamp layouts accepted in the date columns, tried in order.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Dataset not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),
    #[error("Invalid date '{value}' in column '{column}' at row {row}")]
    Parse {
        column: String,
        row: usize,
        value: String,
    },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load the order dataset and sort it by delivery date.
    ///
    /// Every column is read as text so that date parsing stays under our
    /// control. Rows without a delivery date are skipped and counted, other
    /// empty cells become `None`. A non-empty date that does not parse fails
    /// the whole load.
    pub fn load_csv(path: &Path) -> Result<OrderTable, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        let table = Self::table_from_frame(&df)?;
        info!(
            path = %path.display(),
            rows = table.len(),
            skipped = table.skipped_rows(),
            "loaded order dataset"
        );
        Ok(table)
    }

    /// Convert a text-typed frame into a sorted Order Table.
    pub fn table_from_frame(df: &DataFrame) -> Result<OrderTable, LoaderError> {
        let names = df.get_column_names();
        for required in REQUIRED_COLUMNS {
            if !names.iter().any(|name| name.as_str() == required) {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }

        let ids = Self::text_column(df, ORDER_ID_COL)?;
        let states = Self::text_column(df, CUSTOMER_STATE_COL)?;
        let estimated = Self::text_column(df, ESTIMATED_DATE_COL)?;
        let delivered = Self::text_column(df, DELIVERED_DATE_COL)?;

        let mut records = Vec::with_capacity(df.height());
        let mut skipped = 0usize;

        let rows = ids
            .into_iter()
            .zip(states.into_iter())
            .zip(estimated.into_iter())
            .zip(delivered.into_iter());

        for (idx, (((id, state), est), del)) in rows.enumerate() {
            let row = idx + 1;
            // An undelivered order can never fall inside a date range.
            let Some(del) = non_empty(del) else {
                skipped += 1;
                continue;
            };

            let estimated_delivery = non_empty(est)
                .map(|est| Self::parse_cell(ESTIMATED_DATE_COL, row, est))
                .transpose()?;

            records.push(OrderRecord {
                order_id: non_empty(id).map(str::to_string),
                customer_state: non_empty(state).map(str::to_string),
                estimated_delivery,
                delivered: Self::parse_cell(DELIVERED_DATE_COL, row, del)?,
            });
        }

        if skipped > 0 {
            warn!(skipped, "skipped rows without a delivery date");
        }

        // Stable: equal delivery dates keep file order.
        records.sort_by_key(|r| r.delivered);
        debug!(rows = records.len(), "sorted orders by delivery date");

        Ok(OrderTable::from_records(records).with_skipped_rows(skipped))
    }

    fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, LoaderError> {
        Ok(df.column(name)?.as_materialized_series().str()?)
    }

    fn parse_cell(column: &str, row: usize, value: &str) -> Result<NaiveDateTime, LoaderError> {
        parse_timestamp(value).ok_or_else(|| LoaderError::Parse {
            column: column.to_string(),
            row,
            value: value.to_string(),
        })
    }
}

/// Parse a date or date-time cell. Bare dates land on midnight.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn non_empty(cell: Option<&str>) -> Option<&str> {
    cell.filter(|s| !s.trim().is_empty())
}
