//! Daily history CSV decoding.
//!
//! Expected header: `Date,Open,High,Low,Close,Adj Close,Volume`. Extra columns
//! such as `Adj Close` are ignored.

use std::io::Read;

use thiserror::Error;

use crate::{LenientSeries, RawRow, RowDiagnostic, Series};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("malformed feed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid feed row: {0}")]
    Row(#[from] RowDiagnostic),
}

/// Decode a daily CSV, aborting on the first row that is not a valid bar.
pub fn decode_daily_csv<R: Read>(reader: R) -> Result<Series, FeedError> {
    let rows = read_rows(reader)?;
    Ok(Series::from_rows(rows)?)
}

/// Decode price history as served by a feed.
///
/// Aborts like [`decode_daily_csv`] except that rows whose open or close lies
/// outside the high/low range are charted as received.
pub fn decode_price_history<R: Read>(reader: R) -> Result<Series, FeedError> {
    let rows = read_rows(reader)?;
    Ok(Series::from_feed_rows(rows)?)
}

/// Decode a daily CSV, skipping rows that are well-formed CSV but not valid
/// bars (bad date, bad prices, date going backwards).
pub fn decode_daily_csv_lenient<R: Read>(reader: R) -> Result<LenientSeries, FeedError> {
    let rows = read_rows(reader)?;
    Ok(Series::from_rows_lenient(rows))
}

/// Read typed rows; CSV structure and numeric-field errors are fatal.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, FeedError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.deserialize::<RawRow>() {
        rows.push(record?);
    }
    Ok(rows)
}
