//! Trade-order CSV parsing for bulk uploads.
//!
//! Each record has 16 positional fields and no required header; a header row
//! simply fails numeric parsing and is reported as skipped.

use std::io::Read;

use serde::Serialize;
use thiserror::Error;

const FIELD_COUNT: usize = 16;

/// One closed (or partially closed) order as exported by a broker journal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TradeOrder {
    #[serde(rename = "TradeID")]
    pub trade_id: String,
    #[serde(rename = "ExitID")]
    pub exit_id: String,
    pub entry_date_time: String,
    pub exit_date_time: String,
    pub stock_symbol: String,
    pub entry_type: String,
    pub exit_type: String,
    pub entry_quantity: i64,
    pub exit_quantity: i64,
    pub entry_price: f64,
    pub exit_price: f64,
    pub commission: f64,
    pub total_cost_for_exit: f64,
    #[serde(rename = "TraderID")]
    pub trader_id: String,
    pub market: String,
    pub order_status: String,
    /// Link to the single-trade chart page for this order.
    pub trade_details_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderRecordError {
    #[error("expected {FIELD_COUNT} fields, found {found}")]
    FieldCount { found: usize },
    #[error("field '{field}' is not a valid number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// A record that was left out of the parse result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {index}: {error}")]
pub struct SkippedRecord {
    pub index: usize,
    pub error: OrderRecordError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderReport {
    pub orders: Vec<TradeOrder>,
    pub skipped: Vec<SkippedRecord>,
}

/// Parse every record of `reader`, keeping the ones that are valid orders.
///
/// `public_url` is the service root used to build each order's
/// `TradeDetailsLink`.
pub fn parse_orders<R: Read>(reader: R, public_url: &str) -> Result<OrderReport, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut report = OrderReport::default();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        match parse_record(&record, public_url) {
            Ok(order) => report.orders.push(order),
            Err(error) => {
                tracing::warn!(index, %error, "skipping trade order record");
                report.skipped.push(SkippedRecord { index, error });
            }
        }
    }
    Ok(report)
}

/// Parse one positional record into an order.
pub fn parse_record(
    record: &csv::StringRecord,
    public_url: &str,
) -> Result<TradeOrder, OrderRecordError> {
    if record.len() != FIELD_COUNT {
        return Err(OrderRecordError::FieldCount {
            found: record.len(),
        });
    }
    let field = |index: usize| record.get(index).unwrap_or_default().to_owned();

    let mut order = TradeOrder {
        trade_id: field(0),
        exit_id: field(1),
        entry_date_time: field(2),
        exit_date_time: field(3),
        stock_symbol: field(4),
        entry_type: field(5),
        exit_type: field(6),
        entry_quantity: parse_number(record, 7, "EntryQuantity")?,
        exit_quantity: parse_number(record, 8, "ExitQuantity")?,
        entry_price: parse_number(record, 9, "EntryPrice")?,
        exit_price: parse_number(record, 10, "ExitPrice")?,
        commission: parse_number(record, 11, "Commission")?,
        total_cost_for_exit: parse_number(record, 12, "TotalCostForExit")?,
        trader_id: field(13),
        market: field(14),
        order_status: field(15),
        trade_details_link: String::new(),
    };
    order.trade_details_link = trade_details_link(public_url, &order);
    Ok(order)
}

/// `{public_url}/trade?...` query matching the chart page's parameters.
pub fn trade_details_link(public_url: &str, order: &TradeOrder) -> String {
    format!(
        "{}/trade?symbol={}&tradeEnterDate={}&buyPrice={:.6}&tradeExitDate={}&exitPrice={:.6}",
        public_url.trim_end_matches('/'),
        urlencoding::encode(&order.stock_symbol),
        urlencoding::encode(&order.entry_date_time),
        order.entry_price,
        urlencoding::encode(&order.exit_date_time),
        order.exit_price,
    )
}

fn parse_number<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    field: &'static str,
) -> Result<T, OrderRecordError> {
    let raw = record.get(index).unwrap_or_default();
    raw.parse::<T>().map_err(|_| OrderRecordError::InvalidNumber {
        field,
        value: raw.to_owned(),
    })
}
