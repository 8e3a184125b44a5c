use serde::{Deserialize, Serialize};

use crate::{TradingDate, ValidationError};

/// One OHLCV record.
///
/// Daily input bars and aggregated weekly/monthly bars share this shape; for
/// aggregated bars `date` is the last session folded into the period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    pub fn new(
        date: TradingDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        let bar = Self::priced(date, open, high, low, close, volume)?;
        bar.check_bounds()?;
        Ok(bar)
    }

    /// Build a bar from an undecoded feed row, truncating prices to cents.
    pub fn from_raw(row: &RawRow) -> Result<Self, ValidationError> {
        let bar = Self::from_feed_row(row)?;
        bar.check_bounds()?;
        Ok(bar)
    }

    /// Like [`Bar::from_raw`] but keeps a bar whose open or close lies
    /// outside its high/low range. Date and price checks still apply.
    pub fn from_feed_row(row: &RawRow) -> Result<Self, ValidationError> {
        let date = TradingDate::parse(&row.date)?;
        Self::priced(
            date,
            truncate_cents(row.open),
            truncate_cents(row.high),
            truncate_cents(row.low),
            truncate_cents(row.close),
            row.volume,
        )
    }

    /// `low <= open, close <= high`.
    pub fn check_bounds(&self) -> Result<(), ValidationError> {
        if self.high < self.low {
            return Err(ValidationError::InvalidBarRange);
        }
        let within = |price: f64| self.low <= price && price <= self.high;
        if !within(self.open) || !within(self.close) {
            return Err(ValidationError::InvalidBarBounds);
        }
        Ok(())
    }

    fn priced(
        date: TradingDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_price("open", open)?;
        validate_price("high", high)?;
        validate_price("low", low)?;
        validate_price("close", close)?;

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// `[open, high, low, close]`, the candlestick `y` tuple.
    pub const fn ohlc(&self) -> [f64; 4] {
        [self.open, self.high, self.low, self.close]
    }
}

/// Daily row as delivered by a price feed, before date parsing and rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Volume")]
    pub volume: u64,
}

impl RawRow {
    pub fn new(
        date: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            date: date.into(),
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Truncate a price to two decimals: `floor(value * 100) / 100`.
///
/// Prices are cut toward negative infinity, never rounded to nearest, so
/// `12.349` becomes `12.34`.
pub fn truncate_cents(value: f64) -> f64 {
    (value * 100.0).floor() / 100.0
}

fn validate_price(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
