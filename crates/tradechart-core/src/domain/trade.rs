use serde::{Deserialize, Serialize};

use crate::{DateRange, Symbol, TradingDate, ValidationError};

/// A dated price: a trade entry or one of its exits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradePoint {
    pub date: TradingDate,
    pub price: f64,
}

impl TradePoint {
    pub fn new(date: TradingDate, price: f64) -> Result<Self, ValidationError> {
        if !price.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "price" });
        }
        if price < 0.0 {
            return Err(ValidationError::NegativeValue { field: "price" });
        }
        Ok(Self { date, price })
    }
}

/// A position opened once and closed through one or more exits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    pub symbol: Symbol,
    pub entry: TradePoint,
    exits: Vec<TradePoint>,
    /// Whether the chart should carry entry/exit annotations.
    pub show_trades: bool,
}

impl Trade {
    pub fn new(
        symbol: Symbol,
        entry: TradePoint,
        exits: Vec<TradePoint>,
        show_trades: bool,
    ) -> Result<Self, ValidationError> {
        if exits.is_empty() {
            return Err(ValidationError::MissingExit);
        }
        Ok(Self {
            symbol,
            entry,
            exits,
            show_trades,
        })
    }

    /// Exits in the order they were recorded.
    pub fn exits(&self) -> &[TradePoint] {
        &self.exits
    }

    /// Latest exit date, regardless of recording order.
    pub fn last_exit_date(&self) -> TradingDate {
        self.exits
            .iter()
            .map(|exit| exit.date)
            .max()
            .unwrap_or(self.entry.date)
    }

    /// Dates to fetch so the whole trade sits inside the chart with
    /// `padding_days` of context on both sides.
    pub fn fetch_range(&self, padding_days: u32) -> DateRange {
        let padding = i64::from(padding_days);
        let span = DateRange::spanning(self.entry.date, self.last_exit_date());
        DateRange::spanning(
            span.start().offset_days(-padding),
            span.end().offset_days(padding),
        )
    }
}
