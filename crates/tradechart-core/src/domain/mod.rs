//! # Domain Models
//!
//! Typed building blocks shared by every layer of tradechart.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Bar`] | OHLCV record for one day, week or month |
//! | [`RawRow`] | Feed row before date parsing and cent truncation |
//! | [`Series`] | Ordered daily bars for one symbol |
//! | [`Granularity`] | Daily, weekly or monthly output |
//! | [`WeekEndDay`] | Weekday that closes a weekly bar |
//! | [`TradingDate`] | Calendar date, `YYYY-MM-DD` on the wire |
//! | [`DateRange`] | Inclusive date span requested from a price source |
//! | [`Trade`] | Entry plus ordered exits, drives chart annotations |
//! | [`Symbol`] | Validated ticker |
//!
//! Construction validates invariants; once built, values are not mutated.

mod bar;
mod date;
mod granularity;
mod range;
mod series;
mod symbol;
mod trade;

pub use bar::{truncate_cents, Bar, RawRow};
pub use date::TradingDate;
pub use granularity::{Granularity, WeekEndDay};
pub use range::DateRange;
pub use series::{LenientSeries, RowDiagnostic, Series};
pub use symbol::Symbol;
pub use trade::{Trade, TradePoint};
