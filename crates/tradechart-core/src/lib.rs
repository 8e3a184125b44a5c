//! # Tradechart Core
//!
//! Domain types and chart building for the tradechart trade visualiser.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`aggregate`] | Daily to weekly/monthly re-sampling |
//! | [`annotation`] | Entry/exit markers and holding ranges |
//! | [`chart`] | Chart payload layout and JSON rendering |
//! | [`config`] | Environment configuration |
//! | [`domain`] | Symbols, dates, bars, series, trades |
//! | [`error`] | Core error types |
//! | [`feed`] | Daily history CSV decoding |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`orders`] | Trade-order CSV uploads |
//! | [`price_source`] | Yahoo and local CSV price sources |
//! | [`service`] | Fetch, aggregate and annotate in one call |
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │ web / cli    │──▶│ ChartService │
//! └──────────────┘   └──────┬───────┘
//!                           │
//!        ┌──────────────────┼───────────────────┐
//!        ▼                  ▼                   ▼
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ PriceSource  │   │ aggregate    │   │ annotations  │
//! │ (Yahoo/CSV)  │   └──────────────┘   └──────────────┘
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │ feed (CSV)   │
//! └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use tradechart_core::{aggregate, Granularity, RawRow, Series, WeekEndDay};
//!
//! let series = Series::from_rows(vec![
//!     RawRow::new("2024-01-04", 10.0, 12.0, 9.0, 11.0, 100),
//!     RawRow::new("2024-01-05", 11.0, 13.0, 10.0, 12.0, 200),
//! ])
//! .expect("rows are valid");
//!
//! let weekly = aggregate(&series, Granularity::Weekly, WeekEndDay::default());
//! assert_eq!(weekly.len(), 1);
//! assert_eq!(weekly[0].volume, 300);
//! ```

pub mod aggregate;
pub mod annotation;
pub mod chart;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod http_client;
pub mod orders;
pub mod price_source;
pub mod service;

pub use aggregate::{aggregate, aggregate_monthly, aggregate_rows, aggregate_weekly, Aggregation};
pub use annotation::{build_annotations, Annotations, PointAnnotation, RangeAnnotation};
pub use chart::{CandlePoint, ChartPayload, ChartSeries, VolumePoint};
pub use config::{ChartConfig, ConfigError};
pub use domain::{
    truncate_cents, Bar, DateRange, Granularity, LenientSeries, RawRow, RowDiagnostic, Series,
    Symbol, Trade, TradePoint, TradingDate, WeekEndDay,
};
pub use error::{CoreError, ValidationError};
pub use feed::{decode_daily_csv, decode_daily_csv_lenient, decode_price_history, FeedError};
pub use http_client::{
    FixtureHttpClient, HttpAuth, HttpClient, HttpError, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};
pub use orders::{parse_orders, OrderRecordError, OrderReport, SkippedRecord, TradeOrder};
pub use price_source::{
    CsvDirectorySource, PriceSource, SeriesRequest, SourceError, SourceErrorKind, YahooSource,
};
pub use service::{ChartRequest, ChartService, ServiceError};
