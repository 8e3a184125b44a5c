//! CLI argument definitions for tradechart.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `chart` | Build the chart payload for one trade |
//! | `aggregate` | Re-sample a local daily history CSV |
//! | `orders` | Parse a trade-order CSV |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! tradechart chart AAPL --enter 2024-01-03 --enter-price 185.5 \
//!     --exit 2024-02-15 --exit-price 190.25 --time-frame weekly --show-trades
//!
//! tradechart aggregate history/AAPL.csv --time-frame monthly --lenient --format table
//!
//! tradechart orders journal.csv --public-url https://charts.example.com
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tradechart_core::{Granularity, TradingDate, WeekEndDay};

/// Trade visualisation from daily price history.
#[derive(Debug, Parser)]
#[command(
    name = "tradechart",
    author,
    version,
    about = "Chart trades against daily, weekly and monthly price history"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON document.
    Json,
    /// Aligned text table for terminal display.
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the chart payload for a trade.
    ///
    /// History comes from Yahoo unless --data-dir (or TRADECHART_DATA_DIR)
    /// points at a directory of <SYMBOL>.csv files.
    ///
    /// # Examples
    ///
    ///   tradechart chart AAPL --enter 2024-01-03 --enter-price 185.5 --exit 2024-02-15 --exit-price 190.25
    ///   tradechart chart SPY --enter 2024-01-03 --enter-price 470 --exit 2024-03-01 --exit-price 510 --time-frame monthly
    Chart(ChartArgs),

    /// Aggregate a local daily history CSV.
    ///
    /// # Examples
    ///
    ///   tradechart aggregate AAPL.csv --time-frame weekly
    ///   tradechart aggregate AAPL.csv --time-frame weekly --week-end-day thursday --lenient
    Aggregate(AggregateArgs),

    /// Parse a trade-order CSV and print the orders with chart links.
    Orders(OrdersArgs),
}

#[derive(Debug, Args)]
pub struct ChartArgs {
    /// Ticker symbol (e.g. AAPL, ^GSPC).
    pub symbol: String,

    /// Entry date, YYYY-MM-DD.
    #[arg(long)]
    pub enter: TradingDate,

    /// Entry price.
    #[arg(long)]
    pub enter_price: f64,

    /// First exit date, YYYY-MM-DD.
    #[arg(long)]
    pub exit: TradingDate,

    /// First exit price.
    #[arg(long)]
    pub exit_price: f64,

    /// Second exit date.
    #[arg(long, requires = "exit_price2")]
    pub exit2: Option<TradingDate>,

    /// Second exit price.
    #[arg(long, requires = "exit2")]
    pub exit_price2: Option<f64>,

    /// Bar granularity: daily, weekly or monthly.
    #[arg(long, default_value_t = Granularity::Daily)]
    pub time_frame: Granularity,

    /// Weekday that closes weekly bars (default from TRADECHART_WEEK_END_DAY, else friday).
    #[arg(long)]
    pub week_end_day: Option<WeekEndDay>,

    /// Include entry/exit annotations.
    #[arg(long, default_value_t = false)]
    pub show_trades: bool,

    /// Read <SYMBOL>.csv files from this directory instead of Yahoo.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Days of history before the entry and after the last exit.
    #[arg(long)]
    pub padding_days: Option<u32>,

    /// Price feed request timeout in milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Args)]
pub struct AggregateArgs {
    /// Daily history CSV (Date,Open,High,Low,Close[,Adj Close],Volume).
    pub file: PathBuf,

    /// Bar granularity: daily, weekly or monthly.
    #[arg(long, default_value_t = Granularity::Weekly)]
    pub time_frame: Granularity,

    /// Weekday that closes weekly bars.
    #[arg(long, default_value_t = WeekEndDay::default())]
    pub week_end_day: WeekEndDay,

    /// Skip invalid rows and report them instead of failing.
    #[arg(long, default_value_t = false)]
    pub lenient: bool,
}

#[derive(Debug, Args)]
pub struct OrdersArgs {
    /// Trade-order CSV with 16 columns per record.
    pub file: PathBuf,

    /// Base URL for trade detail links.
    #[arg(long, env = "TRADECHART_PUBLIC_URL", default_value = "http://localhost:8080")]
    pub public_url: String,
}
