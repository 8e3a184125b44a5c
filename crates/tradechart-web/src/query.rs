//! Chart query parameters.
//!
//! | Parameter | Required | Notes |
//! |-----------|----------|-------|
//! | `symbol` | yes | ticker, `^` allowed for indices |
//! | `tradeEnterDate` / `buyPrice` | yes | entry |
//! | `tradeExitDate` / `exitPrice` | yes | first exit |
//! | `tradeExitDate2` / `exitPrice2` | no | second exit, added only when both are present |
//! | `showTrades` | no | `true`/`1`/`t`..., anything unparsable is false |
//! | `timeFrame` | no | `daily` (default), `weekly`, `monthly` |
//! | `weekEndDay` | no | overrides the configured weekly closing day |

use serde::Deserialize;
use tradechart_core::{
    ChartRequest, Granularity, Symbol, Trade, TradePoint, TradingDate, WeekEndDay,
};

use crate::error::ApiError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartQuery {
    pub symbol: Option<String>,
    pub trade_enter_date: Option<String>,
    pub buy_price: Option<String>,
    pub trade_exit_date: Option<String>,
    pub exit_price: Option<String>,
    pub trade_exit_date2: Option<String>,
    pub exit_price2: Option<String>,
    pub show_trades: Option<String>,
    pub time_frame: Option<String>,
    pub week_end_day: Option<String>,
}

impl ChartQuery {
    /// Validate every parameter, reporting the first one that is wrong.
    pub fn into_request(self) -> Result<ChartRequest, ApiError> {
        let symbol = required(self.symbol.as_deref(), "symbol")?;
        let symbol = Symbol::parse(symbol).map_err(|_| ApiError::invalid("symbol"))?;

        let show_trades = optional(self.show_trades.as_deref()).is_some_and(parse_flag);

        let entry = TradePoint::new(
            required_date(self.trade_enter_date.as_deref(), "tradeEnterDate")?,
            required_price(self.buy_price.as_deref(), "buyPrice")?,
        )
        .map_err(|_| ApiError::invalid("buyPrice"))?;

        let first_exit = TradePoint::new(
            required_date(self.trade_exit_date.as_deref(), "tradeExitDate")?,
            required_price(self.exit_price.as_deref(), "exitPrice")?,
        )
        .map_err(|_| ApiError::invalid("exitPrice"))?;

        let mut exits = vec![first_exit];
        if let Some(raw_date) = optional(self.trade_exit_date2.as_deref()) {
            let date =
                TradingDate::parse(raw_date).map_err(|_| ApiError::invalid("tradeExitDate2"))?;
            if let Some(raw_price) = optional(self.exit_price2.as_deref()) {
                let second = raw_price
                    .parse::<f64>()
                    .ok()
                    .and_then(|price| TradePoint::new(date, price).ok())
                    .ok_or_else(|| ApiError::invalid("exitPrice2"))?;
                exits.push(second);
            }
        }

        let granularity = match optional(self.time_frame.as_deref()) {
            Some(raw) => raw
                .parse::<Granularity>()
                .map_err(|_| ApiError::invalid("timeFrame"))?,
            None => Granularity::Daily,
        };

        let trade = Trade::new(symbol, entry, exits, show_trades)
            .map_err(|error| ApiError::BadRequest(error.to_string()))?;
        let mut request = ChartRequest::new(trade, granularity);

        if let Some(raw) = optional(self.week_end_day.as_deref()) {
            let week_end = raw
                .parse::<WeekEndDay>()
                .map_err(|_| ApiError::invalid("weekEndDay"))?;
            request = request.with_week_end_day(week_end);
        }

        Ok(request)
    }
}

fn optional(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, ApiError> {
    optional(value).ok_or_else(|| ApiError::empty(name))
}

fn required_date(value: Option<&str>, name: &str) -> Result<TradingDate, ApiError> {
    TradingDate::parse(required(value, name)?).map_err(|_| ApiError::invalid(name))
}

fn required_price(value: Option<&str>, name: &str) -> Result<f64, ApiError> {
    required(value, name)?
        .parse::<f64>()
        .map_err(|_| ApiError::invalid(name))
}

/// Boolean spellings accepted for `showTrades`.
fn parse_flag(value: &str) -> bool {
    matches!(value, "1" | "t" | "T" | "true" | "TRUE" | "True")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> ChartQuery {
        ChartQuery {
            symbol: Some(String::from("aapl")),
            trade_enter_date: Some(String::from("2024-01-03")),
            buy_price: Some(String::from("185.5")),
            trade_exit_date: Some(String::from("2024-02-15")),
            exit_price: Some(String::from("190.25")),
            ..ChartQuery::default()
        }
    }

    fn message(result: Result<ChartRequest, ApiError>) -> String {
        result.expect_err("must be rejected").to_string()
    }

    #[test]
    fn minimal_query_builds_a_daily_request_without_annotations() {
        let request = query().into_request().expect("valid query");

        assert_eq!(request.granularity, Granularity::Daily);
        assert_eq!(request.trade.symbol.as_str(), "AAPL");
        assert!(!request.trade.show_trades);
        assert_eq!(request.trade.exits().len(), 1);
        assert_eq!(request.week_end_day, None);
    }

    #[test]
    fn missing_and_malformed_parameters_are_named() {
        assert_eq!(message(ChartQuery { symbol: None, ..query() }.into_request()), "empty symbol");
        assert_eq!(
            message(
                ChartQuery {
                    trade_enter_date: Some(String::from("03/01/2024")),
                    ..query()
                }
                .into_request()
            ),
            "invalid tradeEnterDate"
        );
        assert_eq!(
            message(ChartQuery { exit_price: Some(String::new()), ..query() }.into_request()),
            "empty exitPrice"
        );
        assert_eq!(
            message(
                ChartQuery {
                    time_frame: Some(String::from("hourly")),
                    ..query()
                }
                .into_request()
            ),
            "invalid timeFrame"
        );
    }

    #[test]
    fn exchange_listings_starting_with_a_digit_are_accepted() {
        for symbol in ["0700.HK", "7203.T", "600519.SS"] {
            let request = ChartQuery {
                symbol: Some(String::from(symbol)),
                ..query()
            }
            .into_request()
            .expect("listing symbol is valid");
            assert_eq!(request.trade.symbol.as_str(), symbol);
        }
    }

    #[test]
    fn time_frame_accepts_only_named_granularities() {
        let weekly = ChartQuery {
            time_frame: Some(String::from("weekly")),
            ..query()
        }
        .into_request()
        .expect("weekly is valid");
        assert_eq!(weekly.granularity, Granularity::Weekly);

        assert_eq!(
            message(
                ChartQuery {
                    time_frame: Some(String::from("1w")),
                    ..query()
                }
                .into_request()
            ),
            "invalid timeFrame"
        );
    }

    #[test]
    fn second_exit_needs_both_date_and_price() {
        let date_only = ChartQuery {
            trade_exit_date2: Some(String::from("2024-03-01")),
            ..query()
        }
        .into_request()
        .expect("date alone is ignored");
        assert_eq!(date_only.trade.exits().len(), 1);

        let both = ChartQuery {
            trade_exit_date2: Some(String::from("2024-03-01")),
            exit_price2: Some(String::from("195")),
            ..query()
        }
        .into_request()
        .expect("second exit");
        assert_eq!(both.trade.exits().len(), 2);

        assert_eq!(
            message(
                ChartQuery {
                    trade_exit_date2: Some(String::from("soon")),
                    ..query()
                }
                .into_request()
            ),
            "invalid tradeExitDate2"
        );
    }

    #[test]
    fn show_trades_accepts_boolean_spellings_and_ignores_garbage() {
        for (raw, expected) in [("true", true), ("1", true), ("T", true), ("yes", false)] {
            let request = ChartQuery {
                show_trades: Some(String::from(raw)),
                ..query()
            }
            .into_request()
            .expect("valid query");
            assert_eq!(request.trade.show_trades, expected, "{raw}");
        }
    }
}
