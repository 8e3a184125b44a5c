//! Environment-driven configuration for chart building.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TRADECHART_WINDOW_PADDING_DAYS` | `120` |
//! | `TRADECHART_WEEK_END_DAY` | `friday` |
//! | `TRADECHART_YAHOO_BASE_URL` | `https://query1.finance.yahoo.com` |
//! | `TRADECHART_YAHOO_COOKIE` | unset |
//! | `TRADECHART_TIMEOUT_MS` | `10000` |
//! | `TRADECHART_DATA_DIR` | unset (use Yahoo) |

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::http_client::{HttpAuth, ReqwestHttpClient};
use crate::price_source::{CsvDirectorySource, PriceSource, YahooSource, DEFAULT_YAHOO_BASE_URL};
use crate::WeekEndDay;

pub const DEFAULT_WINDOW_PADDING_DAYS: u32 = 120;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value '{value}' for {key}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    /// Days of context fetched before the entry and after the last exit.
    pub window_padding_days: u32,
    /// Weekly closing day used when a request does not name one.
    pub week_end_day: WeekEndDay,
    pub yahoo_base_url: String,
    pub yahoo_cookie: Option<String>,
    pub timeout_ms: u64,
    /// When set, history is read from `<data_dir>/<SYMBOL>.csv`.
    pub data_dir: Option<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            window_padding_days: DEFAULT_WINDOW_PADDING_DAYS,
            week_end_day: WeekEndDay::default(),
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_owned(),
            yahoo_cookie: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            data_dir: None,
        }
    }
}

impl ChartConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = get("TRADECHART_WINDOW_PADDING_DAYS") {
            config.window_padding_days = parse_value("TRADECHART_WINDOW_PADDING_DAYS", &value)?;
        }
        if let Some(value) = get("TRADECHART_WEEK_END_DAY") {
            config.week_end_day = parse_value("TRADECHART_WEEK_END_DAY", &value)?;
        }
        if let Some(value) = get("TRADECHART_YAHOO_BASE_URL") {
            config.yahoo_base_url = value;
        }
        config.yahoo_cookie = get("TRADECHART_YAHOO_COOKIE");
        if let Some(value) = get("TRADECHART_TIMEOUT_MS") {
            config.timeout_ms = parse_value("TRADECHART_TIMEOUT_MS", &value)?;
        }
        config.data_dir = get("TRADECHART_DATA_DIR").map(PathBuf::from);

        Ok(config)
    }

    /// The configured price source: a CSV directory when `data_dir` is set,
    /// Yahoo otherwise.
    pub fn price_source(&self) -> Arc<dyn PriceSource> {
        match &self.data_dir {
            Some(dir) => Arc::new(CsvDirectorySource::new(dir.clone())),
            None => {
                let auth = self
                    .yahoo_cookie
                    .clone()
                    .map_or(HttpAuth::None, HttpAuth::Cookie);
                Arc::new(
                    YahooSource::new(Arc::new(ReqwestHttpClient::new()))
                        .with_base_url(self.yahoo_base_url.clone())
                        .with_timeout_ms(self.timeout_ms)
                        .with_auth(auth),
                )
            }
        }
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError {
        key,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use time::Weekday;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ChartConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config, ChartConfig::default());
        assert_eq!(config.window_padding_days, 120);
    }

    #[test]
    fn reads_overrides() {
        let config = ChartConfig::from_lookup(lookup(&[
            ("TRADECHART_WINDOW_PADDING_DAYS", "30"),
            ("TRADECHART_WEEK_END_DAY", "thursday"),
            ("TRADECHART_DATA_DIR", "/srv/history"),
            ("TRADECHART_TIMEOUT_MS", " "),
        ]))
        .expect("valid overrides");

        assert_eq!(config.window_padding_days, 30);
        assert_eq!(config.week_end_day.weekday(), Weekday::Thursday);
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/history")));
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.price_source().id(), "csv_dir");
    }

    #[test]
    fn rejects_malformed_numbers() {
        let err = ChartConfig::from_lookup(lookup(&[("TRADECHART_WINDOW_PADDING_DAYS", "-3")]))
            .expect_err("negative padding");
        assert_eq!(err.key, "TRADECHART_WINDOW_PADDING_DAYS");
    }
}
