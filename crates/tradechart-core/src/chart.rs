//! Chart-ready payload: a candlestick series, a parallel volume series and
//! trade annotations.

use serde::Serialize;

use crate::{Annotations, Bar, CoreError, Symbol, TradingDate};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlePoint {
    pub x: TradingDate,
    /// `[open, high, low, close]`
    pub y: [f64; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumePoint {
    pub x: TradingDate,
    pub y: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartSeries {
    Candles {
        name: String,
        data: Vec<CandlePoint>,
    },
    Volume {
        name: String,
        data: Vec<VolumePoint>,
        #[serde(rename = "type")]
        kind: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub series: Vec<ChartSeries>,
    pub annotations: Annotations,
}

impl ChartPayload {
    /// Lay `bars` out as a candlestick series named after `symbol` followed by
    /// a `Volume` bar series over the same dates.
    pub fn new(symbol: &Symbol, bars: &[Bar], annotations: Annotations) -> Self {
        let candles = bars
            .iter()
            .map(|bar| CandlePoint {
                x: bar.date,
                y: bar.ohlc(),
            })
            .collect();
        let volumes = bars
            .iter()
            .map(|bar| VolumePoint {
                x: bar.date,
                y: bar.volume,
            })
            .collect();

        Self {
            series: vec![
                ChartSeries::Candles {
                    name: symbol.to_string(),
                    data: candles,
                },
                ChartSeries::Volume {
                    name: String::from("Volume"),
                    data: volumes,
                    kind: "bar",
                },
            ],
            annotations,
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, CoreError> {
        let rendered = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(rendered)
    }
}
