//! Chart annotations derived from a trade.

use serde::Serialize;

use crate::{Series, Trade, TradingDate};

/// Range fills alternate between these colours, first exit green.
pub const RANGE_COLORS: [&str; 2] = ["#00ff00", "#ff0000"];

const MARKER_SIZE: u32 = 5;
const LABEL_BACKGROUND: &str = "#fff";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelStyle {
    pub background: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointLabel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub style: LabelStyle,
}

/// A single marked price on a single day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointAnnotation {
    pub x: TradingDate,
    pub y: f64,
    pub marker: Marker,
    pub label: PointLabel,
    /// Whether `x` falls within the charted bars.
    #[serde(rename = "inRange")]
    pub in_range: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeLabel {
    pub text: String,
}

/// A shaded span on the date axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeAnnotation {
    pub x: TradingDate,
    pub x2: TradingDate,
    #[serde(rename = "fillColor")]
    pub fill_color: String,
    pub label: RangeLabel,
    #[serde(rename = "inRange")]
    pub in_range: bool,
}

/// Point and x-axis annotations for one chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Annotations {
    pub points: Vec<PointAnnotation>,
    pub xaxis: Vec<RangeAnnotation>,
}

/// Derive annotations for `trade` over the charted `series`.
///
/// Nothing is produced unless the trade asks for annotations. The entry gets
/// an unlabelled point; each exit gets an `Exit` point plus a range running
/// from the previous boundary (the entry for the first exit) to that exit.
pub fn build_annotations(trade: &Trade, series: &Series) -> Annotations {
    if !trade.show_trades {
        return Annotations::default();
    }

    let mut points = Vec::with_capacity(trade.exits().len() + 1);
    let mut xaxis = Vec::with_capacity(trade.exits().len());

    points.push(point(trade.entry.date, trade.entry.price, None, series));

    let range_label = format!("Buy {:.2}", trade.entry.price);
    let mut range_start = trade.entry.date;
    for (index, exit) in trade.exits().iter().enumerate() {
        points.push(point(exit.date, exit.price, Some("Exit"), series));

        xaxis.push(RangeAnnotation {
            x: range_start,
            x2: exit.date,
            fill_color: RANGE_COLORS[index % RANGE_COLORS.len()].to_owned(),
            label: RangeLabel {
                text: range_label.clone(),
            },
            in_range: series.spans(range_start) && series.spans(exit.date),
        });
        range_start = exit.date;
    }

    Annotations { points, xaxis }
}

fn point(date: TradingDate, price: f64, text: Option<&str>, series: &Series) -> PointAnnotation {
    PointAnnotation {
        x: date,
        y: price,
        marker: Marker { size: MARKER_SIZE },
        label: PointLabel {
            text: text.map(str::to_owned),
            style: LabelStyle {
                background: LABEL_BACKGROUND.to_owned(),
            },
        },
        in_range: series.spans(date),
    }
}
