use std::io::{self, Write};

use serde_json::Value;
use tradechart_core::{Bar, ChartPayload, ChartSeries, TradeOrder};

use crate::cli::OutputFormat;
use crate::commands::CommandResult;
use crate::error::CliError;

/// Rows prepared for aligned terminal output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

const BAR_HEADERS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

impl Table {
    pub fn from_bars(bars: &[Bar]) -> Self {
        let rows = bars
            .iter()
            .map(|bar| {
                let mut row = vec![bar.date.to_string()];
                row.extend(bar.ohlc().iter().map(|price| format!("{price:.2}")));
                row.push(bar.volume.to_string());
                row
            })
            .collect();
        Self {
            headers: BAR_HEADERS.to_vec(),
            rows,
        }
    }

    /// Candles joined with the volume series by position.
    pub fn from_payload(payload: &ChartPayload) -> Self {
        let mut candles = &[][..];
        let mut volumes = &[][..];
        for series in &payload.series {
            match series {
                ChartSeries::Candles { data, .. } => candles = data.as_slice(),
                ChartSeries::Volume { data, .. } => volumes = data.as_slice(),
            }
        }

        let rows = candles
            .iter()
            .enumerate()
            .map(|(index, candle)| {
                let mut row = vec![candle.x.to_string()];
                row.extend(candle.y.iter().map(|price| format!("{price:.2}")));
                row.push(
                    volumes
                        .get(index)
                        .map(|volume| volume.y.to_string())
                        .unwrap_or_default(),
                );
                row
            })
            .collect();
        Self {
            headers: BAR_HEADERS.to_vec(),
            rows,
        }
    }

    pub fn from_orders(orders: &[TradeOrder]) -> Self {
        let rows = orders
            .iter()
            .map(|order| {
                vec![
                    order.trade_id.clone(),
                    order.stock_symbol.clone(),
                    order.entry_date_time.clone(),
                    format!("{:.2}", order.entry_price),
                    order.exit_date_time.clone(),
                    format!("{:.2}", order.exit_price),
                    order.exit_quantity.to_string(),
                    order.trade_details_link.clone(),
                ]
            })
            .collect();
        Self {
            headers: vec![
                "trade_id", "symbol", "entry", "entry_price", "exit", "exit_price", "quantity",
                "link",
            ],
            rows,
        }
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut widths: Vec<usize> = self.headers.iter().map(|header| header.len()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }

        let header: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        write_row(writer, &header, &widths)?;
        for row in &self.rows {
            write_row(writer, row, &widths)?;
        }
        Ok(())
    }
}

fn write_row<W: Write>(writer: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(writer, "{}", line.trim_end())
}

pub fn render(result: &CommandResult, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    render_to(&mut stdout.lock(), result, format, pretty)
}

pub fn render_to<W: Write>(
    writer: &mut W,
    result: &CommandResult,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let written = match format {
        OutputFormat::Json => {
            let payload = json_text(&result.data, pretty)?;
            writeln!(writer, "{payload}")
        }
        OutputFormat::Table => result.table.write_to(writer),
    };
    written.map_err(|source| CliError::Io {
        path: String::from("<stdout>"),
        source,
    })
}

fn json_text(data: &Value, pretty: bool) -> Result<String, CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(data)?
    } else {
        serde_json::to_string(data)?
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn result() -> CommandResult {
        CommandResult::ok(
            json!({ "bars": [] }),
            Table {
                headers: vec!["date", "close"],
                rows: vec![
                    vec![String::from("2024-01-05"), String::from("103.00")],
                    vec![String::from("2024-01-12"), String::from("99.50")],
                ],
            },
        )
    }

    #[test]
    fn table_columns_are_padded_to_the_widest_cell() {
        let mut out = Vec::new();
        render_to(&mut out, &result(), OutputFormat::Table, false).expect("render table");

        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(
            text,
            "date        close\n2024-01-05  103.00\n2024-01-12  99.50\n"
        );
    }

    #[test]
    fn json_output_is_compact_unless_pretty() {
        let mut compact = Vec::new();
        render_to(&mut compact, &result(), OutputFormat::Json, false).expect("render json");
        assert_eq!(String::from_utf8(compact).expect("utf8"), "{\"bars\":[]}\n");

        let mut pretty = Vec::new();
        render_to(&mut pretty, &result(), OutputFormat::Json, true).expect("render json");
        assert!(String::from_utf8(pretty).expect("utf8").contains("\n  \"bars\""));
    }
}
