use serde::Serialize;
use thiserror::Error;

use crate::{Bar, DateRange, RawRow, TradingDate, ValidationError};

/// Ordered daily bars for one symbol, dates non-decreasing.
///
/// A series is built once from feed rows and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    bars: Vec<Bar>,
}

/// A feed row that could not become part of a series.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {index} ('{date}'): {error}")]
pub struct RowDiagnostic {
    /// Zero-based position of the row in the input.
    pub index: usize,
    /// Date text exactly as received.
    pub date: String,
    pub error: ValidationError,
}

/// Output of lenient construction: the rows that decoded plus what was skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LenientSeries {
    pub series: Series,
    pub diagnostics: Vec<RowDiagnostic>,
}

impl Series {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap already-typed bars, rejecting dates that go backwards.
    pub fn new(bars: Vec<Bar>) -> Result<Self, ValidationError> {
        for pair in bars.windows(2) {
            check_order(pair[0].date, pair[1].date)?;
        }
        Ok(Self { bars })
    }

    /// Decode rows in input order, aborting on the first bad row.
    pub fn from_rows<I>(rows: I) -> Result<Self, RowDiagnostic>
    where
        I: IntoIterator<Item = RawRow>,
    {
        SeriesBuilder::default().build(rows)
    }

    /// Decode price-feed rows in input order.
    ///
    /// Bad dates, bad prices and dates going backwards abort as in
    /// [`Series::from_rows`]. A row whose open or close lies outside its
    /// high/low range is kept unchanged and logged.
    pub fn from_feed_rows<I>(rows: I) -> Result<Self, RowDiagnostic>
    where
        I: IntoIterator<Item = RawRow>,
    {
        SeriesBuilder {
            keep_inconsistent_bounds: true,
            ..SeriesBuilder::default()
        }
        .build(rows)
    }

    /// Decode rows in input order, skipping and recording bad rows.
    pub fn from_rows_lenient<I>(rows: I) -> LenientSeries
    where
        I: IntoIterator<Item = RawRow>,
    {
        let mut builder = SeriesBuilder::default();
        let mut diagnostics = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            if let Err(error) = builder.push(&row) {
                tracing::warn!(index, date = %row.date, %error, "skipping feed row");
                diagnostics.push(RowDiagnostic {
                    index,
                    date: row.date,
                    error,
                });
            }
        }
        LenientSeries {
            series: builder.finish(),
            diagnostics,
        }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    /// Bars whose date falls inside `range`, bounds included.
    pub fn within(&self, range: &DateRange) -> Self {
        Self {
            bars: self
                .bars
                .iter()
                .filter(|bar| range.contains(bar.date))
                .copied()
                .collect(),
        }
    }

    /// Whether `date` lies between the first and last bar, bounds included.
    pub fn spans(&self, date: TradingDate) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => first.date <= date && date <= last.date,
            _ => false,
        }
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

#[derive(Default)]
struct SeriesBuilder {
    bars: Vec<Bar>,
    keep_inconsistent_bounds: bool,
}

impl SeriesBuilder {
    fn build<I>(mut self, rows: I) -> Result<Series, RowDiagnostic>
    where
        I: IntoIterator<Item = RawRow>,
    {
        for (index, row) in rows.into_iter().enumerate() {
            self.push(&row).map_err(|error| RowDiagnostic {
                index,
                date: row.date.clone(),
                error,
            })?;
        }
        Ok(self.finish())
    }

    fn push(&mut self, row: &RawRow) -> Result<(), ValidationError> {
        let bar = if self.keep_inconsistent_bounds {
            let bar = Bar::from_feed_row(row)?;
            if let Err(error) = bar.check_bounds() {
                tracing::warn!(
                    date = %row.date,
                    %error,
                    "keeping feed row with inconsistent prices"
                );
            }
            bar
        } else {
            Bar::from_raw(row)?
        };
        if let Some(previous) = self.bars.last() {
            check_order(previous.date, bar.date)?;
        }
        self.bars.push(bar);
        Ok(())
    }

    fn finish(self) -> Series {
        Series { bars: self.bars }
    }
}

fn check_order(previous: TradingDate, current: TradingDate) -> Result<(), ValidationError> {
    if current < previous {
        return Err(ValidationError::OutOfOrder {
            previous: previous.to_string(),
            current: current.to_string(),
        });
    }
    Ok(())
}
