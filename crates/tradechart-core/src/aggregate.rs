//! Period aggregation of daily bars.
//!
//! Every function here is pure: it reads an immutable [`Series`] and owns its
//! accumulator for the duration of the call, so independent series can be
//! aggregated concurrently without coordination.
//!
//! | Granularity | Period closes on | Bar date |
//! |-------------|------------------|----------|
//! | Daily | every day | the day |
//! | Weekly | the closing weekday, or the last day of the series | that day |
//! | Monthly | a change of (year, month), or the end of the series | last day seen in the month |

use time::{Month, Weekday};

use crate::{Bar, Granularity, RawRow, RowDiagnostic, Series, TradingDate, WeekEndDay};

/// Bars produced from raw rows together with the rows that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub bars: Vec<Bar>,
    pub diagnostics: Vec<RowDiagnostic>,
}

/// Re-sample `series` at `granularity`.
///
/// `week_end` only matters for [`Granularity::Weekly`].
pub fn aggregate(series: &Series, granularity: Granularity, week_end: WeekEndDay) -> Vec<Bar> {
    match granularity {
        Granularity::Daily => series.bars().to_vec(),
        Granularity::Weekly => aggregate_weekly(series, week_end.weekday()),
        Granularity::Monthly => aggregate_monthly(series),
    }
}

/// Decode `rows` leniently, then aggregate what decoded.
///
/// Rows with an unparsable date, invalid prices or a date earlier than the
/// previous accepted row are left out of every bar and reported in
/// [`Aggregation::diagnostics`].
pub fn aggregate_rows<I>(rows: I, granularity: Granularity, week_end: WeekEndDay) -> Aggregation
where
    I: IntoIterator<Item = RawRow>,
{
    let lenient = Series::from_rows_lenient(rows);
    Aggregation {
        bars: aggregate(&lenient.series, granularity, week_end),
        diagnostics: lenient.diagnostics,
    }
}

/// Fold days into weeks closing on `week_end`.
///
/// A week with a missing closing day (a holiday, say) keeps accumulating until
/// the next closing weekday. A trailing partial week is always emitted.
pub fn aggregate_weekly(series: &Series, week_end: Weekday) -> Vec<Bar> {
    let bars = series.bars();
    let mut weekly = Vec::new();
    let mut current: Option<PeriodAccumulator> = None;

    for (index, day) in bars.iter().enumerate() {
        match current.as_mut() {
            Some(period) => period.fold(day),
            None => current = Some(PeriodAccumulator::seed(day)),
        }

        let is_last = index + 1 == bars.len();
        if day.date.weekday() == week_end || is_last {
            if let Some(period) = current.take() {
                weekly.push(period.close_on(day.date));
            }
        }
    }

    weekly
}

/// Fold days into calendar months keyed by (year, month).
pub fn aggregate_monthly(series: &Series) -> Vec<Bar> {
    let mut monthly = Vec::new();
    let mut current: Option<OpenMonth> = None;
    let mut previous_date: Option<TradingDate> = None;

    for day in series {
        let key = day.date.month_key();
        let same_month = current.as_ref().is_some_and(|open| open.key == key);
        if same_month {
            if let Some(open) = current.as_mut() {
                open.period.fold(day);
            }
        } else {
            if let (Some(open), Some(last_day)) = (current.take(), previous_date) {
                monthly.push(open.period.close_on(last_day));
            }
            current = Some(OpenMonth {
                key,
                period: PeriodAccumulator::seed(day),
            });
        }
        previous_date = Some(day.date);
    }

    if let (Some(open), Some(last_day)) = (current, previous_date) {
        monthly.push(open.period.close_on(last_day));
    }

    monthly
}

struct OpenMonth {
    key: (i32, Month),
    period: PeriodAccumulator,
}

/// Running OHLCV state of the period being built.
#[derive(Debug, Clone, Copy)]
struct PeriodAccumulator {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl PeriodAccumulator {
    fn seed(day: &Bar) -> Self {
        Self {
            open: day.open,
            high: day.high,
            low: day.low,
            close: day.close,
            volume: day.volume,
        }
    }

    fn fold(&mut self, day: &Bar) {
        self.high = self.high.max(day.high);
        self.low = self.low.min(day.low);
        self.close = day.close;
        self.volume = self.volume.saturating_add(day.volume);
    }

    fn close_on(&self, date: TradingDate) -> Bar {
        Bar {
            date,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        }
    }
}
