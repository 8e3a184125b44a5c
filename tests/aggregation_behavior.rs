//! Behavior-driven tests for period aggregation.
//!
//! These tests verify HOW daily bars roll up into weekly and monthly bars
//! across realistic calendars: holidays, month and year boundaries, and
//! feeds containing bad rows.

use time::Weekday;
use tradechart_core::{
    aggregate, aggregate_rows, Bar, Granularity, RawRow, Series, TradingDate, WeekEndDay,
};

fn rows(fixtures: &[(&str, f64, f64, f64, f64, u64)]) -> Vec<RawRow> {
    fixtures
        .iter()
        .map(|&(date, open, high, low, close, volume)| {
            RawRow::new(date, open, high, low, close, volume)
        })
        .collect()
}

fn dates(bars: &[Bar]) -> Vec<String> {
    bars.iter().map(|bar| bar.date.to_string()).collect()
}

// =============================================================================
// Weekly aggregation
// =============================================================================

#[test]
fn when_two_full_weeks_are_aggregated_each_week_closes_on_friday() {
    // Given: Two trading weeks, 2024-01-08 .. 2024-01-19
    let series = Series::from_rows(rows(&[
        ("2024-01-08", 10.0, 11.0, 9.0, 10.5, 1),
        ("2024-01-09", 10.5, 12.0, 10.0, 11.0, 1),
        ("2024-01-10", 11.0, 11.5, 10.5, 11.25, 1),
        ("2024-01-11", 11.25, 11.75, 11.0, 11.5, 1),
        ("2024-01-12", 11.5, 12.5, 11.25, 12.0, 1),
        ("2024-01-16", 12.0, 13.0, 11.5, 12.5, 2),
        ("2024-01-17", 12.5, 12.75, 10.0, 10.5, 2),
        ("2024-01-18", 10.5, 11.0, 10.25, 10.75, 2),
        ("2024-01-19", 10.75, 11.5, 10.5, 11.25, 2),
    ]))
    .expect("valid history");

    // When: The series is aggregated weekly with the default closing day
    let weekly = aggregate(&series, Granularity::Weekly, WeekEndDay::default());

    // Then: One bar per week, dated on the Friday
    assert_eq!(dates(&weekly), ["2024-01-12", "2024-01-19"]);

    // And: Each bar carries the week's OHLCV
    assert_eq!(weekly[0].ohlc(), [10.0, 12.5, 9.0, 12.0]);
    assert_eq!(weekly[0].volume, 5);
    assert_eq!(weekly[1].ohlc(), [12.0, 13.0, 10.0, 11.25]);
    assert_eq!(weekly[1].volume, 8);
}

#[test]
fn when_a_closing_day_is_a_holiday_the_week_runs_into_the_next_one() {
    // Given: Good Friday 2024-03-29 has no session
    let series = Series::from_rows(rows(&[
        ("2024-03-25", 10.0, 11.0, 9.0, 10.0, 1),
        ("2024-03-28", 10.0, 10.5, 9.5, 10.25, 1),
        ("2024-04-01", 10.25, 11.0, 10.0, 10.75, 1),
        ("2024-04-05", 10.75, 12.0, 10.5, 11.75, 1),
    ]))
    .expect("valid history");

    // When: Aggregated weekly on Friday
    let weekly = aggregate(&series, Granularity::Weekly, WeekEndDay::default());

    // Then: The holiday week is not closed separately
    assert_eq!(dates(&weekly), ["2024-04-05"]);
    assert_eq!(weekly[0].volume, 4);
}

#[test]
fn when_the_closing_day_is_configured_weeks_close_on_it() {
    // Given: Monday..Friday of one week
    let series = Series::from_rows(rows(&[
        ("2024-01-08", 10.0, 11.0, 9.0, 10.0, 1),
        ("2024-01-09", 10.0, 11.0, 9.0, 10.0, 1),
        ("2024-01-10", 10.0, 11.0, 9.0, 10.0, 1),
        ("2024-01-11", 10.0, 11.0, 9.0, 10.0, 1),
        ("2024-01-12", 10.0, 11.0, 9.0, 10.0, 1),
    ]))
    .expect("valid history");

    // When: Weeks close on Tuesday
    let weekly = aggregate(
        &series,
        Granularity::Weekly,
        WeekEndDay::new(Weekday::Tuesday),
    );

    // Then: Tuesday closes the first period and the remainder is flushed
    assert_eq!(dates(&weekly), ["2024-01-09", "2024-01-12"]);
    assert_eq!(weekly[1].volume, 3);
}

// =============================================================================
// Monthly aggregation
// =============================================================================

#[test]
fn when_history_spans_a_year_end_months_are_not_merged_across_years() {
    // Given: December 2023 and January 2024 sessions plus January 2025
    let series = Series::from_rows(rows(&[
        ("2023-12-28", 10.0, 11.0, 9.0, 10.5, 1),
        ("2023-12-29", 10.5, 11.5, 10.0, 11.0, 1),
        ("2024-01-02", 11.0, 12.0, 10.5, 11.5, 1),
        ("2024-01-31", 11.5, 13.0, 11.0, 12.5, 1),
        ("2025-01-02", 20.0, 21.0, 19.0, 20.5, 1),
    ]))
    .expect("valid history");

    // When: Aggregated monthly
    let monthly = aggregate(&series, Granularity::Monthly, WeekEndDay::default());

    // Then: Each (year, month) is its own bar dated on its last session
    assert_eq!(dates(&monthly), ["2023-12-29", "2024-01-31", "2025-01-02"]);
    assert_eq!(monthly[1].ohlc(), [11.0, 13.0, 10.5, 12.5]);
}

#[test]
fn when_aggregated_daily_the_series_comes_back_unchanged() {
    // Given: Several sessions spanning a weekend and a month end
    let series = Series::from_rows(rows(&[
        ("2024-01-30", 10.0, 12.0, 9.0, 11.0, 100),
        ("2024-01-31", 11.0, 15.0, 10.0, 14.0, 200),
        ("2024-02-01", 14.0, 16.0, 13.0, 15.0, 300),
        ("2024-02-02", 15.0, 15.5, 14.0, 14.5, 400),
        ("2024-02-05", 14.5, 17.0, 14.25, 16.75, 500),
    ]))
    .expect("valid history");

    // When: Aggregated at daily granularity
    let daily = aggregate(&series, Granularity::Daily, WeekEndDay::default());

    // Then: Every bar is returned as is, in order
    assert_eq!(daily.as_slice(), series.bars());
}

#[test]
fn when_aggregating_every_bar_stays_within_its_high_low_bounds() {
    // Given: A month of alternating sessions
    let series = Series::from_rows(rows(&[
        ("2024-02-01", 50.0, 52.0, 49.0, 51.0, 10),
        ("2024-02-02", 51.0, 55.0, 50.0, 54.0, 20),
        ("2024-02-05", 54.0, 54.5, 47.0, 48.0, 30),
        ("2024-02-06", 48.0, 49.0, 46.5, 48.5, 40),
        ("2024-02-29", 48.5, 60.0, 48.0, 59.0, 50),
    ]))
    .expect("valid history");

    for granularity in Granularity::ALL {
        // When: Aggregated at each granularity
        let bars = aggregate(&series, granularity, WeekEndDay::default());

        // Then: Bounds hold and no volume is lost
        for bar in &bars {
            assert!(bar.high >= bar.open.max(bar.close), "{granularity}");
            assert!(bar.low <= bar.open.min(bar.close), "{granularity}");
        }
        assert_eq!(bars.iter().map(|bar| bar.volume).sum::<u64>(), 150);
    }
}

// =============================================================================
// Rows with problems
// =============================================================================

#[test]
fn when_a_feed_has_bad_rows_they_are_reported_and_left_out() {
    // Given: Rows with a bad date and a row going backwards in time
    let input = rows(&[
        ("2024-01-04", 10.0, 12.0, 9.0, 11.0, 100),
        ("Jan 5", 11.0, 13.0, 10.0, 12.0, 200),
        ("2024-01-03", 1.0, 1.0, 1.0, 1.0, 1),
        ("2024-01-05", 11.0, 13.0, 10.0, 12.0, 200),
    ]);

    // When: Aggregated leniently
    let result = aggregate_rows(input, Granularity::Weekly, WeekEndDay::default());

    // Then: Good rows form the week, bad ones become diagnostics
    assert_eq!(result.bars.len(), 1);
    assert_eq!(result.bars[0].volume, 300);
    let skipped: Vec<usize> = result.diagnostics.iter().map(|d| d.index).collect();
    assert_eq!(skipped, [1, 2]);
}

#[test]
fn when_prices_have_fractions_of_a_cent_they_are_truncated_not_rounded() {
    // Given: A row with sub-cent prices
    let series = Series::from_rows(rows(&[(
        "2024-01-05",
        100.129,
        101.999,
        99.991,
        100.505,
        1,
    )]))
    .expect("valid history");

    // Then: Every price is floored to cents
    let bar = series.first().expect("one bar");
    assert_eq!(bar.ohlc(), [100.12, 101.99, 99.99, 100.5]);
    assert_eq!(bar.date, TradingDate::parse("2024-01-05").expect("date"));
}
