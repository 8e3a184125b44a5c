use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

use tradechart_core::{
    CsvDirectorySource, DateRange, FixtureHttpClient, HttpResponse, PriceSource, SeriesRequest,
    SourceErrorKind, Symbol, TradingDate, YahooSource,
};

const HISTORY: &str = "\
Date,Open,High,Low,Close,Adj Close,Volume
2023-12-28,99,100,98,99.5,99.5,5
2023-12-29,100,101,99,100.5,100.5,10
2024-01-02,101.129,102,100,101.5,101.5,20
2024-01-03,102,103,101,102.5,102.5,30
2024-01-04,103,104,102,103.5,103.5,40
";

struct SourceCase {
    source: Arc<dyn PriceSource>,
    // Keeps the history directory alive for file-backed sources.
    _dir: Option<tempfile::TempDir>,
}

fn source_cases() -> Vec<SourceCase> {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("AAPL.csv"), HISTORY).expect("write history");

    vec![
        SourceCase {
            source: Arc::new(YahooSource::new(Arc::new(FixtureHttpClient::responding(
                HttpResponse::ok(HISTORY),
            )))),
            _dir: None,
        },
        SourceCase {
            source: Arc::new(CsvDirectorySource::new(dir.path())),
            _dir: Some(dir),
        },
    ]
}

fn date(text: &str) -> TradingDate {
    TradingDate::parse(text).expect("valid date")
}

fn request(symbol: &str, start: &str, end: &str) -> SeriesRequest {
    SeriesRequest::new(
        Symbol::parse(symbol).expect("valid symbol"),
        DateRange::new(date(start), date(end)).expect("valid range"),
    )
}

#[test]
fn daily_series_is_clipped_to_the_requested_range_for_all_sources() {
    for case in source_cases() {
        let id = case.source.id();
        let series = block_on(case.source.daily_series(request("AAPL", "2023-12-29", "2024-01-03")))
            .unwrap_or_else(|error| panic!("source '{id}' failed: {error}"));

        let dates: Vec<String> = series.iter().map(|bar| bar.date.to_string()).collect();
        assert_eq!(
            dates,
            ["2023-12-29", "2024-01-02", "2024-01-03"],
            "source '{id}': dates"
        );
    }
}

#[test]
fn prices_are_truncated_to_cents_for_all_sources() {
    for case in source_cases() {
        let id = case.source.id();
        let series = block_on(case.source.daily_series(request("AAPL", "2024-01-02", "2024-01-02")))
            .unwrap_or_else(|error| panic!("source '{id}' failed: {error}"));

        let bar = series.first().expect("one bar");
        assert_eq!(bar.open, 101.12, "source '{id}': open");
        assert_eq!(bar.volume, 20, "source '{id}': volume");
    }
}

#[test]
fn source_ids_are_distinct() {
    let ids: Vec<&str> = source_cases().iter().map(|case| case.source.id()).collect();
    assert_eq!(ids, ["yahoo", "csv_dir"]);
}

#[test]
fn unknown_symbol_is_not_found_for_file_sources() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = CsvDirectorySource::new(dir.path());

    let error = block_on(source.daily_series(request("NOPE", "2024-01-01", "2024-01-31")))
        .expect_err("no history file");

    assert_eq!(error.kind(), SourceErrorKind::NotFound);
    assert!(!error.retryable());
    assert_eq!(error.code(), "source.not_found");
}

fn block_on<F>(future: F) -> F::Output
where
    F: Future,
{
    let waker = noop_waker();
    let mut context = Context::from_waker(&waker);
    let mut future = std::pin::pin!(future);

    loop {
        match future.as_mut().poll(&mut context) {
            Poll::Ready(output) => return output,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}

fn noop_waker() -> Waker {
    // SAFETY: The vtable functions never dereference the data pointer and are no-op operations.
    unsafe { Waker::from_raw(noop_raw_waker()) }
}

fn noop_raw_waker() -> RawWaker {
    RawWaker::new(std::ptr::null(), &NOOP_RAW_WAKER_VTABLE)
}

unsafe fn noop_raw_waker_clone(_: *const ()) -> RawWaker {
    noop_raw_waker()
}

unsafe fn noop_raw_waker_wake(_: *const ()) {}

unsafe fn noop_raw_waker_wake_by_ref(_: *const ()) {}

unsafe fn noop_raw_waker_drop(_: *const ()) {}

static NOOP_RAW_WAKER_VTABLE: RawWakerVTable = RawWakerVTable::new(
    noop_raw_waker_clone,
    noop_raw_waker_wake,
    noop_raw_waker_wake_by_ref,
    noop_raw_waker_drop,
);
