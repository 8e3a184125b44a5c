use serde::Serialize;
use tradechart_core::{
    aggregate, decode_daily_csv, decode_daily_csv_lenient, Bar, Granularity, RowDiagnostic,
    WeekEndDay,
};

use crate::cli::AggregateArgs;
use crate::error::CliError;
use crate::output::Table;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct AggregateResponseData {
    granularity: Granularity,
    week_end_day: WeekEndDay,
    bars: Vec<Bar>,
    skipped: Vec<SkippedRow>,
}

#[derive(Debug, Serialize)]
struct SkippedRow {
    index: usize,
    date: String,
    reason: String,
}

impl From<&RowDiagnostic> for SkippedRow {
    fn from(diagnostic: &RowDiagnostic) -> Self {
        Self {
            index: diagnostic.index,
            date: diagnostic.date.clone(),
            reason: diagnostic.error.to_string(),
        }
    }
}

pub fn run(args: &AggregateArgs) -> Result<CommandResult, CliError> {
    let reader = super::open(&args.file)?;

    let (series, diagnostics) = if args.lenient {
        let lenient = decode_daily_csv_lenient(reader)?;
        (lenient.series, lenient.diagnostics)
    } else {
        (decode_daily_csv(reader)?, Vec::new())
    };

    let bars = aggregate(&series, args.time_frame, args.week_end_day);
    let warnings = diagnostics
        .iter()
        .map(|diagnostic| format!("skipped {diagnostic}"))
        .collect();

    let table = Table::from_bars(&bars);
    let data = serde_json::to_value(AggregateResponseData {
        granularity: args.time_frame,
        week_end_day: args.week_end_day,
        bars,
        skipped: diagnostics.iter().map(SkippedRow::from).collect(),
    })?;
    Ok(CommandResult::ok(data, table).with_warnings(warnings))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn write(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.csv");
        std::fs::write(&path, contents).expect("write history");
        (dir, path)
    }

    const FEED: &str = "\
Date,Open,High,Low,Close,Volume
2024-01-30,10,12,9,11,100
oops,1,1,1,1,1
2024-01-31,11,15,10,14,200
2024-02-01,14,16,13,15,300
";

    #[test]
    fn lenient_run_aggregates_and_reports_skipped_rows() {
        let (_dir, file) = write(FEED);
        let result = run(&AggregateArgs {
            file,
            time_frame: Granularity::Monthly,
            week_end_day: WeekEndDay::default(),
            lenient: true,
        })
        .expect("lenient aggregation");

        assert_eq!(result.data["granularity"], "monthly");
        assert_eq!(result.data["bars"].as_array().map(Vec::len), Some(2));
        assert_eq!(result.data["bars"][0]["date"], "2024-01-31");
        assert_eq!(result.data["bars"][0]["volume"], 300);
        assert_eq!(result.data["skipped"][0]["index"], 1);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn strict_run_fails_on_the_bad_row() {
        let (_dir, file) = write(FEED);
        let err = run(&AggregateArgs {
            file,
            time_frame: Granularity::Monthly,
            week_end_day: WeekEndDay::default(),
            lenient: false,
        })
        .err()
        .expect("strict aggregation must fail");

        assert!(matches!(err, CliError::Feed(_)));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = run(&AggregateArgs {
            file: PathBuf::from("/nonexistent/history.csv"),
            time_frame: Granularity::Daily,
            week_end_day: WeekEndDay::default(),
            lenient: false,
        })
        .err()
        .expect("missing file");

        assert_eq!(err.exit_code(), 10);
    }
}
