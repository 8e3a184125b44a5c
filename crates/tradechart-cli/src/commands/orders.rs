use tradechart_core::parse_orders;

use crate::cli::OrdersArgs;
use crate::error::CliError;
use crate::output::Table;

use super::CommandResult;

pub fn run(args: &OrdersArgs) -> Result<CommandResult, CliError> {
    let reader = super::open(&args.file)?;
    let report = parse_orders(reader, &args.public_url)
        .map_err(|error| CliError::Command(format!("malformed order CSV: {error}")))?;

    let warnings = report
        .skipped
        .iter()
        .map(|skipped| format!("skipped {skipped}"))
        .collect();
    let table = Table::from_orders(&report.orders);
    let data = serde_json::to_value(&report.orders)?;
    Ok(CommandResult::ok(data, table).with_warnings(warnings))
}
