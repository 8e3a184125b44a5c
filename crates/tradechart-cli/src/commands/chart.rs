use tradechart_core::{
    ChartConfig, ChartRequest, ChartService, Symbol, Trade, TradePoint,
};

use crate::cli::ChartArgs;
use crate::error::CliError;
use crate::output::Table;

use super::CommandResult;

pub async fn run(args: &ChartArgs) -> Result<CommandResult, CliError> {
    let config = config_for(args, ChartConfig::from_env()?);
    let service = ChartService::from_config(&config);
    tracing::debug!(source = service.source_id(), "chart command");

    let mut request = ChartRequest::new(trade_from(args)?, args.time_frame);
    if let Some(week_end_day) = args.week_end_day {
        request = request.with_week_end_day(week_end_day);
    }

    let payload = service.chart(request).await?;
    let table = Table::from_payload(&payload);
    let data = serde_json::to_value(&payload)?;
    Ok(CommandResult::ok(data, table))
}

/// Command-line flags take precedence over the environment.
fn config_for(args: &ChartArgs, mut config: ChartConfig) -> ChartConfig {
    if let Some(dir) = &args.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(days) = args.padding_days {
        config.window_padding_days = days;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    config
}

fn trade_from(args: &ChartArgs) -> Result<Trade, CliError> {
    let symbol = Symbol::parse(&args.symbol)?;
    let entry = TradePoint::new(args.enter, args.enter_price)?;

    let mut exits = vec![TradePoint::new(args.exit, args.exit_price)?];
    if let (Some(date), Some(price)) = (args.exit2, args.exit_price2) {
        exits.push(TradePoint::new(date, price)?);
    }

    Ok(Trade::new(symbol, entry, exits, args.show_trades)?)
}
