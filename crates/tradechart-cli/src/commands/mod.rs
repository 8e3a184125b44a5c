mod aggregate;
mod chart;
mod orders;

use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::Table;

/// What a command produced, ready for any output format.
pub struct CommandResult {
    pub data: Value,
    pub table: Table,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(data: Value, table: Table) -> Self {
        Self {
            data,
            table,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    match &cli.command {
        Command::Chart(args) => chart::run(args).await,
        Command::Aggregate(args) => aggregate::run(args),
        Command::Orders(args) => orders::run(args),
    }
}

fn open(path: &std::path::Path) -> Result<std::io::BufReader<std::fs::File>, CliError> {
    std::fs::File::open(path)
        .map(std::io::BufReader::new)
        .map_err(|source| CliError::Io {
            path: path.display().to_string(),
            source,
        })
}
