pub mod errors;
pub mod output;

use crate::config::{CliArgs, SplitConfig};
use crate::split::split_workbook;
use anyhow::Result;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout carries nothing but the JSON report.
pub fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub async fn run(args: CliArgs) -> Result<Value> {
    let config = SplitConfig::from_args(args)?;
    let report = split_workbook(&config).await?;
    Ok(serde_json::to_value(report)?)
}
