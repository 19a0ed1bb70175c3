mod config;
mod console;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use engine_logging::engine_info;
use scanner_engine::{ReqwestMailApi, Scanner};

use config::FileConfig;
use console::{ConsolePresenter, LogProgressSink, TokenSignIn};
use logging::LogDestination;

/// Lists the services you signed up for, judged by recent Gmail subjects.
#[derive(Debug, Parser)]
#[command(name = "scanner", version)]
struct Args {
    /// OAuth access token with the gmail.readonly scope.
    #[arg(long, env = "SCANNER_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// RON file overriding query, batching and endpoint settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where diagnostic logs go.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::initialize(args.log);

    let config = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let api = ReqwestMailApi::new(config.api_settings()).context("building HTTP client")?;
    let scanner = Scanner::new(Arc::new(api), config.scan_settings())
        .with_progress_sink(Arc::new(LogProgressSink));

    // One cooperative thread: batch concurrency is interleaving, not parallelism.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    let sign_in = TokenSignIn::new(args.token);
    let presenter = ConsolePresenter;
    let report = runtime.block_on(scanner.on_activate(&sign_in, &presenter))?;

    engine_info!(
        "Scan finished: {} messages, {} failed, {} services",
        report.message_count,
        report.failed_ids.len(),
        report.services.len()
    );
    Ok(())
}
