mod platform;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use report_engine::{ClientSettings, EngineHandle};
use report_logging::{report_error, report_info, LevelFilter, LogDestination};

/// Terminal client for the report orchestrator.
#[derive(Debug, Parser)]
#[command(name = "report_app", version, about)]
struct Args {
    /// Origin serving /config/config.json.
    #[arg(long, default_value = "http://localhost:8080")]
    origin: String,
    /// Directory for saved assembled reports.
    #[arg(long, default_value = "reports")]
    output_dir: PathBuf,
    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    log: LogTarget,
    /// Log file used by the `file` and `both` targets.
    #[arg(long, default_value = "report_app.log")]
    log_file: PathBuf,
    /// Log at debug level instead of info.
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogTarget {
    Terminal,
    File,
    Both,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let destination = match args.log {
        LogTarget::Terminal => LogDestination::Terminal,
        LogTarget::File => LogDestination::File(args.log_file.clone()),
        LogTarget::Both => LogDestination::Both(args.log_file.clone()),
    };
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    report_logging::initialize(destination, level);
    report_info!("Starting report_app against origin {}", args.origin);

    let (engine, config) = EngineHandle::bootstrap(&args.origin, &ClientSettings::default())
        .inspect_err(|err| report_error!("Startup failed: {}", err))
        .with_context(|| format!("cannot load runtime config from {}", args.origin))?;

    platform::run_app(engine, &config.orchestrator_url, args.output_dir)
}
