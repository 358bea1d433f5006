//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::marker_file_adapter::MarkerFileAdapter;
use crate::adapters::portfolio_performance_adapter::PortfolioPerformanceAdapter;
use crate::domain::action::{denormalize, Action};
use crate::domain::error::StrategiseError;
use crate::domain::filename::clean_filename;
use crate::domain::snapshot::Snapshot;
use crate::domain::strategy::{self, Strategy, DEFAULT_BUY_AT, DEFAULT_SELL_AT, DEFAULT_STRATEGY_KEYS};
use crate::domain::stream::Stream;
use crate::ports::action_state_port::ActionStatePort;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "strategise",
    about = "Trading decisions from a Portfolio Performance price export"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List non-retired assets
    Assets {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show price count and last price date per asset
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        asset: Option<String>,
    },
    /// Compute and record the latest decision for every asset and strategy
    Run {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        asset: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Assets { config } => run_assets(&config),
        Command::Info { config, asset } => run_info(&config, asset.as_deref()),
        Command::Run { config, asset } => run_strategise(&config, asset.as_deref()),
    }
}

/// Settings for a `run`, read from the `[import]`, `[report]` and
/// `[strategise]` sections.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub import_path: PathBuf,
    pub report_dir: PathBuf,
    pub write_reports: bool,
    pub strategies: Vec<String>,
    pub buy_at: f64,
    pub sell_at: f64,
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = StrategiseError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        tracing::error!("{err}");
        ExitCode::from(&err)
    })
}

fn required(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, StrategiseError> {
    config
        .get_string(section, key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| StrategiseError::ConfigMissing {
            section: section.into(),
            key: key.into(),
        })
}

fn threshold(config: &dyn ConfigPort, key: &str, default: f64) -> Result<f64, StrategiseError> {
    let invalid = |reason: String| StrategiseError::ConfigInvalid {
        section: "strategise".into(),
        key: key.into(),
        reason,
    };

    let value = match config.get_string("strategise", key) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(format!("{raw:?} is not a number")))?,
        None => default,
    };
    if !(0.0..=100.0).contains(&value) {
        return Err(invalid(format!("{value} is outside 0..=100")));
    }
    Ok(value)
}

pub fn import_path(config: &dyn ConfigPort) -> Result<PathBuf, StrategiseError> {
    required(config, "import", "path").map(PathBuf::from)
}

pub fn build_run_config(config: &dyn ConfigPort) -> Result<RunConfig, StrategiseError> {
    let import_path = import_path(config)?;
    let report_dir = PathBuf::from(required(config, "report", "dir")?);

    let buy_at = threshold(config, "buy_at", DEFAULT_BUY_AT)?;
    let sell_at = threshold(config, "sell_at", DEFAULT_SELL_AT)?;
    if buy_at >= sell_at {
        return Err(StrategiseError::ConfigInvalid {
            section: "strategise".into(),
            key: "buy_at".into(),
            reason: format!("buy_at ({buy_at}) must be below sell_at ({sell_at})"),
        });
    }

    let strategies = match config.get_list("strategise", "strategies") {
        Some(list) if !list.is_empty() => list,
        _ => DEFAULT_STRATEGY_KEYS.iter().map(|k| k.to_string()).collect(),
    };

    Ok(RunConfig {
        import_path,
        report_dir,
        write_reports: config.get_bool("report", "write_reports", true),
        strategies,
        buy_at,
        sell_at,
    })
}

pub fn build_strategies(config: &RunConfig) -> Result<Vec<Arc<dyn Strategy>>, StrategiseError> {
    config
        .strategies
        .iter()
        .map(|key| strategy::build(key, config.buy_at, config.sell_at))
        .collect()
}

/// What happened to one (asset, strategy) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    Decided(Action),
    /// Too little history for the strategy's indicators.
    Skipped { have: usize, need: usize },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub decided: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Decide one (asset, strategy) pair, record the decision and optionally
/// write its report.
pub fn process_pair(
    data: &dyn DataPort,
    strategy: &dyn Strategy,
    asset: &str,
    state: &dyn ActionStatePort,
    reports: Option<&dyn ReportPort>,
) -> Result<PairOutcome, StrategiseError> {
    let history: Vec<Snapshot> = data.get(asset)?.collect();
    let need = strategy.min_history();
    if history.len() < need {
        return Ok(PairOutcome::Skipped {
            have: history.len(),
            need,
        });
    }

    let [decision, report] = Stream::from(history).fan_out();
    let action = denormalize(strategy.compute(decision))
        .last()
        .unwrap_or_default();
    state.set_action(action, asset, &strategy.name())?;

    if let Some(reports) = reports {
        let report = strategy.report(report)?;
        reports.write(asset, &report)?;
    }

    Ok(PairOutcome::Decided(action))
}

/// Process every (asset, strategy) pair. A failing pair is logged and
/// counted; the rest of the batch still runs.
pub fn run_pipeline(
    data: &dyn DataPort,
    strategies: &[Arc<dyn Strategy>],
    assets: &[String],
    state: &dyn ActionStatePort,
    reports: Option<&dyn ReportPort>,
) -> RunSummary {
    let mut summary = RunSummary::default();

    for asset in assets {
        for strategy in strategies {
            let name = strategy.name();
            match process_pair(data, strategy.as_ref(), asset, state, reports) {
                Ok(PairOutcome::Decided(action)) => {
                    tracing::info!(asset = %asset, strategy = %name, %action, "decision");
                    summary.decided += 1;
                }
                Ok(PairOutcome::Skipped { have, need }) => {
                    tracing::info!(
                        asset = %asset,
                        strategy = %name,
                        have,
                        need,
                        "skipping: insufficient history"
                    );
                    summary.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(asset = %asset, strategy = %name, "failed: {e}");
                    summary.failed += 1;
                }
            }
        }
    }

    summary
}

fn load_adapter(config_path: &Path) -> Result<PortfolioPerformanceAdapter, ExitCode> {
    let config = load_config(config_path)?;
    let path = import_path(&config).map_err(|e| {
        tracing::error!("{e}");
        ExitCode::from(&e)
    })?;
    PortfolioPerformanceAdapter::from_file(&path).map_err(|e| {
        tracing::error!("{e}");
        ExitCode::from(&e)
    })
}

/// The requested asset (cleaned, must exist) or every non-retired asset.
fn select_assets(
    adapter: &PortfolioPerformanceAdapter,
    asset: Option<&str>,
) -> Result<Vec<String>, StrategiseError> {
    match asset {
        Some(name) => {
            let name = clean_filename(name);
            adapter.security(&name)?;
            Ok(vec![name])
        }
        None => Ok(adapter.assets()),
    }
}

fn run_assets(config_path: &Path) -> ExitCode {
    let adapter = match load_adapter(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    for name in adapter.assets() {
        println!("{name}");
    }
    ExitCode::SUCCESS
}

fn run_info(config_path: &Path, asset: Option<&str>) -> ExitCode {
    let adapter = match load_adapter(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let names = match select_assets(&adapter, asset) {
        Ok(n) => n,
        Err(e) => {
            tracing::error!("{e}");
            return (&e).into();
        }
    };

    for name in &names {
        let Ok(security) = adapter.security(name) else {
            continue;
        };
        match adapter.last_date(name) {
            Ok(last) => println!(
                "{}: {} prices, last {} ({} {})",
                name,
                security.prices.len(),
                last,
                security.ticker_symbol,
                security.currency_code
            ),
            Err(_) => println!("{name}: no prices"),
        }
    }
    ExitCode::SUCCESS
}

fn run_strategise(config_path: &Path, asset: Option<&str>) -> ExitCode {
    tracing::info!("loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let setup = build_run_config(&config).and_then(|run_config| {
        let strategies = build_strategies(&run_config)?;
        let adapter = PortfolioPerformanceAdapter::from_file(&run_config.import_path)?;
        let assets = select_assets(&adapter, asset)?;
        fs::create_dir_all(&run_config.report_dir)?;
        Ok((run_config, strategies, adapter, assets))
    });
    let (run_config, strategies, adapter, assets) = match setup {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("{e}");
            return (&e).into();
        }
    };

    tracing::info!(
        assets = assets.len(),
        strategies = strategies.len(),
        report_dir = %run_config.report_dir.display(),
        "running"
    );

    let markers = MarkerFileAdapter::new(run_config.report_dir.clone());
    let csv_reports = CsvReportAdapter::new(run_config.report_dir.clone());
    let reports: Option<&dyn ReportPort> = if run_config.write_reports {
        Some(&csv_reports)
    } else {
        None
    };

    let summary = run_pipeline(&adapter, &strategies, &assets, &markers, reports);
    tracing::info!(
        decided = summary.decided,
        skipped = summary.skipped,
        failed = summary.failed,
        "run complete"
    );
    ExitCode::SUCCESS
}
