//! climate-balance entry point: CLI wiring and config-driven calculation.

mod cli;

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use climate_balance::config::{ConfigError, RunConfig};
use climate_balance::errors::BalanceError;
use climate_balance::io::export::{self, Format, Report};
use climate_balance::refdata::RefData;
use climate_balance::{bisko, calculate, compare, indicators};

use crate::cli::{CalcArgs, Cli, Command, CompareArgs, DataArgs};

/// Everything that ends a run with exit code 1.
#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration:\n{0}")]
    Invalid(String),

    #[error(transparent)]
    Balance(#[from] BalanceError),

    #[error("{path}: {source}")]
    Reference {
        path: String,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("climate_balance=info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn load_data(dir: Option<&Path>) -> Result<RefData, BalanceError> {
    match dir {
        Some(dir) => RefData::load(dir),
        None => RefData::builtin(),
    }
}

/// Reference data of a validated configuration with its overrides applied.
fn prepare(cfg: &RunConfig) -> Result<RefData, CliError> {
    let errors = cfg.validate();
    if !errors.is_empty() {
        let lines: Vec<String> = errors.iter().map(ToString::to_string).collect();
        return Err(CliError::Invalid(lines.join("\n")));
    }
    let data = load_data(cfg.data.dir.as_deref())?;
    if cfg.overrides.assumptions.is_empty() {
        Ok(data)
    } else {
        Ok(data.with_assumption_overrides(&cfg.overrides.assumptions)?)
    }
}

fn run_calc(args: &CalcArgs) -> Result<ExitCode, CliError> {
    let cfg = args.to_config()?;
    let data = prepare(&cfg)?;
    let balance = calculate(&data, &cfg.request.ags, cfg.request.year)?;

    let report = Report {
        balance: &balance,
        indicators: cfg.output.indicators.then(|| indicators::calc(&balance)),
        bisko: cfg.output.bisko.then(|| bisko::calc(&balance)),
    };
    // validate() has accepted the format
    let format = Format::parse(&cfg.output.format).unwrap_or(Format::Json);
    match &cfg.output.path {
        Some(path) => {
            export::export(&report, format, path)?;
            info!("balance written to {}", path.display());
        }
        None => {
            let mut buf = Vec::new();
            export::write(&report, format, &mut buf)?;
            io::stdout().lock().write_all(&buf)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_compare(args: &CompareArgs) -> Result<ExitCode, CliError> {
    let cfg = args.request.to_config()?;
    let data = prepare(&cfg)?;
    let balance = calculate(&data, &cfg.request.ags, cfg.request.year)?;

    let text = fs::read_to_string(&args.reference)?;
    let reference = serde_json::from_str(&text).map_err(|source| CliError::Reference {
        path: args.reference.display().to_string(),
        source,
    })?;
    let result = compare::compare(&balance, &reference, args.tolerance);
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &result).map_err(io::Error::from)?;
    writeln!(out)?;

    if result.is_match() {
        info!("balance matches {}", args.reference.display());
        Ok(ExitCode::SUCCESS)
    } else {
        info!(
            differences = result.differences.len(),
            missing_in_reference = result.missing_in_reference.len(),
            missing_in_result = result.missing_in_result.len(),
            "balance deviates from {}",
            args.reference.display()
        );
        Ok(ExitCode::from(2))
    }
}

fn run_list(args: &DataArgs) -> Result<ExitCode, CliError> {
    let data = load_data(args.data_dir.as_deref())?;
    let mut out = io::stdout().lock();
    for m in data.municipalities() {
        writeln!(out, "{}\t{}", m.ags, m.name)?;
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(feature = "api")]
fn run_serve(args: &cli::ServeArgs) -> Result<ExitCode, CliError> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let mut data = load_data(args.data.data_dir.as_deref())?;
    if !args.overrides.is_empty() {
        data = data.with_assumption_overrides(&args.overrides.iter().cloned().collect())?;
    }
    let state = Arc::new(climate_balance::api::AppState { data });
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(climate_balance::api::serve(state, addr))?;
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match &cli.command {
        None => run_calc(&CalcArgs::default()),
        Some(Command::Calc(args)) => run_calc(args),
        Some(Command::Compare(args)) => run_compare(args),
        Some(Command::List(args)) => run_list(args),
        #[cfg(feature = "api")]
        Some(Command::Serve(args)) => run_serve(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
