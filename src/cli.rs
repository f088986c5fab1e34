//! Command line definition and its mapping onto a [`RunConfig`].

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use climate_balance::config::{ConfigError, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "climate-balance", version)]
#[command(about = "Energy and CO2e balance of a German municipality for 2018 and a target year")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Calculate a balance and write it as JSON or CSV (the default)
    Calc(CalcArgs),
    /// Compare a balance against a reference JSON result
    Compare(CompareArgs),
    /// List the municipalities of the reference dataset
    List(DataArgs),
    /// Serve balances over HTTP
    #[cfg(feature = "api")]
    Serve(ServeArgs),
}

/// Where the reference data comes from.
#[derive(Args, Debug, Default)]
pub struct DataArgs {
    /// Directory with facts.csv, assumptions.csv, municipalities.csv and entries.csv
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Municipality, year and reference data of one run.
#[derive(Args, Debug, Default)]
pub struct RequestArgs {
    /// Official municipality key [default: DG000000]
    #[arg(long)]
    pub ags: Option<String>,

    /// Target year [default: 2035]
    #[arg(long)]
    pub year: Option<i32>,

    /// TOML run configuration; flags given here take precedence
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub config: Option<PathBuf>,

    /// Built-in run configuration (national_2035, national_2040, city_2035)
    #[arg(long)]
    pub preset: Option<String>,

    #[command(flatten)]
    pub data: DataArgs,

    /// Override an assumption, e.g. `--set Ass_E_P_renew_loss_brutto=0.05`
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_override)]
    pub overrides: Vec<(String, f64)>,
}

#[derive(Args, Debug, Default)]
pub struct CalcArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Output format
    #[arg(long, value_parser = ["json", "csv"])]
    pub format: Option<String>,

    /// Output file; stdout otherwise
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Append the build-rate indicators
    #[arg(long)]
    pub indicators: bool,

    /// Append the BISKO household balance
    #[arg(long)]
    pub bisko: bool,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Reference result in the JSON layout of `calc`
    pub reference: PathBuf,

    #[command(flatten)]
    pub request: RequestArgs,

    /// Relative tolerance per value
    #[arg(long, default_value = "1e-6")]
    pub tolerance: f64,
}

#[cfg(feature = "api")]
#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Override an assumption for every request
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_override)]
    pub overrides: Vec<(String, f64)>,

    /// API server port
    #[arg(long, default_value = "3000")]
    pub port: u16,
}

fn parse_override(s: &str) -> Result<(String, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got \"{s}\""))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for {key}: {e}"))?;
    Ok((key.trim().to_string(), value))
}

impl RequestArgs {
    /// Configuration file or preset with the command line flags applied.
    pub fn to_config(&self) -> Result<RunConfig, ConfigError> {
        let mut cfg = match (&self.config, &self.preset) {
            (Some(path), _) => RunConfig::from_toml_file(path)?,
            (None, Some(name)) => RunConfig::from_preset(name)?,
            (None, None) => RunConfig::default(),
        };
        if let Some(ags) = &self.ags {
            cfg.request.ags.clone_from(ags);
        }
        if let Some(year) = self.year {
            cfg.request.year = year;
        }
        if let Some(dir) = &self.data.data_dir {
            cfg.data.dir = Some(dir.clone());
        }
        cfg.overrides.assumptions.extend(self.overrides.iter().cloned());
        Ok(cfg)
    }
}

impl CalcArgs {
    pub fn to_config(&self) -> Result<RunConfig, ConfigError> {
        let mut cfg = self.request.to_config()?;
        if let Some(format) = &self.format {
            cfg.output.format.clone_from(format);
        }
        if let Some(out) = &self.out {
            cfg.output.path = Some(out.clone());
        }
        cfg.output.indicators |= self.indicators;
        cfg.output.bisko |= self.bisko;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Option<Cli> {
        Cli::try_parse_from(std::iter::once("climate-balance").chain(args.iter().copied())).ok()
    }

    fn calc_config(args: &[&str]) -> Option<RunConfig> {
        match parse(args)?.command? {
            Command::Calc(calc) => calc.to_config().ok(),
            _ => None,
        }
    }

    #[test]
    fn no_subcommand_means_default_calc() {
        let cli = parse(&[]);
        assert!(cli.is_some_and(|c| c.command.is_none()));
        let cfg = CalcArgs::default().to_config().ok();
        assert_eq!(cfg.as_ref().map(|c| &*c.request.ags), Some("DG000000"));
        assert_eq!(cfg.as_ref().map(|c| c.request.year), Some(2035));
    }

    #[test]
    fn flags_override_the_preset() {
        let cfg = calc_config(&[
            "calc", "--preset", "city_2035", "--year", "2040", "--format", "csv", "--bisko",
        ]);
        assert_eq!(cfg.as_ref().map(|c| &*c.request.ags), Some("11000000"));
        assert_eq!(cfg.as_ref().map(|c| c.request.year), Some(2040));
        assert_eq!(cfg.as_ref().map(|c| &*c.output.format), Some("csv"));
        assert_eq!(cfg.as_ref().map(|c| c.output.indicators), Some(true));
        assert_eq!(cfg.as_ref().map(|c| c.output.bisko), Some(true));
    }

    #[test]
    fn set_collects_assumption_overrides() {
        let cfg = calc_config(&["calc", "--set", "Ass_A=0.5", "--set", "Ass_B = -1e-3"]);
        let overrides = cfg.map(|c| c.overrides.assumptions).unwrap_or_default();
        assert_eq!(overrides.get("Ass_A"), Some(&0.5));
        assert_eq!(overrides.get("Ass_B"), Some(&-0.001));
    }

    #[test]
    fn malformed_flags_are_rejected() {
        assert!(parse(&["calc", "--set", "Ass_A"]).is_none());
        assert!(parse(&["calc", "--set", "Ass_A=x"]).is_none());
        assert!(parse(&["calc", "--format", "xlsx"]).is_none());
        assert!(parse(&["calc", "--config", "a.toml", "--preset", "national_2035"]).is_none());
    }

    #[test]
    fn compare_takes_a_reference_file() {
        let cli = parse(&["compare", "ref.json", "--tolerance", "0.01"]);
        let Some(Command::Compare(args)) = cli.and_then(|c| c.command) else {
            panic!("expected compare");
        };
        assert_eq!(args.reference, PathBuf::from("ref.json"));
        assert_eq!(args.tolerance, 0.01);
    }
}
