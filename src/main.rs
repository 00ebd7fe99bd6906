//! Load-balancing network simulator CLI
//!
//! Routes a Poisson arrival stream across parallel finite-buffer stations and prints one summary
//! line: `served dropped last_event_time avg_wait avg_service`.
//!
//! # Example
//!
//! ```bash
//! # Two stations, 30/70 split, lambda = 2, waiting rooms of 5 and 10
//! lbsim 1000 2 0.3 0.7 2.0 5 10 1.0 1.5
//!
//! # Same run, reproducible, with per-station lines
//! lbsim --seed 42 --per-station 1000 2 0.3 0.7 2.0 5 10 1.0 1.5
//! ```

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use lbsim::{driver::USAGE, Config, Report};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lbsim", version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Simulation parameters: <Time> <M> <P1..PM> <Lambda> <Q1..QM> <Mu1..MuM>
    #[arg(value_name = "VALUES", num_args = 0.., conflicts_with = "config")]
    values: Vec<String>,

    /// Read the configuration from a JSON file instead of positional values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible results. When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Print one line per station after the summary
    #[arg(long)]
    per_station: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout only carries the results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let status = execute(&args, &mut io::stdout().lock(), &mut io::stderr());
    ExitCode::from(status)
}

/// Runs the CLI and returns the process exit status. Configuration errors are followed by the
/// usage line.
fn execute(args: &Args, out: &mut impl Write, err: &mut impl Write) -> u8 {
    match try_execute(args, out) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "error: {e:#}");
            if e.is::<lbsim::Error>() {
                let _ = writeln!(err, "Usage: lbsim [OPTIONS] {USAGE}");
            }
            1
        }
    }
}

fn try_execute(args: &Args, out: &mut impl Write) -> anyhow::Result<()> {
    let cfg = load_config(args)?;
    let report = lbsim::run(cfg)?;
    print_report(args, &report, out)
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut cfg = match &args.config {
        Some(path) => lbsim::read_config(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?,
        None => Config::from_positional(&args.values)?,
    };
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    Ok(cfg)
}

fn print_report(args: &Args, report: &Report, out: &mut impl Write) -> anyhow::Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(report).context("failed to encode report")?;
        writeln!(out, "{json}")?;
        return Ok(());
    }
    writeln!(out, "{}", report.summary)?;
    if args.per_station {
        for station in &report.stations {
            writeln!(out, "{station}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(argv: &[&str]) -> (u8, String, String) {
        let args = Args::try_parse_from(std::iter::once("lbsim").chain(argv.iter().copied()))
            .expect("valid command line");
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let status = execute(&args, &mut out, &mut err);
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn wrong_argument_count_prints_usage() {
        let (status, out, err) = cli(&["10", "2", "0.5", "0.5"]);
        assert_eq!(status, 1);
        assert!(out.is_empty());
        assert!(err.contains("error: expected 9 arguments, found 4"), "{err}");
        assert!(err.contains(&format!("Usage: lbsim [OPTIONS] {USAGE}")), "{err}");
    }

    #[test]
    fn invalid_rate_prints_usage() {
        let (status, out, err) = cli(&["10", "1", "1.0", "1.0", "2", "0"]);
        assert_eq!(status, 1);
        assert!(out.is_empty());
        assert!(err.contains("service rate of station 0"), "{err}");
        assert!(err.contains("Usage:"), "{err}");
    }

    #[test]
    fn missing_config_file() {
        let (status, _, err) = cli(&["--config", "/nonexistent/lbsim.json"]);
        assert_eq!(status, 1);
        assert!(err.contains("failed to read config"), "{err}");
    }

    #[test]
    fn summary_line() {
        let (status, out, err) = cli(&["--seed", "1", "100", "1", "1.0", "0.5", "4", "1.0"]);
        assert_eq!(status, 0, "{err}");
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 1);
        let fields = lines[0].split(' ').collect::<Vec<_>>();
        assert_eq!(fields.len(), 5);
        assert!(fields[0].parse::<u64>().is_ok());
        assert!(fields[1].parse::<u64>().is_ok());
        for real in &fields[2..] {
            assert_eq!(real.split('.').nth(1).map(str::len), Some(4), "{real}");
        }
    }

    #[test]
    fn per_station_and_json() {
        let argv = ["--seed", "1", "50", "2", "0.5", "0.5", "1.0", "1", "1", "1.0", "1.0"];
        let (status, out, _) = cli(&[&["--per-station"][..], &argv[..]].concat());
        assert_eq!(status, 0);
        assert_eq!(out.lines().count(), 3);
        assert!(out.lines().nth(2).unwrap().starts_with("station 1:"));

        let (status, out, _) = cli(&[&["--json"][..], &argv[..]].concat());
        assert_eq!(status, 0);
        let report: Report = serde_json::from_str(&out).unwrap();
        assert_eq!(report.seed, 1);
        assert_eq!(report.stations.len(), 2);
    }

    #[test]
    fn config_conflicts_with_values() {
        let args = Args::try_parse_from(["lbsim", "--config", "run.json", "10"]);
        assert!(args.is_err());
    }
}
