//! # haul CLI entry point
//!
//! Parses command-line arguments, resolves shared settings, and dispatches
//! to the subcommand handlers in `haul_cli::check`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use haul_cli::check::{
    run_assign, run_clearinghouse, run_hos, run_leasing, run_status, AssignArgs, DriverArgs,
    HosArgs,
};
use haul_cli::report::OutputFormat;
use haul_cli::{Settings, EXIT_ERROR};
use haul_core::Timestamp;

/// Dispatch compliance checks for motor carriers.
///
/// Evaluates driver, shipment and route snapshots against the federal
/// Hours-of-Service, Drug & Alcohol Clearinghouse and Truth-in-Leasing
/// rules. Exits 0 when the check passes, 2 when it rejects, 1 on error.
#[derive(Parser, Debug)]
#[command(name = "haul", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Carrier compliance policy (YAML or JSON). Federal limits when absent.
    #[arg(long, global = true, env = "HAUL_POLICY")]
    policy: Option<PathBuf>,

    /// Evaluation instant (RFC 3339). Defaults to now.
    #[arg(long, global = true)]
    as_of: Option<Timestamp>,

    /// Output format.
    #[arg(long, value_enum, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Hours-of-Service check for a driver on a candidate route.
    Hos(HosArgs),

    /// Clearinghouse query and violation check.
    Clearinghouse(DriverArgs),

    /// Truth-in-Leasing agreement check.
    Leasing(DriverArgs),

    /// Full assignment gate: status, Clearinghouse, HOS and leasing.
    Assign(AssignArgs),

    /// Driver status implied by the Clearinghouse check.
    Status(DriverArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "haul starting");

    let result = Settings::resolve(cli.policy.as_deref(), cli.as_of, cli.format).and_then(
        |settings| match &cli.command {
            Commands::Hos(args) => run_hos(args, &settings),
            Commands::Clearinghouse(args) => run_clearinghouse(args, &settings),
            Commands::Leasing(args) => run_leasing(args, &settings),
            Commands::Assign(args) => run_assign(args, &settings),
            Commands::Status(args) => run_status(args, &settings),
        },
    );

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_hos() {
        let cli =
            Cli::try_parse_from(["haul", "hos", "--driver", "d.json", "--route", "r.yaml"]).unwrap();
        if let Commands::Hos(args) = cli.command {
            assert_eq!(args.driver, PathBuf::from("d.json"));
            assert_eq!(args.route, PathBuf::from("r.yaml"));
        } else {
            panic!("expected hos");
        }
    }

    #[test]
    fn cli_parse_assign_requires_all_records() {
        assert!(Cli::try_parse_from(["haul", "assign", "--driver", "d.json"]).is_err());
        let cli = Cli::try_parse_from([
            "haul",
            "assign",
            "--driver",
            "d.json",
            "--shipment",
            "s.json",
            "--route",
            "r.json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Assign(_)));
    }

    #[test]
    fn cli_parse_driver_only_commands() {
        for cmd in ["clearinghouse", "leasing", "status"] {
            let cli = Cli::try_parse_from(["haul", cmd, "--driver", "d.json"]).unwrap();
            assert!(matches!(
                cli.command,
                Commands::Clearinghouse(_) | Commands::Leasing(_) | Commands::Status(_)
            ));
        }
    }

    #[test]
    fn cli_parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "haul",
            "leasing",
            "--driver",
            "d.json",
            "--format",
            "json",
            "--as-of",
            "2026-03-01T07:00:00-05:00",
            "--policy",
            "carrier.yaml",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.as_of, Some(Timestamp::parse("2026-03-01T12:00:00Z").unwrap()));
        assert_eq!(cli.policy, Some(PathBuf::from("carrier.yaml")));
    }

    #[test]
    fn cli_parse_rejects_bad_as_of() {
        let result = Cli::try_parse_from([
            "haul", "--as-of", "yesterday", "leasing", "--driver", "d.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["haul", "leasing", "--driver", "d"]).unwrap();
        assert_eq!(cli0.verbose, 0);
        let cli2 = Cli::try_parse_from(["haul", "-vv", "leasing", "--driver", "d"]).unwrap();
        assert_eq!(cli2.verbose, 2);
    }

    #[test]
    fn cli_parse_defaults_to_text() {
        let cli = Cli::try_parse_from(["haul", "status", "--driver", "d.json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["haul"]).is_err());
    }
}
