//! # Evaluation Subcommands
//!
//! - `hos`: Hours-of-Service for a driver and candidate route.
//! - `clearinghouse`: standalone Clearinghouse check.
//! - `leasing`: Truth-in-Leasing check.
//! - `assign`: the full assignment gate.
//! - `status`: Clearinghouse check plus the driver status it implies.
//!
//! Every handler prints one report to stdout and returns the exit code.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use haul_compliance::{
    status_after_clearinghouse, validate_clearinghouse_compliance, validate_driver_assignment,
    validate_hos_compliance, validate_leasing_compliance, Driver, Route, Shipment,
    StatusTransition, ValidationResult,
};

use crate::records::load_record;
use crate::report::{Inputs, Report};
use crate::{Settings, EXIT_REJECTED, EXIT_VALID};

/// Arguments for commands that evaluate a driver alone.
#[derive(Args, Debug)]
pub struct DriverArgs {
    /// Driver snapshot (JSON or YAML).
    #[arg(long)]
    pub driver: PathBuf,
}

/// Arguments for the `hos` subcommand.
#[derive(Args, Debug)]
pub struct HosArgs {
    /// Driver snapshot (JSON or YAML).
    #[arg(long)]
    pub driver: PathBuf,
    /// Route estimate (JSON or YAML).
    #[arg(long)]
    pub route: PathBuf,
}

/// Arguments for the `assign` subcommand.
#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Driver snapshot (JSON or YAML).
    #[arg(long)]
    pub driver: PathBuf,
    /// Shipment snapshot (JSON or YAML).
    #[arg(long)]
    pub shipment: PathBuf,
    /// Route estimate (JSON or YAML).
    #[arg(long)]
    pub route: PathBuf,
}

/// Execute `haul hos`.
pub fn run_hos(args: &HosArgs, settings: &Settings) -> Result<u8> {
    let driver: Driver = load_record("driver", &args.driver)?;
    let route: Route = load_record("route", &args.route)?;
    let result = validate_hos_compliance(&driver, &route, &settings.context()?);
    let inputs = Inputs {
        driver: &driver,
        shipment: None,
        route: Some(&route),
        policy: &settings.policy,
        as_of: settings.as_of,
    };
    emit("hos", &inputs, &result, None, settings)
}

/// Execute `haul clearinghouse`.
pub fn run_clearinghouse(args: &DriverArgs, settings: &Settings) -> Result<u8> {
    let driver: Driver = load_record("driver", &args.driver)?;
    let result = validate_clearinghouse_compliance(&driver, &settings.context()?);
    emit("clearinghouse", &driver_only(&driver, settings), &result, None, settings)
}

/// Execute `haul leasing`.
pub fn run_leasing(args: &DriverArgs, settings: &Settings) -> Result<u8> {
    let driver: Driver = load_record("driver", &args.driver)?;
    let result = validate_leasing_compliance(&driver, &settings.context()?);
    emit("leasing", &driver_only(&driver, settings), &result, None, settings)
}

/// Execute `haul assign`.
pub fn run_assign(args: &AssignArgs, settings: &Settings) -> Result<u8> {
    let driver: Driver = load_record("driver", &args.driver)?;
    let shipment: Shipment = load_record("shipment", &args.shipment)?;
    let route: Route = load_record("route", &args.route)?;
    let result = validate_driver_assignment(&driver, &shipment, &route, &settings.context()?);
    let inputs = Inputs {
        driver: &driver,
        shipment: Some(&shipment),
        route: Some(&route),
        policy: &settings.policy,
        as_of: settings.as_of,
    };
    emit("assign", &inputs, &result, None, settings)
}

/// Execute `haul status`.
///
/// Prints the status the driver must hold after the Clearinghouse check.
/// The record file is not modified.
pub fn run_status(args: &DriverArgs, settings: &Settings) -> Result<u8> {
    let driver: Driver = load_record("driver", &args.driver)?;
    let result = validate_clearinghouse_compliance(&driver, &settings.context()?);
    let transition = status_after_clearinghouse(driver.status, &result);
    emit(
        "status",
        &driver_only(&driver, settings),
        &result,
        Some(transition),
        settings,
    )
}

fn driver_only<'a>(driver: &'a Driver, settings: &'a Settings) -> Inputs<'a> {
    Inputs {
        driver,
        shipment: None,
        route: None,
        policy: &settings.policy,
        as_of: settings.as_of,
    }
}

fn emit(
    check: &'static str,
    inputs: &Inputs<'_>,
    result: &ValidationResult,
    status: Option<StatusTransition>,
    settings: &Settings,
) -> Result<u8> {
    let report = Report {
        check,
        driver_id: &inputs.driver.driver_id,
        shipment_id: inputs.shipment.map(|s| &s.shipment_id),
        as_of: settings.as_of,
        input_digest: inputs.digest()?.to_string(),
        result,
        status,
    };
    let rendered = report.render(settings.format)?;
    println!("{}", rendered.trim_end());
    Ok(exit_code(result))
}

/// Exit code for a validation result.
pub fn exit_code(result: &ValidationResult) -> u8 {
    if result.valid() {
        EXIT_VALID
    } else {
        EXIT_REJECTED
    }
}
