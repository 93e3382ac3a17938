//! # Loadline CLI
//!
//! Terminal front end for the facility load and emission calculations.
//! Reads a worksheet file (JSON or TOML) or asks for the values line by line,
//! then prints the results as text or JSON.
//!
//! ```text
//! calc_cli load --input shop.toml
//! calc_cli emission --coal 1096363 --oil 70945 --gas 84762 --json
//! calc_cli report --input shop.json
//! ```

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use calc_core::equations::generate_equations_markdown;
use calc_core::errors::CalcError;
use calc_core::reference::FuelKind;
use calc_core::{Worksheet, WorksheetFormat};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

mod config;
mod logging;
mod prompt;
mod render;

use config::Settings;
use prompt::Prompter;

#[derive(Debug, Parser)]
#[command(
    name = "calc_cli",
    author,
    version,
    about = "Facility electrical load and particulate emission calculator",
    long_about = None
)]
struct Cli {
    /// Settings file (defaults to ./loadline.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Design load of the equipment by the method of ordered diagrams
    Load(LoadArgs),
    /// Gross particulate emission of the burned fuel
    Emission(EmissionArgs),
    /// Both calculations for a worksheet file
    Report(ReportArgs),
    /// Print the fuel reference table
    Fuels(OutputArgs),
    /// Print every formula as markdown
    Equations,
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct LoadArgs {
    /// Worksheet file; prompts for every field when omitted
    #[arg(long, short, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Statistical load coefficient Kr
    #[arg(long)]
    kr: Option<f64>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct EmissionArgs {
    /// Worksheet file
    #[arg(long, short, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Burned coal, t
    #[arg(long, value_name = "T")]
    coal: Option<String>,

    /// Burned fuel oil, t
    #[arg(long, value_name = "T")]
    oil: Option<String>,

    /// Burned natural gas, m³
    #[arg(long, value_name = "M3")]
    gas: Option<String>,

    /// Ash collector efficiency (0..1)
    #[arg(long, value_name = "E")]
    filter_efficiency: Option<f64>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct ReportArgs {
    /// Worksheet file
    #[arg(long, short, value_name = "FILE")]
    input: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(calc_error) = e.downcast_ref::<CalcError>() {
                if let Ok(json) = serde_json::to_string_pretty(calc_error) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    logging::init(settings.log_format);
    tracing::debug!(?settings, config = ?cli.config, "settings loaded");

    match cli.command {
        Commands::Load(args) => run_load(args, &settings),
        Commands::Emission(args) => run_emission(args, &settings),
        Commands::Report(args) => run_report(args, &settings),
        Commands::Fuels(args) => run_fuels(args, &settings),
        Commands::Equations => {
            print!("{}", generate_equations_markdown());
            Ok(())
        }
    }
}

fn run_load(args: LoadArgs, settings: &Settings) -> Result<()> {
    let mut worksheet = match &args.input {
        Some(path) => read_worksheet(path, settings)?,
        None => {
            let mut worksheet = seeded_worksheet(settings);
            stdin_prompter().fill_rows(&mut worksheet.equipment)?;
            worksheet
        }
    };
    if let Some(kr) = args.kr {
        worksheet.settings.kr = kr;
    }
    worksheet.settings.validate()?;

    let result = worksheet.evaluate().load;
    tracing::debug!(items = result.items.len(), active_load = result.active_load, "load aggregated");

    emit(&result, args.output.json, render::load)
}

fn run_emission(args: EmissionArgs, settings: &Settings) -> Result<()> {
    let flags = [
        (FuelKind::Coal, args.coal),
        (FuelKind::FuelOil, args.oil),
        (FuelKind::NaturalGas, args.gas),
    ];
    let any_flag = flags.iter().any(|(_, amount)| amount.is_some());

    let mut worksheet = match &args.input {
        Some(path) => read_worksheet(path, settings)?,
        None => seeded_worksheet(settings),
    };
    if args.input.is_none() && !any_flag {
        stdin_prompter().fill_fuels(&mut worksheet.fuels)?;
    }
    for (kind, amount) in flags {
        if let Some(text) = amount {
            worksheet.fuels.set_amount(kind, text);
        }
    }
    if let Some(efficiency) = args.filter_efficiency {
        worksheet.settings.filter_efficiency = efficiency;
    }
    worksheet.settings.validate()?;

    let result = worksheet.evaluate().emissions;
    tracing::debug!(fuels = result.fuels.len(), total_t = result.total_t, "emissions estimated");

    emit(&result, args.output.json, render::emissions)
}

fn run_report(args: ReportArgs, settings: &Settings) -> Result<()> {
    let worksheet = read_worksheet(&args.input, settings)?;
    worksheet.settings.validate()?;

    let report = worksheet.evaluate();
    tracing::info!(summary = %report.summary(), "worksheet evaluated");

    emit(&report, args.output.json, render::report)
}

fn run_fuels(args: OutputArgs, settings: &Settings) -> Result<()> {
    let table = settings.global_settings().fuel_table();
    if args.json {
        println!("{}", serde_json::to_string_pretty(table.profiles())?);
    } else {
        print!("{}", render::fuels(&table, settings.filter_efficiency)?);
    }
    Ok(())
}

/// Empty reference-shop worksheet carrying the configured settings
fn seeded_worksheet(settings: &Settings) -> Worksheet {
    Worksheet {
        settings: settings.global_settings(),
        ..Worksheet::default()
    }
}

/// Read a worksheet file; settings it leaves out come from the config layers
fn read_worksheet(path: &Path, settings: &Settings) -> Result<Worksheet> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let format = WorksheetFormat::from_path(path);
    tracing::debug!(path = %path.display(), ?format, "reading worksheet");

    let worksheet = Worksheet::from_str_as(&contents, format, &settings.global_settings())
        .with_context(|| format!("failed to load worksheet {}", path.display()))?;
    tracing::debug!(
        rows = worksheet.equipment.len(),
        filled = worksheet.filled_row_count(),
        "worksheet loaded"
    );
    Ok(worksheet)
}

fn stdin_prompter() -> Prompter<io::StdinLock<'static>, io::Stderr> {
    Prompter::new(io::stdin().lock(), io::stderr())
}

fn emit<T: Serialize>(value: &T, json: bool, text: fn(&T) -> Result<String, fmt::Error>) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(value)?)?;
    } else {
        write!(stdout, "{}", text(value)?)?;
    }
    Ok(())
}
