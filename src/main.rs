// Assembly Line Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/assembly-line-sim -1 --seed 42
// ```
//
// Or with every experiment and JSON output:
//
// ```console
// $ ./target/release/assembly-line-sim --output-format json --verbose
// ```

use anyhow::Context;
use assembly_line_sim::simulation::{
    render_summary, ExperimentOrchestrator, LoggingConfig, SimulationError,
};
use assembly_line_sim::types::{CliArgs, ExperimentConfig, ExperimentKind, OutputFormat};
use clap::error::ErrorKind;
use clap::Parser;
use std::process;
use tracing::{error, info};

fn main() {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = e.print();
                return;
            }
            _ => {
                // clap's message already carries the usage line
                let _ = e.print();
                process::exit(1);
            }
        },
    };

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match ExperimentConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let _logging_guard = match LoggingConfig::from_flags(args.verbose, args.debug).init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Assembly Line Simulator");

    if let Err(e) = run(args) {
        match e.downcast_ref::<SimulationError>() {
            Some(sim) => error!(category = sim.category(), "Simulator failed: {:#}", e),
            None => error!("Simulator failed: {:#}", e),
        }
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Assembly Line Simulator completed successfully");
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let experiments = args.selected_experiments();
    let dry_run = args.dry_run;

    let config =
        ExperimentConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    let format = config.get_output_format().map_err(anyhow::Error::msg)?;

    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - experiments will not be executed.");
        print_configuration_summary(&config, &experiments);
        return Ok(());
    }

    if format == OutputFormat::Text {
        print_startup_banner(&config, &experiments);
    }

    let mut orchestrator =
        ExperimentOrchestrator::new(config).context("Failed to initialize experiments")?;
    let summary = orchestrator.run(&experiments)?;

    match format {
        OutputFormat::Text => print!("{}", render_summary(&summary)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialize results")?
        ),
    }

    if !summary.is_complete() {
        anyhow::bail!(
            "{} of {} experiments failed",
            summary.failures.len(),
            summary.experiments.len()
        );
    }

    Ok(())
}

/// Print startup banner with experiment information
fn print_startup_banner(config: &ExperimentConfig, experiments: &[ExperimentKind]) {
    eprintln!("Assembly Line Simulator v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("========================================");
    for kind in experiments {
        eprintln!("  {}", kind);
    }
    match config.seed {
        Some(seed) => eprintln!("Seed: {}", seed),
        None => eprintln!("Seed: drawn from entropy"),
    }
    eprintln!();
}

/// Print configuration summary for dry run mode
fn print_configuration_summary(config: &ExperimentConfig, experiments: &[ExperimentKind]) {
    eprintln!("\nConfiguration Summary:");
    eprintln!("=====================");
    let selected: Vec<String> = experiments.iter().map(|k| k.number().to_string()).collect();
    eprintln!("Experiments: {}", selected.join(", "));
    eprintln!("Machines per stage: {}", config.machine_count);
    eprintln!("Averaging runs: {}", config.averaging_runs);
    eprintln!("Annual target: {} units (step {})", config.annual_target, config.annual_step);
    eprintln!(
        "Growth plan: {:.2}% over {} years (step {})",
        config.growth_rate * 100.0,
        config.growth_years,
        config.growth_step
    );
    eprintln!("Search iteration cap: {}", config.max_search_iterations);
    eprintln!("Output format: {}", config.output_format);
    if let Some(seed) = config.seed {
        eprintln!("Random seed: {}", seed);
    }
}
