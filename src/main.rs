use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};
use vaccine_stock_sim::cli::Cli;
use vaccine_stock_sim::io::demand::DemandSampler;
use vaccine_stock_sim::io::reporting::{prepare_output_dir, CsvSink};
use vaccine_stock_sim::io::sink::{Channel, RowSink};
use vaccine_stock_sim::logging::init_tracing;
use vaccine_stock_sim::model::random::SeededSource;
use vaccine_stock_sim::simulation::config::SimulationConfig;
use vaccine_stock_sim::simulation::engine::{SweepDriver, SweepSinks, SweepSummary};
use vaccine_stock_sim::SimResult;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    println!("=== Vaccine Stock Monte Carlo Simulation ===");

    // 1. SETUP CONFIGURATION
    let config = cli.into_config();

    // 2. RUN BOTH SWEEPS
    let output_dir = config.output_dir.clone();
    let summary = match run(config) {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "simulation failed");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // 3. PRINT STOCK ANALYSIS
    println!("\n=== Stock Analysis ===");
    println!(
        "Lowest simulated mean cost: {:.2} at stock {}",
        summary.best_cost, summary.best_stock
    );
    println!(
        "Newsvendor stock (critical ratio {:.2}): {}",
        summary.critical_ratio, summary.newsvendor_stock
    );
    println!(
        "Rows written: {} cost, {} risk, {} deviation",
        summary.cost_rows, summary.risk_rows, summary.deviation_rows
    );
    println!("\n{}", saved_to(&output_dir));

    ExitCode::SUCCESS
}

fn saved_to(dir: &Path) -> String {
    format!("Results saved to {}", dir.display())
}

fn run(config: SimulationConfig) -> SimResult<SweepSummary> {
    // Reject bad input before touching the filesystem
    config.validate()?;
    prepare_output_dir(&config.output_dir)?;

    let source = SeededSource::from_optional_seed(config.seed);
    info!(seed = ?source.seed(), "random source ready");

    let dir = config.output_dir.clone();
    let mut cost = CsvSink::create(&dir, Channel::Cost)?;
    let mut risk = if config.compute_risk {
        Some(CsvSink::create(&dir, Channel::Risk)?)
    } else {
        None
    };
    let mut deviation = if config.compute_deviation {
        Some(CsvSink::create(&dir, Channel::Deviation)?)
    } else {
        None
    };

    let mut driver = SweepDriver::new(config, DemandSampler::new(source))?;
    driver.run(SweepSinks {
        cost: &mut cost,
        risk: risk.as_mut().map(|sink| sink as &mut dyn RowSink),
        deviation: deviation.as_mut().map(|sink| sink as &mut dyn RowSink),
    })
}
