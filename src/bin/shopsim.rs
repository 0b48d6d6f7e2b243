use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use u_shopsim::dataset::sample_table;
use u_shopsim::loader::{load_path, load_table};
use u_shopsim::models::ShopFloor;
use u_shopsim::simulator::{
    ReportSummary, ScanMode, SimulationConfig, Simulator, Violation, DEFAULT_LIMIT,
};
use u_shopsim::timing::{assign_times, StartWindow, UniformStarts};

#[derive(Parser)]
#[command(
    name = "shopsim",
    about = "Replay a job-shop schedule with random start times and report machine collisions and omissions",
    version
)]
struct Cli {
    /// JSON table (array of rows); defaults to the embedded sample
    #[arg(long, env = "SHOPSIM_TABLE")]
    table: Option<PathBuf>,

    /// Earliest start tick
    #[arg(long, env = "SHOPSIM_MIN", default_value_t = 100)]
    min: i64,

    /// Latest start tick
    #[arg(long, env = "SHOPSIM_MAX", default_value_t = 1000)]
    max: i64,

    /// Exclusive tick horizon
    #[arg(long, env = "SHOPSIM_LIMIT", default_value_t = DEFAULT_LIMIT)]
    limit: i64,

    /// Seed for start-time generation (random if omitted)
    #[arg(long, env = "SHOPSIM_SEED")]
    seed: Option<u64>,

    /// Event lookup strategy
    #[arg(long, env = "SHOPSIM_SCAN", default_value_t = ScanMode::Indexed)]
    scan: ScanMode,

    /// Output as JSON
    #[arg(long, short = 'j')]
    json: bool,

    /// Exit non-zero if any violation was reported
    #[arg(long, env = "SHOPSIM_STRICT")]
    strict: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    seed: u64,
    summary: ReportSummary,
    violations: &'a [Violation],
    messages: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut floor = load_floor(cli.table.as_deref())?;

    let window = StartWindow::new(cli.min, cli.max).context("invalid start window")?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!(
        seed,
        min = window.min,
        max = window.max,
        "assigning start times"
    );
    assign_times(&mut floor, &mut UniformStarts::seeded(seed), window)
        .context("failed to assign start times")?;

    let config = SimulationConfig::new(cli.limit).with_scan(cli.scan);
    let report = Simulator::new(config).run(&mut floor);
    let summary = report.summary(&floor);

    if cli.json {
        let output = JsonOutput {
            seed,
            summary,
            violations: &report.violations,
            messages: report.render(&floor),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in report.render(&floor) {
            println!("{line}");
        }
        println!(
            "seed={seed} collisions={} omissions={} completed={} unfinished={} makespan={}",
            summary.collisions,
            summary.omissions,
            summary.completed,
            summary.unfinished,
            summary.makespan
        );
    }

    if cli.strict && !report.is_clean() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn load_floor(path: Option<&std::path::Path>) -> Result<ShopFloor> {
    match path {
        Some(path) => load_path(path)
            .with_context(|| format!("failed to load table {}", path.display())),
        None => {
            let floor = load_table(&sample_table())
                .context("embedded sample table is malformed")?;
            Ok(floor)
        }
    }
}
