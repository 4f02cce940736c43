use clap::Parser;
use percolation_core::{run, EmptyGridPolicy, SweepConfig, SweepReport};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Forest-fire percolation sweep with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "percolation-demo")]
#[command(about = "Forest-fire site-percolation Monte Carlo sweep", long_about = None)]
struct Args {
    /// Grid rows
    #[arg(long, default_value_t = 100)]
    rows: usize,

    /// Grid columns
    #[arg(long, default_value_t = 100)]
    cols: usize,

    /// Trials per density value
    #[arg(short, long, default_value_t = 50)]
    trials: usize,

    /// Lowest tree density in percent
    #[arg(long, default_value_t = 1)]
    density_start: u32,

    /// Highest tree density in percent (inclusive)
    #[arg(long, default_value_t = 99)]
    density_stop: u32,

    /// Density step in percent
    #[arg(long, default_value_t = 1)]
    density_step: u32,

    /// Random seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Abort on the first failed trial instead of excluding it
    #[arg(long)]
    strict: bool,

    /// Drop empty-grid trials instead of recording 0% burned
    #[arg(long)]
    exclude_empty: bool,

    /// Write the full report (config + raw samples) as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the reduced density table as CSV
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.density_start > args.density_stop || args.density_stop > 100 {
        eprintln!(
            "Invalid density range {}..={} (expected start <= stop <= 100)",
            args.density_start, args.density_stop
        );
        std::process::exit(1);
    }
    if args.density_step == 0 {
        eprintln!("Density step must be positive");
        std::process::exit(1);
    }

    let densities: Vec<f64> = (args.density_start..=args.density_stop)
        .step_by(args.density_step as usize)
        .map(|p| f64::from(p) / 100.0)
        .collect();

    let config = SweepConfig {
        densities,
        trials_per_density: args.trials,
        rows: args.rows,
        cols: args.cols,
        seed: args.seed,
        strict: args.strict,
        empty_grid_policy: if args.exclude_empty {
            EmptyGridPolicy::Exclude
        } else {
            EmptyGridPolicy::SentinelZero
        },
    };

    println!("=== Forest-Fire Percolation Sweep ===\n");
    println!(
        "Grid: {}x{}, {} trials per density, densities {}..={}% step {}%, seed {}",
        config.rows,
        config.cols,
        config.trials_per_density,
        args.density_start,
        args.density_stop,
        args.density_step,
        config.seed
    );
    println!();

    let result = match run(&config) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Sweep failed: {e}");
            std::process::exit(1);
        }
    };

    println!("Density(%) | Mean Burned(%) | Std Dev | Failed");
    println!("-----------|----------------|---------|-------");
    for level in &result.levels {
        println!(
            "{:10.0} | {:14.2} | {:7.2} | {:6}",
            level.density * 100.0,
            level.mean,
            level.std_dev,
            level.failed_trials
        );
    }

    // First density whose mean crosses half the forest, a rough read on the
    // percolation threshold.
    let threshold = result
        .levels
        .iter()
        .find(|level| level.mean >= 50.0)
        .map(|level| level.density);

    println!("\n=== Sweep Complete ===");
    println!("Densities swept: {}", result.levels.len());
    println!("Total failed trials: {}", result.total_failed_trials());
    if let Some(density) = threshold {
        println!("Mean burned area first exceeds 50% at density {:.0}%", density * 100.0);
    }

    let report = SweepReport::new(config, result);

    if let Some(path) = &args.output {
        match report.save(path) {
            Ok(()) => println!("Report saved to {}", path.display()),
            Err(e) => {
                eprintln!("Failed to save report: {e}");
                std::process::exit(1);
            }
        }
    }

    if let Some(path) = &args.csv {
        match report.write_csv(path) {
            Ok(()) => println!("Density table saved to {}", path.display()),
            Err(e) => {
                eprintln!("Failed to save density table: {e}");
                std::process::exit(1);
            }
        }
    }
}
