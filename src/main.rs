//! Edgebench CLI
//!
//! Compares sequential and pipelined execution of a two-stage workload:
//! CPU image preprocessing followed by a simulated DSP inference step.
//! Invoked with no arguments it runs the full benchmark over the default
//! input directory and renders the comparison charts.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use edgebench::backend::{backend_name, default_device, DefaultBackend};
use edgebench::report::charts::render_charts;
use edgebench::report::{read_report, write_report};
use edgebench::utils::logging::{init_logging, LogConfig};
use edgebench::{list_images, ExecutionMode, InferenceEngine, PipelineRunner, DEFAULT_IMAGE_SIZE};

const DEFAULT_IMAGE_DIR: &str = "data/images";
const DEFAULT_REPORT_FILE: &str = "results/metrics.csv";
const DEFAULT_RESULTS_DIR: &str = "results";

/// Sequential vs pipelined benchmark for a CPU+DSP image workload
#[derive(Parser, Debug)]
#[command(name = "edgebench")]
#[command(version)]
#[command(about = "Benchmark sequential vs pipelined preprocessing + inference", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Subcommand to execute; with none, runs the benchmark and plots
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run both benchmark passes and write the CSV report
    Run {
        /// Directory of input images (.jpg/.png)
        #[arg(short, long, default_value = DEFAULT_IMAGE_DIR)]
        image_dir: PathBuf,

        /// Output CSV file
        #[arg(short, long, default_value = DEFAULT_REPORT_FILE)]
        output: PathBuf,

        /// Optional model checkpoint to load (random weights otherwise)
        #[arg(short, long)]
        checkpoint: Option<PathBuf>,

        /// Target preprocessing resolution (square)
        #[arg(long, default_value_t = DEFAULT_IMAGE_SIZE)]
        image_size: u32,

        /// Warmup forward passes before the measured runs
        #[arg(long, default_value = "0")]
        warmup: usize,
    },

    /// Render comparison charts from an existing CSV report
    Plot {
        /// Input CSV file
        #[arg(short, long, default_value = DEFAULT_REPORT_FILE)]
        input: PathBuf,

        /// Output directory for the chart files
        #[arg(short, long, default_value = DEFAULT_RESULTS_DIR)]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    init_logging(&log_config)?;

    match cli.command {
        Some(Commands::Run {
            image_dir,
            output,
            checkpoint,
            image_size,
            warmup,
        }) => run_benchmark(
            &image_dir,
            &output,
            checkpoint.as_deref(),
            image_size,
            warmup,
        ),
        Some(Commands::Plot { input, output_dir }) => plot_report(&input, &output_dir),
        None => {
            run_benchmark(
                Path::new(DEFAULT_IMAGE_DIR),
                Path::new(DEFAULT_REPORT_FILE),
                None,
                DEFAULT_IMAGE_SIZE,
                0,
            )?;
            plot_report(Path::new(DEFAULT_REPORT_FILE), Path::new(DEFAULT_RESULTS_DIR))
        }
    }
}

fn run_benchmark(
    image_dir: &Path,
    output: &Path,
    checkpoint: Option<&Path>,
    image_size: u32,
    warmup: usize,
) -> Result<()> {
    let images = list_images(image_dir)?;
    info!(
        "Found {} images in {} (backend: {})",
        images.len(),
        image_dir.display(),
        backend_name()
    );

    println!("{}", "Loading inference engine...".cyan());
    let engine = InferenceEngine::<DefaultBackend>::new(default_device(), checkpoint)?;

    if warmup > 0 {
        println!("{}", "Running warmup...".yellow());
        engine.warmup(warmup, image_size);
    }

    let runner = PipelineRunner::new(engine).with_target_size(image_size, image_size);

    println!("{}", "Running sequential pipeline...".green().bold());
    let mut records = runner.run(ExecutionMode::Sequential, &images)?;

    println!("{}", "Running pipelined pipeline...".green().bold());
    records.extend(runner.run(ExecutionMode::Pipelined, &images)?);

    write_report(&records, output)?;
    println!("Results saved to {}", output.display());

    Ok(())
}

fn plot_report(input: &Path, output_dir: &Path) -> Result<()> {
    let records = read_report(input)?;
    info!("Read {} records from {}", records.len(), input.display());

    render_charts(&records, output_dir)?;
    println!("Plots saved to {}", output_dir.display());

    Ok(())
}
