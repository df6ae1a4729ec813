//! petri CLI: count colony-like blobs in a P6 micrograph.

use clap::Parser;
use petri::io::HeaderTolerance;
use petri::pipeline::{self, OutputPaths, PipelineParams};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "petri")]
#[command(about = "Count colony-like blobs in a P6 micrograph")]
#[command(version)]
struct Cli {
    /// Path to the input image.
    #[arg(default_value = "bactery_colony_input.ppm")]
    input: PathBuf,

    /// Binarization threshold; blurred values below it count as colony.
    #[arg(long, default_value_t = petri::filter::DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Path to write the grayscale image.
    #[arg(long, default_value = "grayscale_output.ppm")]
    grayscale_out: PathBuf,

    /// Path to write the blurred image.
    #[arg(long, default_value = "blured_output.ppm")]
    blurred_out: PathBuf,

    /// Path to write the thresholded image.
    #[arg(long, default_value = "thresh_output.ppm")]
    thresh_out: PathBuf,

    /// Skip `#` comment lines in the input header.
    #[arg(long)]
    skip_comments: bool,

    /// Print the elapsed wall-clock seconds of the run.
    #[arg(long)]
    time: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging();

    let started = Instant::now();
    let params = PipelineParams {
        threshold: cli.threshold,
        tolerance: if cli.skip_comments {
            HeaderTolerance::SkipComments
        } else {
            HeaderTolerance::Strict
        },
    };
    let outputs = OutputPaths {
        grayscale: cli.grayscale_out,
        blurred: cli.blurred_out,
        thresholded: cli.thresh_out,
    };

    match pipeline::run(&cli.input, &outputs, &params) {
        Ok(report) => {
            println!("Number of colonies: {}", report.colony_count);
            if cli.time {
                println!("{:.6}", started.elapsed().as_secs_f64());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Route library diagnostics to stderr; `RUST_LOG` overrides the
/// default `warn` filter.
fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
