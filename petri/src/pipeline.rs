//! End-to-end colony counting
//!
//! Runs the four stages in order over one input micrograph:
//! grayscale conversion, zero-border padding, fused blur+threshold,
//! connected-component counting. Stage boundaries are hard
//! synchronization points; each stage fully materializes its buffer
//! before the next starts, because convolution and flood fill need
//! random access to the complete neighborhood.
//!
//! The input is opened and its header validated before any output file
//! is created, so early failures (missing file, malformed header)
//! leave no partially written artifacts behind.

use petri_filter::Kernel;
use petri_io::{HeaderTolerance, PnmHeader};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Tunable parameters of one run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineParams {
    /// Binarization threshold; blurred values strictly below it are
    /// foreground
    pub threshold: u8,
    /// Header comment handling for the input file
    pub tolerance: HeaderTolerance,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            threshold: petri_filter::DEFAULT_THRESHOLD,
            tolerance: HeaderTolerance::Strict,
        }
    }
}

/// Destination paths of the three per-run artifacts.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    /// Grayscale image
    pub grayscale: PathBuf,
    /// Blurred image
    pub blurred: PathBuf,
    /// Binary thresholded image
    pub thresholded: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            grayscale: PathBuf::from("grayscale_output.ppm"),
            blurred: PathBuf::from("blured_output.ppm"),
            thresholded: PathBuf::from("thresh_output.ppm"),
        }
    }
}

impl OutputPaths {
    /// The default artifact names, placed under `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let defaults = Self::default();
        Self {
            grayscale: dir.join(defaults.grayscale),
            blurred: dir.join(defaults.blurred),
            thresholded: dir.join(defaults.thresholded),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineReport {
    /// Input width in pixels
    pub width: usize,
    /// Input height in pixels
    pub height: usize,
    /// Number of 8-connected foreground regions
    pub colony_count: u32,
}

/// Pipeline error, naming the stage or file that failed.
///
/// Every failure is fatal for the run; there are no retries and no
/// partial results.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input file cannot be opened or its header is unusable
    #[error("cannot read input image {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: petri_io::IoError,
    },

    /// An output file cannot be created or written
    #[error("cannot write output image {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: petri_io::IoError,
    },

    /// Grayscale conversion failed
    #[error("grayscale stage failed: {0}")]
    Grayscale(#[from] petri_color::ColorError),

    /// Blur or threshold computation failed
    #[error("blur/threshold stage failed: {0}")]
    Blur(#[from] petri_filter::FilterError),

    /// Component counting failed
    #[error("component counting failed: {0}")]
    Count(#[from] petri_region::RegionError),
}

/// Count colonies in the P6 image at `input`, writing the grayscale,
/// blurred and thresholded artifacts to `outputs`.
///
/// # Errors
///
/// See [`PipelineError`]; the colony count is reported only when every
/// stage and every artifact succeeds.
pub fn run<P: AsRef<Path>>(
    input: P,
    outputs: &OutputPaths,
    params: &PipelineParams,
) -> Result<PipelineReport, PipelineError> {
    let input = input.as_ref();

    let file = File::open(input).map_err(|e| PipelineError::Input {
        path: input.to_path_buf(),
        source: e.into(),
    })?;
    let mut reader = BufReader::new(file);
    let header =
        petri_io::read_header(&mut reader, params.tolerance).map_err(|e| PipelineError::Input {
            path: input.to_path_buf(),
            source: e,
        })?;
    debug!(
        width = header.width,
        height = header.height,
        maxval = header.maxval,
        "input header parsed"
    );

    let mut gray_out = create_artifact(&outputs.grayscale, &header)?;
    let mut blurred_out = create_artifact(&outputs.blurred, &header)?;
    let mut thresh_out = create_artifact(&outputs.thresholded, &header)?;

    let gray = petri_color::gray_from_rgb_stream(
        &mut reader,
        header.width,
        header.height,
        &mut gray_out,
    )?;
    finish_artifact(gray_out, &outputs.grayscale)?;
    debug!("grayscale stage complete");

    let (_blurred, binary) = petri_filter::blur_and_threshold(
        &gray,
        &Kernel::binomial(),
        params.threshold,
        &mut blurred_out,
        &mut thresh_out,
    )?;
    finish_artifact(blurred_out, &outputs.blurred)?;
    finish_artifact(thresh_out, &outputs.thresholded)?;
    debug!("blur+threshold stage complete");

    let colony_count = petri_region::count_components(&binary)?;
    debug!(colony_count, "components counted");

    Ok(PipelineReport {
        width: header.width,
        height: header.height,
        colony_count,
    })
}

fn create_artifact(path: &Path, header: &PnmHeader) -> Result<BufWriter<File>, PipelineError> {
    let as_output = |source: petri_io::IoError| PipelineError::Output {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(|e| as_output(e.into()))?;
    let mut writer = BufWriter::new(file);
    petri_io::write_header(&mut writer, header.width, header.height).map_err(as_output)?;
    Ok(writer)
}

fn finish_artifact(mut writer: BufWriter<File>, path: &Path) -> Result<(), PipelineError> {
    writer.flush().map_err(|e| PipelineError::Output {
        path: path.to_path_buf(),
        source: e.into(),
    })
}
