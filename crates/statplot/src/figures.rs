//! Compute, render and summarize each figure

use std::fmt;
use std::path::{Path, PathBuf};

use statplot_core::climate::load_observations;
use statplot_core::{
    ClimateError, CurveShift, FourDistributions, ParameterError, RecordAnalysis, SigmaFigure,
    SigmaParams,
};

use crate::config::RenderConfig;
use crate::render::{ClimatePlot, RenderError, render_figure};
use crate::summary::{
    ClimateStatistics, DistributionStatistics, SigmaStatistics, Summary, SummaryError,
};

#[derive(Debug)]
pub enum FigureError {
    Parameters(ParameterError),
    Climate(ClimateError),
    Render(RenderError),
    Summary(SummaryError),
}

impl fmt::Display for FigureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FigureError::Parameters(e) => write!(f, "invalid parameters: {e}"),
            FigureError::Climate(e) => write!(f, "climate data: {e}"),
            FigureError::Render(e) => e.fmt(f),
            FigureError::Summary(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for FigureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FigureError::Parameters(e) => Some(e),
            FigureError::Climate(e) => Some(e),
            FigureError::Render(e) => Some(e),
            FigureError::Summary(e) => Some(e),
        }
    }
}

impl From<ParameterError> for FigureError {
    fn from(e: ParameterError) -> Self {
        FigureError::Parameters(e)
    }
}

impl From<ClimateError> for FigureError {
    fn from(e: ClimateError) -> Self {
        FigureError::Climate(e)
    }
}

impl From<RenderError> for FigureError {
    fn from(e: RenderError) -> Self {
        FigureError::Render(e)
    }
}

impl From<SummaryError> for FigureError {
    fn from(e: SummaryError) -> Self {
        FigureError::Summary(e)
    }
}

/// Files produced by one figure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub image: PathBuf,
    pub summary: Option<PathBuf>,
}

/// Output options shared by every figure of a run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: RenderConfig,
    pub write_summary: bool,
}

pub fn sigma(params: SigmaParams, options: &RunOptions) -> Result<Written, FigureError> {
    let figure = SigmaFigure::compute(params)?;
    for curve in &figure.curves {
        tracing::debug!(
            curve = %curve.shift.label(params.shift),
            mean = curve.mean,
            below_lower = curve.tails.below_lower,
            above_upper = curve.tails.above_upper,
            "tail probabilities"
        );
    }
    if let Some(unshifted) = figure.curve(CurveShift::Unshifted) {
        tracing::info!(
            total = unshifted.tails.total(),
            "unshifted mass beyond ±{}σ",
            params.limit
        );
    }

    let image = render_figure(&figure, &options.config.out_dir, &options.config.sigma)?;
    let summary = options
        .write_summary
        .then(|| Summary::new(&image, SigmaStatistics::from(&figure)).write())
        .transpose()?;
    Ok(Written { image, summary })
}

pub fn distributions(seed: u64, options: &RunOptions) -> Result<Written, FigureError> {
    let draws = FourDistributions::draw(seed)?;
    for series in &draws.series {
        tracing::debug!(
            series = %series.label,
            distribution = series.distribution.name(),
            mean = series.summary.mean,
            std_dev = series.summary.std_dev,
            "drew samples"
        );
    }

    let image = render_figure(
        &draws,
        &options.config.out_dir,
        &options.config.distributions,
    )?;
    let summary = options
        .write_summary
        .then(|| Summary::new(&image, DistributionStatistics::from(&draws)).write())
        .transpose()?;
    Ok(Written { image, summary })
}

pub fn climate(
    region: &str,
    target_year: i16,
    input: &Path,
    options: &RunOptions,
) -> Result<Written, FigureError> {
    let observations = load_observations(input)?;
    let analysis = RecordAnalysis::compute(&observations, target_year)?;
    tracing::info!(
        region,
        target_year,
        observations = observations.len(),
        record_highs = analysis.record_highs().count(),
        record_lows = analysis.record_lows().count(),
        "compared against baseline records"
    );
    if analysis.leap_days_dropped > 0 {
        tracing::debug!(rows = analysis.leap_days_dropped, "dropped Feb 29 rows");
    }

    let plot = ClimatePlot {
        region,
        analysis: &analysis,
    };
    let image = render_figure(&plot, &options.config.out_dir, &options.config.climate)?;
    let summary = options
        .write_summary
        .then(|| Summary::new(&image, ClimateStatistics::new(region, &analysis)).write())
        .transpose()?;
    Ok(Written { image, summary })
}
