//! JSON statistics written next to each figure
//!
//! `img/Four distributions.svg` gets `img/Four distributions.json`.

use std::fmt;
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use serde::Serialize;

use statplot_core::date_math::MonthDay;
use statplot_core::{FourDistributions, RecordAnalysis, SeriesSummary, SigmaFigure, SigmaParams};

use crate::util::io::atomic_write;

#[derive(Debug)]
pub enum SummaryError {
    Serialize(serde_json::Error),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for SummaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryError::Serialize(e) => write!(f, "failed to serialize summary: {e}"),
            SummaryError::Io { path, source } => {
                write!(f, "failed to write summary {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SummaryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SummaryError::Serialize(e) => Some(e),
            SummaryError::Io { source, .. } => Some(source),
        }
    }
}

impl From<serde_json::Error> for SummaryError {
    fn from(e: serde_json::Error) -> Self {
        SummaryError::Serialize(e)
    }
}

/// Envelope shared by every summary file
#[derive(Debug, Serialize)]
pub struct Summary<T> {
    pub generated_at: Timestamp,
    pub image: PathBuf,
    #[serde(flatten)]
    pub statistics: T,
}

impl<T: Serialize> Summary<T> {
    pub fn new(image: &Path, statistics: T) -> Self {
        Self {
            generated_at: Timestamp::now(),
            image: image.to_path_buf(),
            statistics,
        }
    }

    /// Write the summary beside its image and return the JSON path.
    pub fn write(&self) -> Result<PathBuf, SummaryError> {
        let path = self.image.with_extension("json");
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        atomic_write(&path, &json).map_err(|source| SummaryError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "summary written");
        Ok(path)
    }
}

#[derive(Debug, Serialize)]
pub struct CurveStatistics {
    pub label: String,
    pub mean: f64,
    pub below_lower: f64,
    pub above_upper: f64,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct SigmaStatistics {
    pub params: SigmaParams,
    pub lower_limit: f64,
    pub upper_limit: f64,
    pub curves: Vec<CurveStatistics>,
}

impl From<&SigmaFigure> for SigmaStatistics {
    fn from(figure: &SigmaFigure) -> Self {
        let params = figure.params;
        Self {
            params,
            lower_limit: params.lower_limit(),
            upper_limit: params.upper_limit(),
            curves: figure
                .curves
                .iter()
                .map(|c| CurveStatistics {
                    label: c.shift.label(params.shift),
                    mean: c.mean,
                    below_lower: c.tails.below_lower,
                    above_upper: c.tails.above_upper,
                    total: c.tails.total(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SeriesStatistics {
    pub label: String,
    pub distribution: &'static str,
    pub theoretical_mean: f64,
    pub theoretical_std_dev: f64,
    pub sample: SeriesSummary,
}

#[derive(Debug, Serialize)]
pub struct DistributionStatistics {
    pub seed: u64,
    pub series: Vec<SeriesStatistics>,
}

impl From<&FourDistributions> for DistributionStatistics {
    fn from(draws: &FourDistributions) -> Self {
        Self {
            seed: draws.seed,
            series: draws
                .series
                .iter()
                .map(|s| SeriesStatistics {
                    label: s.label.clone(),
                    distribution: s.distribution.name(),
                    theoretical_mean: s.distribution.theoretical_mean(),
                    theoretical_std_dev: s.distribution.theoretical_std_dev(),
                    sample: s.summary,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecordDay {
    /// "MM-DD"
    pub day: String,
    pub celsius: f64,
}

#[derive(Debug, Serialize)]
pub struct ClimateStatistics {
    pub region: String,
    pub target_year: i16,
    pub baseline_span: (i16, i16),
    pub baseline_year_count: usize,
    pub leap_days_dropped: usize,
    pub temperature_range: (f64, f64),
    pub record_highs: Vec<RecordDay>,
    pub record_lows: Vec<RecordDay>,
}

impl ClimateStatistics {
    pub fn new(region: &str, analysis: &RecordAnalysis) -> Self {
        Self {
            region: region.to_string(),
            target_year: analysis.target_year,
            baseline_span: analysis.baseline_span,
            baseline_year_count: analysis.baseline_year_count,
            leap_days_dropped: analysis.leap_days_dropped,
            temperature_range: analysis.temperature_range,
            record_highs: record_days(analysis.record_highs()),
            record_lows: record_days(analysis.record_lows()),
        }
    }
}

fn record_days(records: impl Iterator<Item = (MonthDay, f64)>) -> Vec<RecordDay> {
    records
        .map(|(md, celsius)| RecordDay {
            day: md.to_string(),
            celsius,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use statplot_core::samples::DEFAULT_SEED;

    #[test]
    fn test_sigma_summary_json() {
        let figure = SigmaFigure::compute(SigmaParams::default()).unwrap();
        let stats = SigmaStatistics::from(&figure);
        assert_eq!(stats.curves.len(), 3);
        assert_eq!(stats.curves[1].label, "unshifted");
        assert_eq!(stats.lower_limit, -6.0);

        let value = serde_json::to_value(Summary::new(
            Path::new("img/My Normal Distribution Fig.svg"),
            stats,
        ))
        .unwrap();
        assert_eq!(value["image"], "img/My Normal Distribution Fig.svg");
        assert_eq!(value["params"]["limit"], 6.0);
        assert_eq!(value["curves"][2]["label"], "+1.5σ");
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_distribution_summary_carries_seed() {
        let draws = FourDistributions::draw(DEFAULT_SEED).unwrap();
        let stats = DistributionStatistics::from(&draws);
        assert_eq!(stats.seed, DEFAULT_SEED);
        assert_eq!(stats.series[3].distribution, "Uniform");
        assert_eq!(stats.series[0].sample, draws.series[0].summary);
    }

    #[test]
    fn test_write_beside_image() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("Four distributions.svg");
        let draws = FourDistributions::draw(7).unwrap();

        let path = Summary::new(&image, DistributionStatistics::from(&draws))
            .write()
            .unwrap();
        assert_eq!(path, dir.path().join("Four distributions.json"));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["seed"], 7);
        assert_eq!(value["series"].as_array().unwrap().len(), 4);
    }
}
