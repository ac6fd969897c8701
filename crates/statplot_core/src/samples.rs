//! Seeded draws from four distributions for the histogram comparison figure.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Exp, Gamma, Normal, Uniform};
use serde::{Deserialize, Serialize};

use crate::descriptive::{SeriesSummary, round_to};
use crate::error::{ParameterError, Result};

/// Observations drawn per series
pub const SAMPLES_PER_SERIES: usize = 500;

/// Seed used when none is given
pub const DEFAULT_SEED: u64 = 1234;

pub const HISTOGRAM_BINS: usize = 20;

/// Upper bound of the density axis
pub const DENSITY_AXIS_MAX: f64 = 0.6;

/// Lower bound of the uniform series, also the anchor of the axis window's right edge
const UNIFORM_LOW: f64 = 14.0;

/// Captions are drawn this far left of their series mean
const CAPTION_OFFSET: f64 = 1.85;
const CAPTION_Y: f64 = 0.63;

/// Sampling distribution with its shape parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SampleDistribution {
    Normal { mean: f64, std_dev: f64 },
    Gamma { shape: f64, scale: f64 },
    /// Exponential with mean `scale`, shifted right by `shift`
    ShiftedExponential { scale: f64, shift: f64 },
    /// Uniform over `[low, high)`
    Uniform { low: f64, high: f64 },
}

impl SampleDistribution {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal { .. } => "Normal",
            Self::Gamma { .. } => "Gamma",
            Self::ShiftedExponential { .. } => "Exp'l (shifted)",
            Self::Uniform { .. } => "Uniform",
        }
    }

    /// Density formula in plain text
    pub fn formula(&self) -> &'static str {
        match self {
            Self::Normal { .. } => "(1/√(2πσ²)) e^(-(x-μ)²/(2σ²))",
            Self::Gamma { .. } => "x^(k-1) e^(-x/θ) / (θ^k Γ(k))",
            Self::ShiftedExponential { .. } => "(1/β) e^(-x/β) + shift",
            Self::Uniform { .. } => "1/(b - a)",
        }
    }

    /// Parameter line shown under the formula. The normal caption has none.
    pub fn parameter_line(&self) -> Option<String> {
        match *self {
            Self::Normal { .. } => None,
            Self::Gamma { shape, scale } => Some(format!("k={shape}; θ={scale}")),
            Self::ShiftedExponential { scale, shift } => Some(format!("β={scale}; shift={shift}")),
            Self::Uniform { low, high } => Some(format!("b={high}; a={low}")),
        }
    }

    pub fn theoretical_mean(&self) -> f64 {
        match *self {
            Self::Normal { mean, .. } => mean,
            Self::Gamma { shape, scale } => shape * scale,
            Self::ShiftedExponential { scale, shift } => scale + shift,
            Self::Uniform { low, high } => (low + high) / 2.0,
        }
    }

    pub fn theoretical_std_dev(&self) -> f64 {
        match *self {
            Self::Normal { std_dev, .. } => std_dev,
            Self::Gamma { shape, scale } => shape.sqrt() * scale,
            Self::ShiftedExponential { scale, .. } => scale,
            Self::Uniform { low, high } => (high - low) / 12f64.sqrt(),
        }
    }

    /// Draw `n` observations from `rng`.
    pub fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Result<Vec<f64>> {
        let invalid = |reason: &'static str| ParameterError::InvalidDistribution {
            distribution: self.name(),
            reason,
        };
        let values = match *self {
            Self::Normal { mean, std_dev } => {
                if std_dev.is_nan() || std_dev < 0.0 {
                    return Err(invalid("std_dev must be finite and non-negative"));
                }
                let dist = Normal::new(mean, std_dev)
                    .map_err(|_| invalid("std_dev must be finite and non-negative"))?;
                dist.sample_iter(rng).take(n).collect()
            }
            Self::Gamma { shape, scale } => {
                let dist = Gamma::new(shape, scale)
                    .map_err(|_| invalid("shape and scale must be positive"))?;
                dist.sample_iter(rng).take(n).collect()
            }
            Self::ShiftedExponential { scale, shift } => {
                if scale.is_nan() || scale <= 0.0 || !shift.is_finite() {
                    return Err(invalid("scale must be positive and shift finite"));
                }
                let dist = Exp::new(1.0 / scale).map_err(|_| invalid("scale must be positive"))?;
                dist.sample_iter(rng).take(n).map(|x| x + shift).collect()
            }
            Self::Uniform { low, high } => {
                let dist =
                    Uniform::new(low, high).map_err(|_| invalid("low must be below high"))?;
                dist.sample_iter(rng).take(n).collect()
            }
        };
        Ok(values)
    }
}

/// One equal-width histogram bin, normalized to density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    /// `count / (n * width)`, so bin areas sum to 1
    pub density: f64,
}

/// Bin `values` into `bins` equal-width bins spanning their min..max.
///
/// A constant series is binned over `value ± 0.5`.
pub fn density_histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        // last bin is closed on the right
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    let n = values.len() as f64;
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
            density: count as f64 / (n * width),
        })
        .collect()
}

/// A drawn series with everything the figure needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSeries {
    /// Short label, "x1".."x4"
    pub label: String,
    pub distribution: SampleDistribution,
    pub values: Vec<f64>,
    pub summary: SeriesSummary,
    pub histogram: Vec<HistogramBin>,
}

impl SampleSeries {
    fn draw<R: rand::Rng + ?Sized>(
        label: &str,
        distribution: SampleDistribution,
        rng: &mut R,
        n: usize,
    ) -> Result<Self> {
        let values = distribution.sample(rng, n)?;
        let summary =
            SeriesSummary::from_values(&values).ok_or(ParameterError::InvalidDistribution {
                distribution: distribution.name(),
                reason: "no observations drawn",
            })?;
        let histogram = density_histogram(&values, HISTOGRAM_BINS);
        Ok(Self {
            label: label.to_string(),
            distribution,
            values,
            summary,
            histogram,
        })
    }

    /// Multi-line caption: title, formula, parameters, sample μ and σ
    pub fn caption_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{}: {}", self.label, self.distribution.name()),
            self.distribution.formula().to_string(),
        ];
        if let Some(params) = self.distribution.parameter_line() {
            lines.push(params);
        }
        lines.push(format!("μ={:.1}", round_to(self.summary.mean, 1)));
        lines.push(format!("σ={:.1}", round_to(self.summary.std_dev, 1)));
        lines
    }

    /// Top-left corner of the caption, in data units
    pub fn caption_anchor(&self) -> (f64, f64) {
        (self.summary.mean - CAPTION_OFFSET, CAPTION_Y)
    }
}

/// Visible data window of the histogram figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// The four seeded series of the comparison figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FourDistributions {
    pub seed: u64,
    pub series: Vec<SampleSeries>,
}

impl FourDistributions {
    /// Distributions in draw order
    pub const DISTRIBUTIONS: [SampleDistribution; 4] = [
        SampleDistribution::Normal {
            mean: -2.5,
            std_dev: 1.0,
        },
        SampleDistribution::Gamma {
            shape: 2.0,
            scale: 1.5,
        },
        SampleDistribution::ShiftedExponential {
            scale: 2.0,
            shift: 6.0,
        },
        SampleDistribution::Uniform {
            low: UNIFORM_LOW,
            high: 20.0,
        },
    ];

    pub const FOOTNOTE: &'static str = "Note: Γ(k)=∫₀^∞ x^(k-1) e^(-x) dx";

    /// Draw all four series from one generator seeded with `seed`.
    pub fn draw(seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let series = Self::DISTRIBUTIONS
            .iter()
            .enumerate()
            .map(|(i, &dist)| {
                SampleSeries::draw(&format!("x{}", i + 1), dist, &mut rng, SAMPLES_PER_SERIES)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(seed, series = series.len(), "drew sample series");
        Ok(Self { seed, series })
    }

    /// Window wide enough for all four series on one scale: left of the
    /// normal location by the exponential's variance, right of the uniform's
    /// lower bound by 2.5 times the uniform's variance.
    pub fn axis_window(&self) -> AxisWindow {
        let normal_mean = Self::DISTRIBUTIONS[0].theoretical_mean();
        let exp_variance = self.series.get(2).map_or(0.0, |s| s.summary.variance);
        let uniform_variance = self.series.get(3).map_or(0.0, |s| s.summary.variance);

        AxisWindow {
            x_min: round_to(normal_mean, 1) - exp_variance,
            x_max: round_to(UNIFORM_LOW, 1) + uniform_variance * 2.5,
            y_min: 0.0,
            y_max: DENSITY_AXIS_MAX,
        }
    }
}
