//! Descriptive statistics over sample series.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Summary of a sample series.
///
/// Dispersion uses the population form (divide by `n`), matching what the
/// figures print as σ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

impl SeriesSummary {
    /// Summarize `values`. Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self {
            count: values.len(),
            mean: values.mean(),
            std_dev: values.population_std_dev(),
            variance: values.population_variance(),
            min: values.min(),
            max: values.max(),
        })
    }

    /// Standard error of the mean.
    #[must_use]
    pub fn standard_error(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.std_dev / (self.count as f64).sqrt()
        }
    }
}

/// Round half away from zero to `decimals` places.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Evenly spaced points over `[start, stop]`, both ends included.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_population_form() {
        let summary = SeriesSummary::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(summary.count, 8);
        assert!((summary.mean - 5.0).abs() < 1e-12);
        assert!((summary.variance - 4.0).abs() < 1e-12);
        assert!((summary.std_dev - 2.0).abs() < 1e-12);
        assert_eq!(summary.min, 2.0);
        assert_eq!(summary.max, 9.0);
        assert!((summary.standard_error() - 2.0 / 8f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_summary_empty() {
        assert!(SeriesSummary::from_values(&[]).is_none());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(-2.5, 1), -2.5);
        assert_eq!(round_to(1.26, 1), 1.3);
        assert_eq!(round_to(0.123_456, 3), 0.123);
    }

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(-7.0, 7.0, 100);
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], -7.0);
        assert_eq!(xs[99], 7.0);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));

        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(3.0, 5.0, 1), vec![3.0]);
    }
}
