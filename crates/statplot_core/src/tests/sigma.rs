//! Tests for the sigma figure model
//!
//! These tests verify that:
//! - Tail probabilities are symmetric for a centred curve
//! - Mass beyond wide limits is negligible for the unshifted curve
//! - Shifted curves mirror each other
//! - Recomputing gives identical numbers

use statrs::distribution::{ContinuousCDF, Normal};

use crate::sigma::{CurveShift, GRID_POINTS, SigmaFigure, SigmaParams};

fn assert_close(actual: f64, expected: f64, rel: f64) {
    let scale = expected.abs().max(f64::MIN_POSITIVE);
    assert!(
        ((actual - expected) / scale).abs() < rel,
        "expected {expected:e}, got {actual:e}"
    );
}

/// CDF(-6) equals 1 - CDF(6) for the standard normal
#[test]
fn test_standard_normal_cdf_symmetry() {
    let dist = Normal::new(0.0, 1.0).unwrap();
    assert!((dist.cdf(-6.0) - (1.0 - dist.cdf(6.0))).abs() < 1e-12);

    let figure = SigmaFigure::compute(SigmaParams::default()).unwrap();
    let unshifted = figure.curve(CurveShift::Unshifted).unwrap();
    assert_close(unshifted.tails.below_lower, unshifted.tails.above_upper, 1e-9);
    assert_close(unshifted.tails.below_lower, 9.865_876_450_377e-10, 1e-6);
}

/// Unshifted mass beyond ≥5σ limits stays under 1e-6 for any shift
#[test]
fn test_negligible_tail_mass_far_from_mean() {
    for limit in [5.0, 6.0, 7.5] {
        for shift in [0.0, 0.5, 1.5, 3.0] {
            let params = SigmaParams {
                shift,
                limit,
                ..Default::default()
            };
            let figure = SigmaFigure::compute(params).unwrap();
            let unshifted = figure.curve(CurveShift::Unshifted).unwrap();
            assert!(
                unshifted.tails.total() < 1e-6,
                "limit={limit} shift={shift}: {:e}",
                unshifted.tails.total()
            );
        }
    }
}

/// With no shift all three curves coincide and all tails are negligible
#[test]
fn test_zero_shift_curves_coincide() {
    let params = SigmaParams {
        shift: 0.0,
        limit: 5.0,
        ..Default::default()
    };
    let figure = SigmaFigure::compute(params).unwrap();
    for curve in &figure.curves {
        assert_eq!(curve.mean, 0.0);
        assert!(curve.tails.total() < 1e-6);
    }
}

/// The +1.5σ curve's upper tail mirrors the -1.5σ curve's lower tail
#[test]
fn test_shifted_curves_mirror() {
    let figure = SigmaFigure::compute(SigmaParams::default()).unwrap();
    let down = figure.curve(CurveShift::Down).unwrap();
    let up = figure.curve(CurveShift::Up).unwrap();

    assert_eq!(down.mean, -1.5);
    assert_eq!(up.mean, 1.5);
    assert_close(up.tails.above_upper, 3.397_673_124_73e-6, 1e-6);
    assert_close(down.tails.below_lower, up.tails.above_upper, 1e-9);
    assert_close(down.tails.above_upper, up.tails.below_lower, 1e-6);
    assert_close(down.tails.total(), up.tails.total(), 1e-9);
}

#[test]
fn test_grid_and_density() {
    let figure = SigmaFigure::compute(SigmaParams::default()).unwrap();
    assert_eq!(figure.grid.len(), GRID_POINTS);
    assert_eq!(figure.grid[0], -7.0);
    assert_eq!(figure.grid[GRID_POINTS - 1], 7.0);

    let peak = 1.0 / (2.0 * std::f64::consts::PI).sqrt();
    for curve in &figure.curves {
        assert_eq!(curve.density.len(), GRID_POINTS);
        assert!(curve.peak_density <= peak + 1e-12);
        assert!(curve.peak_density > 0.39);
        assert_close(curve.density_plus_sigma, 0.241_970_724_519_143_37, 1e-9);
        assert_close(curve.density_minus_sigma, curve.density_plus_sigma, 1e-12);
        assert_eq!(curve.plus_sigma(1.0), curve.mean + 1.0);
    }

    let tallest = figure
        .curves
        .iter()
        .map(|c| c.peak_density)
        .fold(0.0_f64, f64::max);
    assert!((figure.y_max - (tallest + 0.05)).abs() < 1e-12);
}

#[test]
fn test_scaled_parameters() {
    let params = SigmaParams {
        mean: 10.0,
        std_dev: 2.0,
        shift: 1.0,
        limit: 3.0,
    };
    let figure = SigmaFigure::compute(params).unwrap();
    assert_eq!(params.lower_limit(), 4.0);
    assert_eq!(params.upper_limit(), 16.0);
    assert_eq!(figure.grid[0], 2.0);

    let means: Vec<f64> = figure.curves.iter().map(|c| c.mean).collect();
    assert_eq!(means, vec![8.0, 10.0, 12.0]);

    // Unshifted curve: P(|Z| > 3)
    let unshifted = figure.curve(CurveShift::Unshifted).unwrap();
    assert_close(unshifted.tails.total(), 2.699_796_063_260_2e-3, 1e-6);
}

#[test]
fn test_ticks_for_default_figure() {
    let figure = SigmaFigure::compute(SigmaParams::default()).unwrap();

    let x_ticks = figure.x_ticks();
    assert_eq!(x_ticks.len(), 29);
    let labelled: Vec<&str> = x_ticks
        .iter()
        .filter(|(_, label)| !label.is_empty())
        .map(|(_, label)| label.as_str())
        .collect();
    assert_eq!(labelled.len(), 15);
    assert_eq!(labelled[0], "-7");
    assert_eq!(labelled[7], "0");

    let y_labels: Vec<String> = figure
        .y_ticks()
        .into_iter()
        .map(|(_, label)| label)
        .filter(|label| !label.is_empty())
        .collect();
    assert_eq!(y_labels, vec!["0.10", "0.20", "0.30", "0.40"]);
}

#[test]
fn test_recompute_is_identical() {
    let params = SigmaParams {
        shift: 2.0,
        limit: 4.5,
        ..Default::default()
    };
    let a = SigmaFigure::compute(params).unwrap();
    let b = SigmaFigure::compute(params).unwrap();
    assert_eq!(a, b);
}
