//! Tests for the seeded four-distribution draws

use crate::samples::{
    DENSITY_AXIS_MAX, DEFAULT_SEED, FourDistributions, HISTOGRAM_BINS, SAMPLES_PER_SERIES,
    SampleDistribution,
};

/// Sample means land within a few standard errors of the theoretical mean
#[test]
fn test_sample_means_near_theory() {
    let draws = FourDistributions::draw(DEFAULT_SEED).unwrap();
    assert_eq!(draws.series.len(), 4);

    for series in &draws.series {
        let dist = series.distribution;
        let deviation = (series.summary.mean - dist.theoretical_mean()).abs();
        assert!(
            deviation < 4.0 * series.summary.standard_error(),
            "{}: mean {} too far from {}",
            series.label,
            series.summary.mean,
            dist.theoretical_mean()
        );
        assert_eq!(series.values.len(), SAMPLES_PER_SERIES);
        assert_eq!(series.summary.count, SAMPLES_PER_SERIES);
    }
}

#[test]
fn test_same_seed_same_draws() {
    let a = FourDistributions::draw(DEFAULT_SEED).unwrap();
    let b = FourDistributions::draw(DEFAULT_SEED).unwrap();
    assert_eq!(a, b);

    let c = FourDistributions::draw(DEFAULT_SEED + 1).unwrap();
    assert_ne!(a.series[0].values, c.series[0].values);
}

#[test]
fn test_support_of_each_series() {
    let draws = FourDistributions::draw(7).unwrap();
    let [_, gamma, exp, uniform] = &draws.series[..] else {
        panic!("expected four series");
    };
    assert!(gamma.values.iter().all(|&v| v > 0.0));
    assert!(exp.values.iter().all(|&v| v >= 6.0));
    assert!(uniform.values.iter().all(|&v| (14.0..20.0).contains(&v)));
}

#[test]
fn test_histograms_are_densities() {
    let draws = FourDistributions::draw(DEFAULT_SEED).unwrap();
    for series in &draws.series {
        assert_eq!(series.histogram.len(), HISTOGRAM_BINS);
        let total: usize = series.histogram.iter().map(|b| b.count).sum();
        assert_eq!(total, SAMPLES_PER_SERIES);
        let area: f64 = series
            .histogram
            .iter()
            .map(|b| b.density * (b.end - b.start))
            .sum();
        assert!((area - 1.0).abs() < 1e-9, "{}: area {area}", series.label);
        assert_eq!(series.histogram[0].start, series.summary.min);
    }
}

#[test]
fn test_captions() {
    let draws = FourDistributions::draw(DEFAULT_SEED).unwrap();

    let normal = draws.series[0].caption_lines();
    assert_eq!(normal.len(), 4);
    assert_eq!(normal[0], "x1: Normal");
    assert!(normal[2].starts_with("μ="));
    assert!(normal[3].starts_with("σ="));

    let exp = draws.series[2].caption_lines();
    assert_eq!(exp.len(), 5);
    assert_eq!(exp[0], "x3: Exp'l (shifted)");
    assert_eq!(exp[2], "β=2; shift=6");

    let (x, y) = draws.series[3].caption_anchor();
    assert!((x - (draws.series[3].summary.mean - 1.85)).abs() < 1e-12);
    assert_eq!(y, 0.63);
}

#[test]
fn test_axis_window() {
    let draws = FourDistributions::draw(DEFAULT_SEED).unwrap();
    let window = draws.axis_window();
    let exp_variance = draws.series[2].summary.variance;
    let uniform_variance = draws.series[3].summary.variance;

    assert!((window.x_min - (-2.5 - exp_variance)).abs() < 1e-12);
    assert!((window.x_max - (14.0 + 2.5 * uniform_variance)).abs() < 1e-12);
    assert_eq!((window.y_min, window.y_max), (0.0, DENSITY_AXIS_MAX));
    // every series mean is inside the window
    for series in &draws.series {
        assert!(series.summary.mean > window.x_min && series.summary.mean < window.x_max);
    }
}

#[test]
fn test_distribution_names() {
    let names: Vec<&str> = FourDistributions::DISTRIBUTIONS
        .iter()
        .map(SampleDistribution::name)
        .collect();
    assert_eq!(names, vec!["Normal", "Gamma", "Exp'l (shifted)", "Uniform"]);
}
