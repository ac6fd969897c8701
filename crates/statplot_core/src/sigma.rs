//! Sigma-annotated normal distribution figure model.
//!
//! Computes three normal curves (shifted down, unshifted, shifted up by
//! `shift` standard deviations), the probability mass each leaves beyond the
//! lower and upper specification limits, and the annotation layout of the
//! classic "6 sigma" figure.
//!
//! The annotation coordinates are literal positions tuned for N(0, 1). They
//! are reproduced for every parameterization but only guaranteed to be
//! legible for the default one.

use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

use crate::descriptive::{linspace, round_to};
use crate::error::{ParameterError, Result};

/// Number of points in the density sample grid
pub const GRID_POINTS: usize = 100;

/// Headroom added above the tallest curve
const Y_HEADROOM: f64 = 0.05;

/// Spacing of labelled y ticks
const Y_TICK_STEP: f64 = 0.05;

/// Distribution parameters for the sigma figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SigmaParams {
    pub mean: f64,
    pub std_dev: f64,
    /// Offset of the shifted curves, in standard deviations
    pub shift: f64,
    /// Specification limit, in standard deviations from the mean
    pub limit: f64,
}

impl Default for SigmaParams {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
            shift: 1.5,
            limit: 6.0,
        }
    }
}

impl SigmaParams {
    pub fn validate(&self) -> Result<()> {
        if !self.std_dev.is_finite() || self.std_dev <= 0.0 {
            return Err(ParameterError::InvalidStdDev(self.std_dev));
        }
        if !self.limit.is_finite() || self.limit <= 0.0 {
            return Err(ParameterError::InvalidLimit(self.limit));
        }
        for (name, value) in [("mean", self.mean), ("shift", self.shift)] {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { name, value });
            }
        }
        Ok(())
    }

    /// Lower specification limit (LSL)
    #[inline]
    pub fn lower_limit(&self) -> f64 {
        self.mean - self.limit * self.std_dev
    }

    /// Upper specification limit (USL)
    #[inline]
    pub fn upper_limit(&self) -> f64 {
        self.mean + self.limit * self.std_dev
    }

    /// Plotted x range: one standard deviation past each limit
    pub fn x_range(&self) -> (f64, f64) {
        (
            self.lower_limit() - self.std_dev,
            self.upper_limit() + self.std_dev,
        )
    }

    /// Major x tick spacing
    #[inline]
    pub fn x_tick_step(&self) -> f64 {
        0.5 * self.std_dev
    }

    pub fn title(&self) -> String {
        format!(
            "Normal distribution pdf (μ={:.2}, σ={:.2}, shift={:.1}, |SL|={:.0})",
            self.mean, self.std_dev, self.shift, self.limit
        )
    }
}

/// Which of the three curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveShift {
    Down,
    Unshifted,
    Up,
}

impl CurveShift {
    pub const ALL: [CurveShift; 3] = [CurveShift::Down, CurveShift::Unshifted, CurveShift::Up];

    #[inline]
    pub fn factor(self) -> f64 {
        match self {
            CurveShift::Down => -1.0,
            CurveShift::Unshifted => 0.0,
            CurveShift::Up => 1.0,
        }
    }

    /// Legend label, e.g. "-1.5σ" or "unshifted"
    pub fn label(self, shift: f64) -> String {
        match self {
            CurveShift::Down => format!("-{shift:.1}σ"),
            CurveShift::Unshifted => "unshifted".to_string(),
            CurveShift::Up => format!("+{shift:.1}σ"),
        }
    }

    /// Prefix printed in front of a tail probability in the annotation stacks
    pub fn stack_label(self, shift: f64) -> String {
        match self {
            CurveShift::Unshifted => "  unshifted:".to_string(),
            _ => format!("{} shift:", self.label(shift)),
        }
    }

    /// Prefix of the label under the curve's mean line
    pub fn mean_prefix(self) -> &'static str {
        match self {
            CurveShift::Down => "μ-σ=",
            CurveShift::Unshifted => "μ=",
            CurveShift::Up => "μ+σ=",
        }
    }
}

/// Probability mass beyond the specification limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TailProbabilities {
    /// P(X < LSL)
    pub below_lower: f64,
    /// P(X > USL)
    pub above_upper: f64,
}

impl TailProbabilities {
    #[inline]
    pub fn total(&self) -> f64 {
        self.below_lower + self.above_upper
    }
}

/// One normal curve sampled over the figure grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalCurve {
    pub shift: CurveShift,
    pub mean: f64,
    /// Density at each grid point
    pub density: Vec<f64>,
    pub peak_density: f64,
    /// Density at `mean + std_dev`
    pub density_plus_sigma: f64,
    /// Density at `mean - std_dev`
    pub density_minus_sigma: f64,
    pub tails: TailProbabilities,
}

impl NormalCurve {
    fn compute(params: &SigmaParams, shift: CurveShift, grid: &[f64]) -> Result<Self> {
        let mean = params.mean + shift.factor() * params.shift * params.std_dev;
        let dist = normal(mean, params.std_dev)?;

        let density: Vec<f64> = grid.iter().map(|&x| dist.pdf(x)).collect();
        let peak_density = density.iter().copied().fold(0.0_f64, f64::max);

        let tails = TailProbabilities {
            below_lower: dist.cdf(params.lower_limit()),
            above_upper: dist.sf(params.upper_limit()),
        };

        Ok(Self {
            shift,
            mean,
            density,
            peak_density,
            density_plus_sigma: dist.pdf(mean + params.std_dev),
            density_minus_sigma: dist.pdf(mean - params.std_dev),
            tails,
        })
    }

    #[inline]
    pub fn plus_sigma(&self, std_dev: f64) -> f64 {
        self.mean + std_dev
    }

    #[inline]
    pub fn minus_sigma(&self, std_dev: f64) -> f64 {
        self.mean - std_dev
    }
}

/// Literal annotation coordinates, in data units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnotationLayout {
    /// Anchor of the "Area left of LSL" stack (left aligned)
    pub left_stack_x: f64,
    /// Anchor of the "Area right of USL" stack (right aligned)
    pub right_stack_x: f64,
    pub stack_top: f64,
    /// Offsets below `stack_top` of the three curve lines
    pub stack_line_offsets: [f64; 3],
    /// Offset below `stack_top` where the arrow down to the axis starts
    pub arrow_offset: f64,
    pub mean_label_y: f64,
    pub plus_sigma_label_y: f64,
    pub minus_sigma_label_y: f64,
    /// Height of the LSL/USL marker lines
    pub limit_marker_y: f64,
    /// Rounded box holding the total tail areas: (x0, y0, x1, y1)
    pub total_box: (f64, f64, f64, f64),
    /// First text line inside the total box
    pub total_text: (f64, f64),
    /// Position of the φ(x) caption, left of the spine at the top labelled tick
    pub density_caption: (f64, f64),
}

impl AnnotationLayout {
    fn compute(params: &SigmaParams, y_ticks: &[f64]) -> Result<Self> {
        let (start, end) = params.x_range();

        // Box sits just right of the upper shifted curve's bulk
        let box_anchor = normal(
            params.mean + params.shift * params.std_dev + 0.5,
            params.std_dev,
        )?
        .inverse_cdf(0.85);
        let (x0, x1) = (box_anchor, box_anchor + 2.3);
        let (y0, y1) = (0.15, 0.25);

        let top_tick = y_ticks.last().copied().unwrap_or(0.0);

        Ok(Self {
            left_stack_x: start * 0.95,
            right_stack_x: end * 0.95,
            stack_top: 0.38,
            stack_line_offsets: [0.03, 0.05, 0.07],
            arrow_offset: 0.09,
            mean_label_y: 0.065,
            plus_sigma_label_y: 0.04,
            minus_sigma_label_y: 0.02,
            limit_marker_y: 0.08,
            total_box: (x0, y0, x1, y1),
            total_text: (x0 + 0.1, y1 - 0.02),
            density_caption: (params.mean - 0.5 * params.x_tick_step(), top_tick),
        })
    }
}

/// The full figure model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigmaFigure {
    pub params: SigmaParams,
    pub grid: Vec<f64>,
    /// Curves in `CurveShift::ALL` order
    pub curves: Vec<NormalCurve>,
    pub y_max: f64,
    pub layout: AnnotationLayout,
}

impl SigmaFigure {
    pub fn compute(params: SigmaParams) -> Result<Self> {
        params.validate()?;

        let (start, end) = params.x_range();
        let grid = linspace(start, end, GRID_POINTS);

        let curves = CurveShift::ALL
            .iter()
            .map(|&shift| NormalCurve::compute(&params, shift, &grid))
            .collect::<Result<Vec<_>>>()?;

        let peak = curves
            .iter()
            .map(|c| c.peak_density)
            .fold(0.0_f64, f64::max);
        let y_max = peak + Y_HEADROOM;

        let y_ticks = major_ticks(0.0, y_max, Y_TICK_STEP);
        let layout = AnnotationLayout::compute(&params, &y_ticks)?;

        Ok(Self {
            params,
            grid,
            curves,
            y_max,
            layout,
        })
    }

    pub fn curve(&self, shift: CurveShift) -> Option<&NormalCurve> {
        self.curves.iter().find(|c| c.shift == shift)
    }

    /// Major x ticks with their labels (empty label for unlabelled ticks)
    pub fn x_ticks(&self) -> Vec<(f64, String)> {
        let (start, end) = self.params.x_range();
        major_ticks(start, end, self.params.x_tick_step())
            .into_iter()
            .map(|x| (x, x_tick_label(x)))
            .collect()
    }

    /// Major y ticks with their labels (empty label for unlabelled ticks)
    pub fn y_ticks(&self) -> Vec<(f64, String)> {
        major_ticks(0.0, self.y_max, Y_TICK_STEP)
            .into_iter()
            .map(|y| (y, y_tick_label(y)))
            .collect()
    }
}

fn normal(mean: f64, std_dev: f64) -> Result<Normal> {
    Normal::new(mean, std_dev).map_err(|_| ParameterError::InvalidDistribution {
        distribution: "normal",
        reason: "mean must be finite and std_dev positive",
    })
}

/// Multiples of `step` inside `[start, end]`.
pub fn major_ticks(start: f64, end: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || !step.is_finite() || end < start {
        return Vec::new();
    }
    let first = (start / step - 1e-9).ceil() as i64;
    let last = (end / step + 1e-9).floor() as i64;
    (first..=last)
        .map(|i| {
            let v = i as f64 * step;
            // avoid printing -0
            if v == 0.0 { 0.0 } else { v }
        })
        .collect()
}

/// X tick labels mark whole numbers only.
pub fn x_tick_label(x: f64) -> String {
    if (x - x.round()).abs() < 1e-9 {
        format!("{:.0}", x.round() + 0.0)
    } else {
        String::new()
    }
}

/// Y tick labels mark multiples of 0.1, never zero (already on the x axis).
pub fn y_tick_label(y: f64) -> String {
    if y.abs() < 1e-9 {
        return String::new();
    }
    let tenths = y / 0.1;
    if round_to(tenths - tenths.round(), 3) == 0.0 {
        format!("{y:.2}")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SigmaParams::default();
        assert_eq!(params.lower_limit(), -6.0);
        assert_eq!(params.upper_limit(), 6.0);
        assert_eq!(params.x_range(), (-7.0, 7.0));
        assert_eq!(
            params.title(),
            "Normal distribution pdf (μ=0.00, σ=1.00, shift=1.5, |SL|=6)"
        );
    }

    #[test]
    fn test_validation_rejects_bad_std_dev() {
        for std_dev in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let params = SigmaParams {
                std_dev,
                ..Default::default()
            };
            assert!(matches!(
                SigmaFigure::compute(params),
                Err(ParameterError::InvalidStdDev(_))
            ));
        }
    }

    #[test]
    fn test_validation_rejects_bad_limit_and_shift() {
        let params = SigmaParams {
            limit: 0.0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ParameterError::InvalidLimit(0.0)));

        let params = SigmaParams {
            shift: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::NonFinite { name: "shift", .. })
        ));
    }

    #[test]
    fn test_curve_labels() {
        assert_eq!(CurveShift::Down.label(1.5), "-1.5σ");
        assert_eq!(CurveShift::Up.label(1.5), "+1.5σ");
        assert_eq!(CurveShift::Up.stack_label(1.5), "+1.5σ shift:");
        assert_eq!(CurveShift::Unshifted.stack_label(1.5), "  unshifted:");
        assert_eq!(CurveShift::Down.mean_prefix(), "μ-σ=");
    }

    #[test]
    fn test_x_tick_labels_whole_numbers_only() {
        assert_eq!(x_tick_label(-3.0), "-3");
        assert_eq!(x_tick_label(0.0), "0");
        assert_eq!(x_tick_label(-0.0), "0");
        assert_eq!(x_tick_label(2.5), "");
    }

    #[test]
    fn test_y_tick_labels_tenths_only() {
        assert_eq!(y_tick_label(0.0), "");
        assert_eq!(y_tick_label(0.05), "");
        assert_eq!(y_tick_label(0.1), "0.10");
        assert_eq!(y_tick_label(0.30000000000000004), "0.30");
        assert_eq!(y_tick_label(0.35), "");
    }

    #[test]
    fn test_major_ticks() {
        let ticks = major_ticks(-7.0, 7.0, 0.5);
        assert_eq!(ticks.len(), 29);
        assert_eq!(ticks[0], -7.0);
        assert_eq!(ticks[28], 7.0);
        assert!(major_ticks(1.0, 0.0, 0.5).is_empty());
        assert!(major_ticks(0.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn test_layout_for_default_params() {
        let figure = SigmaFigure::compute(SigmaParams::default()).unwrap();
        let layout = figure.layout;
        assert!((layout.left_stack_x - (-6.65)).abs() < 1e-12);
        assert!((layout.right_stack_x - 6.65).abs() < 1e-12);

        // InvCDF of N(2.0, 1) at 0.85 is 2 + 1.0364...
        let (x0, y0, x1, y1) = layout.total_box;
        assert!((x0 - 3.036_433_389_5).abs() < 1e-6);
        assert!((x1 - x0 - 2.3).abs() < 1e-12);
        assert_eq!((y0, y1), (0.15, 0.25));
        assert!((layout.total_text.1 - 0.23).abs() < 1e-12);
    }
}
