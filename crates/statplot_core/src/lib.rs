//! Statistics behind the statplot figures
//!
//! This crate computes everything the three figures show, without drawing
//! anything:
//! - Normal curves shifted by ±k standard deviations, their tail mass beyond
//!   the specification limits and the annotation layout of the sigma figure
//! - Seeded draws from four distributions with summaries and density
//!   histograms
//! - Per-calendar-day record temperatures over a baseline period and the
//!   days a target year broke them
//!
//! # Example
//!
//! ```ignore
//! use statplot_core::{SigmaFigure, SigmaParams, CurveShift};
//!
//! let figure = SigmaFigure::compute(SigmaParams::default())?;
//! let unshifted = figure.curve(CurveShift::Unshifted).unwrap();
//! println!("mass beyond ±6σ: {:.3e}", unshifted.tails.total());
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod climate;
pub mod samples;
pub mod sigma;

// ============================================================================
// Support modules
// ============================================================================

pub mod date_math;
pub mod descriptive;
pub mod error;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use climate::{DayComparison, Element, Observation, RecordAnalysis};
pub use descriptive::SeriesSummary;
pub use error::{ClimateError, ParameterError};
pub use samples::{FourDistributions, SampleDistribution, SampleSeries};
pub use sigma::{CurveShift, NormalCurve, SigmaFigure, SigmaParams, TailProbabilities};
