//! Annotated statistics figures
//!
//! Renders the models computed by `statplot_core` with plotters:
//! - The sigma figure: three normal curves and their mass beyond the
//!   specification limits
//! - Four seeded distributions as overlaid density histograms
//! - A year's record-breaking daily temperatures against the baseline records
//!
//! Rendering, YAML configuration, JSON summaries and file logging live here;
//! all statistics come from the core crate.

// ============================================================================
// Figures
// ============================================================================

pub mod figures;
pub mod render;
pub mod summary;

// ============================================================================
// Application
// ============================================================================

pub mod cli;
pub mod config;
pub mod logging;
pub mod util;

// ============================================================================
// Test modules
// ============================================================================


// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use cli::{Cli, Command};
pub use config::{FigureSettings, RenderConfig};
pub use figures::{FigureError, RunOptions, Written};
pub use logging::init_logging;
pub use render::{Figure, ImageFormat, RenderError, render_figure};
