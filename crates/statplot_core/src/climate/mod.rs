//! Regional climate extremes.
//!
//! Loads daily TMIN/TMAX station readings, builds per-calendar-day record
//! temperatures over a baseline period and flags the days on which a target
//! year broke those records.
//!
//! ```ignore
//! use statplot_core::climate::{load_observations, RecordAnalysis};
//!
//! let observations = load_observations(&default_input_path("New York region"))?;
//! let analysis = RecordAnalysis::compute(&observations, 2015)?;
//! println!("{} record highs", analysis.record_highs().count());
//! ```

mod observations;
mod records;

use std::path::PathBuf;

pub use observations::*;
pub use records::*;

/// Region shown when none is given
pub const DEFAULT_REGION: &str = "New York region";

/// Year compared against the baseline when none is given
pub const DEFAULT_TARGET_YEAR: i16 = 2015;

/// Conventional location of a region's CSV: `data/<region>_climate.csv`
/// with spaces replaced by underscores.
pub fn default_input_path(region: &str) -> PathBuf {
    PathBuf::from("data").join(format!("{}_climate.csv", region.replace(' ', "_")))
}
