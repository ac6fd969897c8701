//! Integration tests for the statplot computations
//!
//! Tests are organized by figure:
//! - `sigma` - Normal curves, tail probabilities and symmetry
//! - `samples` - Seeded draws and their summaries
//! - `climate` - Record temperature aggregation over a synthetic station

mod samples;
mod sigma;
