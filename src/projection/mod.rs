//! Projection engine and its yearly ledger output

mod engine;
mod ledger;

pub use engine::{project, ProjectionEngine};
pub use ledger::{round1, ProjectionResult, ProjectionRow, ProjectionSummary, SeriesPoint};
