//! Lifeplan - Year-by-year cashflow and savings projection for a two-person household
//!
//! This library provides:
//! - A deterministic yearly projection engine over both lifespans
//! - Two-phase growth curves with reset-on-step compounding
//! - Single-survivor living-cost tapering after the earlier assumed death
//! - Age-triggered lump income/expense events
//! - JSON scenario loading and CSV ledger export

pub mod household;
pub mod model;
pub mod projection;
pub mod export;

// Re-export commonly used types
pub use household::{LivingCategory, Scenario, ScenarioError};
pub use projection::{project, ProjectionEngine, ProjectionResult, ProjectionRow};
