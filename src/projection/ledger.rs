//! Ledger output structures for projections

use serde::{Deserialize, Serialize};

use crate::household::LivingCategory;

/// Round a monetary amount to one decimal place
///
/// Every monetary field is rounded at the point of storage, so displayed,
/// exported, and threshold-checked values are the same numbers.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// One projected year of household income, expense, and savings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// Projection year, 1-indexed
    pub year: u32,

    /// Primary person's attained age, None once deceased
    pub primary_age: Option<u32>,
    /// Partner's attained age, None once deceased
    pub partner_age: Option<u32>,
    /// True on the first year of the single-survivor era
    pub survivor_start: bool,

    // Income
    pub primary_income: f64,
    pub partner_income: f64,
    pub primary_lump_income: f64,
    pub partner_lump_income: f64,
    pub income_total: f64,

    /// Annual living expense per category, parallel to the result's
    /// category list
    pub living: Vec<f64>,
    pub living_total: f64,

    // Other expenses
    pub primary_care: f64,
    pub partner_care: f64,
    pub primary_lump_expense: f64,
    pub partner_lump_expense: f64,
    pub expense_total: f64,

    // Summary
    pub cashflow: f64,
    pub balance: f64,
}

/// One point of the long-form series used for charting
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: u32,
    pub cashflow: f64,
    pub balance: f64,
}

/// Complete projection output for one scenario run
///
/// Produced wholesale by the engine and never patched; a re-run replaces
/// the whole result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Yearly ledger rows, one per projected year
    pub rows: Vec<ProjectionRow>,

    /// Living-cost categories in the order used by `ProjectionRow::living`
    pub categories: Vec<LivingCategory>,

    /// Projection horizon in years
    pub horizon: u32,

    /// First year of the single-survivor era, if one occurs in range
    pub survivor_start_year: Option<u32>,

    /// Savings balance the run was seeded with
    pub start_savings: f64,
}

impl ProjectionResult {
    /// Long-form (year, cashflow, balance) series
    pub fn series(&self) -> Vec<SeriesPoint> {
        self.rows
            .iter()
            .map(|r| SeriesPoint { year: r.year, cashflow: r.cashflow, balance: r.balance })
            .collect()
    }

    /// Yearly annual expense for one category, None when the category is
    /// not part of this run
    pub fn category_series(&self, category: LivingCategory) -> Option<Vec<f64>> {
        let idx = self.categories.iter().position(|&c| c == category)?;
        Some(self.rows.iter().map(|r| r.living[idx]).collect())
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_income: f64 = self.rows.iter().map(|r| r.income_total).sum();
        let total_expense: f64 = self.rows.iter().map(|r| r.expense_total).sum();
        let deficit_years = self.rows.iter().filter(|r| r.cashflow < 0.0).count() as u32;

        let final_balance = self.rows.last().map(|r| r.balance).unwrap_or(self.start_savings);
        let (min_balance, min_balance_year) = self
            .rows
            .iter()
            .map(|r| (r.balance, r.year))
            .fold((final_balance, self.horizon), |acc, cur| {
                if cur.0 < acc.0 { cur } else { acc }
            });

        ProjectionSummary {
            horizon_years: self.horizon,
            total_income: round1(total_income),
            total_expense: round1(total_expense),
            deficit_years,
            final_balance,
            min_balance,
            min_balance_year,
            survivor_start_year: self.survivor_start_year,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub horizon_years: u32,
    pub total_income: f64,
    pub total_expense: f64,
    pub deficit_years: u32,
    pub final_balance: f64,
    pub min_balance: f64,
    pub min_balance_year: u32,
    pub survivor_start_year: Option<u32>,
}
