//! Core projection engine for yearly household cashflow projections

use crate::household::{CategoryConfig, Scenario, ScenarioError};
use crate::model::{growth, EventMap, HouseholdClock};
use super::ledger::{round1, ProjectionResult, ProjectionRow};

/// Single-survivor cost tapering, resolved at engine construction
///
/// Couple-era category costs are frozen at the last couple-era year and
/// scaled by the survivor ratio; from the transition onward each category
/// compounds only at its own post-step rate. The pre-transition step
/// machinery is bypassed for the rest of the horizon.
#[derive(Debug, Clone)]
struct SurvivorTransition {
    /// First 1-indexed year of the single-survivor era
    start_year: u32,
    /// Scaling fraction applied to the frozen couple-era cost
    ratio: f64,
    /// Monthly cost per category in the last couple-era year, parallel to
    /// the scenario's category list
    frozen_monthly: Vec<f64>,
}

/// Main projection engine
///
/// Owns a copy of the scenario plus everything derivable before the year
/// loop: household timing, the four lump-event maps, and the survivor
/// transition. `run` is a total function; all input checking happens in
/// `new`.
pub struct ProjectionEngine {
    scenario: Scenario,
    clock: HouseholdClock,
    horizon: u32,
    primary_lump_income: EventMap,
    partner_lump_income: EventMap,
    primary_lump_expense: EventMap,
    partner_lump_expense: EventMap,
    survivor: Option<SurvivorTransition>,
}

impl ProjectionEngine {
    /// Validate the scenario and precompute per-run structures
    pub fn new(scenario: Scenario) -> Result<Self, ScenarioError> {
        scenario.validate()?;

        let clock = HouseholdClock::new(scenario.primary.lifespan(), scenario.partner.lifespan());
        let horizon = clock.horizon();

        // Transition applies only when a survivor policy is set and the
        // year after the earlier death still falls within the horizon.
        // start_year is at least 2, so the last couple-era offset
        // (start_year - 2) is always valid.
        let survivor = match (&scenario.survivor_policy, clock.survivor_start_year()) {
            (Some(policy), Some(start)) if start >= 2 && start <= horizon => {
                Some(SurvivorTransition {
                    start_year: start,
                    ratio: policy.ratio(),
                    frozen_monthly: scenario
                        .living
                        .iter()
                        .map(|c| c.monthly_at(start - 2))
                        .collect(),
                })
            }
            _ => None,
        };

        Ok(Self {
            primary_lump_income: EventMap::build(&scenario.primary.lump_income),
            partner_lump_income: EventMap::build(&scenario.partner.lump_income),
            primary_lump_expense: EventMap::build(&scenario.primary.lump_expense),
            partner_lump_expense: EventMap::build(&scenario.partner.lump_expense),
            scenario,
            clock,
            horizon,
            survivor,
        })
    }

    /// Run the projection over the full horizon
    pub fn run(&self) -> ProjectionResult {
        log::info!(
            "projecting {} years (single-survivor era from year {:?})",
            self.horizon,
            self.survivor.as_ref().map(|s| s.start_year),
        );

        let mut rows = Vec::with_capacity(self.horizon as usize);
        let mut balance = self.scenario.start_savings;

        for t in 0..self.horizon {
            let row = self.project_year(t, &mut balance);
            rows.push(row);
        }

        ProjectionResult {
            rows,
            categories: self.scenario.living.iter().map(|c| c.category).collect(),
            horizon: self.horizon,
            survivor_start_year: self.survivor.as_ref().map(|s| s.start_year),
            start_savings: self.scenario.start_savings,
        }
    }

    /// Compute one ledger row at year-offset `t`, advancing the balance
    fn project_year(&self, t: u32, balance: &mut f64) -> ProjectionRow {
        let year = t + 1;
        let primary = &self.scenario.primary;
        let partner = &self.scenario.partner;
        let primary_alive = self.clock.primary.is_alive(t);
        let partner_alive = self.clock.partner.is_alive(t);
        let primary_age = self.clock.primary.age_at(t);
        let partner_age = self.clock.partner.age_at(t);

        // Income: the profile only pays while the person is alive
        let primary_income = if primary_alive {
            round1(primary.income.annual_at(primary_age, primary.current_age))
        } else {
            0.0
        };
        let partner_income = if partner_alive {
            round1(partner.income.annual_at(partner_age, partner.current_age))
        } else {
            0.0
        };
        let primary_lump_income = if primary_alive {
            round1(self.primary_lump_income.amount_at(primary_age))
        } else {
            0.0
        };
        let partner_lump_income = if partner_alive {
            round1(self.partner_lump_income.amount_at(partner_age))
        } else {
            0.0
        };
        let income_total =
            round1(primary_income + partner_income + primary_lump_income + partner_lump_income);

        // Living expenses, per category
        let living: Vec<f64> = self
            .scenario
            .living
            .iter()
            .enumerate()
            .map(|(idx, config)| self.living_annual(t, idx, config))
            .collect();
        let living_total = round1(living.iter().sum());

        // Care costs, annualized per alive person
        let primary_care = if primary_alive {
            round1(primary.care.monthly_at(primary_age) * 12.0)
        } else {
            0.0
        };
        let partner_care = if partner_alive {
            round1(partner.care.monthly_at(partner_age) * 12.0)
        } else {
            0.0
        };

        let primary_lump_expense = if primary_alive {
            round1(self.primary_lump_expense.amount_at(primary_age))
        } else {
            0.0
        };
        let partner_lump_expense = if partner_alive {
            round1(self.partner_lump_expense.amount_at(partner_age))
        } else {
            0.0
        };

        let expense_total = round1(
            living_total + primary_care + partner_care + primary_lump_expense
                + partner_lump_expense,
        );

        let cashflow = round1(income_total - expense_total);
        *balance = round1(*balance + cashflow);

        ProjectionRow {
            year,
            primary_age: primary_alive.then_some(primary_age),
            partner_age: partner_alive.then_some(partner_age),
            survivor_start: self.survivor.as_ref().is_some_and(|s| s.start_year == year),
            primary_income,
            partner_income,
            primary_lump_income,
            partner_lump_income,
            income_total,
            living,
            living_total,
            primary_care,
            partner_care,
            primary_lump_expense,
            partner_lump_expense,
            expense_total,
            cashflow,
            balance: *balance,
        }
    }

    /// Annual living expense for one category at year-offset `t`
    fn living_annual(&self, t: u32, idx: usize, config: &CategoryConfig) -> f64 {
        let year = t + 1;
        if let Some(s) = &self.survivor {
            if year >= s.start_year {
                let elapsed = year - s.start_year;
                let monthly = growth::grow(
                    s.frozen_monthly[idx] * s.ratio,
                    config.post_step_growth_pct,
                    elapsed,
                );
                return round1(monthly * 12.0);
            }
        }
        round1(config.monthly_at(t) * 12.0)
    }
}

/// Validate a scenario and run it in one call
pub fn project(scenario: &Scenario) -> Result<ProjectionResult, ScenarioError> {
    Ok(ProjectionEngine::new(scenario.clone())?.run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{
        CareProfile, IncomeProfile, LivingCategory, LumpSlot, PersonParams, PersonRole,
        SingleSurvivorPolicy,
    };
    use approx::assert_abs_diff_eq;

    fn person(current_age: u32, age_at_death: u32) -> PersonParams {
        PersonParams {
            current_age,
            age_at_death,
            income: IncomeProfile::flat(0.0),
            care: CareProfile::none(),
            lump_income: vec![],
            lump_expense: vec![],
        }
    }

    fn bare_scenario(primary: (u32, u32), partner: (u32, u32), start_savings: f64) -> Scenario {
        Scenario {
            primary: person(primary.0, primary.1),
            partner: person(partner.0, partner.1),
            living: vec![],
            survivor_policy: None,
            start_savings,
        }
    }

    fn food(m: f64, g: f64, after: u32, m2: f64, g2: f64) -> CategoryConfig {
        CategoryConfig {
            category: LivingCategory::Food,
            monthly_amount: m,
            growth_pct: g,
            years_until_step: after,
            post_step_monthly_amount: m2,
            post_step_growth_pct: g2,
        }
    }

    #[test]
    fn test_zero_scenario_holds_balance_flat() {
        let result = project(&bare_scenario((60, 93), (57, 96), 1500.0)).unwrap();

        assert_eq!(result.horizon, 40);
        assert_eq!(result.rows.len(), 40);
        for row in &result.rows {
            assert_abs_diff_eq!(row.cashflow, 0.0);
            assert_abs_diff_eq!(row.balance, 1500.0);
        }
    }

    #[test]
    fn test_inverted_lifespan_rejected_before_any_row() {
        let scenario = bare_scenario((60, 55), (57, 96), 0.0);
        let err = project(&scenario).unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidLifespan { role: PersonRole::Primary, .. }));
    }

    #[test]
    fn test_single_category_flat_expense() {
        let mut scenario = bare_scenario((60, 93), (57, 96), 0.0);
        scenario.living = vec![food(10.0, 0.0, 0, 0.0, 0.0)];

        let result = project(&scenario).unwrap();
        for row in &result.rows {
            assert_abs_diff_eq!(row.living[0], 120.0);
            assert_abs_diff_eq!(row.living_total, 120.0);
        }
    }

    #[test]
    fn test_lump_income_lands_in_trigger_year_only() {
        let mut scenario = bare_scenario((60, 93), (57, 96), 0.0);
        scenario.primary.lump_income = vec![LumpSlot::new(60, 100.0)];

        let result = project(&scenario).unwrap();
        assert_abs_diff_eq!(result.rows[0].income_total, 100.0);
        for row in &result.rows[1..] {
            assert_abs_diff_eq!(row.income_total, 0.0);
        }
    }

    #[test]
    fn test_income_stops_at_death() {
        let mut scenario = bare_scenario((60, 61), (60, 90), 0.0);
        scenario.primary.income = IncomeProfile::flat(100.0);

        let result = project(&scenario).unwrap();
        assert_abs_diff_eq!(result.rows[0].primary_income, 100.0);
        assert_abs_diff_eq!(result.rows[1].primary_income, 100.0);
        assert_abs_diff_eq!(result.rows[2].primary_income, 0.0);
        assert_eq!(result.rows[1].primary_age, Some(61));
        assert_eq!(result.rows[2].primary_age, None);
    }

    #[test]
    fn test_survivor_era_freezes_and_rescales_living_costs() {
        // Primary dies in year 1, so year 2 starts the single-survivor era
        let mut scenario = bare_scenario((70, 70), (60, 90), 0.0);
        scenario.living = vec![food(10.0, 2.0, 5, 6.0, 3.0)];
        scenario.survivor_policy = Some(SingleSurvivorPolicy { ratio_pct: 75.0 });

        let result = project(&scenario).unwrap();
        assert_eq!(result.horizon, 31);
        assert_eq!(result.survivor_start_year, Some(2));
        assert!(result.rows[1].survivor_start);
        assert!(!result.rows[0].survivor_start);
        assert!(!result.rows[2].survivor_start);

        // Year 1 is still couple-era: 10 * 12
        assert_abs_diff_eq!(result.rows[0].living[0], 120.0);
        // Year 2: frozen year-1 monthly (10.0) * 0.75 * 12
        assert_abs_diff_eq!(result.rows[1].living[0], 90.0);
        // Year 3: one year of post-step growth on the rescaled value
        assert_abs_diff_eq!(result.rows[2].living[0], 92.7);
        // Year 5: 7.5 * 1.03^3 * 12 = 98.345... -> 98.3
        assert_abs_diff_eq!(result.rows[4].living[0], 98.3);
        // Year 6 would have been the couple-era step year; the survivor
        // formula keeps compounding the frozen value instead
        assert_abs_diff_eq!(result.rows[5].living[0], 101.3);
    }

    #[test]
    fn test_no_policy_means_no_tapering() {
        let mut scenario = bare_scenario((70, 70), (60, 90), 0.0);
        scenario.living = vec![food(10.0, 2.0, 5, 6.0, 3.0)];
        scenario.survivor_policy = None;

        let result = project(&scenario).unwrap();
        assert_eq!(result.survivor_start_year, None);
        // Year 2 follows the plain couple-era curve: 10 * 1.02 * 12
        assert_abs_diff_eq!(result.rows[1].living[0], 122.4);
        // The configured step still applies at its own offset
        assert_abs_diff_eq!(result.rows[5].living[0], 72.0);
    }

    #[test]
    fn test_transition_past_horizon_never_tapers() {
        // Both die in the final projected year; the transition year falls
        // one past the horizon and is dropped
        let mut scenario = bare_scenario((60, 70), (60, 70), 0.0);
        scenario.living = vec![food(10.0, 2.0, 0, 0.0, 0.0)];
        scenario.survivor_policy = Some(SingleSurvivorPolicy { ratio_pct: 75.0 });

        let result = project(&scenario).unwrap();
        assert_eq!(result.horizon, 11);
        assert_eq!(result.survivor_start_year, None);
        assert!(result.rows.iter().all(|r| !r.survivor_start));
        assert_abs_diff_eq!(result.rows[10].living[0], round1(10.0 * 1.02f64.powi(10) * 12.0));
    }

    #[test]
    fn test_default_scenario_first_year_hand_check() {
        let result = project(&Scenario::default_senior_couple()).unwrap();
        let first = &result.rows[0];

        assert_abs_diff_eq!(first.primary_income, 500.0);
        assert_abs_diff_eq!(first.partner_income, 300.0);
        assert_abs_diff_eq!(first.income_total, 800.0);
        // 8.5+3.5+2+2+3+1.8+3+6 = 29.8 monthly -> 357.6 annual
        assert_abs_diff_eq!(first.living_total, 357.6);
        // No care or lump events in year 1 (the partner is 57, so the
        // age-60 lump expense is three years out)
        assert_abs_diff_eq!(first.expense_total, 357.6);
        assert_abs_diff_eq!(first.cashflow, 442.4);
        assert_abs_diff_eq!(first.balance, 1942.4);
    }

    #[test]
    fn test_default_scenario_timing() {
        let result = project(&Scenario::default_senior_couple()).unwrap();

        assert_eq!(result.horizon, 40);
        // Primary dies in year 34 (93 - 60 + 1); survivor era from year 35
        assert_eq!(result.survivor_start_year, Some(35));
        assert!(result.rows[34].survivor_start);
        // Ages blank out after death
        assert_eq!(result.rows[33].primary_age, Some(93));
        assert_eq!(result.rows[34].primary_age, None);
        assert_eq!(result.rows[39].primary_age, None);
        assert_eq!(result.rows[39].partner_age, Some(96));
    }

    #[test]
    fn test_balance_and_cashflow_identities() {
        let result = project(&Scenario::default_senior_couple()).unwrap();
        let rows = &result.rows;

        assert_abs_diff_eq!(
            rows[0].balance,
            result.start_savings + rows[0].cashflow,
            epsilon = 1e-9
        );
        for pair in rows.windows(2) {
            assert_abs_diff_eq!(
                pair[1].balance - pair[0].balance,
                pair[1].cashflow,
                epsilon = 1e-9
            );
        }
        for row in rows {
            assert_abs_diff_eq!(
                row.cashflow,
                row.income_total - row.expense_total,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_all_monetary_fields_stored_rounded() {
        let result = project(&Scenario::default_senior_couple()).unwrap();

        let is_one_decimal = |x: f64| ((x * 10.0).round() - x * 10.0).abs() < 1e-6;
        for row in &result.rows {
            let fields = [
                row.primary_income,
                row.partner_income,
                row.primary_lump_income,
                row.partner_lump_income,
                row.income_total,
                row.living_total,
                row.primary_care,
                row.partner_care,
                row.primary_lump_expense,
                row.partner_lump_expense,
                row.expense_total,
                row.cashflow,
                row.balance,
            ];
            for f in fields {
                assert!(is_one_decimal(f), "year {} field {} not 1-decimal", row.year, f);
            }
            for &c in &row.living {
                assert!(is_one_decimal(c));
            }
            // Per-field rounding keeps the subtotal within a tenth of the
            // re-summed category values
            let resum: f64 = row.living.iter().sum();
            assert!((resum - row.living_total).abs() <= 0.1 + 1e-9);
        }
    }

    #[test]
    fn test_category_series_lookup() {
        let result = project(&Scenario::default_senior_couple()).unwrap();

        let food = result.category_series(LivingCategory::Food).unwrap();
        assert_eq!(food.len(), 40);
        assert_abs_diff_eq!(food[0], 102.0); // 8.5 * 12

        let mut no_medical = Scenario::default_senior_couple();
        no_medical.living.retain(|c| c.category != LivingCategory::Medical);
        let result = project(&no_medical).unwrap();
        assert!(result.category_series(LivingCategory::Medical).is_none());
    }

    #[test]
    fn test_summary_statistics() {
        let result = project(&Scenario::default_senior_couple()).unwrap();
        let summary = result.summary();

        assert_eq!(summary.horizon_years, 40);
        assert_eq!(summary.survivor_start_year, Some(35));
        assert_abs_diff_eq!(summary.final_balance, result.rows[39].balance);
        assert!(summary.min_balance <= summary.final_balance);
        assert!(summary.deficit_years > 0);
    }

    #[test]
    fn test_rerun_is_deterministic() {
        let engine = ProjectionEngine::new(Scenario::default_senior_couple()).unwrap();
        let a = engine.run();
        let b = engine.run();
        for (ra, rb) in a.rows.iter().zip(&b.rows) {
            assert_abs_diff_eq!(ra.balance, rb.balance);
            assert_abs_diff_eq!(ra.cashflow, rb.cashflow);
        }
    }
}
