//! Household input structures: people, incomes, living costs, care, lump events

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::growth;
use crate::model::Lifespan;

/// Role of a person within the two-person household
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersonRole {
    Primary,
    Partner,
}

impl fmt::Display for PersonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonRole::Primary => write!(f, "primary"),
            PersonRole::Partner => write!(f, "partner"),
        }
    }
}

/// Scenario rejection reasons, surfaced before any projection row is produced
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(
        "{role}: age at death ({age_at_death}) is earlier than current age ({current_age})"
    )]
    InvalidLifespan {
        role: PersonRole,
        current_age: u32,
        age_at_death: u32,
    },
}

/// Annual income with an optional one-time step change at a trigger age
///
/// The step resets the compounding clock: from `step_age` onward the income
/// is `post_step_amount` grown at `post_step_growth_pct` for the years
/// elapsed since `step_age`, not a continuation of the pre-step curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeProfile {
    /// Current annual income
    pub base_amount: f64,
    /// Annual growth of the pre-step income, in percent
    pub growth_pct: f64,
    /// Age at which the step takes effect; 0 disables the step
    #[serde(default)]
    pub step_age: u32,
    /// Annual income from the step age onward
    #[serde(default)]
    pub post_step_amount: f64,
    /// Annual growth of the post-step income, in percent
    #[serde(default)]
    pub post_step_growth_pct: f64,
}

impl IncomeProfile {
    /// Flat income with no growth and no step
    pub fn flat(annual: f64) -> Self {
        Self {
            base_amount: annual,
            growth_pct: 0.0,
            step_age: 0,
            post_step_amount: 0.0,
            post_step_growth_pct: 0.0,
        }
    }

    /// Annual income at an attained age, for a person whose projection
    /// started at `current_age`. The post-step exponent is anchored at the
    /// step age itself.
    pub fn annual_at(&self, age: u32, current_age: u32) -> f64 {
        if self.step_age > 0 && age >= self.step_age {
            growth::grow(
                self.post_step_amount,
                self.post_step_growth_pct,
                age - self.step_age,
            )
        } else {
            growth::grow(self.base_amount, self.growth_pct, age.saturating_sub(current_age))
        }
    }
}

/// The closed, display-ordered set of household living-cost categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LivingCategory {
    Food,
    Utilities,
    Communications,
    Transport,
    Leisure,
    Medical,
    HousingFees,
    Other,
}

impl LivingCategory {
    /// All categories in display order
    pub const ALL: [LivingCategory; 8] = [
        LivingCategory::Food,
        LivingCategory::Utilities,
        LivingCategory::Communications,
        LivingCategory::Transport,
        LivingCategory::Leisure,
        LivingCategory::Medical,
        LivingCategory::HousingFees,
        LivingCategory::Other,
    ];

    /// Display label for tables and CSV headers
    pub fn label(&self) -> &'static str {
        match self {
            LivingCategory::Food => "Food",
            LivingCategory::Utilities => "Utilities",
            LivingCategory::Communications => "Communications",
            LivingCategory::Transport => "Transport",
            LivingCategory::Leisure => "Leisure",
            LivingCategory::Medical => "Medical",
            LivingCategory::HousingFees => "Housing fees",
            LivingCategory::Other => "Other",
        }
    }
}

/// Monthly living cost for one category, with an optional step after a
/// number of elapsed years
///
/// Living costs are household-level: the growth clock is anchored at
/// year-offset 0 of the projection, not at either person's age.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub category: LivingCategory,
    /// Current monthly cost
    pub monthly_amount: f64,
    /// Annual growth of the pre-step cost, in percent
    pub growth_pct: f64,
    /// Years until the step takes effect; 0 disables the step
    #[serde(default)]
    pub years_until_step: u32,
    /// Monthly cost from the step onward
    #[serde(default)]
    pub post_step_monthly_amount: f64,
    /// Annual growth of the post-step cost, in percent
    #[serde(default)]
    pub post_step_growth_pct: f64,
}

impl CategoryConfig {
    /// Couple-era monthly cost at year-offset `t`
    pub fn monthly_at(&self, t: u32) -> f64 {
        growth::two_phase(
            self.monthly_amount,
            self.growth_pct,
            self.post_step_monthly_amount,
            self.post_step_growth_pct,
            self.years_until_step,
            t,
        )
    }
}

/// Long-term-care cost for one person, starting at a configured age
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareProfile {
    /// Age from which care costs apply; 0 disables care costs entirely
    #[serde(default)]
    pub start_age: u32,
    /// Monthly care cost at the start age
    #[serde(default)]
    pub monthly_amount: f64,
    /// Annual growth in percent, compounding from the start age
    #[serde(default)]
    pub growth_pct: f64,
}

impl CareProfile {
    /// No care costs
    pub fn none() -> Self {
        Self { start_age: 0, monthly_amount: 0.0, growth_pct: 0.0 }
    }

    /// Monthly care cost at an attained age, 0 before the start age
    pub fn monthly_at(&self, age: u32) -> f64 {
        if self.start_age > 0 && age >= self.start_age {
            growth::grow(self.monthly_amount, self.growth_pct, age - self.start_age)
        } else {
            0.0
        }
    }
}

/// One user-declared lump event slot (income or expense)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LumpSlot {
    pub enabled: bool,
    pub trigger_age: u32,
    pub amount: f64,
}

impl LumpSlot {
    pub fn new(trigger_age: u32, amount: f64) -> Self {
        Self { enabled: true, trigger_age, amount }
    }

    pub fn disabled() -> Self {
        Self { enabled: false, trigger_age: 0, amount: 0.0 }
    }
}

/// Scaling applied to couple-era living costs once one spouse has died
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SingleSurvivorPolicy {
    /// Percentage of the last couple-era cost carried by the survivor,
    /// clamped to 0–200 when applied
    pub ratio_pct: f64,
}

impl SingleSurvivorPolicy {
    /// Effective scaling fraction in [0.0, 2.0]
    pub fn ratio(&self) -> f64 {
        (self.ratio_pct / 100.0).clamp(0.0, 2.0)
    }
}

/// All inputs for one person: lifespan, income, care, lump events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonParams {
    pub current_age: u32,
    pub age_at_death: u32,
    pub income: IncomeProfile,
    #[serde(default = "CareProfile::none")]
    pub care: CareProfile,
    /// Up to three declared lump-income slots; same-age slots accumulate
    #[serde(default)]
    pub lump_income: Vec<LumpSlot>,
    /// Up to three declared lump-expense slots; same-age slots accumulate
    #[serde(default)]
    pub lump_expense: Vec<LumpSlot>,
}

impl PersonParams {
    pub fn lifespan(&self) -> Lifespan {
        Lifespan::new(self.current_age, self.age_at_death)
    }
}

/// Full parameter bag for one projection run
///
/// The engine copies the scenario at construction and never mutates the
/// caller's copy. `survivor_policy: None` selects the simple engine
/// variant with no single-survivor cost tapering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub primary: PersonParams,
    pub partner: PersonParams,
    /// Living-cost categories, in display order
    pub living: Vec<CategoryConfig>,
    #[serde(default)]
    pub survivor_policy: Option<SingleSurvivorPolicy>,
    /// Savings balance at the start of year 1
    #[serde(default)]
    pub start_savings: f64,
}

impl Scenario {
    /// Reject scenarios where either person's assumed death precedes their
    /// current age. This is the only engine-level validation; numeric
    /// ranges are the input form's responsibility.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        for (role, person) in [
            (PersonRole::Primary, &self.primary),
            (PersonRole::Partner, &self.partner),
        ] {
            if person.age_at_death < person.current_age {
                return Err(ScenarioError::InvalidLifespan {
                    role,
                    current_age: person.current_age,
                    age_at_death: person.age_at_death,
                });
            }
        }
        Ok(())
    }

    /// Built-in senior-couple scenario used as the CLI default
    pub fn default_senior_couple() -> Self {
        let cat = |category, m, g, after, m2, g2| CategoryConfig {
            category,
            monthly_amount: m,
            growth_pct: g,
            years_until_step: after,
            post_step_monthly_amount: m2,
            post_step_growth_pct: g2,
        };

        Self {
            primary: PersonParams {
                current_age: 60,
                age_at_death: 93,
                income: IncomeProfile {
                    base_amount: 500.0,
                    growth_pct: 2.0,
                    step_age: 65,
                    post_step_amount: 180.0,
                    post_step_growth_pct: 1.0,
                },
                care: CareProfile { start_age: 88, monthly_amount: 30.0, growth_pct: 2.5 },
                lump_income: vec![
                    LumpSlot::new(65, 1500.0),
                    LumpSlot::new(70, 200.0),
                    LumpSlot::disabled(),
                ],
                lump_expense: vec![
                    LumpSlot::new(65, 200.0),
                    LumpSlot::new(70, 150.0),
                    LumpSlot::new(88, 100.0),
                ],
            },
            partner: PersonParams {
                current_age: 57,
                age_at_death: 96,
                income: IncomeProfile {
                    base_amount: 300.0,
                    growth_pct: 2.0,
                    step_age: 65,
                    post_step_amount: 160.0,
                    post_step_growth_pct: 1.0,
                },
                care: CareProfile { start_age: 90, monthly_amount: 35.0, growth_pct: 2.5 },
                lump_income: vec![
                    LumpSlot::new(65, 700.0),
                    LumpSlot::new(72, 300.0),
                    LumpSlot::disabled(),
                ],
                lump_expense: vec![
                    LumpSlot::new(60, 50.0),
                    LumpSlot::new(65, 100.0),
                    LumpSlot::new(90, 100.0),
                ],
            },
            living: vec![
                cat(LivingCategory::Food, 8.5, 2.0, 8, 5.5, 2.5),
                cat(LivingCategory::Utilities, 3.5, 2.0, 8, 2.0, 2.5),
                cat(LivingCategory::Communications, 2.0, 2.0, 8, 0.5, 2.5),
                cat(LivingCategory::Transport, 2.0, 2.0, 8, 0.8, 2.5),
                cat(LivingCategory::Leisure, 3.0, 2.0, 8, 0.8, 2.5),
                cat(LivingCategory::Medical, 1.8, 2.0, 10, 3.0, 3.0),
                cat(LivingCategory::HousingFees, 3.0, 2.0, 10, 4.0, 2.5),
                cat(LivingCategory::Other, 6.0, 2.0, 10, 3.0, 2.5),
            ],
            survivor_policy: Some(SingleSurvivorPolicy { ratio_pct: 75.0 }),
            start_savings: 1500.0,
        }
    }
}
