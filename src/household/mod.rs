//! Household scenario inputs and JSON loading

mod data;
pub mod loader;

pub use data::{
    CareProfile, CategoryConfig, IncomeProfile, LivingCategory, LumpSlot, PersonParams,
    PersonRole, Scenario, ScenarioError, SingleSurvivorPolicy,
};
pub use loader::{load_scenario, load_scenario_from_reader, save_scenario};
