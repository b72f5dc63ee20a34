//! Sparse age-keyed maps of one-off lump income/expense events

use std::collections::BTreeMap;

use crate::household::LumpSlot;

/// Lump-event amounts keyed by trigger age
///
/// Built once per projection run per (person, event kind). Two enabled
/// slots at the same age simply sum; the engine never distinguishes two
/// windfalls landing in the same year.
#[derive(Debug, Clone, Default)]
pub struct EventMap {
    by_age: BTreeMap<u32, f64>,
}

impl EventMap {
    /// Accumulate slots into an age-keyed map. A slot contributes only
    /// when it is enabled with a positive age and a positive amount.
    pub fn build(slots: &[LumpSlot]) -> Self {
        let mut by_age = BTreeMap::new();
        for slot in slots {
            if slot.enabled && slot.trigger_age > 0 && slot.amount > 0.0 {
                *by_age.entry(slot.trigger_age).or_insert(0.0) += slot.amount;
            }
        }
        Self { by_age }
    }

    /// Amount triggered at the given age, 0 when none
    pub fn amount_at(&self, age: u32) -> f64 {
        self.by_age.get(&age).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.by_age.is_empty()
    }
}
