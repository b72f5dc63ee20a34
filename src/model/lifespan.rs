//! Lifespan arithmetic: active year ranges and the single-survivor transition

use serde::{Deserialize, Serialize};

/// One person's assumed lifespan, in attained ages
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lifespan {
    pub current_age: u32,
    pub age_at_death: u32,
}

impl Lifespan {
    pub fn new(current_age: u32, age_at_death: u32) -> Self {
        Self { current_age, age_at_death }
    }

    /// Number of projected years this person is alive, inclusive of the
    /// current year. None when `age_at_death < current_age` (already
    /// deceased; normally rejected by scenario validation).
    pub fn years_alive(&self) -> Option<u32> {
        if self.age_at_death >= self.current_age {
            Some(self.age_at_death - self.current_age + 1)
        } else {
            None
        }
    }

    /// 1-indexed projection year in which the person dies
    pub fn death_year(&self) -> Option<u32> {
        self.years_alive()
    }

    /// Attained age at year-offset `t`
    pub fn age_at(&self, t: u32) -> u32 {
        self.current_age + t
    }

    /// Whether the person is alive at year-offset `t`
    pub fn is_alive(&self, t: u32) -> bool {
        self.age_at(t) <= self.age_at_death
    }
}

/// Both lifespans of the household, plus derived timing
#[derive(Debug, Clone, Copy)]
pub struct HouseholdClock {
    pub primary: Lifespan,
    pub partner: Lifespan,
}

impl HouseholdClock {
    pub fn new(primary: Lifespan, partner: Lifespan) -> Self {
        Self { primary, partner }
    }

    /// Projection horizon in years: the longer of the two remaining
    /// lifespans. A dead-on-arrival person contributes no years.
    pub fn horizon(&self) -> u32 {
        self.primary
            .years_alive()
            .unwrap_or(0)
            .max(self.partner.years_alive().unwrap_or(0))
    }

    /// First 1-indexed year of single-survivor status: one year after the
    /// earlier assumed death. Unclamped; the engine ignores a transition
    /// that falls outside `[1, horizon]`, so a household where both deaths
    /// land in the final year never enters single-survivor mode.
    pub fn survivor_start_year(&self) -> Option<u32> {
        match (self.primary.death_year(), self.partner.death_year()) {
            (Some(a), Some(b)) => Some(a.min(b) + 1),
            (Some(a), None) => Some(a + 1),
            (None, Some(b)) => Some(b + 1),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_years_alive_inclusive_of_current_year() {
        assert_eq!(Lifespan::new(60, 93).years_alive(), Some(34));
        assert_eq!(Lifespan::new(70, 70).years_alive(), Some(1));
        assert_eq!(Lifespan::new(60, 55).years_alive(), None);
    }

    #[test]
    fn test_alive_at_offset() {
        let l = Lifespan::new(60, 62);
        assert!(l.is_alive(0));
        assert!(l.is_alive(2));
        assert!(!l.is_alive(3));
    }

    #[test]
    fn test_horizon_is_longer_lifespan() {
        let clock = HouseholdClock::new(Lifespan::new(60, 93), Lifespan::new(57, 96));
        assert_eq!(clock.horizon(), 40);
    }

    #[test]
    fn test_horizon_ignores_deceased_person() {
        let clock = HouseholdClock::new(Lifespan::new(60, 55), Lifespan::new(57, 96));
        assert_eq!(clock.horizon(), 40);
    }

    #[test]
    fn test_survivor_start_is_year_after_earlier_death() {
        // Primary dies in year 1 (70/70), partner lives 31 years
        let clock = HouseholdClock::new(Lifespan::new(70, 70), Lifespan::new(60, 90));
        assert_eq!(clock.survivor_start_year(), Some(2));
    }

    #[test]
    fn test_survivor_start_with_one_deceased_person() {
        let clock = HouseholdClock::new(Lifespan::new(60, 55), Lifespan::new(57, 96));
        assert_eq!(clock.survivor_start_year(), Some(41));
    }

    #[test]
    fn test_simultaneous_final_year_deaths_transition_past_horizon() {
        // Both die in year 11; the transition year 12 exceeds the horizon,
        // so the engine will never apply it
        let clock = HouseholdClock::new(Lifespan::new(60, 70), Lifespan::new(60, 70));
        assert_eq!(clock.horizon(), 11);
        assert_eq!(clock.survivor_start_year(), Some(12));
    }
}
