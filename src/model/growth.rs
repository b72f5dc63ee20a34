//! Compound growth curves for incomes, living costs, and care costs

/// Grow a base amount at an annual percentage rate over whole periods
///
/// `grow(100.0, 2.0, 3)` = 100 * 1.02^3. Growth may be negative (decline)
/// or exceed 100%; the result is never floored at zero here, eligibility
/// checks upstream decide whether the amount applies at all.
pub fn grow(base: f64, growth_pct: f64, periods: u32) -> f64 {
    base * (1.0 + growth_pct / 100.0).powi(periods as i32)
}

/// Two-phase growth with a one-time step change at `switch_offset`
///
/// Before the switch (or when `switch_offset` is 0, meaning the step is
/// disabled) the value follows `grow(base1, growth1, elapsed)`. From the
/// switch onward the compounding clock resets: the value is
/// `grow(base2, growth2, elapsed - switch_offset)`, a fresh exponential
/// anchored at the new base rather than a continuation of the old curve.
pub fn two_phase(
    base1: f64,
    growth1_pct: f64,
    base2: f64,
    growth2_pct: f64,
    switch_offset: u32,
    elapsed: u32,
) -> f64 {
    if switch_offset == 0 || elapsed < switch_offset {
        grow(base1, growth1_pct, elapsed)
    } else {
        grow(base2, growth2_pct, elapsed - switch_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_grow_basic() {
        assert_abs_diff_eq!(grow(100.0, 0.0, 10), 100.0);
        assert_abs_diff_eq!(grow(100.0, 2.0, 0), 100.0);
        assert_abs_diff_eq!(grow(100.0, 2.0, 1), 102.0);
        assert_abs_diff_eq!(grow(100.0, 2.0, 2), 104.04, epsilon = 1e-9);
    }

    #[test]
    fn test_grow_negative_rate_declines() {
        assert_abs_diff_eq!(grow(100.0, -10.0, 1), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(grow(100.0, -10.0, 2), 81.0, epsilon = 1e-9);
    }

    #[test]
    fn test_grow_over_100_pct_uncapped() {
        assert_abs_diff_eq!(grow(1.0, 150.0, 2), 6.25, epsilon = 1e-9);
    }

    #[test]
    fn test_two_phase_disabled_switch_matches_single_phase() {
        for e in 0..60 {
            assert_abs_diff_eq!(
                two_phase(500.0, 2.0, 180.0, 1.0, 0, e),
                grow(500.0, 2.0, e),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_two_phase_resets_at_switch() {
        // At the switch instant the exponent is zero: exactly base2
        assert_abs_diff_eq!(two_phase(500.0, 2.0, 180.0, 1.0, 5, 5), 180.0);
        // One period later, one period of phase-2 growth
        assert_abs_diff_eq!(two_phase(500.0, 2.0, 180.0, 1.0, 5, 6), 181.8, epsilon = 1e-9);
    }

    #[test]
    fn test_two_phase_before_switch_follows_phase_one() {
        assert_abs_diff_eq!(two_phase(500.0, 2.0, 180.0, 1.0, 5, 4), grow(500.0, 2.0, 4));
    }
}
