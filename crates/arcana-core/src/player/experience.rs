//! Experience table and level thresholds

use crate::consts::PY_MAX_LEVEL;

/// Base experience needed to reach level `i + 2`
pub const PLAYER_EXP: [i32; PY_MAX_LEVEL as usize] = [
    10, 25, 45, 70, 100, 140, 200, 280, 380, 500, 650, 850, 1100, 1400, 1800, 2300, 2900, 3600,
    4400, 5400, 6800, 8400, 10200, 12500, 17500, 25000, 35000, 50000, 75000, 100000, 150000,
    200000, 275000, 350000, 450000, 550000, 700000, 850000, 1000000, 1250000, 1500000, 1800000,
    2100000, 2400000, 2700000, 3000000, 3500000, 4000000, 4500000, 5000000,
];

/// Maximum experience a character can hold
pub const PY_MAX_EXP: i32 = 99_999_999;

/// Experience needed to advance past `level`, scaled by `exp_factor` percent
pub fn exp_to_advance(level: i32, exp_factor: i32) -> Option<i32> {
    if level < 1 || level >= PY_MAX_LEVEL {
        return None;
    }
    let base = i64::from(PLAYER_EXP[(level - 1) as usize]);
    Some((base * i64::from(exp_factor) / 100) as i32)
}

/// Level reached with `exp` points
pub fn level_for_exp(exp: i32, exp_factor: i32) -> i32 {
    let mut level = 1;
    while let Some(needed) = exp_to_advance(level, exp_factor) {
        if exp < needed {
            break;
        }
        level += 1;
    }
    level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(exp_to_advance(1, 100), Some(10));
        assert_eq!(exp_to_advance(2, 200), Some(50));
        assert_eq!(exp_to_advance(PY_MAX_LEVEL, 100), None);
    }

    #[test]
    fn test_level_for_exp() {
        assert_eq!(level_for_exp(0, 100), 1);
        assert_eq!(level_for_exp(9, 100), 1);
        assert_eq!(level_for_exp(10, 100), 2);
        assert_eq!(level_for_exp(45, 100), 4);
        assert_eq!(level_for_exp(PY_MAX_EXP, 100), PY_MAX_LEVEL);
    }

    #[test]
    fn test_exp_factor_slows_levels() {
        assert!(level_for_exp(1000, 250) < level_for_exp(1000, 100));
    }
}
