/// Anthracnose severity index.
///
/// Polynomial in the 3-day mean temperature and 3-day mean leaf-wetness
/// hours, with guards suppressing false risk in cold or dry spells.
use turfcast_weather::daily::DailyRecord;

pub(crate) const WINDOW_DAYS: usize = 3;

/// Mean temperature below this (deg C) forces the index to -1.
const COLD_GUARD_C: f64 = 4.0;

/// Mean wet hours below this reduce the index by the dry penalty.
const DRY_GUARD_HOURS: f64 = 8.0;
const DRY_PENALTY: f64 = 3.0;

// Severity polynomial coefficients.
const INTERCEPT: f64 = 4.0233;
const WET_LINEAR: f64 = -0.2283;
const TEMP_LINEAR: f64 = -0.5308;
const WET_QUADRATIC: f64 = -0.0013;
const TEMP_QUADRATIC: f64 = 0.0197;
const CROSS_TERM: f64 = 0.0155;

/// Score a 3-day trailing window ending at today.
pub fn score_anthracnose(window: &[DailyRecord]) -> f64 {
    debug_assert_eq!(window.len(), WINDOW_DAYS);
    let n = window.len() as f64;
    let temp_c = window.iter().map(|d| d.avg_temp_c()).sum::<f64>() / n;
    let wet = window.iter().map(|d| d.wet_hours() as f64).sum::<f64>() / n;

    if temp_c < COLD_GUARD_C {
        return -1.0;
    }

    let mut index = INTERCEPT
        + WET_LINEAR * wet
        + TEMP_LINEAR * temp_c
        + WET_QUADRATIC * wet * wet
        + TEMP_QUADRATIC * temp_c * temp_c
        + CROSS_TERM * temp_c * wet;

    if wet < DRY_GUARD_HOURS {
        index -= DRY_PENALTY;
    }
    index
}
