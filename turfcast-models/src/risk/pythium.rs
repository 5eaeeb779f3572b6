/// Pythium blight index: linear combination of one day's temperature
/// extremes and very-humid-hour count.
use turfcast_weather::daily::DailyRecord;

const MAX_TEMP_PIVOT_F: f64 = 86.0;
const MIN_TEMP_PIVOT_F: f64 = 68.0;
const HUMID_RH: f64 = 89.0;
const HUMID_HOURS_PIVOT: f64 = 6.0;
const HUMID_WEIGHT: f64 = 0.5;

/// Score one day.
pub fn score_pythium(day: &DailyRecord) -> f64 {
    (day.max_temp_f() - MAX_TEMP_PIVOT_F)
        + (day.min_temp_f() - MIN_TEMP_PIVOT_F)
        + HUMID_WEIGHT * (day.hours_rh_above(HUMID_RH) as f64 - HUMID_HOURS_PIVOT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::test_support::{records, DaySpec};
    use approx::assert_relative_eq;

    #[test]
    fn hot_humid_night_is_positive() {
        let days = records(
            "2024-07-15",
            &[DaySpec {
                max_temp_f: 92.0,
                min_temp_f: 72.0,
                humid_hours: 10,
                ..DaySpec::default()
            }],
        );
        // (92-86) + (72-68) + 0.5*(10-6) = 12.
        assert_relative_eq!(score_pythium(&days[0]), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn cool_dry_day_is_negative() {
        let days = records(
            "2024-05-15",
            &[DaySpec {
                max_temp_f: 70.0,
                min_temp_f: 50.0,
                ..DaySpec::default()
            }],
        );
        // (70-86) + (50-68) + 0.5*(0-6) = -37.
        assert_relative_eq!(score_pythium(&days[0]), -37.0, epsilon = 1e-12);
    }
}
