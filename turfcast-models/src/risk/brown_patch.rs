/// Brown patch index: four ordinal contributions from one day's record.
use chrono::Datelike;
use turfcast_weather::daily::DailyRecord;

/// Mean relative humidity at or above this adds a point.
const HUMID_MEAN_RH: f64 = 80.0;

/// RH threshold for the banded very-humid-hour count.
const VERY_HUMID_RH: f64 = 95.0;
const VERY_HUMID_ONE_POINT: usize = 4;
const VERY_HUMID_TWO_POINTS: usize = 8;

/// Wet hours strictly above this add a point.
const WET_HOURS_GUARD: usize = 10;

/// Minimum temperature (deg C) that always satisfies the night-warmth term.
const WARM_NIGHT_C: f64 = 16.0;

/// Relaxed summer baseline (deg C), July through September.
const SUMMER_NIGHT_C: f64 = 12.0;

/// Score one day.
pub fn score_brown_patch(day: &DailyRecord) -> f64 {
    let mut index = 0.0;

    if day.avg_rh() >= HUMID_MEAN_RH {
        index += 1.0;
    }

    let very_humid = day.hours_rh_above(VERY_HUMID_RH);
    if very_humid >= VERY_HUMID_TWO_POINTS {
        index += 2.0;
    } else if very_humid >= VERY_HUMID_ONE_POINT {
        index += 1.0;
    }

    if day.wet_hours() > WET_HOURS_GUARD {
        index += 1.0;
    }

    let summer = (7..=9).contains(&day.date().month());
    let baseline = if summer { SUMMER_NIGHT_C } else { WARM_NIGHT_C };
    let min_c = day.min_temp_c();
    if min_c >= WARM_NIGHT_C || min_c >= baseline {
        index += 1.0;
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::test_support::{records, DaySpec};

    #[test]
    fn all_contributions_stack() {
        // 96% RH for 20 hours: mean RH 86.3, 20 very-humid hours; 12 wet
        // hours; 66F min (18.9C) in July.
        let days = records(
            "2024-07-01",
            &[DaySpec {
                max_temp_f: 82.0,
                min_temp_f: 66.0,
                humid_hours: 20,
                dew_hours: 12,
                ..DaySpec::default()
            }],
        );
        assert_eq!(score_brown_patch(&days[0]), 5.0);
    }

    #[test]
    fn very_humid_hours_are_banded() {
        let base = DaySpec {
            max_temp_f: 70.0,
            min_temp_f: 50.0,
            humid_rh: 96.0,
            dry_rh: 20.0,
            ..DaySpec::default()
        };
        // 5 very-humid hours: one point; 9: two points; 3: none.
        let one = records("2024-05-01", &[DaySpec { humid_hours: 5, ..base }]);
        let two = records("2024-05-01", &[DaySpec { humid_hours: 9, ..base }]);
        let none = records("2024-05-01", &[DaySpec { humid_hours: 3, ..base }]);
        assert_eq!(score_brown_patch(&one[0]), 1.0);
        assert_eq!(score_brown_patch(&two[0]), 2.0);
        assert_eq!(score_brown_patch(&none[0]), 0.0);
    }

    #[test]
    fn summer_months_relax_the_night_baseline() {
        // 55F min = 12.8C: warm enough only under the Jul-Sep baseline.
        let spec = DaySpec {
            max_temp_f: 75.0,
            min_temp_f: 55.0,
            ..DaySpec::default()
        };
        let july = records("2024-07-10", &[spec]);
        let may = records("2024-05-10", &[spec]);
        assert_eq!(score_brown_patch(&july[0]), 1.0);
        assert_eq!(score_brown_patch(&may[0]), 0.0);
    }

    #[test]
    fn sixteen_degree_night_scores_in_any_month() {
        let spec = DaySpec {
            max_temp_f: 78.0,
            min_temp_f: 62.0, // 16.7C
            ..DaySpec::default()
        };
        let may = records("2024-05-10", &[spec]);
        assert_eq!(score_brown_patch(&may[0]), 1.0);
    }
}
