/// Dollar spot index: 0/1 contributions from humidity, wetness, and
/// consecutive-rain conditions over a 7-day trailing window.
use turfcast_weather::daily::DailyRecord;
use turfcast_weather::hourly::f_to_c;

pub(crate) const WINDOW_DAYS: usize = 7;

/// Qualifying humid-warm hours over the window that trigger the
/// humidity contribution.
const HUMID_WARM_HOURS_GUARD: usize = 3;
const HUMID_WARM_RH: f64 = 90.0;
const HUMID_WARM_TEMP_C: f64 = 25.0;

/// 3-day mean wet hours triggering the wetness contribution.
const WET_MEAN_GUARD: f64 = 8.0;

/// Mean daily temperature (deg C) mild enough for infection.
const MILD_TEMP_C: f64 = 15.0;

/// Consecutive rain days (ending today) triggering the rain contribution.
const RAIN_STREAK_GUARD: usize = 3;

/// Score a 7-day trailing window ending at today.
pub fn score_dollar_spot(window: &[DailyRecord]) -> f64 {
    debug_assert_eq!(window.len(), WINDOW_DAYS);
    let today = &window[WINDOW_DAYS - 1];
    let today_temp_c = today.avg_temp_c();
    let mut index = 0.0;

    // Hours both humid and warm anywhere in the window.
    let humid_warm: usize = window.iter().map(humid_warm_hours).sum();
    if humid_warm >= HUMID_WARM_HOURS_GUARD && today_temp_c >= MILD_TEMP_C {
        index += 1.0;
    }

    // Sustained canopy wetness over the last three days.
    let wet3 = window[WINDOW_DAYS - 3..]
        .iter()
        .map(|d| d.wet_hours() as f64)
        .sum::<f64>()
        / 3.0;
    if wet3 >= WET_MEAN_GUARD && today_temp_c >= MILD_TEMP_C {
        index += 1.0;
    }

    // A warm run of rainy days ending today.
    let (streak, streak_temp_c) = rain_streak(window);
    if streak >= RAIN_STREAK_GUARD && streak_temp_c >= MILD_TEMP_C {
        index += 1.0;
    }

    index
}

fn humid_warm_hours(day: &DailyRecord) -> usize {
    day.hours()
        .iter()
        .filter(|h| h.rh > HUMID_WARM_RH && f_to_c(h.temp_f) > HUMID_WARM_TEMP_C)
        .count()
}

/// Length and mean temperature of the consecutive-rain-day run ending at
/// the window's last day.
fn rain_streak(window: &[DailyRecord]) -> (usize, f64) {
    let streak = window.iter().rev().take_while(|d| d.rained()).count();
    if streak == 0 {
        return (0, 0.0);
    }
    let temp = window[window.len() - streak..]
        .iter()
        .map(|d| d.avg_temp_c())
        .sum::<f64>()
        / streak as f64;
    (streak, temp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::test_support::{records, DaySpec};

    fn mild() -> DaySpec {
        DaySpec {
            max_temp_f: 80.0,
            min_temp_f: 60.0,
            ..DaySpec::default()
        }
    }

    #[test]
    fn dry_mild_week_scores_zero() {
        let days = records("2024-06-01", &[mild(); 7]);
        assert_eq!(score_dollar_spot(&days), 0.0);
    }

    #[test]
    fn sustained_wetness_scores_one() {
        let days = records(
            "2024-06-01",
            &[DaySpec {
                dew_hours: 12,
                ..mild()
            }; 7],
        );
        assert_eq!(score_dollar_spot(&days), 1.0);
    }

    #[test]
    fn humid_warm_hours_score_when_today_is_mild() {
        // 86F through the humid half of the day: qualifying hours are both
        // above 90% RH and above 25C.
        let days = records(
            "2024-06-01",
            &[DaySpec {
                max_temp_f: 86.0,
                min_temp_f: 86.0,
                humid_hours: 4,
                humid_rh: 93.0,
                ..DaySpec::default()
            }; 7],
        );
        assert_eq!(score_dollar_spot(&days), 1.0);
    }

    #[test]
    fn warm_rain_streak_scores_one() {
        let mut specs = vec![mild(); 7];
        for spec in specs.iter_mut().skip(4) {
            spec.rain_hours = 2;
        }
        let days = records("2024-06-01", &specs);
        assert_eq!(score_dollar_spot(&days), 1.0);
    }

    #[test]
    fn cold_days_suppress_every_contribution() {
        let days = records(
            "2024-04-01",
            &[DaySpec {
                max_temp_f: 50.0,
                min_temp_f: 40.0,
                dew_hours: 12,
                rain_hours: 3,
                ..DaySpec::default()
            }; 7],
        );
        assert_eq!(score_dollar_spot(&days), 0.0);
    }
}
