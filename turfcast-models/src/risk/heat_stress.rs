/// Heat stress: the day's cached heat-stress-hour count.
///
/// Hours qualify in the second half of the turf day when the temperature
/// tops 69F and temperature plus relative humidity exceeds 150 (see
/// [`turfcast_weather::daily`]). Smoothing into the published season
/// series happens in the risk module.
use turfcast_weather::daily::DailyRecord;

/// Score one day.
pub fn score_heat_stress(day: &DailyRecord) -> f64 {
    day.heat_stress_hours() as f64
}
