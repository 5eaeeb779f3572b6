/// Growth potential: temperature, soil saturation, and day length
/// combined into a 0-100 daily score.
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use turfcast_weather::series::DateValueSeries;
use turfcast_weather::Result;

use crate::rolling::rolling_mean;

/// Days in the published trailing average.
pub const REPORTING_WINDOW: usize = 5;

/// Saturation below this contributes nothing.
pub const SATURATION_RAMP_START: f64 = 0.20;

/// Saturation where the linear ramp hands off to the Gaussian tail.
pub const SATURATION_KNEE: f64 = 0.50;

/// Width of the Gaussian tail above the knee.
const SATURATION_SIGMA: f64 = 0.4;

/// Axial tilt driving the solar declination approximation, degrees.
const AXIAL_TILT_DEG: f64 = 23.45;

/// Day-of-year of the summer solstice, northern and southern hemisphere.
const SOLSTICE_NORTH: u32 = 172;
const SOLSTICE_SOUTH: u32 = 355;

/// Tuning for the growth model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthParams {
    /// Optimal mean temperature for growth, deg C.
    pub optimum_temp_c: f64,
    /// Width of the Gaussian temperature response.
    pub temp_spread_c: f64,
    /// Site latitude, degrees (negative south).
    pub latitude_deg: f64,
}

impl GrowthParams {
    /// Cool-season turf defaults at a given latitude.
    pub fn cool_season(latitude_deg: f64) -> Self {
        Self {
            optimum_temp_c: 20.0,
            temp_spread_c: 5.5,
            latitude_deg,
        }
    }
}

/// One day's growth inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthDay {
    pub date: NaiveDate,
    pub avg_temp_c: f64,
    /// Soil water as a fraction of saturation, from the simulator.
    pub saturation_fraction: f64,
}

/// Daily scores plus the published trailing average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPotential {
    pub daily: DateValueSeries,
    pub five_day_avg: DateValueSeries,
}

/// Gaussian temperature response in [0, 1], peaking at the optimum.
pub fn temperature_factor(avg_temp_c: f64, params: &GrowthParams) -> f64 {
    let z = (avg_temp_c - params.optimum_temp_c) / params.temp_spread_c;
    (-0.5 * z * z).exp()
}

/// Piecewise soil-saturation response in [0, 1].
///
/// Zero below 20% saturation, a linear ramp from 20% to the 50% knee, and
/// a Gaussian decline above the knee (waterlogging). Continuous at both
/// boundaries: the ramp starts at zero and reaches exactly the Gaussian's
/// peak value at the knee.
pub fn saturation_factor(fraction: f64) -> f64 {
    if fraction < SATURATION_RAMP_START {
        0.0
    } else if fraction <= SATURATION_KNEE {
        (fraction - SATURATION_RAMP_START) / (SATURATION_KNEE - SATURATION_RAMP_START)
    } else {
        let z = (fraction - SATURATION_KNEE) / SATURATION_SIGMA;
        (-0.5 * z * z).exp()
    }
}

/// Daylight hours from the solar-declination approximation.
pub fn day_length_hours(date: NaiveDate, latitude_deg: f64) -> f64 {
    day_length_for_ordinal(date.ordinal(), latitude_deg)
}

/// Daylight on the year's longest day for this hemisphere.
pub fn longest_day_hours(latitude_deg: f64) -> f64 {
    let solstice = if latitude_deg >= 0.0 {
        SOLSTICE_NORTH
    } else {
        SOLSTICE_SOUTH
    };
    day_length_for_ordinal(solstice, latitude_deg)
}

/// Today's daylight over the longest day's, in [0, 1].
pub fn day_length_factor(date: NaiveDate, latitude_deg: f64) -> f64 {
    let longest = longest_day_hours(latitude_deg);
    if longest <= 0.0 {
        return 0.0;
    }
    (day_length_hours(date, latitude_deg) / longest).min(1.0)
}

fn day_length_for_ordinal(ordinal: u32, latitude_deg: f64) -> f64 {
    let declination_rad = AXIAL_TILT_DEG.to_radians()
        * (2.0 * PI * (284.0 + ordinal as f64) / 365.0).sin();
    // cos of the sunset hour angle; clamped for polar day/night.
    let cos_omega = (-latitude_deg.to_radians().tan() * declination_rad.tan()).clamp(-1.0, 1.0);
    let omega = cos_omega.acos();
    24.0 * omega / PI
}

/// Score one day: the three factors multiplied, scaled to 0-100.
pub fn daily_score(day: &GrowthDay, params: &GrowthParams) -> f64 {
    let score = temperature_factor(day.avg_temp_c, params)
        * saturation_factor(day.saturation_fraction)
        * day_length_factor(day.date, params.latitude_deg)
        * 100.0;
    score.max(0.0)
}

/// Compute the growth potential over a run of days.
pub fn growth_potential(days: &[GrowthDay], params: &GrowthParams) -> Result<GrowthPotential> {
    let mut daily = DateValueSeries::with_capacity(days.len());
    for day in days {
        daily.push(day.date, daily_score(day, params))?;
    }
    let five_day_avg = rolling_mean(&daily, REPORTING_WINDOW)?;
    Ok(GrowthPotential {
        daily,
        five_day_avg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Duration;

    #[test]
    fn temperature_peaks_at_optimum() {
        let params = GrowthParams::cool_season(40.0);
        assert_relative_eq!(temperature_factor(20.0, &params), 1.0, epsilon = 1e-12);
        assert!(temperature_factor(10.0, &params) < 1.0);
        assert!(temperature_factor(30.0, &params) < 1.0);
        // Symmetric about the optimum.
        assert_relative_eq!(
            temperature_factor(15.0, &params),
            temperature_factor(25.0, &params),
            epsilon = 1e-12
        );
    }

    #[test]
    fn saturation_factor_is_continuous_at_both_knees() {
        let eps = 1e-9;
        assert_relative_eq!(
            saturation_factor(SATURATION_RAMP_START - eps),
            saturation_factor(SATURATION_RAMP_START + eps),
            epsilon = 1e-6
        );
        assert_relative_eq!(
            saturation_factor(SATURATION_KNEE - eps),
            saturation_factor(SATURATION_KNEE + eps),
            epsilon = 1e-6
        );
        assert_eq!(saturation_factor(0.1), 0.0);
        assert_relative_eq!(saturation_factor(0.35), 0.5, epsilon = 1e-12);
        assert_relative_eq!(saturation_factor(0.5), 1.0, epsilon = 1e-12);
        assert!(saturation_factor(0.95) < 1.0);
    }

    #[test]
    fn june_days_are_longer_than_december_at_forty_north() {
        let june = day_length_hours("2024-06-21".parse().unwrap(), 40.0);
        let december = day_length_hours("2024-12-21".parse().unwrap(), 40.0);
        assert!(june > 14.0 && june < 16.0, "june: {june}");
        assert!(december > 8.0 && december < 10.0, "december: {december}");
    }

    #[test]
    fn equator_sits_near_twelve_hours_year_round() {
        for date in ["2024-03-21", "2024-06-21", "2024-12-21"] {
            let hours = day_length_hours(date.parse().unwrap(), 0.0);
            assert_relative_eq!(hours, 12.0, epsilon = 0.2);
        }
    }

    #[test]
    fn day_length_factor_tops_out_at_the_solstice() {
        let factor = day_length_factor("2024-06-20".parse().unwrap(), 42.0);
        assert!(factor > 0.99);
        let winter = day_length_factor("2024-12-20".parse().unwrap(), 42.0);
        assert!(winter < 0.7);
    }

    #[test]
    fn southern_hemisphere_normalizes_against_its_own_solstice() {
        let factor = day_length_factor("2024-12-21".parse().unwrap(), -35.0);
        assert!(factor > 0.99, "december is peak summer at 35S: {factor}");
    }

    #[test]
    fn scores_stay_in_range_and_average_over_five_days() {
        let start: NaiveDate = "2024-06-01".parse().unwrap();
        let params = GrowthParams::cool_season(40.0);
        let days: Vec<GrowthDay> = (0..10)
            .map(|i| GrowthDay {
                date: start + Duration::days(i),
                avg_temp_c: 14.0 + i as f64,
                saturation_fraction: 0.45,
            })
            .collect();
        let potential = growth_potential(&days, &params).unwrap();
        assert_eq!(potential.daily.len(), 10);
        assert_eq!(potential.five_day_avg.len(), 6);
        for point in &potential.daily {
            assert!((0.0..=100.0).contains(&point.value));
        }
    }

    #[test]
    fn dry_soil_zeroes_the_score() {
        let params = GrowthParams::cool_season(40.0);
        let day = GrowthDay {
            date: "2024-06-21".parse().unwrap(),
            avg_temp_c: 20.0,
            saturation_fraction: 0.1,
        };
        assert_eq!(daily_score(&day, &params), 0.0);
    }
}
