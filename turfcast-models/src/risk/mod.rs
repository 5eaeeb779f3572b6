/// Pest and stress risk indices.
///
/// Five independent scoring functions, each a pure function of a trailing
/// window of daily records ending at "today". Raw daily scores are
/// smoothed into the output series; warm-up days consumed by the lookback
/// windows are excluded from the season series; processing stops at the
/// first date past the December 1 season cutoff.
use log::debug;
use serde::{Deserialize, Serialize};
use turfcast_weather::daily::DailyRecord;
use turfcast_weather::season::past_risk_cutoff;
use turfcast_weather::series::DateValueSeries;
use turfcast_weather::Result;

use crate::rolling::rolling_mean;

mod anthracnose;
mod brown_patch;
mod dollar_spot;
mod heat_stress;
mod pythium;

pub use anthracnose::score_anthracnose;
pub use brown_patch::score_brown_patch;
pub use dollar_spot::score_dollar_spot;
pub use heat_stress::score_heat_stress;
pub use pythium::score_pythium;

/// Window applied to the daily output series of every factor.
pub const DAILY_SMOOTHING_WINDOW: usize = 3;

/// Window of the seven-day-average output series.
pub const SEVEN_DAY_WINDOW: usize = 7;

/// The five modeled risk factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFactor {
    Anthracnose,
    BrownPatch,
    DollarSpot,
    PythiumBlight,
    HeatStress,
}

impl RiskFactor {
    pub const ALL: [RiskFactor; 5] = [
        RiskFactor::Anthracnose,
        RiskFactor::BrownPatch,
        RiskFactor::DollarSpot,
        RiskFactor::PythiumBlight,
        RiskFactor::HeatStress,
    ];

    /// Trailing daily records each score consumes, including today.
    pub fn window_days(self) -> usize {
        match self {
            RiskFactor::Anthracnose => anthracnose::WINDOW_DAYS,
            RiskFactor::DollarSpot => dollar_spot::WINDOW_DAYS,
            RiskFactor::BrownPatch | RiskFactor::PythiumBlight | RiskFactor::HeatStress => 1,
        }
    }

    /// Days at the start of the record that produce no score.
    pub fn warmup_days(self) -> usize {
        self.window_days() - 1
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskFactor::Anthracnose => "anthracnose",
            RiskFactor::BrownPatch => "brown patch",
            RiskFactor::DollarSpot => "dollar spot",
            RiskFactor::PythiumBlight => "pythium blight",
            RiskFactor::HeatStress => "heat stress",
        }
    }
}

/// One output series of a risk factor, tagged by kind so consumers
/// pattern-match instead of sniffing shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RiskSeries {
    /// Recent daily index, 3-day smoothed.
    Daily(DateValueSeries),
    /// 7-day rolling average of the raw index.
    SevenDayAvg(DateValueSeries),
    /// Full-season values after model warm-up.
    Season(DateValueSeries),
}

/// All output series for one factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub factor: RiskFactor,
    pub series: Vec<RiskSeries>,
}

impl RiskAssessment {
    pub fn daily(&self) -> Option<&DateValueSeries> {
        self.series.iter().find_map(|s| match s {
            RiskSeries::Daily(series) => Some(series),
            _ => None,
        })
    }

    pub fn seven_day_avg(&self) -> Option<&DateValueSeries> {
        self.series.iter().find_map(|s| match s {
            RiskSeries::SevenDayAvg(series) => Some(series),
            _ => None,
        })
    }

    pub fn season(&self) -> Option<&DateValueSeries> {
        self.series.iter().find_map(|s| match s {
            RiskSeries::Season(series) => Some(series),
            _ => None,
        })
    }
}

/// Raw daily index for one factor over the whole record.
///
/// Scores start once the factor's window is filled and stop at the first
/// date past the December 1 cutoff, so the output length is the number of
/// days processed minus the warm-up.
pub fn raw_series(factor: RiskFactor, days: &[DailyRecord]) -> Result<DateValueSeries> {
    let window = factor.window_days();
    let mut series = DateValueSeries::new();
    if days.len() < window {
        return Ok(series);
    }
    for end in window..=days.len() {
        let slice = &days[end - window..end];
        let today = &slice[window - 1];
        if past_risk_cutoff(today.date()) {
            debug!("{} season cutoff reached at {}", factor.label(), today.date());
            break;
        }
        let score = match factor {
            RiskFactor::Anthracnose => score_anthracnose(slice),
            RiskFactor::BrownPatch => score_brown_patch(today),
            RiskFactor::DollarSpot => score_dollar_spot(slice),
            RiskFactor::PythiumBlight => score_pythium(today),
            RiskFactor::HeatStress => score_heat_stress(today),
        };
        series.push(today.date(), score)?;
    }
    Ok(series)
}

/// Assess one factor: raw scores plus the smoothed output series.
pub fn assess(factor: RiskFactor, days: &[DailyRecord]) -> Result<RiskAssessment> {
    let raw = raw_series(factor, days)?;
    let smoothed = rolling_mean(&raw, DAILY_SMOOTHING_WINDOW)?;

    let series = if factor == RiskFactor::HeatStress {
        // Heat stress publishes only its season series: the 3-day
        // smoothed stress-hour count.
        vec![RiskSeries::Season(smoothed)]
    } else {
        vec![
            RiskSeries::Daily(smoothed),
            RiskSeries::SevenDayAvg(rolling_mean(&raw, SEVEN_DAY_WINDOW)?),
            RiskSeries::Season(raw),
        ]
    };

    Ok(RiskAssessment { factor, series })
}

/// Assess all five factors over one record.
pub fn assess_all(days: &[DailyRecord]) -> Result<Vec<RiskAssessment>> {
    RiskFactor::ALL
        .iter()
        .map(|&factor| assess(factor, days))
        .collect()
}


#[cfg(test)]
mod tests {
    use super::test_support::{records, DaySpec};
    use super::*;

    fn warm_wet_days(count: usize) -> Vec<DailyRecord> {
        records(
            "2024-07-01",
            &vec![
                DaySpec {
                    max_temp_f: 80.0,
                    min_temp_f: 60.0,
                    humid_hours: 10,
                    dew_hours: 12,
                    ..DaySpec::default()
                };
                count
            ],
        )
    }

    #[test]
    fn season_series_excludes_warmup_days() {
        let days = warm_wet_days(10);
        let assessment = assess(RiskFactor::DollarSpot, &days).unwrap();
        let season = assessment.season().unwrap();
        assert_eq!(season.len(), days.len() - RiskFactor::DollarSpot.warmup_days());
        assert_eq!(season.first().unwrap().date, days[6].date());
    }

    #[test]
    fn daily_series_is_three_day_smoothed() {
        let days = warm_wet_days(10);
        let assessment = assess(RiskFactor::BrownPatch, &days).unwrap();
        let raw = assessment.season().unwrap();
        let daily = assessment.daily().unwrap();
        assert_eq!(daily.len(), raw.len() - (DAILY_SMOOTHING_WINDOW - 1));
    }

    #[test]
    fn heat_stress_publishes_only_a_season_series() {
        let days = warm_wet_days(6);
        let assessment = assess(RiskFactor::HeatStress, &days).unwrap();
        assert!(assessment.daily().is_none());
        assert!(assessment.seven_day_avg().is_none());
        assert!(assessment.season().is_some());
    }

    #[test]
    fn stops_past_december_first() {
        let days = records(
            "2024-11-28",
            &vec![DaySpec::default(); 6], // dated Nov 29 .. Dec 4
        );
        let raw = raw_series(RiskFactor::PythiumBlight, &days).unwrap();
        // Nov 29, 30, Dec 1 survive; Dec 2+ are past the cutoff.
        assert_eq!(raw.len(), 3);
        assert_eq!(raw.last().unwrap().date, "2024-12-01".parse().unwrap());
    }

    #[test]
    fn constant_wet_humid_days_register_dollar_spot_daily() {
        // Ten days at 80F/60F, RH 95+ for 10 hours, 12 wet hours: the
        // wetness contribution must register every scored day.
        let days = warm_wet_days(10);
        let raw = raw_series(RiskFactor::DollarSpot, &days).unwrap();
        assert_eq!(raw.len(), 4);
        for point in &raw {
            assert!(point.value >= 1.0, "expected wet contribution on {}", point.date);
        }
    }

    #[test]
    fn assess_all_covers_every_factor() {
        let days = warm_wet_days(10);
        let assessments = assess_all(&days).unwrap();
        assert_eq!(assessments.len(), 5);
    }

    #[test]
    fn short_record_yields_empty_series() {
        let days = warm_wet_days(2);
        let raw = raw_series(RiskFactor::DollarSpot, &days).unwrap();
        assert!(raw.is_empty());
    }
}
