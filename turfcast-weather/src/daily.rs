/// Daily records aggregated from 8am-anchored hourly windows.
///
/// A turf "day" runs 08:00-07:59 local rather than midnight to midnight, so
/// overnight dew and rain land on the morning they matter for. The calendar
/// date assigned to a window is the day the window ends in.
use crate::error::{Result, TurfcastError};
use crate::hourly::{annotate_wetness, f_to_c, HourlyObservation, RawHour};
use chrono::{Duration, NaiveDate, Timelike};

/// Records per aggregated day.
pub const HOURS_PER_DAY: usize = 24;

/// Local hour anchoring the start of a turf day.
pub const DAY_ANCHOR_HOUR: u32 = 8;

/// Temperature floor for a heat-stress hour, degrees F.
pub const HEAT_STRESS_TEMP_F: f64 = 69.0;

/// Temperature plus relative humidity above this marks a heat-stress hour.
pub const HEAT_STRESS_SUM: f64 = 150.0;

/// Default relative-humidity threshold for the cached humid-hour count.
pub const DEFAULT_HUMID_RH: f64 = 90.0;

/// One turf day: 24 hourly observations plus statistics cached at
/// construction. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    date: NaiveDate,
    hours: Vec<HourlyObservation>,
    max_temp_f: f64,
    min_temp_f: f64,
    avg_temp_f: f64,
    avg_rh: f64,
    humid_hours: usize,
    wet_hours: usize,
    heat_stress_hours: usize,
    precip_total_in: f64,
    rained: bool,
}

impl DailyRecord {
    /// Build a record from exactly [`HOURS_PER_DAY`] wetness-annotated
    /// hours. `humid_threshold_rh` selects the cached humid-hour count.
    pub fn build(
        date: NaiveDate,
        hours: Vec<HourlyObservation>,
        humid_threshold_rh: f64,
    ) -> Result<Self> {
        if hours.len() != HOURS_PER_DAY {
            return Err(TurfcastError::InvalidRecord(format!(
                "daily record for {date} needs {HOURS_PER_DAY} hours, got {}",
                hours.len()
            )));
        }

        let max_temp_f = hours.iter().map(|h| h.temp_f).fold(f64::MIN, f64::max);
        let min_temp_f = hours.iter().map(|h| h.temp_f).fold(f64::MAX, f64::min);
        let avg_temp_f = hours.iter().map(|h| h.temp_f).sum::<f64>() / HOURS_PER_DAY as f64;
        let avg_rh = hours.iter().map(|h| h.rh).sum::<f64>() / HOURS_PER_DAY as f64;
        let humid_hours = hours.iter().filter(|h| h.rh > humid_threshold_rh).count();
        let wet_hours = hours.iter().filter(|h| h.is_wet).count();
        let precip_total_in = hours.iter().map(|h| h.precip_in).sum();
        let rained = hours.iter().any(|h| h.rained);

        // Heat stress only counts in the second half of the window: the
        // afternoon and evening hours of the day the record is dated for.
        let heat_stress_hours = hours[HOURS_PER_DAY / 2..]
            .iter()
            .filter(|h| h.temp_f > HEAT_STRESS_TEMP_F && h.temp_f + h.rh > HEAT_STRESS_SUM)
            .count();

        Ok(Self {
            date,
            hours,
            max_temp_f,
            min_temp_f,
            avg_temp_f,
            avg_rh,
            humid_hours,
            wet_hours,
            heat_stress_hours,
            precip_total_in,
            rained,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn hours(&self) -> &[HourlyObservation] {
        &self.hours
    }

    pub fn max_temp_f(&self) -> f64 {
        self.max_temp_f
    }

    pub fn min_temp_f(&self) -> f64 {
        self.min_temp_f
    }

    pub fn avg_temp_f(&self) -> f64 {
        self.avg_temp_f
    }

    pub fn max_temp_c(&self) -> f64 {
        f_to_c(self.max_temp_f)
    }

    pub fn min_temp_c(&self) -> f64 {
        f_to_c(self.min_temp_f)
    }

    pub fn avg_temp_c(&self) -> f64 {
        f_to_c(self.avg_temp_f)
    }

    pub fn avg_rh(&self) -> f64 {
        self.avg_rh
    }

    /// Hours above the threshold passed to [`aggregate_days`].
    pub fn humid_hours(&self) -> usize {
        self.humid_hours
    }

    pub fn wet_hours(&self) -> usize {
        self.wet_hours
    }

    pub fn heat_stress_hours(&self) -> usize {
        self.heat_stress_hours
    }

    pub fn precip_total_in(&self) -> f64 {
        self.precip_total_in
    }

    pub fn rained(&self) -> bool {
        self.rained
    }

    /// Count hours with relative humidity strictly above `threshold`.
    pub fn hours_rh_above(&self, threshold: f64) -> usize {
        self.hours.iter().filter(|h| h.rh > threshold).count()
    }
}

/// Group a flat observed+forecast hour sequence into [`DailyRecord`]s.
///
/// Leading records before the first [`DAY_ANCHOR_HOUR`] are skipped so
/// windows line up on 8am; wetness is folded once across the whole
/// anchored sequence so the final hour of each day seeds the next; a
/// trailing window shorter than 24 hours is dropped.
pub fn aggregate_days(raw: &[RawHour], humid_threshold_rh: f64) -> Result<Vec<DailyRecord>> {
    let start = raw
        .iter()
        .position(|h| h.timestamp.time().hour() == DAY_ANCHOR_HOUR)
        .unwrap_or(raw.len());
    let annotated = annotate_wetness(&raw[start..], false);

    annotated
        .chunks_exact(HOURS_PER_DAY)
        .map(|window| {
            let date = window[0].timestamp.date() + Duration::days(1);
            DailyRecord::build(date, window.to_vec(), humid_threshold_rh)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn hour_at(date: &str, hour: u32, temp_f: f64, rh: f64, precip: f64) -> RawHour {
        let timestamp: NaiveDateTime = format!("{date}T{hour:02}:00:00").parse().unwrap();
        RawHour {
            timestamp,
            temp_f,
            rh,
            dewpoint_f: temp_f - 20.0,
            precip_in: precip,
            rained: precip > 0.0,
        }
    }

    /// 48 hours starting 8am June 1: one full window plus a 16-hour tail.
    fn two_days() -> Vec<RawHour> {
        let mut hours = Vec::new();
        for h in 8..24 {
            hours.push(hour_at("2024-06-01", h, 70.0 + h as f64 * 0.5, 60.0, 0.0));
        }
        for h in 0..8 {
            hours.push(hour_at("2024-06-02", h, 60.0, 70.0, 0.0));
        }
        for h in 8..24 {
            hours.push(hour_at("2024-06-02", h, 75.0, 85.0, 0.0));
        }
        hours
    }

    #[test]
    fn assigns_following_calendar_day() {
        let days = aggregate_days(&two_days(), DEFAULT_HUMID_RH).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date(), "2024-06-02".parse().unwrap());
    }

    #[test]
    fn drops_incomplete_trailing_window() {
        let mut hours = two_days();
        // The second window only has 16 of 24 hours.
        assert_eq!(hours.len(), 40);
        hours.truncate(39);
        let days = aggregate_days(&hours, DEFAULT_HUMID_RH).unwrap();
        assert_eq!(days.len(), 1);
    }

    #[test]
    fn skips_records_before_anchor_hour() {
        let mut hours = vec![
            hour_at("2024-06-01", 5, 55.0, 80.0, 0.0),
            hour_at("2024-06-01", 6, 55.0, 80.0, 0.0),
        ];
        hours.extend(two_days());
        let days = aggregate_days(&hours, DEFAULT_HUMID_RH).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date(), "2024-06-02".parse().unwrap());
    }

    #[test]
    fn caches_temperature_statistics() {
        let days = aggregate_days(&two_days(), DEFAULT_HUMID_RH).unwrap();
        let day = &days[0];
        // Hottest hour is 23:00 on June 1: 70 + 23*0.5 = 81.5.
        assert_eq!(day.max_temp_f(), 81.5);
        assert_eq!(day.min_temp_f(), 60.0);
        assert!((day.max_temp_c() - f_to_c(81.5)).abs() < 1e-12);
    }

    #[test]
    fn counts_heat_stress_hours_in_second_half_only() {
        let mut hours = Vec::new();
        // First half hot+humid, second half split.
        for h in 8..20 {
            hours.push(hour_at("2024-06-01", h, 90.0, 70.0, 0.0));
        }
        for h in 20..24 {
            hours.push(hour_at("2024-06-01", h, 90.0, 70.0, 0.0));
        }
        for h in 0..8 {
            hours.push(hour_at("2024-06-02", h, 60.0, 50.0, 0.0));
        }
        let days = aggregate_days(&hours, DEFAULT_HUMID_RH).unwrap();
        // Second half = hours 20:00-07:00; only the four 20-23h hours
        // satisfy temp > 69 and temp + rh > 150.
        assert_eq!(days[0].heat_stress_hours(), 4);
    }

    #[test]
    fn rejects_wrong_hour_count() {
        let annotated = annotate_wetness(&two_days()[..10], false);
        let err = DailyRecord::build("2024-06-02".parse().unwrap(), annotated, 90.0).unwrap_err();
        assert!(matches!(err, TurfcastError::InvalidRecord(_)));
    }

    #[test]
    fn wet_hours_from_rain_and_persistence() {
        let mut hours = Vec::new();
        // Rain 8-10am, humid through noon, then dry.
        for h in 8..24 {
            let (precip, rh) = match h {
                8..=10 => (0.1, 95.0),
                11..=12 => (0.0, 88.0),
                _ => (0.0, 40.0),
            };
            hours.push(hour_at("2024-06-01", h, 70.0, rh, precip));
        }
        for h in 0..8 {
            hours.push(hour_at("2024-06-02", h, 62.0, 40.0, 0.0));
        }
        let days = aggregate_days(&hours, DEFAULT_HUMID_RH).unwrap();
        // 3 rained hours + 2 persistence hours.
        assert_eq!(days[0].wet_hours(), 5);
        assert!(days[0].rained());
    }
}
