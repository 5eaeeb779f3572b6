/// Growing-degree-day accumulation: observed cumulative totals extended
/// with a forward projection from forecast days.
use chrono::Duration;
use turfcast_weather::daily::DailyRecord;
use turfcast_weather::grid::GddBase;
use turfcast_weather::season::gdd_overrun_days;
use turfcast_weather::series::DateValueSeries;
use turfcast_weather::Result;

/// Projects cumulative GDD past the observed record.
#[derive(Debug, Clone, Copy)]
pub struct GddAccumulator {
    base_temp_f: f64,
}

impl GddAccumulator {
    pub fn new(base_temp_f: f64) -> Self {
        Self { base_temp_f }
    }

    pub fn for_base(base: GddBase) -> Self {
        Self::new(base.base_temp_f())
    }

    pub fn base_temp_f(&self) -> f64 {
        self.base_temp_f
    }

    /// Heat units one day adds: `max(0, (max + min)/2 - base)`.
    pub fn daily_gdd(&self, day: &DailyRecord) -> f64 {
        ((day.max_temp_f() + day.min_temp_f()) / 2.0 - self.base_temp_f).max(0.0)
    }

    /// Extend an observed cumulative series with forecast days.
    ///
    /// `observed` must already be trimmed at its first missing value (see
    /// [`turfcast_weather::grid::GridSeries::gdd_series`]). The running
    /// total resumes from the last observed value; each forecast day
    /// appends one dated point. Near the season boundary both halves are
    /// shortened by the same overrun so they stay aligned; the cutoff
    /// anchoring that rule is the first forecast date.
    pub fn project(
        &self,
        observed: &DateValueSeries,
        forecast: &[DailyRecord],
    ) -> Result<DateValueSeries> {
        let overrun = forecast
            .first()
            .map(|day| gdd_overrun_days(day.date()))
            .unwrap_or(0);

        let observed = observed.drop_last(overrun);
        let forecast_len = forecast.len().saturating_sub(overrun);

        let mut total = observed.last().map(|p| p.value).unwrap_or(0.0);
        let mut series = DateValueSeries::with_capacity(observed.len() + forecast_len);
        for point in &observed {
            series.push(point.date, point.value)?;
        }
        for day in &forecast[..forecast_len] {
            total += self.daily_gdd(day);
            series.push(day.date(), total)?;
        }
        Ok(series)
    }
}

/// True when consecutive points are one calendar day apart with no gaps.
pub fn is_gap_free(series: &DateValueSeries) -> bool {
    series
        .points()
        .windows(2)
        .all(|w| w[1].date - w[0].date == Duration::days(1))
}
