/// Hourly observation parsing and wetness annotation.
///
/// Providers deliver hourly weather as flat numeric rows. Observed rows
/// carry 12 fields including an explicit precipitation flag; forecast rows
/// carry 11 fields and the flag is normalized from the probability-of-
/// precipitation field instead. Timestamps are provider-local epoch
/// seconds.
use crate::error::{Result, TurfcastError};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Field count of an observed hourly row.
pub const OBSERVED_ROW_LEN: usize = 12;
/// Field count of a forecast hourly row (no precipitation flag).
pub const FORECAST_ROW_LEN: usize = 11;

// Observed row layout: [epoch, precip, temp, rh, dewpoint, ...]
const OBS_IDX_TIMESTAMP: usize = 0;
const OBS_IDX_PRECIP: usize = 1;
const OBS_IDX_TEMP: usize = 2;
const OBS_IDX_RH: usize = 3;
const OBS_IDX_DEWPOINT: usize = 4;

// Forecast row layout: [epoch, temp, rh, dewpoint, ..., pop]
const FCST_IDX_TIMESTAMP: usize = 0;
const FCST_IDX_TEMP: usize = 1;
const FCST_IDX_RH: usize = 2;
const FCST_IDX_DEWPOINT: usize = 3;
const FCST_IDX_POP: usize = 10;

/// Probability-of-precipitation at or above this percentage counts as rain.
pub const POP_RAIN_THRESHOLD: f64 = 50.0;

/// Dewpoint within this many degrees F of the air temperature counts as dew.
pub const DEW_GAP_F: f64 = 3.0;

/// Relative humidity keeping an already-wet canopy wet for another hour.
pub const WET_PERSISTENCE_RH: f64 = 85.0;

/// One parsed hourly row, before wetness annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawHour {
    pub timestamp: NaiveDateTime,
    pub temp_f: f64,
    pub rh: f64,
    pub dewpoint_f: f64,
    pub precip_in: f64,
    pub rained: bool,
}

impl RawHour {
    /// Parse a raw provider row, dispatching on field count.
    pub fn from_row(row: &[f64]) -> Result<Self> {
        match row.len() {
            OBSERVED_ROW_LEN => Ok(Self {
                timestamp: parse_epoch(row[OBS_IDX_TIMESTAMP])?,
                temp_f: row[OBS_IDX_TEMP],
                rh: row[OBS_IDX_RH],
                dewpoint_f: row[OBS_IDX_DEWPOINT],
                precip_in: row[OBS_IDX_PRECIP].max(0.0),
                rained: row[OBS_IDX_PRECIP] > 0.0,
            }),
            FORECAST_ROW_LEN => Ok(Self {
                timestamp: parse_epoch(row[FCST_IDX_TIMESTAMP])?,
                temp_f: row[FCST_IDX_TEMP],
                rh: row[FCST_IDX_RH],
                dewpoint_f: row[FCST_IDX_DEWPOINT],
                precip_in: 0.0,
                rained: row[FCST_IDX_POP] >= POP_RAIN_THRESHOLD,
            }),
            found => Err(TurfcastError::RowLength {
                found,
                expected_observed: OBSERVED_ROW_LEN,
                expected_forecast: FORECAST_ROW_LEN,
            }),
        }
    }

    /// Parse a flat list of raw rows in order.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Vec<Self>> {
        rows.iter().map(|row| Self::from_row(row)).collect()
    }

    /// True when the dewpoint gap is small enough for dew formation.
    pub fn had_dew(&self) -> bool {
        self.temp_f - self.dewpoint_f < DEW_GAP_F
    }
}

/// An hourly observation with derived wetness flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyObservation {
    pub timestamp: NaiveDateTime,
    pub temp_f: f64,
    pub rh: f64,
    pub dewpoint_f: f64,
    pub precip_in: f64,
    pub rained: bool,
    pub had_dew: bool,
    pub is_wet: bool,
}

/// Annotate a raw hour sequence with wetness flags.
///
/// A pure left-fold: an hour is wet when it rained, had dew, or the
/// previous hour was wet and humidity stayed at or above
/// [`WET_PERSISTENCE_RH`]. `initially_wet` seeds the fold: callers pass
/// the final hour of the preceding day, or `false` at the start of a
/// record.
pub fn annotate_wetness(hours: &[RawHour], initially_wet: bool) -> Vec<HourlyObservation> {
    hours
        .iter()
        .scan(initially_wet, |was_wet, raw| {
            let had_dew = raw.had_dew();
            let is_wet = raw.rained || had_dew || (*was_wet && raw.rh >= WET_PERSISTENCE_RH);
            *was_wet = is_wet;
            Some(HourlyObservation {
                timestamp: raw.timestamp,
                temp_f: raw.temp_f,
                rh: raw.rh,
                dewpoint_f: raw.dewpoint_f,
                precip_in: raw.precip_in,
                rained: raw.rained,
                had_dew,
                is_wet,
            })
        })
        .collect()
}

fn parse_epoch(epoch_s: f64) -> Result<NaiveDateTime> {
    DateTime::from_timestamp(epoch_s as i64, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| TurfcastError::InvalidRecord(format!("bad epoch timestamp {epoch_s}")))
}

/// Convert Fahrenheit to Celsius.
pub fn f_to_c(temp_f: f64) -> f64 {
    (temp_f - 32.0) * 5.0 / 9.0
}

/// Convert Celsius to Fahrenheit.
pub fn c_to_f(temp_c: f64) -> f64 {
    temp_c * 9.0 / 5.0 + 32.0
}
