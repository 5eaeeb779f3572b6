/// Grid time-series rows: per-day GDD totals, precipitation, and average
/// temperature fetched from the gridded weather product.
///
/// Providers flag missing values with the numeric sentinel `-999`. The
/// sentinel is confined to this parsing boundary: parsed values are
/// `Option<f64>` and the column extractors truncate at the first missing
/// value instead of letting it leak into arithmetic.
use crate::error::{Result, TurfcastError};
use crate::hourly::f_to_c;
use crate::series::DateValueSeries;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Numeric sentinel providers use for "no data".
pub const MISSING_SENTINEL: f64 = -999.0;

/// Date format of grid row date strings.
pub const GRID_DATE_FORMAT: &str = "%Y-%m-%d";

/// Values per grid row after the date string.
pub const GRID_ROW_VALUES: usize = 4;

/// GDD base temperature selector for the grid columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GddBase {
    Base32,
    Base50,
}

impl GddBase {
    pub fn base_temp_f(self) -> f64 {
        match self {
            GddBase::Base32 => 32.0,
            GddBase::Base50 => 50.0,
        }
    }
}

/// One parsed grid row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub date: NaiveDate,
    pub gdd_base_32: Option<f64>,
    pub gdd_base_50: Option<f64>,
    pub precip_in: Option<f64>,
    pub avg_temp_f: Option<f64>,
}

impl GridPoint {
    /// Parse one `[date, gdd32, gdd50, precip, avg_temp]` row.
    pub fn from_row(date: &str, values: &[f64]) -> Result<Self> {
        if values.len() != GRID_ROW_VALUES {
            return Err(TurfcastError::InvalidRecord(format!(
                "grid row for {date} has {} values, expected {GRID_ROW_VALUES}",
                values.len()
            )));
        }
        let date = NaiveDate::parse_from_str(date, GRID_DATE_FORMAT)
            .map_err(|e| TurfcastError::DateParse(format!("{date}: {e}")))?;
        Ok(Self {
            date,
            gdd_base_32: sanitize(values[0]),
            gdd_base_50: sanitize(values[1]),
            precip_in: sanitize(values[2]),
            avg_temp_f: sanitize(values[3]),
        })
    }
}

/// Map the missing-data sentinel to `None`.
fn sanitize(value: f64) -> Option<f64> {
    if value <= MISSING_SENTINEL {
        None
    } else {
        Some(value)
    }
}

/// Chronological sequence of grid rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridSeries {
    points: Vec<GridPoint>,
}

impl GridSeries {
    /// Parse rows in order, enforcing chronological dates.
    pub fn parse<'a, I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a [f64])>,
    {
        let mut points: Vec<GridPoint> = Vec::new();
        for (date, values) in rows {
            let point = GridPoint::from_row(date, values)?;
            if let Some(last) = points.last() {
                if point.date <= last.date {
                    return Err(TurfcastError::OutOfOrder { date: point.date });
                }
            }
            points.push(point);
        }
        Ok(Self { points })
    }

    pub fn from_points(points: Vec<GridPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Cumulative GDD column for `base`, truncated at the first missing day.
    pub fn gdd_series(&self, base: GddBase) -> Result<DateValueSeries> {
        self.column(|p| match base {
            GddBase::Base32 => p.gdd_base_32,
            GddBase::Base50 => p.gdd_base_50,
        })
    }

    /// Daily precipitation in inches, truncated at the first missing day.
    pub fn precipitation(&self) -> Result<DateValueSeries> {
        self.column(|p| p.precip_in)
    }

    /// Running precipitation total, truncated at the first missing day.
    pub fn cumulative_precipitation(&self) -> Result<DateValueSeries> {
        let daily = self.precipitation()?;
        let mut total = 0.0;
        let mut series = DateValueSeries::with_capacity(daily.len());
        for point in &daily {
            total += point.value;
            series.push(point.date, total)?;
        }
        Ok(series)
    }

    /// Daily average temperature in degrees F, truncated at the first
    /// missing day.
    pub fn avg_temperature_f(&self) -> Result<DateValueSeries> {
        self.column(|p| p.avg_temp_f)
    }

    /// Daily average temperature in degrees C.
    pub fn avg_temperature_c(&self) -> Result<DateValueSeries> {
        let fahrenheit = self.avg_temperature_f()?;
        DateValueSeries::from_pairs(fahrenheit.iter().map(|p| (p.date, f_to_c(p.value))))
    }

    fn column<F>(&self, select: F) -> Result<DateValueSeries>
    where
        F: Fn(&GridPoint) -> Option<f64>,
    {
        let mut series = DateValueSeries::with_capacity(self.points.len());
        for point in &self.points {
            match select(point) {
                Some(value) => series.push(point.date, value)?,
                None => break,
            }
        }
        Ok(series)
    }
}
