/// Chronological date/value series.
///
/// The single shape shared by every derived product: GDD totals, risk
/// indices, precipitation, temperature. Insertion order is chronological
/// and dates are unique; the series is never re-sorted after the fact.
use crate::error::{Result, TurfcastError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One dated value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatePoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Ordered sequence of (calendar date, value) pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateValueSeries {
    points: Vec<DatePoint>,
}

impl DateValueSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Append a point, enforcing strictly increasing dates.
    pub fn push(&mut self, date: NaiveDate, value: f64) -> Result<()> {
        if let Some(last) = self.points.last() {
            if date <= last.date {
                return Err(TurfcastError::OutOfOrder { date });
            }
        }
        self.points.push(DatePoint { date, value });
        Ok(())
    }

    /// Build from pairs already in chronological order.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let mut series = Self::new();
        for (date, value) in pairs {
            series.push(date, value)?;
        }
        Ok(series)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&DatePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&DatePoint> {
        self.points.last()
    }

    pub fn get(&self, index: usize) -> Option<&DatePoint> {
        self.points.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DatePoint> {
        self.points.iter()
    }

    pub fn points(&self) -> &[DatePoint] {
        &self.points
    }

    /// Find the index of a calendar date by day and month match.
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        use chrono::Datelike;
        self.points
            .iter()
            .position(|p| p.date.day() == date.day() && p.date.month() == date.month())
    }

    /// New series keeping everything from `index` on.
    pub fn tail_from(&self, index: usize) -> Self {
        Self {
            points: self.points.get(index..).unwrap_or(&[]).to_vec(),
        }
    }

    /// Shorten to at most `len` points.
    pub fn truncate(&mut self, len: usize) {
        self.points.truncate(len);
    }

    /// New series with the last `n` points removed.
    pub fn drop_last(&self, n: usize) -> Self {
        let keep = self.points.len().saturating_sub(n);
        Self {
            points: self.points[..keep].to_vec(),
        }
    }
}

impl<'a> IntoIterator for &'a DateValueSeries {
    type Item = &'a DatePoint;
    type IntoIter = std::slice::Iter<'a, DatePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
