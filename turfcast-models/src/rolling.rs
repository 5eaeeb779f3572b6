/// Rolling window summation over a fixed-capacity ring buffer.
use turfcast_weather::grid::MISSING_SENTINEL;
use turfcast_weather::series::DateValueSeries;
use turfcast_weather::Result;

/// Default window length in days.
pub const DEFAULT_WINDOW: usize = 7;

/// Maintains a running window of the last N values.
///
/// Backed by a ring buffer (array plus head index): push and evict are
/// O(1) and the buffer never reallocates after construction.
#[derive(Debug, Clone)]
pub struct RollingWindowSummer {
    buf: Vec<f64>,
    head: usize,
    len: usize,
}

impl RollingWindowSummer {
    /// Create a summer holding at most `capacity` values (min 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: vec![0.0; capacity],
            head: 0,
            len: 0,
        }
    }

    /// Push a value, returning the **pre-push** window sum when already at
    /// capacity: the sum covers the N values present before `value` is
    /// inserted and the oldest is evicted. Returns `None` while filling.
    ///
    /// The missing-data sentinel `-999` is normalized to `0.0` before
    /// insertion. That keeps sums finite but dilutes averages over windows
    /// containing missing hours; callers needing strictness must filter
    /// upstream.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let value = normalize(value);
        if self.len < self.capacity() {
            let tail = (self.head + self.len) % self.capacity();
            self.buf[tail] = value;
            self.len += 1;
            return None;
        }
        let sum = self.buf.iter().sum();
        self.buf[self.head] = value;
        self.head = (self.head + 1) % self.capacity();
        Some(sum)
    }

    /// Sum over the current window, available once the buffer is full.
    pub fn window_sum(&self) -> Option<f64> {
        if self.len == self.capacity() {
            Some(self.buf.iter().sum())
        } else {
            None
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for RollingWindowSummer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

fn normalize(value: f64) -> f64 {
    if value <= MISSING_SENTINEL {
        0.0
    } else {
        value
    }
}

/// Trailing mean of `series` over `window` days.
///
/// Output starts once a full window is available, so it is
/// `window - 1` points shorter than the input; each smoothed value is
/// dated by the most recent day in its window.
pub fn rolling_mean(series: &DateValueSeries, window: usize) -> Result<DateValueSeries> {
    let window = window.max(1);
    let mut summer = RollingWindowSummer::new(window);
    let mut out = DateValueSeries::with_capacity(series.len().saturating_sub(window - 1));
    let points = series.points();
    for (k, point) in points.iter().enumerate() {
        if let Some(sum) = summer.push(point.value) {
            out.push(points[k - 1].date, sum / window as f64)?;
        }
    }
    if let (Some(sum), Some(last)) = (summer.window_sum(), points.last()) {
        out.push(last.date, sum / window as f64)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn never_returns_a_sum_before_capacity() {
        let mut summer = RollingWindowSummer::new(4);
        for v in [1.0, 2.0, 3.0] {
            assert_eq!(summer.push(v), None);
        }
        assert_eq!(summer.window_sum(), None);
    }

    #[test]
    fn kth_sum_covers_the_kth_window() {
        // With N = 3, the k-th sum-returning push (0-indexed overall push
        // k >= 3) must equal the sum of elements [k-3, k).
        let values = [5.0, 1.0, 4.0, 2.0, 8.0, 3.0];
        let mut summer = RollingWindowSummer::new(3);
        let mut sums = Vec::new();
        for &v in &values {
            if let Some(sum) = summer.push(v) {
                sums.push(sum);
            }
        }
        assert_eq!(sums, vec![10.0, 7.0, 14.0]);
        // Final full window is readable without another push.
        assert_eq!(summer.window_sum(), Some(13.0));
    }

    #[test]
    fn sentinel_is_normalized_to_zero() {
        let mut summer = RollingWindowSummer::new(2);
        summer.push(-999.0);
        summer.push(5.0);
        assert_eq!(summer.push(1.0), Some(5.0));
    }

    #[test]
    fn capacity_is_at_least_one() {
        let mut summer = RollingWindowSummer::new(0);
        assert_eq!(summer.capacity(), 1);
        assert_eq!(summer.push(2.0), None);
        assert_eq!(summer.push(3.0), Some(2.0));
    }

    #[test]
    fn rolling_mean_shortens_by_window_minus_one() {
        let start: NaiveDate = "2024-05-01".parse().unwrap();
        let series = DateValueSeries::from_pairs(
            (0..5).map(|i| (start + chrono::Duration::days(i), (i + 1) as f64)),
        )
        .unwrap();
        let smoothed = rolling_mean(&series, 3).unwrap();
        assert_eq!(smoothed.len(), 3);
        // Windows [1,2,3], [2,3,4], [3,4,5].
        assert_eq!(smoothed.get(0).unwrap().value, 2.0);
        assert_eq!(smoothed.get(2).unwrap().value, 4.0);
        // Dated by the newest day in each window.
        assert_eq!(smoothed.get(0).unwrap().date, start + chrono::Duration::days(2));
    }

    #[test]
    fn rolling_mean_of_short_series_is_empty() {
        let start: NaiveDate = "2024-05-01".parse().unwrap();
        let series = DateValueSeries::from_pairs([(start, 1.0)]).unwrap();
        assert!(rolling_mean(&series, 3).unwrap().is_empty());
    }
}
