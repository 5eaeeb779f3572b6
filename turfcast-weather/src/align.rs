/// Calendar alignment of two independently-fetched daily series.
///
/// The evapotranspiration forecast and the precipitation/temperature grid
/// are fetched separately and routinely start on different dates or lose
/// trailing days. Alignment anchors them on calendar date rather than
/// assuming equal lengths.
use crate::error::{Result, TurfcastError};
use crate::series::DateValueSeries;
use log::debug;

/// Two series trimmed to a common date window.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub left: DateValueSeries,
    pub right: DateValueSeries,
    /// Day offset between the original first dates (right minus left).
    pub offset_days: i64,
}

/// Align two series on calendar date.
///
/// Inputs arrive already truncated at their first missing value (the grid
/// column extractors own that rule). The later-starting series anchors;
/// the earlier is sliced forward to the anchor date, found by calendar
/// day-and-month search rather than index arithmetic, so a series missing
/// leading days still lines up. Both outputs are truncated to the shorter
/// length. Failure to find any shared date is the distinct, recoverable
/// [`TurfcastError::NoOverlap`].
pub fn align(left: &DateValueSeries, right: &DateValueSeries) -> Result<AlignedPair> {
    let (left_start, right_start) = match (left.first(), right.first()) {
        (Some(l), Some(r)) => (l.date, r.date),
        _ => {
            return Err(TurfcastError::EmptySeries("align"));
        }
    };

    let offset_days = (right_start - left_start).num_days();
    debug!("aligning series: {left_start} vs {right_start}, offset {offset_days} days");

    let (mut left, mut right) = if offset_days > 0 {
        (slice_to(left, right_start)?, right.clone())
    } else if offset_days < 0 {
        (left.clone(), slice_to(right, left_start)?)
    } else {
        (left.clone(), right.clone())
    };

    let common = left.len().min(right.len());
    if common == 0 {
        return Err(TurfcastError::NoOverlap {
            left: left_start,
            right: right_start,
        });
    }
    left.truncate(common);
    right.truncate(common);

    Ok(AlignedPair {
        left,
        right,
        offset_days,
    })
}

/// Slice `series` forward to the entry matching `anchor`'s calendar day.
fn slice_to(series: &DateValueSeries, anchor: chrono::NaiveDate) -> Result<DateValueSeries> {
    match series.position_of(anchor) {
        Some(index) => Ok(series.tail_from(index)),
        None => Err(TurfcastError::NoOverlap {
            left: series.first().map(|p| p.date).unwrap_or(anchor),
            right: anchor,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(start: &str, values: &[f64]) -> DateValueSeries {
        let start: NaiveDate = start.parse().unwrap();
        DateValueSeries::from_pairs(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| (start + chrono::Duration::days(i as i64), v)),
        )
        .unwrap()
    }

    #[test]
    fn later_start_anchors_and_slices_the_earlier() {
        let et = series("2024-05-01", &[0.1, 0.2, 0.3, 0.4, 0.5]);
        let grid = series("2024-05-03", &[1.0, 2.0, 3.0]);
        let aligned = align(&et, &grid).unwrap();
        assert_eq!(aligned.offset_days, 2);
        assert_eq!(aligned.left.first().unwrap().date, grid.first().unwrap().date);
        assert_eq!(aligned.left.len(), 3);
        assert_eq!(aligned.right.len(), 3);
        assert_eq!(aligned.left.first().unwrap().value, 0.3);
    }

    #[test]
    fn negative_offset_slices_the_other_side() {
        let et = series("2024-05-03", &[0.3, 0.4]);
        let grid = series("2024-05-01", &[1.0, 2.0, 3.0, 4.0]);
        let aligned = align(&et, &grid).unwrap();
        assert_eq!(aligned.offset_days, -2);
        assert_eq!(aligned.right.first().unwrap().value, 3.0);
        assert_eq!(aligned.left.len(), 2);
        assert_eq!(aligned.right.len(), 2);
    }

    #[test]
    fn zero_offset_only_truncates() {
        let a = series("2024-05-01", &[1.0, 2.0, 3.0]);
        let b = series("2024-05-01", &[9.0, 8.0]);
        let aligned = align(&a, &b).unwrap();
        assert_eq!(aligned.offset_days, 0);
        assert_eq!(aligned.left.len(), 2);
    }

    #[test]
    fn disjoint_series_fail_loudly() {
        let a = series("2024-05-01", &[1.0, 2.0]);
        let b = series("2024-07-01", &[9.0, 8.0]);
        let err = align(&a, &b).unwrap_err();
        assert!(matches!(err, TurfcastError::NoOverlap { .. }));
    }

    #[test]
    fn empty_series_is_its_own_error() {
        let a = series("2024-05-01", &[1.0]);
        let err = align(&a, &DateValueSeries::new()).unwrap_err();
        assert!(matches!(err, TurfcastError::EmptySeries(_)));
    }
}
