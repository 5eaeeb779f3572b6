/// Season boundary policy.
///
/// The turf models are defined for a growing season that winds down in
/// late November. Near the boundary the outputs are shortened
/// deterministically rather than erroring, so the caller can render an
/// out-of-season state.
use chrono::{Datelike, NaiveDate};

/// Last day of November the GDD projection may extend past.
pub const GDD_SEASON_END_DAY: u32 = 25;

/// Month the GDD season ends in.
pub const GDD_SEASON_END_MONTH: u32 = 11;

/// Risk models stop at the first date after December 1.
pub const RISK_CUTOFF_MONTH: u32 = 12;
pub const RISK_CUTOFF_DAY: u32 = 1;

/// Days a GDD projection anchored at `cutoff` must be shortened by.
///
/// Zero until November 25; past that, one day per day of overrun, so the
/// projection never extends beyond the modeled season. Callers apply the
/// same shift to the observed slice and the forecast slice to keep the
/// halves aligned.
pub fn gdd_overrun_days(cutoff: NaiveDate) -> usize {
    if cutoff.month() == GDD_SEASON_END_MONTH && cutoff.day() > GDD_SEASON_END_DAY {
        (cutoff.day() - GDD_SEASON_END_DAY) as usize
    } else {
        0
    }
}

/// True once `date` is past December 1 of its own year.
pub fn past_risk_cutoff(date: NaiveDate) -> bool {
    let cutoff = NaiveDate::from_ymd_opt(date.year(), RISK_CUTOFF_MONTH, RISK_CUTOFF_DAY)
        .expect("December 1 exists in every year");
    date > cutoff
}
