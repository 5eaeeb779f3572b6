/// Simulation loop: one day at a time, 24 hourly substeps per day.
use super::params::WaterBalanceParams;
use super::state::WaterBalanceState;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

/// Hourly substeps per simulated day.
pub const SUBSTEPS_PER_DAY: usize = 24;

/// One day's forcing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayForcing {
    pub date: NaiveDate,
    /// Precipitation, inches.
    pub precip_in: f64,
    /// Potential evapotranspiration, inches.
    pub pet_in: f64,
    /// Fixed irrigation applied this day, inches (usually 0 or 0.5).
    pub irrigation_in: f64,
}

/// Daily snapshot of the simulated state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DaySnapshot {
    pub date: NaiveDate,
    pub deficit_in: f64,
    /// Stored water over saturation.
    pub saturation_fraction: f64,
    /// Stored water over field capacity.
    pub field_capacity_fraction: f64,
}

/// Optimal-watering schedule: from `start`, add `increment_in` whenever
/// the running deficit reaches the pre-wilting trigger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalWatering {
    pub start: NaiveDate,
    pub increment_in: f64,
}

/// Outcome of an optimal-watering run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalRun {
    pub days: Vec<DaySnapshot>,
    pub total_added_in: f64,
    pub watering_dates: Vec<NaiveDate>,
}

/// FAO-56 water-stress coefficient from the deficit at the start of a day.
///
/// Unity while the depleted share of total available water stays within
/// the depletion fraction `p`; below that it falls linearly to zero at the
/// wilting point.
pub fn stress_coefficient(deficit: f64, params: &WaterBalanceParams) -> f64 {
    let taw = params.soil.taw();
    let depletion = deficit.abs();
    if depletion <= params.stress_fraction_p * taw {
        1.0
    } else {
        ((taw - depletion) / ((1.0 - params.stress_fraction_p) * taw)).max(0.0)
    }
}

/// Run the simulation over consecutive days.
///
/// Deterministic and replayable: identical forcing and initial state
/// always produce the identical snapshot sequence.
pub fn simulate(
    params: &WaterBalanceParams,
    days: &[DayForcing],
    initial: Option<WaterBalanceState>,
) -> Vec<DaySnapshot> {
    run_inner(params, days, initial, None).days
}

/// Run in optimal-watering mode.
pub fn simulate_optimal(
    params: &WaterBalanceParams,
    days: &[DayForcing],
    initial: Option<WaterBalanceState>,
    schedule: OptimalWatering,
) -> OptimalRun {
    run_inner(params, days, initial, Some(schedule))
}

fn run_inner(
    params: &WaterBalanceParams,
    days: &[DayForcing],
    initial: Option<WaterBalanceState>,
    schedule: Option<OptimalWatering>,
) -> OptimalRun {
    let soil = &params.soil;
    let mut state = initial.unwrap_or_default();
    let mut snapshots = Vec::with_capacity(days.len());
    let mut total_added = 0.0;
    let mut watering_dates: Vec<NaiveDate> = Vec::new();

    let hourly_drainage_cap = soil.potential_drainage_rate() / SUBSTEPS_PER_DAY as f64;

    for day in days {
        // The stress coefficient holds for the whole day, computed from
        // where the bucket stood at the day's start.
        let ks = stress_coefficient(state.deficit(), params);
        let water_in = (day.precip_in + day.irrigation_in) / SUBSTEPS_PER_DAY as f64;
        let et_out = day.pet_in * params.crop_coefficient * ks / SUBSTEPS_PER_DAY as f64;

        for _ in 0..SUBSTEPS_PER_DAY {
            // Free drainage only above field capacity.
            let drainage = if state.deficit() > 0.0 {
                state.deficit().min(hourly_drainage_cap)
            } else {
                0.0
            };
            state.apply(water_in - et_out - drainage, soil);

            if let Some(schedule) = schedule {
                if day.date >= schedule.start && state.deficit() <= soil.watering_trigger() {
                    state.apply(schedule.increment_in, soil);
                    total_added += schedule.increment_in;
                    if watering_dates.last() != Some(&day.date) {
                        watering_dates.push(day.date);
                    }
                    debug!(
                        "optimal watering on {}: +{:.2}in, deficit {:.3}",
                        day.date,
                        schedule.increment_in,
                        state.deficit()
                    );
                }
            }
        }

        snapshots.push(DaySnapshot {
            date: day.date,
            deficit_in: state.deficit(),
            saturation_fraction: state.saturation_fraction(soil),
            field_capacity_fraction: state.field_capacity_fraction(soil),
        });
    }

    OptimalRun {
        days: snapshots,
        total_added_in: total_added,
        watering_dates,
    }
}
