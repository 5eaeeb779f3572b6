/// Product orchestration: one batch transform per location change.
///
/// Wires the pipeline: aggregated daily records feed the GDD projection
/// and the five risk indices; the evapotranspiration series is aligned
/// against the grid precipitation series and drives the water-balance
/// simulation, parameterized by the soil-texture classification; the
/// growth-potential estimator consumes the simulated saturation, the grid
/// temperature, and day length. Each invocation builds fresh state, so
/// concurrent calls for different locations need no locking.
use chrono::NaiveDate;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use turfcast_weather::align::align;
use turfcast_weather::daily::DailyRecord;
use turfcast_weather::grid::{GddBase, GridSeries};
use turfcast_weather::series::DateValueSeries;
use turfcast_weather::{Result, TurfcastError};

use crate::gdd::GddAccumulator;
use crate::growth::{growth_potential, GrowthDay, GrowthParams, GrowthPotential};
use crate::risk::{assess_all, RiskAssessment};
use crate::texture::{classify, SoilHorizon, TextureClass, TextureSummary, DEFAULT_TEXTURE};
use crate::water_balance::{
    simulate, simulate_optimal, DayForcing, DaySnapshot, OptimalRun, OptimalWatering,
    WaterBalanceParams,
};

/// Everything one location's product computation consumes.
#[derive(Debug, Clone)]
pub struct ProductInputs<'a> {
    /// Aggregated observed+forecast daily records.
    pub days: &'a [DailyRecord],
    /// Grid rows: per-day GDD totals, precipitation, average temperature.
    pub grid: &'a GridSeries,
    /// Daily potential evapotranspiration, inches, observed plus forecast.
    pub et: &'a DateValueSeries,
    /// Soil-survey horizons for the location's map unit.
    pub horizons: &'a [SoilHorizon],
    /// Site latitude, degrees.
    pub latitude_deg: f64,
    /// Dates a fixed irrigation event is applied.
    pub irrigation_dates: &'a [NaiveDate],
    /// Start of the optimal-watering estimate; defaults to the first
    /// simulated day.
    pub optimal_start: Option<NaiveDate>,
}

/// Derived products returned to the display layer: plain serializable
/// sequences, no UI concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherProducts {
    pub gdd_base_32: DateValueSeries,
    pub gdd_base_50: DateValueSeries,
    pub risks: Vec<RiskAssessment>,
    pub precipitation: DateValueSeries,
    pub cumulative_precipitation: DateValueSeries,
    pub avg_temperature_f: DateValueSeries,
    /// `None` when classification failed and the default class was used.
    pub texture: Option<TextureSummary>,
    /// Class actually driving the simulation (fallback applied).
    pub texture_class: TextureClass,
    /// `None` when the ET and grid series share no dates (out of season).
    pub water_balance: Option<Vec<DaySnapshot>>,
    pub optimal_watering: Option<OptimalRun>,
    pub growth: Option<GrowthPotential>,
}

/// Compute every product for one location.
pub fn compute_products(inputs: &ProductInputs<'_>) -> Result<WeatherProducts> {
    let gdd_base_32 = project_gdd(inputs, GddBase::Base32)?;
    let gdd_base_50 = project_gdd(inputs, GddBase::Base50)?;
    let risks = assess_all(inputs.days)?;

    let precipitation = inputs.grid.precipitation()?;
    let cumulative_precipitation = inputs.grid.cumulative_precipitation()?;
    let avg_temperature_f = inputs.grid.avg_temperature_f()?;

    let (texture, texture_class) = match classify(inputs.horizons) {
        Ok(summary) => {
            let class = summary.class;
            (Some(summary), class)
        }
        Err(TurfcastError::TextureClassification(reason)) => {
            warn!("texture classification failed ({reason}); using {DEFAULT_TEXTURE} default");
            (None, DEFAULT_TEXTURE)
        }
        Err(other) => return Err(other),
    };

    let params = WaterBalanceParams::for_texture(texture_class);
    let simulation = match build_forcing(inputs, &precipitation) {
        Ok(forcing) => Some(forcing),
        Err(TurfcastError::NoOverlap { left, right }) => {
            info!("no overlap between ET and grid series ({left} vs {right}); skipping simulation");
            None
        }
        Err(TurfcastError::EmptySeries(which)) => {
            info!("{which} series empty; skipping simulation");
            None
        }
        Err(other) => return Err(other),
    };

    let (water_balance, optimal_watering, growth) = match simulation {
        Some(forcing) => {
            let snapshots = simulate(&params, &forcing, None);
            let schedule = OptimalWatering {
                start: inputs
                    .optimal_start
                    .or_else(|| forcing.first().map(|d| d.date))
                    .unwrap_or_default(),
                increment_in: params.irrigation_increment_in,
            };
            let optimal = simulate_optimal(&params, &forcing, None, schedule);
            let growth = estimate_growth(inputs, &snapshots)?;
            (Some(snapshots), Some(optimal), growth)
        }
        None => (None, None, None),
    };

    Ok(WeatherProducts {
        gdd_base_32,
        gdd_base_50,
        risks,
        precipitation,
        cumulative_precipitation,
        avg_temperature_f,
        texture,
        texture_class,
        water_balance,
        optimal_watering,
        growth,
    })
}

/// Observed cumulative GDD from the grid, projected over forecast days.
fn project_gdd(inputs: &ProductInputs<'_>, base: GddBase) -> Result<DateValueSeries> {
    let observed = inputs.grid.gdd_series(base)?;
    let forecast: Vec<DailyRecord> = match observed.last() {
        Some(last) => inputs
            .days
            .iter()
            .filter(|d| d.date() > last.date)
            .cloned()
            .collect(),
        None => inputs.days.to_vec(),
    };
    GddAccumulator::for_base(base).project(&observed, &forecast)
}

/// Align ET against grid precipitation and zip into daily forcing.
fn build_forcing(
    inputs: &ProductInputs<'_>,
    precipitation: &DateValueSeries,
) -> Result<Vec<DayForcing>> {
    let aligned = align(inputs.et, precipitation)?;
    let forcing = aligned
        .left
        .iter()
        .zip(aligned.right.iter())
        .map(|(et, precip)| DayForcing {
            date: precip.date,
            precip_in: precip.value,
            pet_in: et.value,
            irrigation_in: if inputs.irrigation_dates.contains(&precip.date) {
                crate::water_balance::params::IRRIGATION_INCREMENT_IN
            } else {
                0.0
            },
        })
        .collect();
    Ok(forcing)
}

/// Growth potential over the days the simulation and the grid both cover.
fn estimate_growth(
    inputs: &ProductInputs<'_>,
    snapshots: &[DaySnapshot],
) -> Result<Option<GrowthPotential>> {
    let temps = inputs.grid.avg_temperature_c()?;
    let by_date: HashMap<NaiveDate, f64> = temps.iter().map(|p| (p.date, p.value)).collect();

    let days: Vec<GrowthDay> = snapshots
        .iter()
        .filter_map(|snap| {
            by_date.get(&snap.date).map(|&temp_c| GrowthDay {
                date: snap.date,
                avg_temp_c: temp_c,
                saturation_fraction: snap.saturation_fraction,
            })
        })
        .collect();

    if days.is_empty() {
        return Ok(None);
    }
    let params = GrowthParams::cool_season(inputs.latitude_deg);
    Ok(Some(growth_potential(&days, &params)?))
}
