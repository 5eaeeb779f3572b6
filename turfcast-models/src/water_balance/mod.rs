/// Soil water-deficit simulation.
///
/// A day-by-day bucket model of soil moisture relative to field capacity,
/// sub-stepped hourly for numerical stability, with drainage above field
/// capacity, an FAO-56-style water-stress coefficient throttling
/// evapotranspiration when dry, fixed irrigation events, and an
/// optimal-watering variant estimating the ideal schedule.

pub mod params;
pub mod run;
pub mod state;

pub use params::{SoilCharacteristics, WaterBalanceParams, CROP_COEFFICIENT, STRESS_FRACTION_P};
pub use run::{simulate, simulate_optimal, DayForcing, DaySnapshot, OptimalRun, OptimalWatering};
pub use state::WaterBalanceState;
