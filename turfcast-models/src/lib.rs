//! Derived turfgrass decision models.
//!
//! Deterministic transforms from aggregated weather and soil-survey data
//! into the dashboard's decision signals: growing-degree-day projections,
//! five pest/stress risk indices, a soil water-deficit simulation with an
//! optimal-watering variant, a growth-potential score, and a soil-texture
//! classification. Everything here is synchronous, CPU-bound, and
//! replayable: identical inputs always produce identical outputs.

pub mod gdd;
pub mod growth;
pub mod products;
pub mod risk;
pub mod rolling;
pub mod texture;
pub mod water_balance;
