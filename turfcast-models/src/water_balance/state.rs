/// Bounded deficit state owned by one simulation run.
use super::params::SoilCharacteristics;
use serde::{Deserialize, Serialize};

/// Soil moisture relative to field capacity, inches of water.
///
/// Zero means field capacity; negative is drier, positive wetter. Always
/// clamped to `[wilting_point - field_capacity, saturation - field_capacity]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterBalanceState {
    deficit: f64,
}

impl WaterBalanceState {
    /// Start at field capacity (deficit zero).
    pub fn at_field_capacity() -> Self {
        Self { deficit: 0.0 }
    }

    /// Start at a caller-supplied deficit, clamped into bounds.
    pub fn with_deficit(deficit: f64, soil: &SoilCharacteristics) -> Self {
        Self {
            deficit: deficit.clamp(soil.lower_bound(), soil.upper_bound()),
        }
    }

    pub fn deficit(&self) -> f64 {
        self.deficit
    }

    /// Add water (or remove, when negative) and re-clamp.
    pub(crate) fn apply(&mut self, delta: f64, soil: &SoilCharacteristics) {
        self.deficit = (self.deficit + delta).clamp(soil.lower_bound(), soil.upper_bound());
    }

    /// Stored water as a fraction of saturation.
    pub fn saturation_fraction(&self, soil: &SoilCharacteristics) -> f64 {
        ((soil.field_capacity + self.deficit) / soil.saturation).clamp(0.0, 1.0)
    }

    /// Stored water as a fraction of field capacity (can exceed 1 when
    /// wetter than field capacity).
    pub fn field_capacity_fraction(&self, soil: &SoilCharacteristics) -> f64 {
        ((soil.field_capacity + self.deficit) / soil.field_capacity).max(0.0)
    }
}

impl Default for WaterBalanceState {
    fn default() -> Self {
        Self::at_field_capacity()
    }
}
