/// Water-balance parameters.
///
/// One consolidated characteristics table keyed by texture class, injected
/// into the simulator rather than hard-coded per module. All water depths
/// are inches of water per foot of soil.
use crate::texture::TextureClass;
use serde::{Deserialize, Serialize};

/// Turfgrass crop coefficient applied to potential evapotranspiration.
pub const CROP_COEFFICIENT: f64 = 0.80;

/// FAO-56 depletion fraction: share of total available water the turf can
/// lose before evapotranspiration is throttled.
pub const STRESS_FRACTION_P: f64 = 0.50;

/// Default water added per irrigation or optimal-watering event, inches.
pub const IRRIGATION_INCREMENT_IN: f64 = 0.5;

/// Soil moisture landmarks for one texture class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilCharacteristics {
    pub wilting_point: f64,
    pub pre_wilting_point: f64,
    pub stress_threshold: f64,
    pub field_capacity: f64,
    pub saturation: f64,
    /// Days free drainage takes from saturation back to field capacity.
    pub drainage_days: f64,
}

const LOW_SOIL: SoilCharacteristics = SoilCharacteristics {
    wilting_point: 0.60,
    pre_wilting_point: 1.00,
    stress_threshold: 1.20,
    field_capacity: 1.80,
    saturation: 4.80,
    drainage_days: 1.0,
};

const MEDIUM_SOIL: SoilCharacteristics = SoilCharacteristics {
    wilting_point: 1.20,
    pre_wilting_point: 1.70,
    stress_threshold: 2.00,
    field_capacity: 2.70,
    saturation: 5.40,
    drainage_days: 2.0,
};

const HIGH_SOIL: SoilCharacteristics = SoilCharacteristics {
    wilting_point: 2.20,
    pre_wilting_point: 2.70,
    stress_threshold: 3.00,
    field_capacity: 3.90,
    saturation: 6.00,
    drainage_days: 3.0,
};

impl SoilCharacteristics {
    /// Default characteristics for a texture class.
    pub const fn for_texture(class: TextureClass) -> Self {
        match class {
            TextureClass::Low => LOW_SOIL,
            TextureClass::Medium => MEDIUM_SOIL,
            TextureClass::High => HIGH_SOIL,
        }
    }

    /// Total available water: field capacity minus wilting point.
    pub fn taw(&self) -> f64 {
        self.field_capacity - self.wilting_point
    }

    /// Lowest representable deficit (driest).
    pub fn lower_bound(&self) -> f64 {
        self.wilting_point - self.field_capacity
    }

    /// Highest representable deficit (saturated).
    pub fn upper_bound(&self) -> f64 {
        self.saturation - self.field_capacity
    }

    /// Deficit at which optimal watering triggers.
    pub fn watering_trigger(&self) -> f64 {
        self.pre_wilting_point - self.field_capacity
    }

    /// Free drainage per day when wetter than field capacity.
    pub fn potential_drainage_rate(&self) -> f64 {
        (self.saturation - self.field_capacity) / self.drainage_days
    }
}

/// Everything the simulator needs for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterBalanceParams {
    pub soil: SoilCharacteristics,
    pub crop_coefficient: f64,
    pub stress_fraction_p: f64,
    /// Water added on each designated irrigation date, inches.
    pub irrigation_increment_in: f64,
}

impl WaterBalanceParams {
    pub fn for_texture(class: TextureClass) -> Self {
        Self {
            soil: SoilCharacteristics::for_texture(class),
            crop_coefficient: CROP_COEFFICIENT,
            stress_fraction_p: STRESS_FRACTION_P,
            irrigation_increment_in: IRRIGATION_INCREMENT_IN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landmarks_are_ordered_for_every_class() {
        for class in [TextureClass::Low, TextureClass::Medium, TextureClass::High] {
            let soil = SoilCharacteristics::for_texture(class);
            assert!(soil.wilting_point < soil.pre_wilting_point);
            assert!(soil.pre_wilting_point < soil.stress_threshold);
            assert!(soil.stress_threshold < soil.field_capacity);
            assert!(soil.field_capacity < soil.saturation);
            assert!(soil.drainage_days >= 1.0);
        }
    }

    #[test]
    fn derived_quantities() {
        let soil = SoilCharacteristics::for_texture(TextureClass::Medium);
        assert_eq!(soil.taw(), 1.5);
        assert_eq!(soil.lower_bound(), -1.5);
        assert_eq!(soil.upper_bound(), 2.7);
        assert_eq!(soil.watering_trigger(), -1.0);
        assert_eq!(soil.potential_drainage_rate(), 1.35);
    }
}
