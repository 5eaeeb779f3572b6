/// Soil texture classification from soil-survey horizon records.
///
/// Horizons in the top 50 cm are grouped by map-unit component,
/// depth-weighted into a clay/sand/silt composition per component, then
/// area-weighted across components into one triple that selects the
/// water-balance texture class.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use turfcast_weather::{Result, TurfcastError};

/// Horizons below this depth are ignored (or clipped at it).
pub const DEPTH_LIMIT_CM: f64 = 50.0;

/// Texture class used to pick default water-balance characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureClass {
    /// Sandy, low water-holding capacity.
    Low,
    /// Loamy.
    Medium,
    /// Clayey or silty, high water-holding capacity.
    High,
}

impl std::fmt::Display for TextureClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextureClass::Low => write!(f, "low"),
            TextureClass::Medium => write!(f, "medium"),
            TextureClass::High => write!(f, "high"),
        }
    }
}

/// Fallback class when the survey response is unusable.
pub const DEFAULT_TEXTURE: TextureClass = TextureClass::Medium;

/// One soil-survey horizon row. Null survey fields stay `None`; a row with
/// any null is excluded from its component's average rather than
/// zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilHorizon {
    pub clay_pct: Option<f64>,
    pub sand_pct: Option<f64>,
    pub silt_pct: Option<f64>,
    pub top_depth_cm: f64,
    pub bottom_depth_cm: f64,
    pub area_pct: Option<f64>,
    pub component: String,
}

/// Depth- and area-weighted clay/sand/silt triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureComposition {
    pub clay_pct: f64,
    pub sand_pct: f64,
    pub silt_pct: f64,
}

/// A component's share of the map unit after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentShare {
    pub name: String,
    pub area_pct: f64,
}

/// Classification result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSummary {
    pub composition: TextureComposition,
    pub class: TextureClass,
    /// Normalized component shares; always sums to 100.
    pub components: Vec<ComponentShare>,
}

/// Classify a map unit's horizons.
///
/// Fails with [`TurfcastError::TextureClassification`] when no component
/// has a usable horizon, distinct from a low-confidence result, so the
/// caller can fall back to [`DEFAULT_TEXTURE`] explicitly.
pub fn classify(horizons: &[SoilHorizon]) -> Result<TextureSummary> {
    // Group rows by component, keeping first-seen order for determinism.
    let mut order: Vec<&str> = Vec::new();
    let mut grouped: HashMap<&str, Vec<&SoilHorizon>> = HashMap::new();
    for horizon in horizons {
        let name = horizon.component.as_str();
        grouped
            .entry(name)
            .or_insert_with(|| {
                order.push(name);
                Vec::new()
            })
            .push(horizon);
    }

    let mut components: Vec<(String, TextureComposition, f64)> = Vec::new();
    for name in order {
        if let Some((composition, area)) = component_composition(&grouped[name]) {
            components.push((name.to_string(), composition, area));
        }
    }

    if components.is_empty() {
        return Err(TurfcastError::TextureClassification(
            "no component with usable horizons in the top 50cm".to_string(),
        ));
    }

    let total_area: f64 = components.iter().map(|(_, _, a)| a).sum();
    if total_area <= 0.0 {
        return Err(TurfcastError::TextureClassification(
            "component area percentages sum to zero".to_string(),
        ));
    }

    // Normalize shares to 100 even when the survey covers less.
    let scale = 100.0 / total_area;
    let mut clay = 0.0;
    let mut sand = 0.0;
    let mut silt = 0.0;
    let mut shares = Vec::with_capacity(components.len());
    for (name, composition, area) in components {
        let share = area * scale;
        clay += composition.clay_pct * share / 100.0;
        sand += composition.sand_pct * share / 100.0;
        silt += composition.silt_pct * share / 100.0;
        shares.push(ComponentShare {
            name,
            area_pct: share,
        });
    }

    let composition = TextureComposition {
        clay_pct: clay,
        sand_pct: sand,
        silt_pct: silt,
    };
    Ok(TextureSummary {
        class: classify_composition(&composition),
        composition,
        components: shares,
    })
}

/// Depth-weighted composition of one component's rows, clipped at 50 cm.
fn component_composition(rows: &[&SoilHorizon]) -> Option<(TextureComposition, f64)> {
    let mut weight_total = 0.0;
    let mut clay = 0.0;
    let mut sand = 0.0;
    let mut silt = 0.0;
    let mut area = None;

    for row in rows {
        if let Some(a) = row.area_pct {
            area.get_or_insert(a);
        }
        let (c, s, si) = match (row.clay_pct, row.sand_pct, row.silt_pct) {
            (Some(c), Some(s), Some(si)) => (c, s, si),
            _ => continue,
        };
        if row.top_depth_cm >= DEPTH_LIMIT_CM || row.bottom_depth_cm <= row.top_depth_cm {
            continue;
        }
        let weight = row.bottom_depth_cm.min(DEPTH_LIMIT_CM) - row.top_depth_cm;
        weight_total += weight;
        clay += c * weight;
        sand += s * weight;
        silt += si * weight;
    }

    if weight_total <= 0.0 {
        return None;
    }
    Some((
        TextureComposition {
            clay_pct: clay / weight_total,
            sand_pct: sand / weight_total,
            silt_pct: silt / weight_total,
        },
        area?,
    ))
}

/// Fixed-threshold classification of a composition triple.
pub fn classify_composition(c: &TextureComposition) -> TextureClass {
    if c.sand_pct >= 50.0 && c.clay_pct < 20.0 {
        TextureClass::Low
    } else if c.clay_pct >= 36.0
        || c.silt_pct >= 50.0
        || (c.clay_pct >= 30.0 && c.sand_pct < 45.0)
    {
        TextureClass::High
    } else {
        TextureClass::Medium
    }
}
